//! Goal Rush entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::f64::consts::TAU;
    use std::rc::Rc;

    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, KeyboardEvent, MouseEvent};

    use goal_rush::surface::{
        Align, Color, InputEvent, Key, Label, Panel, ShapeKind, Sprite, Surface,
    };
    use goal_rush::{Game, Settings, screen_to_world, world_to_screen};

    /// Sprite half-size in pixels
    const SPRITE_HALF: f64 = 10.0;

    /// `Surface` backed by a 2D canvas context
    struct CanvasSurface {
        ctx: CanvasRenderingContext2d,
        width: f32,
        height: f32,
    }

    impl CanvasSurface {
        fn to_screen(&self, pos: glam::Vec2) -> (f64, f64) {
            let (x, y) = world_to_screen(pos, self.width, self.height);
            (x as f64, y as f64)
        }
    }

    impl Surface for CanvasSurface {
        fn clear(&mut self, background: Color) {
            self.ctx.set_fill_style_str(&background.to_css());
            self.ctx
                .fill_rect(0.0, 0.0, self.width as f64, self.height as f64);
        }

        fn draw_sprite(&mut self, sprite: &Sprite) {
            let (x, y) = self.to_screen(sprite.pos);
            let ctx = &self.ctx;
            ctx.save();
            let _ = ctx.translate(x, y);
            // Canvas y points down, so headings turn clockwise
            let _ = ctx.rotate(-(sprite.heading as f64).to_radians());
            ctx.set_fill_style_str(&sprite.fill.to_css());
            ctx.begin_path();
            match sprite.kind {
                ShapeKind::Circle => {
                    let _ = ctx.arc(0.0, 0.0, SPRITE_HALF, 0.0, TAU);
                }
                ShapeKind::Square => {
                    ctx.rect(-SPRITE_HALF, -SPRITE_HALF, 2.0 * SPRITE_HALF, 2.0 * SPRITE_HALF);
                }
                ShapeKind::Turtle => {
                    // Shell plus a head pointing along the heading
                    let _ = ctx.arc(0.0, 0.0, SPRITE_HALF * 0.8, 0.0, TAU);
                    ctx.move_to(SPRITE_HALF * 1.4, 0.0);
                    ctx.line_to(SPRITE_HALF * 0.6, -SPRITE_HALF * 0.4);
                    ctx.line_to(SPRITE_HALF * 0.6, SPRITE_HALF * 0.4);
                    ctx.close_path();
                }
            }
            ctx.fill();
            ctx.restore();
        }

        fn draw_panel(&mut self, panel: &Panel) {
            // World max.y is the top edge on screen
            let (left, top) = self.to_screen(glam::Vec2::new(panel.min.x, panel.max.y));
            let size = panel.max - panel.min;
            self.ctx.set_fill_style_str(&panel.fill.to_css());
            self.ctx.fill_rect(left, top, size.x as f64, size.y as f64);
        }

        fn draw_label(&mut self, label: &Label) {
            let (x, y) = self.to_screen(label.pos);
            self.ctx.set_font(&label.font.to_css());
            self.ctx.set_fill_style_str(&label.color.to_css());
            self.ctx.set_text_align(match label.align {
                Align::Left => "left",
                Align::Center => "center",
                Align::Right => "right",
            });
            let line_height = label.font.size as f64 * 1.25;
            let lines: Vec<&str> = label.text.lines().collect();
            for (i, line) in lines.iter().enumerate() {
                let rows_below = (lines.len() - 1 - i) as f64;
                let _ = self.ctx.fill_text(line, x, y - rows_below * line_height);
            }
        }
    }

    /// Browser game instance
    struct App {
        game: Game,
        surface: CanvasSurface,
    }

    impl App {
        fn frame(&mut self, time: f64) {
            self.game.advance(time as u64);
            for event in self.game.drain_events() {
                log::debug!("{:?}", event);
            }
            self.game.scene().render(&mut self.surface);
        }

        fn input(&mut self, event: InputEvent) {
            if self.game.handle(now_ms() as u64, event) {
                log::info!("Play again");
            }
            self.game.scene().render(&mut self.surface);
        }
    }

    fn now_ms() -> f64 {
        web_sys::window()
            .and_then(|w| w.performance())
            .map(|p| p.now())
            .unwrap_or_else(js_sys::Date::now)
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        log::info!("Goal Rush starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or("no canvas")?
            .dyn_into()?;

        let settings = Settings::load();
        canvas.set_width(settings.window_width);
        canvas.set_height(settings.window_height);

        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or("no 2d context")?
            .dyn_into()?;

        let surface = CanvasSurface {
            ctx,
            width: settings.window_width as f32,
            height: settings.window_height as f32,
        };

        let seed = js_sys::Date::now() as u64;
        let app = Rc::new(RefCell::new(App {
            game: Game::new(seed, settings, now_ms() as u64),
            surface,
        }));
        log::info!("Game initialized with seed: {}", seed);

        setup_key_handlers(&document, app.clone())?;
        setup_click_handler(&canvas, app.clone())?;

        request_animation_frame(app);
        log::info!("Goal Rush running!");
        Ok(())
    }

    fn setup_key_handlers(
        document: &web_sys::Document,
        app: Rc<RefCell<App>>,
    ) -> Result<(), JsValue> {
        for (kind, pressed) in [("keydown", true), ("keyup", false)] {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let Some(key) = Key::from_code(&event.code()) else {
                    return;
                };
                event.prevent_default();
                // Auto-repeat keydowns carry no new information
                if event.repeat() {
                    return;
                }
                let input = if pressed {
                    InputEvent::KeyDown(key)
                } else {
                    InputEvent::KeyUp(key)
                };
                app.borrow_mut().input(input);
            });
            document.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref())?;
            closure.forget();
        }
        Ok(())
    }

    fn setup_click_handler(
        canvas: &HtmlCanvasElement,
        app: Rc<RefCell<App>>,
    ) -> Result<(), JsValue> {
        let canvas_clone = canvas.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
            // Map CSS pixels to canvas pixels in case the canvas is scaled
            let rect = canvas_clone.get_bounding_client_rect();
            let w = canvas_clone.width() as f32;
            let h = canvas_clone.height() as f32;
            let sx = (event.client_x() as f64 - rect.left()) / rect.width().max(1.0) * w as f64;
            let sy = (event.client_y() as f64 - rect.top()) / rect.height().max(1.0) * h as f64;
            let pos = screen_to_world(sx as f32, sy as f32, w, h);
            app.borrow_mut()
                .input(InputEvent::Click { x: pos.x, y: pos.y });
        });
        canvas.add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref())?;
        closure.forget();
        Ok(())
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(app, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(app: Rc<RefCell<App>>, time: f64) {
        app.borrow_mut().frame(time);
        request_animation_frame(app);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    let result = wasm_game::run();
    if let Err(ref e) = result {
        log::error!("Startup failed: {:?}", e);
    }
    result
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Goal Rush (native) starting...");
    log::info!("Native mode runs one demo session - build for wasm32 to play");

    let mut settings = goal_rush::Settings::load();
    settings.autopilot = true;
    let seed = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0);

    let score = native::run_demo(seed, settings);
    println!("Demo session finished (seed {seed}), final score {score}");
}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use goal_rush::sim::{GameEvent, GamePhase};
    use goal_rush::surface::{Color, Label, Panel, Sprite, Surface};
    use goal_rush::{Game, Settings};

    /// Frame step for the virtual clock (~60 fps)
    const FRAME_MS: u64 = 16;

    /// Prints text, tallies sprites
    #[derive(Default)]
    struct LogSurface {
        sprites: usize,
        batching: bool,
    }

    impl Surface for LogSurface {
        fn clear(&mut self, _background: Color) {
            self.sprites = 0;
        }

        fn draw_sprite(&mut self, _sprite: &Sprite) {
            self.sprites += 1;
        }

        fn draw_panel(&mut self, panel: &Panel) {
            log::debug!("panel {:?}..{:?}", panel.min, panel.max);
        }

        fn draw_label(&mut self, label: &Label) {
            for line in label.text.lines() {
                println!("  {line}");
            }
        }

        fn set_batching(&mut self, batching: bool) {
            if self.batching && !batching {
                log::debug!("frame done, {} sprites", self.sprites);
            }
            self.batching = batching;
        }
    }

    /// Play one full session on autopilot in virtual time
    pub fn run_demo(seed: u64, settings: Settings) -> i32 {
        let mut game = Game::new(seed, settings, 0);
        let mut now = 0;

        while game.state().phase == GamePhase::Running {
            now += FRAME_MS;
            game.advance(now);
            for event in game.drain_events() {
                match event {
                    GameEvent::TimerTick { time_left } if time_left % 10 == 0 => {
                        log::info!("{time_left}s left, score {}", game.state().score)
                    }
                    GameEvent::TimerTick { .. } => {}
                    other => log::debug!("{:?}", other),
                }
            }
        }

        game.scene().render(&mut LogSurface::default());
        game.state().score
    }
}
