//! Rendering/input surface abstraction
//!
//! The game never draws directly. It describes a frame as a `Scene` and hands
//! it to whatever `Surface` the platform provides (a browser canvas, a log,
//! a test recorder). Coordinates are world space: origin at the center, y up.

use glam::Vec2;

use crate::sim::Direction;

/// 8-bit RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color(pub u8, pub u8, pub u8);

impl Color {
    pub const LIGHT_BLUE: Color = Color(0xad, 0xd8, 0xe6);
    pub const GREEN: Color = Color(0x00, 0x80, 0x00);
    pub const RED: Color = Color(0xff, 0x00, 0x00);
    pub const YELLOW: Color = Color(0xff, 0xff, 0x00);
    pub const BLACK: Color = Color(0x00, 0x00, 0x00);

    /// `#rrggbb`
    pub fn to_css(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

/// Sprite silhouettes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeKind {
    Turtle,
    Circle,
    Square,
}

/// A positioned, oriented entity sprite
#[derive(Debug, Clone, PartialEq)]
pub struct Sprite {
    pub kind: ShapeKind,
    pub pos: Vec2,
    /// Degrees, counter-clockwise from east
    pub heading: f32,
    pub fill: Color,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontWeight {
    Normal,
    Bold,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Font {
    pub family: &'static str,
    pub size: u32,
    pub weight: FontWeight,
}

impl Font {
    pub const fn bold(size: u32) -> Self {
        Self {
            family: "Arial",
            size,
            weight: FontWeight::Bold,
        }
    }

    /// CSS font shorthand, e.g. `bold 16px Arial`
    pub fn to_css(self) -> String {
        let weight = match self.weight {
            FontWeight::Normal => "normal",
            FontWeight::Bold => "bold",
        };
        format!("{} {}px {}", weight, self.size, self.family)
    }
}

/// Text anchored at its baseline. Lines split on `\n` stack upward from
/// `pos`, so the last line sits on the anchor.
#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    pub text: String,
    pub pos: Vec2,
    pub align: Align,
    pub font: Font,
    pub color: Color,
}

/// Filled axis-aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Panel {
    pub min: Vec2,
    pub max: Vec2,
    pub fill: Color,
}

/// A drawing backend
pub trait Surface {
    fn clear(&mut self, background: Color);
    fn draw_sprite(&mut self, sprite: &Sprite);
    fn draw_panel(&mut self, panel: &Panel);
    fn draw_label(&mut self, label: &Label);

    /// Hint that a batch of draws is starting (`true`) or done (`false`).
    /// Backends that redraw incrementally can hold off until the batch ends.
    fn set_batching(&mut self, _batching: bool) {}
}

/// Everything needed to draw one frame
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub background: Color,
    pub sprites: Vec<Sprite>,
    pub panels: Vec<Panel>,
    pub labels: Vec<Label>,
}

impl Scene {
    pub fn new(background: Color) -> Self {
        Self {
            background,
            sprites: Vec::new(),
            panels: Vec::new(),
            labels: Vec::new(),
        }
    }

    /// Draw back to front: background, panels, sprites, text
    pub fn render(&self, surface: &mut impl Surface) {
        surface.set_batching(true);
        surface.clear(self.background);
        for panel in &self.panels {
            surface.draw_panel(panel);
        }
        for sprite in &self.sprites {
            surface.draw_sprite(sprite);
        }
        for label in &self.labels {
            surface.draw_label(label);
        }
        surface.set_batching(false);
    }

    /// Concatenated label text, one label per line
    pub fn text(&self) -> String {
        self.labels
            .iter()
            .map(|l| l.text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Keys the game listens for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Left,
    Right,
    Up,
    Down,
    /// Toggle the demo pilot
    Autopilot,
}

impl Key {
    /// Map a DOM `KeyboardEvent.code`
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "ArrowLeft" => Some(Key::Left),
            "ArrowRight" => Some(Key::Right),
            "ArrowUp" => Some(Key::Up),
            "ArrowDown" => Some(Key::Down),
            "KeyA" => Some(Key::Autopilot),
            _ => None,
        }
    }

    pub fn direction(self) -> Option<Direction> {
        match self {
            Key::Left => Some(Direction::Left),
            Key::Right => Some(Direction::Right),
            Key::Up => Some(Direction::Up),
            Key::Down => Some(Direction::Down),
            Key::Autopilot => None,
        }
    }
}

/// Input delivered by the surface
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    KeyDown(Key),
    KeyUp(Key),
    /// Click position in world space
    Click { x: f32, y: f32 },
}
