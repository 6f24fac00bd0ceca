//! Session controller
//!
//! Owns one `GameState` and the task scheduler. The platform calls
//! `advance` with its clock, forwards timestamped input through `handle`, and draws
//! `scene()` afterwards.

use crate::hud::{self, RestartButton};
use crate::settings::Settings;
use crate::sim::{GameEvent, GameState, Scheduler, Task, run_task};
use crate::surface::{InputEvent, Key, Scene};

pub struct Game {
    state: GameState,
    scheduler: Scheduler,
    button: RestartButton,
    /// Latest clock reading seen (ms)
    now_ms: u64,
}

impl Game {
    /// Start a running session at clock reading `now_ms`
    pub fn new(seed: u64, settings: Settings, now_ms: u64) -> Self {
        log::info!("New session (seed {seed})");
        let mut game = Self {
            state: GameState::new(seed, settings),
            scheduler: Scheduler::new(),
            button: RestartButton::default(),
            now_ms,
        };
        game.schedule_all();
        game
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    fn period(&self, task: Task) -> u64 {
        let s = &self.state.settings;
        let ms = match task {
            Task::PlayerMotion => s.player_motion_ms,
            Task::ObstacleMotion => s.obstacle_motion_ms,
            Task::Collision => s.collision_ms,
            Task::Timer => s.timer_ms,
        };
        // A zero period would never let `advance` return
        ms.max(1)
    }

    /// Arm every task one period from now
    fn schedule_all(&mut self) {
        for task in Task::ALL {
            let at = self.now_ms + self.period(task);
            self.scheduler.schedule(task, at);
        }
    }

    /// Run every task due by `now_ms`, in deadline order.
    /// Returns the number of ticks run.
    pub fn advance(&mut self, now_ms: u64) -> usize {
        // Clock readings never go backwards
        let now_ms = now_ms.max(self.now_ms);
        let mut ticks = 0;

        while let Some((task, at)) = self.scheduler.pop_due(now_ms) {
            self.now_ms = at;
            ticks += 1;
            if run_task(&mut self.state, task) {
                let next = at + self.period(task);
                self.scheduler.schedule(task, next);
            }
            if !self.state.is_running() {
                self.scheduler.cancel_all();
            }
        }

        self.now_ms = now_ms;
        ticks
    }

    /// Catch up to `now_ms`, then apply one input event.
    /// Returns true if it restarted the game.
    pub fn handle(&mut self, now_ms: u64, event: InputEvent) -> bool {
        self.advance(now_ms);
        match event {
            InputEvent::KeyDown(Key::Autopilot) => {
                let settings = &mut self.state.settings;
                settings.autopilot = !settings.autopilot;
                log::info!("Autopilot {}", if settings.autopilot { "on" } else { "off" });
                false
            }
            InputEvent::KeyDown(key) => {
                if let Some(direction) = key.direction() {
                    if self.state.is_running() {
                        self.state.player.set_direction(direction);
                    }
                }
                false
            }
            InputEvent::KeyUp(key) => {
                if let Some(direction) = key.direction() {
                    self.state.player.release(direction);
                }
                false
            }
            InputEvent::Click { x, y } => self.on_click(x, y),
        }
    }

    /// Restart if `(x, y)` hits the visible restart control
    pub fn on_click(&mut self, x: f32, y: f32) -> bool {
        if self.button.on_click(self.state.phase, x, y) {
            self.restart();
            true
        } else {
            false
        }
    }

    /// GameOver -> Running, re-arming every task from the current clock
    pub fn restart(&mut self) {
        log::info!("Restarting (previous score {})", self.state.score);
        self.state.restart();
        self.scheduler.cancel_all();
        self.schedule_all();
    }

    /// Take the events produced since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.state.events)
    }

    pub fn scene(&self) -> Scene {
        hud::build_scene(&self.state, &self.button)
    }

    /// Mutable access for tests that need to stage positions
    #[cfg(test)]
    pub(crate) fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }
}
