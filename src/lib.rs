//! Goal Rush - collect the goal, dodge the obstacles, beat the clock
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, placement, scheduled ticks)
//! - `game`: Controller that owns a session and routes input
//! - `hud`: Score/timer text and the restart control, as a drawable scene
//! - `surface`: Rendering/input surface abstraction
//! - `settings`: Data-driven game tuning

pub mod game;
pub mod hud;
pub mod settings;
pub mod sim;
pub mod surface;

pub use game::Game;
pub use settings::Settings;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Window dimensions (pixels == world units)
    pub const SCREEN_WIDTH: u32 = 600;
    pub const SCREEN_HEIGHT: u32 = 600;
    /// Gap between the window edge and the arena edge
    pub const ARENA_MARGIN: u32 = 20;

    /// Player step distance per motion tick
    pub const PLAYER_SPEED: f32 = 10.0;
    /// Obstacle step distance per motion tick
    pub const OBSTACLE_STEP: f32 = 10.0;
    pub const OBSTACLE_COUNT: usize = 20;

    /// Session length in seconds
    pub const TIMER_START: u32 = 30;

    /// Player touches goal/obstacle when closer than this
    pub const COLLISION_RADIUS: f32 = 20.0;
    /// Minimum spawn distance from the player (goal and obstacles)
    pub const PLAYER_CLEARANCE: f32 = 50.0;
    /// Minimum goal distance from any obstacle
    pub const GOAL_OBSTACLE_CLEARANCE: f32 = 35.0;
    /// Minimum obstacle distance from the goal
    pub const OBSTACLE_GOAL_CLEARANCE: f32 = 50.0;
    /// Random draws before the goal falls back to the arena center
    pub const GOAL_PLACEMENT_ATTEMPTS: u32 = 80;
    /// Random draws before an obstacle settles for its best candidate
    pub const OBSTACLE_PLACEMENT_ATTEMPTS: u32 = 1000;

    /// Task periods (milliseconds)
    pub const PLAYER_MOTION_MS: u64 = 50;
    pub const OBSTACLE_MOTION_MS: u64 = 300;
    pub const COLLISION_MS: u64 = 100;
    pub const TIMER_MS: u64 = 1000;
}

/// Convert a canvas pixel position (origin top-left, y down) to world space
/// (origin at center, y up)
#[inline]
pub fn screen_to_world(x: f32, y: f32, width: f32, height: f32) -> Vec2 {
    Vec2::new(x - width / 2.0, height / 2.0 - y)
}

/// Convert a world position to canvas pixel space
#[inline]
pub fn world_to_screen(pos: Vec2, width: f32, height: f32) -> (f32, f32) {
    (pos.x + width / 2.0, height / 2.0 - pos.y)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_screen_world_round_trip_center() {
        let world = screen_to_world(300.0, 300.0, 600.0, 600.0);
        assert_eq!(world, Vec2::ZERO);

        let (sx, sy) = world_to_screen(Vec2::new(-60.0, -70.0), 600.0, 600.0);
        assert_eq!((sx, sy), (240.0, 370.0));
    }

    #[test]
    fn test_screen_y_axis_flipped() {
        // Top of the canvas is positive world y
        let top = screen_to_world(300.0, 0.0, 600.0, 600.0);
        assert_eq!(top, Vec2::new(0.0, 300.0));
    }
}
