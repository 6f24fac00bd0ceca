//! Game settings and tuning
//!
//! Read-only at runtime. On the web, overrides can be placed in LocalStorage
//! as JSON; any field left out keeps its default.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// What happens when an entity steps past the arena edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum BoundaryPolicy {
    /// Snap to the opposite edge (exit right, reappear left)
    #[default]
    Wrap,
    /// Stop at the edge
    Clamp,
}

/// Game settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Arena ===
    /// Window width in pixels
    pub window_width: u32,
    /// Window height in pixels
    pub window_height: u32,
    /// Gap between window edge and arena edge
    pub arena_margin: u32,

    // === Entities ===
    pub player_speed: f32,
    pub obstacle_count: usize,
    pub obstacle_step: f32,
    pub player_boundary: BoundaryPolicy,
    pub obstacle_boundary: BoundaryPolicy,

    // === Rules ===
    /// Session length in seconds
    pub start_time: u32,
    pub collision_radius: f32,
    pub player_clearance: f32,
    pub goal_obstacle_clearance: f32,
    pub obstacle_goal_clearance: f32,

    // === Task periods (ms) ===
    pub player_motion_ms: u64,
    pub obstacle_motion_ms: u64,
    pub collision_ms: u64,
    pub timer_ms: u64,

    /// Let the built-in pilot steer the player
    pub autopilot: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            window_width: SCREEN_WIDTH,
            window_height: SCREEN_HEIGHT,
            arena_margin: ARENA_MARGIN,

            player_speed: PLAYER_SPEED,
            obstacle_count: OBSTACLE_COUNT,
            obstacle_step: OBSTACLE_STEP,
            player_boundary: BoundaryPolicy::Wrap,
            obstacle_boundary: BoundaryPolicy::Wrap,

            start_time: TIMER_START,
            collision_radius: COLLISION_RADIUS,
            player_clearance: PLAYER_CLEARANCE,
            goal_obstacle_clearance: GOAL_OBSTACLE_CLEARANCE,
            obstacle_goal_clearance: OBSTACLE_GOAL_CLEARANCE,

            player_motion_ms: PLAYER_MOTION_MS,
            obstacle_motion_ms: OBSTACLE_MOTION_MS,
            collision_ms: COLLISION_MS,
            timer_ms: TIMER_MS,

            autopilot: false,
        }
    }
}

impl Settings {
    /// Parse settings overrides from JSON, falling back to defaults on error
    pub fn from_json(json: &str) -> Self {
        match serde_json::from_str::<Settings>(json) {
            Ok(settings) => settings.sanitized(),
            Err(e) => {
                log::warn!("Ignoring malformed settings ({e}), using defaults");
                Self::default()
            }
        }
    }

    /// Replace values the simulation cannot run with
    fn sanitized(mut self) -> Self {
        let defaults = Self::default();
        // Saturate so an absurd margin is rejected instead of overflowing
        if self.window_width <= self.arena_margin.saturating_mul(2) {
            self.window_width = defaults.window_width;
            self.arena_margin = defaults.arena_margin;
        }
        if self.window_height <= self.arena_margin.saturating_mul(2) {
            self.window_height = defaults.window_height;
            self.arena_margin = defaults.arena_margin;
        }
        // Zero periods would spin the scheduler forever
        for (value, default) in [
            (&mut self.player_motion_ms, defaults.player_motion_ms),
            (&mut self.obstacle_motion_ms, defaults.obstacle_motion_ms),
            (&mut self.collision_ms, defaults.collision_ms),
            (&mut self.timer_ms, defaults.timer_ms),
        ] {
            if *value == 0 {
                *value = default;
            }
        }
        self
    }

    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "goal_rush_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                log::info!("Loaded settings from LocalStorage");
                return Self::from_json(&json);
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Native stub
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_consts() {
        let s = Settings::default();
        assert_eq!(s.window_width, 600);
        assert_eq!(s.obstacle_count, 20);
        assert_eq!(s.start_time, 30);
        assert_eq!(s.collision_ms, 100);
        assert_eq!(s.obstacle_motion_ms, 300);
        assert_eq!(s.timer_ms, 1000);
        assert_eq!(s.player_boundary, BoundaryPolicy::Wrap);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let s = Settings::from_json(r#"{ "start_time": 10, "obstacle_boundary": "Clamp" }"#);
        assert_eq!(s.start_time, 10);
        assert_eq!(s.obstacle_boundary, BoundaryPolicy::Clamp);
        assert_eq!(s.obstacle_count, OBSTACLE_COUNT);
    }

    #[test]
    fn test_malformed_json_falls_back() {
        let s = Settings::from_json("not json");
        assert_eq!(s, Settings::default());
    }

    #[test]
    fn test_zero_period_rejected() {
        let s = Settings::from_json(r#"{ "timer_ms": 0, "window_width": 10 }"#);
        assert_eq!(s.timer_ms, TIMER_MS);
        assert_eq!(s.window_width, SCREEN_WIDTH);
    }

    #[test]
    fn test_oversized_margin_falls_back() {
        let s = Settings::from_json(r#"{ "arena_margin": 3000000000 }"#);
        assert_eq!(s.arena_margin, ARENA_MARGIN);
        assert_eq!(s.window_width, SCREEN_WIDTH);
        assert_eq!(s.window_height, SCREEN_HEIGHT);
    }

    #[test]
    fn test_margin_too_wide_for_height_only() {
        let s = Settings::from_json(
            r#"{ "window_width": 2000, "window_height": 100, "arena_margin": 60 }"#,
        );
        assert_eq!(s.window_width, 2000);
        assert_eq!(s.window_height, SCREEN_HEIGHT);
        assert_eq!(s.arena_margin, ARENA_MARGIN);
    }
}
