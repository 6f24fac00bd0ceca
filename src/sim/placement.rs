//! Spaced random placement for the goal and obstacles
//!
//! Candidates are whole-unit coordinates drawn uniformly from the arena.
//! Neither search can fail: the goal falls back to the arena center and an
//! obstacle settles for the roomiest candidate it saw.

use glam::Vec2;
use rand::Rng;

use super::arena::Arena;
use crate::consts::{GOAL_PLACEMENT_ATTEMPTS, OBSTACLE_PLACEMENT_ATTEMPTS};
use crate::settings::Settings;

/// Uniform whole-unit point inside the arena
pub fn random_point(arena: &Arena, rng: &mut impl Rng) -> Vec2 {
    let xl = arena.x_limit.floor() as i32;
    let yl = arena.y_limit.floor() as i32;
    Vec2::new(
        rng.random_range(-xl..=xl) as f32,
        rng.random_range(-yl..=yl) as f32,
    )
}

/// Find a goal spot at least `player_clearance` from the player and
/// `goal_obstacle_clearance` from every obstacle
pub fn place_goal(
    arena: &Arena,
    settings: &Settings,
    player: Vec2,
    obstacles: &[Vec2],
    rng: &mut impl Rng,
) -> Vec2 {
    for _ in 0..GOAL_PLACEMENT_ATTEMPTS {
        let candidate = random_point(arena, rng);
        if candidate.distance(player) < settings.player_clearance {
            continue;
        }
        if obstacles
            .iter()
            .any(|o| candidate.distance(*o) < settings.goal_obstacle_clearance)
        {
            continue;
        }
        return candidate;
    }
    log::warn!(
        "No clear goal spot after {} draws, using arena center",
        GOAL_PLACEMENT_ATTEMPTS
    );
    arena.center()
}

/// Find an obstacle spot at least `player_clearance` from the player and
/// `obstacle_goal_clearance` from the goal
pub fn place_obstacle(
    arena: &Arena,
    settings: &Settings,
    player: Vec2,
    goal: Vec2,
    rng: &mut impl Rng,
) -> Vec2 {
    // (candidate, how far it beats the tighter of the two limits)
    let mut best: Option<(Vec2, f32)> = None;

    for _ in 0..OBSTACLE_PLACEMENT_ATTEMPTS {
        let candidate = random_point(arena, rng);
        let slack = (candidate.distance(player) - settings.player_clearance)
            .min(candidate.distance(goal) - settings.obstacle_goal_clearance);
        if slack >= 0.0 {
            return candidate;
        }
        if best.is_none_or(|(_, s)| slack > s) {
            best = Some((candidate, slack));
        }
    }

    log::warn!(
        "No clear obstacle spot after {} draws, keeping best candidate",
        OBSTACLE_PLACEMENT_ATTEMPTS
    );
    best.map(|(p, _)| p).unwrap_or_else(|| arena.center())
}
