//! Demo pilot: chases the goal and sidesteps obstacles

use glam::Vec2;

use super::state::{Direction, GameState};

/// Pick a direction for the next player step
pub fn steer(state: &GameState) -> Direction {
    let player = state.player.pos;
    let to_goal = state.goal.pos - player;
    if to_goal.length_squared() < f32::EPSILON {
        return Direction::None;
    }

    let horizontal = if to_goal.x >= 0.0 {
        Direction::Right
    } else {
        Direction::Left
    };
    let vertical = if to_goal.y >= 0.0 {
        Direction::Up
    } else {
        Direction::Down
    };

    // Close the larger gap first, then the other axis, then anything safe
    let preferred = if to_goal.x.abs() >= to_goal.y.abs() {
        [horizontal, vertical]
    } else {
        [vertical, horizontal]
    };
    let candidates: Vec<Direction> = preferred
        .iter()
        .copied()
        .chain(
            Direction::CARDINALS
                .iter()
                .copied()
                .filter(|d| !preferred.contains(d)),
        )
        .collect();

    candidates
        .iter()
        .copied()
        .find(|&d| is_safe(state, next_position(state, d)))
        .unwrap_or(candidates[0])
}

fn next_position(state: &GameState, direction: Direction) -> Vec2 {
    state.arena.contain(
        state.player.pos + direction.vector() * state.player.speed,
        state.settings.player_boundary,
    )
}

/// Clear of every obstacle, even if it steps toward us next
fn is_safe(state: &GameState, pos: Vec2) -> bool {
    let margin = state.settings.collision_radius + state.settings.obstacle_step;
    state.obstacles.iter().all(|o| o.pos.distance(pos) >= margin)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;

    fn open_field() -> GameState {
        let mut state = GameState::new(8, Settings::default());
        for o in &mut state.obstacles {
            o.pos = Vec2::new(-270.0, -270.0);
        }
        state
    }

    #[test]
    fn test_steers_along_larger_gap() {
        let mut state = open_field();
        state.goal.pos = Vec2::new(120.0, -40.0);
        assert_eq!(steer(&state), Direction::Right);

        state.goal.pos = Vec2::new(10.0, -200.0);
        assert_eq!(steer(&state), Direction::Down);
    }

    #[test]
    fn test_avoids_obstacle_in_path() {
        let mut state = open_field();
        state.goal.pos = Vec2::new(150.0, 60.0);
        state.obstacles[0].pos = Vec2::new(30.0, 0.0);
        assert_eq!(steer(&state), Direction::Up);
    }

    #[test]
    fn test_idle_on_goal() {
        let mut state = open_field();
        state.goal.pos = state.player.pos;
        assert_eq!(steer(&state), Direction::None);
    }
}
