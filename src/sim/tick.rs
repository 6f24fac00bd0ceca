//! Periodic drivers
//!
//! Each driver runs one tick against the state and returns whether it wants
//! to be scheduled again. None of them touch the state outside `Running`.

use super::autopilot;
use super::schedule::Task;
use super::state::{Direction, GameEvent, GamePhase, GameState};

/// Run the driver for `task`; returns true to reschedule
pub fn run_task(state: &mut GameState, task: Task) -> bool {
    match task {
        Task::PlayerMotion => step_player(state),
        Task::ObstacleMotion => move_obstacles(state),
        Task::Collision => check_collisions(state),
        Task::Timer => tick_timer(state),
    }
}

/// Advance the player one step in its held direction
pub fn step_player(state: &mut GameState) -> bool {
    if !state.is_running() {
        return false;
    }
    if state.settings.autopilot {
        let direction = autopilot::steer(state);
        state.player.set_direction(direction);
    }
    state
        .player
        .step(&state.arena, state.settings.player_boundary);
    true
}

/// Random-walk every obstacle one step
pub fn move_obstacles(state: &mut GameState) -> bool {
    if !state.is_running() {
        return false;
    }
    let policy = state.settings.obstacle_boundary;
    let distance = state.settings.obstacle_step;
    for obstacle in &mut state.obstacles {
        obstacle.step(&state.arena, policy, distance, &mut state.rng);
    }
    true
}

/// Score goal pickups and obstacle hits
pub fn check_collisions(state: &mut GameState) -> bool {
    if !state.is_running() || state.time_left == 0 {
        return false;
    }
    let radius = state.settings.collision_radius;
    let player_pos = state.player.pos;

    if player_pos.distance(state.goal.pos) < radius {
        state.score += 1;
        let obstacles = state.obstacle_positions();
        state.goal.relocate(
            player_pos,
            &obstacles,
            &state.arena,
            &state.settings,
            &mut state.rng,
        );
        log::debug!("Goal reached, score {}", state.score);
        state.events.push(GameEvent::GoalReached { score: state.score });
    }

    // Every obstacle in range costs a point, even several in one tick
    let goal_pos = state.goal.pos;
    for obstacle in &mut state.obstacles {
        if player_pos.distance(obstacle.pos) < radius {
            state.score -= 1;
            obstacle.relocate(
                player_pos,
                goal_pos,
                &state.arena,
                &state.settings,
                &mut state.rng,
            );
            log::debug!("Hit obstacle {}, score {}", obstacle.id, state.score);
            state.events.push(GameEvent::ObstacleHit {
                id: obstacle.id,
                score: state.score,
            });
        }
    }

    true
}

/// Count down one second; ends the game when the clock hits zero
pub fn tick_timer(state: &mut GameState) -> bool {
    if !state.is_running() {
        return false;
    }
    if state.time_left > 0 {
        state.time_left -= 1;
        state.events.push(GameEvent::TimerTick {
            time_left: state.time_left,
        });
    }
    if state.time_left == 0 {
        end_game(state);
        return false;
    }
    true
}

/// Running -> GameOver
pub fn end_game(state: &mut GameState) {
    if state.phase == GamePhase::GameOver {
        return;
    }
    state.phase = GamePhase::GameOver;
    state.player.direction = Direction::None;
    log::info!("Game over, final score {}", state.score);
    state.events.push(GameEvent::GameOver {
        final_score: state.score,
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use glam::Vec2;

    /// A session with every obstacle parked far from the origin
    fn quiet_state(seed: u64) -> GameState {
        let mut state = GameState::new(seed, Settings::default());
        for o in &mut state.obstacles {
            o.pos = Vec2::new(-250.0, -250.0);
        }
        state.goal.pos = Vec2::new(200.0, 200.0);
        state
    }

    #[test]
    fn test_goal_collision_scores_and_relocates() {
        let mut state = quiet_state(12345);
        state.goal.pos = Vec2::new(5.0, 5.0);

        assert!(check_collisions(&mut state));
        assert_eq!(state.score, 1);
        assert_ne!(state.goal.pos, Vec2::new(5.0, 5.0));
        assert_eq!(state.events, vec![GameEvent::GoalReached { score: 1 }]);
    }

    #[test]
    fn test_simultaneous_obstacle_hits_each_cost_a_point() {
        let mut state = quiet_state(1);
        state.obstacles[0].pos = Vec2::new(10.0, 0.0);
        state.obstacles[3].pos = Vec2::new(0.0, -19.0);
        state.obstacles[7].pos = Vec2::new(-5.0, 5.0);

        check_collisions(&mut state);
        assert_eq!(state.score, -3);
        for i in [0, 3, 7] {
            assert!(state.obstacles[i].pos.distance(Vec2::ZERO) >= 50.0);
        }
    }

    #[test]
    fn test_collision_threshold_is_strict() {
        let mut state = quiet_state(2);
        state.goal.pos = Vec2::new(20.0, 0.0);
        check_collisions(&mut state);
        assert_eq!(state.score, 0);
        assert_eq!(state.goal.pos, Vec2::new(20.0, 0.0));
    }

    #[test]
    fn test_timer_counts_down_to_game_over() {
        let mut state = quiet_state(3);
        for n in 1..30 {
            assert!(tick_timer(&mut state));
            assert_eq!(state.time_left, 30 - n);
        }
        assert!(!tick_timer(&mut state));
        assert_eq!(state.time_left, 0);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(
            state.events.last(),
            Some(&GameEvent::GameOver { final_score: 0 })
        );
    }

    #[test]
    fn test_no_mutation_after_game_over() {
        let mut state = quiet_state(4);
        state.player.set_direction(Direction::Up);
        end_game(&mut state);

        state.goal.pos = Vec2::new(1.0, 1.0);
        state.obstacles[0].pos = Vec2::new(2.0, 0.0);
        let obstacles_before: Vec<Vec2> = state.obstacle_positions();

        assert!(!check_collisions(&mut state));
        assert!(!move_obstacles(&mut state));
        assert!(!step_player(&mut state));
        assert!(!tick_timer(&mut state));

        assert_eq!(state.score, 0);
        assert_eq!(state.time_left, 30);
        assert_eq!(state.player.pos, Vec2::ZERO);
        assert_eq!(state.goal.pos, Vec2::new(1.0, 1.0));
        assert_eq!(state.obstacle_positions(), obstacles_before);
    }

    #[test]
    fn test_move_obstacles_keeps_them_in_bounds() {
        let mut state = quiet_state(5);
        for _ in 0..200 {
            move_obstacles(&mut state);
        }
        for o in &state.obstacles {
            assert!(state.arena.contains(o.pos));
        }
    }

    #[test]
    fn test_step_player_follows_direction() {
        let mut state = quiet_state(6);
        state.player.set_direction(Direction::Down);
        assert!(run_task(&mut state, Task::PlayerMotion));
        assert_eq!(state.player.pos, Vec2::new(0.0, -10.0));
    }

    #[test]
    fn test_determinism() {
        // Two states with same seed should produce identical results
        let mut state1 = GameState::new(99999, Settings::default());
        let mut state2 = GameState::new(99999, Settings::default());

        for _ in 0..50 {
            for task in Task::ALL {
                run_task(&mut state1, task);
                run_task(&mut state2, task);
            }
        }

        assert_eq!(state1.score, state2.score);
        assert_eq!(state1.goal.pos, state2.goal.pos);
        assert_eq!(state1.obstacle_positions(), state2.obstacle_positions());
    }
}
