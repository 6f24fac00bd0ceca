//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Injected clock only (the scheduler never reads wall time)
//! - Seeded RNG only
//! - Stable iteration order (obstacles by id)
//! - No rendering or platform dependencies

pub mod arena;
pub mod autopilot;
pub mod placement;
pub mod schedule;
pub mod state;
pub mod tick;

pub use arena::Arena;
pub use schedule::{Scheduler, Task};
pub use state::{Direction, GameEvent, GamePhase, GameState, Goal, Obstacle, Player};
pub use tick::{check_collisions, end_game, move_obstacles, run_task, step_player, tick_timer};
