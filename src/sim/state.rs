//! Game state and core simulation types
//!
//! Everything a session needs lives in `GameState`, so any number of
//! independent sessions can run side by side.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::arena::Arena;
use super::placement;
use crate::settings::{BoundaryPolicy, Settings};

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Clock is running, tasks are live
    Running,
    /// Time ran out, waiting for restart
    GameOver,
}

/// Player heading
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    None,
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    /// The four moving directions
    pub const CARDINALS: [Direction; 4] = [
        Direction::Right,
        Direction::Up,
        Direction::Left,
        Direction::Down,
    ];

    /// Unit step vector (zero for `None`)
    pub fn vector(self) -> Vec2 {
        match self {
            Direction::None => Vec2::ZERO,
            Direction::Left => Vec2::NEG_X,
            Direction::Right => Vec2::X,
            Direction::Up => Vec2::Y,
            Direction::Down => Vec2::NEG_Y,
        }
    }

    /// Heading in degrees, counter-clockwise from east
    pub fn heading(self) -> Option<f32> {
        match self {
            Direction::None => None,
            Direction::Right => Some(0.0),
            Direction::Up => Some(90.0),
            Direction::Left => Some(180.0),
            Direction::Down => Some(270.0),
        }
    }
}

/// The player's sprite
#[derive(Debug, Clone)]
pub struct Player {
    pub pos: Vec2,
    pub direction: Direction,
    /// Last heading moved in, kept when the player stops (for rendering)
    pub heading: f32,
    pub speed: f32,
}

impl Player {
    pub fn new(speed: f32) -> Self {
        Self {
            pos: Vec2::ZERO,
            direction: Direction::None,
            heading: 0.0,
            speed,
        }
    }

    /// Change direction; movement happens on the next step
    pub fn set_direction(&mut self, direction: Direction) {
        self.direction = direction;
        if let Some(heading) = direction.heading() {
            self.heading = heading;
        }
    }

    /// Stop if `direction` is the one currently held
    pub fn release(&mut self, direction: Direction) {
        if self.direction == direction {
            self.direction = Direction::None;
        }
    }

    /// Advance one step in the current direction
    pub fn step(&mut self, arena: &Arena, policy: BoundaryPolicy) {
        if self.direction == Direction::None {
            return;
        }
        self.pos = arena.contain(self.pos + self.direction.vector() * self.speed, policy);
    }

    pub fn reset(&mut self) {
        self.pos = Vec2::ZERO;
        self.direction = Direction::None;
        self.heading = 0.0;
    }
}

/// The pickup the player is chasing
#[derive(Debug, Clone, Default)]
pub struct Goal {
    pub pos: Vec2,
}

impl Goal {
    /// Move to a random spot clear of the player and obstacles
    pub fn relocate(
        &mut self,
        player_pos: Vec2,
        obstacle_positions: &[Vec2],
        arena: &Arena,
        settings: &Settings,
        rng: &mut impl Rng,
    ) {
        self.pos = placement::place_goal(arena, settings, player_pos, obstacle_positions, rng);
    }
}

/// A roaming hazard
#[derive(Debug, Clone)]
pub struct Obstacle {
    pub id: u32,
    pub pos: Vec2,
    /// Heading of the last random-walk step
    pub heading: Direction,
}

impl Obstacle {
    pub fn new(id: u32) -> Self {
        Self {
            id,
            pos: Vec2::ZERO,
            heading: Direction::Right,
        }
    }

    /// Move to a random spot clear of the player and the goal
    pub fn relocate(
        &mut self,
        player_pos: Vec2,
        goal_pos: Vec2,
        arena: &Arena,
        settings: &Settings,
        rng: &mut impl Rng,
    ) {
        self.pos = placement::place_obstacle(arena, settings, player_pos, goal_pos, rng);
    }

    /// One random-walk step in a random cardinal direction
    pub fn step(
        &mut self,
        arena: &Arena,
        policy: BoundaryPolicy,
        distance: f32,
        rng: &mut impl Rng,
    ) {
        self.heading = Direction::CARDINALS[rng.random_range(0..Direction::CARDINALS.len())];
        self.pos = arena.contain(self.pos + self.heading.vector() * distance, policy);
    }
}

/// Things that happened during a tick, for HUD updates and logging
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    GoalReached { score: i32 },
    ObstacleHit { id: u32, score: i32 },
    TimerTick { time_left: u32 },
    GameOver { final_score: i32 },
    Restarted,
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Seed the RNG was created from
    pub seed: u64,
    pub rng: Pcg32,
    pub settings: Settings,
    pub arena: Arena,
    pub phase: GamePhase,
    /// May go negative
    pub score: i32,
    /// Seconds remaining
    pub time_left: u32,
    pub player: Player,
    pub goal: Goal,
    /// Sorted by id
    pub obstacles: Vec<Obstacle>,
    /// Pending events, drained by the front-end
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create a running session with the given seed
    pub fn new(seed: u64, settings: Settings) -> Self {
        let arena = Arena::from_window(
            settings.window_width,
            settings.window_height,
            settings.arena_margin,
        );
        let obstacles = (0..settings.obstacle_count as u32)
            .map(|i| Obstacle::new(i + 1))
            .collect();

        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            player: Player::new(settings.player_speed),
            time_left: settings.start_time,
            settings,
            arena,
            phase: GamePhase::Running,
            score: 0,
            goal: Goal::default(),
            obstacles,
            events: Vec::new(),
        };
        state.scatter();
        state
    }

    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }

    /// Start a fresh session reusing entity storage
    pub fn restart(&mut self) {
        self.score = 0;
        self.time_left = self.settings.start_time;
        self.phase = GamePhase::Running;
        self.scatter();
        self.events.push(GameEvent::Restarted);
    }

    /// Reset the player, then place the goal and every obstacle.
    /// The goal goes first so obstacles keep clear of its final spot.
    fn scatter(&mut self) {
        self.player.reset();
        let player_pos = self.player.pos;
        self.goal
            .relocate(player_pos, &[], &self.arena, &self.settings, &mut self.rng);
        let goal_pos = self.goal.pos;
        for obstacle in &mut self.obstacles {
            obstacle.relocate(player_pos, goal_pos, &self.arena, &self.settings, &mut self.rng);
        }
    }

    pub fn obstacle_positions(&self) -> Vec<Vec2> {
        self.obstacles.iter().map(|o| o.pos).collect()
    }
}
