//! Heads-up display and the restart control
//!
//! Builds the frame for a `GameState`: entity sprites, the score and timer
//! readouts, and on game over the final score plus a PLAY AGAIN button.

use glam::Vec2;

use crate::sim::{GamePhase, GameState};
use crate::surface::{Align, Color, Font, Label, Panel, Scene, ShapeKind, Sprite};

/// Clickable PLAY AGAIN region, only live after game over
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RestartButton {
    pub min: Vec2,
    pub max: Vec2,
}

impl Default for RestartButton {
    fn default() -> Self {
        Self {
            min: Vec2::new(-60.0, -70.0),
            max: Vec2::new(60.0, -30.0),
        }
    }
}

impl RestartButton {
    /// Edges count as inside
    pub fn contains(&self, x: f32, y: f32) -> bool {
        (self.min.x..=self.max.x).contains(&x) && (self.min.y..=self.max.y).contains(&y)
    }

    pub fn is_visible(phase: GamePhase) -> bool {
        phase == GamePhase::GameOver
    }

    /// True when a click at `(x, y)` should restart the game
    pub fn on_click(&self, phase: GamePhase, x: f32, y: f32) -> bool {
        Self::is_visible(phase) && self.contains(x, y)
    }

    fn panel(&self) -> Panel {
        Panel {
            min: self.min,
            max: self.max,
            fill: Color::YELLOW,
        }
    }

    fn caption(&self) -> Label {
        Label {
            text: "PLAY AGAIN".to_string(),
            pos: Vec2::new((self.min.x + self.max.x) / 2.0, self.min.y + 5.0),
            align: Align::Center,
            font: Font::bold(16),
            color: Color::BLACK,
        }
    }
}

pub fn score_text(score: i32) -> String {
    format!("Score: {score}")
}

pub fn timer_text(time_left: u32) -> String {
    format!("Time: {time_left}")
}

pub fn game_over_text(final_score: i32) -> String {
    format!("Game Over!\nFinal Score: {final_score}")
}

fn hud_label(text: String, pos: Vec2, size: u32) -> Label {
    Label {
        text,
        pos,
        align: Align::Center,
        font: Font::bold(size),
        color: Color::BLACK,
    }
}

/// Describe the current frame
pub fn build_scene(state: &GameState, button: &RestartButton) -> Scene {
    let mut scene = Scene::new(Color::LIGHT_BLUE);

    scene.sprites.push(Sprite {
        kind: ShapeKind::Circle,
        pos: state.goal.pos,
        heading: 0.0,
        fill: Color::GREEN,
    });
    scene.sprites.extend(state.obstacles.iter().map(|o| Sprite {
        kind: ShapeKind::Square,
        pos: o.pos,
        heading: o.heading.heading().unwrap_or(0.0),
        fill: Color::RED,
    }));
    scene.sprites.push(Sprite {
        kind: ShapeKind::Turtle,
        pos: state.player.pos,
        heading: state.player.heading,
        fill: Color::GREEN,
    });

    let top = state.arena.y_limit;
    scene
        .labels
        .push(hud_label(score_text(state.score), Vec2::new(0.0, top - 30.0), 16));
    scene
        .labels
        .push(hud_label(timer_text(state.time_left), Vec2::new(0.0, top - 60.0), 16));

    if RestartButton::is_visible(state.phase) {
        scene
            .labels
            .push(hud_label(game_over_text(state.score), Vec2::ZERO, 24));
        scene.panels.push(button.panel());
        scene.labels.push(button.caption());
    }

    scene
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use crate::sim::end_game;

    #[test]
    fn test_button_hit_region() {
        let button = RestartButton::default();
        assert!(button.on_click(GamePhase::GameOver, 0.0, -50.0));
        assert!(button.on_click(GamePhase::GameOver, -60.0, -70.0));
        assert!(button.on_click(GamePhase::GameOver, 60.0, -30.0));
        assert!(!button.on_click(GamePhase::GameOver, 200.0, 200.0));
        assert!(!button.on_click(GamePhase::GameOver, 0.0, -29.0));
        // Hidden while running
        assert!(!button.on_click(GamePhase::Running, 0.0, -50.0));
    }

    #[test]
    fn test_running_scene() {
        let state = GameState::new(1, Settings::default());
        let scene = build_scene(&state, &RestartButton::default());

        // Goal, obstacles, player
        assert_eq!(scene.sprites.len(), 22);
        assert_eq!(scene.sprites.last().map(|s| s.kind), Some(ShapeKind::Turtle));
        assert!(scene.panels.is_empty());
        assert_eq!(scene.text(), "Score: 0\nTime: 30");
        assert_eq!(scene.labels[0].pos, Vec2::new(0.0, 250.0));
        assert_eq!(scene.labels[1].pos, Vec2::new(0.0, 220.0));
    }

    #[test]
    fn test_game_over_scene() {
        let mut state = GameState::new(1, Settings::default());
        state.score = -2;
        end_game(&mut state);
        let scene = build_scene(&state, &RestartButton::default());

        assert_eq!(scene.panels.len(), 1);
        assert!(scene.text().contains("Game Over!\nFinal Score: -2"));
        assert!(scene.text().contains("PLAY AGAIN"));
        let big = scene
            .labels
            .iter()
            .find(|l| l.text.starts_with("Game Over"))
            .map(|l| l.font.size);
        assert_eq!(big, Some(24));
    }
}
