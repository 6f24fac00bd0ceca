//! Rectangular playable region
//!
//! World space is centered on the origin with y pointing up, so the arena
//! spans `[-x_limit, x_limit] x [-y_limit, y_limit]`.

use glam::Vec2;

use crate::settings::BoundaryPolicy;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Arena {
    pub x_limit: f32,
    pub y_limit: f32,
}

impl Arena {
    pub fn new(x_limit: f32, y_limit: f32) -> Self {
        Self {
            x_limit: x_limit.abs(),
            y_limit: y_limit.abs(),
        }
    }

    /// Derive the limits from the window size (half extent minus margin)
    pub fn from_window(width: u32, height: u32, margin: u32) -> Self {
        let x = (width / 2).saturating_sub(margin);
        let y = (height / 2).saturating_sub(margin);
        Self::new(x as f32, y as f32)
    }

    pub fn center(&self) -> Vec2 {
        Vec2::ZERO
    }

    pub fn contains(&self, pos: Vec2) -> bool {
        pos.x.abs() <= self.x_limit && pos.y.abs() <= self.y_limit
    }

    /// Wrap-around: an axis past one edge reappears on the opposite edge
    pub fn clamp(&self, pos: Vec2) -> Vec2 {
        Vec2::new(wrap_axis(pos.x, self.x_limit), wrap_axis(pos.y, self.y_limit))
    }

    /// Stop at the edge
    pub fn clamp_to_edge(&self, pos: Vec2) -> Vec2 {
        Vec2::new(
            pos.x.clamp(-self.x_limit, self.x_limit),
            pos.y.clamp(-self.y_limit, self.y_limit),
        )
    }

    /// Apply the given boundary policy
    pub fn contain(&self, pos: Vec2, policy: BoundaryPolicy) -> Vec2 {
        match policy {
            BoundaryPolicy::Wrap => self.clamp(pos),
            BoundaryPolicy::Clamp => self.clamp_to_edge(pos),
        }
    }
}

#[inline]
fn wrap_axis(v: f32, limit: f32) -> f32 {
    if v > limit {
        -limit
    } else if v < -limit {
        limit
    } else {
        v
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_from_window() {
        let arena = Arena::from_window(600, 600, 20);
        assert_eq!(arena.x_limit, 280.0);
        assert_eq!(arena.y_limit, 280.0);

        // Odd sizes halve with integer division
        let arena = Arena::from_window(801, 501, 20);
        assert_eq!(arena.x_limit, 380.0);
        assert_eq!(arena.y_limit, 230.0);
    }

    #[test]
    fn test_wrap_exit_right_reappears_left() {
        let arena = Arena::new(280.0, 280.0);
        assert_eq!(arena.clamp(Vec2::new(290.0, 0.0)), Vec2::new(-280.0, 0.0));
        assert_eq!(arena.clamp(Vec2::new(0.0, -300.0)), Vec2::new(0.0, 280.0));
        assert_eq!(arena.clamp(Vec2::new(281.0, 281.0)), Vec2::new(-280.0, -280.0));
    }

    #[test]
    fn test_edge_clamp_stops() {
        let arena = Arena::new(280.0, 280.0);
        let p = arena.contain(Vec2::new(290.0, -500.0), BoundaryPolicy::Clamp);
        assert_eq!(p, Vec2::new(280.0, -280.0));
    }

    #[test]
    fn test_on_edge_is_inside() {
        let arena = Arena::new(280.0, 280.0);
        let edge = Vec2::new(280.0, -280.0);
        assert!(arena.contains(edge));
        assert_eq!(arena.clamp(edge), edge);
    }

    proptest! {
        #[test]
        fn prop_clamp_stays_in_bounds(
            x in -10_000.0f32..10_000.0,
            y in -10_000.0f32..10_000.0,
            lx in 0.0f32..1_000.0,
            ly in 0.0f32..1_000.0,
        ) {
            let arena = Arena::new(lx, ly);
            for policy in [BoundaryPolicy::Wrap, BoundaryPolicy::Clamp] {
                let p = arena.contain(Vec2::new(x, y), policy);
                prop_assert!(p.x.abs() <= lx);
                prop_assert!(p.y.abs() <= ly);
            }
        }

        #[test]
        fn prop_clamp_idempotent_in_bounds(
            fx in -1.0f32..=1.0,
            fy in -1.0f32..=1.0,
            lx in 0.0f32..1_000.0,
            ly in 0.0f32..1_000.0,
        ) {
            let arena = Arena::new(lx, ly);
            let p = Vec2::new(fx * lx, fy * ly);
            prop_assert_eq!(arena.clamp(p), p);

            let once = arena.clamp(Vec2::new(fx * 3.0 * lx, fy));
            prop_assert_eq!(arena.clamp(once), once);
        }
    }
}
