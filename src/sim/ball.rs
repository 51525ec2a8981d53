//! Ball entities
//!
//! Cue ball and object balls share every physical field; they differ only
//! in the tag, which the scoring rules dispatch on.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// What kind of ball this is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BallKind {
    /// The white ball the player strikes
    Cue,
    /// A scoring ball worth `points` when potted
    Object { points: i32 },
}

/// A ball entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    pub id: u32,
    pub kind: BallKind,
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    /// Captured by a pocket. Permanent.
    pub potted: bool,
    /// Render hint, cleared when potted
    pub visible: bool,
}

impl Ball {
    pub fn new(id: u32, kind: BallKind, pos: Vec2, radius: f32) -> Self {
        Self {
            id,
            kind,
            pos,
            vel: Vec2::ZERO,
            radius,
            potted: false,
            visible: true,
        }
    }

    pub fn cue(id: u32, pos: Vec2, radius: f32) -> Self {
        Self::new(id, BallKind::Cue, pos, radius)
    }

    pub fn object(id: u32, pos: Vec2, radius: f32, points: i32) -> Self {
        Self::new(id, BallKind::Object { points }, pos, radius)
    }

    #[inline]
    pub fn is_cue_ball(&self) -> bool {
        self.kind == BallKind::Cue
    }

    /// Points scored for potting this ball (0 for the cue ball)
    pub fn point_value(&self) -> i32 {
        match self.kind {
            BallKind::Cue => 0,
            BallKind::Object { points } => points,
        }
    }

    #[inline]
    pub fn speed(&self) -> f32 {
        self.vel.length()
    }

    /// Still on the table and not at rest
    #[inline]
    pub fn is_moving(&self) -> bool {
        !self.potted && self.vel != Vec2::ZERO
    }

    /// Capture the ball. Calling it again changes nothing.
    pub fn pot(&mut self) {
        self.potted = true;
        self.visible = false;
        self.vel = Vec2::ZERO;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_values() {
        let cue = Ball::cue(0, Vec2::ZERO, 11.0);
        let red = Ball::object(1, Vec2::ZERO, 11.0, 1);
        let blue = Ball::object(2, Vec2::ZERO, 11.0, 5);

        assert!(cue.is_cue_ball());
        assert!(!red.is_cue_ball());
        assert_eq!(cue.point_value(), 0);
        assert_eq!(red.point_value(), 1);
        assert_eq!(blue.point_value(), 5);
    }

    #[test]
    fn test_is_moving() {
        let mut ball = Ball::object(1, Vec2::new(10.0, 10.0), 11.0, 1);
        assert!(!ball.is_moving());

        ball.vel = Vec2::new(0.0, -2.0);
        assert!(ball.is_moving());
        assert!((ball.speed() - 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_pot_is_idempotent() {
        let mut ball = Ball::object(1, Vec2::new(10.0, 10.0), 11.0, 1);
        ball.vel = Vec2::new(3.0, 4.0);

        ball.pot();
        assert!(ball.potted);
        assert!(!ball.visible);
        assert_eq!(ball.vel, Vec2::ZERO);
        assert!(!ball.is_moving());

        let pos = ball.pos;
        ball.pot();
        assert!(ball.potted);
        assert_eq!(ball.pos, pos);
    }
}
