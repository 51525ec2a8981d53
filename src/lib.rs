//! One Red - a single-red-ball billiards simulation core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (collisions, motion, pockets, scoring)
//! - `settings`: Data-driven game balance and table layout
//! - `error`: Configuration and shot errors
//!
//! A caller hands a [`sim::ShotCommand`] to [`sim::play_shot`] and gets back
//! the settled ball positions, a score delta and a `done` flag.

pub mod error;
pub mod settings;
pub mod sim;

pub use error::{ConfigError, ShotError};
pub use settings::{Settings, TurnPolicy};

use glam::Vec2;

/// Game configuration constants (defaults for [`Settings`])
pub mod consts {
    /// Ball radius (all balls are the same size)
    pub const BALL_RADIUS: f32 = 11.0;

    /// Velocity multiplier applied every tick
    pub const FRICTION: f32 = 0.985;
    /// Speeds below this snap to zero (pixels/tick)
    pub const STOP_SPEED: f32 = 0.6;

    /// Shot force code range
    pub const MIN_FORCE: i32 = 20;
    pub const MAX_FORCE: i32 = 110;

    /// Cue pull-back: r = force + CUE_OFFSET, clamped to [CUE_DEFAULT_R, 1.5 * CUE_DEFAULT_R]
    pub const CUE_OFFSET: f32 = 160.0;
    pub const CUE_DEFAULT_R: f32 = 180.0;
    /// Speed = pull² / MIN_HITTING_FORCE
    pub const MIN_HITTING_FORCE: f32 = 800.0;

    /// Points lost on a foul (no contact, cue ball potted)
    pub const FOUL_POINTS: i32 = 4;
    /// Value of a red
    pub const RED_POINTS: i32 = 1;

    /// Starting spots
    pub const POS_WHITE: (f32, f32) = (300.0, 286.0);
    pub const POS_RED1: (f32, f32) = (700.0, 286.0);
}

/// Normalize an angle in whole degrees to [0, 360)
#[inline]
pub fn normalize_degrees(angle: i32) -> i32 {
    angle.rem_euclid(360)
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> Vec2 {
    Vec2::new(r * theta.cos(), r * theta.sin())
}

/// Unit vector pointing along an angle given in degrees
#[inline]
pub fn direction_from_degrees(degrees: f32) -> Vec2 {
    polar_to_cartesian(1.0, degrees.to_radians())
}
