//! Error types
//!
//! Physics itself never fails. Errors only come from bad configuration
//! (fatal, reported before the first tick) or from shots the board cannot
//! accept.

use thiserror::Error;

/// Invalid table, layout or tuning data
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("table needs exactly 6 pockets, got {0}")]
    PocketCount(usize),
    #[error("pocket {index} has non-positive capture radius {radius}")]
    PocketRadius { index: usize, radius: f32 },
    #[error("table bounds are empty or inverted")]
    EmptyBounds,
    #[error("cushion restitution {0} must be in (0, 1]")]
    Restitution(f32),
    #[error("ball radius {0} must be positive")]
    BallRadius(f32),
    #[error("friction {0} must be in (0, 1]")]
    Friction(f32),
    #[error("stop speed {0} must be positive")]
    StopSpeed(f32),
    #[error("force range [{min}, {max}] is empty")]
    ForceRange { min: i32, max: i32 },
    #[error("pull radius range [{min}, {max}] is empty")]
    PullRange { min: f32, max: f32 },
    #[error("force divisor {0} must be positive")]
    ForceDivisor(f32),
    #[error("need at least one player")]
    NoPlayers,
    #[error("ball {0} starts outside the table")]
    BallOffTable(u32),
    #[error("balls {0} and {1} overlap at the start")]
    OverlappingBalls(u32, u32),
    #[error("invalid settings JSON: {0}")]
    Json(String),
    #[error("cannot read {path}: {message}")]
    Read { path: String, message: String },
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::Json(err.to_string())
    }
}

/// A shot the board refused to take
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ShotError {
    #[error("cue ball is potted")]
    CueBallPotted,
    #[error("balls are still moving")]
    BoardMoving,
}
