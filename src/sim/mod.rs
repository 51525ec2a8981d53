//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Discrete ticks only, no wall clock
//! - No RNG inside the physics
//! - Stable iteration order (by ball index)
//! - No rendering or platform dependencies

pub mod ball;
pub mod collision;
pub mod motion;
pub mod shot;
pub mod state;
pub mod table;
pub mod tick;

pub use ball::{Ball, BallKind};
pub use collision::{Contact, detect_contact, resolve_collisions, resolve_velocities, separate_overlaps};
pub use motion::integrate;
pub use shot::{
    CueStroke, Foul, ShotCommand, ShotEvaluation, ShotOutcome, begin_shot, evaluate_shot, play_shot,
};
pub use state::{BallSnapshot, BoardStatus, GameState, Player, ShotTracker};
pub use table::{Pocket, Table, TableBounds};
pub use tick::{settle, tick};
