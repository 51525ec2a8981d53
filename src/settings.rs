//! Game settings and balance tuning
//!
//! Everything a table operator may want to tweak lives here instead of being
//! baked into the physics. Loaded from JSON; missing fields fall back to
//! [`crate::consts`].

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;

/// Who plays after a shot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum TurnPolicy {
    /// The acting player never changes during an episode
    #[default]
    Fixed,
    /// Turn passes on after a foul or a shot that pots no object ball
    AlternateOnMiss,
}

impl TurnPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            TurnPolicy::Fixed => "Fixed",
            TurnPolicy::AlternateOnMiss => "AlternateOnMiss",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "fixed" => Some(TurnPolicy::Fixed),
            "alternate" | "alternateonmiss" | "alternate_on_miss" => {
                Some(TurnPolicy::AlternateOnMiss)
            }
            _ => None,
        }
    }
}

/// An object ball placed on the table at the start
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObjectBallSpot {
    pub pos: Vec2,
    pub points: i32,
}

/// Simulation settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Physics ===
    /// Radius shared by every ball
    pub ball_radius: f32,
    /// Velocity multiplier per tick
    pub friction: f32,
    /// Below this speed a ball is at rest
    pub stop_speed: f32,

    // === Cue ===
    /// Accepted force codes; anything outside is clamped
    pub min_force: i32,
    pub max_force: i32,
    /// Added to the force code to get the cue pull-back radius
    pub cue_offset: f32,
    pub min_pull_radius: f32,
    pub max_pull_radius: f32,
    /// Speed = pull² / force_divisor
    pub force_divisor: f32,

    // === Rules ===
    pub foul_penalty: i32,
    pub turn_policy: TurnPolicy,
    pub player_names: Vec<String>,

    // === Layout ===
    pub cue_spot: Vec2,
    pub object_balls: Vec<ObjectBallSpot>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            ball_radius: BALL_RADIUS,
            friction: FRICTION,
            stop_speed: STOP_SPEED,

            min_force: MIN_FORCE,
            max_force: MAX_FORCE,
            cue_offset: CUE_OFFSET,
            min_pull_radius: CUE_DEFAULT_R,
            max_pull_radius: CUE_DEFAULT_R + CUE_DEFAULT_R / 2.0,
            force_divisor: MIN_HITTING_FORCE,

            foul_penalty: FOUL_POINTS,
            turn_policy: TurnPolicy::Fixed,
            player_names: vec!["Player 1".to_string(), "Player 2".to_string()],

            cue_spot: Vec2::from(POS_WHITE),
            object_balls: vec![ObjectBallSpot {
                pos: Vec2::from(POS_RED1),
                points: RED_POINTS,
            }],
        }
    }
}

impl Settings {
    /// Default settings with a custom starting layout
    pub fn with_layout(cue_spot: Vec2, object_balls: Vec<ObjectBallSpot>) -> Self {
        Self {
            cue_spot,
            object_balls,
            ..Self::default()
        }
    }

    /// Parse settings from JSON and validate them
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        log::info!(
            "Loaded settings ({} object balls, {:?} turns)",
            settings.object_balls.len(),
            settings.turn_policy
        );
        Ok(settings)
    }

    /// Read a settings file and parse it with [`Settings::from_json`]
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_json(&json)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject values the physics cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.ball_radius > 0.0) {
            return Err(ConfigError::BallRadius(self.ball_radius));
        }
        if !(self.friction > 0.0 && self.friction <= 1.0) {
            return Err(ConfigError::Friction(self.friction));
        }
        if !(self.stop_speed > 0.0) {
            return Err(ConfigError::StopSpeed(self.stop_speed));
        }
        if self.min_force > self.max_force {
            return Err(ConfigError::ForceRange {
                min: self.min_force,
                max: self.max_force,
            });
        }
        if !(self.min_pull_radius <= self.max_pull_radius) {
            return Err(ConfigError::PullRange {
                min: self.min_pull_radius,
                max: self.max_pull_radius,
            });
        }
        if !(self.force_divisor > 0.0) {
            return Err(ConfigError::ForceDivisor(self.force_divisor));
        }
        if self.player_names.is_empty() {
            return Err(ConfigError::NoPlayers);
        }
        Ok(())
    }

    /// Clamp a raw force code into the accepted range
    pub fn clamp_force(&self, force: i32) -> i32 {
        force.clamp(self.min_force, self.max_force)
    }

    /// Cue pull-back radius for a (clamped) force code
    pub fn pull_radius(&self, force: i32) -> f32 {
        (force as f32 + self.cue_offset).clamp(self.min_pull_radius, self.max_pull_radius)
    }
}
