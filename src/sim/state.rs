//! Board state and core simulation types
//!
//! Everything a shot mutates lives in [`GameState`]: the balls, the
//! per-shot bookkeeping and the players' scores.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::ball::Ball;
use super::table::Table;
use crate::error::ConfigError;
use crate::settings::Settings;

/// Board-wide motion status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BoardStatus {
    /// No active ball is moving; the board accepts a shot
    #[default]
    Static,
    /// At least one active ball is moving
    NonStatic,
}

impl BoardStatus {
    /// Derive the status from the balls themselves
    pub fn of(balls: &[Ball]) -> Self {
        if balls.iter().any(Ball::is_moving) {
            BoardStatus::NonStatic
        } else {
            BoardStatus::Static
        }
    }
}

/// A player and their running score
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub name: String,
    pub points: i32,
}

impl Player {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            points: 0,
        }
    }
}

/// Read-only view of a ball for renderers and observers
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BallSnapshot {
    pub id: u32,
    pub pos: Vec2,
    pub potted: bool,
    pub visible: bool,
}

/// Bookkeeping for the shot being played, reset once it is scored
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ShotTracker {
    /// A cue stroke was played since the last evaluation
    pub attempted: bool,
    /// Balls the cue ball made contact with (ids, in order of first contact)
    pub struck: Vec<u32>,
    /// Balls potted during the shot (ids, in potting order)
    pub potted: Vec<u32>,
}

impl ShotTracker {
    pub fn reset(&mut self) {
        self.attempted = false;
        self.struck.clear();
        self.potted.clear();
    }
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Tuning in effect for this episode
    pub settings: Settings,
    /// Table geometry (immutable once built)
    pub table: Table,
    /// All balls, object balls first and the cue ball last. Order never changes.
    pub balls: Vec<Ball>,
    /// Index of the cue ball in `balls`
    cue_index: usize,
    /// Motion status as of the last tick
    pub status: BoardStatus,
    /// Current shot bookkeeping
    pub shot: ShotTracker,
    pub players: Vec<Player>,
    /// Index of the acting player
    pub turn: usize,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Shots played this episode
    pub shots_played: u32,
}

impl GameState {
    /// Build a board from settings and a table
    ///
    /// Fails if the settings or table are invalid, or the starting layout puts a ball
    /// off the table or on top of another ball.
    pub fn new(settings: Settings, table: Table) -> Result<Self, ConfigError> {
        settings.validate()?;
        table.validate()?;

        let radius = settings.ball_radius;
        let mut balls: Vec<Ball> = settings
            .object_balls
            .iter()
            .enumerate()
            .map(|(i, spot)| Ball::object(i as u32, spot.pos, radius, spot.points))
            .collect();
        let cue_index = balls.len();
        balls.push(Ball::cue(cue_index as u32, settings.cue_spot, radius));

        for ball in &balls {
            if !table.bounds.contains_ball(ball.pos, ball.radius) {
                return Err(ConfigError::BallOffTable(ball.id));
            }
        }
        for (i, a) in balls.iter().enumerate() {
            for b in &balls[i + 1..] {
                if a.pos.distance(b.pos) < a.radius + b.radius {
                    return Err(ConfigError::OverlappingBalls(a.id, b.id));
                }
            }
        }

        let players = settings.player_names.iter().map(Player::new).collect();

        Ok(Self {
            settings,
            table,
            balls,
            cue_index,
            status: BoardStatus::Static,
            shot: ShotTracker::default(),
            players,
            turn: 0,
            time_ticks: 0,
            shots_played: 0,
        })
    }

    /// Default settings on the standard table
    pub fn standard() -> Result<Self, ConfigError> {
        Self::new(Settings::default(), Table::standard())
    }

    pub fn status(&self) -> BoardStatus {
        self.status
    }

    pub fn cue_ball(&self) -> &Ball {
        &self.balls[self.cue_index]
    }

    pub fn cue_ball_mut(&mut self) -> &mut Ball {
        &mut self.balls[self.cue_index]
    }

    pub fn ball(&self, id: u32) -> Option<&Ball> {
        self.balls.iter().find(|b| b.id == id)
    }

    /// Ids of balls moving right now (derived, never stored)
    pub fn moving_ball_ids(&self) -> Vec<u32> {
        self.balls
            .iter()
            .filter(|b| b.is_moving())
            .map(|b| b.id)
            .collect()
    }

    /// Every ball in fixed order, potted ones included
    pub fn ball_snapshots(&self) -> Vec<BallSnapshot> {
        self.balls
            .iter()
            .map(|b| BallSnapshot {
                id: b.id,
                pos: b.pos,
                potted: b.potted,
                visible: b.visible,
            })
            .collect()
    }

    /// Positions of balls still on the table, in fixed order
    pub fn active_positions(&self) -> Vec<Vec2> {
        self.balls
            .iter()
            .filter(|b| !b.potted)
            .map(|b| b.pos)
            .collect()
    }

    pub fn current_player(&self) -> &Player {
        &self.players[self.turn]
    }

    /// Cumulative score of a player (None for an unknown index)
    pub fn score(&self, player: usize) -> Option<i32> {
        self.players.get(player).map(|p| p.points)
    }
}
