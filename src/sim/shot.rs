//! Shots and scoring
//!
//! A shot turns an `(angle, force)` command into a cue ball velocity, lets
//! the board settle, then scores what happened: fouls, pots and whether the
//! episode is over.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::state::{BoardStatus, GameState};
use super::tick::settle;
use crate::direction_from_degrees;
use crate::error::ShotError;
use crate::normalize_degrees;
use crate::settings::{Settings, TurnPolicy};

/// A shot as submitted by the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShotCommand {
    /// Direction of travel in degrees, any integer (normalized mod 360)
    pub angle: i32,
    /// Force code, clamped to the configured range
    pub force: i32,
}

impl ShotCommand {
    pub fn new(angle: i32, force: i32) -> Self {
        Self { angle, force }
    }

    /// Uniformly random shot within the configured force range
    ///
    /// `settings` must have passed [`Settings::validate`] (non-empty range).
    pub fn random<R: Rng + ?Sized>(rng: &mut R, settings: &Settings) -> Self {
        Self {
            angle: rng.random_range(0..360),
            force: rng.random_range(settings.min_force..=settings.max_force),
        }
    }
}

/// Where the cue stick sits for a stroke (render hint)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CueStroke {
    /// Cue tip position
    pub start: Vec2,
    /// Cue butt position
    pub end: Vec2,
}

/// A rule violation found while scoring a shot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Foul {
    /// The cue ball touched nothing and nothing was potted
    NoContact,
    /// The cue ball went into a pocket
    CueBallPotted,
}

/// Result of scoring a settled shot
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShotEvaluation {
    /// Points gained (positive) or lost (negative) by the acting player
    pub score_delta: i32,
    /// Something was potted; the episode is over
    pub done: bool,
    pub fouls: Vec<Foul>,
    /// Balls potted during the shot, in order
    pub potted: Vec<u32>,
    /// Player who took the shot
    pub player: usize,
}

/// Everything the caller gets back from [`play_shot`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShotOutcome {
    /// Positions of balls still on the table, in fixed ball order
    pub positions: Vec<Vec2>,
    pub score_delta: i32,
    pub done: bool,
    pub fouls: Vec<Foul>,
    pub potted: Vec<u32>,
    pub stroke: CueStroke,
    /// Ticks it took for the board to come to rest
    pub ticks: u64,
}

/// Strike the cue ball
///
/// The angle is normalized modulo 360 and the force is clamped to the
/// configured range. The cue ball leaves along `angle` with speed
/// `pull² / force_divisor`.
pub fn begin_shot(state: &mut GameState, shot: &ShotCommand) -> Result<CueStroke, ShotError> {
    if state.cue_ball().potted {
        return Err(ShotError::CueBallPotted);
    }
    if state.status() != BoardStatus::Static {
        return Err(ShotError::BoardMoving);
    }

    let settings = &state.settings;
    let angle = normalize_degrees(shot.angle);
    let force = settings.clamp_force(shot.force);
    if force != shot.force {
        log::warn!(
            "Force {} outside [{}, {}], clamped to {}",
            shot.force,
            settings.min_force,
            settings.max_force,
            force
        );
    }

    let r = settings.pull_radius(force);
    let dir = direction_from_degrees(angle as f32);
    let cue_pos = state.cue_ball().pos;
    let start = cue_pos + dir * force as f32;
    let end = cue_pos + dir * r;

    let pull = (cue_pos - start).length();
    let speed = pull * pull / settings.force_divisor;
    let vel = (end - start).normalize_or_zero() * speed;

    state.cue_ball_mut().vel = vel;
    state.status = BoardStatus::NonStatic;
    state.shot.attempted = true;
    state.shots_played += 1;

    log::debug!(
        "Shot {}: angle={} force={} speed={:.3}",
        state.shots_played,
        angle,
        force,
        speed
    );

    Ok(CueStroke { start, end })
}

/// Score a settled shot and reset the per-shot bookkeeping
pub fn evaluate_shot(state: &mut GameState) -> ShotEvaluation {
    let player = state.turn;
    let penalty = state.settings.foul_penalty;
    let mut eval = ShotEvaluation {
        player,
        potted: state.shot.potted.clone(),
        ..Default::default()
    };

    if state.shot.attempted && state.shot.struck.is_empty() && state.shot.potted.is_empty() {
        eval.fouls.push(Foul::NoContact);
        eval.score_delta -= penalty;
    }

    let mut potted_object = false;
    for id in &state.shot.potted {
        let Some(ball) = state.ball(*id) else {
            continue;
        };
        if ball.is_cue_ball() {
            eval.fouls.push(Foul::CueBallPotted);
            eval.score_delta -= penalty;
        } else {
            eval.score_delta += ball.point_value();
            potted_object = true;
        }
    }
    eval.done = !eval.potted.is_empty();

    state.players[player].points += eval.score_delta;

    let keeps_turn = potted_object && eval.fouls.is_empty();
    if state.settings.turn_policy == TurnPolicy::AlternateOnMiss && !keeps_turn {
        state.turn = (state.turn + 1) % state.players.len();
    }

    state.shot.reset();
    eval
}

/// Play a full shot: strike, settle, score
pub fn play_shot(state: &mut GameState, shot: &ShotCommand) -> Result<ShotOutcome, ShotError> {
    let stroke = begin_shot(state, shot)?;
    let ticks = settle(state);
    let eval = evaluate_shot(state);

    log::info!(
        "Shot {} settled in {} ticks: delta={} fouls={:?} potted={:?} done={}",
        state.shots_played,
        ticks,
        eval.score_delta,
        eval.fouls,
        eval.potted,
        eval.done
    );

    Ok(ShotOutcome {
        positions: state.active_positions(),
        score_delta: eval.score_delta,
        done: eval.done,
        fouls: eval.fouls,
        potted: eval.potted,
        stroke,
        ticks,
    })
}
