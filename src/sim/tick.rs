//! Fixed timestep simulation tick
//!
//! One tick = collision pass, integration, overlap cleanup, status update.

use super::collision::{resolve_collisions, separate_overlaps};
use super::motion::integrate;
use super::state::{BoardStatus, GameState};

/// Advance the board by one tick and return the new status
pub fn tick(state: &mut GameState) -> BoardStatus {
    state.time_ticks += 1;

    resolve_collisions(&mut state.balls, &mut state.shot.struck);

    for ball in &mut state.balls {
        if integrate(ball, &state.table, &state.settings).is_some()
            && !state.shot.potted.contains(&ball.id)
        {
            state.shot.potted.push(ball.id);
        }
    }

    separate_overlaps(&mut state.balls, &state.table.bounds);

    state.status = BoardStatus::of(&state.balls);
    state.status
}

/// Tick until nothing moves. Returns the number of ticks taken.
///
/// Friction drives every speed to zero, so this always ends; callers that
/// need a hard wall-clock bound should drive [`tick`] themselves.
pub fn settle(state: &mut GameState) -> u64 {
    let start = state.time_ticks;
    while tick(state) != BoardStatus::Static {}
    state.time_ticks - start
}
