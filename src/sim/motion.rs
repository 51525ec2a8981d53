//! Per-tick ball motion: advance, friction, pockets, cushions

use glam::Vec2;

use super::ball::Ball;
use super::table::Table;
use crate::settings::Settings;

/// Advance one ball by a single tick
///
/// Returns the index of the pocket the ball dropped into, if it was potted
/// during this tick. Potted balls are never touched again.
pub fn integrate(ball: &mut Ball, table: &Table, settings: &Settings) -> Option<usize> {
    if ball.potted {
        return None;
    }

    // Too slow to move at all
    if ball.speed() < settings.stop_speed {
        ball.vel = Vec2::ZERO;
        return None;
    }

    ball.pos += ball.vel;
    ball.vel *= settings.friction;
    if ball.speed() < settings.stop_speed {
        ball.vel = Vec2::ZERO;
    }

    if let Some(pocket) = table.pocket_at(ball.pos) {
        ball.pot();
        log::debug!("Ball {} potted in pocket {}", ball.id, pocket);
        return Some(pocket);
    }

    bounce_off_cushions(ball, table);
    None
}

/// Mirror a ball that crossed a cushion back onto the table
fn bounce_off_cushions(ball: &mut Ball, table: &Table) {
    let min = table.bounds.min + Vec2::splat(ball.radius);
    let max = table.bounds.max - Vec2::splat(ball.radius);
    let restitution = table.cushion_restitution;

    if ball.pos.x < min.x {
        ball.pos.x = (2.0 * min.x - ball.pos.x).min(max.x);
        ball.vel.x = ball.vel.x.abs() * restitution;
    } else if ball.pos.x > max.x {
        ball.pos.x = (2.0 * max.x - ball.pos.x).max(min.x);
        ball.vel.x = -ball.vel.x.abs() * restitution;
    }

    if ball.pos.y < min.y {
        ball.pos.y = (2.0 * min.y - ball.pos.y).min(max.y);
        ball.vel.y = ball.vel.y.abs() * restitution;
    } else if ball.pos.y > max.y {
        ball.pos.y = (2.0 * max.y - ball.pos.y).max(min.y);
        ball.vel.y = -ball.vel.y.abs() * restitution;
    }
}
