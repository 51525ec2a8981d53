//! Ball-ball collision detection and response
//!
//! Equal masses, no spin: an elastic hit swaps the velocity components along
//! the line of centers and leaves the tangential components alone.

use glam::Vec2;

use super::ball::Ball;
use super::table::TableBounds;

/// Upper bound on relaxation passes in [`separate_overlaps`]
pub const MAX_SEPARATION_PASSES: usize = 64;
/// Penetration small enough to count as touching
pub const SEPARATION_EPSILON: f32 = 1e-4;

/// Overlap between two balls
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    /// Unit vector from the first ball's center toward the second's
    pub normal: Vec2,
    /// How far the balls must move apart to just touch
    pub penetration: f32,
}

/// Check whether two active balls touch or overlap
///
/// Coincident centers have no defined line of centers; the `+x` axis is used
/// so the pair still gets pushed apart.
pub fn detect_contact(a: &Ball, b: &Ball) -> Option<Contact> {
    if a.potted || b.potted {
        return None;
    }

    let delta = b.pos - a.pos;
    let dist = delta.length();
    let min_dist = a.radius + b.radius;
    if dist > min_dist {
        return None;
    }

    let normal = if dist <= f32::EPSILON {
        Vec2::X
    } else {
        delta / dist
    };

    Some(Contact {
        normal,
        penetration: min_dist - dist,
    })
}

/// Push both balls apart along the normal, half the penetration each
#[inline]
fn separate(a: &mut Ball, b: &mut Ball, contact: &Contact) {
    let push = contact.normal * (contact.penetration / 2.0);
    a.pos -= push;
    b.pos += push;
}

/// Elastic equal-mass response
///
/// Returns the new velocities of both balls given the collision normal.
pub fn resolve_velocities(v1: Vec2, v2: Vec2, normal: Vec2) -> (Vec2, Vec2) {
    let tangent = normal.perp();

    let v1_n = normal.dot(v1);
    let v1_t = tangent.dot(v1);
    let v2_n = normal.dot(v2);
    let v2_t = tangent.dot(v2);

    (
        normal * v2_n + tangent * v1_t,
        normal * v1_n + tangent * v2_t,
    )
}

/// Mutable references to two distinct elements
#[inline]
fn pair_mut(balls: &mut [Ball], i: usize, j: usize) -> (&mut Ball, &mut Ball) {
    debug_assert!(i < j);
    let (head, tail) = balls.split_at_mut(j);
    (&mut head[i], &mut tail[0])
}

/// One collision pass over every pair of active balls
///
/// Balls the cue ball runs into while the other ball is at rest get
/// recorded in `struck`. Returns the number of contacts resolved.
pub fn resolve_collisions(balls: &mut [Ball], struck: &mut Vec<u32>) -> usize {
    let mut contacts = 0;

    for i in 0..balls.len() {
        for j in (i + 1)..balls.len() {
            let (a, b) = pair_mut(balls, i, j);
            let Some(contact) = detect_contact(a, b) else {
                continue;
            };

            let (a_moving, b_moving) = (a.is_moving(), b.is_moving());
            if !a_moving && !b_moving {
                continue;
            }

            // Only a cue ball hitting a resting ball counts as contact
            if a_moving != b_moving {
                let (mover, target) = if a_moving { (&*a, &*b) } else { (&*b, &*a) };
                if mover.is_cue_ball() && !struck.contains(&target.id) {
                    struck.push(target.id);
                }
            }

            separate(a, b, &contact);

            // Already separating along the normal: leave velocities alone
            let closing = (a.vel - b.vel).dot(contact.normal);
            if closing > 0.0 {
                let (va, vb) = resolve_velocities(a.vel, b.vel, contact.normal);
                a.vel = va;
                b.vel = vb;
            }

            log::debug!(
                "Contact {} <-> {} (penetration {:.3}, closing {:.3})",
                a.id,
                b.id,
                contact.penetration,
                closing
            );
            contacts += 1;
        }
    }

    contacts
}

/// Position-only relaxation restoring minimum separation after integration
///
/// Pushing one pair apart can create a fresh overlap with a pair already
/// visited, so passes repeat until no pair penetrates by more than
/// [`SEPARATION_EPSILON`] or [`MAX_SEPARATION_PASSES`] is reached. Every
/// active ball is kept inside the cushions. Returns the passes used.
pub fn separate_overlaps(balls: &mut [Ball], bounds: &TableBounds) -> usize {
    for pass in 1..=MAX_SEPARATION_PASSES {
        clamp_to_bounds(balls, bounds);

        let mut worst = 0.0f32;
        for i in 0..balls.len() {
            for j in (i + 1)..balls.len() {
                let (a, b) = pair_mut(balls, i, j);
                if let Some(contact) = detect_contact(a, b) {
                    if contact.penetration > SEPARATION_EPSILON {
                        separate(a, b, &contact);
                        worst = worst.max(contact.penetration);
                    }
                }
            }
        }

        if worst <= SEPARATION_EPSILON {
            return pass;
        }
    }

    clamp_to_bounds(balls, bounds);
    log::debug!(
        "Overlaps remain after {} separation passes",
        MAX_SEPARATION_PASSES
    );
    MAX_SEPARATION_PASSES
}

/// Pull every active ball back inside the cushions
fn clamp_to_bounds(balls: &mut [Ball], bounds: &TableBounds) {
    for ball in balls.iter_mut().filter(|b| !b.potted) {
        ball.pos = bounds.clamp_ball(ball.pos, ball.radius);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const R: f32 = 11.0;

    fn vec_strategy() -> impl Strategy<Value = Vec2> {
        (-20.0f32..20.0, -20.0f32..20.0).prop_map(|(x, y)| Vec2::new(x, y))
    }

    #[test]
    fn test_no_contact_when_apart() {
        let a = Ball::cue(0, Vec2::new(100.0, 100.0), R);
        let b = Ball::object(1, Vec2::new(130.0, 100.0), R, 1);
        assert!(detect_contact(&a, &b).is_none());
    }

    #[test]
    fn test_contact_when_touching() {
        let a = Ball::cue(0, Vec2::new(100.0, 100.0), R);
        let b = Ball::object(1, Vec2::new(122.0, 100.0), R, 1);
        let contact = detect_contact(&a, &b).unwrap();
        assert!((contact.normal - Vec2::X).length() < 1e-6);
        assert!(contact.penetration.abs() < 1e-5);
    }

    #[test]
    fn test_potted_balls_never_collide() {
        let a = Ball::cue(0, Vec2::new(100.0, 100.0), R);
        let mut b = Ball::object(1, Vec2::new(105.0, 100.0), R, 1);
        b.pot();
        assert!(detect_contact(&a, &b).is_none());
    }

    #[test]
    fn test_coincident_centers_do_not_fault() {
        let mut balls = vec![
            Ball::cue(0, Vec2::new(200.0, 200.0), R),
            Ball::object(1, Vec2::new(200.0, 200.0), R, 1),
        ];
        balls[0].vel = Vec2::new(1.0, 0.0);

        let contact = detect_contact(&balls[0], &balls[1]).unwrap();
        assert_eq!(contact.normal, Vec2::X);
        assert!((contact.penetration - 2.0 * R).abs() < 1e-5);

        let mut struck = Vec::new();
        resolve_collisions(&mut balls, &mut struck);
        for ball in &balls {
            assert!(ball.pos.is_finite());
            assert!(ball.vel.is_finite());
        }
        assert!((balls[1].pos - balls[0].pos).length() >= 2.0 * R - 1e-3);
    }

    #[test]
    fn test_head_on_hit_transfers_velocity() {
        let mut balls = vec![
            Ball::cue(0, Vec2::new(100.0, 100.0), R),
            Ball::object(1, Vec2::new(120.0, 100.0), R, 1),
        ];
        balls[0].vel = Vec2::new(5.0, 0.0);

        let mut struck = Vec::new();
        let contacts = resolve_collisions(&mut balls, &mut struck);

        assert_eq!(contacts, 1);
        assert_eq!(struck, vec![1]);
        assert!(balls[0].vel.length() < 1e-5);
        assert!((balls[1].vel - Vec2::new(5.0, 0.0)).length() < 1e-5);
        // Overlap of 2 split evenly
        assert!((balls[0].pos.x - 99.0).abs() < 1e-4);
        assert!((balls[1].pos.x - 121.0).abs() < 1e-4);
    }

    #[test]
    fn test_object_ball_hit_is_not_cue_contact() {
        let mut balls = vec![
            Ball::object(0, Vec2::new(100.0, 100.0), R, 1),
            Ball::object(1, Vec2::new(120.0, 100.0), R, 1),
            Ball::cue(2, Vec2::new(400.0, 400.0), R),
        ];
        balls[0].vel = Vec2::new(3.0, 0.0);

        let mut struck = Vec::new();
        resolve_collisions(&mut balls, &mut struck);
        assert!(struck.is_empty());
    }

    #[test]
    fn test_cue_contact_recorded_in_either_order() {
        let mut balls = vec![
            Ball::object(0, Vec2::new(100.0, 100.0), R, 1),
            Ball::cue(1, Vec2::new(120.0, 100.0), R),
        ];
        balls[1].vel = Vec2::new(-4.0, 0.0);

        let mut struck = Vec::new();
        resolve_collisions(&mut balls, &mut struck);
        assert_eq!(struck, vec![0]);

        // Recorded once per shot
        balls[1].vel = Vec2::new(-4.0, 0.0);
        balls[0].vel = Vec2::ZERO;
        resolve_collisions(&mut balls, &mut struck);
        assert_eq!(struck, vec![0]);
    }

    #[test]
    fn test_resting_pair_is_left_alone() {
        let mut balls = vec![
            Ball::cue(0, Vec2::new(100.0, 100.0), R),
            Ball::object(1, Vec2::new(121.0, 100.0), R, 1),
        ];
        let mut struck = Vec::new();
        assert_eq!(resolve_collisions(&mut balls, &mut struck), 0);
        assert_eq!(balls[0].pos, Vec2::new(100.0, 100.0));
    }

    #[test]
    fn test_separating_pair_keeps_velocities() {
        let mut balls = vec![
            Ball::cue(0, Vec2::new(100.0, 100.0), R),
            Ball::object(1, Vec2::new(122.0, 100.0), R, 1),
        ];
        balls[0].vel = Vec2::new(-1.0, 0.0);
        balls[1].vel = Vec2::new(2.0, 0.0);

        let mut struck = Vec::new();
        resolve_collisions(&mut balls, &mut struck);
        assert_eq!(balls[0].vel, Vec2::new(-1.0, 0.0));
        assert_eq!(balls[1].vel, Vec2::new(2.0, 0.0));
    }

    fn bounds() -> TableBounds {
        crate::sim::table::Table::standard().bounds
    }

    #[test]
    fn test_separate_overlaps_restores_distance() {
        let mut balls = vec![
            Ball::cue(0, Vec2::new(500.0, 300.0), R),
            Ball::object(1, Vec2::new(510.0, 305.0), R, 1),
        ];
        separate_overlaps(&mut balls, &bounds());
        let dist = balls[0].pos.distance(balls[1].pos);
        assert!((dist - 2.0 * R).abs() < 1e-3);
    }

    #[test]
    fn test_separate_overlaps_resolves_chain() {
        // Fixing the first pair pushes ball 1 into ball 2
        let mut balls = vec![
            Ball::object(0, Vec2::new(500.0, 300.0), R, 1),
            Ball::object(1, Vec2::new(515.0, 300.0), R, 1),
            Ball::object(2, Vec2::new(537.5, 300.0), R, 1),
        ];
        let passes = separate_overlaps(&mut balls, &bounds());
        assert!(passes > 1);
        assert!(passes < MAX_SEPARATION_PASSES);
        for i in 0..balls.len() {
            for j in (i + 1)..balls.len() {
                assert!(balls[i].pos.distance(balls[j].pos) >= 2.0 * R - 1e-3);
            }
        }
    }

    #[test]
    fn test_separate_overlaps_keeps_balls_on_table() {
        // Ball 1 rests against the right cushion; ball 0 overlaps it from inside
        let bounds = bounds();
        let max_x = bounds.max.x - R;
        let mut balls = vec![
            Ball::cue(0, Vec2::new(max_x - 15.0, 300.0), R),
            Ball::object(1, Vec2::new(max_x, 300.0), R, 1),
        ];
        separate_overlaps(&mut balls, &bounds);
        assert!(bounds.contains_ball(balls[1].pos, R));
        assert!(bounds.contains_ball(balls[0].pos, R));
        assert!(balls[0].pos.distance(balls[1].pos) >= 2.0 * R - 1e-3);
    }

    proptest! {
        #[test]
        fn prop_collision_conserves_momentum_and_energy(
            v1 in vec_strategy(),
            v2 in vec_strategy(),
            angle in 0.0f32..std::f32::consts::TAU,
        ) {
            let normal = Vec2::new(angle.cos(), angle.sin());
            let (w1, w2) = resolve_velocities(v1, v2, normal);

            let momentum_before = v1 + v2;
            let momentum_after = w1 + w2;
            prop_assert!((momentum_before - momentum_after).length() < 1e-3);

            let energy_before = v1.length_squared() + v2.length_squared();
            let energy_after = w1.length_squared() + w2.length_squared();
            prop_assert!((energy_before - energy_after).abs() < 1e-2 * (1.0 + energy_before));
        }

        #[test]
        fn prop_tangential_components_unchanged(
            v1 in vec_strategy(),
            v2 in vec_strategy(),
            angle in 0.0f32..std::f32::consts::TAU,
        ) {
            let normal = Vec2::new(angle.cos(), angle.sin());
            let tangent = normal.perp();
            let (w1, w2) = resolve_velocities(v1, v2, normal);

            prop_assert!((tangent.dot(v1) - tangent.dot(w1)).abs() < 1e-3);
            prop_assert!((tangent.dot(v2) - tangent.dot(w2)).abs() < 1e-3);
            prop_assert!((normal.dot(v1) - normal.dot(w2)).abs() < 1e-3);
        }

        #[test]
        fn prop_contact_pass_leaves_no_overlap(
            offset_angle in 0.0f32..std::f32::consts::TAU,
            dist in 0.5f32..22.0,
            v in vec_strategy(),
        ) {
            let a_pos = Vec2::new(300.0, 300.0);
            let b_pos = a_pos + Vec2::new(offset_angle.cos(), offset_angle.sin()) * dist;
            let mut balls = vec![Ball::cue(0, a_pos, R), Ball::object(1, b_pos, R, 1)];
            balls[0].vel = v;
            prop_assume!(balls[0].is_moving());

            let mut struck = Vec::new();
            resolve_collisions(&mut balls, &mut struck);
            let d = balls[0].pos.distance(balls[1].pos);
            prop_assert!(d >= 2.0 * R - 1e-3);
            prop_assert_eq!(struck, vec![1]);
        }
    }
}
