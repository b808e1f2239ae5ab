//! Circle-circle contacts between letters.
//!
//! Pairs are found through the column buckets (own column and one either
//! side). Only free bodies drive the outer loop; a resting body takes part
//! solely as the other side of a pair. Iteration order makes the result
//! slightly order-dependent, which is accepted: the jar only needs to look
//! right in aggregate.

use crate::core::Vec2;
use crate::domain::{Bounds, JarConfig};
use crate::spatial::ColumnBuckets;

use super::body::{pair_mut, Body};

/// Stand-in center distance for two bodies at the exact same spot
const COINCIDENT_EPSILON: f32 = 1e-4;
/// Cosmetic spin per unit of impulse
const SPIN_PER_IMPULSE: f32 = 0.01;

/// Result of one resolved contact
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Contact {
    /// Unit vector from the first body toward the second
    pub normal: Vec2,
    pub impulse: f32,
    pub first_came_to_rest: bool,
    pub second_came_to_rest: bool,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ContactStats {
    pub contacts: u32,
    pub promotions: u32,
}

/// Resolve one pair if the circles overlap.
///
/// Each body is pushed out by half the overlap along the normal. When one
/// side is pinned by the jar (typically a letter lying on the floor) the
/// part of its push that the walls block goes to the other body, so the pair
/// still ends up just touching.
pub fn resolve_pair(
    b: &mut Body,
    o: &mut Body,
    bounds: &Bounds,
    config: &JarConfig,
) -> Option<Contact> {
    let tuning = &config.tuning;
    let min_dist = b.radius() + o.radius();
    let delta = o.pos - b.pos;
    let dist_sq = delta.length_squared();
    if !(dist_sq < min_dist * min_dist) {
        return None;
    }

    let (normal, dist) = if dist_sq > 0.0 {
        let dist = dist_sq.sqrt();
        (delta * (1.0 / dist), dist)
    } else {
        // Stacked exactly on top of each other: treat `o` as the one below.
        (Vec2::DOWN, COINCIDENT_EPSILON)
    };

    separate(b, o, normal, min_dist - dist, bounds, tuning.top_clamp_margin);

    // Resting bodies are held in place; the impulse only acts on free ones.
    let relative = b.velocity - o.velocity;
    let impulse = relative.dot(normal) * tuning.impulse_scale;
    if !b.resting {
        b.velocity -= normal * impulse;
        b.velocity *= tuning.contact_damping;
    }
    if !o.resting {
        o.velocity += normal * impulse;
        o.velocity *= tuning.contact_damping;
    }

    b.rotation += impulse * SPIN_PER_IMPULSE;
    o.rotation -= impulse * SPIN_PER_IMPULSE;

    // Letting a letter rest on another one without touching the floor; the
    // clearance keeps bodies near the floor from locking up mid-bounce.
    let rest_line = bounds.bottom - tuning.contact_floor_clearance;
    let mut first_came_to_rest = false;
    let mut second_came_to_rest = false;
    if !b.resting
        && normal.y > tuning.contact_normal_min
        && b.velocity.y.abs() < tuning.contact_rest_velocity
        && b.pos.y < rest_line
    {
        b.rest();
        first_came_to_rest = true;
    }
    if !o.resting
        && normal.y < -tuning.contact_normal_min
        && o.velocity.y.abs() < tuning.contact_rest_velocity
        && o.pos.y < rest_line
    {
        o.rest();
        second_came_to_rest = true;
    }

    Some(Contact {
        normal,
        impulse,
        first_came_to_rest,
        second_came_to_rest,
    })
}

fn separate(
    b: &mut Body,
    o: &mut Body,
    normal: Vec2,
    overlap: f32,
    bounds: &Bounds,
    top_margin: f32,
) {
    let half = overlap * 0.5;
    let mut b_shift = normal * -half;
    let mut o_shift = normal * half;

    let o_target = o.pos + o_shift;
    let o_blocked = o_target - bounds.contain(o_target, top_margin);
    o_shift -= o_blocked;
    b_shift -= o_blocked;

    let b_target = b.pos + b_shift;
    let b_blocked = b_target - bounds.contain(b_target, top_margin);
    b_shift -= b_blocked;
    o_shift -= b_blocked;

    // Squeezed into a corner from both sides: stay inside, accept the overlap.
    b.pos = bounds.contain(b.pos + b_shift, top_margin);
    o.pos = bounds.contain(o.pos + o_shift, top_margin);
}

/// One resolution pass over all free bodies.
pub fn resolve_contacts(
    bodies: &mut [Body],
    buckets: &ColumnBuckets,
    bounds: &Bounds,
    config: &JarConfig,
) -> ContactStats {
    let mut stats = ContactStats::default();
    for i in 0..bodies.len() {
        if bodies[i].resting {
            continue;
        }
        let x = bodies[i].pos.x;
        for j in buckets.neighbors(x, 1) {
            if j == i {
                continue;
            }
            let (b, o) = pair_mut(bodies, i, j);
            if let Some(contact) = resolve_pair(b, o, bounds, config) {
                stats.contacts += 1;
                stats.promotions +=
                    contact.first_came_to_rest as u32 + contact.second_came_to_rest as u32;
            }
        }
    }
    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Letter;

    fn bounds() -> Bounds {
        Bounds::new(0.0, 300.0, 0.0, 300.0)
    }

    fn body(id: u32, x: f32, y: f32) -> Body {
        Body::new(id, Vec2::new(x, y), Vec2::ZERO, 18.0, Letter::from('a'))
    }

    #[test]
    fn overlapping_pair_ends_up_touching() {
        let config = JarConfig::default();
        let mut a = body(1, 100.0, 100.0);
        let mut b = body(2, 120.0, 110.0);
        let contact = resolve_pair(&mut a, &mut b, &bounds(), &config).unwrap();
        assert!((contact.normal.length() - 1.0).abs() < 1e-5);
        assert!(a.pos.distance(b.pos) >= 36.0 - 1e-3);
        // Symmetric push
        let mid = (a.pos + b.pos) * 0.5;
        assert!((mid.x - 110.0).abs() < 1e-3 && (mid.y - 105.0).abs() < 1e-3);
    }

    #[test]
    fn separated_pair_is_ignored() {
        let config = JarConfig::default();
        let mut a = body(1, 100.0, 100.0);
        let mut b = body(2, 136.5, 100.0);
        assert!(resolve_pair(&mut a, &mut b, &bounds(), &config).is_none());
        assert_eq!(a.pos, Vec2::new(100.0, 100.0));
    }

    #[test]
    fn coincident_bodies_split_vertically_without_nan() {
        let config = JarConfig::default();
        let mut a = body(1, 100.0, 100.0);
        let mut b = body(2, 100.0, 100.0);
        let contact = resolve_pair(&mut a, &mut b, &bounds(), &config).unwrap();
        assert_eq!(contact.normal, Vec2::DOWN);
        assert!(a.pos.is_finite() && b.pos.is_finite());
        assert!(a.velocity.is_finite() && b.velocity.is_finite());
        assert!(a.pos.y < b.pos.y);
        assert!(a.pos.distance(b.pos) >= 36.0 - 1e-2);
    }

    #[test]
    fn floor_pinned_body_passes_push_to_the_other() {
        let config = JarConfig::default();
        let mut falling = body(1, 150.0, 270.0);
        falling.velocity = Vec2::new(0.0, 80.0);
        let mut grounded = body(2, 150.0, 300.0);
        grounded.resting = true;
        resolve_pair(&mut falling, &mut grounded, &bounds(), &config).unwrap();
        assert_eq!(grounded.pos.y, 300.0);
        assert!((grounded.pos.y - falling.pos.y - 36.0).abs() < 1e-3);
        // Held in place: no impulse reaches the resting body
        assert_eq!(grounded.velocity, Vec2::ZERO);
        assert!((falling.velocity.y - 80.0 * 0.58 * 0.98).abs() < 1e-3);
    }

    #[test]
    fn impulse_exchanges_normal_velocity() {
        let config = JarConfig::default();
        let mut a = body(1, 100.0, 100.0);
        a.velocity = Vec2::new(50.0, 0.0);
        let mut b = body(2, 130.0, 100.0);
        let contact = resolve_pair(&mut a, &mut b, &bounds(), &config).unwrap();
        assert!((contact.impulse - 21.0).abs() < 1e-3);
        assert!((a.velocity.x - 29.0 * 0.98).abs() < 1e-3);
        assert!((b.velocity.x - 21.0 * 0.98).abs() < 1e-3);
        assert!((a.rotation - 0.21).abs() < 1e-4);
        assert!((b.rotation + 0.21).abs() < 1e-4);
    }

    #[test]
    fn slow_body_on_top_comes_to_rest() {
        let config = JarConfig::default();
        let mut top = body(1, 150.0, 240.0);
        top.velocity = Vec2::new(0.0, 5.0);
        let mut below = body(2, 150.0, 270.0);
        below.resting = true;
        let contact = resolve_pair(&mut top, &mut below, &bounds(), &config).unwrap();
        assert!(contact.first_came_to_rest);
        assert!(top.resting);
        assert_eq!(top.velocity.y, 0.0);
    }

    #[test]
    fn fast_body_on_top_keeps_moving() {
        let config = JarConfig::default();
        let mut top = body(1, 150.0, 240.0);
        top.velocity = Vec2::new(0.0, 60.0);
        let mut below = body(2, 150.0, 270.0);
        below.resting = true;
        let contact = resolve_pair(&mut top, &mut below, &bounds(), &config).unwrap();
        assert!(!contact.first_came_to_rest);
        assert!(!top.resting);
        assert!(top.velocity.y > config.tuning.contact_rest_velocity);
    }

    #[test]
    fn falling_body_below_rests_the_upper_one_symmetrically() {
        let config = JarConfig::default();
        // `b` is the lower body this time; `o` sits on top of it
        let mut lower = body(1, 150.0, 240.0);
        let mut upper = body(2, 150.0, 210.0);
        upper.velocity = Vec2::new(0.0, 2.0);
        lower.velocity = Vec2::new(0.0, 2.0);
        let contact = resolve_pair(&mut lower, &mut upper, &bounds(), &config).unwrap();
        assert!(contact.normal.y < 0.0);
        assert!(contact.second_came_to_rest);
        assert!(upper.resting);
    }

    #[test]
    fn pass_skips_resting_outer_bodies() {
        let config = JarConfig::default();
        let mut bodies = vec![body(1, 100.0, 100.0), body(2, 110.0, 100.0)];
        bodies[0].resting = true;
        bodies[1].resting = true;
        let mut buckets = ColumnBuckets::new(config.tuning.bucket_width);
        buckets.rebuild(bodies.iter().map(|b| b.pos.x));
        let stats = resolve_contacts(&mut bodies, &buckets, &bounds(), &config);
        assert_eq!(stats, ContactStats::default());

        bodies[1].resting = false;
        let stats = resolve_contacts(&mut bodies, &buckets, &bounds(), &config);
        assert_eq!(stats.contacts, 1);
        assert!(bodies[0].pos.distance(bodies[1].pos) >= 36.0 - 1e-3);
    }
}
