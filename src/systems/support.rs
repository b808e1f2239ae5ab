//! Support graph checks for resting letters.
//!
//! Velocity alone lets a letter "rest" over a gap. A resting letter therefore
//! has to be on the floor or sit on another resting letter directly beneath
//! it; letters that lose their support are demoted and fall again. The jar is
//! settled once every letter passes that test at the same time.

use crate::domain::{Bounds, Tuning};
use crate::spatial::ColumnBuckets;

use super::body::Body;

/// Within `floor_epsilon` of the floor line
#[inline]
pub fn at_floor(body: &Body, bounds: &Bounds, tuning: &Tuning) -> bool {
    bounds.floor_gap(body.pos.y) < tuning.floor_epsilon
}

/// Whether `below` holds up `above`: strictly lower, close enough vertically
/// and overlapping enough horizontally. Resting flags are not checked here.
#[inline]
pub fn supports(below: &Body, above: &Body, tuning: &Tuning) -> bool {
    let reach = below.radius() + above.radius();
    let gap = below.pos.y - above.pos.y;
    gap > 0.0
        && gap < reach + tuning.support_gap_margin
        && (below.pos.x - above.pos.x).abs() < reach * tuning.support_overlap_ratio
}

/// Column span wide enough for the horizontal part of [`supports`]
fn support_span(bodies: &[Body], buckets: &ColumnBuckets, tuning: &Tuning) -> i32 {
    let widest = bodies.iter().map(Body::radius).fold(0.0_f32, f32::max);
    buckets.span_for(2.0 * widest * tuning.support_overlap_ratio)
}

fn find_support(
    bodies: &[Body],
    i: usize,
    buckets: &ColumnBuckets,
    span: i32,
    tuning: &Tuning,
) -> Option<usize> {
    let above = &bodies[i];
    buckets
        .neighbors(above.pos.x, span)
        .find(|&j| j != i && bodies[j].resting && supports(&bodies[j], above, tuning))
}

/// Wake every resting body that is neither on the floor nor held up by
/// another resting body. Demoting a body can strand the ones stacked on it,
/// so passes repeat until nothing changes; afterwards every resting body is
/// supported. Returns the number demoted.
pub fn demote_unsupported(
    bodies: &mut [Body],
    buckets: &ColumnBuckets,
    bounds: &Bounds,
    tuning: &Tuning,
) -> u32 {
    let span = support_span(bodies, buckets, tuning);
    let mut demoted = 0;
    loop {
        let mut changed = 0;
        for i in 0..bodies.len() {
            let body = &bodies[i];
            if !body.resting || at_floor(body, bounds, tuning) {
                continue;
            }
            if find_support(bodies, i, buckets, span, tuning).is_some() {
                continue;
            }
            let body = &mut bodies[i];
            body.resting = false;
            body.velocity.y = body.velocity.y.max(tuning.demotion_nudge);
            log::trace!("letter {} lost support at y={:.1}", body.id, body.pos.y);
            changed += 1;
        }
        if changed == 0 {
            return demoted;
        }
        demoted += changed;
    }
}

/// Global settle test: every body rests and is on the floor or supported.
pub fn all_supported(
    bodies: &[Body],
    buckets: &ColumnBuckets,
    bounds: &Bounds,
    tuning: &Tuning,
) -> bool {
    let span = support_span(bodies, buckets, tuning);
    bodies.iter().enumerate().all(|(i, body)| {
        body.resting
            && (at_floor(body, bounds, tuning)
                || find_support(bodies, i, buckets, span, tuning).is_some())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Vec2;
    use crate::domain::Letter;

    fn bounds() -> Bounds {
        Bounds::new(0.0, 300.0, 0.0, 300.0)
    }

    fn resting(id: u32, x: f32, y: f32) -> Body {
        let mut b = Body::new(id, Vec2::new(x, y), Vec2::ZERO, 18.0, Letter::from('a'));
        b.resting = true;
        b
    }

    fn has_support(bodies: &[Body], i: usize, buckets: &ColumnBuckets, t: &Tuning) -> bool {
        let span = support_span(bodies, buckets, t);
        find_support(bodies, i, buckets, span, t).is_some()
    }

    fn indexed(bodies: &[Body]) -> ColumnBuckets {
        let mut buckets = ColumnBuckets::new(Tuning::default().bucket_width);
        buckets.rebuild(bodies.iter().map(|b| b.pos.x));
        buckets
    }

    #[test]
    fn support_predicate_thresholds() {
        let t = Tuning::default();
        let below = resting(1, 100.0, 200.0);
        // reach 36: gap must be in (0, 42), |dx| below 30.6
        assert!(supports(&below, &resting(2, 100.0, 164.0), &t));
        assert!(supports(&below, &resting(2, 130.0, 159.0), &t));
        assert!(!supports(&below, &resting(2, 131.0, 164.0), &t));
        assert!(!supports(&below, &resting(2, 100.0, 158.0), &t));
        assert!(!supports(&below, &resting(2, 100.0, 200.0), &t));
        assert!(!supports(&below, &resting(2, 100.0, 230.0), &t));
    }

    #[test]
    fn floating_body_is_demoted_with_downward_nudge() {
        let t = Tuning::default();
        let mut bodies = vec![resting(1, 150.0, 40.0), resting(2, 20.0, 300.0)];
        bodies[0].velocity = Vec2::new(0.0, -5.0);
        let buckets = indexed(&bodies);
        let demoted = demote_unsupported(&mut bodies, &buckets, &bounds(), &t);
        assert_eq!(demoted, 1);
        assert!(!bodies[0].resting);
        assert!(bodies[0].velocity.y >= 30.0);
        // Floor body untouched
        assert!(bodies[1].resting);
    }

    #[test]
    fn existing_fall_speed_is_kept_when_faster() {
        let t = Tuning::default();
        let mut bodies = vec![resting(1, 150.0, 40.0)];
        bodies[0].velocity.y = 75.0;
        let buckets = indexed(&bodies);
        demote_unsupported(&mut bodies, &buckets, &bounds(), &t);
        assert_eq!(bodies[0].velocity.y, 75.0);
    }

    #[test]
    fn stacked_bodies_stay_resting() {
        let t = Tuning::default();
        let mut bodies = vec![
            resting(1, 150.0, 300.0),
            resting(2, 155.0, 264.0),
            resting(3, 140.0, 228.0),
        ];
        let buckets = indexed(&bodies);
        assert_eq!(demote_unsupported(&mut bodies, &buckets, &bounds(), &t), 0);
        assert!(all_supported(&bodies, &buckets, &bounds(), &t));
        assert!(has_support(&bodies, 2, &buckets, &t));
    }

    #[test]
    fn free_supporter_does_not_count() {
        let t = Tuning::default();
        let mut bodies = vec![resting(1, 150.0, 300.0), resting(2, 150.0, 264.0)];
        bodies[0].resting = false;
        let buckets = indexed(&bodies);
        assert!(!has_support(&bodies, 1, &buckets, &t));
        assert!(!all_supported(&bodies, &buckets, &bounds(), &t));
        assert_eq!(demote_unsupported(&mut bodies, &buckets, &bounds(), &t), 1);
    }

    #[test]
    fn demotion_cascades_up_a_floating_stack() {
        let t = Tuning::default();
        // Index 0 rests on index 1, which floats; index 2 rests on index 0.
        let mut bodies = vec![
            resting(1, 150.0, 164.0),
            resting(2, 150.0, 200.0),
            resting(3, 150.0, 128.0),
        ];
        let buckets = indexed(&bodies);
        assert_eq!(demote_unsupported(&mut bodies, &buckets, &bounds(), &t), 3);
        assert!(bodies.iter().all(|b| !b.resting && b.velocity.y >= 30.0));

        let mut bodies = vec![resting(2, 150.0, 200.0), resting(1, 150.0, 164.0)];
        let buckets = indexed(&bodies);
        assert_eq!(demote_unsupported(&mut bodies, &buckets, &bounds(), &t), 2);
    }

    #[test]
    fn stack_on_floor_survives_a_floating_neighbour() {
        let t = Tuning::default();
        let mut bodies = vec![
            resting(1, 150.0, 264.0),
            resting(2, 150.0, 300.0),
            resting(3, 250.0, 100.0),
        ];
        let buckets = indexed(&bodies);
        assert_eq!(demote_unsupported(&mut bodies, &buckets, &bounds(), &t), 1);
        assert!(bodies[0].resting && bodies[1].resting && !bodies[2].resting);
    }

    #[test]
    fn empty_jar_counts_as_supported() {
        let buckets = indexed(&[]);
        assert!(all_supported(&[], &buckets, &bounds(), &Tuning::default()));
    }
}
