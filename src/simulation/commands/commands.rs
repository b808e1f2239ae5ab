use crate::core::Vec2;
use crate::domain::Letter;
use crate::systems::Body;

use super::JarCore;

/// Create a body with the run radius; returns its id.
pub(super) fn insert_body(jar: &mut JarCore, pos: Vec2, velocity: Vec2, letter: Letter) -> u32 {
    let id = jar.next_id;
    jar.next_id = jar.next_id.wrapping_add(1);
    let radius = jar.body_radius();
    jar.bodies.push(Body::new(id, pos, velocity, radius, letter));
    id
}

pub(super) fn spawn_body_at(
    jar: &mut JarCore,
    x: f32,
    y: f32,
    vx: f32,
    vy: f32,
    letter: Letter,
) -> u32 {
    let b = jar.bounds;
    let x = if x.is_finite() { x } else { (b.left + b.right) * 0.5 };
    let y = if y.is_finite() { y } else { b.top };
    let pos = b.contain(Vec2::new(x, y), jar.config.tuning.top_clamp_margin);
    let velocity = Vec2::new(
        if vx.is_finite() { vx } else { 0.0 },
        if vy.is_finite() { vy } else { 0.0 },
    );
    insert_body(jar, pos, velocity, letter)
}

pub(super) fn enqueue(jar: &mut JarCore, letter: Letter) -> bool {
    if jar.bodies.len() + jar.spawner.len() >= jar.config.max_slice {
        log::warn!(
            "letter '{}' refused, jar holds {} already",
            letter.glyph(),
            jar.config.max_slice
        );
        return false;
    }
    jar.spawner.push(letter);
    true
}

pub(super) fn reset(jar: &mut JarCore, letters: Vec<Letter>) {
    use rand::SeedableRng;

    jar.bodies.clear();
    jar.spawner.refill(letters, jar.config.max_slice);
    jar.buckets.rebuild(std::iter::empty());
    jar.rng = rand::rngs::StdRng::seed_from_u64(jar.seed);
    jar.clock_ms = 0.0;
    jar.frame = 0;
    jar.next_id = 1;
    jar.settled = false;
    jar.render.frame.clear();
    jar.render.colors.clear();
    jar.perf_stats.reset();
    log::info!("jar reset: {} letters queued", jar.spawner.len());
}
