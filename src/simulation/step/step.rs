use crate::systems::{all_supported, demote_unsupported, integrate_all, resolve_contacts};

use super::{commands, JarCore, PerfTimer};

pub(super) fn step(jar: &mut JarCore, delta_ms: f64) -> bool {
    let perf_on = jar.perf_enabled;
    if perf_on {
        jar.perf_stats.reset();
    }
    let step_start = PerfTimer::start_if(perf_on);
    let mut lap = PerfTimer::start_if(perf_on);

    let delta_ms = sanitize_delta(delta_ms, jar.config.tuning.max_step_ms as f64);
    jar.clock_ms += delta_ms;
    jar.frame += 1;
    let dt = (delta_ms / 1000.0) as f32;

    // === SPAWN ===
    if let Some(request) = jar.spawner.tick(jar.clock_ms, &mut jar.rng, &jar.spawn_area) {
        let id = commands::insert_body(jar, request.pos, request.velocity, request.letter);
        log::debug!(
            "spawned letter {} at ({:.1}, {:.1}), {} queued",
            id,
            request.pos.x,
            request.pos.y,
            jar.spawner.len()
        );
    }
    if let Some(t) = lap.as_mut() {
        jar.perf_stats.spawn_ms = t.lap_ms();
    }

    // === INTEGRATE ===
    // Uses the resting flags left by the previous step
    let floor_rests = integrate_all(&mut jar.bodies, &jar.bounds, &jar.config, dt);
    if let Some(t) = lap.as_mut() {
        jar.perf_stats.integrate_ms = t.lap_ms();
    }

    // === CONTACTS ===
    jar.buckets.rebuild(jar.bodies.iter().map(|b| b.pos.x));
    let contacts = resolve_contacts(&mut jar.bodies, &jar.buckets, &jar.bounds, &jar.config);
    if let Some(t) = lap.as_mut() {
        jar.perf_stats.resolve_ms = t.lap_ms();
    }

    // === SUPPORT ===
    jar.buckets.rebuild(jar.bodies.iter().map(|b| b.pos.x));
    let tuning = &jar.config.tuning;
    let demotions = demote_unsupported(&mut jar.bodies, &jar.buckets, &jar.bounds, tuning);
    let supported = all_supported(&jar.bodies, &jar.buckets, &jar.bounds, tuning);
    if let Some(t) = lap.as_mut() {
        jar.perf_stats.evaluate_ms = t.lap_ms();
    }

    // Latch once per run; letters still queued will land on top later.
    let just_settled = !jar.settled && supported && jar.spawner.is_empty();
    if just_settled {
        jar.settled = true;
        log::info!(
            "jar settled: {} letters after {:.0} ms ({} frames)",
            jar.bodies.len(),
            jar.clock_ms,
            jar.frame
        );
    }

    if let Some(t) = step_start {
        let stats = &mut jar.perf_stats;
        stats.step_ms = t.elapsed_ms();
        stats.body_count = jar.bodies.len() as u32;
        stats.resting_count = jar.bodies.iter().filter(|b| b.resting).count() as u32;
        stats.pending_spawns = jar.spawner.len() as u32;
        stats.contacts = contacts.contacts;
        stats.promotions = floor_rests + contacts.promotions;
        stats.demotions = demotions;
    }

    just_settled
}

/// Non-finite or negative deltas count as a paused frame; long frames
/// (tab switches) are cut to `max_ms` so bodies cannot tunnel.
pub(super) fn sanitize_delta(delta_ms: f64, max_ms: f64) -> f64 {
    if !delta_ms.is_finite() || delta_ms <= 0.0 {
        return 0.0;
    }
    delta_ms.min(max_ms)
}
