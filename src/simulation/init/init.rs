use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::domain::{JarConfig, JarGeometry, Letter, RunOverrides};
use crate::spatial::ColumnBuckets;
use crate::systems::SpawnScheduler;

use super::perf_stats::PerfStats;
use super::{JarCore, RenderBuffers};

pub(super) fn create_jar_core(
    config: JarConfig,
    geometry: JarGeometry,
    letters: Vec<Letter>,
    overrides: RunOverrides,
    seed: u64,
) -> JarCore {
    let geometry = geometry.sanitized();
    let overrides = overrides.sanitized();
    let capacity = letters.len().min(config.max_slice);
    let spawner = SpawnScheduler::new(letters, config.max_slice, config.spawn_interval_ms);

    let jar = JarCore {
        bounds: geometry.bounds(),
        spawn_area: geometry.spawn_area(),
        geometry,
        overrides,
        bodies: Vec::with_capacity(capacity),
        spawner,
        buckets: ColumnBuckets::new(config.tuning.bucket_width),
        rng: StdRng::seed_from_u64(seed),
        seed,
        clock_ms: 0.0,
        frame: 0,
        next_id: 1,
        settled: false,
        show_body_debug: false,
        render: RenderBuffers {
            frame: Vec::with_capacity(capacity * super::FRAME_STRIDE),
            colors: Vec::with_capacity(capacity),
        },
        perf_enabled: false,
        perf_stats: PerfStats::default(),
        config,
    };
    log::info!(
        "jar created: {} letters queued, radius {}, bounds {:?}",
        jar.spawner.len(),
        jar.body_radius(),
        jar.bounds
    );
    jar
}
