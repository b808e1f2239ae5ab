use crate::spatial::ColumnBuckets;
use crate::systems::all_supported as every_body_supported;

use super::perf_stats::PerfStats;
use super::JarCore;

pub(super) fn body_radius(jar: &JarCore) -> f32 {
    jar.overrides.body_radius.unwrap_or(jar.config.body_radius)
}

pub(super) fn display_size(jar: &JarCore) -> f32 {
    jar.overrides
        .display_size
        .unwrap_or_else(|| jar.config.display_size(body_radius(jar)))
}

pub(super) fn all_supported(jar: &JarCore) -> bool {
    // The step buckets may be stale after scripted spawns
    let mut buckets = ColumnBuckets::new(jar.config.tuning.bucket_width);
    buckets.rebuild(jar.bodies.iter().map(|b| b.pos().x));
    every_body_supported(&jar.bodies, &buckets, &jar.bounds, &jar.config.tuning)
}

pub(super) fn show_body_debug(jar: &JarCore) -> bool {
    jar.show_body_debug
}

pub(super) fn set_show_body_debug(jar: &mut JarCore, show: bool) {
    jar.show_body_debug = show;
}

pub(super) fn toggle_show_body_debug(jar: &mut JarCore) -> bool {
    jar.show_body_debug = !jar.show_body_debug;
    jar.show_body_debug
}

pub(super) fn enable_perf_metrics(jar: &mut JarCore, enabled: bool) {
    jar.perf_enabled = enabled;
    if !enabled {
        jar.perf_stats.reset();
    }
}

pub(super) fn get_perf_stats(jar: &JarCore) -> PerfStats {
    jar.perf_stats.clone()
}
