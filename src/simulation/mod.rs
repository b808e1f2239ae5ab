//! JarCore - the letter jar simulation.
//!
//! Owns every body, the spawn queue and the jar bounds. One call to
//! [`JarCore::step`] runs the whole pipeline:
//!
//! 1. spawn at most one queued letter
//! 2. integrate free bodies (gravity, drag, floor/walls/ceiling)
//! 3. re-bucket, resolve contacts between free bodies and their neighbours
//! 4. re-bucket, demote unsupported resting bodies, run the settle check
//!
//! Integration reads the resting flags left by the previous step; contact
//! resolution sees every position written by integration in this step.

use rand::rngs::StdRng;

use crate::domain::{Bounds, JarConfig, JarGeometry, Letter, RunOverrides, SpawnArea, Tier};
use crate::spatial::ColumnBuckets;
use crate::systems::{Body, SpawnScheduler};

#[path = "perf/perf_timer.rs"]
mod perf_timer;
#[path = "perf/perf_stats.rs"]
mod perf_stats;
#[path = "step/step.rs"]
mod step;
#[path = "commands/commands.rs"]
mod commands;
#[path = "render/render_extract.rs"]
mod render_extract;
#[path = "init/init.rs"]
mod init;
#[path = "init/settings.rs"]
mod settings;
mod facade;

pub use facade::{FrameLayout, Jar};
pub use perf_stats::PerfStats;
pub use render_extract::FRAME_STRIDE;

use perf_timer::PerfTimer;

/// Transfer buffers handed to the renderer
pub(crate) struct RenderBuffers {
    frame: Vec<f32>,
    colors: Vec<u32>,
}

/// The jar simulation
pub struct JarCore {
    config: JarConfig,
    geometry: JarGeometry,
    bounds: Bounds,
    spawn_area: SpawnArea,
    overrides: RunOverrides,

    bodies: Vec<Body>,
    spawner: SpawnScheduler,
    buckets: ColumnBuckets,

    rng: StdRng,
    seed: u64,

    // State
    clock_ms: f64,
    frame: u64,
    next_id: u32,
    settled: bool,
    show_body_debug: bool,

    render: RenderBuffers,

    // Perf metrics
    perf_enabled: bool,
    perf_stats: PerfStats,
}

impl JarCore {
    /// Create a run. `letters` is truncated to `config.max_slice`.
    pub fn new(
        config: JarConfig,
        geometry: JarGeometry,
        letters: Vec<Letter>,
        overrides: RunOverrides,
        seed: u64,
    ) -> Self {
        init::create_jar_core(config, geometry, letters, overrides, seed)
    }

    /// Default config, default-sized jar around the center point
    pub fn with_letters(center_x: f32, center_y: f32, letters: Vec<Letter>, seed: u64) -> Self {
        Self::new(
            JarConfig::default(),
            JarGeometry::centered(center_x, center_y),
            letters,
            RunOverrides::default(),
            seed,
        )
    }

    /// Advance by `delta_ms` milliseconds. Returns `true` on the one step in
    /// which the jar becomes settled.
    pub fn step(&mut self, delta_ms: f64) -> bool {
        step::step(self, delta_ms)
    }

    /// Restart with a new batch of letters: bodies are dropped, the clock,
    /// the spawn cadence and the settled latch start over.
    pub fn reset(&mut self, letters: Vec<Letter>) {
        commands::reset(self, letters)
    }

    /// Place a body directly, bypassing the queue. Returns its id.
    pub fn spawn_body_at(&mut self, x: f32, y: f32, vx: f32, vy: f32, letter: Letter) -> u32 {
        commands::spawn_body_at(self, x, y, vx, vy, letter)
    }

    /// Queue one more letter. Refused once the run holds `max_slice` letters.
    pub fn enqueue(&mut self, letter: Letter) -> bool {
        commands::enqueue(self, letter)
    }

    pub fn settled(&self) -> bool { self.settled }

    pub fn frame(&self) -> u64 { self.frame }

    /// Milliseconds simulated since the run started
    pub fn clock_ms(&self) -> f64 { self.clock_ms }

    pub fn bodies(&self) -> &[Body] { &self.bodies }

    pub fn body_count(&self) -> usize { self.bodies.len() }

    pub fn resting_count(&self) -> usize {
        self.bodies.iter().filter(|b| b.is_resting()).count()
    }

    pub fn pending_spawns(&self) -> usize { self.spawner.len() }

    pub fn bounds(&self) -> Bounds { self.bounds }

    pub fn spawn_area(&self) -> SpawnArea { self.spawn_area }

    pub fn geometry(&self) -> JarGeometry { self.geometry }

    pub fn config(&self) -> &JarConfig { &self.config }

    pub fn config_json(&self) -> String {
        self.config.to_json()
    }

    /// Radius of every body in this run
    pub fn body_radius(&self) -> f32 {
        settings::body_radius(self)
    }

    /// Glyph font size for this run (display only)
    pub fn display_size(&self) -> f32 {
        settings::display_size(self)
    }

    /// Whether every body currently rests on the floor or on another resting
    /// body. The settled latch additionally waits for the queue to drain.
    pub fn all_supported(&self) -> bool {
        settings::all_supported(self)
    }

    pub fn show_body_debug(&self) -> bool {
        settings::show_body_debug(self)
    }

    pub fn set_show_body_debug(&mut self, show: bool) {
        settings::set_show_body_debug(self, show);
    }

    /// Flip the collision-circle overlay; returns the new state
    pub fn toggle_show_body_debug(&mut self) -> bool {
        settings::toggle_show_body_debug(self)
    }

    /// Enable or disable per-step perf metrics (adds timing overhead when enabled)
    pub fn enable_perf_metrics(&mut self, enabled: bool) {
        settings::enable_perf_metrics(self, enabled);
    }

    /// Get last step perf snapshot (zeros when perf disabled)
    pub fn get_perf_stats(&self) -> PerfStats {
        settings::get_perf_stats(self)
    }

    /// Pack every body into the transfer buffers; returns the body count.
    pub fn collect_frame(&mut self) -> usize {
        render_extract::collect_frame(self)
    }

    /// Pointer to the packed frame (`FRAME_STRIDE` floats per body)
    pub fn frame_ptr(&self) -> *const f32 {
        self.render.frame.as_ptr()
    }

    pub fn frame_len(&self) -> usize {
        self.render.frame.len()
    }

    /// Pointer to the per-body `0xRRGGBB` colors
    pub fn colors_ptr(&self) -> *const u32 {
        self.render.colors.as_ptr()
    }

    pub fn colors_len(&self) -> usize {
        self.render.colors.len()
    }

    pub fn frame_data(&self) -> &[f32] {
        &self.render.frame
    }

    pub fn color_data(&self) -> &[u32] {
        &self.render.colors
    }

    pub fn glyph_at(&self, index: usize) -> Option<char> {
        self.bodies.get(index).map(|b| b.letter().glyph())
    }

    pub fn color_at(&self, index: usize) -> Option<&str> {
        self.bodies.get(index).map(|b| b.letter().color())
    }

    pub fn tier_at(&self, index: usize) -> Option<Tier> {
        self.bodies.get(index).and_then(|b| b.letter().tier())
    }
}

#[cfg(test)]
#[path = "tests/tests.rs"]
mod tests;
