//! Letter Jar Engine - settling physics for the collected-letters jar
//!
//! Architecture:
//! - core/        - Vec2 math, console log bridge
//! - domain/      - Config, letters, jar geometry
//! - spatial/     - Column buckets for neighbour lookups
//! - systems/     - Spawn, integrate, collide, support
//! - simulation/  - JarCore orchestration + wasm facade

pub mod core;
pub mod domain;
pub mod spatial;
pub mod systems;
pub mod simulation;

use wasm_bindgen::prelude::*;

// Better error messages in debug mode
#[cfg(feature = "console_error_panic_hook")]
pub fn set_panic_hook() {
    console_error_panic_hook::set_once();
}

/// Initialize the engine: panic hook plus `log` output to the browser console
#[wasm_bindgen]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    set_panic_hook();

    crate::core::logging::install_console_logger();
    log::info!("letter jar engine {} initialized", env!("CARGO_PKG_VERSION"));
}

/// Get engine version
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Floats per body in the frame buffer
#[wasm_bindgen]
pub fn frame_stride() -> u32 {
    simulation::FRAME_STRIDE as u32
}

// Re-export main types
pub use domain::{JarConfig, JarGeometry, Letter, RunOverrides, Tier};
pub use simulation::{FrameLayout, Jar, JarCore, PerfStats, FRAME_STRIDE};
pub use systems::Body;
