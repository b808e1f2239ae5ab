//! Domain inputs: configuration, letters and jar geometry.

pub mod bounds;
pub mod config;
pub mod letter;

pub use bounds::{Bounds, JarGeometry, SpawnArea};
pub use config::{JarConfig, RunOverrides, Tuning};
pub use letter::{parse_letters, parse_letters_lossy, Letter, Tier};
