//! Shared building blocks: vector math and the console log bridge.

pub mod logging;
pub mod vec2;

pub use vec2::Vec2;
