use wasm_bindgen::prelude::*;

use crate::domain::{
    parse_letters, parse_letters_lossy, JarConfig, JarGeometry, Letter, RunOverrides,
};

use super::perf_stats::PerfStats;
use super::{JarCore, FRAME_STRIDE};

/// Where the renderer finds this frame's transfer buffers in wasm memory
#[wasm_bindgen]
pub struct FrameLayout {
    frame_ptr: u32,
    frame_len_elements: u32,
    frame_len_bytes: u32,
    colors_ptr: u32,
    colors_len_elements: u32,
    colors_len_bytes: u32,
    stride: u32,
}

#[wasm_bindgen]
impl FrameLayout {
    #[wasm_bindgen(getter)]
    pub fn frame_ptr(&self) -> u32 { self.frame_ptr }
    #[wasm_bindgen(getter)]
    pub fn frame_len_elements(&self) -> u32 { self.frame_len_elements }
    #[wasm_bindgen(getter)]
    pub fn frame_len_bytes(&self) -> u32 { self.frame_len_bytes }

    #[wasm_bindgen(getter)]
    pub fn colors_ptr(&self) -> u32 { self.colors_ptr }
    #[wasm_bindgen(getter)]
    pub fn colors_len_elements(&self) -> u32 { self.colors_len_elements }
    #[wasm_bindgen(getter)]
    pub fn colors_len_bytes(&self) -> u32 { self.colors_len_bytes }

    #[wasm_bindgen(getter)]
    pub fn stride(&self) -> u32 { self.stride }
}

#[wasm_bindgen]
pub struct Jar {
    core: JarCore,
}

#[wasm_bindgen]
impl Jar {
    /// Create a jar around (center_x, center_y). Both JSON inputs are read
    /// leniently; unreadable parts fall back to defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(
        center_x: f32,
        center_y: f32,
        config_json: &str,
        letters_json: &str,
        seed: u32,
    ) -> Self {
        Self::new_with_overrides(center_x, center_y, config_json, letters_json, seed, None, None)
    }

    /// Same as the constructor, with the debug-slider radius/font overrides
    #[wasm_bindgen(js_name = newWithOverrides)]
    pub fn new_with_overrides(
        center_x: f32,
        center_y: f32,
        config_json: &str,
        letters_json: &str,
        seed: u32,
        body_radius: Option<f32>,
        display_size: Option<f32>,
    ) -> Self {
        let config = JarConfig::from_json_lossy(config_json);
        let letters = parse_letters_lossy(letters_json);
        let overrides = RunOverrides { body_radius, display_size };
        Self {
            core: JarCore::new(
                config,
                JarGeometry::centered(center_x, center_y),
                letters,
                overrides,
                seed as u64,
            ),
        }
    }

    /// Advance by `delta_ms`. Returns true exactly once, on the step the jar settles.
    pub fn step(&mut self, delta_ms: f64) -> bool {
        self.core.step(delta_ms)
    }

    #[wasm_bindgen(getter)]
    pub fn settled(&self) -> bool { self.core.settled() }

    #[wasm_bindgen(getter)]
    pub fn frame(&self) -> u64 { self.core.frame() }

    #[wasm_bindgen(getter)]
    pub fn body_count(&self) -> u32 { self.core.body_count() as u32 }

    #[wasm_bindgen(getter)]
    pub fn resting_count(&self) -> u32 { self.core.resting_count() as u32 }

    #[wasm_bindgen(getter)]
    pub fn pending_spawns(&self) -> u32 { self.core.pending_spawns() as u32 }

    #[wasm_bindgen(getter)]
    pub fn body_radius(&self) -> f32 { self.core.body_radius() }

    #[wasm_bindgen(getter)]
    pub fn display_size(&self) -> f32 { self.core.display_size() }

    /// Effective config as JSON (camelCase keys)
    pub fn config_json(&self) -> String {
        self.core.config_json()
    }

    /// Restart with a new letter list (lenient)
    pub fn reset(&mut self, letters_json: &str) {
        self.core.reset(parse_letters_lossy(letters_json));
    }

    /// Restart with a new letter list, rejecting a malformed document
    pub fn load_letters(&mut self, letters_json: String) -> Result<(), JsValue> {
        let letters = parse_letters(&letters_json).map_err(|e| JsValue::from_str(&e))?;
        self.core.reset(letters);
        Ok(())
    }

    /// Queue one more letter; false once the jar is full
    pub fn enqueue_letter(
        &mut self,
        text: &str,
        color: Option<String>,
        tier: Option<String>,
    ) -> bool {
        self.core
            .enqueue(Letter::new(text, color.as_deref(), tier.as_deref()))
    }

    /// Place a letter directly at (x, y). Returns the body id.
    pub fn spawn_body_at(&mut self, x: f32, y: f32, vx: f32, vy: f32, text: &str) -> u32 {
        self.core.spawn_body_at(x, y, vx, vy, Letter::new(text, None, None))
    }

    #[wasm_bindgen(getter)]
    pub fn show_body_debug(&self) -> bool { self.core.show_body_debug() }

    pub fn set_show_body_debug(&mut self, show: bool) {
        self.core.set_show_body_debug(show);
    }

    /// Flip the collision-circle overlay (the B key); returns the new state
    pub fn toggle_show_body_debug(&mut self) -> bool {
        self.core.toggle_show_body_debug()
    }

    /// Enable or disable per-step perf metrics (adds timing overhead when enabled)
    pub fn enable_perf_metrics(&mut self, enabled: bool) {
        self.core.enable_perf_metrics(enabled);
    }

    /// Get last step perf snapshot (zeros when perf disabled)
    pub fn get_perf_stats(&self) -> PerfStats {
        self.core.get_perf_stats()
    }

    // === RENDER API ===

    /// Pack body state into the transfer buffers; returns the body count
    pub fn collect_frame(&mut self) -> u32 {
        self.core.collect_frame() as u32
    }

    pub fn frame_ptr(&self) -> *const f32 {
        self.core.frame_ptr()
    }

    pub fn frame_len(&self) -> usize {
        self.core.frame_len()
    }

    pub fn colors_ptr(&self) -> *const u32 {
        self.core.colors_ptr()
    }

    pub fn colors_len(&self) -> usize {
        self.core.colors_len()
    }

    pub fn frame_stride(&self) -> u32 {
        FRAME_STRIDE as u32
    }

    pub fn frame_layout(&self) -> FrameLayout {
        let frame_len = self.core.frame_len();
        let colors_len = self.core.colors_len();
        FrameLayout {
            frame_ptr: self.core.frame_ptr() as u32,
            frame_len_elements: frame_len as u32,
            frame_len_bytes: (frame_len * std::mem::size_of::<f32>()) as u32,
            colors_ptr: self.core.colors_ptr() as u32,
            colors_len_elements: colors_len as u32,
            colors_len_bytes: (colors_len * std::mem::size_of::<u32>()) as u32,
            stride: FRAME_STRIDE as u32,
        }
    }

    /// Glyph of body `index` as a one-character string (empty if out of range)
    pub fn glyph_at(&self, index: usize) -> String {
        self.core.glyph_at(index).map(String::from).unwrap_or_default()
    }

    /// CSS color of body `index` (empty if out of range)
    pub fn color_at(&self, index: usize) -> String {
        self.core.color_at(index).map(str::to_string).unwrap_or_default()
    }

    /// Tier name of body `index`, if the letter had one
    pub fn tier_at(&self, index: usize) -> Option<String> {
        self.core.tier_at(index).map(|t| t.name().to_string())
    }
}

impl Jar {
    /// Borrow the plain simulation (native hosts and tests)
    pub fn core(&self) -> &JarCore {
        &self.core
    }

    pub fn core_mut(&mut self) -> &mut JarCore {
        &mut self.core
    }
}
