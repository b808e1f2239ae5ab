use wasm_bindgen::prelude::*;

#[wasm_bindgen]
#[derive(Clone, Debug, Default)]
pub struct PerfStats {
    pub(super) step_ms: f64,
    pub(super) spawn_ms: f64,
    pub(super) integrate_ms: f64,
    pub(super) resolve_ms: f64,
    pub(super) evaluate_ms: f64,
    pub(super) body_count: u32,
    pub(super) resting_count: u32,
    pub(super) pending_spawns: u32,
    pub(super) contacts: u32,
    /// Bodies that came to rest this step (floor or contact)
    pub(super) promotions: u32,
    pub(super) demotions: u32,
}

impl PerfStats {
    pub(crate) fn reset(&mut self) {
        *self = PerfStats::default();
    }
}

#[wasm_bindgen]
impl PerfStats {
    #[wasm_bindgen(getter)]
    pub fn step_ms(&self) -> f64 { self.step_ms }
    #[wasm_bindgen(getter)]
    pub fn spawn_ms(&self) -> f64 { self.spawn_ms }
    #[wasm_bindgen(getter)]
    pub fn integrate_ms(&self) -> f64 { self.integrate_ms }
    #[wasm_bindgen(getter)]
    pub fn resolve_ms(&self) -> f64 { self.resolve_ms }
    #[wasm_bindgen(getter)]
    pub fn evaluate_ms(&self) -> f64 { self.evaluate_ms }
    #[wasm_bindgen(getter)]
    pub fn body_count(&self) -> u32 { self.body_count }
    #[wasm_bindgen(getter)]
    pub fn resting_count(&self) -> u32 { self.resting_count }
    #[wasm_bindgen(getter)]
    pub fn pending_spawns(&self) -> u32 { self.pending_spawns }
    #[wasm_bindgen(getter)]
    pub fn contacts(&self) -> u32 { self.contacts }
    #[wasm_bindgen(getter)]
    pub fn promotions(&self) -> u32 { self.promotions }
    #[wasm_bindgen(getter)]
    pub fn demotions(&self) -> u32 { self.demotions }
}
