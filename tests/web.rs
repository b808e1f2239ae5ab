//! Browser smoke test: `wasm-pack test --headless --chrome`
#![cfg(target_arch = "wasm32")]

use letter_jar_engine::{init, Jar};
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
fn jar_steps_in_the_browser() {
    init();
    let mut jar = Jar::new(200.0, 200.0, "{}", r#"["w", "a", "s", "m"]"#, 3);
    jar.enable_perf_metrics(true);
    for _ in 0..120 {
        jar.step(16.0);
    }
    assert_eq!(jar.body_count(), 4);
    assert!(jar.get_perf_stats().step_ms() >= 0.0);
    assert_eq!(jar.collect_frame(), 4);
    assert!(!jar.frame_ptr().is_null());
}

#[wasm_bindgen_test]
fn strict_letter_loading_rejects_garbage() {
    let mut jar = Jar::new(200.0, 200.0, "{}", "[]", 1);
    assert!(jar.load_letters("{oops".to_string()).is_err());
    assert!(jar.load_letters(r#"["o", "k"]"#.to_string()).is_ok());
    assert_eq!(jar.pending_spawns(), 2);
}
