use letter_jar_engine::Jar;

#[test]
fn perf_smoke_step() {
    let letters: Vec<String> = (0..120)
        .map(|i| format!("\"{}\"", (b'a' + (i % 26) as u8) as char))
        .collect();
    let mut jar = Jar::new(400.0, 330.0, "{}", &format!("[{}]", letters.join(",")), 17);
    jar.enable_perf_metrics(true);
    for _ in 0..600 {
        jar.step(16.0);
    }
    let stats = jar.get_perf_stats();
    assert!(stats.step_ms() >= 0.0);
    assert!(stats.integrate_ms() >= 0.0);
    assert_eq!(stats.body_count(), jar.body_count());
    assert_eq!(stats.body_count() + stats.pending_spawns(), 120);
}
