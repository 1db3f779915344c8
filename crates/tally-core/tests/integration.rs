//! Integration tests for tally-core: record decoding, stagger delays, the
//! count-up engine and formatting used together.

use tally_core::{
    assign_delays, format_with_suffix, CountUp, CounterSpec, Easing, Locale, Rect,
    VisibilityActivator,
};

const FRAME_MS: u64 = 16;

#[test]
fn test_wire_records_to_formatted_final_values() {
    let specs: Vec<CounterSpec> = serde_json::from_str(
        r#"[
            {"id": 1, "label": "Years of Service", "value": 15},
            {"id": 2, "title": "Happy Seniors", "value": "1,200", "suffix": "+"},
            {"id": 3, "label": "Family Satisfaction", "value": 98, "suffix": "%"}
        ]"#,
    )
    .unwrap();

    let texts: Vec<String> = specs
        .iter()
        .map(|spec| {
            let mut engine = CountUp::new(
                spec.target_value(),
                spec.duration_or(2000),
                Easing::default(),
            );
            engine.start(0);
            engine.run((0..200).map(|i| i * FRAME_MS), |_| {});
            format_with_suffix(engine.value(), spec.suffix(), Locale::EnUs)
        })
        .collect();
    assert_eq!(texts, vec!["15", "1,200+", "98%"]);
}

#[test]
fn test_explicit_delay_overrides_stagger_slot() {
    let specs = vec![
        CounterSpec::new(1u64, "a", 1),
        CounterSpec::new(2u64, "b", 1).with_delay_ms(50),
        CounterSpec::new(3u64, "c", 1),
    ];
    assert_eq!(assign_delays(&specs, 200), vec![0, 50, 400]);
}

#[test]
fn test_scheduled_engines_start_in_stagger_order() {
    let specs: Vec<_> = (0..3u64).map(|i| CounterSpec::new(i, "c", 500)).collect();
    let mut engines: Vec<CountUp> = assign_delays(&specs, 200)
        .into_iter()
        .map(|delay| {
            let mut engine = CountUp::new(500, 1000, Easing::Linear);
            engine.start_at(1_000 + delay);
            engine
        })
        .collect();

    let mut starts = vec![None; engines.len()];
    for now in (1_000..3_000).step_by(FRAME_MS as usize) {
        for (start, engine) in starts.iter_mut().zip(&mut engines) {
            engine.frame(now);
            if start.is_none() {
                *start = engine.started_at();
            }
        }
    }
    assert_eq!(starts, vec![Some(1_000), Some(1_200), Some(1_400)]);
    assert!(engines.iter().all(|e| e.value() == 500));
}

#[test]
fn test_activator_fires_once_across_scrolling() {
    let bounds = Rect::new(0.0, 1_000.0, 200.0, 100.0);
    let mut activator = VisibilityActivator::default();
    let fired: Vec<bool> = [0.0, 500.0, 0.0, 600.0]
        .into_iter()
        .map(|scroll| activator.check(bounds, Rect::new(0.0, scroll, 1280.0, 720.0)))
        .collect();
    assert_eq!(fired, vec![false, true, false, false]);
    assert!(activator.is_triggered());
}
