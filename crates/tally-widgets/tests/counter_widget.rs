//! Stagger and visibility wiring through real [`CounterWidget`]s.

use tally_core::{assign_delays, CounterSpec, Easing, Rect, DEFAULT_VISIBILITY_THRESHOLD};
use tally_widgets::CounterWidget;

const FRAME_MS: u64 = 16;
const VIEWPORT: Rect = Rect::new(0.0, 0.0, 1280.0, 720.0);

fn mount(specs: Vec<CounterSpec>, stagger_ms: u64, bounds: &[Rect]) -> Vec<CounterWidget> {
    let delays = assign_delays(&specs, stagger_ms);
    specs
        .into_iter()
        .zip(delays)
        .zip(bounds)
        .map(|((spec, delay), bounds)| {
            CounterWidget::new(spec, delay, 1000, Easing::default(), DEFAULT_VISIBILITY_THRESHOLD)
                .with_bounds(*bounds)
        })
        .collect()
}

/// Runs frames and records the first timestamp each widget was seen running.
fn run(
    widgets: &mut [CounterWidget],
    frames: impl IntoIterator<Item = u64>,
    viewport: impl Fn(u64) -> Rect,
) -> Vec<Option<u64>> {
    let mut starts = vec![None; widgets.len()];
    for now in frames {
        for (start, widget) in starts.iter_mut().zip(widgets.iter_mut()) {
            widget.frame(now, viewport(now));
            if start.is_none() {
                *start = widget.engine().started_at();
            }
        }
    }
    starts
}

#[test]
fn stagger_with_simultaneous_triggers() {
    let specs = (0..3u64).map(|i| CounterSpec::new(i, "c", 500)).collect();
    let bounds = [
        Rect::new(0.0, 0.0, 200.0, 100.0),
        Rect::new(220.0, 0.0, 200.0, 100.0),
        Rect::new(440.0, 0.0, 200.0, 100.0),
    ];
    let mut widgets = mount(specs, 200, &bounds);

    let t0 = 1_000;
    let starts = run(&mut widgets, (t0..t0 + 2_000).step_by(FRAME_MS as usize), |_| VIEWPORT);

    assert_eq!(starts, vec![Some(t0), Some(t0 + 200), Some(t0 + 400)]);
    assert!(widgets.iter().all(|w| w.displayed() == 500));
}

#[test]
fn delay_counts_from_each_widgets_own_trigger() {
    let specs = (0..2u64).map(|i| CounterSpec::new(i, "c", 10)).collect();
    // The second counter sits far below the fold.
    let bounds = [
        Rect::new(0.0, 100.0, 200.0, 100.0),
        Rect::new(0.0, 3_000.0, 200.0, 100.0),
    ];
    let mut widgets = mount(specs, 300, &bounds);

    let starts = run(&mut widgets, (0..3_200).step_by(FRAME_MS as usize), |now| {
        if now < 1_600 {
            VIEWPORT
        } else {
            VIEWPORT.offset_y(2_600.0)
        }
    });

    assert_eq!(starts[0], Some(0));
    // Triggered on the frame at 1600 ms, then waited its own 300 ms.
    assert_eq!(starts[1], Some(1_600 + 300));
    assert!(widgets.iter().all(|w| w.displayed() == 10));
}

#[test]
fn hidden_counter_stays_at_zero() {
    let mut widgets = mount(
        vec![CounterSpec::new(1u64, "Years", 15)],
        0,
        &[Rect::new(0.0, 5_000.0, 200.0, 100.0)],
    );
    let starts = run(&mut widgets, (0..100).map(|i| i * FRAME_MS), |_| VIEWPORT);

    assert_eq!(starts, vec![None]);
    assert_eq!(widgets[0].displayed(), 0);
    assert!(!widgets[0].is_triggered());
    assert!(!widgets[0].is_animating());
}
