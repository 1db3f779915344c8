//! Built-in counter dataset shown when the live source is unavailable.

use std::sync::Arc;
use tally_core::{Color, CounterSpec, Icon};
use tracing::warn;

struct Row {
    id: u64,
    label: &'static str,
    value: i64,
    suffix: &'static str,
    icon: &'static str,
    color: &'static str,
}

const DEFAULT_COUNTERS: &[Row] = &[
    Row {
        id: 1,
        label: "Years of Service",
        value: 15,
        suffix: "",
        icon: "fa fa-calendar-check",
        color: "#2563eb",
    },
    Row {
        id: 2,
        label: "Happy Seniors",
        value: 1200,
        suffix: "+",
        icon: "fa fa-face-smile",
        color: "#16a34a",
    },
    Row {
        id: 3,
        label: "Trained Caregivers",
        value: 85,
        suffix: "+",
        icon: "fa fa-user-nurse",
        color: "#db2777",
    },
    Row {
        id: 4,
        label: "Family Satisfaction",
        value: 98,
        suffix: "%",
        icon: "fa fa-heart",
        color: "#ea580c",
    },
];

/// The default counters, in display order.
#[must_use]
pub fn default_counters() -> Arc<[CounterSpec]> {
    DEFAULT_COUNTERS
        .iter()
        .zip(0..)
        .map(|(row, order)| {
            let spec = CounterSpec::new(row.id, row.label, row.value)
                .with_suffix(row.suffix)
                .with_icon(Icon::class(row.icon))
                .with_order(order);
            match Color::from_hex(row.color) {
                Ok(color) => spec.with_color(color),
                Err(err) => {
                    warn!(
                        id = row.id,
                        color = row.color,
                        error = %err,
                        "default counter color ignored"
                    );
                    spec
                }
            }
        })
        .collect()
}
