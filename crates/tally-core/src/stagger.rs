//! Staggered start delays for a row of counters.
//!
//! Widget `i` waits `i * stagger_ms` after its own visibility trigger, unless
//! its spec carries an explicit delay. Delays are relative to each widget's
//! trigger, never to page load.

use crate::counter::CounterSpec;

/// Default spacing between consecutive counter starts.
pub const DEFAULT_STAGGER_MS: u64 = 200;

/// Delay for the widget at `index`, preferring an explicit value.
#[must_use]
pub fn stagger_delay(index: usize, stagger_ms: u64, explicit_ms: Option<u64>) -> u64 {
    explicit_ms.unwrap_or_else(|| (index as u64).saturating_mul(stagger_ms))
}

/// Delays for an ordered batch, one per spec.
#[must_use]
pub fn assign_delays(specs: &[CounterSpec], stagger_ms: u64) -> Vec<u64> {
    specs
        .iter()
        .enumerate()
        .map(|(index, spec)| stagger_delay(index, stagger_ms, spec.animation_delay_ms()))
        .collect()
}
