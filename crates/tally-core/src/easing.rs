//! Easing curves for the count-up animation.
//!
//! Every curve maps `[0, 1]` onto `[0, 1]`, is non-decreasing, and fixes both
//! endpoints. Inputs outside the unit interval are clamped first.

use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Named easing functions supported by the count-up engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Easing {
    /// Constant speed
    Linear,
    /// Quadratic, slow start
    EaseInQuad,
    /// Quadratic, slow end
    EaseOutQuad,
    /// Quadratic, slow start and end
    EaseInOutQuad,
    /// Cubic, slow end
    #[default]
    EaseOutCubic,
    /// Cubic, slow start and end
    EaseInOutCubic,
}

impl Easing {
    /// All supported curves.
    pub const ALL: [Self; 6] = [
        Self::Linear,
        Self::EaseInQuad,
        Self::EaseOutQuad,
        Self::EaseInOutQuad,
        Self::EaseOutCubic,
        Self::EaseInOutCubic,
    ];

    /// Apply easing function to a normalized time value (0.0 to 1.0).
    #[must_use]
    pub fn apply(self, t: f64) -> f64 {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        let eased = match self {
            Self::Linear => t,
            Self::EaseInQuad => t * t,
            Self::EaseOutQuad => Self::ease_out_quad(t),
            Self::EaseInOutQuad => Self::ease_in_out_quad(t),
            Self::EaseOutCubic => Self::ease_out_cubic(t),
            Self::EaseInOutCubic => Self::ease_in_out_cubic(t),
        };
        eased.clamp(0.0, 1.0)
    }

    /// The camelCase name used in configuration and on the wire.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Linear => "linear",
            Self::EaseInQuad => "easeInQuad",
            Self::EaseOutQuad => "easeOutQuad",
            Self::EaseInOutQuad => "easeInOutQuad",
            Self::EaseOutCubic => "easeOutCubic",
            Self::EaseInOutCubic => "easeInOutCubic",
        }
    }

    fn ease_out_quad(t: f64) -> f64 {
        (1.0 - t).mul_add(-(1.0 - t), 1.0)
    }

    fn ease_in_out_quad(t: f64) -> f64 {
        if t < 0.5 {
            2.0 * t * t
        } else {
            1.0 - (-2.0f64).mul_add(t, 2.0).powi(2) / 2.0
        }
    }

    fn ease_out_cubic(t: f64) -> f64 {
        1.0 - (1.0 - t).powi(3)
    }

    fn ease_in_out_cubic(t: f64) -> f64 {
        if t < 0.5 {
            4.0 * t * t * t
        } else {
            1.0 - (-2.0f64).mul_add(t, 2.0).powi(3) / 2.0
        }
    }
}

impl fmt::Display for Easing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Easing {
    type Err = CoreError;

    /// Accepts the camelCase name (`easeOutCubic`) as well as kebab or snake
    /// case (`ease-out-cubic`, `ease_out_cubic`), ignoring ASCII case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let folded: String = s
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .map(|c| c.to_ascii_lowercase())
            .collect();
        Self::ALL
            .into_iter()
            .find(|e| e.name().eq_ignore_ascii_case(&folded))
            .ok_or_else(|| CoreError::UnknownEasing(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_default_is_ease_out_cubic() {
        assert_eq!(Easing::default(), Easing::EaseOutCubic);
    }

    #[test]
    fn test_endpoints_fixed() {
        for easing in Easing::ALL {
            assert_eq!(easing.apply(0.0), 0.0, "{easing} at 0");
            assert!((easing.apply(1.0) - 1.0).abs() < 1e-12, "{easing} at 1");
        }
    }

    #[test]
    fn test_input_clamped() {
        for easing in Easing::ALL {
            assert_eq!(easing.apply(-3.0), 0.0);
            assert!((easing.apply(7.0) - 1.0).abs() < 1e-12);
            assert_eq!(easing.apply(f64::NAN), 0.0);
        }
    }

    #[test]
    fn test_known_midpoints() {
        assert_eq!(Easing::Linear.apply(0.5), 0.5);
        assert_eq!(Easing::EaseInQuad.apply(0.5), 0.25);
        assert_eq!(Easing::EaseOutQuad.apply(0.5), 0.75);
        assert_eq!(Easing::EaseInOutQuad.apply(0.5), 0.5);
        assert_eq!(Easing::EaseOutCubic.apply(0.5), 0.875);
        assert_eq!(Easing::EaseInOutCubic.apply(0.5), 0.5);
    }

    #[test]
    fn test_parse_names() {
        assert_eq!("easeOutCubic".parse::<Easing>().unwrap(), Easing::EaseOutCubic);
        assert_eq!("ease-in-out-quad".parse::<Easing>().unwrap(), Easing::EaseInOutQuad);
        assert_eq!("EASE_IN_QUAD".parse::<Easing>().unwrap(), Easing::EaseInQuad);
        assert_eq!("linear".parse::<Easing>().unwrap(), Easing::Linear);
        assert!(matches!(
            "bounce".parse::<Easing>(),
            Err(CoreError::UnknownEasing(name)) if name == "bounce"
        ));
    }

    #[test]
    fn test_serde_camel_case() {
        let json = serde_json::to_string(&Easing::EaseInOutCubic).unwrap();
        assert_eq!(json, "\"easeInOutCubic\"");
        let back: Easing = serde_json::from_str("\"easeOutQuad\"").unwrap();
        assert_eq!(back, Easing::EaseOutQuad);
    }

    proptest! {
        #[test]
        fn prop_easing_monotonic_and_bounded(a in 0.0f64..=1.0, b in 0.0f64..=1.0) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            for easing in Easing::ALL {
                let y_lo = easing.apply(lo);
                let y_hi = easing.apply(hi);
                prop_assert!((0.0..=1.0).contains(&y_lo));
                prop_assert!((0.0..=1.0).contains(&y_hi));
                prop_assert!(y_lo <= y_hi + 1e-12, "{} not monotonic at {} -> {}", easing, lo, hi);
            }
        }
    }
}
