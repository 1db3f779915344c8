//! Counter data model.
//!
//! [`CounterRecord`] is the lenient wire shape served by the content API.
//! [`CounterSpec`] is the validated, immutable record a widget animates.
//! Conversion clamps out-of-range wire values instead of failing, so one bad
//! field never takes down the section around it.

use crate::color::Color;
use crate::error::CoreError;
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use tracing::warn;

/// Opaque counter identifier, stable across re-fetches.
///
/// The API serves ids as numbers or strings; both compare by their text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CounterId(String);

impl CounterId {
    /// Create an id from anything string-like.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The id text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CounterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<u64> for CounterId {
    fn from(id: u64) -> Self {
        Self(id.to_string())
    }
}

impl From<&str> for CounterId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl Serialize for CounterId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for CounterId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Int(i64),
            Text(String),
        }
        Ok(match Repr::deserialize(deserializer)? {
            Repr::Int(n) => Self(n.to_string()),
            Repr::Text(s) => Self(s),
        })
    }
}

/// How an icon reference is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IconKind {
    /// Glyph font class name, e.g. `fa fa-users`.
    #[default]
    Class,
    /// Image path or URL.
    Image,
}

impl FromStr for IconKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "class" | "icon" | "glyph" => Ok(Self::Class),
            "image" | "img" => Ok(Self::Image),
            _ => Err(CoreError::UnknownIconKind(s.to_string())),
        }
    }
}

impl IconKind {
    const fn wire_name(self) -> &'static str {
        match self {
            Self::Class => "class",
            Self::Image => "image",
        }
    }

    /// Guess the kind of an untyped icon reference.
    #[must_use]
    pub fn infer(reference: &str) -> Self {
        const IMAGE_EXTENSIONS: [&str; 6] = [".png", ".jpg", ".jpeg", ".svg", ".webp", ".gif"];
        let lower = reference.to_ascii_lowercase();
        if lower.contains('/') || IMAGE_EXTENSIONS.iter().any(|ext| lower.ends_with(ext)) {
            Self::Image
        } else {
            Self::Class
        }
    }
}

/// An icon reference with its interpretation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Icon {
    /// Interpretation of `reference`.
    pub kind: IconKind,
    /// Class name or image path.
    pub reference: String,
}

impl Icon {
    /// Glyph icon.
    #[must_use]
    pub fn class(name: impl Into<String>) -> Self {
        Self {
            kind: IconKind::Class,
            reference: name.into(),
        }
    }

    /// Image icon.
    #[must_use]
    pub fn image(path: impl Into<String>) -> Self {
        Self {
            kind: IconKind::Image,
            reference: path.into(),
        }
    }
}

/// One displayed metric. Immutable once built.
///
/// Serializes to and deserializes from the wire shape of [`CounterRecord`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "CounterRecord", into = "CounterRecord")]
pub struct CounterSpec {
    id: CounterId,
    label: String,
    target_value: u64,
    suffix: String,
    icon: Option<Icon>,
    color: Option<Color>,
    animation_duration_ms: Option<u64>,
    animation_delay_ms: Option<u64>,
    order: i32,
    active: bool,
}

impl CounterSpec {
    /// Create a counter. A negative target is a caller bug: it asserts in
    /// debug builds and is clamped to 0 otherwise.
    #[must_use]
    pub fn new(id: impl Into<CounterId>, label: impl Into<String>, target_value: i64) -> Self {
        debug_assert!(target_value >= 0, "counter target must be non-negative");
        Self {
            id: id.into(),
            label: label.into(),
            target_value: target_value.max(0) as u64,
            suffix: String::new(),
            icon: None,
            color: None,
            animation_duration_ms: None,
            animation_delay_ms: None,
            order: 0,
            active: true,
        }
    }

    /// Set the suffix appended after the number.
    #[must_use]
    pub fn with_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = suffix.into();
        self
    }

    /// Set the icon.
    #[must_use]
    pub fn with_icon(mut self, icon: Icon) -> Self {
        self.icon = Some(icon);
        self
    }

    /// Set the accent color.
    #[must_use]
    pub const fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    /// Set the animation duration. Zero asserts in debug builds and is ignored otherwise.
    #[must_use]
    pub fn with_duration_ms(mut self, duration_ms: u64) -> Self {
        debug_assert!(duration_ms > 0, "animation duration must be positive");
        self.animation_duration_ms = (duration_ms > 0).then_some(duration_ms);
        self
    }

    /// Set an explicit start delay, overriding stagger.
    #[must_use]
    pub const fn with_delay_ms(mut self, delay_ms: u64) -> Self {
        self.animation_delay_ms = Some(delay_ms);
        self
    }

    /// Set the display order.
    #[must_use]
    pub const fn with_order(mut self, order: i32) -> Self {
        self.order = order;
        self
    }

    /// Identifier.
    #[must_use]
    pub const fn id(&self) -> &CounterId {
        &self.id
    }

    /// Display name.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Final count.
    #[must_use]
    pub const fn target_value(&self) -> u64 {
        self.target_value
    }

    /// Suffix, possibly empty.
    #[must_use]
    pub fn suffix(&self) -> &str {
        &self.suffix
    }

    /// Icon, if any.
    #[must_use]
    pub const fn icon(&self) -> Option<&Icon> {
        self.icon.as_ref()
    }

    /// Accent color, if configured.
    #[must_use]
    pub const fn color(&self) -> Option<Color> {
        self.color
    }

    /// Configured duration, if any.
    #[must_use]
    pub const fn animation_duration_ms(&self) -> Option<u64> {
        self.animation_duration_ms
    }

    /// Configured duration or `default`.
    #[must_use]
    pub fn duration_or(&self, default: u64) -> u64 {
        self.animation_duration_ms.unwrap_or(default)
    }

    /// Explicit delay, if any.
    #[must_use]
    pub const fn animation_delay_ms(&self) -> Option<u64> {
        self.animation_delay_ms
    }

    /// Display order.
    #[must_use]
    pub const fn order(&self) -> i32 {
        self.order
    }

    /// Active flag as served by the source.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.active
    }
}

/// Counter as served by the content API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CounterRecord {
    /// Identifier (number or string)
    pub id: CounterId,
    /// Display name
    #[serde(alias = "title")]
    pub label: String,
    /// Target value
    #[serde(deserialize_with = "lenient_int")]
    pub value: i64,
    /// Suffix such as `+` or `%`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suffix: Option<String>,
    /// Icon class or image path
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    /// `class` or `image`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon_type: Option<String>,
    /// Hex accent color
    #[serde(default, alias = "color", skip_serializing_if = "Option::is_none")]
    pub icon_color: Option<String>,
    /// Display order
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<i32>,
    /// Active flag
    #[serde(default = "default_active")]
    pub is_active: bool,
    /// Duration override in milliseconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub animation_duration: Option<i64>,
    /// Delay override in milliseconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub animation_delay: Option<i64>,
}

const fn default_active() -> bool {
    true
}

fn lenient_int<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Int(i64),
        Float(f64),
        Text(String),
    }
    match Repr::deserialize(deserializer)? {
        Repr::Int(n) => Ok(n),
        Repr::Float(f) if f.is_finite() => Ok(f.trunc() as i64),
        Repr::Float(f) => Err(de::Error::custom(format!("non-finite counter value {f}"))),
        Repr::Text(s) => {
            let cleaned: String = s.chars().filter(|c| *c != ',' && *c != '_').collect();
            cleaned
                .trim()
                .parse::<i64>()
                .map_err(|_| de::Error::custom(format!("counter value is not an integer: {s:?}")))
        }
    }
}

impl From<CounterRecord> for CounterSpec {
    fn from(record: CounterRecord) -> Self {
        let id = record.id;
        if record.value < 0 {
            warn!(id = %id, value = record.value, "negative counter value clamped to 0");
        }

        let icon = record
            .icon
            .filter(|reference| !reference.trim().is_empty())
            .map(|reference| {
                let kind = match record.icon_type.as_deref().map(str::parse::<IconKind>) {
                    Some(Ok(kind)) => kind,
                    Some(Err(err)) => {
                        warn!(id = %id, error = %err, "inferring icon kind from reference");
                        IconKind::infer(&reference)
                    }
                    None => IconKind::infer(&reference),
                };
                Icon { kind, reference }
            });

        let color = record
            .icon_color
            .filter(|hex| !hex.trim().is_empty())
            .and_then(|hex| match Color::from_hex(&hex) {
                Ok(color) => Some(color),
                Err(err) => {
                    warn!(id = %id, color = %hex, error = %err, "ignoring unparseable counter color");
                    None
                }
            });

        let animation_duration_ms = match record.animation_duration {
            Some(ms) if ms > 0 => Some(ms as u64),
            Some(ms) => {
                warn!(id = %id, duration_ms = ms, "non-positive animation duration ignored");
                None
            }
            None => None,
        };

        Self {
            label: record.label,
            target_value: record.value.max(0) as u64,
            suffix: record.suffix.unwrap_or_default(),
            icon,
            color,
            animation_duration_ms,
            animation_delay_ms: record.animation_delay.map(|ms| ms.max(0) as u64),
            order: record.order.unwrap_or(0),
            active: record.is_active,
            id,
        }
    }
}

impl From<CounterSpec> for CounterRecord {
    fn from(spec: CounterSpec) -> Self {
        let (icon, icon_type) = match spec.icon {
            Some(icon) => (Some(icon.reference), Some(icon.kind.wire_name().to_string())),
            None => (None, None),
        };
        Self {
            id: spec.id,
            label: spec.label,
            value: i64::try_from(spec.target_value).unwrap_or(i64::MAX),
            suffix: (!spec.suffix.is_empty()).then_some(spec.suffix),
            icon,
            icon_type,
            icon_color: spec.color.map(|color| color.to_hex()),
            order: Some(spec.order),
            is_active: spec.active,
            animation_duration: spec
                .animation_duration_ms
                .map(|ms| i64::try_from(ms).unwrap_or(i64::MAX)),
            animation_delay: spec
                .animation_delay_ms
                .map(|ms| i64::try_from(ms).unwrap_or(i64::MAX)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> CounterRecord {
        serde_json::from_str(json).expect("valid record")
    }

    #[test]
    fn test_record_minimal() {
        let spec = CounterSpec::from(parse(r#"{"id": 1, "label": "Years", "value": 15}"#));
        assert_eq!(spec.id().as_str(), "1");
        assert_eq!(spec.label(), "Years");
        assert_eq!(spec.target_value(), 15);
        assert_eq!(spec.suffix(), "");
        assert!(spec.icon().is_none());
        assert!(spec.color().is_none());
        assert!(spec.is_active());
        assert_eq!(spec.order(), 0);
    }

    #[test]
    fn test_record_full() {
        let spec = CounterSpec::from(parse(
            r##"{
                "id": "happy", "title": "Happy Seniors", "value": "1,200",
                "suffix": "+", "icon": "fa fa-users", "icon_type": "class",
                "icon_color": "#2563eb", "order": 2, "is_active": true,
                "animation_duration": 1500, "animation_delay": 300,
                "created_at": "2024-01-01T00:00:00Z"
            }"##,
        ));
        assert_eq!(spec.id().as_str(), "happy");
        assert_eq!(spec.label(), "Happy Seniors");
        assert_eq!(spec.target_value(), 1200);
        assert_eq!(spec.suffix(), "+");
        assert_eq!(spec.icon(), Some(&Icon::class("fa fa-users")));
        assert_eq!(spec.color().map(|c| c.to_hex()), Some("#2563eb".to_string()));
        assert_eq!(spec.animation_duration_ms(), Some(1500));
        assert_eq!(spec.animation_delay_ms(), Some(300));
        assert_eq!(spec.order(), 2);
    }

    #[test]
    fn test_record_negative_values_clamped() {
        let spec = CounterSpec::from(parse(
            r#"{"id": 3, "label": "Broken", "value": -5, "animation_duration": 0, "animation_delay": -20}"#,
        ));
        assert_eq!(spec.target_value(), 0);
        assert_eq!(spec.animation_duration_ms(), None);
        assert_eq!(spec.animation_delay_ms(), Some(0));
    }

    #[test]
    fn test_record_icon_kind_inferred() {
        let image = CounterSpec::from(parse(
            r#"{"id": 1, "label": "A", "value": 1, "icon": "/media/counters/team.png"}"#,
        ));
        assert_eq!(image.icon().map(|i| i.kind), Some(IconKind::Image));

        let glyph = CounterSpec::from(parse(
            r#"{"id": 2, "label": "B", "value": 1, "icon": "bi bi-heart", "icon_type": "bogus"}"#,
        ));
        assert_eq!(glyph.icon().map(|i| i.kind), Some(IconKind::Class));
    }

    #[test]
    fn test_record_bad_color_ignored() {
        let spec = CounterSpec::from(parse(
            r#"{"id": 1, "label": "A", "value": 1, "color": "blue-ish", "icon": "  "}"#,
        ));
        assert!(spec.color().is_none());
        assert!(spec.icon().is_none());
    }

    #[test]
    fn test_record_missing_value_is_shape_error() {
        assert!(serde_json::from_str::<CounterRecord>(r#"{"id": 1, "label": "A"}"#).is_err());
        assert!(
            serde_json::from_str::<CounterRecord>(r#"{"id": 1, "label": "A", "value": "many"}"#)
                .is_err()
        );
    }

    #[test]
    fn test_spec_deserializes_through_record() {
        let specs: Vec<CounterSpec> = serde_json::from_str(
            r#"[{"id": 1, "label": "Years", "value": 15}, {"id": 2, "title": "Beds", "value": "40"}]"#,
        )
        .unwrap();
        assert_eq!(specs[0].target_value(), 15);
        assert_eq!(specs[1].label(), "Beds");
        assert_eq!(specs[1].target_value(), 40);
    }

    #[test]
    fn test_spec_serializes_in_wire_shape() {
        let spec = CounterSpec::new(4u64, "Happy Seniors", 1200)
            .with_suffix("+")
            .with_icon(Icon::class("fa fa-users"))
            .with_color(Color::from_hex("#2563eb").unwrap())
            .with_order(2);
        let json = serde_json::to_value(&spec).unwrap();
        assert_eq!(json["id"], "4");
        assert_eq!(json["label"], "Happy Seniors");
        assert_eq!(json["value"], 1200);
        assert_eq!(json["suffix"], "+");
        assert_eq!(json["icon_type"], "class");
        assert_eq!(json["icon_color"], "#2563eb");
        assert!(json.get("target_value").is_none());

        let back: CounterSpec = serde_json::from_value(json).unwrap();
        assert_eq!(back, spec);
    }

    #[test]
    fn test_float_value_truncated() {
        let record = parse(r#"{"id": 1, "label": "A", "value": 99.9}"#);
        assert_eq!(record.value, 99);
    }

    #[test]
    fn test_counter_id_serializes_as_string() {
        let id: CounterId = serde_json::from_str("42").unwrap();
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"42\"");
        assert_eq!(id, CounterId::from(42));
    }

    #[test]
    fn test_builder() {
        let spec = CounterSpec::new(7u64, "Projects", 350)
            .with_suffix("%")
            .with_icon(Icon::image("/img/p.svg"))
            .with_color(Color::ACCENT)
            .with_duration_ms(1200)
            .with_delay_ms(50)
            .with_order(4);
        assert_eq!(spec.target_value(), 350);
        assert_eq!(spec.duration_or(2000), 1200);
        assert_eq!(spec.animation_delay_ms(), Some(50));
        assert_eq!(spec.order(), 4);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "non-negative")]
    fn test_negative_target_asserts_in_debug() {
        let _ = CounterSpec::new(1u64, "Bad", -1);
    }

    #[test]
    fn test_icon_kind_parse() {
        assert_eq!("Image".parse::<IconKind>().unwrap(), IconKind::Image);
        assert_eq!("class".parse::<IconKind>().unwrap(), IconKind::Class);
        assert!("svg-sprite".parse::<IconKind>().is_err());
    }
}
