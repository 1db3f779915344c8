//! Locale-aware integer formatting for counter labels.

use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Digit grouping conventions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Locale {
    /// `1,234,567`
    #[default]
    #[serde(rename = "en-US")]
    EnUs,
    /// `1.234.567`
    #[serde(rename = "de-DE")]
    DeDe,
    /// `1 234 567` with a narrow no-break space
    #[serde(rename = "fr-FR")]
    FrFr,
    /// `1234567`
    #[serde(rename = "plain")]
    Plain,
}

impl Locale {
    /// Thousands separator, if the locale groups digits.
    #[must_use]
    pub const fn group_separator(self) -> Option<char> {
        match self {
            Self::EnUs => Some(','),
            Self::DeDe => Some('.'),
            Self::FrFr => Some('\u{202F}'),
            Self::Plain => None,
        }
    }

    /// BCP 47 style tag.
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::EnUs => "en-US",
            Self::DeDe => "de-DE",
            Self::FrFr => "fr-FR",
            Self::Plain => "plain",
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for Locale {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "en" | "en-us" | "en-gb" => Ok(Self::EnUs),
            "de" | "de-de" => Ok(Self::DeDe),
            "fr" | "fr-fr" => Ok(Self::FrFr),
            "plain" | "none" => Ok(Self::Plain),
            _ => Err(CoreError::UnknownLocale(s.to_string())),
        }
    }
}

/// Format `value` with the locale's thousands separator.
#[must_use]
pub fn format_count(value: u64, locale: Locale) -> String {
    let digits = value.to_string();
    let Some(separator) = locale.group_separator() else {
        return digits;
    };

    let mut out = String::with_capacity(digits.len() + digits.len() / 3 * separator.len_utf8());
    let lead = digits.len() % 3;
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (i + 3 - lead) % 3 == 0 {
            out.push(separator);
        }
        out.push(ch);
    }
    out
}

/// Format a displayed value with its suffix appended verbatim.
#[must_use]
pub fn format_with_suffix(value: u64, suffix: &str, locale: Locale) -> String {
    let mut out = format_count(value, locale);
    out.push_str(suffix);
    out
}
