//! Layered configuration: defaults, then a TOML file, then `TALLY_*`
//! environment variables (nested keys split on `__`).

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tally_widgets::SectionConfig;
use thiserror::Error;

/// File read when `--config` is not given. Missing is fine.
pub(crate) const DEFAULT_CONFIG_FILE: &str = "tally.toml";

/// Environment prefix.
pub(crate) const ENV_PREFIX: &str = "TALLY_";

/// Configuration errors.
#[derive(Debug, Error)]
pub(crate) enum ConfigError {
    /// A provider failed or a value had the wrong type
    #[error("failed to load configuration: {0}")]
    Load(#[from] Box<figment::Error>),

    /// Values parsed but are unusable
    #[error("invalid configuration: {0}")]
    Invalid(String),

    /// Default config could not be rendered
    #[error("failed to render configuration: {0}")]
    Render(#[from] toml::ser::Error),
}

/// API paths for each content section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct Endpoints {
    /// Counters
    pub(crate) counters: String,
    /// Hero slides
    pub(crate) slides: String,
    /// Blog teasers
    pub(crate) blogs: String,
    /// Feature tiles
    pub(crate) features: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            counters: "/api/counters/".to_string(),
            slides: "/api/sliders/".to_string(),
            blogs: "/api/blogs/".to_string(),
            features: "/api/why-choose-us/".to_string(),
        }
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct TallyConfig {
    /// Content API root
    pub(crate) api_base_url: String,
    /// Per-request timeout in seconds
    pub(crate) timeout_secs: u64,
    /// Section endpoints
    pub(crate) endpoints: Endpoints,
    /// Counter section settings
    pub(crate) section: SectionConfig,
}

impl Default for TallyConfig {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:8000".to_string(),
            timeout_secs: 10,
            endpoints: Endpoints::default(),
            section: SectionConfig::default(),
        }
    }
}

impl TallyConfig {
    /// Load from `path` (or [`DEFAULT_CONFIG_FILE`]) and the environment.
    pub(crate) fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let file = path.unwrap_or_else(|| Path::new(DEFAULT_CONFIG_FILE));
        Self::from_figment(Self::figment(file))
    }

    /// Provider stack for `file`.
    pub(crate) fn figment(file: &Path) -> Figment {
        Figment::from(Serialized::defaults(Self::default()))
            .merge(Toml::file(file))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Extract and validate.
    pub(crate) fn from_figment(figment: Figment) -> Result<Self, ConfigError> {
        let config: Self = figment.extract().map_err(Box::new)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values no component can work with.
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.api_base_url.trim().is_empty() {
            return Err(ConfigError::Invalid("api_base_url must not be empty".into()));
        }
        if self.timeout_secs == 0 {
            return Err(ConfigError::Invalid("timeout_secs must be positive".into()));
        }
        let threshold = self.section.visibility_threshold;
        if !(threshold > 0.0 && threshold <= 1.0) {
            return Err(ConfigError::Invalid(format!(
                "section.visibility_threshold must be in (0, 1], got {threshold}"
            )));
        }
        if self.section.animation_duration_ms == 0 {
            return Err(ConfigError::Invalid(
                "section.animation_duration_ms must be positive".into(),
            ));
        }
        Ok(())
    }

    /// Request timeout.
    #[must_use]
    pub(crate) const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Defaults as TOML.
    pub(crate) fn default_toml() -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(&Self::default())?)
    }
}
