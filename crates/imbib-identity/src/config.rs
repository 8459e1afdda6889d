//! Configuration for imbib-identity
//!
//! The resolver policy and the search cache settings. Hosts own storage and
//! editing of these values; this crate only reads them.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Whether preprint or publisher copies win when both are available
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SourcePriority {
    #[default]
    PreprintFirst,
    PublisherFirst,
}

/// User policy for picking a download URL
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PdfPolicy {
    pub source_priority: SourcePriority,
    pub proxy_enabled: bool,
    /// Prefix prepended verbatim to publisher URLs, e.g. an EZproxy login URL
    pub proxy_template: String,
}

impl PdfPolicy {
    pub fn new(source_priority: SourcePriority) -> Self {
        Self {
            source_priority,
            ..Self::default()
        }
    }

    pub fn with_proxy(mut self, template: impl Into<String>) -> Self {
        self.proxy_enabled = true;
        self.proxy_template = template.into();
        self
    }

    /// The proxy prefix to apply, if proxying is on and configured
    pub fn active_proxy(&self) -> Option<&str> {
        let template = self.proxy_template.trim();
        (self.proxy_enabled && !template.is_empty()).then_some(template)
    }
}

/// Search-result cache settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Entry lifetime in seconds
    pub ttl_seconds: u64,
    /// Maximum cached queries before the oldest is evicted
    pub max_entries: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl_seconds: 300,
            max_entries: 256,
        }
    }
}

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IdentityConfig {
    pub pdf: PdfPolicy,
    pub cache: CacheConfig,
}

impl IdentityConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from a TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Serialize configuration to TOML
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Load configuration from a JSON string
    pub fn from_json(json_str: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json_str)?)
    }

    /// Serialize configuration to JSON
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Validate configuration values.
    ///
    /// Advisory only: the resolver treats an enabled proxy with an empty
    /// template as "no proxy" regardless.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.pdf.proxy_enabled && self.pdf.proxy_template.trim().is_empty() {
            return Err(ConfigError::MissingField(
                "proxy_template is required when proxy_enabled is true".to_string(),
            ));
        }

        if self.cache.ttl_seconds == 0 {
            return Err(ConfigError::OutOfRange(
                "ttl_seconds must be positive".to_string(),
            ));
        }

        if self.cache.max_entries == 0 {
            return Err(ConfigError::OutOfRange(
                "max_entries must be positive".to_string(),
            ));
        }

        Ok(())
    }
}
