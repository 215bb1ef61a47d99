//! Resolver configuration
//!
//! Configuration is plain data with defaults for every field, so a partial
//! JSON document is enough:
//!
//! ```json
//! { "version": 1, "missing_segment": "not_found" }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// What to do when a segment names nothing inside the current block
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingSegmentPolicy {
    /// Stop walking and return the rest of the path as the remainder
    #[default]
    Remainder,
    /// Fail the resolution
    NotFound,
}

/// Errors that can occur while loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Document is not valid JSON for this format
    #[error("Failed to parse resolver config: {0}")]
    Parse(#[from] serde_json::Error),

    /// Document was written by an unknown format version
    #[error("Unsupported resolver config version: {0}")]
    UnsupportedVersion(u32),

    /// A value is outside its allowed range
    #[error("Invalid resolver config: {0}")]
    Invalid(String),
}

/// Settings for path resolution
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Version of the config format
    pub version: u32,
    /// Behavior when a segment does not exist
    pub missing_segment: MissingSegmentPolicy,
    /// Maximum number of links followed in one resolution
    pub max_depth: usize,
}

impl ResolverConfig {
    /// Current version of the config format
    pub const CURRENT_VERSION: u32 = 1;

    /// Default bound on links followed per resolution
    pub const DEFAULT_MAX_DEPTH: usize = 4096;

    /// Creates the default configuration
    pub fn new() -> Self {
        Self {
            version: Self::CURRENT_VERSION,
            missing_segment: MissingSegmentPolicy::default(),
            max_depth: Self::DEFAULT_MAX_DEPTH,
        }
    }

    /// Sets the missing-segment policy
    pub fn with_missing_segment(mut self, policy: MissingSegmentPolicy) -> Self {
        self.missing_segment = policy;
        self
    }

    /// Sets the link-depth bound
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Parses and validates a JSON document
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Serializes this configuration to JSON
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Checks that every value is usable
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.version != Self::CURRENT_VERSION {
            return Err(ConfigError::UnsupportedVersion(self.version));
        }
        if self.max_depth == 0 {
            return Err(ConfigError::Invalid(
                "max_depth must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self::new()
    }
}
