//! Audit configuration loaded from TOML.
//!
//! ```toml
//! [taxonomy]
//! required_types = ["focus_master", "weekly_marathon"]
//! deprecated_types = ["share_stats"]
//!
//! [normalization]
//! value_policy = "numeric"
//! ```

use anyhow::Context;
use badge_catalog::{ConsistencyEngine, Taxonomy, ValuePolicy};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Top-level configuration file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AuditConfig {
    /// Expected criteria-type vocabulary.
    #[serde(default)]
    pub taxonomy: Taxonomy,
    /// Value comparison settings.
    #[serde(default)]
    pub normalization: NormalizationConfig,
}

/// `[normalization]` table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NormalizationConfig {
    /// How criteria values are compared.
    #[serde(default)]
    pub value_policy: ValuePolicy,
}

impl AuditConfig {
    /// Parse configuration text. Taxonomy errors surface here.
    pub fn from_toml_str(text: &str) -> anyhow::Result<Self> {
        toml::from_str(text).context("Invalid audit configuration")
    }

    /// Load configuration from a file.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_toml_str(&text)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    /// Apply command-line overrides on top of the file.
    pub fn with_overrides(
        mut self,
        require: &[String],
        deprecate: &[String],
        value_policy: Option<ValuePolicy>,
    ) -> anyhow::Result<Self> {
        if !require.is_empty() || !deprecate.is_empty() {
            self.taxonomy = self
                .taxonomy
                .extended(require.iter().cloned(), deprecate.iter().cloned())
                .context("Invalid taxonomy overrides")?;
        }
        if let Some(policy) = value_policy {
            self.normalization.value_policy = policy;
        }
        Ok(self)
    }

    /// Engine configured from this file.
    pub fn engine(&self) -> ConsistencyEngine {
        ConsistencyEngine::new(self.taxonomy.clone())
            .with_value_policy(self.normalization.value_policy)
    }
}
