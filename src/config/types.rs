//! Configuration types and constant tables.
//!
//! Field names, environment variable pairs, defaults and bounds live here as
//! immutable tables; nothing in this module holds state.

use serde::{Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

/// File stem shared by every configuration file (`momo.jsonc`).
pub const TOOL_NAME: &str = "momo";

/// Prefix of the tool-specific environment variables (tier 1).
pub const PRIMARY_ENV_PREFIX: &str = "MOMO_PI";

/// Prefix of the family-wide environment variables (tier 2).
pub const SECONDARY_ENV_PREFIX: &str = "MOMO";

pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";
pub const DEFAULT_AUTO_RECALL: bool = true;
pub const DEFAULT_AUTO_CAPTURE: bool = true;
pub const DEFAULT_MAX_RECALL_RESULTS: u32 = 5;
pub const DEFAULT_PROFILE_FREQUENCY: u32 = 50;
pub const DEFAULT_DEBUG: bool = false;

/// Inclusive bounds for `maxRecallResults`.
pub const MAX_RECALL_RESULTS_RANGE: (u32, u32) = (1, 20);

/// Inclusive bounds for `profileFrequency`.
pub const PROFILE_FREQUENCY_RANGE: (u32, u32) = (1, 500);

/// Prefix of the container tag derived from the working directory.
pub const CONTAINER_TAG_PREFIX: &str = "pi";

/// A recognized configuration field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    BaseUrl,
    ApiKey,
    ContainerTag,
    AutoRecall,
    AutoCapture,
    MaxRecallResults,
    ProfileFrequency,
    Debug,
}

impl Field {
    /// Every field, in declaration order.
    pub const ALL: [Field; 8] = [
        Field::BaseUrl,
        Field::ApiKey,
        Field::ContainerTag,
        Field::AutoRecall,
        Field::AutoCapture,
        Field::MaxRecallResults,
        Field::ProfileFrequency,
        Field::Debug,
    ];

    /// Key used in configuration files.
    pub fn key(self) -> &'static str {
        match self {
            Field::BaseUrl => "baseUrl",
            Field::ApiKey => "apiKey",
            Field::ContainerTag => "containerTag",
            Field::AutoRecall => "autoRecall",
            Field::AutoCapture => "autoCapture",
            Field::MaxRecallResults => "maxRecallResults",
            Field::ProfileFrequency => "profileFrequency",
            Field::Debug => "debug",
        }
    }

    /// Look up a field by its file key. Matching is exact.
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.key() == key)
    }

    /// Environment variable suffix shared by both prefixes.
    fn env_suffix(self) -> &'static str {
        match self {
            Field::BaseUrl => "BASE_URL",
            Field::ApiKey => "API_KEY",
            Field::ContainerTag => "CONTAINER_TAG",
            Field::AutoRecall => "AUTO_RECALL",
            Field::AutoCapture => "AUTO_CAPTURE",
            Field::MaxRecallResults => "MAX_RECALL_RESULTS",
            Field::ProfileFrequency => "PROFILE_FREQUENCY",
            Field::Debug => "DEBUG",
        }
    }

    /// Tier 1 environment variable, e.g. `MOMO_PI_BASE_URL`.
    pub fn primary_env(self) -> String {
        format!("{}_{}", PRIMARY_ENV_PREFIX, self.env_suffix())
    }

    /// Tier 2 environment variable, e.g. `MOMO_BASE_URL`.
    pub fn secondary_env(self) -> String {
        format!("{}_{}", SECONDARY_ENV_PREFIX, self.env_suffix())
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl Serialize for Field {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.key())
    }
}

/// One of the two global configuration directories under the home directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GlobalTier {
    /// `~/.pi/momo.jsonc`
    Pi,
    /// `~/.momo/momo.jsonc`
    Momo,
}

impl GlobalTier {
    /// Directory name under the home directory, without the leading dot.
    pub fn dir_name(self) -> &'static str {
        match self {
            GlobalTier::Pi => "pi",
            GlobalTier::Momo => "momo",
        }
    }
}

/// Where a field's final value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    /// Built-in default (lowest priority)
    Default,
    /// `MOMO_PI_*` environment variable (highest priority)
    EnvPrimary,
    /// `MOMO_*` environment variable
    EnvSecondary,
    /// Project file in the working directory
    Project,
    /// `~/.pi/momo.jsonc`
    GlobalPi,
    /// `~/.momo/momo.jsonc`
    GlobalMomo,
}

impl Source {
    pub fn as_str(self) -> &'static str {
        match self {
            Source::Default => "default",
            Source::EnvPrimary => "env:MOMO_PI",
            Source::EnvSecondary => "env:MOMO",
            Source::Project => "project",
            Source::GlobalPi => "global:pi",
            Source::GlobalMomo => "global:momo",
        }
    }
}

impl From<GlobalTier> for Source {
    fn from(tier: GlobalTier) -> Self {
        match tier {
            GlobalTier::Pi => Source::GlobalPi,
            GlobalTier::Momo => Source::GlobalMomo,
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Source {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// The fully resolved configuration.
#[derive(Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedConfig {
    pub base_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    pub container_tag: String,
    pub auto_recall: bool,
    pub auto_capture: bool,
    pub max_recall_results: u32,
    pub profile_frequency: u32,
    pub debug: bool,
}

// Hand-written so the API key never ends up in logs.
impl fmt::Debug for ResolvedConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolvedConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("container_tag", &self.container_tag)
            .field("auto_recall", &self.auto_recall)
            .field("auto_capture", &self.auto_capture)
            .field("max_recall_results", &self.max_recall_results)
            .field("profile_frequency", &self.profile_frequency)
            .field("debug", &self.debug)
            .finish()
    }
}

/// Provenance record for one resolution call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigMetadata {
    /// Working directory used for project file lookup.
    pub cwd: PathBuf,
    /// Project file discovered on disk, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_file: Option<PathBuf>,
    /// `~/.pi/momo.jsonc`, if present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub global_pi_file: Option<PathBuf>,
    /// `~/.momo/momo.jsonc`, if present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub global_momo_file: Option<PathBuf>,
    /// Winning source for every field.
    pub sources: BTreeMap<Field, Source>,
}

impl ConfigMetadata {
    /// Source that supplied `field`.
    pub fn source_of(&self, field: Field) -> Source {
        self.sources.get(&field).copied().unwrap_or(Source::Default)
    }
}

/// A resolved configuration paired with the metadata describing it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resolution {
    pub config: ResolvedConfig,
    pub meta: ConfigMetadata,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_keys_roundtrip() {
        for field in Field::ALL {
            assert_eq!(Field::from_key(field.key()), Some(field));
        }
        assert_eq!(Field::from_key("baseurl"), None);
        assert_eq!(Field::from_key("typo"), None);
    }

    #[test]
    fn test_env_names() {
        assert_eq!(Field::BaseUrl.primary_env(), "MOMO_PI_BASE_URL");
        assert_eq!(Field::BaseUrl.secondary_env(), "MOMO_BASE_URL");
        assert_eq!(
            Field::MaxRecallResults.primary_env(),
            "MOMO_PI_MAX_RECALL_RESULTS"
        );
        assert_eq!(Field::Debug.secondary_env(), "MOMO_DEBUG");
    }

    #[test]
    fn test_source_tags() {
        assert_eq!(Source::EnvPrimary.to_string(), "env:MOMO_PI");
        assert_eq!(Source::GlobalMomo.to_string(), "global:momo");
        assert_eq!(Source::from(GlobalTier::Pi), Source::GlobalPi);
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let config = ResolvedConfig {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: Some("sk-secret".to_string()),
            container_tag: "pi_default".to_string(),
            auto_recall: true,
            auto_capture: true,
            max_recall_results: 5,
            profile_frequency: 50,
            debug: false,
        };
        let rendered = format!("{:?}", config);
        assert!(!rendered.contains("sk-secret"));
        assert!(rendered.contains("<redacted>"));
    }
}
