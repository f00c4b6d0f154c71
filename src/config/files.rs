//! Configuration file discovery and loading.
//!
//! Files are fail-soft: a file that cannot be read, parsed or validated is
//! logged and then treated as if it did not exist.

use super::jsonc::strip_jsonc;
use super::loader::ConfigPaths;
use super::types::{Field, GlobalTier};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Why a configuration file was ignored.
#[derive(Debug, thiserror::Error)]
pub enum FileRejection {
    #[error("failed to read file: {0}")]
    Read(#[from] std::io::Error),

    #[error("invalid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("top level must be an object")]
    NotAnObject,

    #[error("unknown key '{0}'")]
    UnknownKey(String),
}

/// Parsed and validated contents of one configuration file.
///
/// Holds only recognized keys; values are kept raw until normalization.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigFile {
    values: Map<String, Value>,
}

impl ConfigFile {
    /// Validate a parsed JSON value. Any unknown key rejects the whole file.
    pub fn from_value(value: Value) -> Result<Self, FileRejection> {
        let Value::Object(values) = value else {
            return Err(FileRejection::NotAnObject);
        };
        if let Some(unknown) = values.keys().find(|k| Field::from_key(k).is_none()) {
            return Err(FileRejection::UnknownKey(unknown.clone()));
        }
        Ok(Self { values })
    }

    /// Parse relaxed JSON text.
    pub fn parse(content: &str) -> Result<Self, FileRejection> {
        let value: Value = serde_json::from_str(&strip_jsonc(content))?;
        Self::from_value(value)
    }

    /// Raw value for `field`. A key set to `null` is still present.
    pub fn get(&self, field: Field) -> Option<&Value> {
        self.values.get(field.key())
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// A configuration file found on disk.
#[derive(Debug, Clone)]
pub struct FoundFile {
    /// Where the file was found
    pub path: PathBuf,
    /// Parsed contents, or `None` if the file was rejected
    pub file: Option<ConfigFile>,
}

impl FoundFile {
    fn load(path: PathBuf) -> Self {
        let file = match load_config_file(&path) {
            Ok(file) => {
                debug!(path = %path.display(), "Loaded config file");
                Some(file)
            }
            Err(reason) => {
                warn!(path = %path.display(), reason = %reason, "Ignoring config file");
                None
            }
        };
        Self { path, file }
    }
}

/// Files found for every file tier during one resolution.
#[derive(Debug, Clone, Default)]
pub struct DiscoveredFiles {
    pub project: Option<FoundFile>,
    pub global_pi: Option<FoundFile>,
    pub global_momo: Option<FoundFile>,
}

impl DiscoveredFiles {
    /// Locate and load every configuration file for `paths`.
    pub fn discover(paths: &ConfigPaths) -> Self {
        let project = paths
            .project_candidates()
            .into_iter()
            .find(|candidate| candidate.is_file())
            .map(FoundFile::load);

        let global = |tier: GlobalTier| {
            paths
                .global_file(tier)
                .filter(|path| path.is_file())
                .map(FoundFile::load)
        };

        Self {
            project,
            global_pi: global(GlobalTier::Pi),
            global_momo: global(GlobalTier::Momo),
        }
    }

    /// Accepted project file contents.
    pub fn project_file(&self) -> Option<&ConfigFile> {
        self.project.as_ref().and_then(|f| f.file.as_ref())
    }

    /// Accepted contents of a global tier.
    pub fn global_file(&self, tier: GlobalTier) -> Option<&ConfigFile> {
        let found = match tier {
            GlobalTier::Pi => &self.global_pi,
            GlobalTier::Momo => &self.global_momo,
        };
        found.as_ref().and_then(|f| f.file.as_ref())
    }
}

/// Read, sanitize, parse and validate one configuration file.
pub fn load_config_file(path: &Path) -> Result<ConfigFile, FileRejection> {
    let content = std::fs::read_to_string(path)?;
    ConfigFile::parse(&content)
}
