//! Configuration resolution with per-field precedence.
//!
//! Each field is resolved on its own, taking the first present value from:
//! 1. `MOMO_PI_*` environment variable
//! 2. `MOMO_*` environment variable
//! 3. Project file (`.momo.jsonc`, else `momo.jsonc`, in the working directory)
//! 4. `~/.pi/momo.jsonc`
//! 5. `~/.momo/momo.jsonc`
//! 6. Built-in default

use super::env::{EnvSource, ProcessEnv};
use super::files::{ConfigFile, DiscoveredFiles};
use super::normalize::{
    coerce_bool, coerce_bounded_int, interpolate, raw_string, sanitize_container_tag,
};
use super::types::*;
use crate::error::ConfigResult;
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Directories consulted during resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigPaths {
    /// Working directory holding the project file
    pub cwd: PathBuf,
    /// Home directory holding the global tiers, if known
    pub home: Option<PathBuf>,
}

impl ConfigPaths {
    /// Use `cwd` if given, otherwise the process working directory, and the
    /// user's home directory.
    pub fn discover(cwd: Option<&Path>) -> Self {
        let cwd = cwd
            .map(Path::to_path_buf)
            .or_else(|| std::env::current_dir().ok())
            .unwrap_or_else(|| PathBuf::from("."));

        Self {
            cwd,
            home: dirs::home_dir(),
        }
    }

    /// Create paths with explicit directories.
    pub fn with_dirs(cwd: &Path, home: Option<&Path>) -> Self {
        Self {
            cwd: cwd.to_path_buf(),
            home: home.map(Path::to_path_buf),
        }
    }

    /// Project file candidates in lookup order.
    pub fn project_candidates(&self) -> [PathBuf; 2] {
        [
            self.cwd.join(format!(".{TOOL_NAME}.jsonc")),
            self.cwd.join(format!("{TOOL_NAME}.jsonc")),
        ]
    }

    /// Location of a global tier's file, if the home directory is known.
    pub fn global_file(&self, tier: GlobalTier) -> Option<PathBuf> {
        self.home.as_ref().map(|home| {
            home.join(format!(".{}", tier.dir_name()))
                .join(format!("{TOOL_NAME}.jsonc"))
        })
    }

    /// Container tag used when no source sets one: `pi_<cwd basename>`.
    pub fn default_container_tag(&self) -> String {
        let base = self
            .cwd
            .file_name()
            .map(|name| sanitize_container_tag(&name.to_string_lossy()))
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| "default".to_string());
        format!("{CONTAINER_TAG_PREFIX}_{base}")
    }
}

/// Raw value chosen for a field, before normalization.
#[derive(Debug, Clone, PartialEq)]
pub enum RawValue {
    /// A value supplied by the environment or a file.
    Value(Value),
    /// No source had the field.
    Default,
}

/// The winning raw value of a field together with its source.
#[derive(Debug, Clone, PartialEq)]
pub struct Winner {
    pub source: Source,
    pub raw: RawValue,
}

type Probe<'a> = Box<dyn Fn(Field) -> Option<Value> + 'a>;

/// Resolves configuration for one set of paths and one environment.
pub struct ConfigResolver<E: EnvSource> {
    paths: ConfigPaths,
    env: E,
}

impl ConfigResolver<ProcessEnv> {
    /// Resolver over the live process environment.
    pub fn from_process(cwd: Option<&Path>) -> Self {
        Self::new(ConfigPaths::discover(cwd), ProcessEnv)
    }
}

impl<E: EnvSource> ConfigResolver<E> {
    pub fn new(paths: ConfigPaths, env: E) -> Self {
        Self { paths, env }
    }

    pub fn paths(&self) -> &ConfigPaths {
        &self.paths
    }

    /// Read all files and resolve every field.
    pub fn resolve(&self) -> ConfigResult<Resolution> {
        let files = DiscoveredFiles::discover(&self.paths);

        let mut sources = BTreeMap::new();
        let mut winners = BTreeMap::new();
        {
            let probes = self.probes(&files);
            for field in Field::ALL {
                let winner = pick(&probes, field);
                debug!(field = %field, source = %winner.source, "Resolved config field");
                sources.insert(field, winner.source);
                winners.insert(field, winner.raw);
            }
        }

        let config = self.normalize(&winners)?;
        let meta = ConfigMetadata {
            cwd: self.paths.cwd.clone(),
            project_file: files.project.map(|f| f.path),
            global_pi_file: files.global_pi.map(|f| f.path),
            global_momo_file: files.global_momo.map(|f| f.path),
            sources,
        };

        debug!(
            cwd = %meta.cwd.display(),
            base_url = %config.base_url,
            container_tag = %config.container_tag,
            "Configuration resolved"
        );

        Ok(Resolution { config, meta })
    }

    /// Ordered source probes, highest precedence first. The default tier is
    /// implicit and handled by [`pick`].
    fn probes<'a>(&'a self, files: &'a DiscoveredFiles) -> [(Source, Probe<'a>); 5] {
        let env_primary: Probe<'a> =
            Box::new(move |field: Field| self.env.var(&field.primary_env()).map(Value::String));
        let env_secondary: Probe<'a> =
            Box::new(move |field: Field| self.env.var(&field.secondary_env()).map(Value::String));
        let file_probe = |file: Option<&'a ConfigFile>| -> Probe<'a> {
            Box::new(move |field: Field| file.and_then(|f| f.get(field).cloned()))
        };

        [
            (Source::EnvPrimary, env_primary),
            (Source::EnvSecondary, env_secondary),
            (Source::Project, file_probe(files.project_file())),
            (Source::GlobalPi, file_probe(files.global_file(GlobalTier::Pi))),
            (Source::GlobalMomo, file_probe(files.global_file(GlobalTier::Momo))),
        ]
    }

    fn normalize(&self, winners: &BTreeMap<Field, RawValue>) -> ConfigResult<ResolvedConfig> {
        let raw = |field: Field| match winners.get(&field) {
            Some(RawValue::Value(value)) => Some(value),
            _ => None,
        };
        let text = |field: Field| -> ConfigResult<Option<String>> {
            raw(field)
                .and_then(raw_string)
                .map(|s| interpolate(field, &s, &self.env))
                .transpose()
        };
        let flag = |field: Field, default: bool| {
            raw(field).map_or(default, |value| coerce_bool(value, default))
        };
        let bounded = |field: Field, default: u32, (min, max): (u32, u32)| {
            raw(field).map_or(default, |value| coerce_bounded_int(value, default, min, max))
        };

        let base_url = text(Field::BaseUrl)?.unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let api_key = text(Field::ApiKey)?.filter(|key| !key.is_empty());
        let container_tag = text(Field::ContainerTag)?
            .map(|tag| sanitize_container_tag(&tag))
            .filter(|tag| !tag.is_empty())
            .unwrap_or_else(|| self.paths.default_container_tag());

        Ok(ResolvedConfig {
            base_url,
            api_key,
            container_tag,
            auto_recall: flag(Field::AutoRecall, DEFAULT_AUTO_RECALL),
            auto_capture: flag(Field::AutoCapture, DEFAULT_AUTO_CAPTURE),
            max_recall_results: bounded(
                Field::MaxRecallResults,
                DEFAULT_MAX_RECALL_RESULTS,
                MAX_RECALL_RESULTS_RANGE,
            ),
            profile_frequency: bounded(
                Field::ProfileFrequency,
                DEFAULT_PROFILE_FREQUENCY,
                PROFILE_FREQUENCY_RANGE,
            ),
            debug: flag(Field::Debug, DEFAULT_DEBUG),
        })
    }
}

/// First probe with a value wins; otherwise the default.
fn pick(probes: &[(Source, Probe<'_>)], field: Field) -> Winner {
    probes
        .iter()
        .find_map(|(source, probe)| {
            probe(field).map(|value| Winner {
                source: *source,
                raw: RawValue::Value(value),
            })
        })
        .unwrap_or(Winner {
            source: Source::Default,
            raw: RawValue::Default,
        })
}

/// Resolve configuration and provenance for `cwd` (or the process working
/// directory) against the live environment and filesystem.
pub fn resolve_config(cwd: Option<&str>) -> ConfigResult<Resolution> {
    ConfigResolver::from_process(cwd.map(Path::new)).resolve()
}

/// Like [`resolve_config`], returning only the configuration.
pub fn load_config(cwd: Option<&str>) -> ConfigResult<ResolvedConfig> {
    resolve_config(cwd).map(|resolution| resolution.config)
}
