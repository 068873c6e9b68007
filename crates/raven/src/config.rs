//! Configuration for the raven CLI.
//!
//! Loads config from:
//! 1. Global: ~/.config/raven/config.toml
//! 2. Per-project: .raven/config.toml (overrides global)
//!
//! Example config.toml:
//! ```toml
//! [output]
//! dist = true
//! dist_dir = "build"
//!
//! [validate]
//! api = false
//! reveal_artifact = true
//! ```

use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const DEFAULT_DIST_DIR: &str = "dist";

/// Where transpiled files are written.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct OutputConfig {
    /// Write into `<source dir>/<dist_dir>/` instead of beside the source.
    pub dist: Option<bool>,
    pub dist_dir: Option<String>,
}

impl OutputConfig {
    pub fn dist(&self) -> bool {
        self.dist.unwrap_or(false)
    }

    pub fn dist_dir(&self) -> &str {
        self.dist_dir.as_deref().unwrap_or(DEFAULT_DIST_DIR)
    }
}

/// How validation failures are reported.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct ValidateConfig {
    /// Plain-text reports that quote the offending generated line.
    pub api: Option<bool>,
    /// Announce the debug artifact path when validation fails.
    pub reveal_artifact: Option<bool>,
}

impl ValidateConfig {
    pub fn api(&self) -> bool {
        self.api.unwrap_or(false)
    }

    pub fn reveal_artifact(&self) -> bool {
        self.reveal_artifact.unwrap_or(true)
    }
}

/// Root configuration structure.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RavenConfig {
    pub output: OutputConfig,
    pub validate: ValidateConfig,
}

impl RavenConfig {
    /// Load configuration for a project.
    ///
    /// Loads global config from ~/.config/raven/config.toml,
    /// then merges with per-project config from .raven/config.toml.
    pub fn load(root: &Path) -> Self {
        let mut config = Self::default();

        if let Some(global_path) = Self::global_config_path()
            && let Some(global) = Self::load_file(&global_path)
        {
            config = config.merge(global);
        }

        let project_path = root.join(".raven").join("config.toml");
        if let Some(project) = Self::load_file(&project_path) {
            config = config.merge(project);
        }

        config
    }

    fn global_config_path() -> Option<PathBuf> {
        let config_home = std::env::var("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .ok()
            .or_else(|| dirs::home_dir().map(|h| h.join(".config")))?;
        Some(config_home.join("raven").join("config.toml"))
    }

    /// A missing file is silently skipped; a malformed one is logged and skipped.
    fn load_file(path: &Path) -> Option<Self> {
        let content = std::fs::read_to_string(path).ok()?;
        match toml::from_str(&content) {
            Ok(config) => Some(config),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "ignoring malformed config");
                None
            }
        }
    }

    /// Fields set in `other` take precedence; unset ones keep `self`'s value.
    fn merge(self, other: Self) -> Self {
        Self {
            output: OutputConfig {
                dist: other.output.dist.or(self.output.dist),
                dist_dir: other.output.dist_dir.or(self.output.dist_dir),
            },
            validate: ValidateConfig {
                api: other.validate.api.or(self.validate.api),
                reveal_artifact: other
                    .validate
                    .reveal_artifact
                    .or(self.validate.reveal_artifact),
            },
        }
    }
}
