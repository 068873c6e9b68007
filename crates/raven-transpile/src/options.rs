//! Operating modes supplied by the host.

use std::path::PathBuf;

/// Options for a [`Transpiler`](crate::Transpiler).
///
/// Defaults match an interactive terminal run: colorized errors, artifacts
/// surfaced in the log and written to the system temp directory.
#[derive(Debug, Clone)]
pub struct TranspileOptions {
    /// API mode: plain error text that also quotes the offending line.
    pub api_mode: bool,
    /// Log the debug artifact path at `warn` level when validation fails.
    pub reveal_artifact: bool,
    /// Directory for debug artifacts. `None` means the system temp dir.
    pub artifact_dir: Option<PathBuf>,
}

impl Default for TranspileOptions {
    fn default() -> Self {
        Self {
            api_mode: false,
            reveal_artifact: true,
            artifact_dir: None,
        }
    }
}

impl TranspileOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn api_mode(mut self, api_mode: bool) -> Self {
        self.api_mode = api_mode;
        self
    }

    pub fn reveal_artifact(mut self, reveal: bool) -> Self {
        self.reveal_artifact = reveal;
        self
    }

    pub fn artifact_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.artifact_dir = Some(dir.into());
        self
    }

    /// Directory debug artifacts are written to.
    pub fn resolved_artifact_dir(&self) -> PathBuf {
        self.artifact_dir.clone().unwrap_or_else(std::env::temp_dir)
    }
}
