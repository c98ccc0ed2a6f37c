//! Display configuration for the dispatcher
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults (name from argv[0], summary = name, no version)
//! 2. Values set through the builder methods
//! 3. Environment variables: `<PREFIX>_NAME`, `<PREFIX>_SUMMARY`, `<PREFIX>_VERSION`

use std::path::Path;

use config::{Config, ConfigError, Environment};
use serde::{Deserialize, Serialize};

use crate::errors::{DispatchError, DispatchResult};

/// Program name, one-line summary, and version shown in usage output.
///
/// Set once before dispatch and read-only afterwards.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct AppInfo {
    /// Program name used in usage lines and error hints
    pub name: String,
    /// First line of the top-level usage
    pub summary: String,
    /// Version text; empty means no `version` command is registered
    pub version: String,
}

impl Default for AppInfo {
    fn default() -> Self {
        Self::new(program_name())
    }
}

/// Base name of argv[0], or "app" when it is unavailable.
pub fn program_name() -> String {
    std::env::args_os()
        .next()
        .and_then(|arg0| {
            Path::new(&arg0)
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
        })
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| "app".to_string())
}

fn config_err(e: ConfigError) -> DispatchError {
    DispatchError::Config(e.to_string())
}

impl AppInfo {
    /// Summary defaults to the program name, version to empty.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            summary: name.clone(),
            name,
            version: String::new(),
        }
    }

    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = summary.into();
        self
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    /// True when a version string was configured.
    pub fn has_version(&self) -> bool {
        !self.version.is_empty()
    }

    /// Apply `<PREFIX>_*` environment variables as explicit overrides.
    ///
    /// Env vars replace values; unset variables keep the current value.
    pub fn apply_env_overrides(self, prefix: &str) -> DispatchResult<Self> {
        let config = Config::builder()
            .set_default("name", self.name)
            .map_err(config_err)?
            .set_default("summary", self.summary)
            .map_err(config_err)?
            .set_default("version", self.version)
            .map_err(config_err)?
            .add_source(Environment::with_prefix(prefix))
            .build()
            .map_err(config_err)?;

        config.try_deserialize().map_err(config_err)
    }
}
