//! `brrtdispatch.toml` configuration for the generator CLI.
//!
//! ```toml
//! [generator]
//! min_arity = 0
//! max_arity = 6
//!
//! [logging]
//! level = "info"
//! format = "json"
//! ```
//!
//! Both tables are optional. Command-line flags override file values.

use crate::logging::LogConfig;
use anyhow::Context;
use brrtdispatch_codegen::GeneratorConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// File looked up in the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "brrtdispatch.toml";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DispatchGenConfig {
    pub generator: GeneratorConfig,
    pub logging: LogConfig,
}

impl DispatchGenConfig {
    /// Load and parse a config file.
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be read or is not valid config TOML.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        Self::parse(&contents)
            .with_context(|| format!("Failed to parse config: {}", path.display()))
    }

    /// # Errors
    ///
    /// Fails on invalid TOML or unknown keys.
    pub fn parse(contents: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Load the explicit path if given, else [`DEFAULT_CONFIG_FILE`] in `dir`
    /// when present, else the defaults.
    ///
    /// # Errors
    ///
    /// An explicit path that does not exist is an error; so is any file that
    /// fails to parse.
    pub fn resolve(explicit: Option<&Path>, dir: &Path) -> anyhow::Result<Self> {
        match resolve_config_path(explicit, dir) {
            Some(path) => Self::load(&path),
            None => Ok(Self::default()),
        }
    }

    /// Apply `--min-arity` / `--max-arity` on top of the file values.
    #[must_use]
    pub fn with_arity_overrides(mut self, min: Option<usize>, max: Option<usize>) -> Self {
        if let Some(min) = min {
            self.generator.min_arity = min;
        }
        if let Some(max) = max {
            self.generator.max_arity = max;
        }
        self
    }
}

fn resolve_config_path(explicit: Option<&Path>, dir: &Path) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }
    let candidate = dir.join(DEFAULT_CONFIG_FILE);
    candidate.exists().then_some(candidate)
}
