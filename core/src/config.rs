//! Configuration
//!
//! Settings are layered, later sources winning:
//!
//! 1. built-in defaults
//! 2. a TOML file: the explicit path, else `COGEN_CONFIG_PATH`, else an
//!    optional `cogen.toml` in the working directory
//! 3. `COGEN_*` environment variables, `__` separating nested keys
//!    (`COGEN_COMPILE__OPTIMIZE=false`)
//! 4. builder overrides

use crate::compiler::CompileOptions;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub compile: CompileOptions,
    pub run: RunSettings,
}

/// Defaults for `cogen run`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunSettings {
    /// Function started when none is given
    pub entry: String,
    /// Stop after this many values
    pub limit: Option<usize>,
}

impl Default for RunSettings {
    fn default() -> Self {
        Self {
            entry: "main".to_string(),
            limit: None,
        }
    }
}

impl Config {
    /// Load from the default sources
    pub fn load() -> Result<Self, ConfigError> {
        Self::builder().build()
    }

    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }
}

#[derive(Debug, Default)]
pub struct ConfigBuilder {
    config_path: Option<PathBuf>,
    optimize: Option<bool>,
    limit: Option<usize>,
}

impl ConfigBuilder {
    pub fn config_path(mut self, path: Option<PathBuf>) -> Self {
        self.config_path = path;
        self
    }

    pub fn optimize(mut self, optimize: Option<bool>) -> Self {
        self.optimize = optimize;
        self
    }

    pub fn limit(mut self, limit: Option<usize>) -> Self {
        self.limit = limit;
        self
    }

    pub fn build(self) -> Result<Config, ConfigError> {
        let path = self
            .config_path
            .or_else(|| std::env::var_os("COGEN_CONFIG_PATH").map(PathBuf::from));

        let file = match path {
            Some(path) => config::File::from(path).required(true),
            None => config::File::with_name("cogen").required(false),
        };
        let settings = config::Config::builder()
            .add_source(file)
            .add_source(
                config::Environment::with_prefix("COGEN")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let mut config: Config = settings.try_deserialize()?;
        if let Some(optimize) = self.optimize {
            config.compile.optimize = optimize;
        }
        if self.limit.is_some() {
            config.run.limit = self.limit;
        }
        Ok(config)
    }
}
