use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::mdm::InputOnlyMatch;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config {origin}: {source}")]
    Parse {
        origin: String,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub registry: RegistryConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub reconcile: ReconcileConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Where this configuration came from
    #[serde(skip)]
    pub source: ConfigSource,
    /// Candidate files that did not exist before `source` was chosen
    #[serde(skip)]
    pub missed: Vec<PathBuf>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct RegistryConfig {
    pub path: String,
    /// Explicit build order; declaration order when absent
    #[serde(default)]
    pub order: Option<Vec<String>>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct OutputConfig {
    #[serde(default = "default_output_path")]
    pub path: String,
    #[serde(default = "default_true")]
    pub pretty: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: default_output_path(),
            pretty: true,
        }
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct ReconcileConfig {
    #[serde(default)]
    pub input_only_match: InputOnlyMatch,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    /// Used when RUST_LOG is not set
    #[serde(default = "default_filter")]
    pub filter: String,
    #[serde(default = "default_log_file")]
    pub file: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_filter(),
            file: default_log_file(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ConfigSource {
    File(PathBuf),
    #[default]
    Embedded,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Embedded => f.write_str("embedded default"),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_output_path() -> String {
    "target/mdm/model_metadata.json".to_string()
}

fn default_filter() -> String {
    "info".to_string()
}

fn default_log_file() -> String {
    "target/logs/mdm-gen.log".to_string()
}

/// Default configuration embedded in the binary
const DEFAULT_CONFIG: &str = r#"
[registry]
path = "mdm/registry.json"

[output]
path = "target/mdm/model_metadata.json"
pretty = true

[reconcile]
input_only_match = "key"

[logging]
filter = "info"
file = "target/logs/mdm-gen.log"
"#;

/// Load configuration
///
/// Search order:
/// 1. Explicit path (command line)
/// 2. config.toml next to the executable
/// 3. Falls back to embedded default config
///
/// Runs before logging is set up, so nothing is logged here;
/// call `Config::log_origin` once the subscriber is installed.
pub fn load_config(explicit: Option<&Path>) -> Result<Config, ConfigError> {
    if let Some(path) = explicit {
        return load_file(path);
    }

    let mut missed = Vec::new();

    // Try to find config.toml next to the executable
    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            let config_path = exe_dir.join("config.toml");

            if config_path.exists() {
                return load_file(&config_path);
            }
            missed.push(config_path);
        }
    }

    let mut config = parse(DEFAULT_CONFIG, ConfigSource::Embedded)?;
    config.missed = missed;
    Ok(config)
}

fn load_file(path: &Path) -> Result<Config, ConfigError> {
    let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse(&contents, ConfigSource::File(path.to_path_buf()))
}

fn parse(contents: &str, source: ConfigSource) -> Result<Config, ConfigError> {
    let mut config: Config = toml::from_str(contents).map_err(|e| ConfigError::Parse {
        origin: source.to_string(),
        source: e,
    })?;
    config.source = source;
    Ok(config)
}

impl Config {
    /// Report where the configuration was found
    pub fn log_origin(&self) {
        for path in &self.missed {
            tracing::warn!("config.toml not found at: {}", path.display());
        }
        match &self.source {
            ConfigSource::File(path) => tracing::info!("Loaded config from: {}", path.display()),
            ConfigSource::Embedded => tracing::info!("Using default embedded configuration"),
        }
    }

    pub fn registry_path(&self) -> PathBuf {
        PathBuf::from(&self.registry.path)
    }

    pub fn output_path(&self) -> PathBuf {
        PathBuf::from(&self.output.path)
    }
}
