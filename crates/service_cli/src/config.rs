//! Run configuration management
//!
//! Handles loading configuration from TOML files, environment variables and
//! CLI arguments.
//!
//! # Example File
//!
//! ```toml
//! log_level = "debug"
//!
//! [model]
//! alpha = 0.1559
//! beta = 0.84
//!
//! [contract]
//! barrier = 2340.0
//! strike = 2330.0
//!
//! [simulation]
//! replications = 65536
//! seed = 42
//! parallel = true
//! ```

use pricer_garch::mc::{ExecutionMode, ParameterSet, DEFAULT_CHUNK_SIZE};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

/// Environment variable overriding the seed.
pub const ENV_SEED: &str = "GARCH_SEED";
/// Environment variable overriding the replication count.
pub const ENV_REPLICATIONS: &str = "GARCH_REPLICATIONS";
/// Environment variable overriding the log level.
pub const ENV_LOG_LEVEL: &str = "GARCH_LOG_LEVEL";
/// Environment variable switching parallel execution on or off.
pub const ENV_PARALLEL: &str = "GARCH_PARALLEL";

/// Configuration error types
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Invalid chunk size: {0}. Must be positive")]
    InvalidChunkSize(usize),

    #[error("Configuration file error: {0}")]
    FileError(String),

    #[error("Environment variable error: {0}")]
    EnvError(String),

    #[error("Invalid model parameters: {0}")]
    Parameters(#[from] pricer_garch::ConfigError),
}

/// Log levels supported by the binary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl FromStr for LogLevel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(ConfigError::InvalidLogLevel(s.to_string())),
        }
    }
}

impl LogLevel {
    /// Convert log level to tracing filter string
    pub fn as_filter_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_filter_str())
    }
}

fn deserialize_log_level<'de, D>(deserializer: D) -> Result<LogLevel, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    LogLevel::from_str(&s).map_err(serde::de::Error::custom)
}

/// Variance recursion and price dynamics.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ModelSection {
    pub alpha: f64,
    pub beta: f64,
    pub mu: f64,
    pub rate: f64,
    pub initial_variance: f64,
    pub dt: f64,
}

impl Default for ModelSection {
    fn default() -> Self {
        let reference = ParameterSet::reference();
        Self {
            alpha: reference.alpha(),
            beta: reference.beta(),
            mu: reference.mu(),
            rate: reference.rate(),
            initial_variance: reference.initial_variance(),
            dt: reference.dt(),
        }
    }
}

/// Contract terms and monitoring horizon.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ContractSection {
    pub spot: f64,
    pub barrier: f64,
    pub strike: f64,
    pub horizon: usize,
}

impl Default for ContractSection {
    fn default() -> Self {
        let reference = ParameterSet::reference();
        Self {
            spot: reference.spot(),
            barrier: reference.barrier(),
            strike: reference.strike(),
            horizon: reference.horizon(),
        }
    }
}

/// Replication count, seed and scheduling.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SimulationSection {
    pub replications: usize,
    pub seed: u64,
    pub parallel: bool,
    pub chunk_size: usize,
}

impl Default for SimulationSection {
    fn default() -> Self {
        Self {
            replications: ParameterSet::reference().n_replications(),
            seed: 0,
            parallel: false,
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }
}

/// Complete run configuration
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Log level
    #[serde(deserialize_with = "deserialize_log_level")]
    pub log_level: LogLevel,
    pub model: ModelSection,
    pub contract: ContractSection,
    pub simulation: SimulationSection,
}

impl SimulationConfig {
    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ConfigError::FileError(format!("Failed to read {}: {}", path.display(), e))
        })?;

        Self::from_toml_str(&content)
    }

    /// Parse configuration from TOML text
    ///
    /// Values are not validated here; environment and CLI overrides may
    /// still replace them. [`build_config`] validates the merged result.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content)
            .map_err(|e| ConfigError::FileError(format!("Failed to parse TOML: {}", e)))
    }

    /// Apply overrides from an environment variable lookup
    ///
    /// Only variables that are present override the current values.
    pub fn apply_env_with<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(seed) = lookup(ENV_SEED) {
            self.simulation.seed = parse_env(ENV_SEED, &seed)?;
        }

        if let Some(replications) = lookup(ENV_REPLICATIONS) {
            self.simulation.replications = parse_env(ENV_REPLICATIONS, &replications)?;
        }

        if let Some(level) = lookup(ENV_LOG_LEVEL) {
            self.log_level = LogLevel::from_str(&level)?;
        }

        if let Some(parallel) = lookup(ENV_PARALLEL) {
            self.simulation.parallel = match parallel.to_lowercase().as_str() {
                "true" | "1" | "yes" => true,
                "false" | "0" | "no" => false,
                _ => {
                    return Err(ConfigError::EnvError(format!(
                        "{}={} is not a boolean",
                        ENV_PARALLEL, parallel
                    )))
                }
            };
        }

        Ok(())
    }

    /// Merge with CLI arguments (CLI takes precedence)
    pub fn merge_with_cli(&mut self, cli: &CliArgs) -> Result<(), ConfigError> {
        if let Some(level) = &cli.log_level {
            self.log_level = LogLevel::from_str(level)?;
        } else if cli.verbose {
            self.log_level = LogLevel::Debug;
        }
        if let Some(replications) = cli.replications {
            self.simulation.replications = replications;
        }
        if let Some(seed) = cli.seed {
            self.simulation.seed = seed;
        }
        if cli.parallel {
            self.simulation.parallel = true;
        }
        if let Some(chunk_size) = cli.chunk_size {
            self.simulation.chunk_size = chunk_size;
        }
        Ok(())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.simulation.chunk_size == 0 {
            return Err(ConfigError::InvalidChunkSize(self.simulation.chunk_size));
        }
        self.to_parameter_set()?;
        Ok(())
    }

    /// Build the engine parameter set
    ///
    /// All model validation is delegated to [`ParameterSet::builder`].
    pub fn to_parameter_set(&self) -> Result<ParameterSet, pricer_garch::ConfigError> {
        ParameterSet::builder()
            .horizon(self.contract.horizon)
            .dt(self.model.dt)
            .alpha(self.model.alpha)
            .beta(self.model.beta)
            .mu(self.model.mu)
            .rate(self.model.rate)
            .initial_variance(self.model.initial_variance)
            .spot(self.contract.spot)
            .barrier(self.contract.barrier)
            .strike(self.contract.strike)
            .n_replications(self.simulation.replications)
            .build()
    }

    /// Execution mode selected by the simulation section
    pub fn execution_mode(&self) -> ExecutionMode {
        if self.simulation.parallel {
            ExecutionMode::Parallel {
                chunk_size: self.simulation.chunk_size,
            }
        } else {
            ExecutionMode::Sequential
        }
    }
}

fn parse_env<T: FromStr>(key: &str, value: &str) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::EnvError(format!("{}={} is not a valid number", key, value)))
}

/// CLI arguments structure
#[derive(Debug, Clone, Default)]
pub struct CliArgs {
    /// Config file path
    pub config_file: Option<PathBuf>,
    /// Log level override
    pub log_level: Option<String>,
    /// Raise the default log level to debug
    pub verbose: bool,
    /// Replication count override
    pub replications: Option<usize>,
    /// Seed override
    pub seed: Option<u64>,
    /// Force parallel execution
    pub parallel: bool,
    /// Chunk size override
    pub chunk_size: Option<usize>,
}

/// Build configuration from all sources
///
/// Priority (highest to lowest):
/// 1. CLI arguments
/// 2. Environment variables
/// 3. Config file
/// 4. Default values
pub fn build_config(cli: &CliArgs) -> Result<SimulationConfig, ConfigError> {
    build_config_with(cli, |key| std::env::var(key).ok())
}

/// [`build_config`] with an explicit environment lookup
pub fn build_config_with<F>(cli: &CliArgs, lookup: F) -> Result<SimulationConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let config = if let Some(config_path) = &cli.config_file {
        SimulationConfig::from_file(config_path)?
    } else {
        SimulationConfig::default()
    };

    resolve(config, cli, lookup)
}

/// Layers environment and CLI overrides onto `config`, then validates once
fn resolve<F>(
    mut config: SimulationConfig,
    cli: &CliArgs,
    lookup: F,
) -> Result<SimulationConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    config.apply_env_with(lookup)?;
    config.merge_with_cli(cli)?;

    // Final validation
    config.validate()?;

    Ok(config)
}
