//! CLI error types

use pricer_garch::SimulationError;
use thiserror::Error;

use crate::config::ConfigError;

/// Errors surfaced by the `garch_barrier` binary.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration could not be loaded or does not describe a valid run.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The pricing run itself failed.
    #[error("Pricing error: {0}")]
    Pricing(#[from] SimulationError),

    /// Writing the report failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A command-line argument was rejected.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

/// Result type for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CliError::InvalidArgument("bad format".to_string());
        assert_eq!(err.to_string(), "Invalid argument: bad format");

        let err: CliError = SimulationError::Domain {
            step: 3,
            radicand: -0.5,
        }
        .into();
        assert!(err.to_string().starts_with("Pricing error:"));
        assert!(err.to_string().contains("step 3"));

        let err: CliError = ConfigError::InvalidLogLevel("loud".to_string()).into();
        assert!(err.to_string().contains("loud"));
    }
}
