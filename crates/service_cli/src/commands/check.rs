//! Check command implementation
//!
//! Validates the resolved configuration and prints the parameter set that a
//! `price` run would use, without simulating anything.

use tracing::info;

use super::{describe_mode, parameter_rows, print_table};
use crate::config::{ConfigError, SimulationConfig};
use crate::Result;

/// Run the check command
pub fn run(config: &SimulationConfig) -> Result<()> {
    info!("Checking configuration...");

    config.validate()?;
    let params = config.to_parameter_set().map_err(ConfigError::from)?;

    let mut rows = parameter_rows(&params);
    rows.push(("discount factor", format!("{:.6}", params.discount_factor())));
    rows.push(("seed", config.simulation.seed.to_string()));
    rows.push(("mode", describe_mode(config.execution_mode())));
    rows.push(("log level", config.log_level.to_string()));
    rows.push((
        "threads",
        std::thread::available_parallelism()
            .map(|n| n.get().to_string())
            .unwrap_or_else(|_| "unknown".to_string()),
    ));
    print_table("Resolved", &rows);

    info!("Configuration OK");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CliError;

    #[test]
    fn test_check_accepts_defaults() {
        assert!(run(&SimulationConfig::default()).is_ok());
    }

    #[test]
    fn test_check_rejects_invalid_step_size() {
        let mut config = SimulationConfig::default();
        config.model.dt = 0.0;
        let err = run(&config).unwrap_err();
        assert!(matches!(
            err,
            CliError::Config(ConfigError::Parameters(
                pricer_garch::ConfigError::InvalidStepSize(_)
            ))
        ));
    }
}
