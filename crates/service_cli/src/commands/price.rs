//! Price command implementation
//!
//! Prices the configured barrier call with the pricer_garch engine.

use std::time::Instant;

use pricer_garch::mc::{MonteCarloPricer, PricingResult};
use serde::Serialize;
use tracing::info;

use super::{describe_mode, parameter_rows, print_table};
use crate::config::{ConfigError, SimulationConfig};
use crate::{CliError, Result};

/// Machine-readable output of a pricing run.
#[derive(Debug, Serialize)]
struct PriceReport<'a> {
    seed: u64,
    mode: String,
    elapsed_ms: f64,
    confidence_95: f64,
    barrier_hit_ratio: f64,
    #[serde(flatten)]
    result: &'a PricingResult,
}

/// Run the price command
pub fn run(config: &SimulationConfig, format: &str) -> Result<()> {
    // Reject the format before spending time on the simulation
    if !matches!(format, "table" | "json") {
        return Err(CliError::InvalidArgument(format!(
            "Unknown format: {}. Supported: json, table",
            format
        )));
    }

    let params = config.to_parameter_set().map_err(ConfigError::from)?;
    let mode = config.execution_mode();
    let seed = config.simulation.seed;

    info!("Starting pricing...");
    info!("  Replications: {}", params.n_replications());
    info!("  Horizon: {}", params.horizon());
    info!("  Seed: {}", seed);
    info!("  Mode: {}", describe_mode(mode));

    let pricer = MonteCarloPricer::new(params)
        .map_err(ConfigError::from)?
        .with_seed(seed)
        .with_mode(mode);

    let start = Instant::now();
    let result = pricer.price()?;
    let elapsed = start.elapsed();

    info!(
        price = result.price,
        std_error = result.std_error,
        elapsed_ms = elapsed.as_secs_f64() * 1e3,
        "Pricing complete"
    );

    match format {
        "json" => {
            let report = PriceReport {
                seed,
                mode: describe_mode(mode),
                elapsed_ms: elapsed.as_secs_f64() * 1e3,
                confidence_95: result.confidence_95(),
                barrier_hit_ratio: result.barrier_hit_ratio(),
                result: &result,
            };
            let json = serde_json::to_string_pretty(&report).map_err(std::io::Error::from)?;
            println!("{}", json);
        }
        _ => {
            let mut rows = parameter_rows(pricer.params());
            rows.push(("seed", seed.to_string()));
            rows.push(("mode", describe_mode(mode)));
            rows.push(("price", format!("{:.4}", result.price)));
            rows.push(("std error", format!("{:.4}", result.std_error)));
            rows.push(("95% CI", format!("+/- {:.4}", result.confidence_95())));
            rows.push(("std dev", format!("{:.4}", result.std_dev)));
            rows.push((
                "barrier hits",
                format!("{} ({:.2}%)", result.barrier_hits, result.barrier_hit_ratio() * 100.0),
            ));
            rows.push(("elapsed", format!("{:.1} ms", elapsed.as_secs_f64() * 1e3)));
            print_table("Value", &rows);
        }
    }

    Ok(())
}
