//! Command-line arguments and scenario resolution for the binary.

use std::path::PathBuf;

use clap::Parser;

use crate::config::{ConfigError, ScenarioConfig};
use crate::telemetry::DEFAULT_FILTER;

/// Parsed CLI arguments.
#[derive(Debug, Parser)]
#[command(name = "microgrid-sim")]
#[command(author, version, about = "Hour-by-hour microgrid energy balance simulator")]
#[command(
    long_about = "Simulates a community of households with PV and batteries, a shared \
    battery, a factory, a public facility and EV charging.\n\
    \nRuns factory pattern A (steady) and pattern B (daytime shifted) over the same \
    household inputs and compares their grid exchange.\n\
    \nExamples:\n  \
    microgrid-sim\n  \
    microgrid-sim --preset small_community --quiet\n  \
    microgrid-sim --scenario scenarios/baseline.toml --days 7 --csv-dir out"
)]
pub struct Cli {
    /// Load scenario from a TOML config file
    #[arg(long, value_name = "PATH", conflicts_with = "preset")]
    pub scenario: Option<PathBuf>,

    /// Use a built-in preset (baseline, small_community)
    #[arg(long, value_name = "NAME")]
    pub preset: Option<String>,

    /// Override the random seed
    #[arg(long)]
    pub seed: Option<u64>,

    /// Override the number of simulated days
    #[arg(long)]
    pub days: Option<usize>,

    /// Write pattern_a.csv and pattern_b.csv into this directory
    #[arg(long, value_name = "DIR")]
    pub csv_dir: Option<PathBuf>,

    /// Omit the hourly rows from the report
    #[arg(long, short)]
    pub quiet: bool,

    /// Log at debug level unless RUST_LOG is set
    #[arg(long, short)]
    pub verbose: bool,

    /// Start the REST API server after the simulation
    #[cfg(feature = "api")]
    #[arg(long)]
    pub serve: bool,

    /// API server port
    #[cfg(feature = "api")]
    #[arg(long, default_value_t = 3000)]
    pub port: u16,
}

impl Cli {
    /// Resolves the scenario: `--scenario`, then `--preset`, then baseline;
    /// applies overrides and validates.
    ///
    /// # Errors
    ///
    /// Returns every problem found, or the single load error.
    pub fn load_config(&self) -> Result<ScenarioConfig, Vec<ConfigError>> {
        let mut config = match (&self.scenario, &self.preset) {
            (Some(path), _) => ScenarioConfig::from_toml_file(path),
            (None, Some(name)) => ScenarioConfig::from_preset(name),
            (None, None) => Ok(ScenarioConfig::baseline()),
        }
        .map_err(|e| vec![e])?;

        if let Some(seed) = self.seed {
            config.simulation.seed = seed;
        }
        if let Some(days) = self.days {
            config.simulation.days = days;
        }

        let errors = config.validate();
        if errors.is_empty() {
            Ok(config)
        } else {
            Err(errors)
        }
    }

    /// Log filter used when `RUST_LOG` is unset.
    pub fn log_filter(&self) -> &'static str {
        if self.verbose { "debug" } else { DEFAULT_FILTER }
    }
}
