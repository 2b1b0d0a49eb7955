//! Microgrid simulator entry point: CLI wiring, scenario runs and report.

use std::fs;
use std::process;

use clap::Parser;
use tracing::info;

use microgrid_sim::cli::Cli;
use microgrid_sim::config::ScenarioConfig;
use microgrid_sim::io::export::export_csv;
use microgrid_sim::profiles::FactoryPattern;
use microgrid_sim::scenario::{ScenarioOutcome, compare, run_all};
use microgrid_sim::telemetry::init_tracing;

fn fail(message: impl std::fmt::Display) -> ! {
    eprintln!("error: {message}");
    process::exit(1);
}

fn print_report(config: &ScenarioConfig, outcomes: &[ScenarioOutcome], quiet: bool) {
    println!(
        "Microgrid: {} households, {} day(s), seed {}",
        config.fleet.households, config.simulation.days, config.simulation.seed
    );

    for outcome in outcomes {
        println!("\n=== Factory {} ===", outcome.pattern);
        if !quiet {
            for r in &outcome.result.records {
                println!("{r}");
            }
            println!();
        }
        println!("{}", outcome.metrics);
        if outcome.result.conservation_warnings > 0 {
            println!(
                "Conservation warnings: {}",
                outcome.result.conservation_warnings
            );
        }
    }

    if let Some(cmp) = compare(outcomes) {
        println!(
            "\n=== Pattern {} vs pattern {} ===",
            FactoryPattern::Steady.label(),
            FactoryPattern::DaytimeShifted.label()
        );
        println!("{cmp}");
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.log_filter());

    let config = cli.load_config().unwrap_or_else(|errors| {
        for e in &errors {
            eprintln!("{e}");
        }
        process::exit(1);
    });

    info!(
        households = config.fleet.households,
        hours = config.hours(),
        "running scenarios"
    );
    let outcomes = run_all(&config).unwrap_or_else(|e| fail(e));

    print_report(&config, &outcomes, cli.quiet);

    if let Some(dir) = &cli.csv_dir {
        if let Err(e) = fs::create_dir_all(dir) {
            fail(format_args!("cannot create \"{}\": {e}", dir.display()));
        }
        for outcome in &outcomes {
            let path = dir.join(format!("{}.csv", outcome.pattern.slug()));
            if let Err(e) = export_csv(&outcome.result.records, &path) {
                fail(format_args!("failed to write CSV: {e}"));
            }
            eprintln!("Hourly records written to {}", path.display());
        }
    }

    #[cfg(feature = "api")]
    if cli.serve {
        use std::net::SocketAddr;
        use std::sync::Arc;

        let state = Arc::new(microgrid_sim::api::AppState::new(config, outcomes));
        let addr = SocketAddr::from(([0, 0, 0, 0], cli.port));
        let rt = tokio::runtime::Runtime::new()
            .unwrap_or_else(|e| fail(format_args!("failed to create tokio runtime: {e}")));
        if let Err(e) = rt.block_on(microgrid_sim::api::serve(state, addr)) {
            fail(format_args!("API server on {addr}: {e}"));
        }
    }
}
