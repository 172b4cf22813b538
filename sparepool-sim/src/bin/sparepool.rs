//! Command-line front end for the spare parts simulation.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin sparepool -- --initial-supply 10 --demand-rate 1.5 --sim-time 200
//! cargo run --bin sparepool -- --config scenario.json --iterations 20 --format json
//! ```
//!
//! Values given on the command line override those read from `--config`.

use std::path::PathBuf;
use std::process;

use clap::{Parser, ValueEnum};
use sparepool_sim::{SimulationBuilder, SimulationConfig, SimulationReport};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Human-readable report
    Text,
    /// Full report, time series included, as JSON
    Json,
}

/// CLI arguments
#[derive(Parser, Debug)]
#[command(name = "sparepool")]
#[command(about = "Simulate a closed-loop repairable spare parts pool", long_about = None)]
struct Args {
    /// JSON file with a simulation configuration
    #[arg(long)]
    config: Option<PathBuf>,

    /// Initial part supply level (also the pool capacity)
    #[arg(long)]
    initial_supply: Option<u64>,

    /// Part demand rate, in arrivals per time unit
    #[arg(long)]
    demand_rate: Option<f64>,

    /// Repair cycle time, in time units
    #[arg(long)]
    repair_cycle_time: Option<f64>,

    /// Simulation horizon, in time units
    #[arg(long)]
    sim_time: Option<f64>,

    /// Sampling period, in time units
    #[arg(long)]
    record_interval: Option<f64>,

    /// Seed of the first iteration
    #[arg(long)]
    seed: Option<u64>,

    /// Number of seeds to run
    #[arg(long, default_value_t = 1)]
    iterations: usize,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Print the time series of the first run (text format only)
    #[arg(long)]
    timeseries: bool,
}

fn load_config(args: &Args) -> Result<SimulationConfig, String> {
    let mut config = match &args.config {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .map_err(|e| format!("cannot read {}: {}", path.display(), e))?;
            serde_json::from_str(&raw)
                .map_err(|e| format!("cannot parse {}: {}", path.display(), e))?
        }
        None => SimulationConfig::default(),
    };

    if let Some(v) = args.initial_supply {
        config.initial_supply = v;
    }
    if let Some(v) = args.demand_rate {
        config.demand_rate = v;
    }
    if let Some(v) = args.repair_cycle_time {
        config.repair_cycle_time = v;
    }
    if let Some(v) = args.sim_time {
        config.sim_time = v;
    }
    if let Some(v) = args.record_interval {
        config.record_interval = v;
    }
    if let Some(v) = args.seed {
        config.seed = v;
    }
    Ok(config)
}

fn print_timeseries(report: &SimulationReport) {
    let Some(run) = report.runs.first() else {
        return;
    };
    println!();
    println!(
        "{:>10} {:>10} {:>8} {:>10} {:>9} {:>8} {:>7}",
        "time", "available", "backlog", "in_repair", "arrivals", "served", "rate"
    );
    for s in &run.timeseries {
        println!(
            "{:>10.3} {:>10} {:>8} {:>10} {:>9} {:>8} {:>7.3}",
            s.time_units(),
            s.available_supply,
            s.backlog,
            s.in_repair,
            s.total_arrivals,
            s.served,
            s.satisfaction_rate
        );
    }
}

fn main() {
    let args = Args::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn,sparepool_sim=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    let config = match load_config(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(1);
        }
    };

    let report = match SimulationBuilder::new(config)
        .set_iterations(args.iterations)
        .with_default_invariants()
        .run()
    {
        Ok(report) => report,
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(1);
        }
    };

    match args.format {
        OutputFormat::Text => {
            print!("{report}");
            if args.timeseries {
                print_timeseries(&report);
            }
        }
        OutputFormat::Json => match serde_json::to_string_pretty(&report) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("error: {e}");
                process::exit(1);
            }
        },
    }
}
