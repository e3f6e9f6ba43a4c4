//! tripsettle - command line entry point
//!
//! Reads a trip snapshot as JSON, settles it and prints the report as JSON.
//!
//! ```bash
//! tripsettle trip.json --pretty
//! cat trip.json | RUST_LOG=debug tripsettle --strategy exact
//! ```

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use rust_decimal::Decimal;
use tracing_subscriber::EnvFilter;

use tripsettle::{EngineConfig, RoundingPolicy, SettlementEngine, SettlementStrategy, Trip};

#[derive(Parser, Debug)]
#[command(name = "tripsettle")]
#[command(about = "Work out who owes whom on a shared trip")]
struct Cli {
    /// Trip JSON file; reads stdin when omitted or `-`
    path: Option<PathBuf>,

    /// Settlement strategy: greedy or exact
    #[arg(long, env = "TRIPSETTLE_STRATEGY", default_value = "greedy")]
    strategy: SettlementStrategy,

    /// Rounding policy for presented balances: conserving or independent
    #[arg(long, env = "TRIPSETTLE_ROUNDING", default_value = "conserving")]
    rounding: RoundingPolicy,

    /// Remaining amounts below this are treated as settled
    #[arg(long, env = "TRIPSETTLE_EPSILON")]
    epsilon: Option<Decimal>,

    /// Pretty-print the report
    #[arg(long)]
    pretty: bool,
}

impl Cli {
    fn engine_config(&self) -> EngineConfig {
        let config = EngineConfig::default()
            .with_strategy(self.strategy)
            .with_rounding(self.rounding);
        match self.epsilon {
            Some(epsilon) => config.with_epsilon(epsilon),
            None => config,
        }
    }

    fn read_input(&self) -> Result<String> {
        match &self.path {
            Some(path) if path.as_os_str() != "-" => fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display())),
            _ => {
                let mut buf = String::new();
                io::stdin()
                    .read_to_string(&mut buf)
                    .context("failed to read trip from stdin")?;
                Ok(buf)
            }
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let engine = SettlementEngine::new(cli.engine_config())?;
    let input = cli.read_input()?;
    let trip: Trip = serde_json::from_str(&input).context("invalid trip JSON")?;

    let report = engine.settle(&trip)?;

    let output = if cli.pretty {
        serde_json::to_string_pretty(&report)?
    } else {
        serde_json::to_string(&report)?
    };
    println!("{}", output);

    Ok(())
}
