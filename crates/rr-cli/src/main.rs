//! road-router: build a road graph snapshot and answer route queries.
//!
//! ```text
//! road-router build --segments roads.csv --out ./snapshot
//! road-router route --snapshot ./snapshot --from 19.93,50.06 --to 19.95,50.07
//! road-router batch --snapshot ./snapshot --queries queries.csv
//! ```
//!
//! Every command prints JSON on stdout.  Logging goes to stderr and is
//! controlled by `RUST_LOG`.

mod commands;
mod queries;

#[cfg(test)]
mod tests;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use rr_core::{GeoPoint, RouterConfig};

use queries::parse_lon_lat;

#[derive(Parser)]
#[command(name = "road-router", version, about = "Shortest and fastest routes over a road network")]
struct Cli {
    /// JSON file with router settings; defaults apply to missing keys.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Build a graph from a road-segment CSV and write it as a snapshot.
    Build {
        #[arg(long)]
        segments: PathBuf,
        #[arg(long)]
        out: PathBuf,
    },
    /// Route between two `lon,lat` points.
    Route {
        #[arg(long)]
        snapshot: PathBuf,
        #[arg(long, value_parser = parse_lon_lat, allow_hyphen_values = true)]
        from: GeoPoint,
        #[arg(long, value_parser = parse_lon_lat, allow_hyphen_values = true)]
        to: GeoPoint,
    },
    /// Route every row of a query CSV in parallel.
    Batch {
        #[arg(long)]
        snapshot: PathBuf,
        #[arg(long)]
        queries: PathBuf,
        /// Worker threads; all cores when omitted.
        #[arg(long)]
        threads: Option<usize>,
    },
}

fn load_config(path: Option<&Path>) -> Result<RouterConfig> {
    match path {
        Some(p) => RouterConfig::from_json_file(p)
            .with_context(|| format!("loading config {}", p.display())),
        None => Ok(RouterConfig::default()),
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;

    let output = match cli.command {
        Command::Build { segments, out } => {
            serde_json::to_value(commands::build(&segments, &out, &config)?)?
        }
        Command::Route { snapshot, from, to } => {
            let planner = commands::open_planner(&snapshot, config)?;
            serde_json::to_value(commands::route(&planner, from, to)?)?
        }
        Command::Batch { snapshot, queries, threads } => {
            if let Some(n) = threads {
                rayon::ThreadPoolBuilder::new()
                    .num_threads(n)
                    .build_global()
                    .context("configuring worker pool")?;
            }
            let planner = commands::open_planner(&snapshot, config)?;
            let rows = queries::load_queries(&queries)?;
            serde_json::to_value(commands::batch(&planner, &rows))?
        }
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
