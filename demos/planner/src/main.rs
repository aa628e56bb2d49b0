//! planner — turn-by-turn delivery plans over a street map.
//!
//! ```bash
//! planner demos/planner/data/mapdata.txt demos/planner/data/deliveries.txt
//! planner mapdata.txt deliveries.txt --snap --csv plan.csv -v
//! ```
//!
//! Prints one command per line followed by the total routed distance.  If a
//! leg cannot be routed the status code (`BAD_COORD` or `NO_ROUTE`) is printed
//! instead and the process exits with status 1.

use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result, bail};
use clap::Parser;
use log::{LevelFilter, error, info};

use dp_core::StoreConfig;
use dp_plan::{
    DeliveryPlanner, PlanError, PlannerConfig, load_deliveries, write_plan_csv, write_plan_text,
};
use dp_spatial::{AStarRouter, Relaxation, load_map_with_config};

#[derive(Parser)]
#[command(name = "planner")]
#[command(about = "Plan a delivery round trip over a street map")]
struct Cli {
    /// Street map file
    map: PathBuf,

    /// Deliveries file: depot line, then one "lat lon:item" per line
    deliveries: PathBuf,

    /// Deliver in file order instead of nearest-neighbour order
    #[arg(long)]
    no_optimize: bool,

    /// Let every rediscovery of a node overwrite its route parent
    #[arg(long)]
    legacy_relaxation: bool,

    /// Move the depot and deliveries to their nearest map nodes
    #[arg(long)]
    snap: bool,

    /// Maximum load factor for the node store (at least 0.01)
    #[arg(long, default_value_t = 0.5)]
    load_factor: f64,

    /// Also write the commands as CSV
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(if cli.verbose { LevelFilter::Debug } else { LevelFilter::Info })
        .parse_default_env()
        .target(env_logger::Target::Stderr)
        .init();

    if let Err(e) = run(&cli) {
        error!("{e:#}");
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    let t0 = Instant::now();
    let config = StoreConfig { max_load_factor: cli.load_factor };
    let graph = load_map_with_config(&cli.map, config)
        .with_context(|| format!("loading map {}", cli.map.display()))?;
    info!("map ready in {:.1} ms", t0.elapsed().as_secs_f64() * 1e3);

    let mut manifest = load_deliveries(&cli.deliveries)
        .with_context(|| format!("loading deliveries {}", cli.deliveries.display()))?;
    if cli.snap {
        let Some(snapped) = manifest.snapped_to(&graph) else {
            bail!("cannot snap to an empty map");
        };
        manifest = snapped;
    }

    let relaxation = if cli.legacy_relaxation { Relaxation::LastWins } else { Relaxation::BestG };
    let planner_config = PlannerConfig { optimize_order: !cli.no_optimize, ..PlannerConfig::default() };
    let planner = DeliveryPlanner::with_router(&graph, AStarRouter::with_relaxation(relaxation), planner_config)?;

    let plan = match planner.generate_plan(&manifest.depot, &manifest.requests) {
        Ok(plan) => plan,
        Err(PlanError::Route(e)) => {
            println!("{}", e.code());
            error!("{e}");
            std::process::exit(1);
        }
        Err(e) => return Err(e.into()),
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_plan_text(&mut out, &plan)?;
    out.flush()?;

    if let Some(path) = &cli.csv {
        write_plan_csv(path, &plan).with_context(|| format!("writing {}", path.display()))?;
        info!("wrote {} commands to {}", plan.commands.len(), path.display());
    }

    Ok(())
}
