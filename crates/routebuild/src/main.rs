//! routebuild — precompute a next-hop routing table from a network JSON.
//!
//! ```text
//! routebuild plant.json routes.bin              # 100 sampled routes, seed 0
//! routebuild plant.json routes.bin 5000 42      # 5000 sampled routes, seed 42
//! routebuild --complete plant.json routes.bin   # full all-destinations table
//! ```

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;

use agv_net::load_network_json;
use agv_route::{build_complete, build_sampled, write_table_path};

#[derive(Parser)]
#[command(name = "routebuild", version, about = "Precompute a next-hop routing table")]
struct Args {
    /// Network description (JSON with a top-level `points` array).
    input: PathBuf,

    /// Destination file for the binary routing table.
    output: PathBuf,

    /// Number of sampled entry/exit pairs (ignored with --complete).
    #[arg(default_value_t = 100)]
    num_routes: usize,

    /// Sampler seed.  The --seed flag takes precedence when both are given.
    seed: Option<u64>,

    /// Compute the full all-destinations table with one reverse
    /// shortest-path run per entry/exit point.
    #[arg(short, long)]
    complete: bool,

    /// Sampler seed (flag form).
    #[arg(long = "seed", value_name = "N")]
    seed_flag: Option<u64>,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let network = load_network_json(&args.input)
        .with_context(|| format!("loading network from {}", args.input.display()))?;
    let endpoints = network.entry_exit_points().len();
    println!(
        "network: {} points, {} segments, {} entry/exit points",
        network.point_count(),
        network.segment_count(),
        endpoints,
    );

    let t0 = Instant::now();
    let table = if args.complete {
        build_complete(&network)
    } else {
        let seed = args.seed_flag.or(args.seed).unwrap_or(0);
        println!("sampling {} routes with seed {seed}", args.num_routes);
        build_sampled(&network, args.num_routes, seed)
            .context("sampling routes")?
    };
    println!(
        "built {} next-hop records in {:.3} s",
        table.len(),
        t0.elapsed().as_secs_f64(),
    );

    write_table_path(&table, &args.output)
        .with_context(|| format!("writing table to {}", args.output.display()))?;
    println!("wrote {}", args.output.display());
    Ok(())
}
