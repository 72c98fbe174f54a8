//! Dots-Path: capture-loop search for the dots game.
//!
//! ## Usage
//!
//! - `dots-path` - Show a demo
//! - `dots-path find --mover "0,0 1,0 ..." --opponent "1,1" --start 0,0` - Search one position
//! - `dots-path random --size 24 --density 0.3` - Search every point of a random board
//!
//! Set `RUST_LOG=debug` to see per-search counters.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use dots_path::constants::{DEFAULT_BOARD_SIZE, DEFAULT_DENSITY, DEFAULT_RANDOM_BUDGET, DEFAULT_SEED};
use dots_path::geometry::interior_points;
use dots_path::point::{parse_point, parse_trace, Point, PointSet};
use dots_path::search::{find_paths_batch, PathFinder, SearchConfig, VisitPolicy};

/// Dots-Path: capture-loop search for the dots game
#[derive(Parser)]
#[command(name = "dots-path")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Find every capture loop through a start point
    Find {
        /// Mover's points, whitespace separated, e.g. "0,0 1,0 1,1"
        #[arg(long, default_value = "")]
        mover: String,
        /// Opponent's points, same format
        #[arg(long, default_value = "")]
        opponent: String,
        /// Start point, e.g. "0,0"
        #[arg(long, allow_hyphen_values = true)]
        start: String,
        /// Abort after this many node expansions
        #[arg(long)]
        budget: Option<u64>,
        /// Compare edge crossings exactly instead of with integer division
        #[arg(long)]
        exact: bool,
        /// Never re-enter a point once any branch has visited it
        #[arg(long)]
        global_visited: bool,
        /// Print the loops as JSON
        #[arg(long)]
        json: bool,
    },
    /// Scatter random points on a board and search from every mover point
    Random {
        #[arg(long, default_value_t = DEFAULT_BOARD_SIZE)]
        size: i32,
        /// Probability of a cell holding a mover point (opponent uses the same)
        #[arg(long, default_value_t = DEFAULT_DENSITY)]
        density: f64,
        #[arg(long, default_value_t = DEFAULT_SEED)]
        seed: u64,
        /// Node-expansion budget per start point
        #[arg(long, default_value_t = DEFAULT_RANDOM_BUDGET)]
        budget: u64,
    },
    /// Run a small demo
    Demo,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Find {
            mover,
            opponent,
            start,
            budget,
            exact,
            global_visited,
            json,
        }) => {
            let mover = parse_trace(&mover).context("invalid --mover")?;
            let opponent = parse_trace(&opponent).context("invalid --opponent")?;
            let start = parse_point(&start).context("invalid --start")?;

            let config = SearchConfig::from_flags(budget, exact, global_visited);

            let paths = PathFinder::with_config(&mover, &opponent, config)
                .find(start)
                .context("search failed")?;
            print_paths(&paths, json)?;
        }
        Some(Commands::Random {
            size,
            density,
            seed,
            budget,
        }) => run_random(size, density, seed, budget)?,
        Some(Commands::Demo) | None => run_demo(),
    }
    Ok(())
}

fn print_paths(paths: &[Vec<Point>], json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string(paths)?);
        return Ok(());
    }
    for path in paths {
        let line: Vec<String> = path.iter().map(Point::to_string).collect();
        println!("{}", line.join(" "));
    }
    Ok(())
}

/// Fill a board at random and search from every mover point.
fn run_random(size: i32, density: f64, seed: u64, budget: u64) -> Result<()> {
    anyhow::ensure!(size > 0, "--size must be positive");
    anyhow::ensure!(
        (0.0..=1.0).contains(&density),
        "--density must be between 0 and 1"
    );

    let mut rng = fastrand::Rng::with_seed(seed);
    let mut mover = PointSet::new();
    let mut opponent = PointSet::new();
    for x in 0..size {
        for y in 0..size {
            if rng.f64() < density {
                mover.insert(Point::new(x, y));
            } else if rng.f64() < density {
                opponent.insert(Point::new(x, y));
            }
        }
    }
    tracing::info!(
        "random board {}x{}: {} mover points, {} opponent points",
        size,
        size,
        mover.len(),
        opponent.len()
    );

    let starts: Vec<Point> = mover.iter().copied().collect();
    let config = SearchConfig::new().with_budget(budget);
    let results = find_paths_batch(&mover, &opponent, &starts, config);

    let mut loops = 0;
    let mut exhausted = 0;
    let mut captures = 0;
    for result in &results {
        match result {
            Ok(paths) => {
                loops += paths.len();
                captures += paths
                    .iter()
                    .filter(|p| interior_points(p).is_some_and(|area| !area.is_empty()))
                    .count();
            }
            Err(e) => {
                tracing::debug!("{}", e);
                exhausted += 1;
            }
        }
    }

    println!("starts searched: {}", starts.len());
    println!("capture loops:   {loops}");
    println!("with interior:   {captures}");
    println!("over budget:     {exhausted}");
    Ok(())
}

fn run_demo() {
    println!("Dots-Path: capture-loop search\n");

    // A ring of 8 points around (1, 1), opponent in the middle
    let mover: PointSet = [(0, 0), (1, 0), (2, 0), (2, 1), (2, 2), (1, 2), (0, 2), (0, 1)]
        .into_iter()
        .map(Point::from)
        .collect();
    let opponent: PointSet = [Point::new(1, 1), Point::new(5, 5)].into_iter().collect();
    let start = Point::new(0, 0);

    for (name, visit) in [("per-path", VisitPolicy::PerPath), ("global", VisitPolicy::Global)] {
        let config = SearchConfig::new().with_visit_policy(visit);
        match PathFinder::with_config(&mover, &opponent, config).find_with_stats(start) {
            Ok(outcome) => {
                println!(
                    "=== {name} visits: {} loops, {} nodes expanded ===",
                    outcome.paths.len(),
                    outcome.stats.expanded
                );
                if let Some(first) = outcome.paths.first() {
                    let line: Vec<String> = first.iter().map(Point::to_string).collect();
                    println!("first loop: {}", line.join(" "));
                    println!("captures:   {:?}", interior_points(first).unwrap_or_default());
                }
            }
            Err(e) => println!("=== {name} visits: {e} ==="),
        }
    }
}
