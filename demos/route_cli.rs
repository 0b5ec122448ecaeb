//! Runs a route search on a level and reveals the result one cell per tick.
//!
//! ```text
//! cargo run --example route_cli -- --strategy random-walk --seed 4
//! cargo run --example route_cli -- --level maze.txt --four-connected
//! ```
//!
//! Set `RUST_LOG=debug` to see the search log.
use clap::{Parser, ValueEnum};
use grid_route::solver::astar::Heuristic;
use grid_route::solver::random_walk::DEFAULT_STEP_BUDGET;
use grid_route::{
    AstarSearch, CellState, Connectivity, Grid, GridResult, Legend, Point, RandomWalk,
    RouteCursor, RouteFinder, RouteOverlay, Strategy,
};
use log::info;
use std::error::Error;
use std::fs;
use std::path::PathBuf;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum StrategyArg {
    Astar,
    RandomWalk,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum HeuristicArg {
    Manhattan,
    Chebyshev,
}

#[derive(Parser, Debug)]
#[command(name = "route_cli")]
#[command(about = "Find and reveal a route on a grid level")]
struct Args {
    /// Level file, one row per line: `.` free, `#` blocked, `S` start, `D` destination.
    /// Without it the built-in 10x10 level is used.
    #[arg(short, long)]
    level: Option<PathBuf>,

    #[arg(short, long, value_enum, default_value = "astar")]
    strategy: StrategyArg,

    #[arg(long, value_enum, default_value = "manhattan")]
    heuristic: HeuristicArg,

    /// Only allow orthogonal moves
    #[arg(long)]
    four_connected: bool,

    /// Skip the search when the destination is in another connected component
    #[arg(long)]
    skip_unreachable: bool,

    /// Seed for the random walk
    #[arg(long)]
    seed: Option<u64>,

    #[arg(long, default_value_t = DEFAULT_STEP_BUDGET)]
    steps: usize,

    /// Print the grid after every revealed cell instead of once at the end
    #[arg(long)]
    every_tick: bool,
}

/// The 10x10 level with a 4x2 obstacle between start and destination.
fn default_grid() -> GridResult<Grid> {
    let mut grid = Grid::new(10, 10)?;
    grid.place_obstacle(Point::new(2, 3), 4, 2)?;
    grid.set_state(Point::new(4, 1), CellState::Start)?;
    grid.set_state(Point::new(5, 7), CellState::Destination)?;
    Ok(grid)
}

fn build_strategy(args: &Args) -> Strategy {
    let connectivity = if args.four_connected {
        Connectivity::Four
    } else {
        Connectivity::Eight
    };
    match args.strategy {
        StrategyArg::Astar => AstarSearch::new()
            .with_connectivity(connectivity)
            .with_heuristic(match args.heuristic {
                HeuristicArg::Manhattan => Heuristic::Manhattan,
                HeuristicArg::Chebyshev => Heuristic::Chebyshev,
            })
            .with_skip_unreachable(args.skip_unreachable)
            .into(),
        StrategyArg::RandomWalk => {
            let walk = match args.seed {
                Some(seed) => RandomWalk::with_seed(seed),
                None => RandomWalk::new(),
            };
            walk.with_connectivity(connectivity)
                .with_step_budget(args.steps)
                .into()
        }
    }
}

/// Draws the grid with the revealed cells, marking the head of the route with `@`.
fn render(grid: &Grid, overlay: &RouteOverlay, legend: &Legend) -> String {
    let mut out = String::new();
    for y in 0..grid.height() as i32 {
        for x in 0..grid.width() as i32 {
            let pos = Point::new(x, y);
            let c = if overlay.head() == Some(pos) {
                '@'
            } else {
                overlay
                    .state_at(grid, pos)
                    .and_then(|state| legend.char_for(state))
                    .unwrap_or('?')
            };
            out.push(c);
        }
        out.push('\n');
    }
    out
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let args = Args::parse();
    let legend = Legend::default();
    let grid = match &args.level {
        Some(path) => Grid::from_level_str(&fs::read_to_string(path)?, &legend)?,
        None => default_grid()?,
    };
    println!("{}\n", grid);

    let mut strategy = build_strategy(&args);
    info!("Running {} search", strategy.name());
    let route = strategy.find_route(&grid);
    if route.reached_destination() {
        println!("Route of {} steps found with {}", route.len(), strategy.name());
    } else if route.is_empty() {
        println!("No route found with {}", strategy.name());
    } else {
        println!(
            "{} gave up after {} steps without reaching the destination",
            strategy.name(),
            route.len()
        );
    }

    let mut overlay = RouteOverlay::new();
    let mut cursor = RouteCursor::with_route(route);
    while let Some(step) = cursor.advance_into(&mut overlay) {
        if args.every_tick {
            println!("step {}: {}", step.index + 1, step.cell);
            println!("{}", render(&grid, &overlay, &legend));
        }
    }
    if !args.every_tick {
        println!("{}", render(&grid, &overlay, &legend));
    }
    Ok(())
}
