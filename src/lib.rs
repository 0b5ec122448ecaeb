//! # grid_route
//!
//! Route search on a rectangular grid of tagged cells. A [Grid](grid::Grid) holds
//! free, blocked, start and destination cells; a [RouteFinder](solver::RouteFinder)
//! computes a [Route](route::Route) from the start to the destination, which a
//! [RouteCursor](route::RouteCursor) then reveals one cell at a time.
//!
//! Two strategies are provided. [AstarSearch](solver::astar::AstarSearch) is a
//! best-first search with unit step costs and a
//! [Manhattan distance](https://en.wikipedia.org/wiki/Taxicab_geometry) heuristic by
//! default. [RandomWalk](solver::random_walk::RandomWalk) wanders between
//! neighbours at random and serves as a baseline. Both assume a uniform-cost grid
//! and leave the grid untouched: search bookkeeping lives in a side table owned
//! by a single call.
mod astar;
pub mod components;
pub mod grid;
pub mod level;
pub mod neighbors;
pub mod route;
pub mod solver;

use fxhash::FxBuildHasher;
use indexmap::{IndexMap, IndexSet};

pub use grid::{CellState, Grid};
pub use grid_util::point::Point;
pub use level::Legend;
pub use neighbors::Connectivity;
pub use route::{CursorState, RevealStep, Route, RouteCursor, RouteDisplay, RouteOverlay};
pub use solver::{astar::AstarSearch, random_walk::RandomWalk, RouteFinder, Strategy};

/// Configuration errors raised at the [Grid] boundary. Searching never fails; an
/// unreachable destination is reported through the returned [Route].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    #[error("invalid grid dimensions {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },

    #[error("position ({x}, {y}) is outside the {width}x{height} grid")]
    OutOfBounds {
        x: i32,
        y: i32,
        width: usize,
        height: usize,
    },

    /// Row `row` of a level has `found` characters where `expected` were required.
    #[error("level row {row} has length {found}, expected {expected}")]
    InconsistentRowLength {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("level contains no cells")]
    EmptyLevel,
}

pub type GridResult<T> = Result<T, GridError>;

pub(crate) type FxIndexMap<K, V> = IndexMap<K, V, FxBuildHasher>;
pub(crate) type FxIndexSet<K> = IndexSet<K, FxBuildHasher>;
