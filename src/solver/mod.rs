use crate::grid::Grid;
use crate::route::Route;

pub mod astar;
pub mod random_walk;

use astar::AstarSearch;
use random_walk::RandomWalk;

/// A route search strategy. Implementations only read the grid and never fail: when no route
/// is found the returned [Route] says so.
pub trait RouteFinder {
    fn find_route(&mut self, grid: &Grid) -> Route;
}

/// Strategy chosen by the caller at run time.
#[derive(Clone, Debug)]
pub enum Strategy {
    AStar(AstarSearch),
    RandomWalk(RandomWalk),
}

impl Strategy {
    pub fn name(&self) -> &'static str {
        match self {
            Strategy::AStar(_) => "A*",
            Strategy::RandomWalk(_) => "random walk",
        }
    }
}

impl Default for Strategy {
    fn default() -> Strategy {
        Strategy::AStar(AstarSearch::default())
    }
}

impl From<AstarSearch> for Strategy {
    fn from(solver: AstarSearch) -> Strategy {
        Strategy::AStar(solver)
    }
}

impl From<RandomWalk> for Strategy {
    fn from(solver: RandomWalk) -> Strategy {
        Strategy::RandomWalk(solver)
    }
}

impl RouteFinder for Strategy {
    fn find_route(&mut self, grid: &Grid) -> Route {
        match self {
            Strategy::AStar(solver) => solver.find_route(grid),
            Strategy::RandomWalk(solver) => solver.find_route(grid),
        }
    }
}
