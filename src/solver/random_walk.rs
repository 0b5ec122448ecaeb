use grid_util::point::Point;
use log::{debug, warn};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use smallvec::SmallVec;

use crate::grid::Grid;
use crate::neighbors::{neighbors, Connectivity};
use crate::route::Route;
use crate::solver::RouteFinder;

/// Number of steps a walk may take before giving up.
pub const DEFAULT_STEP_BUDGET: usize = 999;

/// Drunkard's walk: repeatedly steps to a uniformly chosen traversable neighbour until the
/// destination is stepped on or the step budget runs out. Not goal-directed; useful as a
/// baseline against [AstarSearch](crate::solver::astar::AstarSearch).
#[derive(Clone, Debug)]
pub struct RandomWalk {
    pub connectivity: Connectivity,
    pub step_budget: usize,
    rng: StdRng,
}

impl Default for RandomWalk {
    fn default() -> RandomWalk {
        RandomWalk::new()
    }
}

impl RandomWalk {
    /// A walk seeded from system entropy.
    pub fn new() -> RandomWalk {
        RandomWalk::from_rng(StdRng::from_entropy())
    }

    /// A walk that makes the same choices on every run.
    pub fn with_seed(seed: u64) -> RandomWalk {
        RandomWalk::from_rng(StdRng::seed_from_u64(seed))
    }

    fn from_rng(rng: StdRng) -> RandomWalk {
        RandomWalk {
            connectivity: Connectivity::default(),
            step_budget: DEFAULT_STEP_BUDGET,
            rng,
        }
    }

    pub fn with_connectivity(mut self, connectivity: Connectivity) -> RandomWalk {
        self.connectivity = connectivity;
        self
    }

    pub fn with_step_budget(mut self, step_budget: usize) -> RandomWalk {
        self.step_budget = step_budget;
        self
    }

    /// Walks from `start` until `goal` is stepped on. The route holds every step taken, so cells
    /// may repeat.
    pub fn find_route_between(&mut self, grid: &Grid, start: Point, goal: Point) -> Route {
        let mut current = start;
        let mut cells = Vec::new();
        let mut budget = self.step_budget;
        let mut reached = false;
        while !reached && budget > 0 {
            let candidates: SmallVec<[Point; 8]> =
                neighbors(current, grid, self.connectivity).collect();
            match candidates.choose(&mut self.rng) {
                Some(&next) => {
                    cells.push(next);
                    current = next;
                    reached = next == goal;
                }
                None => {
                    // The grid does not change during a walk, so a cell without exits stays one.
                    debug!("Random walk is stuck at {}", current);
                    break;
                }
            }
            budget -= 1;
        }
        if reached {
            debug!("Random walk reached {} in {} steps", goal, cells.len());
        } else {
            warn!(
                "Random walk from {} did not reach {} within {} steps",
                start, goal, self.step_budget
            );
        }
        Route::new(cells, reached)
    }
}

impl RouteFinder for RandomWalk {
    fn find_route(&mut self, grid: &Grid) -> Route {
        match (grid.start_position(), grid.destination_position()) {
            (Some(start), Some(goal)) => self.find_route_between(grid, start, goal),
            _ => Route::empty(),
        }
    }
}
