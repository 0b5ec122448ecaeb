use grid_util::point::Point;
use log::{debug, info};

use crate::astar::astar;
use crate::components::Components;
use crate::grid::Grid;
use crate::neighbors::{neighbors, Connectivity};
use crate::route::Route;
use crate::solver::RouteFinder;

/// Estimate of the remaining distance to the destination.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Heuristic {
    /// `|dx| + |dy|`. Overestimates on an 8-connected grid, so routes found with it are not
    /// guaranteed to be the shortest there.
    #[default]
    Manhattan,
    /// `max(|dx|, |dy|)`, the exact move count on an open 8-connected grid.
    Chebyshev,
}

impl Heuristic {
    pub fn distance(self, p1: &Point, p2: &Point) -> i32 {
        match self {
            Heuristic::Manhattan => p1.manhattan_distance(p2),
            Heuristic::Chebyshev => p1.move_distance(p2),
        }
    }
}

/// A* over the grid with a cost of 1 per step. The open set is ordered by
/// `distance from start + heuristic`, with ties going to the cell discovered first, and the
/// search ends as soon as the destination is discovered.
#[derive(Clone, Debug, Default)]
pub struct AstarSearch {
    pub connectivity: Connectivity,
    pub heuristic: Heuristic,
    /// Compute connected components first and skip the search when the destination lies in a
    /// different one.
    pub skip_unreachable: bool,
}

impl AstarSearch {
    pub fn new() -> AstarSearch {
        AstarSearch::default()
    }

    pub fn with_connectivity(mut self, connectivity: Connectivity) -> AstarSearch {
        self.connectivity = connectivity;
        self
    }

    pub fn with_heuristic(mut self, heuristic: Heuristic) -> AstarSearch {
        self.heuristic = heuristic;
        self
    }

    pub fn with_skip_unreachable(mut self, skip_unreachable: bool) -> AstarSearch {
        self.skip_unreachable = skip_unreachable;
        self
    }

    /// Searches between two explicit points instead of the grid's start and destination. The
    /// returned cells exclude `start` and end at `goal`.
    pub fn find_route_between(&self, grid: &Grid, start: Point, goal: Point) -> Route {
        if self.skip_unreachable
            && Components::generate(grid, self.connectivity).unreachable(&start, &goal)
        {
            info!("{} is not reachable from {}", goal, start);
            return Route::empty();
        }
        debug!("Searching route from {} to {}", start, goal);
        let connectivity = self.connectivity;
        let heuristic = self.heuristic;
        let result = astar(
            &start,
            |node| neighbors(*node, grid, connectivity).map(|p| (p, 1)),
            |point| heuristic.distance(point, &goal),
            |point| *point == goal,
        );
        match result {
            Some((path, cost)) => {
                debug!("Found route of cost {} from {} to {}", cost, start, goal);
                Route::new(path.into_iter().skip(1).collect(), true)
            }
            None => {
                info!("No route from {} to {}", start, goal);
                Route::empty()
            }
        }
    }
}

impl RouteFinder for AstarSearch {
    fn find_route(&mut self, grid: &Grid) -> Route {
        match (grid.start_position(), grid.destination_position()) {
            (Some(start), Some(goal)) => self.find_route_between(grid, start, goal),
            _ => {
                info!("Grid has no start or no destination, nothing to search");
                Route::empty()
            }
        }
    }
}
