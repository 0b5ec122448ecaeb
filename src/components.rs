use crate::grid::Grid;
use crate::neighbors::Connectivity;
use grid_util::grid::{BoolGrid, Grid as _};
use grid_util::point::Point;
use log::debug;
use petgraph::unionfind::UnionFind;

/// Half of each neighbourhood is enough to link every adjacent pair once.
const FORWARD_EIGHT: [(i32, i32); 4] = [(1, 0), (0, 1), (1, 1), (-1, 1)];
const FORWARD_FOUR: [(i32, i32); 2] = [(1, 0), (0, 1)];

/// Partition of the traversable cells of a [Grid] into
/// [connected components](https://en.wikipedia.org/wiki/Component_(graph_theory)), kept in a
/// [UnionFind] structure. Answers whether a route can exist without running a search. It is a
/// snapshot: regenerate it after the grid changes.
#[derive(Clone, Debug)]
pub struct Components {
    traversable: BoolGrid,
    sets: UnionFind<usize>,
}

impl Components {
    /// Links up traversable grid neighbours into components.
    pub fn generate(grid: &Grid, connectivity: Connectivity) -> Components {
        let mut sets = UnionFind::new(grid.width() * grid.height());
        let mut traversable = BoolGrid::new(grid.width(), grid.height(), false);
        let forward: &[(i32, i32)] = match connectivity {
            Connectivity::Four => &FORWARD_FOUR,
            Connectivity::Eight => &FORWARD_EIGHT,
        };
        for (point, state) in grid.iter() {
            if !state.is_traversable() {
                continue;
            }
            traversable.set_point(point, true);
            let parent_ix = grid.get_ix_point(&point);
            forward
                .iter()
                .map(|(dx, dy)| Point::new(point.x + dx, point.y + dy))
                .filter(|p| grid.is_traversable(*p))
                .for_each(|p| {
                    sets.union(parent_ix, grid.get_ix_point(&p));
                });
        }
        debug!(
            "Generated connected components for {}x{} grid",
            grid.width(),
            grid.height()
        );
        Components { traversable, sets }
    }

    fn ix(&self, point: &Point) -> Option<usize> {
        self.traversable
            .point_in_bounds(*point)
            .then(|| self.traversable.get_ix_point(point))
    }

    /// Whether `point` was traversable when the components were generated.
    pub fn is_traversable(&self, point: &Point) -> bool {
        self.traversable.point_in_bounds(*point) && self.traversable.get_point(*point)
    }

    /// Retrieves the component id a given [Point] belongs to.
    pub fn get_component(&self, point: &Point) -> Option<usize> {
        self.ix(point).map(|ix| self.sets.find(ix))
    }

    /// Checks if start and goal are on the same component.
    pub fn reachable(&self, start: &Point, goal: &Point) -> bool {
        match (self.ix(start), self.ix(goal)) {
            (Some(start_ix), Some(goal_ix)) => self.sets.equiv(start_ix, goal_ix),
            _ => false,
        }
    }

    /// Checks if start and goal are not on the same component.
    pub fn unreachable(&self, start: &Point, goal: &Point) -> bool {
        !self.reachable(start, goal)
    }
}
