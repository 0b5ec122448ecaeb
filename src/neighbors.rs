use crate::grid::Grid;
use grid_util::point::Point;
use std::slice;

/// Offsets of the 8-neighbourhood in expansion order: up, up-left, up-right, down, down-left,
/// down-right, left, right. Ties in the search are broken by discovery order, so this order is
/// observable in the routes that are produced.
const MOORE_OFFSETS: [(i32, i32); 8] = [
    (0, 1),
    (-1, 1),
    (1, 1),
    (0, -1),
    (-1, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
];

/// The 4-neighbourhood, same relative order as [MOORE_OFFSETS].
const NEUMANN_OFFSETS: [(i32, i32); 4] = [(0, 1), (0, -1), (-1, 0), (1, 0)];

/// Which cells count as adjacent. Every step costs the same regardless of direction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Connectivity {
    /// Orthogonal moves only.
    Four,
    /// Orthogonal and diagonal moves.
    #[default]
    Eight,
}

impl Connectivity {
    pub fn offsets(self) -> &'static [(i32, i32)] {
        match self {
            Connectivity::Four => &NEUMANN_OFFSETS,
            Connectivity::Eight => &MOORE_OFFSETS,
        }
    }

    /// Whether `b` is a single move away from `a`.
    pub fn is_adjacent(self, a: &Point, b: &Point) -> bool {
        match self {
            Connectivity::Four => a.manhattan_distance(b) == 1,
            Connectivity::Eight => a.move_distance(b) == 1,
        }
    }
}

/// Lazy iterator over the traversable neighbours of a point. A clone continues independently
/// from the same direction.
#[derive(Clone, Debug)]
pub struct Neighbors<'a> {
    grid: &'a Grid,
    center: Point,
    offsets: slice::Iter<'static, (i32, i32)>,
}

impl Iterator for Neighbors<'_> {
    type Item = Point;

    fn next(&mut self) -> Option<Point> {
        for &(dx, dy) in self.offsets.by_ref() {
            let candidate = Point::new(self.center.x + dx, self.center.y + dy);
            if self.grid.is_traversable(candidate) {
                return Some(candidate);
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.offsets.len()))
    }
}

/// Enumerates the in-bounds, traversable neighbours of `pos` in the fixed direction order.
pub fn neighbors(pos: Point, grid: &Grid, connectivity: Connectivity) -> Neighbors<'_> {
    Neighbors {
        grid,
        center: pos,
        offsets: connectivity.offsets().iter(),
    }
}
