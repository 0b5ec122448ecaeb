use crate::level::Legend;
use crate::{GridError, GridResult};
use core::fmt;
use grid_util::grid::{Grid as _, SimpleGrid};
use grid_util::point::Point;
use grid_util::rect::Rect;
use itertools::Itertools;
use log::debug;

/// The tag carried by every cell of a [Grid].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum CellState {
    #[default]
    Free,
    Blocked,
    Start,
    Destination,
    /// A free cell painted as part of a revealed route.
    OnRoute,
}

impl CellState {
    /// Whether a search may step onto a cell in this state.
    pub fn is_traversable(self) -> bool {
        self != CellState::Blocked
    }
}

/// [Grid] stores the [CellState] of a fixed `width × height` rectangle of cells in a
/// [SimpleGrid], together with the positions of its unique start and destination cells. The grid
/// holds no search state: solvers only read it.
#[derive(Clone, Debug)]
pub struct Grid {
    cells: SimpleGrid<CellState>,
    start: Option<Point>,
    destination: Option<Point>,
}

impl PartialEq for Grid {
    fn eq(&self, other: &Self) -> bool {
        self.cells.width == other.cells.width
            && self.cells.height == other.cells.height
            && self.cells.values == other.cells.values
            && self.start == other.start
            && self.destination == other.destination
    }
}

impl Eq for Grid {}

/// Half-open containment, matching the cells covered by [set_rectangle](grid_util::Grid::set_rectangle).
fn rect_covers(rect: &Rect, point: &Point) -> bool {
    (rect.x1..rect.x2).contains(&point.x) && (rect.y1..rect.y2).contains(&point.y)
}

impl Grid {
    /// Creates a grid with every cell [Free](CellState::Free) and neither a start nor a
    /// destination. Both sizes must be positive and addressable by a [Point].
    pub fn new(width: usize, height: usize) -> GridResult<Grid> {
        let addressable = |n: usize| n > 0 && i32::try_from(n).is_ok();
        if !addressable(width) || !addressable(height) || width.checked_mul(height).is_none() {
            return Err(GridError::InvalidDimensions { width, height });
        }
        Ok(Grid {
            cells: SimpleGrid::new(width, height, CellState::Free),
            start: None,
            destination: None,
        })
    }

    pub fn width(&self) -> usize {
        self.cells.width()
    }

    pub fn height(&self) -> usize {
        self.cells.height()
    }

    pub fn in_bounds(&self, pos: Point) -> bool {
        self.cells.point_in_bounds(pos)
    }

    /// Row-major index of an in-bounds point.
    pub fn get_ix_point(&self, pos: &Point) -> usize {
        debug_assert!(self.in_bounds(*pos));
        self.cells.get_ix_point(pos)
    }

    fn out_of_bounds(&self, pos: Point) -> GridError {
        GridError::OutOfBounds {
            x: pos.x,
            y: pos.y,
            width: self.width(),
            height: self.height(),
        }
    }

    pub fn state(&self, pos: Point) -> Option<CellState> {
        self.in_bounds(pos).then(|| self.cells.get_point(pos))
    }

    /// Predicate for the search loops: out-of-bounds and blocked positions are not traversable.
    pub fn is_traversable(&self, pos: Point) -> bool {
        self.state(pos).is_some_and(CellState::is_traversable)
    }

    pub fn start_position(&self) -> Option<Point> {
        self.start
    }

    pub fn destination_position(&self) -> Option<Point> {
        self.destination
    }

    /// Sets the state of one cell. Assigning [Start](CellState::Start) or
    /// [Destination](CellState::Destination) first frees the previous holder, so each appears at
    /// most once.
    pub fn set_state(&mut self, pos: Point, state: CellState) -> GridResult<()> {
        if !self.in_bounds(pos) {
            return Err(self.out_of_bounds(pos));
        }
        self.assign(pos, state);
        Ok(())
    }

    fn assign(&mut self, pos: Point, state: CellState) {
        let previous = match state {
            CellState::Start => self.start.take(),
            CellState::Destination => self.destination.take(),
            _ => None,
        };
        if let Some(previous) = previous {
            self.cells.set_point(previous, CellState::Free);
        }
        // Overwriting an endpoint with something else forgets it.
        match self.cells.get_point(pos) {
            CellState::Start if state != CellState::Start => self.start = None,
            CellState::Destination if state != CellState::Destination => self.destination = None,
            _ => {}
        }
        self.cells.set_point(pos, state);
        match state {
            CellState::Start => self.start = Some(pos),
            CellState::Destination => self.destination = Some(pos),
            _ => {}
        }
    }

    /// Blocks the rectangle with its top-left corner at `origin`. Nothing is changed if the
    /// rectangle does not fit inside the grid.
    pub fn place_obstacle(&mut self, origin: Point, width: usize, height: usize) -> GridResult<()> {
        if !self.in_bounds(origin) {
            return Err(self.out_of_bounds(origin));
        }
        if width == 0 || height == 0 {
            return Ok(());
        }
        // Both spans are checked in usize, so the far corner fits in i32 once they pass.
        let room_x = self.width() - origin.x as usize;
        let room_y = self.height() - origin.y as usize;
        if width > room_x || height > room_y {
            let far = |o: i32, len: usize| {
                i32::try_from(len - 1)
                    .ok()
                    .and_then(|d| o.checked_add(d))
                    .unwrap_or(i32::MAX)
            };
            return Err(self.out_of_bounds(Point::new(far(origin.x, width), far(origin.y, height))));
        }
        let rect = Rect::new(origin.x, origin.y, width as i32, height as i32);
        if self.start.is_some_and(|p| rect_covers(&rect, &p)) {
            self.start = None;
        }
        if self.destination.is_some_and(|p| rect_covers(&rect, &p)) {
            self.destination = None;
        }
        self.cells.set_rectangle(&rect, CellState::Blocked);
        Ok(())
    }

    /// Recreates the cell array with new dimensions, all cells free.
    pub fn resize(&mut self, width: usize, height: usize) -> GridResult<()> {
        *self = Grid::new(width, height)?;
        debug!("Resized grid to {}x{}", width, height);
        Ok(())
    }

    /// Frees every cell, then puts the start in the first corner and the destination in the
    /// opposite one. On a 1×1 grid both corners are the same cell: the destination takes it and
    /// the grid is left without a start.
    pub fn clear(&mut self) {
        self.cells.values.fill(CellState::Free);
        self.start = None;
        self.destination = None;
        let far = Point::new(self.width() as i32 - 1, self.height() as i32 - 1);
        self.assign(Point::new(0, 0), CellState::Start);
        self.assign(far, CellState::Destination);
    }

    /// All cells with their positions, row by row.
    pub fn iter(&self) -> impl Iterator<Item = (Point, CellState)> + '_ {
        let width = self.width();
        self.cells.values.iter().enumerate().map(move |(ix, &state)| {
            let pos = Point::new((ix % width) as i32, (ix / width) as i32);
            (pos, state)
        })
    }

    /// Number of cells currently in `state`.
    pub fn count(&self, state: CellState) -> usize {
        self.cells.values.iter().filter(|&&s| s == state).count()
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.to_rows(&Legend::default()).iter().join("\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_dimensions() {
        assert_eq!(
            Grid::new(0, 4),
            Err(GridError::InvalidDimensions {
                width: 0,
                height: 4
            })
        );
        assert!(Grid::new(3, 0).is_err());
    }

    /// Sizes that overflow the cell count or cannot be addressed by a point are refused.
    #[test]
    fn rejects_unaddressable_dimensions() {
        assert_eq!(
            Grid::new(usize::MAX, 2),
            Err(GridError::InvalidDimensions {
                width: usize::MAX,
                height: 2
            })
        );
        let too_wide = i32::MAX as usize + 1;
        assert!(Grid::new(too_wide, 1).is_err());
        assert!(Grid::new(1, too_wide).is_err());
    }

    #[test]
    fn new_grid_is_free() {
        let grid = Grid::new(4, 3).unwrap();
        assert_eq!(grid.count(CellState::Free), 12);
        assert_eq!(grid.start_position(), None);
        assert_eq!(grid.destination_position(), None);
    }

    #[test]
    fn out_of_bounds_set_fails() {
        let mut grid = Grid::new(2, 2).unwrap();
        let err = grid.set_state(Point::new(2, 0), CellState::Blocked);
        assert_eq!(
            err,
            Err(GridError::OutOfBounds {
                x: 2,
                y: 0,
                width: 2,
                height: 2
            })
        );
        assert!(grid.set_state(Point::new(0, -1), CellState::Blocked).is_err());
        assert_eq!(grid.count(CellState::Free), 4);
    }

    /// Moving the start around always leaves exactly one start cell behind.
    #[test]
    fn single_start_and_destination() {
        let mut grid = Grid::new(5, 5).unwrap();
        for (x, y) in [(0, 0), (3, 1), (4, 4), (3, 1)] {
            grid.set_state(Point::new(x, y), CellState::Start).unwrap();
            assert_eq!(grid.count(CellState::Start), 1);
            assert_eq!(grid.start_position(), Some(Point::new(x, y)));
        }
        grid.set_state(Point::new(2, 2), CellState::Destination).unwrap();
        grid.set_state(Point::new(2, 3), CellState::Destination).unwrap();
        assert_eq!(grid.count(CellState::Destination), 1);
        assert_eq!(grid.state(Point::new(2, 2)), Some(CellState::Free));
    }

    #[test]
    fn overwriting_endpoint_forgets_it() {
        let mut grid = Grid::new(3, 3).unwrap();
        grid.set_state(Point::new(1, 1), CellState::Start).unwrap();
        grid.set_state(Point::new(1, 1), CellState::Destination).unwrap();
        assert_eq!(grid.start_position(), None);
        assert_eq!(grid.destination_position(), Some(Point::new(1, 1)));
        grid.set_state(Point::new(1, 1), CellState::Blocked).unwrap();
        assert_eq!(grid.destination_position(), None);
    }

    #[test]
    fn traversability() {
        let mut grid = Grid::new(3, 1).unwrap();
        grid.set_state(Point::new(0, 0), CellState::Start).unwrap();
        grid.set_state(Point::new(1, 0), CellState::Blocked).unwrap();
        grid.set_state(Point::new(2, 0), CellState::Destination).unwrap();
        assert!(grid.is_traversable(Point::new(0, 0)));
        assert!(!grid.is_traversable(Point::new(1, 0)));
        assert!(grid.is_traversable(Point::new(2, 0)));
        assert!(!grid.is_traversable(Point::new(3, 0)));
        assert!(!grid.is_traversable(Point::new(-1, 0)));
    }

    #[test]
    fn obstacle_rectangle() {
        let mut grid = Grid::new(10, 10).unwrap();
        grid.place_obstacle(Point::new(2, 3), 4, 2).unwrap();
        assert_eq!(grid.count(CellState::Blocked), 8);
        assert_eq!(grid.state(Point::new(5, 4)), Some(CellState::Blocked));
        assert_eq!(grid.state(Point::new(6, 4)), Some(CellState::Free));
        assert!(grid.place_obstacle(Point::new(8, 8), 3, 1).is_err());
        assert_eq!(grid.count(CellState::Blocked), 8);
    }

    #[test]
    fn oversized_obstacle_is_rejected() {
        let mut grid = Grid::new(10, 10).unwrap();
        assert_eq!(
            grid.place_obstacle(Point::new(5, 0), i32::MAX as usize, 1),
            Err(GridError::OutOfBounds {
                x: i32::MAX,
                y: 0,
                width: 10,
                height: 10
            })
        );
        assert!(grid.place_obstacle(Point::new(0, 5), 1, usize::MAX).is_err());
        assert!(grid.place_obstacle(Point::new(-1, 0), 1, 1).is_err());
        assert_eq!(grid.count(CellState::Blocked), 0);
        // A rectangle reaching exactly to the far edge fits.
        grid.place_obstacle(Point::new(5, 9), 5, 1).unwrap();
        assert_eq!(grid.count(CellState::Blocked), 5);
    }

    #[test]
    fn obstacle_over_endpoint_forgets_it() {
        let mut grid = Grid::new(4, 4).unwrap();
        grid.set_state(Point::new(1, 1), CellState::Start).unwrap();
        grid.set_state(Point::new(3, 3), CellState::Destination).unwrap();
        grid.place_obstacle(Point::new(0, 0), 2, 2).unwrap();
        assert_eq!(grid.start_position(), None);
        assert_eq!(grid.state(Point::new(1, 1)), Some(CellState::Blocked));
        assert_eq!(grid.destination_position(), Some(Point::new(3, 3)));
    }

    #[test]
    fn clear_resets_corners() {
        let mut grid = Grid::new(4, 3).unwrap();
        grid.place_obstacle(Point::new(1, 1), 2, 2).unwrap();
        grid.clear();
        assert_eq!(grid.count(CellState::Blocked), 0);
        assert_eq!(grid.start_position(), Some(Point::new(0, 0)));
        assert_eq!(grid.destination_position(), Some(Point::new(3, 2)));
    }

    #[test]
    fn clear_single_cell_keeps_destination() {
        let mut grid = Grid::new(1, 1).unwrap();
        grid.clear();
        assert_eq!(grid.start_position(), None);
        assert_eq!(grid.destination_position(), Some(Point::new(0, 0)));
        assert_eq!(grid.count(CellState::Start), 0);
    }

    #[test]
    fn resize_recreates() {
        let mut grid = Grid::new(2, 2).unwrap();
        grid.set_state(Point::new(0, 0), CellState::Start).unwrap();
        grid.resize(5, 1).unwrap();
        assert_eq!((grid.width(), grid.height()), (5, 1));
        assert_eq!(grid.start_position(), None);
        assert!(grid.resize(0, 1).is_err());
    }

    #[test]
    fn display_uses_default_legend() {
        let mut grid = Grid::new(3, 2).unwrap();
        grid.set_state(Point::new(0, 0), CellState::Start).unwrap();
        grid.set_state(Point::new(1, 0), CellState::Blocked).unwrap();
        grid.set_state(Point::new(2, 1), CellState::Destination).unwrap();
        assert_eq!(grid.to_string(), "S#.\n..D");
    }
}
