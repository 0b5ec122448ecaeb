use crate::grid::{CellState, Grid};
use crate::FxIndexSet;
use grid_util::point::Point;
use log::trace;

/// The cells leading from the start (not included) towards the destination, as produced by a
/// single search. A route is complete when it ends on the destination; an empty route means
/// nothing was found.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Route {
    cells: Vec<Point>,
    reached_destination: bool,
}

impl Route {
    pub fn new(cells: Vec<Point>, reached_destination: bool) -> Route {
        Route {
            cells,
            reached_destination,
        }
    }

    pub fn empty() -> Route {
        Route::default()
    }

    pub fn cells(&self) -> &[Point] {
        &self.cells
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Whether the search ended on the destination. A random walk that runs out of steps
    /// returns a non-empty route for which this is false.
    pub fn reached_destination(&self) -> bool {
        self.reached_destination
    }

    pub fn last(&self) -> Option<&Point> {
        self.cells.last()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Point> {
        self.cells.iter()
    }
}

impl<'a> IntoIterator for &'a Route {
    type Item = &'a Point;
    type IntoIter = std::slice::Iter<'a, Point>;

    fn into_iter(self) -> Self::IntoIter {
        self.cells.iter()
    }
}

/// One cell becoming visible. The new cell is the head of the revealed route; the head before
/// it, if any, is now part of the trail.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RevealStep {
    pub index: usize,
    pub cell: Point,
    pub previous_head: Option<Point>,
}

/// Receives the cursor's reveal events, typically to draw them.
pub trait RouteDisplay {
    fn reveal(&mut self, step: &RevealStep);
    /// Removes every revealed marking.
    fn clear(&mut self);
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum CursorState {
    /// Nothing loaded, or reset.
    #[default]
    Idle,
    Revealing,
    /// Every cell of the route has been revealed.
    Done,
}

/// Reveals a [Route] one cell per [advance](RouteCursor::advance) call.
#[derive(Clone, Debug, Default)]
pub struct RouteCursor {
    route: Route,
    index: usize,
    state: CursorState,
}

impl RouteCursor {
    pub fn new() -> RouteCursor {
        RouteCursor::default()
    }

    pub fn with_route(route: Route) -> RouteCursor {
        let mut cursor = RouteCursor::new();
        cursor.load(route);
        cursor
    }

    /// Replaces the route and starts revealing it from the first cell. An empty route is done
    /// straight away.
    pub fn load(&mut self, route: Route) {
        self.route = route;
        self.rewind();
    }

    /// Starts revealing the loaded route again from the first cell.
    pub fn rewind(&mut self) {
        self.index = 0;
        self.state = if self.route.is_empty() {
            CursorState::Done
        } else {
            CursorState::Revealing
        };
    }

    /// Reveals the next cell. Does nothing unless the cursor is
    /// [Revealing](CursorState::Revealing).
    pub fn advance(&mut self) -> Option<RevealStep> {
        if self.state != CursorState::Revealing {
            return None;
        }
        let step = RevealStep {
            index: self.index,
            cell: *self.route.cells.get(self.index)?,
            previous_head: self.head(),
        };
        self.index += 1;
        if self.index == self.route.len() {
            self.state = CursorState::Done;
        }
        trace!("Revealed route cell {} at {}", step.index, step.cell);
        Some(step)
    }

    /// Like [advance](RouteCursor::advance), handing the step to `display`.
    pub fn advance_into<D>(&mut self, display: &mut D) -> Option<RevealStep>
    where
        D: RouteDisplay + ?Sized,
    {
        let step = self.advance()?;
        display.reveal(&step);
        Some(step)
    }

    /// Back to [Idle](CursorState::Idle) with nothing revealed. The route stays loaded and
    /// [rewind](RouteCursor::rewind) starts it over.
    pub fn reset(&mut self) {
        self.index = 0;
        self.state = CursorState::Idle;
    }

    pub fn reset_into<D: RouteDisplay + ?Sized>(&mut self, display: &mut D) {
        self.reset();
        display.clear();
    }

    pub fn state(&self) -> CursorState {
        self.state
    }

    pub fn route(&self) -> &Route {
        &self.route
    }

    pub fn revealed(&self) -> &[Point] {
        &self.route.cells[..self.index]
    }

    /// The most recently revealed cell.
    pub fn head(&self) -> Option<Point> {
        self.revealed().last().copied()
    }

    pub fn remaining(&self) -> usize {
        self.route.len() - self.index
    }
}

/// Keeps the revealed cells of a route next to a [Grid] without changing it, so that a display
/// can ask which state to draw for each cell.
#[derive(Clone, Debug, Default)]
pub struct RouteOverlay {
    revealed: FxIndexSet<Point>,
    head: Option<Point>,
}

impl RouteDisplay for RouteOverlay {
    fn reveal(&mut self, step: &RevealStep) {
        self.revealed.insert(step.cell);
        self.head = Some(step.cell);
    }

    fn clear(&mut self) {
        self.revealed.clear();
        self.head = None;
    }
}

impl RouteOverlay {
    pub fn new() -> RouteOverlay {
        RouteOverlay::default()
    }

    pub fn is_on_route(&self, pos: &Point) -> bool {
        self.revealed.contains(pos)
    }

    pub fn head(&self) -> Option<Point> {
        self.head
    }

    /// Revealed cells in reveal order, each listed once.
    pub fn cells(&self) -> impl Iterator<Item = &Point> {
        self.revealed.iter()
    }

    /// The state to draw at `pos`: [OnRoute](CellState::OnRoute) for revealed free cells, the
    /// grid's own state otherwise. The endpoints keep their state.
    pub fn state_at(&self, grid: &Grid, pos: Point) -> Option<CellState> {
        let state = grid.state(pos)?;
        if state == CellState::Free && self.is_on_route(&pos) {
            Some(CellState::OnRoute)
        } else {
            Some(state)
        }
    }
}
