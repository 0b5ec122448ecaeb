use grid_route::solver::astar::Heuristic;
use grid_route::{
    AstarSearch, CellState, Connectivity, CursorState, Grid, Legend, Point, RandomWalk,
    RouteCursor, RouteFinder, RouteOverlay, Strategy,
};
use itertools::Itertools;

/// 10x10 grid with the start at (4, 1), the destination at (5, 7) and a 4x2 block in between.
fn blocked_scenario() -> Grid {
    let mut grid = Grid::new(10, 10).unwrap();
    grid.place_obstacle(Point::new(2, 3), 4, 2).unwrap();
    grid.set_state(Point::new(4, 1), CellState::Start).unwrap();
    grid.set_state(Point::new(5, 7), CellState::Destination).unwrap();
    grid
}

fn chebyshev(a: Point, b: Point) -> usize {
    (a.x - b.x).abs().max((a.y - b.y).abs()) as usize
}

#[test]
fn routes_around_block() {
    let grid = blocked_scenario();
    let route = AstarSearch::new().find_route(&grid);
    let expected: Vec<Point> = [(5, 2), (6, 3), (6, 4), (5, 5), (5, 6), (5, 7)]
        .into_iter()
        .map(|(x, y)| Point::new(x, y))
        .collect();
    assert_eq!(route.cells(), expected.as_slice());
    assert!(route.len() >= chebyshev(Point::new(4, 1), Point::new(5, 7)));
    assert!(route
        .iter()
        .all(|p| grid.state(*p) != Some(CellState::Blocked)));
}

#[test]
fn routes_around_block_four_connected() {
    let grid = blocked_scenario();
    let route = AstarSearch::new()
        .with_connectivity(Connectivity::Four)
        .find_route(&grid);
    assert_eq!(route.len(), 9);
    assert!(route
        .iter()
        .tuple_windows()
        .all(|(a, b)| Connectivity::Four.is_adjacent(a, b)));
}

/// On a grid without obstacles the route takes exactly as many steps as the Chebyshev distance,
/// whichever heuristic is used.
#[test]
fn open_plane_lengths() {
    for (start, end) in [((0, 0), (9, 9)), ((2, 7), (8, 1)), ((5, 5), (5, 0)), ((9, 3), (0, 4))] {
        let start = Point::new(start.0, start.1);
        let end = Point::new(end.0, end.1);
        let mut grid = Grid::new(10, 10).unwrap();
        grid.set_state(start, CellState::Start).unwrap();
        grid.set_state(end, CellState::Destination).unwrap();
        for heuristic in [Heuristic::Manhattan, Heuristic::Chebyshev] {
            let route = AstarSearch::new()
                .with_heuristic(heuristic)
                .find_route(&grid);
            assert_eq!(route.len(), chebyshev(start, end));
            assert_eq!(route.last(), Some(&end));
        }
    }
}

#[test]
fn walled_in_destination() {
    let level = "\
S.........
..........
......###.
......#D#.
......###.
..........";
    let grid = Grid::from_level_str(level, &Legend::default()).unwrap();
    let mut astar: Strategy = AstarSearch::new().into();
    let mut walk: Strategy = RandomWalk::with_seed(5).into();
    assert!(astar.find_route(&grid).is_empty());
    let walked = walk.find_route(&grid);
    assert!(!walked.reached_destination());
    assert_eq!(walked.len(), grid_route::solver::random_walk::DEFAULT_STEP_BUDGET);
    assert_ne!(walked.last(), grid.destination_position().as_ref());
}

/// Search, reveal step by step into an overlay, then start over.
#[test]
fn search_and_reveal() {
    let grid = blocked_scenario();
    let route = AstarSearch::new().find_route(&grid);
    let mut overlay = RouteOverlay::new();
    let mut cursor = RouteCursor::with_route(route.clone());
    let mut steps = 0;
    while let Some(step) = cursor.advance_into(&mut overlay) {
        assert_eq!(step.index, steps);
        assert_eq!(overlay.head(), Some(step.cell));
        steps += 1;
    }
    assert_eq!(steps, route.len());
    assert_eq!(cursor.state(), CursorState::Done);
    let on_route = route
        .iter()
        .filter(|p| overlay.state_at(&grid, **p) == Some(CellState::OnRoute))
        .count();
    // Every route cell but the destination is drawn as on-route.
    assert_eq!(on_route, route.len() - 1);
    cursor.reset_into(&mut overlay);
    assert_eq!(overlay.cells().count(), 0);
    assert_eq!(cursor.state(), CursorState::Idle);
}
