use grid_route::{AstarSearch, Grid, Legend, RouteFinder};

// In this example a route is found on a grid with shape
// #####
// #S..#
// #.#.#
// #..D#
// #####
// where
// - # marks an obstacle
// - S marks the start
// - D marks the destination
//
// Nodes have an 8-neighborhood
fn main() {
    let level = "#####\n#S..#\n#.#.#\n#..D#\n#####";
    let grid = Grid::from_level_str(level, &Legend::default()).unwrap();
    println!("{}", grid);
    let route = AstarSearch::new().find_route(&grid);
    if route.reached_destination() {
        println!("A route has been found:");
        for p in &route {
            println!("{:?}", p);
        }
    }
}
