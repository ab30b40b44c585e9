use grid_bfs::{BfsSolver, GridConfig, SearchOutcome};

// In this example a path is found on a 5x5 grid with shape
//  _____
// |S    |
// |#### |
// |     |
// | ####|
// |    T|
//  _____
// where
// - # marks a wall
// - S marks the start
// - T marks the target

fn main() {
    let config = GridConfig::new(5, 0, 24).with_walls([5, 6, 7, 8, 16, 17, 18, 19]);
    let mut solver = BfsSolver::from_config(&config).unwrap();
    match solver.run().unwrap() {
        SearchOutcome::Found(path) => {
            println!("{}", solver.grid().unwrap());
            println!("Path of {} steps:", path.len() - 1);
            let grid = solver.grid().unwrap();
            for ix in path {
                let p = grid.point(ix);
                println!("{} at ({}, {})", ix, p.x, p.y);
            }
        }
        SearchOutcome::Exhausted => println!("No path exists"),
    }
}
