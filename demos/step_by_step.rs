use grid_bfs::{BfsSolver, GridConfig, Renderer, TextRenderer};
use std::io;

// Walls are toggled on the default 15x15 grid before the search is advanced one step at a time.
// Each step redraws the grid, the way a presentation layer would between timer ticks.

fn main() {
    let mut solver = BfsSolver::from_config(&GridConfig::default()).unwrap();
    // A vertical wall between start and target with a gap in the bottom row.
    for row in 0..14 {
        solver.toggle_wall(row * 15 + 7).unwrap();
    }
    let mut renderer = TextRenderer::new(io::stdout().lock());
    let report = solver.start().unwrap();
    renderer.render(solver.grid().unwrap(), &report);
    while !solver.status().is_terminal() {
        let report = solver.step().unwrap();
        renderer.render(solver.grid().unwrap(), &report);
    }
    match solver.path() {
        Some(path) => println!(
            "Path of {} steps after {} frames",
            path.len() - 1,
            renderer.frames()
        ),
        None => println!("No path exists"),
    }
}
