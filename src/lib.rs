//! # grid_bfs
//!
//! Step-wise [breadth-first search](https://en.wikipedia.org/wiki/Breadth-first_search) on an
//! editable square grid. Cells can be toggled into walls before a search; the search moves over
//! the 4-neighbourhood, visits every cell at most once and, on reaching the target, rebuilds the
//! shortest path from the parent links it recorded along the way.
//!
//! A search is driven by the caller one [step](solver::bfs::BfsSolver::step) at a time. Each step
//! reports the cells whose displayed state changed so a [Renderer](render::Renderer) can redraw
//! only those. [run](solver::bfs::BfsSolver::run) drives a search to completion in one go.
//!
//! ```
//! use grid_bfs::{BfsSolver, GridConfig, SearchOutcome};
//!
//! // |S#T|
//! // | # |
//! // |   |
//! let config = GridConfig::new(3, 0, 2).with_walls([1, 4]);
//! let mut solver = BfsSolver::from_config(&config).unwrap();
//! let outcome = solver.run().unwrap();
//! assert_eq!(outcome, SearchOutcome::Found(vec![0, 3, 6, 7, 8, 5, 2]));
//! ```
pub mod cell;
pub mod config;
pub mod error;
pub mod pathing_grid;
pub mod render;
pub mod solver;

pub use cell::{Cell, CellChange, CellState};
pub use config::GridConfig;
pub use error::{ConfigError, EditRejection, PathfindingError, Result};
pub use pathing_grid::{PathingGrid, Side, NEIGHBOUR_ORDER};
pub use render::{ChangeLog, Renderer, TextRenderer};
pub use solver::bfs::BfsSolver;
pub use solver::{SearchOutcome, SearchSession, SearchStatus, StepReport};
