//! Breadth-first search that advances one frontier cell per call, so a presentation layer can
//! render the grid in between steps.

use std::collections::VecDeque;
use std::iter;

use log::{debug, info, warn};

use crate::cell::CellChange;
use crate::config::GridConfig;
use crate::error::{EditRejection, PathfindingError, Result};
use crate::pathing_grid::PathingGrid;
use crate::render::Renderer;
use crate::solver::{SearchOutcome, SearchSession, SearchStatus, StepReport};

/// Owns a [PathingGrid] and the [SearchSession] running on it. Walls can only be edited through
/// the solver, which refuses edits while a search is in progress.
#[derive(Clone, Debug, Default)]
pub struct BfsSolver {
    grid: Option<PathingGrid>,
    session: SearchSession,
}

impl BfsSolver {
    /// A solver without a grid. [start](Self::start) fails until [configure](Self::configure) succeeds.
    pub fn new() -> BfsSolver {
        BfsSolver::default()
    }

    pub fn with_grid(grid: PathingGrid) -> BfsSolver {
        BfsSolver {
            grid: Some(grid),
            session: SearchSession::new(),
        }
    }

    pub fn from_config(config: &GridConfig) -> Result<BfsSolver> {
        Ok(BfsSolver::with_grid(PathingGrid::from_config(config)?))
    }

    /// Replaces the grid, discarding any session. On error the previous grid is kept.
    pub fn configure(&mut self, config: &GridConfig) -> Result<()> {
        let grid = PathingGrid::from_config(config)?;
        self.grid = Some(grid);
        self.session.clear();
        Ok(())
    }

    pub fn grid(&self) -> Result<&PathingGrid> {
        self.grid.as_ref().ok_or(PathfindingError::NotConfigured)
    }
    pub fn status(&self) -> SearchStatus {
        self.session.status
    }
    pub fn session(&self) -> &SearchSession {
        &self.session
    }
    pub fn frontier(&self) -> &VecDeque<usize> {
        &self.session.frontier
    }
    /// The path found by the last search, start and target included.
    pub fn path(&self) -> Option<&[usize]> {
        self.session.path.as_deref()
    }

    /// Toggles a wall while no search is running. Editing after a finished search discards that
    /// search and returns the solver to [Idle](SearchStatus::Idle).
    pub fn toggle_wall(&mut self, index: usize) -> Result<bool> {
        let status = self.session.status;
        let grid = self.grid.as_mut().ok_or(PathfindingError::NotConfigured)?;
        if status == SearchStatus::Searching {
            warn!("Rejected wall toggle at {} during an active search", index);
            return Err(PathfindingError::InvalidEdit {
                index,
                reason: EditRejection::SearchActive,
            });
        }
        let blocked = grid.toggle_wall(index)?;
        if status.is_terminal() {
            grid.reset_search_flags();
            self.session.clear();
        }
        Ok(blocked)
    }

    /// Abandons the current session, if any, and clears all search flags.
    pub fn reset(&mut self) {
        if let Some(grid) = self.grid.as_mut() {
            grid.reset_search_flags();
        }
        self.session.clear();
    }

    /// Begins a new search: clears the flags of any earlier run, marks the start cell visited and
    /// seeds the frontier with it. The report lists every cell whose displayed state changed.
    pub fn start(&mut self) -> Result<StepReport> {
        let grid = self.grid.as_mut().ok_or(PathfindingError::NotConfigured)?;
        let status = self.session.status;
        if status == SearchStatus::Searching {
            return Err(PathfindingError::InvalidState {
                operation: "start",
                status,
            });
        }
        let start = grid.start();
        let target = grid.target();
        let stale = grid
            .cells()
            .iter()
            .filter(|c| c.index != start && (c.visited || c.queued || c.on_path))
            .map(|c| c.index)
            .collect::<Vec<usize>>();
        grid.reset_search_flags();
        self.session.clear();

        grid.update();
        if grid.unreachable(start, target) {
            info!("{} is not reachable from {}, search will exhaust", target, start);
        } else {
            info!("{} is reachable from {}, starting search", target, start);
        }

        let start_cell = grid.cell_mut(start);
        start_cell.visited = true;
        start_cell.queued = true;
        self.session.frontier.push_back(start);
        self.session.status = SearchStatus::Searching;

        let mut changes = stale
            .into_iter()
            .map(|ix| CellChange::of(&grid.cells()[ix]))
            .collect::<Vec<CellChange>>();
        changes.push(CellChange::of(&grid.cells()[start]));
        Ok(StepReport {
            status: SearchStatus::Searching,
            changes,
        })
    }

    /// Dequeues one cell. Reaching the target ends the search with the path reconstructed;
    /// otherwise the cell's open, undiscovered neighbours are queued in
    /// [NEIGHBOUR_ORDER](crate::pathing_grid::NEIGHBOUR_ORDER). An empty frontier after expansion
    /// ends the search as exhausted.
    pub fn step(&mut self) -> Result<StepReport> {
        let grid = self.grid.as_mut().ok_or(PathfindingError::NotConfigured)?;
        let status = self.session.status;
        if status != SearchStatus::Searching {
            return Err(PathfindingError::InvalidState {
                operation: "step",
                status,
            });
        }
        let mut changes = Vec::new();
        let Some(current) = self.session.frontier.pop_front() else {
            // A searching session always holds at least one cell.
            self.session.status = SearchStatus::Exhausted;
            return Ok(StepReport {
                status: SearchStatus::Exhausted,
                changes,
            });
        };
        grid.cell_mut(current).visited = true;

        if current == grid.target() {
            let path = reconstruct_path(grid, current);
            let (start, target) = (grid.start(), grid.target());
            for &ix in path.iter().filter(|&&ix| ix != start && ix != target) {
                let cell = grid.cell_mut(ix);
                cell.on_path = true;
                changes.push(CellChange::of(cell));
            }
            info!(
                "Found path of length {} from {} to {}",
                path.len() - 1,
                start,
                target
            );
            self.session.path = Some(path);
            self.session.status = SearchStatus::Found;
            return Ok(StepReport {
                status: SearchStatus::Found,
                changes,
            });
        }

        changes.push(CellChange::of(&grid.cells()[current]));
        for n in grid.neighbours(current) {
            let cell = grid.cell_mut(n);
            if cell.is_wall || cell.queued {
                continue;
            }
            debug_assert!(cell.parent.is_none());
            cell.parent = Some(current);
            cell.queued = true;
            changes.push(CellChange::of(cell));
            self.session.frontier.push_back(n);
        }
        debug!(
            "Expanded {}, {} cells in frontier",
            current,
            self.session.frontier.len()
        );

        if self.session.frontier.is_empty() {
            info!(
                "Frontier exhausted, {} is not reachable from {}",
                grid.target(),
                grid.start()
            );
            self.session.status = SearchStatus::Exhausted;
        }
        Ok(StepReport {
            status: self.session.status,
            changes,
        })
    }

    /// Runs a search to completion. Starts a new search unless one is already in progress.
    pub fn run(&mut self) -> Result<SearchOutcome> {
        self.drive(|_, _| {})
    }

    /// Like [run](Self::run), handing every report to `renderer` as it is produced.
    pub fn run_with<R>(&mut self, renderer: &mut R) -> Result<SearchOutcome>
    where
        R: Renderer + ?Sized,
    {
        self.drive(|grid, report| renderer.render(grid, report))
    }

    fn drive<F>(&mut self, mut observe: F) -> Result<SearchOutcome>
    where
        F: FnMut(&PathingGrid, &StepReport),
    {
        if self.session.status != SearchStatus::Searching {
            let report = self.start()?;
            observe(self.grid()?, &report);
        }
        while self.session.status == SearchStatus::Searching {
            let report = self.step()?;
            observe(self.grid()?, &report);
        }
        Ok(match &self.session.path {
            Some(path) => SearchOutcome::Found(path.clone()),
            None => SearchOutcome::Exhausted,
        })
    }
}

/// Follows parent links from `target` back to the start and returns the path in start-to-target
/// order. Parent links form a tree rooted at the start, so the walk is bounded by the cell count.
fn reconstruct_path(grid: &PathingGrid, target: usize) -> Vec<usize> {
    let start = grid.start();
    let mut path = iter::successors(Some(target), |&ix| {
        if ix == start {
            None
        } else {
            grid.cells()[ix].parent
        }
    })
    .take(grid.len())
    .collect::<Vec<usize>>();
    path.reverse();
    debug_assert_eq!(path.first(), Some(&start));
    path
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::cell::CellState;
    use crate::render::ChangeLog;

    fn solver(width: usize, start: usize, target: usize, walls: &[usize]) -> BfsSolver {
        let config = GridConfig::new(width, start, target).with_walls(walls.iter().copied());
        BfsSolver::from_config(&config).unwrap()
    }

    fn is_contiguous(grid: &PathingGrid, path: &[usize]) -> bool {
        path.windows(2)
            .all(|pair| grid.neighbours(pair[0]).contains(&pair[1]))
    }

    #[test]
    fn open_grid_path_matches_manhattan_distance() {
        let mut solver = solver(5, 0, 24, &[]);
        let outcome = solver.run().unwrap();
        let path = outcome.path().unwrap();
        assert_eq!(path.len(), 9);
        assert_eq!(path, &[0, 1, 2, 3, 4, 9, 14, 19, 24]);
        let grid = solver.grid().unwrap();
        assert_eq!(path.len() - 1, grid.manhattan_distance(0, 24));
        assert!(is_contiguous(grid, path));
        assert_eq!(solver.status(), SearchStatus::Found);
    }

    #[test]
    fn detour_around_partial_wall() {
        let mut solver = solver(3, 0, 2, &[1, 4]);
        let outcome = solver.run().unwrap();
        assert_eq!(outcome, SearchOutcome::Found(vec![0, 3, 6, 7, 8, 5, 2]));
        let grid = solver.grid().unwrap();
        let on_path = grid
            .cells()
            .iter()
            .filter(|c| c.on_path)
            .map(|c| c.index)
            .collect::<Vec<_>>();
        assert_eq!(on_path, vec![3, 5, 6, 7, 8]);
    }

    #[test]
    fn wall_cut_exhausts_with_empty_frontier() {
        let mut solver = solver(3, 0, 2, &[1, 4, 7]);
        assert_eq!(solver.run().unwrap(), SearchOutcome::Exhausted);
        assert_eq!(solver.status(), SearchStatus::Exhausted);
        assert!(solver.frontier().is_empty());
        assert_eq!(solver.path(), None);
        let grid = solver.grid().unwrap();
        assert!(!grid.cell(2).unwrap().visited);
        assert!(grid.cells().iter().all(|c| !c.on_path));
    }

    #[test]
    fn step_counts_and_reports() {
        let mut solver = solver(3, 0, 2, &[1, 4, 7]);
        let report = solver.start().unwrap();
        assert_eq!(
            report.changes,
            vec![CellChange {
                index: 0,
                state: CellState::Start
            }]
        );
        let report = solver.step().unwrap();
        assert_eq!(report.status, SearchStatus::Searching);
        assert_eq!(
            report.changes,
            vec![
                CellChange {
                    index: 0,
                    state: CellState::Start
                },
                CellChange {
                    index: 3,
                    state: CellState::Queued
                }
            ]
        );
        let report = solver.step().unwrap();
        assert_eq!(
            report.changes,
            vec![
                CellChange {
                    index: 3,
                    state: CellState::Visited
                },
                CellChange {
                    index: 6,
                    state: CellState::Queued
                }
            ]
        );
        let report = solver.step().unwrap();
        assert_eq!(report.status, SearchStatus::Exhausted);
    }

    #[test]
    fn step_after_found_is_rejected() {
        let mut solver = solver(5, 0, 24, &[]);
        solver.run().unwrap();
        let path = solver.path().unwrap().to_vec();
        let frontier = solver.frontier().clone();
        for _ in 0..2 {
            assert_eq!(
                solver.step(),
                Err(PathfindingError::InvalidState {
                    operation: "step",
                    status: SearchStatus::Found
                })
            );
        }
        assert_eq!(solver.path(), Some(path.as_slice()));
        assert_eq!(solver.frontier(), &frontier);
    }

    #[test]
    fn step_before_start_is_rejected() {
        let mut solver = solver(3, 0, 8, &[]);
        assert!(matches!(
            solver.step(),
            Err(PathfindingError::InvalidState {
                status: SearchStatus::Idle,
                ..
            })
        ));
    }

    #[test]
    fn unconfigured_solver() {
        let mut solver = BfsSolver::new();
        assert_eq!(solver.start(), Err(PathfindingError::NotConfigured));
        assert_eq!(solver.run(), Err(PathfindingError::NotConfigured));
        assert_eq!(solver.toggle_wall(0), Err(PathfindingError::NotConfigured));
        assert!(solver.grid().is_err());
        assert!(solver.configure(&GridConfig::new(0, 0, 0)).is_err());
        solver.configure(&GridConfig::new(2, 0, 3)).unwrap();
        assert_eq!(solver.run().unwrap(), SearchOutcome::Found(vec![0, 1, 3]));
    }

    #[test]
    fn start_twice_is_rejected() {
        let mut solver = solver(3, 0, 8, &[]);
        solver.start().unwrap();
        assert!(matches!(
            solver.start(),
            Err(PathfindingError::InvalidState {
                operation: "start",
                ..
            })
        ));
    }

    #[test]
    fn walls_frozen_during_search() {
        let mut solver = solver(3, 0, 8, &[]);
        solver.start().unwrap();
        solver.step().unwrap();
        assert_eq!(
            solver.toggle_wall(4),
            Err(PathfindingError::InvalidEdit {
                index: 4,
                reason: EditRejection::SearchActive
            })
        );
        assert!(!solver.grid().unwrap().is_wall(4));
        solver.reset();
        assert_eq!(solver.status(), SearchStatus::Idle);
        assert_eq!(solver.toggle_wall(4), Ok(true));
    }

    #[test]
    fn endpoints_cannot_become_walls() {
        let mut solver = solver(3, 0, 8, &[]);
        for ix in [0, 8] {
            assert!(matches!(
                solver.toggle_wall(ix),
                Err(PathfindingError::InvalidEdit {
                    reason: EditRejection::Endpoint,
                    ..
                })
            ));
            assert!(!solver.grid().unwrap().is_wall(ix));
        }
    }

    #[test]
    fn edit_after_search_returns_to_idle() {
        let mut solver = solver(3, 0, 2, &[1, 4]);
        solver.run().unwrap();
        assert_eq!(solver.toggle_wall(7), Ok(true));
        assert_eq!(solver.status(), SearchStatus::Idle);
        assert_eq!(solver.path(), None);
        assert!(solver.grid().unwrap().cells().iter().all(|c| !c.queued));
        assert_eq!(solver.run().unwrap(), SearchOutcome::Exhausted);
    }

    #[test]
    fn restart_reports_cleared_cells() {
        let mut solver = solver(3, 0, 2, &[1, 4, 7]);
        solver.run().unwrap();
        let report = solver.start().unwrap();
        let states = report
            .changes
            .iter()
            .map(|c| (c.index, c.state))
            .collect::<Vec<_>>();
        assert_eq!(
            states,
            vec![
                (3, CellState::Unvisited),
                (6, CellState::Unvisited),
                (0, CellState::Start)
            ]
        );
    }

    #[test]
    fn parents_and_frontier_invariants() {
        let mut solver = solver(6, 7, 28, &[8, 14, 20, 26, 21]);
        solver.start().unwrap();
        let mut parents: HashMap<usize, usize> = HashMap::new();
        while solver.status() == SearchStatus::Searching {
            solver.step().unwrap();
            let frontier = solver.frontier();
            let mut seen = frontier.iter().collect::<Vec<_>>();
            seen.sort();
            seen.dedup();
            assert_eq!(seen.len(), frontier.len());
            for cell in solver.grid().unwrap().cells() {
                if let Some(p) = cell.parent {
                    assert!(!cell.is_wall && !cell.is_start);
                    assert_eq!(*parents.entry(cell.index).or_insert(p), p);
                }
            }
        }
        let grid = solver.grid().unwrap();
        let path = solver.path().unwrap();
        assert!(is_contiguous(grid, path));
        assert!(path.iter().all(|&ix| !grid.is_wall(ix)));
    }

    #[test]
    fn run_with_renders_every_step() {
        let mut solver = solver(5, 0, 24, &[]);
        let mut log = ChangeLog::default();
        solver.run_with(&mut log).unwrap();
        // One report for start and one per dequeued cell.
        assert_eq!(log.reports.len(), 1 + 25);
        assert_eq!(log.reports.last().unwrap().status, SearchStatus::Found);
        let path_changes = log
            .reports
            .last()
            .unwrap()
            .changes
            .iter()
            .filter(|c| c.state == CellState::Path)
            .count();
        assert_eq!(path_changes, 7);
    }
}
