use core::fmt;
use std::collections::VecDeque;

use crate::cell::CellChange;

pub mod bfs;

/// Lifecycle of a search: `Idle -> Searching -> {Found, Exhausted}`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SearchStatus {
    #[default]
    Idle,
    Searching,
    Found,
    Exhausted,
}

impl SearchStatus {
    /// [true] for [Found](SearchStatus::Found) and [Exhausted](SearchStatus::Exhausted).
    pub fn is_terminal(self) -> bool {
        matches!(self, SearchStatus::Found | SearchStatus::Exhausted)
    }
}

impl fmt::Display for SearchStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            SearchStatus::Idle => "idle",
            SearchStatus::Searching => "searching",
            SearchStatus::Found => "found",
            SearchStatus::Exhausted => "exhausted",
        };
        f.write_str(name)
    }
}

/// State of one search run: the FIFO frontier, the status and, once found, the path.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchSession {
    pub frontier: VecDeque<usize>,
    pub status: SearchStatus,
    pub path: Option<Vec<usize>>,
}

impl SearchSession {
    pub fn new() -> SearchSession {
        SearchSession::default()
    }
    /// Discards the frontier and path and returns to [Idle](SearchStatus::Idle).
    pub fn clear(&mut self) {
        self.frontier.clear();
        self.status = SearchStatus::Idle;
        self.path = None;
    }
}

/// What a single `start` or `step` call changed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StepReport {
    /// Status after the call.
    pub status: SearchStatus,
    /// Cells whose displayed state changed, in the order they changed.
    pub changes: Vec<CellChange>,
}

/// Result of running a search to completion.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SearchOutcome {
    /// The shortest path from start to target, both included.
    Found(Vec<usize>),
    /// Every reachable cell was visited without meeting the target.
    Exhausted,
}

impl SearchOutcome {
    pub fn path(&self) -> Option<&[usize]> {
        match self {
            SearchOutcome::Found(path) => Some(path),
            SearchOutcome::Exhausted => None,
        }
    }
}
