use core::fmt;

/// The state a presentation layer should show for a cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CellState {
    Unvisited,
    Queued,
    Visited,
    Path,
    Wall,
    Start,
    Target,
}

impl CellState {
    /// Single character used by the text rendering of a grid.
    pub fn symbol(self) -> char {
        match self {
            CellState::Unvisited => '.',
            CellState::Queued => 'o',
            CellState::Visited => 'x',
            CellState::Path => '*',
            CellState::Wall => '#',
            CellState::Start => 'S',
            CellState::Target => 'T',
        }
    }
}

impl fmt::Display for CellState {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// One grid position with its static flags and the flags of the running search.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cell {
    pub index: usize,
    pub is_wall: bool,
    pub is_start: bool,
    pub is_target: bool,
    /// Set once the cell has been dequeued and processed.
    pub visited: bool,
    /// Set once the cell has entered the frontier; never cleared within a search.
    pub queued: bool,
    /// The cell that discovered this one. First discovery wins.
    pub parent: Option<usize>,
    pub on_path: bool,
}

impl Cell {
    pub fn new(index: usize) -> Cell {
        Cell {
            index,
            is_wall: false,
            is_start: false,
            is_target: false,
            visited: false,
            queued: false,
            parent: None,
            on_path: false,
        }
    }

    /// Collapses the flags into the one state worth showing. Static roles take
    /// precedence over search progress.
    pub fn state(&self) -> CellState {
        if self.is_wall {
            CellState::Wall
        } else if self.is_start {
            CellState::Start
        } else if self.is_target {
            CellState::Target
        } else if self.on_path {
            CellState::Path
        } else if self.visited {
            CellState::Visited
        } else if self.queued {
            CellState::Queued
        } else {
            CellState::Unvisited
        }
    }

    pub(crate) fn clear_search_flags(&mut self) {
        self.visited = false;
        self.queued = false;
        self.parent = None;
        self.on_path = false;
    }
}

/// A cell whose displayed state changed, together with the new state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CellChange {
    pub index: usize,
    pub state: CellState,
}

impl CellChange {
    pub fn of(cell: &Cell) -> CellChange {
        CellChange {
            index: cell.index,
            state: cell.state(),
        }
    }
}
