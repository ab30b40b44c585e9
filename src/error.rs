//! Error types for grid configuration, wall edits and search control.

use core::fmt;
use thiserror::Error;

use crate::solver::SearchStatus;

/// Which configured cell an out-of-bounds index belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CellRole {
    Start,
    Target,
    Wall,
}

impl fmt::Display for CellRole {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            CellRole::Start => "start",
            CellRole::Target => "target",
            CellRole::Wall => "wall",
        };
        f.write_str(name)
    }
}

/// Rejected grid configuration. The grid is left untouched and has to be configured again.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("grid width must be at least 1")]
    ZeroWidth,

    #[error("a grid of width {0} has more cells than can be addressed")]
    TooLarge(usize),

    #[error("{role} index {index} is outside of a grid with {len} cells")]
    OutOfBounds {
        role: CellRole,
        index: usize,
        len: usize,
    },

    #[error("start and target both refer to cell {0}")]
    StartIsTarget(usize),

    #[error("cell {0} is the start or target and cannot be a wall")]
    WallOnEndpoint(usize),
}

/// Why a wall toggle was refused.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EditRejection {
    /// The cell is the start or the target.
    Endpoint,
    /// The index does not address a cell of the grid.
    OutOfBounds,
    /// A search is running; walls are frozen until it ends or is reset.
    SearchActive,
}

impl fmt::Display for EditRejection {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let reason = match self {
            EditRejection::Endpoint => "start and target cells cannot become walls",
            EditRejection::OutOfBounds => "index is outside of the grid",
            EditRejection::SearchActive => "walls cannot change while a search is running",
        };
        f.write_str(reason)
    }
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum PathfindingError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("cannot toggle wall at cell {index}: {reason}")]
    InvalidEdit { index: usize, reason: EditRejection },

    /// An operation was called outside of the state it is defined for. This is a
    /// contract violation by the caller rather than a runtime condition.
    #[error("`{operation}` is not valid while the search is {status}")]
    InvalidState {
        operation: &'static str,
        status: SearchStatus,
    },

    #[error("no grid has been configured")]
    NotConfigured,
}

pub type Result<T> = std::result::Result<T, PathfindingError>;
