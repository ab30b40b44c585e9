//! Grid configuration.

use crate::error::{CellRole, ConfigError};

/// Width of the default grid.
pub const DEFAULT_WIDTH: usize = 15;
/// Start cell of the default grid (row 2, column 2).
pub const DEFAULT_START: usize = 32;
/// Target cell of the default grid (row 10, column 11).
pub const DEFAULT_TARGET: usize = 161;

/// Describes a square grid: its width, the start and target cells and the initial wall set.
/// Cells are addressed by `row * width + col`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GridConfig {
    pub width: usize,
    pub start: usize,
    pub target: usize,
    pub walls: Vec<usize>,
}

impl Default for GridConfig {
    fn default() -> GridConfig {
        GridConfig::new(DEFAULT_WIDTH, DEFAULT_START, DEFAULT_TARGET)
    }
}

impl GridConfig {
    pub fn new(width: usize, start: usize, target: usize) -> GridConfig {
        GridConfig {
            width,
            start,
            target,
            walls: Vec::new(),
        }
    }

    pub fn with_wall(mut self, index: usize) -> GridConfig {
        self.walls.push(index);
        self
    }

    pub fn with_walls<I>(mut self, walls: I) -> GridConfig
    where
        I: IntoIterator<Item = usize>,
    {
        self.walls.extend(walls);
        self
    }

    /// Number of cells described, or [ConfigError] if the width is zero or too large.
    pub fn cell_count(&self) -> Result<usize, ConfigError> {
        if self.width == 0 {
            return Err(ConfigError::ZeroWidth);
        }
        // Coordinates are handed out as i32 points, so every row and column must fit.
        if self.width > i32::MAX as usize {
            return Err(ConfigError::TooLarge(self.width));
        }
        self.width
            .checked_mul(self.width)
            .ok_or(ConfigError::TooLarge(self.width))
    }

    /// Checks every rule a configuration has to satisfy before a grid can be built from it.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let len = self.cell_count()?;
        let in_bounds = |role, index| {
            if index < len {
                Ok(())
            } else {
                Err(ConfigError::OutOfBounds { role, index, len })
            }
        };
        in_bounds(CellRole::Start, self.start)?;
        in_bounds(CellRole::Target, self.target)?;
        if self.start == self.target {
            return Err(ConfigError::StartIsTarget(self.start));
        }
        for &wall in &self.walls {
            in_bounds(CellRole::Wall, wall)?;
            if wall == self.start || wall == self.target {
                return Err(ConfigError::WallOnEndpoint(wall));
            }
        }
        Ok(())
    }
}
