use core::fmt;
use grid_util::point::Point;
use itertools::Itertools;
use log::{info, warn};
use petgraph::unionfind::UnionFind;
use smallvec::SmallVec;

use crate::cell::Cell;
use crate::config::GridConfig;
use crate::error::{ConfigError, EditRejection, PathfindingError, Result};

/// One of the four orthogonal moves on the grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Side {
    Up,
    Right,
    Left,
    Down,
}

/// Order in which neighbours are produced and therefore expanded. It decides which of several
/// equally short paths a search returns.
pub const NEIGHBOUR_ORDER: [Side; 4] = [Side::Up, Side::Right, Side::Left, Side::Down];

/// [PathingGrid] is the square grid a search runs on. It owns one [Cell] per position, addressed
/// by `row * width + col`, and maintains connected components of the open cells using a
/// [UnionFind] structure so reachability can be answered without searching.
#[derive(Clone, Debug)]
pub struct PathingGrid {
    width: usize,
    start: usize,
    target: usize,
    cells: Vec<Cell>,
    pub components: UnionFind<usize>,
    pub components_dirty: bool,
}

impl PathingGrid {
    /// Allocates a `width * width` grid without walls.
    pub fn configure(
        width: usize,
        start: usize,
        target: usize,
    ) -> std::result::Result<PathingGrid, ConfigError> {
        PathingGrid::from_config(&GridConfig::new(width, start, target))
    }

    /// Builds a grid from a validated [GridConfig], including its initial walls.
    pub fn from_config(config: &GridConfig) -> std::result::Result<PathingGrid, ConfigError> {
        config.validate()?;
        let len = config.width * config.width;
        let mut cells = (0..len).map(Cell::new).collect::<Vec<Cell>>();
        cells[config.start].is_start = true;
        cells[config.target].is_target = true;
        for &wall in &config.walls {
            cells[wall].is_wall = true;
        }
        let mut grid = PathingGrid {
            width: config.width,
            start: config.start,
            target: config.target,
            cells,
            components: UnionFind::new(len),
            components_dirty: false,
        };
        grid.generate_components();
        info!(
            "Configured {0}x{0} grid with start {1}, target {2} and {3} walls",
            grid.width,
            grid.start,
            grid.target,
            config.walls.len()
        );
        Ok(grid)
    }

    pub fn width(&self) -> usize {
        self.width
    }
    pub fn len(&self) -> usize {
        self.cells.len()
    }
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
    pub fn start(&self) -> usize {
        self.start
    }
    pub fn target(&self) -> usize {
        self.target
    }
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }
    pub fn cell(&self, index: usize) -> Option<&Cell> {
        self.cells.get(index)
    }
    pub(crate) fn cell_mut(&mut self, index: usize) -> &mut Cell {
        &mut self.cells[index]
    }
    pub fn in_bounds(&self, index: usize) -> bool {
        index < self.cells.len()
    }
    pub fn is_wall(&self, index: usize) -> bool {
        self.cells.get(index).is_some_and(|c| c.is_wall)
    }
    /// Indices of all wall cells in ascending order.
    pub fn walls(&self) -> impl Iterator<Item = usize> + '_ {
        self.cells.iter().filter(|c| c.is_wall).map(|c| c.index)
    }

    /// Position of a cell as a [Point] with `x` the column and `y` the row.
    pub fn point(&self, index: usize) -> Point {
        Point::new((index % self.width) as i32, (index / self.width) as i32)
    }
    /// Inverse of [point](Self::point); [None] for points off the grid.
    pub fn index_of(&self, point: &Point) -> Option<usize> {
        let w = self.width as i32;
        if point.x >= 0 && point.y >= 0 && point.x < w && point.y < w {
            Some(point.y as usize * self.width + point.x as usize)
        } else {
            None
        }
    }
    pub fn manhattan_distance(&self, a: usize, b: usize) -> usize {
        self.point(a).manhattan_distance(&self.point(b)) as usize
    }

    /// The cell adjacent to `index` on the given side, if it is on the grid. Uses the row and
    /// column of `index` so cells on the right edge never wrap around to the next row.
    pub fn neighbour(&self, index: usize, side: Side) -> Option<usize> {
        let row = index / self.width;
        let col = index % self.width;
        let last = self.width - 1;
        match side {
            Side::Up if row > 0 => Some(index - self.width),
            Side::Right if col < last => Some(index + 1),
            Side::Left if col > 0 => Some(index - 1),
            Side::Down if row < last => Some(index + self.width),
            _ => None,
        }
    }

    /// Up to four adjacent cells in [NEIGHBOUR_ORDER]. Walls are included.
    pub fn neighbours(&self, index: usize) -> SmallVec<[usize; 4]> {
        debug_assert!(self.in_bounds(index));
        NEIGHBOUR_ORDER
            .iter()
            .filter_map(|&side| self.neighbour(index, side))
            .collect()
    }

    /// Flips the wall flag of a cell and returns the new value. Start and target cells can never
    /// become walls. Opening a cell joins it to its neighbours' components; closing one may split a
    /// component, so the components are flagged as dirty instead.
    pub fn toggle_wall(&mut self, index: usize) -> Result<bool> {
        let reason = match self.cells.get(index) {
            None => Some(EditRejection::OutOfBounds),
            Some(cell) if cell.is_start || cell.is_target => Some(EditRejection::Endpoint),
            Some(_) => None,
        };
        if let Some(reason) = reason {
            warn!("Rejected wall toggle at {}: {}", index, reason);
            return Err(PathfindingError::InvalidEdit { index, reason });
        }
        let blocked = !self.cells[index].is_wall;
        self.cells[index].is_wall = blocked;
        if blocked {
            self.components_dirty = true;
        } else {
            for n in self.neighbours(index) {
                if !self.cells[n].is_wall {
                    self.components.union(index, n);
                }
            }
        }
        Ok(blocked)
    }

    /// Clears `visited`, `queued`, `parent` and `on_path` on every cell. Walls, start and target
    /// are left as they are.
    pub fn reset_search_flags(&mut self) {
        for cell in &mut self.cells {
            cell.clear_search_flags();
        }
    }

    /// Checks if `a` and `b` are open cells on the same component.
    pub fn reachable(&self, a: usize, b: usize) -> bool {
        self.in_bounds(a)
            && self.in_bounds(b)
            && !self.cells[a].is_wall
            && !self.cells[b].is_wall
            && self.components.equiv(a, b)
    }

    /// Checks if `a` and `b` are not on the same component.
    pub fn unreachable(&self, a: usize, b: usize) -> bool {
        !self.reachable(a, b)
    }

    /// Regenerates the components if they are marked as dirty.
    pub fn update(&mut self) {
        if self.components_dirty {
            info!("Components are dirty: regenerating components");
            self.generate_components();
        }
    }

    /// Generates a new [UnionFind] structure and links up open 4-neighbours to the same component.
    pub fn generate_components(&mut self) {
        self.components = UnionFind::new(self.cells.len());
        self.components_dirty = false;
        for ix in 0..self.cells.len() {
            if self.cells[ix].is_wall {
                continue;
            }
            // Right and down suffice, the other two sides are covered from the neighbouring cell.
            for side in [Side::Right, Side::Down] {
                if let Some(n) = self.neighbour(ix, side) {
                    if !self.cells[n].is_wall {
                        self.components.union(ix, n);
                    }
                }
            }
        }
    }
}

impl fmt::Display for PathingGrid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for row in self.cells.chunks(self.width) {
            writeln!(f, "{}", row.iter().map(|c| c.state().symbol()).join(""))?;
        }
        Ok(())
    }
}
