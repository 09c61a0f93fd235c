use std::sync::atomic::{AtomicU64, Ordering};

use smallvec::SmallVec;

use crate::core::*;
use crate::maze::cell::{Cell, CellView, CellWall};

static NEXT_GRID_ID: AtomicU64 = AtomicU64::new(0);

/// Rectangular collection of cells stored in row-major order.
///
/// Every grid gets a process-unique id, algorithms remember the id of the grid they were
/// created for and refuse to touch any other one.
#[derive(Debug, Clone)]
pub struct Grid {
    cells: Vec<Cell>,
    width: usize,
    height: usize,
    id: u64,
}

impl Grid {
    /// Largest number of cells a grid may hold, 4096x4096
    pub const MAX_CELLS: usize = 1 << 24;

    /// Creates a fully walled grid with the entrance and exit boundaries already opened.
    pub fn new(cols: usize, rows: usize) -> Result<Grid> {
        let cell_count = cols.checked_mul(rows).unwrap_or(usize::MAX);
        if cols == 0
            || rows == 0
            || cols > i32::MAX as usize
            || rows > i32::MAX as usize
            || cell_count > Self::MAX_CELLS
        {
            return Err(Error::PreconditionViolation(format!(
                "invalid grid size {}x{}",
                cols, rows
            )));
        }

        let cells = Dims::iter_fill(Dims::ZERO, Dims(cols as i32, rows as i32))
            .map(Cell::new)
            .collect();

        let mut grid = Grid {
            cells,
            width: cols,
            height: rows,
            id: NEXT_GRID_ID.fetch_add(1, Ordering::Relaxed),
        };

        let (entrance, exit) = (grid.entrance(), grid.exit());
        let cell = grid.cell_mut(entrance);
        cell.remove_wall(CellWall::Top);
        cell.remove_wall(CellWall::Left);
        let cell = grid.cell_mut(exit);
        cell.remove_wall(CellWall::Bottom);
        cell.remove_wall(CellWall::Right);

        Ok(grid)
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn size(&self) -> Dims {
        Dims(self.width as i32, self.height as i32)
    }

    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    pub fn entrance(&self) -> Dims {
        Dims::ZERO
    }

    pub fn exit(&self) -> Dims {
        Dims(self.width as i32 - 1, self.height as i32 - 1)
    }

    pub fn is_in_bounds(&self, pos: Dims) -> bool {
        self.index(pos.0, pos.1).is_some()
    }

    pub fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return None;
        }

        Some(x as usize + y as usize * self.width)
    }

    pub fn neighbor(&self, cell: Dims, wall: CellWall) -> Option<Dims> {
        if !self.is_in_bounds(cell) {
            return None;
        }

        // in-bounds coordinates are below i32::MAX, one step cannot overflow
        let pos = cell + wall.to_coord();
        self.is_in_bounds(pos).then_some(pos)
    }

    pub fn get_neighbors_pos(&self, cell: Dims) -> SmallVec<[Dims; 4]> {
        CellWall::get_in_order()
            .into_iter()
            .filter_map(|wall| self.neighbor(cell, wall))
            .collect()
    }

    /// Returns the side of `cell` facing `cell2`, if they are orthogonally adjacent
    pub fn which_wall_between(cell: Dims, cell2: Dims) -> Option<CellWall> {
        cell2.checked_sub(cell).and_then(CellWall::from_coord)
    }

    /// Opens the boundary between two adjacent cells on both sides.
    ///
    /// # Panics
    ///
    /// Panics when the cells are not orthogonally adjacent or either one lies outside the grid.
    pub fn remove_wall_between(&mut self, a: Dims, b: Dims) {
        let in_bounds = self.is_in_bounds(a) && self.is_in_bounds(b);
        let wall = match Self::which_wall_between(a, b) {
            Some(wall) if in_bounds => wall,
            _ => panic!("cells {:?} and {:?} do not share a wall", a, b),
        };

        self.cell_mut(a).remove_wall(wall);
        self.cell_mut(b).remove_wall(wall.reverse_wall());
    }

    pub fn wall_free_between(&self, a: Dims, b: Dims) -> bool {
        let (Some(cell_a), Some(cell_b)) = (self.get_cell(a), self.get_cell(b)) else {
            return false;
        };

        match Self::which_wall_between(a, b) {
            Some(wall) => !cell_a.get_wall(wall) && !cell_b.get_wall(wall.reverse_wall()),
            None => false,
        }
    }

    pub fn cell_at(&self, x: i32, y: i32) -> Option<CellView> {
        self.index(x, y).map(|i| self.cells[i].view())
    }

    pub fn get_cell(&self, pos: Dims) -> Option<&Cell> {
        self.index(pos.0, pos.1).map(|i| &self.cells[i])
    }

    pub fn get_cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Positions of all cells in row-major order
    pub fn iter_pos(&self) -> impl Iterator<Item = Dims> {
        Dims::iter_fill(Dims::ZERO, self.size())
    }

    pub fn is_fully_visited(&self) -> bool {
        self.cells.iter().all(Cell::is_visited)
    }

    pub fn has_blocked(&self) -> bool {
        self.cells.iter().any(Cell::is_blocked)
    }

    /// Number of opened boundaries between cells, the entrance and exit openings are not counted
    pub fn passage_count(&self) -> usize {
        self.iter_pos()
            .flat_map(|pos| {
                [CellWall::Right, CellWall::Bottom]
                    .into_iter()
                    .filter_map(move |wall| self.neighbor(pos, wall).map(|n| (pos, n)))
            })
            .filter(|&(a, b)| self.wall_free_between(a, b))
            .count()
    }

    pub(crate) fn cell_mut(&mut self, pos: Dims) -> &mut Cell {
        let i = self
            .index(pos.0, pos.1)
            .unwrap_or_else(|| panic!("Index out of bounds: {:?}", pos));
        &mut self.cells[i]
    }
}
