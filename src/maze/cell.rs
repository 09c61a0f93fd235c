use serde::Serialize;

use crate::core::*;
use crate::maze::cell::CellWall::*;

#[derive(Debug, Clone)]
pub struct Cell {
    walls: [bool; 4],
    visited: bool,
    blocked: bool,
    coord: Dims,
}

impl Cell {
    pub fn new(pos: Dims) -> Cell {
        Cell {
            walls: [true; 4],
            visited: false,
            blocked: false,
            coord: pos,
        }
    }

    pub(crate) fn remove_wall(&mut self, wall: CellWall) {
        self.walls[wall as usize] = false;
    }

    pub fn get_wall(&self, wall: CellWall) -> bool {
        self.walls[wall as usize]
    }

    pub fn walls(&self) -> [bool; 4] {
        self.walls
    }

    pub fn is_visited(&self) -> bool {
        self.visited
    }

    pub(crate) fn visit(&mut self) {
        self.visited = true;
    }

    pub fn is_blocked(&self) -> bool {
        self.blocked
    }

    pub(crate) fn block(&mut self) {
        self.blocked = true;
    }

    pub fn get_coord(&self) -> Dims {
        self.coord
    }

    pub fn view(&self) -> CellView {
        CellView {
            walls: self.walls,
            visited: self.visited,
            blocked: self.blocked,
        }
    }
}

impl PartialEq for Cell {
    fn eq(&self, other: &Self) -> bool {
        self.coord == other.coord
    }
}

impl Eq for Cell {}

/// Read-only snapshot of a cell for renderers.
///
/// `walls` is indexed in [`CellWall::get_in_order`] order, `true` meaning the wall is present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CellView {
    pub walls: [bool; 4],
    pub visited: bool,
    pub blocked: bool,
}

impl CellView {
    pub fn has_wall(&self, wall: CellWall) -> bool {
        self.walls[wall as usize]
    }
}

/// Side of a cell. Discriminants follow the north, east, south, west storage order.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum CellWall {
    Top = 0,
    Right = 1,
    Bottom = 2,
    Left = 3,
}

impl CellWall {
    pub const fn get_in_order() -> [CellWall; 4] {
        [Top, Right, Bottom, Left]
    }

    pub fn to_coord(&self) -> Dims {
        match self {
            Top => Dims(0, -1),
            Right => Dims(1, 0),
            Bottom => Dims(0, 1),
            Left => Dims(-1, 0),
        }
    }

    pub fn from_coord(offset: Dims) -> Option<CellWall> {
        match offset {
            Dims(0, -1) => Some(Top),
            Dims(1, 0) => Some(Right),
            Dims(0, 1) => Some(Bottom),
            Dims(-1, 0) => Some(Left),
            _ => None,
        }
    }

    pub fn reverse_wall(&self) -> CellWall {
        match self {
            Top => Bottom,
            Right => Left,
            Bottom => Top,
            Left => Right,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_cell_is_closed() {
        let cell = Cell::new(Dims(2, 3));
        assert_eq!(cell.walls(), [true; 4]);
        assert!(!cell.is_visited());
        assert!(!cell.is_blocked());
        assert_eq!(cell.get_coord(), Dims(2, 3));
    }

    #[test]
    fn wall_offsets_round_trip() {
        for wall in CellWall::get_in_order() {
            assert_eq!(CellWall::from_coord(wall.to_coord()), Some(wall));
            assert_eq!(wall.reverse_wall().to_coord() + wall.to_coord(), Dims::ZERO);
        }
        assert_eq!(CellWall::from_coord(Dims(1, 1)), None);
        assert_eq!(CellWall::from_coord(Dims(2, 0)), None);
    }

    #[test]
    fn view_reflects_flags() {
        let mut cell = Cell::new(Dims::ZERO);
        cell.remove_wall(Left);
        cell.visit();
        cell.block();

        let view = cell.view();
        assert!(!view.has_wall(Left));
        assert!(view.has_wall(Top));
        assert!(view.visited && view.blocked);
    }
}
