pub mod grid;
pub use grid::Grid;
pub mod cell;
pub use cell::{Cell, CellView, CellWall};

pub mod algorithms;
pub use algorithms::{MazeBuilder, MazeSolver, Random, StepAlgorithm, StepResult};
