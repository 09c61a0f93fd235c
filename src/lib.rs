pub mod core;
pub mod display;
pub mod logging;
pub mod maze;
pub mod progress;
pub mod session;
pub mod settings;
pub mod speed;

pub use crate::core::{Dims, Error, Result};
pub use maze::{Grid, MazeBuilder, MazeSolver, StepAlgorithm, StepResult};
pub use session::{MazeSession, Phase};
