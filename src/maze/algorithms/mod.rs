mod builder;
mod solver;

pub use builder::MazeBuilder;
pub use solver::MazeSolver;

use rand::{thread_rng, Rng as _, SeedableRng as _};

use super::Grid;
use crate::core::*;

/// Random number generator used for anything, where determinism is required.
pub type Random = rand_xoshiro::Xoshiro256StarStar;

/// Seeds a new [`Random`], drawing the seed from the thread rng when none is given.
pub fn seeded_random(seed: Option<u64>) -> (Random, u64) {
    let seed = seed.unwrap_or_else(|| thread_rng().gen());
    (Random::seed_from_u64(seed), seed)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepResult {
    pub done: bool,
}

impl StepResult {
    pub const RUNNING: StepResult = StepResult { done: false };
    pub const DONE: StepResult = StepResult { done: true };
}

/// Contract between the stepwise algorithms and whoever drives them.
///
/// A driver calls [`step`](StepAlgorithm::step) at its own pace until the result reports
/// `done`, reading [`current_cell`](StepAlgorithm::current_cell) and
/// [`trail`](StepAlgorithm::trail) in between to draw the progress. Once done, further
/// steps leave both the algorithm and the grid untouched.
pub trait StepAlgorithm {
    fn step(&mut self, grid: &mut Grid) -> Result<StepResult>;

    fn current_cell(&self) -> Dims;

    /// Cells from the start to the cell before [`current_cell`](StepAlgorithm::current_cell)
    fn trail(&self) -> &[Dims];

    fn is_done(&self) -> bool;

    /// Steps until done, returns the number of steps taken
    fn run_to_end(&mut self, grid: &mut Grid) -> Result<usize> {
        let mut steps = 0;
        while !self.is_done() {
            self.step(grid)?;
            steps += 1;
        }
        Ok(steps)
    }
}

pub(crate) fn check_grid(expected: u64, grid: &Grid) -> Result<()> {
    if grid.id() != expected {
        return Err(Error::PreconditionViolation(format!(
            "algorithm was created for grid #{}, got grid #{}",
            expected,
            grid.id()
        )));
    }
    Ok(())
}
