use log::debug;

use crate::{
    core::*,
    maze::{
        algorithms::seeded_random, Grid, MazeBuilder, MazeSolver, Random, StepAlgorithm,
        StepResult,
    },
    speed::Speed,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Building,
    Built,
    Solving,
    Solved,
}

/// One grid together with the algorithms working on it.
///
/// This is the rebuild entry point for drivers: [`rebuild`](MazeSession::rebuild) swaps in a
/// fresh grid and fresh algorithm state in one go, so nothing from the previous maze survives.
#[derive(Debug)]
pub struct MazeSession {
    grid: Grid,
    builder: MazeBuilder,
    solver: Option<MazeSolver>,
    rng: Random,
    seed: u64,
}

impl MazeSession {
    pub fn new(cols: usize, rows: usize, seed: Option<u64>) -> Result<Self> {
        let (mut rng, seed) = seeded_random(seed);
        let mut grid = Grid::new(cols, rows)?;
        let builder = MazeBuilder::new(&mut grid, Self::fork(&mut rng));
        debug!("new {}x{} maze #{} with seed {}", cols, rows, grid.id(), seed);

        Ok(MazeSession {
            grid,
            builder,
            solver: None,
            rng,
            seed,
        })
    }

    pub fn rebuild(&mut self) -> Result<()> {
        let Dims(cols, rows) = self.grid.size();
        self.rebuild_with_size(cols as usize, rows as usize)
    }

    /// Replaces the grid and resets both algorithms. On error the session is left unchanged.
    pub fn rebuild_with_size(&mut self, cols: usize, rows: usize) -> Result<()> {
        let mut grid = Grid::new(cols, rows)?;
        let builder = MazeBuilder::new(&mut grid, Self::fork(&mut self.rng));
        debug!(
            "rebuilding maze #{} as {}x{} maze #{}",
            self.grid.id(),
            cols,
            rows,
            grid.id()
        );

        self.grid = grid;
        self.builder = builder;
        self.solver = None;
        Ok(())
    }

    pub fn phase(&self) -> Phase {
        match &self.solver {
            None if !self.builder.is_done() => Phase::Building,
            None => Phase::Built,
            Some(solver) if !solver.is_done() => Phase::Solving,
            Some(_) => Phase::Solved,
        }
    }

    /// Starts solving the finished maze, allowed once per grid.
    pub fn start_solve(&mut self) -> Result<()> {
        if self.phase() != Phase::Built {
            return Err(Error::PreconditionViolation(format!(
                "cannot start solving maze #{} while {:?}",
                self.grid.id(),
                self.phase()
            )));
        }

        let solver = MazeSolver::new(&self.grid, Self::fork(&mut self.rng))?;
        self.solver = Some(solver);
        Ok(())
    }

    /// Advances the active algorithm by one step.
    ///
    /// Reports done when the active phase has finished, including when no phase is active.
    pub fn step(&mut self) -> Result<StepResult> {
        match self.active_mut() {
            Some((algorithm, grid)) => algorithm.step(grid),
            None => Ok(StepResult::DONE),
        }
    }

    /// Runs one animation frame worth of steps at the given speed.
    pub fn tick(&mut self, speed: Speed) -> Result<StepResult> {
        for _ in 0..speed.steps_per_tick() {
            if self.step()?.done {
                return Ok(StepResult::DONE);
            }
        }
        Ok(StepResult::RUNNING)
    }

    /// Runs the active phase to completion, returns the number of steps it took.
    pub fn skip(&mut self) -> Result<usize> {
        match self.active_mut() {
            Some((algorithm, grid)) => algorithm.run_to_end(grid),
            None => Ok(0),
        }
    }

    /// Builds, solves and returns the route, whatever phase the session is in.
    pub fn solve_now(&mut self) -> Result<Vec<Dims>> {
        if self.phase() == Phase::Building {
            self.skip()?;
        }
        if self.phase() == Phase::Built {
            self.start_solve()?;
        }
        self.skip()?;

        self.solution().ok_or_else(|| {
            Error::InvariantViolation(format!(
                "maze #{} finished without a route",
                self.grid.id()
            ))
        })
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn builder(&self) -> &MazeBuilder {
        &self.builder
    }

    pub fn solver(&self) -> Option<&MazeSolver> {
        self.solver.as_ref()
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn solution(&self) -> Option<Vec<Dims>> {
        self.solver.as_ref().and_then(MazeSolver::solution)
    }

    /// Cursor and trail of the algorithm a renderer should highlight
    pub fn cursor(&self) -> (Dims, &[Dims]) {
        match &self.solver {
            Some(solver) => (solver.current_cell(), solver.trail()),
            None => (self.builder.current_cell(), self.builder.trail()),
        }
    }

    fn active_mut(&mut self) -> Option<(&mut dyn StepAlgorithm, &mut Grid)> {
        match (&mut self.solver, self.builder.is_done()) {
            (Some(solver), _) => Some((solver as &mut dyn StepAlgorithm, &mut self.grid)),
            (None, false) => Some((&mut self.builder as &mut dyn StepAlgorithm, &mut self.grid)),
            (None, true) => None,
        }
    }

    fn fork(rng: &mut Random) -> Random {
        rng.jump();
        rng.clone()
    }
}
