use hashbrown::HashSet;
use log::{debug, trace};
use rand::seq::SliceRandom as _;
use smallvec::SmallVec;

use super::{check_grid, Random, StepAlgorithm, StepResult};
use crate::{core::*, maze::Grid};

/// Randomized depth-first search from entrance to exit which blocks every dead end it backs
/// out of, so no exhausted branch is entered twice.
#[derive(Debug, Clone)]
pub struct MazeSolver {
    grid_id: u64,
    exit: Dims,
    current: Dims,
    path: Vec<Dims>,
    // mirror of `path` for constant time membership checks
    on_path: HashSet<Dims>,
    done: bool,
    rng: Random,
}

impl MazeSolver {
    /// Fails unless `grid` is a finished maze with no cell blocked by an earlier solve.
    pub fn new(grid: &Grid, rng: Random) -> Result<Self> {
        if !grid.is_fully_visited() {
            return Err(Error::PreconditionViolation(format!(
                "grid #{} is not fully generated",
                grid.id()
            )));
        }
        if grid.has_blocked() {
            return Err(Error::PreconditionViolation(format!(
                "grid #{} already carries dead end marks",
                grid.id()
            )));
        }

        Ok(MazeSolver {
            grid_id: grid.id(),
            exit: grid.exit(),
            current: grid.entrance(),
            path: Vec::new(),
            on_path: HashSet::new(),
            done: false,
            rng,
        })
    }

    /// Route from the entrance to the exit, available once the search is done
    pub fn solution(&self) -> Option<Vec<Dims>> {
        self.done.then(|| {
            let mut route = self.path.clone();
            route.push(self.current);
            route
        })
    }
}

impl StepAlgorithm for MazeSolver {
    fn step(&mut self, grid: &mut Grid) -> Result<StepResult> {
        check_grid(self.grid_id, grid)?;

        if self.done {
            return Ok(StepResult::DONE);
        }

        if self.current == self.exit {
            self.done = true;
            debug!(
                "maze #{} solved, route of {} cells",
                self.grid_id,
                self.path.len() + 1
            );
            return Ok(StepResult::DONE);
        }

        let current = self.current;
        let open = grid
            .get_neighbors_pos(current)
            .into_iter()
            .filter(|&pos| {
                grid.wall_free_between(current, pos)
                    && !self.on_path.contains(&pos)
                    && grid.get_cell(pos).is_some_and(|cell| !cell.is_blocked())
            })
            .collect::<SmallVec<[_; 4]>>();

        if let Some(&next) = open.choose(&mut self.rng) {
            trace!("advanced {:?} -> {:?}", current, next);
            self.path.push(current);
            self.on_path.insert(current);
            self.current = next;
            return Ok(StepResult::RUNNING);
        }

        grid.cell_mut(current).block();
        match self.path.pop() {
            Some(previous) => {
                trace!("dead end at {:?}, back to {:?}", current, previous);
                self.on_path.remove(&previous);
                self.current = previous;
                Ok(StepResult::RUNNING)
            }
            None => Err(Error::InvariantViolation(format!(
                "dead end at {:?} with an empty trail, grid #{} is not a perfect maze",
                current, self.grid_id
            ))),
        }
    }

    fn current_cell(&self) -> Dims {
        self.current
    }

    fn trail(&self) -> &[Dims] {
        &self.path
    }

    fn is_done(&self) -> bool {
        self.done
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng as _;

    use super::*;
    use crate::maze::MazeBuilder;

    fn built(cols: usize, rows: usize, seed: u64) -> Grid {
        let mut grid = Grid::new(cols, rows).unwrap();
        MazeBuilder::new(&mut grid, Random::seed_from_u64(seed))
            .run_to_end(&mut grid)
            .unwrap();
        grid
    }

    #[test]
    fn finds_simple_route_on_every_maze() {
        for cols in 1..=8 {
            for rows in 1..=8 {
                for seed in 0..3 {
                    let mut grid = built(cols, rows, seed);
                    let mut solver =
                        MazeSolver::new(&grid, Random::seed_from_u64(seed + 100)).unwrap();
                    let steps = solver.run_to_end(&mut grid).unwrap();
                    let cells = cols * rows;

                    // forward moves and dead end retreats happen at most once per cell
                    assert!(steps <= 2 * cells, "{} steps on {}x{}", steps, cols, rows);

                    let route = solver.solution().unwrap();
                    assert_eq!(route.first(), Some(&grid.entrance()));
                    assert_eq!(route.last(), Some(&grid.exit()));
                    assert_eq!(route.iter().collect::<HashSet<_>>().len(), route.len());
                    for pair in route.windows(2) {
                        assert!(grid.wall_free_between(pair[0], pair[1]));
                    }
                    for pos in &route {
                        assert!(!grid.get_cell(*pos).unwrap().is_blocked());
                    }
                }
            }
        }
    }

    #[test]
    fn route_is_unique() {
        let grid = built(10, 10, 9);
        let mut routes = Vec::new();
        for seed in 0..5 {
            let mut attempt = grid.clone();
            let mut solver = MazeSolver::new(&attempt, Random::seed_from_u64(seed)).unwrap();
            solver.run_to_end(&mut attempt).unwrap();
            routes.push(solver.solution().unwrap());
        }
        assert!(routes.windows(2).all(|w| w[0] == w[1]));

        // the original grid was never annotated
        assert!(MazeSolver::new(&grid, Random::seed_from_u64(0)).is_ok());
    }

    #[test]
    fn two_by_one() {
        let mut grid = built(2, 1, 1);
        let mut solver = MazeSolver::new(&grid, Random::seed_from_u64(1)).unwrap();

        assert_eq!(solver.step(&mut grid).unwrap(), StepResult::RUNNING);
        assert_eq!(solver.current_cell(), Dims(1, 0));
        assert_eq!(solver.trail(), &[Dims(0, 0)]);

        assert_eq!(solver.step(&mut grid).unwrap(), StepResult::DONE);
        assert_eq!(solver.trail(), &[Dims(0, 0)]);
        assert_eq!(solver.current_cell(), Dims(1, 0));
        assert_eq!(solver.solution(), Some(vec![Dims(0, 0), Dims(1, 0)]));
    }

    #[test]
    fn one_by_one_is_done_immediately() {
        let mut grid = built(1, 1, 0);
        let mut solver = MazeSolver::new(&grid, Random::seed_from_u64(0)).unwrap();

        assert_eq!(solver.step(&mut grid).unwrap(), StepResult::DONE);
        assert_eq!(solver.solution(), Some(vec![Dims(0, 0)]));
    }

    #[test]
    fn step_after_done_is_noop() {
        let mut grid = built(6, 6, 4);
        let mut solver = MazeSolver::new(&grid, Random::seed_from_u64(4)).unwrap();
        solver.run_to_end(&mut grid).unwrap();

        let blocked: Vec<_> = grid.get_cells().iter().map(|c| c.is_blocked()).collect();
        let trail = solver.trail().to_vec();

        assert_eq!(solver.step(&mut grid).unwrap(), StepResult::DONE);
        assert_eq!(solver.step(&mut grid).unwrap(), StepResult::DONE);

        let after: Vec<_> = grid.get_cells().iter().map(|c| c.is_blocked()).collect();
        assert_eq!(blocked, after);
        assert_eq!(solver.trail(), trail.as_slice());
        assert_eq!(solver.current_cell(), grid.exit());
    }

    #[test]
    fn refuses_unfinished_grid() {
        let mut grid = Grid::new(3, 3).unwrap();
        assert!(matches!(
            MazeSolver::new(&grid, Random::seed_from_u64(0)),
            Err(Error::PreconditionViolation(_))
        ));

        let mut builder = MazeBuilder::new(&mut grid, Random::seed_from_u64(0));
        builder.step(&mut grid).unwrap();
        assert!(MazeSolver::new(&grid, Random::seed_from_u64(0)).is_err());
    }

    #[test]
    fn refuses_grid_with_dead_end_marks() {
        let mut grid = built(5, 5, 2);
        grid.cell_mut(Dims(2, 2)).block();

        assert!(matches!(
            MazeSolver::new(&grid, Random::seed_from_u64(2)),
            Err(Error::PreconditionViolation(_))
        ));
    }

    #[test]
    fn dead_end_with_empty_trail_is_an_invariant_violation() {
        // fully visited, but the entrance is walled off from the exit
        let mut grid = Grid::new(2, 1).unwrap();
        for pos in grid.iter_pos().collect::<Vec<_>>() {
            grid.cell_mut(pos).visit();
        }

        let mut solver = MazeSolver::new(&grid, Random::seed_from_u64(0)).unwrap();
        assert!(matches!(
            solver.step(&mut grid),
            Err(Error::InvariantViolation(_))
        ));
        assert!(!solver.is_done());
        assert!(grid.get_cell(Dims(0, 0)).unwrap().is_blocked());
    }

    #[test]
    fn rejects_foreign_grid() {
        let grid = built(3, 3, 0);
        let mut other = built(3, 3, 0);
        let mut solver = MazeSolver::new(&grid, Random::seed_from_u64(0)).unwrap();

        assert!(matches!(
            solver.step(&mut other),
            Err(Error::PreconditionViolation(_))
        ));
    }
}
