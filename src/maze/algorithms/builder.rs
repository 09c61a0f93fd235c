use log::{debug, trace};
use rand::seq::SliceRandom as _;
use smallvec::SmallVec;

use super::{check_grid, Random, StepAlgorithm, StepResult};
use crate::{core::*, maze::Grid, progress::Progress};

/// Recursive backtracker carving a perfect maze one step at a time.
///
/// The recursion is replaced by an explicit stack of cells, so each call to
/// [`step`](StepAlgorithm::step) is either one carve or one unwind.
#[derive(Debug, Clone)]
pub struct MazeBuilder {
    grid_id: u64,
    current: Dims,
    path: Vec<Dims>,
    done: bool,
    visited: usize,
    cell_count: usize,
    rng: Random,
}

impl MazeBuilder {
    /// Starts at the entrance of `grid`, marking it visited.
    pub fn new(grid: &mut Grid, rng: Random) -> Self {
        let current = grid.entrance();
        grid.cell_mut(current).visit();

        MazeBuilder {
            grid_id: grid.id(),
            current,
            path: Vec::with_capacity(grid.cell_count()),
            done: false,
            visited: grid.get_cells().iter().filter(|c| c.is_visited()).count(),
            cell_count: grid.cell_count(),
            rng,
        }
    }

    pub fn progress(&self) -> Progress {
        let mut progress = Progress::new(self.visited, self.cell_count);
        if self.done {
            progress.finish();
        }
        progress
    }
}

impl StepAlgorithm for MazeBuilder {
    fn step(&mut self, grid: &mut Grid) -> Result<StepResult> {
        check_grid(self.grid_id, grid)?;

        if self.done {
            return Ok(StepResult::DONE);
        }

        let unvisited = grid
            .get_neighbors_pos(self.current)
            .into_iter()
            .filter(|&pos| grid.get_cell(pos).is_some_and(|cell| !cell.is_visited()))
            .collect::<SmallVec<[_; 4]>>();

        if let Some(&chosen) = unvisited.choose(&mut self.rng) {
            grid.cell_mut(chosen).visit();
            grid.remove_wall_between(self.current, chosen);
            self.visited += 1;
            trace!("carved {:?} -> {:?}", self.current, chosen);

            self.path.push(self.current);
            self.current = chosen;
        } else if let Some(previous) = self.path.pop() {
            self.current = previous;
        } else {
            self.done = true;
            debug!(
                "maze #{} built, {} cells visited",
                self.grid_id, self.visited
            );
            return Ok(StepResult::DONE);
        }

        Ok(StepResult::RUNNING)
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
    use std::collections::VecDeque;

    use rand::SeedableRng as _;

    use super::*;
    use crate::maze::CellWall;

    fn build(cols: usize, rows: usize, seed: u64) -> (Grid, MazeBuilder) {
        let mut grid = Grid::new(cols, rows).unwrap();
        let mut builder = MazeBuilder::new(&mut grid, Random::seed_from_u64(seed));
        builder.run_to_end(&mut grid).unwrap();
        (grid, builder)
    }

    fn reachable_from_entrance(grid: &Grid) -> usize {
        let mut seen = vec![false; grid.cell_count()];
        let mut queue = VecDeque::from([grid.entrance()]);
        seen[0] = true;
        let mut count = 0;

        while let Some(pos) = queue.pop_front() {
            count += 1;
            for next in grid.get_neighbors_pos(pos) {
                let i = grid.index(next.0, next.1).unwrap();
                if !seen[i] && grid.wall_free_between(pos, next) {
                    seen[i] = true;
                    queue.push_back(next);
                }
            }
        }

        count
    }

    #[test]
    fn builds_spanning_tree_for_all_small_sizes() {
        for cols in 1..=7 {
            for rows in 1..=7 {
                for seed in 0..4 {
                    let (grid, builder) = build(cols, rows, seed);
                    let cells = cols * rows;

                    assert!(builder.is_done());
                    assert!(builder.trail().is_empty());
                    assert!(grid.is_fully_visited());
                    assert_eq!(grid.passage_count(), cells - 1);
                    // n - 1 edges and connected means no cycles
                    assert_eq!(reachable_from_entrance(&grid), cells);
                    assert!(!grid.has_blocked());
                }
            }
        }
    }

    #[test]
    fn boundary_openings_survive_generation() {
        for seed in 0..8 {
            let (grid, _) = build(9, 5, seed);
            let entrance = grid.cell_at(0, 0).unwrap();
            let exit = grid.cell_at(8, 4).unwrap();

            assert!(!entrance.has_wall(CellWall::Top));
            assert!(!entrance.has_wall(CellWall::Left));
            assert!(!exit.has_wall(CellWall::Bottom));
            assert!(!exit.has_wall(CellWall::Right));
        }
    }

    #[test]
    fn two_by_one() {
        let mut grid = Grid::new(2, 1).unwrap();
        let mut builder = MazeBuilder::new(&mut grid, Random::seed_from_u64(7));
        assert_eq!(builder.current_cell(), Dims(0, 0));

        assert_eq!(builder.step(&mut grid).unwrap(), StepResult::RUNNING);
        assert_eq!(builder.current_cell(), Dims(1, 0));
        assert_eq!(builder.trail(), &[Dims(0, 0)]);
        assert!(grid.wall_free_between(Dims(0, 0), Dims(1, 0)));

        assert_eq!(builder.step(&mut grid).unwrap(), StepResult::RUNNING);
        assert_eq!(builder.current_cell(), Dims(0, 0));
        assert!(builder.trail().is_empty());

        assert_eq!(builder.step(&mut grid).unwrap(), StepResult::DONE);
        assert_eq!(grid.passage_count(), 1);
    }

    #[test]
    fn one_by_one_is_done_immediately() {
        let mut grid = Grid::new(1, 1).unwrap();
        let mut builder = MazeBuilder::new(&mut grid, Random::seed_from_u64(0));

        assert_eq!(builder.step(&mut grid).unwrap(), StepResult::DONE);
        assert!(grid.is_fully_visited());
        assert_eq!(builder.progress().percent(), 1.0);
    }

    #[test]
    fn step_after_done_is_noop() {
        let (mut grid, mut builder) = build(4, 4, 3);
        let walls: Vec<_> = grid.get_cells().iter().map(|c| c.walls()).collect();
        let current = builder.current_cell();

        for _ in 0..3 {
            assert_eq!(builder.step(&mut grid).unwrap(), StepResult::DONE);
        }

        let after: Vec<_> = grid.get_cells().iter().map(|c| c.walls()).collect();
        assert_eq!(walls, after);
        assert_eq!(builder.current_cell(), current);
    }

    #[test]
    fn same_seed_same_maze() {
        let (a, _) = build(12, 8, 42);
        let (b, _) = build(12, 8, 42);
        let walls = |g: &Grid| g.get_cells().iter().map(|c| c.walls()).collect::<Vec<_>>();
        assert_eq!(walls(&a), walls(&b));
    }

    #[test]
    fn rejects_foreign_grid() {
        let mut grid = Grid::new(3, 3).unwrap();
        let mut builder = MazeBuilder::new(&mut grid, Random::seed_from_u64(1));
        let mut other = Grid::new(3, 3).unwrap();

        assert!(matches!(
            builder.step(&mut other),
            Err(Error::PreconditionViolation(_))
        ));
        assert!(!other.get_cells().iter().any(|c| c.is_visited()));
    }

    #[test]
    fn progress_counts_visited_cells() {
        let mut grid = Grid::new(3, 1).unwrap();
        let mut builder = MazeBuilder::new(&mut grid, Random::seed_from_u64(5));
        assert_eq!(builder.progress().done, 1);
        assert_eq!(builder.progress().from, 3);

        builder.step(&mut grid).unwrap();
        assert_eq!(builder.progress().done, 2);
    }
}
