//! Plain depth-first backtracking, the baseline the constraint solver is
//! raced against. No propagation, no heuristics: first blank cell in scan
//! order, digits tried ascending against the live grid.

use crate::grid::{Grid, GridError, Position};

/// Unit struct solver — stateless, all state is per-call.
pub struct DfsSolver;

impl Default for DfsSolver {
    fn default() -> Self {
        Self::new()
    }
}

impl DfsSolver {
    /// Create a new solver.
    pub fn new() -> Self {
        Self
    }

    /// Validate and solve, returning the solved grid. `Ok(None)` means
    /// unsolvable; `Err` means malformed input.
    pub fn solve(&self, grid: &Grid) -> Result<Option<Grid>, GridError> {
        let mut working = grid.clone();
        Ok(if self.solve_in_place(&mut working)? {
            Some(working)
        } else {
            None
        })
    }

    /// Solve `grid` in place, restoring it exactly on failure.
    pub fn solve_in_place(&self, grid: &mut Grid) -> Result<bool, GridError> {
        grid.check_clues()?;
        Ok(solve_recursive(grid))
    }

    /// Count completions of `grid`, stopping once `limit` is reached.
    pub fn count_solutions(&self, grid: &Grid, limit: usize) -> usize {
        let mut working = grid.clone();
        let mut count = 0;
        count_recursive(&mut working, &mut count, limit);
        count
    }

    /// Whether the puzzle has exactly one completion.
    pub fn has_unique_solution(&self, grid: &Grid) -> bool {
        self.count_solutions(grid, 2) == 1
    }
}

fn solve_recursive(grid: &mut Grid) -> bool {
    let Some(pos) = grid.first_blank() else {
        return true;
    };
    for value in 1..=9 {
        if !grid.conflicts(pos, value) {
            grid.set(pos, value);
            if solve_recursive(grid) {
                return true;
            }
            grid.clear(pos);
        }
    }
    false
}

fn count_recursive(grid: &mut Grid, count: &mut usize, limit: usize) {
    if *count >= limit {
        return;
    }
    let Some(pos) = grid.first_blank() else {
        *count += 1;
        return;
    };
    for value in 1..=9 {
        if !grid.conflicts(pos, value) {
            grid.set(pos, value);
            count_recursive(grid, count, limit);
            grid.clear(pos);
            if *count >= limit {
                return;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PUZZLE: &str =
        "530070000600195000098000060800060003400803001700020006060000280000419005000080079";

    #[test]
    fn solves_a_standard_puzzle() {
        let grid = Grid::from_string(PUZZLE).unwrap();
        let solved = DfsSolver::new().solve(&grid).unwrap().unwrap();
        assert!(solved.is_valid_solution());
    }

    #[test]
    fn agrees_with_the_csp_solver() {
        let grid = Grid::from_string(PUZZLE).unwrap();
        let dfs = DfsSolver::new().solve(&grid).unwrap().unwrap();
        let csp = crate::CspSolver::new().solve(&grid).unwrap().unwrap();
        // Unique-solution puzzle, so both strategies must land on it.
        assert_eq!(dfs, csp);
    }

    #[test]
    fn blank_grid_has_many_solutions() {
        let solver = DfsSolver::new();
        assert!(!solver.has_unique_solution(&Grid::empty()));
        assert_eq!(solver.count_solutions(&Grid::empty(), 5), 5);
    }

    #[test]
    fn unique_solution_detected() {
        let grid = Grid::from_string(PUZZLE).unwrap();
        assert!(DfsSolver::new().has_unique_solution(&grid));
    }

    #[test]
    fn failure_restores_the_grid() {
        let mut rows = [[0u8; 9]; 9];
        rows[0] = [1, 2, 0, 4, 5, 6, 7, 8, 9];
        rows[1][2] = 3;
        let mut grid = Grid::from_rows(rows).unwrap();
        let before = grid.clone();

        assert!(!DfsSolver::new().solve_in_place(&mut grid).unwrap());
        assert_eq!(grid, before);
    }
}
