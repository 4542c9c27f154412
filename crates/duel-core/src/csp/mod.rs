//! Constraint-satisfaction solver: AC-3 propagation plus backtracking that
//! re-propagates after every tentative assignment (MAC).

mod ac3;
mod domains;
mod search;

use log::debug;

pub use domains::DomainStore;

use crate::grid::{Grid, GridError};

/// Unit struct solver — stateless, all state is per-call.
pub struct CspSolver;

impl Default for CspSolver {
    fn default() -> Self {
        Self::new()
    }
}

impl CspSolver {
    /// Create a new solver.
    pub fn new() -> Self {
        Self
    }

    /// Validate and solve, returning the solved grid. `Ok(None)` means the
    /// puzzle has no completion, which is an ordinary outcome, not an error;
    /// `Err` is reserved for malformed input.
    pub fn solve(&self, grid: &Grid) -> Result<Option<Grid>, GridError> {
        let mut working = grid.clone();
        Ok(if self.solve_in_place(&mut working)? {
            Some(working)
        } else {
            None
        })
    }

    /// Solve `grid` in place. On success it holds a complete valid solution;
    /// on failure it is restored to exactly its input state. The
    /// initial-propagation failure path returns before any assignment is
    /// attempted, and search failure has unwound every tentative value.
    pub fn solve_in_place(&self, grid: &mut Grid) -> Result<bool, GridError> {
        grid.check_clues()?;

        let mut store = DomainStore::from_grid(grid);
        if !ac3::enforce(&mut store) {
            debug!("initial arc consistency failed, no search attempted");
            return Ok(false);
        }

        let solved = search::solve(grid, &store);
        debug!(
            "search {} with {} cells tracked",
            if solved { "succeeded" } else { "exhausted" },
            store.tracked().len()
        );
        Ok(solved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Position;

    const PUZZLE: &str =
        "530070000600195000098000060800060003400803001700020006060000280000419005000080079";
    const SOLUTION: &str =
        "534678912672195348198342567859761423426853791713924856961537284287419635345286179";

    #[test]
    fn solves_a_standard_puzzle() {
        let _ = env_logger::builder().is_test(true).try_init();
        let grid = Grid::from_string(PUZZLE).unwrap();
        let solved = CspSolver::new().solve(&grid).unwrap().unwrap();
        assert!(solved.is_valid_solution());
        assert_eq!(solved, Grid::from_string(SOLUTION).unwrap());
    }

    #[test]
    fn solves_the_blank_grid() {
        let solved = CspSolver::new().solve(&Grid::empty()).unwrap().unwrap();
        assert!(solved.is_valid_solution());
    }

    #[test]
    fn single_hole_closes_by_propagation_alone() {
        let mut grid = Grid::from_string(SOLUTION).unwrap();
        grid.clear(Position::new(4, 4));

        let mut store = DomainStore::from_grid(&grid);
        // Node consistency already pins the hole; AC-3 confirms without
        // search ever branching.
        assert_eq!(store.domain(Position::new(4, 4).index()).sole_value(), Some(5));
        assert!(super::ac3::enforce(&mut store));

        let solved = CspSolver::new().solve(&grid).unwrap().unwrap();
        assert_eq!(solved, Grid::from_string(SOLUTION).unwrap());
    }

    #[test]
    fn duplicate_clues_are_rejected() {
        let mut grid = Grid::empty();
        grid.set(Position::new(3, 1), 7);
        grid.set(Position::new(3, 6), 7);
        assert!(matches!(
            CspSolver::new().solve(&grid),
            Err(GridError::ConflictingClues { value: 7, .. })
        ));
    }

    #[test]
    fn unsolvable_puzzle_reports_failure_and_rolls_back() {
        // Valid clue set with no completion: the blank at r1c3 can see
        // every digit.
        let mut rows = [[0u8; 9]; 9];
        rows[0] = [1, 2, 0, 4, 5, 6, 7, 8, 9];
        rows[1][2] = 3; // the box already holds the missing 3
        rows[1][5] = 2;
        let mut grid = Grid::from_rows(rows).unwrap();
        grid.check_clues().unwrap();
        let before = grid.clone();

        let solved = CspSolver::new().solve_in_place(&mut grid).unwrap();
        assert!(!solved);
        assert_eq!(grid, before);
    }

    #[test]
    fn hard_puzzle_still_solves() {
        // Inkala's "AI Escargot", a worst-case board for naive backtracking.
        let grid = Grid::from_string(
            "100007090030020008009600500005300900010080002600004000300000010040000007007000300",
        )
        .unwrap();
        let solved = CspSolver::new().solve(&grid).unwrap().unwrap();
        assert!(solved.is_valid_solution());
        // Clues survive into the solution.
        for pos in Position::all() {
            if !grid.is_blank(pos) {
                assert_eq!(grid.get(pos), solved.get(pos));
            }
        }
    }
}
