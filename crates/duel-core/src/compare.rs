//! Racing the two strategies on the same puzzle.

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use crate::backtrack::DfsSolver;
use crate::csp::CspSolver;
use crate::grid::{Grid, GridError};

/// Which solving strategy produced a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Strategy {
    /// Plain depth-first backtracking.
    Dfs,
    /// AC-3 propagation with backtracking (MAC).
    Csp,
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Strategy::Dfs => write!(f, "DFS"),
            Strategy::Csp => write!(f, "CSP"),
        }
    }
}

/// Outcome of one strategy on one puzzle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolveReport {
    pub strategy: Strategy,
    pub solved: bool,
    pub elapsed: Duration,
}

/// Both strategies' outcomes on the same puzzle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DuelReport {
    /// The puzzle, in compact 81-character form.
    pub puzzle: String,
    pub dfs: SolveReport,
    pub csp: SolveReport,
    /// The solution (compact form) if either strategy found one.
    pub solution: Option<String>,
}

impl DuelReport {
    /// The faster of the two strategies, if both agreed on solvability.
    pub fn winner(&self) -> Option<Strategy> {
        if self.dfs.solved != self.csp.solved {
            return None;
        }
        Some(if self.dfs.elapsed <= self.csp.elapsed {
            Strategy::Dfs
        } else {
            Strategy::Csp
        })
    }
}

/// Time one strategy on its own copy of the puzzle.
pub fn time_strategy(strategy: Strategy, grid: &Grid) -> Result<(SolveReport, Option<Grid>), GridError> {
    let start = Instant::now();
    let solution = match strategy {
        Strategy::Dfs => DfsSolver::new().solve(grid)?,
        Strategy::Csp => CspSolver::new().solve(grid)?,
    };
    let elapsed = start.elapsed();
    Ok((
        SolveReport {
            strategy,
            solved: solution.is_some(),
            elapsed,
        },
        solution,
    ))
}

/// Run both strategies on independent copies of `grid` and report timings.
pub fn run_duel(grid: &Grid) -> Result<DuelReport, GridError> {
    let (dfs, dfs_solution) = time_strategy(Strategy::Dfs, grid)?;
    let (csp, csp_solution) = time_strategy(Strategy::Csp, grid)?;

    Ok(DuelReport {
        puzzle: grid.to_line(),
        dfs,
        csp,
        solution: csp_solution.or(dfs_solution).map(|g| g.to_line()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const PUZZLE: &str =
        "530070000600195000098000060800060003400803001700020006060000280000419005000080079";

    #[test]
    fn duel_reports_both_strategies() {
        let grid = Grid::from_string(PUZZLE).unwrap();
        let report = run_duel(&grid).unwrap();

        assert!(report.dfs.solved);
        assert!(report.csp.solved);
        assert!(report.winner().is_some());

        let solution = Grid::from_string(report.solution.as_deref().unwrap()).unwrap();
        assert!(solution.is_valid_solution());
    }

    #[test]
    fn report_serializes() {
        let grid = Grid::from_string(PUZZLE).unwrap();
        let report = run_duel(&grid).unwrap();

        let json = serde_json::to_string(&report).unwrap();
        let back: DuelReport = serde_json::from_str(&json).unwrap();
        assert_eq!(back.puzzle, report.puzzle);
        assert_eq!(back.csp.solved, report.csp.solved);
    }

    #[test]
    fn unsolvable_duel_agrees_on_failure() {
        let mut rows = [[0u8; 9]; 9];
        rows[0] = [1, 2, 0, 4, 5, 6, 7, 8, 9];
        rows[1][2] = 3;
        let grid = Grid::from_rows(rows).unwrap();

        let report = run_duel(&grid).unwrap();
        assert!(!report.dfs.solved);
        assert!(!report.csp.solved);
        assert!(report.solution.is_none());
    }
}
