//! Sudoku engine racing two solving strategies: plain depth-first
//! backtracking against arc-consistency-driven search (AC-3 + MAC).
//!
//! The pieces:
//!
//! - [`Grid`]: the 9×9 board, mutated in place during search.
//! - [`CspSolver`]: maintains per-cell candidate domains, propagates the
//!   row/column/box constraints to a fixed point (AC-3), and backtracks with
//!   re-propagation after every guess.
//! - [`DfsSolver`]: the propagation-free baseline.
//! - [`Generator`]: builds puzzles with a unique solution at a target
//!   difficulty.
//! - [`compare`]: times both solvers on the same puzzle.

pub mod backtrack;
mod candidates;
pub mod compare;
pub mod csp;
pub mod generator;
pub mod grid;

pub use backtrack::DfsSolver;
pub use candidates::CandidateSet;
pub use compare::{run_duel, DuelReport, SolveReport, Strategy};
pub use csp::{CspSolver, DomainStore};
pub use generator::{Difficulty, Generator, GeneratorConfig, SymmetryType};
pub use grid::{Grid, GridError, Position};
