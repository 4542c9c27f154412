//! Generate a puzzle and race the two solvers on it.

use duel_core::{run_duel, CspSolver, Difficulty, Generator, Grid};

fn main() {
    println!("Generating a Medium difficulty puzzle...\n");
    let mut generator = Generator::new();
    let puzzle = generator.generate(Difficulty::Medium);

    println!("Generated puzzle ({} givens):", puzzle.filled_count());
    println!("{}", puzzle);

    let report = run_duel(&puzzle).expect("generated puzzles are well-formed");
    println!(
        "DFS: {:?} ({})",
        report.dfs.elapsed,
        if report.dfs.solved { "solved" } else { "no solution" }
    );
    println!(
        "CSP: {:?} ({})",
        report.csp.elapsed,
        if report.csp.solved { "solved" } else { "no solution" }
    );
    if let Some(winner) = report.winner() {
        println!("Winner: {winner}\n");
    }

    // Solve a classic puzzle supplied as a string.
    let puzzle_string = "530070000600195000098000060800060003400803001700020006060000280000419005000080079";
    let grid = Grid::from_string(puzzle_string).unwrap();
    if let Some(solution) = CspSolver::new().solve(&grid).unwrap() {
        println!("Solved the classic board:");
        println!("{}", solution);
    }
}
