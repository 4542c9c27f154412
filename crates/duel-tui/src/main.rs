mod app;
mod history;
mod render;
mod theme;

use std::io::{self, Write};
use std::time::Duration;

use clap::Parser;
use crossterm::{
    event::{self, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use duel_core::{run_duel, Difficulty, Generator, Grid};

use app::App;

/// Generate Sudoku puzzles and race two solvers: plain backtracking (DFS)
/// against arc-consistency search (CSP).
#[derive(Parser)]
#[command(name = "sudoku-duel", version)]
struct Cli {
    /// Difficulty of generated puzzles.
    #[arg(short, long, default_value = "medium")]
    difficulty: Difficulty,

    /// Solve this puzzle instead of generating one (81 chars, '.' or '0'
    /// for blanks).
    #[arg(short, long)]
    puzzle: Option<String>,

    /// Seed the generator for reproducible puzzles.
    #[arg(long)]
    seed: Option<u64>,

    /// Run one duel and exit instead of opening the UI.
    #[arg(long)]
    headless: bool,

    /// With --headless, emit the duel report as JSON.
    #[arg(long)]
    json: bool,
}

fn main() -> io::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let puzzle = match &cli.puzzle {
        Some(s) => match Grid::from_string(s) {
            Ok(grid) => Some(grid),
            Err(err) => {
                eprintln!("invalid puzzle: {err}");
                std::process::exit(2);
            }
        },
        None => None,
    };

    if cli.headless {
        return run_headless(&cli, puzzle);
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let result = run_app(&mut stdout, &cli, puzzle);

    // Restore terminal
    disable_raw_mode()?;
    execute!(stdout, LeaveAlternateScreen)?;

    if let Err(e) = result {
        eprintln!("Error: {}", e);
    }

    Ok(())
}

fn run_app(stdout: &mut io::Stdout, cli: &Cli, puzzle: Option<Grid>) -> io::Result<()> {
    let mut app = App::new(cli.difficulty, cli.seed, puzzle);

    loop {
        render::render(stdout, &app)?;
        stdout.flush()?;

        if event::poll(Duration::from_millis(250))? {
            if let Event::Key(key) = event::read()? {
                if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
                    break;
                }
                match app.handle_key(key) {
                    app::AppAction::Continue => {}
                    app::AppAction::Quit => break,
                }
            }
        }
    }

    Ok(())
}

fn run_headless(cli: &Cli, puzzle: Option<Grid>) -> io::Result<()> {
    let grid = match puzzle {
        Some(grid) => grid,
        None => {
            let mut generator = match cli.seed {
                Some(seed) => Generator::with_seed(seed),
                None => Generator::new(),
            };
            generator.generate(cli.difficulty)
        }
    };

    let report = match run_duel(&grid) {
        Ok(report) => report,
        Err(err) => {
            eprintln!("invalid puzzle: {err}");
            std::process::exit(2);
        }
    };

    if cli.json {
        let json = serde_json::to_string_pretty(&report).expect("duel reports serialize");
        println!("{json}");
        return Ok(());
    }

    println!("puzzle ({} givens):", grid.filled_count());
    println!("{grid}");
    for solve in [&report.dfs, &report.csp] {
        println!(
            "{:<4} {:>10}  {}",
            solve.strategy.to_string(),
            app::format_ms(solve.elapsed),
            if solve.solved { "solved" } else { "no solution" }
        );
    }
    if let Some(winner) = report.winner() {
        println!("winner: {winner}");
    }
    if let Some(solution) = &report.solution {
        if let Ok(grid) = Grid::from_string(solution) {
            println!("\nsolution:");
            println!("{grid}");
        }
    }
    Ok(())
}
