use crossterm::event::{KeyCode, KeyEvent};
use duel_core::{
    compare, run_duel, Difficulty, DuelReport, Generator, Grid, Strategy,
};

use crate::history::HistoryManager;
use crate::theme::Theme;

/// Result of handling a key press.
pub enum AppAction {
    Continue,
    Quit,
}

/// Current screen state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenState {
    /// Board plus results sidebar.
    Board,
    /// Past duels.
    History,
}

/// The main application state.
pub struct App {
    /// The clue set currently loaded.
    pub puzzle: Grid,
    /// What the board shows (the puzzle, or a solution once solved).
    pub display: Grid,
    /// Difficulty of the loaded puzzle; `None` for user-supplied boards.
    pub difficulty: Option<Difficulty>,
    /// Difficulty the next generated puzzle will use.
    pub next_difficulty: Difficulty,
    /// Results of the latest duel or single solve.
    pub report: Option<DuelReport>,
    pub screen: ScreenState,
    pub theme: Theme,
    /// One-line status shown under the board.
    pub message: Option<String>,
    pub history: HistoryManager,
    generator: Generator,
}

impl App {
    pub fn new(difficulty: Difficulty, seed: Option<u64>, puzzle: Option<Grid>) -> Self {
        let mut generator = match seed {
            Some(seed) => Generator::with_seed(seed),
            None => Generator::new(),
        };

        let (puzzle, puzzle_difficulty) = match puzzle {
            Some(grid) => (grid, None),
            None => (generator.generate(difficulty), Some(difficulty)),
        };

        Self {
            display: puzzle.clone(),
            puzzle,
            difficulty: puzzle_difficulty,
            next_difficulty: difficulty,
            report: None,
            screen: ScreenState::Board,
            theme: Theme::default(),
            message: None,
            history: HistoryManager::load(),
            generator,
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> AppAction {
        if self.screen == ScreenState::History {
            match key.code {
                KeyCode::Char('q') => return AppAction::Quit,
                KeyCode::Esc | KeyCode::Char('h') => self.screen = ScreenState::Board,
                _ => {}
            }
            return AppAction::Continue;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => return AppAction::Quit,
            KeyCode::Char('n') => self.new_puzzle(),
            KeyCode::Char('1') => self.set_difficulty(Difficulty::Easy),
            KeyCode::Char('2') => self.set_difficulty(Difficulty::Medium),
            KeyCode::Char('3') => self.set_difficulty(Difficulty::Hard),
            KeyCode::Char('d') => self.solve_with(Strategy::Dfs),
            KeyCode::Char('c') => self.solve_with(Strategy::Csp),
            KeyCode::Char('s') => self.race(),
            KeyCode::Char('r') => self.reset(),
            KeyCode::Char('h') => self.screen = ScreenState::History,
            _ => {}
        }
        AppAction::Continue
    }

    /// Generate and load a fresh puzzle at the selected difficulty.
    pub fn new_puzzle(&mut self) {
        self.puzzle = self.generator.generate(self.next_difficulty);
        self.display = self.puzzle.clone();
        self.difficulty = Some(self.next_difficulty);
        self.report = None;
        self.message = Some(format!("new {} puzzle", self.next_difficulty));
    }

    fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.next_difficulty = difficulty;
        self.message = Some(format!("next puzzle: {difficulty}"));
    }

    /// Run a single strategy and show its solution.
    fn solve_with(&mut self, strategy: Strategy) {
        match compare::time_strategy(strategy, &self.puzzle) {
            Ok((report, solution)) => {
                self.message = Some(if report.solved {
                    format!("{strategy} solved in {}", format_ms(report.elapsed))
                } else {
                    format!("{strategy}: no solution ({})", format_ms(report.elapsed))
                });
                if let Some(solution) = solution {
                    self.display = solution;
                }
            }
            Err(err) => self.message = Some(err.to_string()),
        }
    }

    /// Race both strategies, record the duel, and show the solution.
    fn race(&mut self) {
        match run_duel(&self.puzzle) {
            Ok(report) => {
                if let Some(line) = &report.solution {
                    if let Ok(solution) = Grid::from_string(line) {
                        self.display = solution;
                    }
                }
                self.message = Some(match report.winner() {
                    Some(winner) => format!("{winner} wins"),
                    None => "strategies disagree".to_string(),
                });
                self.history.record(self.difficulty, report.clone());
                self.report = Some(report);
            }
            Err(err) => self.message = Some(err.to_string()),
        }
    }

    /// Put the unsolved puzzle back on the board.
    fn reset(&mut self) {
        self.display = self.puzzle.clone();
        self.message = None;
    }
}

/// Render a duration as milliseconds with two decimals.
pub fn format_ms(elapsed: std::time::Duration) -> String {
    format!("{:.2} ms", elapsed.as_secs_f64() * 1000.0)
}
