//! Puzzle generation: build a random full grid, then carve cells out while
//! the puzzle keeps a unique solution.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::backtrack::DfsSolver;
use crate::grid::{Grid, Position};

/// Difficulty level of a puzzle, expressed as how many givens survive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// Number of given cells the generator aims to leave.
    pub fn target_givens(&self) -> usize {
        match self {
            Difficulty::Easy => 40,
            Difficulty::Medium => 32,
            Difficulty::Hard => 25,
        }
    }

    pub fn all() -> &'static [Difficulty] {
        &[Difficulty::Easy, Difficulty::Medium, Difficulty::Hard]
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Difficulty::Easy => write!(f, "Easy"),
            Difficulty::Medium => write!(f, "Medium"),
            Difficulty::Hard => write!(f, "Hard"),
        }
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            other => Err(format!("unknown difficulty {other:?} (easy, medium, hard)")),
        }
    }
}

/// Symmetry applied when removing cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SymmetryType {
    None,
    Rotational180,
    Horizontal,
    Vertical,
    Diagonal,
}

impl Default for SymmetryType {
    fn default() -> Self {
        Self::Rotational180
    }
}

/// Configuration for puzzle generation.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Target difficulty.
    pub difficulty: Difficulty,
    /// Symmetry type for cell removal.
    pub symmetry: SymmetryType,
    /// Givens the removal pass aims for.
    pub target_givens: usize,
    /// Full regeneration attempts before settling for the closest result.
    pub max_attempts: usize,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self::for_difficulty(Difficulty::Medium)
    }
}

impl GeneratorConfig {
    pub fn for_difficulty(difficulty: Difficulty) -> Self {
        Self {
            difficulty,
            symmetry: SymmetryType::default(),
            target_givens: difficulty.target_givens(),
            max_attempts: match difficulty {
                Difficulty::Easy => 10,
                Difficulty::Medium => 25,
                Difficulty::Hard => 50,
            },
        }
    }
}

/// Sudoku puzzle generator.
pub struct Generator {
    config: GeneratorConfig,
    rng: SimpleRng,
    solver: DfsSolver,
}

impl Default for Generator {
    fn default() -> Self {
        Self::new()
    }
}

impl Generator {
    /// Create a new generator with default configuration.
    pub fn new() -> Self {
        Self {
            config: GeneratorConfig::default(),
            rng: SimpleRng::new(),
            solver: DfsSolver::new(),
        }
    }

    /// Create a generator with custom configuration.
    pub fn with_config(config: GeneratorConfig) -> Self {
        Self {
            config,
            rng: SimpleRng::new(),
            solver: DfsSolver::new(),
        }
    }

    /// Create a generator with a specific seed for reproducibility.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            config: GeneratorConfig::default(),
            rng: SimpleRng::with_seed(seed),
            solver: DfsSolver::new(),
        }
    }

    /// Generate a puzzle with the given difficulty.
    pub fn generate(&mut self, difficulty: Difficulty) -> Grid {
        let symmetry = self.config.symmetry;
        self.config = GeneratorConfig::for_difficulty(difficulty);
        self.config.symmetry = symmetry;
        self.generate_with_config()
    }

    /// Generate a puzzle with the current configuration.
    pub fn generate_with_config(&mut self) -> Grid {
        let mut best: Option<Grid> = None;
        for _ in 0..self.config.max_attempts {
            let mut grid = self.filled_grid();
            self.remove_cells(&mut grid);
            if grid.filled_count() <= self.config.target_givens {
                return grid;
            }
            // Keep the sparsest puzzle seen so far.
            match &best {
                Some(b) if b.filled_count() <= grid.filled_count() => {}
                _ => best = Some(grid),
            }
        }
        best.unwrap_or_else(|| self.filled_grid())
    }

    /// Generate a completely filled valid grid.
    fn filled_grid(&mut self) -> Grid {
        loop {
            let mut grid = Grid::empty();
            // The diagonal boxes share no row, column, or box, so random
            // fills never clash; the solver completes the rest.
            self.fill_box(&mut grid, 0, 0);
            self.fill_box(&mut grid, 3, 3);
            self.fill_box(&mut grid, 6, 6);

            if let Ok(Some(solved)) = self.solver.solve(&grid) {
                return solved;
            }
        }
    }

    /// Fill a 3x3 box with shuffled 1..=9.
    fn fill_box(&mut self, grid: &mut Grid, start_row: usize, start_col: usize) {
        let mut values: Vec<u8> = (1..=9).collect();
        self.shuffle(&mut values);

        let mut idx = 0;
        for row in start_row..start_row + 3 {
            for col in start_col..start_col + 3 {
                grid.set(Position::new(row, col), values[idx]);
                idx += 1;
            }
        }
    }

    /// Remove cells (in symmetry pairs) while the puzzle keeps a unique
    /// solution, stopping at the configured given count.
    fn remove_cells(&mut self, grid: &mut Grid) {
        let mut positions: Vec<Position> = Position::all().collect();
        self.shuffle(&mut positions);

        let mut tried = [false; 81];
        for pos in positions {
            if tried[pos.index()] || grid.is_blank(pos) {
                continue;
            }
            let partner = self.symmetric_position(pos).filter(|&p| p != pos);

            tried[pos.index()] = true;
            if let Some(p) = partner {
                tried[p.index()] = true;
            }

            let value = grid.get(pos);
            let partner_value = partner.map(|p| grid.get(p));

            grid.clear(pos);
            if let Some(p) = partner {
                grid.clear(p);
            }

            if self.solver.has_unique_solution(grid) {
                if grid.filled_count() <= self.config.target_givens {
                    return;
                }
            } else {
                grid.set(pos, value);
                if let (Some(p), Some(v)) = (partner, partner_value) {
                    grid.set(p, v);
                }
            }
        }
    }

    /// Get the symmetric partner position based on symmetry type.
    fn symmetric_position(&self, pos: Position) -> Option<Position> {
        match self.config.symmetry {
            SymmetryType::None => None,
            SymmetryType::Rotational180 => Some(Position::new(8 - pos.row, 8 - pos.col)),
            SymmetryType::Horizontal => Some(Position::new(8 - pos.row, pos.col)),
            SymmetryType::Vertical => Some(Position::new(pos.row, 8 - pos.col)),
            SymmetryType::Diagonal => Some(Position::new(pos.col, pos.row)),
        }
    }

    /// Shuffle a slice using Fisher-Yates.
    fn shuffle<T>(&mut self, slice: &mut [T]) {
        for i in (1..slice.len()).rev() {
            let j = self.rng.next_usize(i + 1);
            slice.swap(i, j);
        }
    }
}

/// Small PCG-style PRNG, seeded from the OS so the engine stays off the
/// heavyweight `rand` stack.
struct SimpleRng {
    state: u64,
}

impl SimpleRng {
    fn new() -> Self {
        let mut seed_bytes = [0u8; 8];
        getrandom::getrandom(&mut seed_bytes).unwrap_or_else(|_| {
            // Fallback: a static counter still yields distinct streams.
            static COUNTER: std::sync::atomic::AtomicU64 = std::sync::atomic::AtomicU64::new(1);
            let counter = COUNTER.fetch_add(1, std::sync::atomic::Ordering::Relaxed);
            seed_bytes = counter.to_le_bytes();
        });
        Self::with_seed(u64::from_le_bytes(seed_bytes))
    }

    fn with_seed(seed: u64) -> Self {
        Self {
            state: seed.wrapping_add(1),
        }
    }

    fn next_u64(&mut self) -> u64 {
        self.state = self
            .state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        let xorshifted = (((self.state >> 18) ^ self.state) >> 27) as u32;
        let rot = (self.state >> 59) as u32;
        (xorshifted.rotate_right(rot)) as u64
    }

    fn next_usize(&mut self, bound: usize) -> usize {
        (self.next_u64() as usize) % bound
    }
}
