//! Backtracking search that maintains arc consistency after every guess.

use log::trace;

use crate::csp::{ac3, domains::DomainStore};
use crate::grid::{Grid, Position};

/// Complete the grid by depth-first search over the tracked cells.
///
/// The grid carries the authoritative partial assignment; `store` is the
/// pruning state for this branch and is never mutated here; each guess gets
/// its own propagated copy, and unwinding a guess resets the cell to 0.
pub(crate) fn solve(grid: &mut Grid, store: &DomainStore) -> bool {
    let Some(cell) = pick_cell(grid, store) else {
        return true;
    };
    let pos = Position::from_index(cell);

    for value in store.domain(cell) {
        // The store can lag behind grid state inherited from ancestor
        // branches, so re-validate against the live grid before committing.
        if grid.conflicts(pos, value) {
            continue;
        }
        grid.set(pos, value);

        let mut branch = store.clone();
        branch.fix(cell, value);
        if ac3::enforce(&mut branch) && solve(grid, &branch) {
            return true;
        }

        trace!("retracting {value} at {pos}");
        grid.clear(pos);
    }
    false
}

/// Minimum-remaining-values choice among tracked cells still blank in the
/// grid; `None` means the assignment is complete. Ties keep the first cell
/// in row-major order, so a run is reproducible.
fn pick_cell(grid: &Grid, store: &DomainStore) -> Option<usize> {
    store
        .tracked()
        .iter()
        .copied()
        .filter(|&idx| grid.get_at(idx) == 0)
        .min_by_key(|&idx| store.domain(idx).len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mrv_prefers_narrowest_domain() {
        // Row 0 nearly full: the one blank there has a single candidate and
        // must be picked ahead of the wide-open cells below.
        let mut rows = [[0u8; 9]; 9];
        rows[0] = [1, 2, 3, 4, 5, 6, 7, 8, 0];
        let grid = Grid::from_rows(rows).unwrap();
        let store = DomainStore::from_grid(&grid);
        assert_eq!(pick_cell(&grid, &store), Some(8));
    }

    #[test]
    fn complete_grid_ends_the_search() {
        let mut solved = Grid::from_string(
            "534678912672195348198342567859761423426853791713924856961537284287419635345286179",
        )
        .unwrap();
        let store = DomainStore::from_grid(&solved);
        assert!(solve(&mut solved, &store));
    }

    #[test]
    fn failed_search_unwinds_every_assignment() {
        // 1..8 fixed in row 0 and the missing 9 blocked from the last cell
        // by its column: unsolvable, and the grid must come back untouched.
        let mut rows = [[0u8; 9]; 9];
        rows[0] = [1, 2, 3, 4, 5, 6, 7, 8, 0];
        rows[5][8] = 9;
        let mut grid = Grid::from_rows(rows).unwrap();
        let before = grid.clone();

        let mut store = DomainStore::from_grid(&grid);
        if ac3::enforce(&mut store) {
            assert!(!solve(&mut grid, &store));
        }
        assert_eq!(grid, before);
    }
}
