//! AC-3 propagation over the all-different Sudoku constraints.

use std::collections::VecDeque;

use log::trace;

use crate::csp::domains::DomainStore;
use crate::grid::{Position, PEERS};

/// Shrink domains until every arc between tracked neighbors is consistent,
/// or some domain empties. Returns `false` on wipeout.
///
/// The worklist is seeded with every directed arc (a, b) between distinct
/// tracked neighbors, in tracked order × peer order, and processed FIFO, so
/// a given store always propagates the same way. Arc consistency is a local
/// property: success here only means nothing more can be pruned, and search
/// must still finish the job.
pub(crate) fn enforce(store: &mut DomainStore) -> bool {
    let mut queue: VecDeque<(usize, usize)> = VecDeque::new();
    for &a in store.tracked() {
        for &b in PEERS[a].iter() {
            if store.is_tracked(b as usize) {
                queue.push_back((a, b as usize));
            }
        }
    }

    while let Some((a, b)) = queue.pop_front() {
        if !revise(store, a, b) {
            continue;
        }
        if store.domain(a).is_empty() {
            trace!("domain of {} wiped out", Position::from_index(a));
            return false;
        }
        // a shrank, so arcs pointing at a must be rechecked.
        for &c in PEERS[a].iter() {
            let c = c as usize;
            if c != b && store.is_tracked(c) {
                queue.push_back((c, a));
            }
        }
    }
    true
}

/// Remove from D(a) every value for which D(b) offers no different partner,
/// i.e. every v with D(b) ⊆ {v}. Returns whether anything was removed.
fn revise(store: &mut DomainStore, a: usize, b: usize) -> bool {
    let db = store.domain(b);
    let mut revised = false;
    for v in store.domain(a) {
        if db.without(v).is_empty() {
            store.remove(a, v);
            revised = true;
        }
    }
    revised
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::candidates::CandidateSet;
    use crate::grid::Grid;

    fn domains_of(store: &DomainStore) -> Vec<CandidateSet> {
        store.tracked().iter().map(|&i| store.domain(i)).collect()
    }

    #[test]
    fn reaches_a_fixed_point() {
        let grid = Grid::from_string(
            "530070000600195000098000060800060003400803001700020006060000280000419005000080079",
        )
        .unwrap();
        let mut store = DomainStore::from_grid(&grid);
        assert!(enforce(&mut store));

        // Idempotent once converged.
        let converged = domains_of(&store);
        assert!(enforce(&mut store));
        assert_eq!(domains_of(&store), converged);
    }

    #[test]
    fn never_discards_the_solution() {
        let puzzle = Grid::from_string(
            "530070000600195000098000060800060003400803001700020006060000280000419005000080079",
        )
        .unwrap();
        let solution = Grid::from_string(
            "534678912672195348198342567859761423426853791713924856961537284287419635345286179",
        )
        .unwrap();

        let mut store = DomainStore::from_grid(&puzzle);
        assert!(enforce(&mut store));
        for &idx in store.tracked() {
            let solved = solution.get(Position::from_index(idx));
            assert!(
                store.domain(idx).contains(solved),
                "pruning dropped the solution value {solved} at {}",
                Position::from_index(idx)
            );
        }
    }

    #[test]
    fn singleton_propagates_to_peers() {
        // Row 0 is 1..=8 with the last cell blank: its domain collapses to 9
        // at init, and propagation must strip 9 from everything it sees.
        let mut rows = [[0u8; 9]; 9];
        rows[0] = [1, 2, 3, 4, 5, 6, 7, 8, 0];
        let grid = Grid::from_rows(rows).unwrap();
        let mut store = DomainStore::from_grid(&grid);
        assert_eq!(store.domain(8).sole_value(), Some(9));

        assert!(enforce(&mut store));
        for &peer in PEERS[8].iter() {
            if store.is_tracked(peer as usize) {
                assert!(!store.domain(peer as usize).contains(9));
            }
        }
    }

    #[test]
    fn wipeout_is_reported() {
        // Two cells in one row restricted to the same single value cannot
        // both keep it.
        let mut rows = [[0u8; 9]; 9];
        rows[0] = [0, 0, 3, 4, 5, 6, 7, 8, 9];
        let grid = Grid::from_rows(rows).unwrap();
        let mut store = DomainStore::from_grid(&grid);
        // Both blanks in row 0 start with domain {1, 2}; force a clash.
        store.fix(0, 1);
        store.fix(1, 1);
        assert!(!enforce(&mut store));
    }
}
