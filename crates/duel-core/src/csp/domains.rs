//! Per-cell candidate domains for the constraint solver.

use crate::candidates::CandidateSet;
use crate::grid::{Grid, Position, PEERS};

/// Candidate domains for the cells that were blank when the solve started.
///
/// The tracked-cell set is fixed at construction; a tracked cell that gets
/// assigned during search keeps its (singleton) domain rather than leaving
/// the store. Domains are advisory pruning state, never authoritative: they
/// only shrink, and an emptied domain proves the current partial assignment
/// infeasible.
///
/// `Clone` is the branch snapshot: search clones the store before each
/// tentative assignment so a failed guess cannot leak narrowing into its
/// sibling branches.
#[derive(Clone)]
pub struct DomainStore {
    domains: [CandidateSet; 81],
    tracked: Vec<usize>,
    is_tracked: [bool; 81],
}

impl DomainStore {
    /// Build the store for `grid`, enforcing node consistency: every value
    /// already fixed in a peer is removed from a blank cell's domain. This
    /// never fails; a wiped-out domain is a legal (unsolvable) state that
    /// propagation reports later.
    pub fn from_grid(grid: &Grid) -> Self {
        let mut domains = [CandidateSet::NONE; 81];
        let mut tracked = Vec::new();
        let mut is_tracked = [false; 81];

        for pos in Position::all() {
            if !grid.is_blank(pos) {
                continue;
            }
            let idx = pos.index();
            let mut domain = CandidateSet::ALL;
            for &peer in PEERS[idx].iter() {
                let fixed = grid.get_at(peer as usize);
                if fixed != 0 {
                    domain.remove(fixed);
                }
            }
            domains[idx] = domain;
            tracked.push(idx);
            is_tracked[idx] = true;
        }

        Self {
            domains,
            tracked,
            is_tracked,
        }
    }

    #[inline]
    pub fn domain(&self, idx: usize) -> CandidateSet {
        self.domains[idx]
    }

    #[inline]
    pub fn is_tracked(&self, idx: usize) -> bool {
        self.is_tracked[idx]
    }

    /// Tracked cell indices in row-major discovery order.
    #[inline]
    pub fn tracked(&self) -> &[usize] {
        &self.tracked
    }

    /// Collapse a tracked cell's domain to the assigned value.
    #[inline]
    pub fn fix(&mut self, idx: usize, value: u8) {
        debug_assert!(self.is_tracked[idx]);
        self.domains[idx] = CandidateSet::singleton(value);
    }

    #[inline]
    pub(crate) fn remove(&mut self, idx: usize, value: u8) {
        self.domains[idx].remove(value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn node_consistency_strips_fixed_peers() {
        let grid = Grid::from_string(
            "530070000600195000098000060800060003400803001700020006060000280000419005000080079",
        )
        .unwrap();
        let store = DomainStore::from_grid(&grid);

        assert_eq!(store.tracked().len(), grid.blank_count());

        // No blank cell's domain may contain a value fixed in a peer.
        for &idx in store.tracked() {
            let pos = Position::from_index(idx);
            for value in store.domain(idx) {
                assert!(
                    !grid.conflicts(pos, value),
                    "domain of {pos} kept {value} despite a fixed peer"
                );
            }
        }

        // r1c3 sees 5,3,7 in its row, 6,8,9,8.. in column/box; spot-check.
        let d = store.domain(Position::new(0, 2).index());
        assert!(!d.contains(5));
        assert!(!d.contains(3));
        assert!(!d.contains(9));
        assert!(d.contains(1));
    }

    #[test]
    fn blank_grid_domains_are_full() {
        let store = DomainStore::from_grid(&Grid::empty());
        assert_eq!(store.tracked().len(), 81);
        assert!(store.tracked().iter().all(|&i| store.domain(i) == CandidateSet::ALL));
    }

    #[test]
    fn snapshot_is_independent() {
        let store = DomainStore::from_grid(&Grid::empty());
        let mut branch = store.clone();
        branch.fix(40, 5);
        assert_eq!(branch.domain(40).sole_value(), Some(5));
        assert_eq!(store.domain(40), CandidateSet::ALL);
    }
}
