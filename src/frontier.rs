use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use crate::cell::Cell;

/// Heap entry for a discovered cell. Entries are ordered by the key `(f, h, row, column)` only,
/// so among equal `f` the cell closest to the goal comes first, then the smallest row, then
/// the smallest column.
#[derive(Clone, Copy, Debug)]
pub(crate) struct FrontierEntry {
    pub estimated_cost: usize,
    pub heuristic: usize,
    pub cell: Cell,
    pub cost: usize,
    pub index: usize,
}

impl FrontierEntry {
    fn key(&self) -> (usize, usize, usize, usize) {
        (
            self.estimated_cost,
            self.heuristic,
            self.cell.row,
            self.cell.column,
        )
    }
}

impl PartialEq for FrontierEntry {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for FrontierEntry {}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key().cmp(&other.key())
    }
}

/// Min-heap over [FrontierEntry]. A cell whose cost is lowered is pushed again; the old entry
/// stays behind and has to be recognised as stale by the caller when popped.
#[derive(Debug, Default)]
pub(crate) struct Frontier {
    heap: BinaryHeap<Reverse<FrontierEntry>>,
}

impl Frontier {
    pub fn new() -> Frontier {
        Frontier::default()
    }

    pub fn push(&mut self, entry: FrontierEntry) {
        self.heap.push(Reverse(entry));
    }

    pub fn pop(&mut self) -> Option<FrontierEntry> {
        self.heap.pop().map(|Reverse(entry)| entry)
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(f: usize, h: usize, row: usize, column: usize) -> FrontierEntry {
        FrontierEntry {
            estimated_cost: f,
            heuristic: h,
            cell: Cell::new(row, column),
            cost: f - h,
            index: 0,
        }
    }

    fn drain(mut frontier: Frontier) -> Vec<Cell> {
        std::iter::from_fn(|| frontier.pop())
            .map(|e| e.cell)
            .collect()
    }

    #[test]
    fn lowest_estimate_first() {
        let mut frontier = Frontier::new();
        frontier.push(entry(6, 1, 0, 0));
        frontier.push(entry(4, 4, 5, 5));
        frontier.push(entry(5, 0, 1, 1));
        assert_eq!(frontier.len(), 3);
        assert_eq!(
            drain(frontier),
            vec![Cell::new(5, 5), Cell::new(1, 1), Cell::new(0, 0)]
        );
    }

    /// Each tie-break level is exercised: heuristic, then row, then column.
    #[test]
    fn tie_breaks_in_order() {
        let mut frontier = Frontier::new();
        frontier.push(entry(6, 2, 0, 0));
        frontier.push(entry(6, 1, 1, 3));
        frontier.push(entry(6, 1, 0, 4));
        frontier.push(entry(6, 1, 0, 2));
        assert_eq!(
            drain(frontier),
            vec![
                Cell::new(0, 2),
                Cell::new(0, 4),
                Cell::new(1, 3),
                Cell::new(0, 0)
            ]
        );
    }

    #[test]
    fn empty_frontier() {
        let mut frontier = Frontier::new();
        assert_eq!(frontier.len(), 0);
        assert!(frontier.pop().is_none());
        frontier.push(entry(1, 1, 0, 0));
        assert_eq!(frontier.len(), 1);
    }
}
