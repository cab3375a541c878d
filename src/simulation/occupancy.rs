//! Per-tick cell reservations

use std::collections::HashSet;

use super::types::Cell;

/// Cells claimed during the current tick.
///
/// Scoped to a single tick: reset before each tick's movement pass and never
/// carried across ticks.
#[derive(Debug, Clone, Default)]
pub struct Occupancy {
    reserved: HashSet<Cell>,
}

impl Occupancy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim `cell` for this tick. Returns false if it was already claimed.
    pub fn try_reserve(&mut self, cell: Cell) -> bool {
        self.reserved.insert(cell)
    }

    pub fn is_reserved(&self, cell: Cell) -> bool {
        self.reserved.contains(&cell)
    }

    /// Drop every reservation
    pub fn reset(&mut self) {
        self.reserved.clear();
    }

    pub fn len(&self) -> usize {
        self.reserved.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reserved.is_empty()
    }
}
