//! Shortest-path search over the grid
//!
//! A* with 4-directional movement, unit edge cost and the Manhattan
//! heuristic. The frontier is an indexed binary heap so a node's cost can be
//! lowered in place when a better route to it is found.
//!
//! Ties between frontier nodes with equal `f = g + h` are broken by lower `h`
//! first, then by the order in which the nodes entered the frontier. A node
//! keeps its original insertion order when its cost is decreased.

use std::cmp::Ordering;
use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};

use super::grid::Grid;
use super::types::Cell;

/// A* path finder over a `width` x `height` grid with a fixed blocked set
///
/// Search state is keyed by the cells actually visited, so the cost of a
/// query follows the explored area rather than the grid size.
#[derive(Debug, Clone, Default)]
pub struct PathFinder {
    width: i32,
    height: i32,
    blocked: HashSet<Cell>,
}

impl PathFinder {
    pub fn new(width: i32, height: i32, blocked: impl IntoIterator<Item = Cell>) -> Self {
        Self {
            width: width.max(0),
            height: height.max(0),
            blocked: blocked.into_iter().collect(),
        }
    }

    /// Path finder sized to `grid`
    pub fn for_grid(grid: &Grid, blocked: impl IntoIterator<Item = Cell>) -> Self {
        Self::new(grid.width(), grid.height(), blocked)
    }

    pub fn blocked(&self) -> &HashSet<Cell> {
        &self.blocked
    }

    pub fn is_blocked(&self, cell: Cell) -> bool {
        self.blocked.contains(&cell)
    }

    fn in_bounds(&self, cell: Cell) -> bool {
        cell.x >= 0 && cell.x < self.width && cell.y >= 0 && cell.y < self.height
    }

    /// Shortest path from `start` to `goal`, both inclusive.
    ///
    /// Returns `[start]` when `start == goal`, and an empty vector when
    /// either endpoint is out of bounds, the goal is blocked, or no route
    /// exists.
    pub fn path(&self, start: Cell, goal: Cell) -> Vec<Cell> {
        if !self.in_bounds(start) || !self.in_bounds(goal) || self.is_blocked(goal) {
            return Vec::new();
        }
        if start == goal {
            return vec![start];
        }

        let mut g_score: HashMap<Cell, u64> = HashMap::new();
        let mut came_from: HashMap<Cell, Cell> = HashMap::new();
        let mut closed: HashSet<Cell> = HashSet::new();
        let mut open = IndexedHeap::new();
        let mut next_seq = 0u64;

        let h = start.manhattan(&goal);
        g_score.insert(start, 0);
        open.push(FrontierEntry {
            cell: start,
            f: h,
            h,
            seq: next_seq,
        });
        next_seq += 1;

        while let Some(current) = open.pop() {
            if current.cell == goal {
                return reconstruct(&came_from, start, goal);
            }
            closed.insert(current.cell);

            let tentative = g_score.get(&current.cell).copied().unwrap_or(u64::MAX) + 1;
            for neighbor in current.cell.neighbors() {
                if !self.in_bounds(neighbor)
                    || self.is_blocked(neighbor)
                    || closed.contains(&neighbor)
                {
                    continue;
                }
                match g_score.entry(neighbor) {
                    Entry::Occupied(known) if tentative >= *known.get() => continue,
                    Entry::Occupied(mut known) => {
                        known.insert(tentative);
                    }
                    Entry::Vacant(slot) => {
                        slot.insert(tentative);
                    }
                }

                came_from.insert(neighbor, current.cell);
                let h = neighbor.manhattan(&goal);
                if open.contains(neighbor) {
                    open.decrease_key(neighbor, tentative + h, h);
                } else {
                    open.push(FrontierEntry {
                        cell: neighbor,
                        f: tentative + h,
                        h,
                        seq: next_seq,
                    });
                    next_seq += 1;
                }
            }
        }

        Vec::new()
    }
}

fn reconstruct(came_from: &HashMap<Cell, Cell>, start: Cell, goal: Cell) -> Vec<Cell> {
    let mut path = vec![goal];
    let mut cell = goal;
    while cell != start {
        match came_from.get(&cell) {
            Some(prev) => cell = *prev,
            None => return Vec::new(),
        }
        path.push(cell);
    }
    path.reverse();
    path
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct FrontierEntry {
    cell: Cell,
    f: u64,
    h: u64,
    seq: u64,
}

impl FrontierEntry {
    /// Expansion priority: lower f, then lower h, then earlier insertion
    fn priority_cmp(&self, other: &Self) -> Ordering {
        self.f
            .cmp(&other.f)
            .then(self.h.cmp(&other.h))
            .then(self.seq.cmp(&other.seq))
    }
}

/// Binary min-heap that tracks where each cell sits, allowing decrease-key
#[derive(Debug, Default)]
struct IndexedHeap {
    entries: Vec<FrontierEntry>,
    positions: HashMap<Cell, usize>,
}

impl IndexedHeap {
    fn new() -> Self {
        Self::default()
    }

    fn len(&self) -> usize {
        self.entries.len()
    }

    fn contains(&self, cell: Cell) -> bool {
        self.positions.contains_key(&cell)
    }

    fn push(&mut self, entry: FrontierEntry) {
        let pos = self.entries.len();
        self.positions.insert(entry.cell, pos);
        self.entries.push(entry);
        self.sift_up(pos);
    }

    fn pop(&mut self) -> Option<FrontierEntry> {
        if self.entries.is_empty() {
            return None;
        }
        let last = self.entries.len() - 1;
        self.swap(0, last);
        let top = self.entries.pop()?;
        self.positions.remove(&top.cell);
        if !self.entries.is_empty() {
            self.sift_down(0);
        }
        Some(top)
    }

    /// Lower the cost of a cell already in the heap. Raising it is ignored.
    fn decrease_key(&mut self, cell: Cell, f: u64, h: u64) {
        let Some(&pos) = self.positions.get(&cell) else {
            return;
        };
        let entry = &mut self.entries[pos];
        if (f, h) >= (entry.f, entry.h) {
            return;
        }
        entry.f = f;
        entry.h = h;
        self.sift_up(pos);
    }

    fn less(&self, a: usize, b: usize) -> bool {
        self.entries[a].priority_cmp(&self.entries[b]) == Ordering::Less
    }

    fn swap(&mut self, a: usize, b: usize) {
        self.entries.swap(a, b);
        self.positions.insert(self.entries[a].cell, a);
        self.positions.insert(self.entries[b].cell, b);
    }

    fn sift_up(&mut self, mut pos: usize) {
        while pos > 0 {
            let parent = (pos - 1) / 2;
            if !self.less(pos, parent) {
                break;
            }
            self.swap(pos, parent);
            pos = parent;
        }
    }

    fn sift_down(&mut self, mut pos: usize) {
        loop {
            let left = 2 * pos + 1;
            let right = left + 1;
            let mut smallest = pos;
            if left < self.len() && self.less(left, smallest) {
                smallest = left;
            }
            if right < self.len() && self.less(right, smallest) {
                smallest = right;
            }
            if smallest == pos {
                break;
            }
            self.swap(pos, smallest);
            pos = smallest;
        }
    }
}
