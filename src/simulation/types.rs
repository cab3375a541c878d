//! Core types for the traffic simulation
//!
//! Plain value types shared by every component of the grid simulation.

use std::fmt;

/// Linear id returned for coordinates outside the grid
pub const INVALID_ID: i64 = -1;

/// A unit grid square addressed by (x, y)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    /// Coordinate pair returned for ids outside the grid
    pub const INVALID: Cell = Cell { x: -1, y: -1 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// |dx| + |dy|, exact for any pair of cells
    pub fn manhattan(&self, other: &Cell) -> u64 {
        u64::from(self.x.abs_diff(other.x)) + u64::from(self.y.abs_diff(other.y))
    }

    /// The four orthogonal neighbours, unchecked against any bounds
    pub fn neighbors(&self) -> [Cell; 4] {
        [
            Cell::new(self.x + 1, self.y),
            Cell::new(self.x - 1, self.y),
            Cell::new(self.x, self.y + 1),
            Cell::new(self.x, self.y - 1),
        ]
    }
}

impl From<(i32, i32)> for Cell {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Color shown by a traffic light
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LightState {
    Green,
    Yellow,
    Red,
}

impl LightState {
    /// The state that follows this one in the green -> yellow -> red cycle
    pub fn next(self) -> Self {
        match self {
            LightState::Green => LightState::Yellow,
            LightState::Yellow => LightState::Red,
            LightState::Red => LightState::Green,
        }
    }

    /// Whether a vehicle may enter a cell governed by this light
    pub fn allows_entry(self) -> bool {
        self == LightState::Green
    }

    pub fn as_str(self) -> &'static str {
        match self {
            LightState::Green => "green",
            LightState::Yellow => "yellow",
            LightState::Red => "red",
        }
    }
}

impl fmt::Display for LightState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A designated cell governed by a traffic light
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Intersection {
    pub cell: Cell,
    pub light_state: LightState,
}

impl Intersection {
    pub fn new(cell: Cell, light_state: LightState) -> Self {
        Self { cell, light_state }
    }
}
