//! Static grid layout
//!
//! Dimensions, cell addressing and the signal-controlled intersections
//! seeded at construction.

use super::types::{Cell, Intersection, LightState, INVALID_ID};

/// Candidate intersections seeded into every grid; those outside the
/// bounds are dropped.
pub const DEFAULT_INTERSECTIONS: [(i32, i32); 4] = [(5, 5), (5, 15), (15, 5), (15, 15)];

/// A bounded grid of cells with a fixed set of intersections
#[derive(Debug, Clone)]
pub struct Grid {
    width: i32,
    height: i32,
    intersections: Vec<Intersection>,
}

impl Grid {
    /// Build a `width` x `height` grid and seed the default intersections.
    /// Negative dimensions are treated as zero, giving an empty grid.
    pub fn new(width: i32, height: i32) -> Self {
        let mut grid = Self {
            width: width.max(0),
            height: height.max(0),
            intersections: Vec::new(),
        };
        grid.seed_default_intersections();
        grid
    }

    fn seed_default_intersections(&mut self) {
        for (x, y) in DEFAULT_INTERSECTIONS {
            if self.is_valid(x, y) {
                self.intersections
                    .push(Intersection::new(Cell::new(x, y), LightState::Red));
            }
        }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    /// Total number of cells
    pub fn num_cells(&self) -> i64 {
        self.width as i64 * self.height as i64
    }

    /// Whether (x, y) lies inside the grid bounds
    pub fn is_valid(&self, x: i32, y: i32) -> bool {
        x >= 0 && x < self.width && y >= 0 && y < self.height
    }

    pub fn contains(&self, cell: Cell) -> bool {
        self.is_valid(cell.x, cell.y)
    }

    /// Map (x, y) to its linear id `y * width + x`, or [`INVALID_ID`] when
    /// out of bounds.
    pub fn to_id(&self, x: i32, y: i32) -> i64 {
        if !self.is_valid(x, y) {
            return INVALID_ID;
        }
        y as i64 * self.width as i64 + x as i64
    }

    /// Map a linear id back to its cell, or [`Cell::INVALID`] when the id is
    /// outside `[0, width * height)`.
    pub fn from_id(&self, id: i64) -> Cell {
        if id < 0 || id >= self.num_cells() {
            return Cell::INVALID;
        }
        let width = self.width as i64;
        Cell::new((id % width) as i32, (id / width) as i32)
    }

    /// A copy of the intersection list; mutating it does not affect the grid
    pub fn intersections(&self) -> Vec<Intersection> {
        self.intersections.clone()
    }

    pub fn is_intersection(&self, cell: Cell) -> bool {
        self.intersections.iter().any(|i| i.cell == cell)
    }

    /// Record the light color currently shown at an intersection.
    /// Returns false if `cell` is not an intersection.
    pub fn set_light_state(&mut self, cell: Cell, state: LightState) -> bool {
        match self.intersections.iter_mut().find(|i| i.cell == cell) {
            Some(intersection) => {
                intersection.light_state = state;
                true
            }
            None => false,
        }
    }
}
