//! Vehicle entity
//!
//! Vehicles live on grid cells and move at most one cell per tick toward
//! their destination.

use chrono::{DateTime, Utc};

use super::types::Cell;

/// Cells per tick assigned to newly spawned vehicles
pub const DEFAULT_SPEED: f64 = 1.0;

/// A vehicle in the traffic simulation
#[derive(Debug, Clone, PartialEq)]
pub struct Vehicle {
    pub id: String,
    pub position: Cell,
    pub destination: Cell,
    /// Cells per tick
    pub speed: f64,
    pub created_at: DateTime<Utc>,
}

impl Vehicle {
    pub fn new(id: impl Into<String>, position: Cell, destination: Cell) -> Self {
        Self {
            id: id.into(),
            position,
            destination,
            speed: DEFAULT_SPEED,
            created_at: Utc::now(),
        }
    }

    pub fn has_arrived(&self) -> bool {
        self.position == self.destination
    }
}
