//! Simulation configuration

use anyhow::{bail, Context, Result};

use super::lights::LightTiming;
use super::types::Cell;

/// Settings for building and running a [`SimWorld`](super::SimWorld)
#[derive(Debug, Clone, PartialEq)]
pub struct SimConfig {
    pub width: i32,
    pub height: i32,
    /// Vehicles spawned when the world is built
    pub vehicles: usize,
    /// Ticks to run in headless mode
    pub ticks: u32,
    /// Seed for reproducible spawns
    pub seed: Option<u64>,
    /// Cells closed to traffic from the start
    pub blocked: Vec<Cell>,
    pub light_timing: LightTiming,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            width: 20,
            height: 20,
            vehicles: 0,
            ticks: 100,
            seed: None,
            blocked: Vec::new(),
            light_timing: LightTiming::default(),
        }
    }
}

impl SimConfig {
    pub fn validate(&self) -> Result<()> {
        if self.width <= 0 || self.height <= 0 {
            bail!(
                "Grid dimensions must be positive, got {}x{}",
                self.width,
                self.height
            );
        }
        if let Some(cell) = self
            .blocked
            .iter()
            .find(|c| c.x < 0 || c.x >= self.width || c.y < 0 || c.y >= self.height)
        {
            bail!(
                "Blocked cell {} lies outside the {}x{} grid",
                cell,
                self.width,
                self.height
            );
        }
        Ok(())
    }
}

/// Parse a cell written as `x,y`
pub fn parse_cell(text: &str) -> Result<Cell> {
    let (x, y) = text
        .split_once(',')
        .with_context(|| format!("Expected a cell as x,y but got '{}'", text))?;
    let x = x
        .trim()
        .parse::<i32>()
        .with_context(|| format!("Invalid x coordinate in '{}'", text))?;
    let y = y
        .trim()
        .parse::<i32>()
        .with_context(|| format!("Invalid y coordinate in '{}'", text))?;
    Ok(Cell::new(x, y))
}
