//! Main simulation world that ties everything together
//!
//! The world owns the grid, one light cycle per intersection, the blocked
//! cells and the tick counter. Vehicles live in a shared
//! [`VehicleRegistry`] so other threads can spawn, despawn and query them
//! while the world keeps the tick cadence.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::fmt::Write as _;
use std::sync::Arc;

use anyhow::Result;
use log::{debug, info};

use super::config::SimConfig;
use super::grid::Grid;
use super::lights::{LightCycle, LightTiming};
use super::movement::{move_one_tick, TickReport};
use super::occupancy::Occupancy;
use super::pathfinder::PathFinder;
use super::registry::VehicleRegistry;
use super::types::{Cell, LightState};
use super::vehicle::Vehicle;

/// The main simulation world
pub struct SimWorld {
    grid: Grid,

    /// Shared vehicle store
    registry: Arc<VehicleRegistry>,

    /// Light cycle per intersection cell
    lights: BTreeMap<Cell, LightCycle>,

    /// Route planner over the current blocked cells
    pathfinder: PathFinder,

    /// Reservations for the tick in progress
    occupancy: Occupancy,

    /// Destinations that take precedence over a vehicle's own
    destination_overrides: HashMap<String, Cell>,

    /// Ticks completed so far
    tick: u64,
}

impl SimWorld {
    fn new_internal(grid: Grid, registry: VehicleRegistry, timing: LightTiming) -> Self {
        let lights = grid
            .intersections()
            .iter()
            .map(|i| (i.cell, LightCycle::with_timing(timing)))
            .collect();

        let mut world = Self {
            pathfinder: PathFinder::for_grid(&grid, std::iter::empty()),
            grid,
            registry: Arc::new(registry),
            lights,
            occupancy: Occupancy::new(),
            destination_overrides: HashMap::new(),
            tick: 0,
        };
        world.sync_grid_lights();

        info!(
            "Created {}x{} world with {} intersections",
            world.grid.width(),
            world.grid.height(),
            world.lights.len()
        );
        world
    }

    pub fn new(width: i32, height: i32) -> Self {
        Self::new_internal(
            Grid::new(width, height),
            VehicleRegistry::new(),
            LightTiming::default(),
        )
    }

    /// Create a new SimWorld with a seeded RNG for reproducible spawns
    pub fn new_with_seed(width: i32, height: i32, seed: u64) -> Self {
        Self::new_internal(
            Grid::new(width, height),
            VehicleRegistry::new_with_seed(seed),
            LightTiming::default(),
        )
    }

    /// Build a world from validated settings, spawning its initial vehicles
    pub fn from_config(config: &SimConfig) -> Result<Self> {
        config.validate()?;

        let registry = match config.seed {
            Some(seed) => VehicleRegistry::new_with_seed(seed),
            None => VehicleRegistry::new(),
        };
        let mut world = Self::new_internal(
            Grid::new(config.width, config.height),
            registry,
            config.light_timing,
        );
        for cell in &config.blocked {
            world.block_cell(*cell);
        }
        world.spawn(config.vehicles);
        Ok(world)
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Handle to the vehicle store for use from other threads
    pub fn registry(&self) -> &Arc<VehicleRegistry> {
        &self.registry
    }

    /// Number of ticks completed
    pub fn tick_count(&self) -> u64 {
        self.tick
    }

    /// Spawn `count` vehicles anywhere on the grid
    pub fn spawn(&self, count: usize) -> Vec<String> {
        self.registry
            .spawn(count, self.grid.width(), self.grid.height())
    }

    /// Despawn vehicles, dropping any destination overrides they had
    pub fn despawn<I, S>(&mut self, ids: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let ids: Vec<S> = ids.into_iter().collect();
        for id in &ids {
            self.destination_overrides.remove(id.as_ref());
        }
        self.registry.despawn(ids)
    }

    pub fn get(&self, id: &str) -> Option<Vehicle> {
        self.registry.get(id)
    }

    pub fn list(&self) -> Vec<Vehicle> {
        self.registry.list()
    }

    pub fn count(&self) -> usize {
        self.registry.count()
    }

    /// Shortest route between two cells over the current blocked cells
    pub fn compute_path(&self, start: Cell, goal: Cell) -> Vec<Cell> {
        self.pathfinder.path(start, goal)
    }

    pub fn blocked_cells(&self) -> &HashSet<Cell> {
        self.pathfinder.blocked()
    }

    /// Close a cell to traffic. Returns false if the cell is outside the
    /// grid or already blocked.
    pub fn block_cell(&mut self, cell: Cell) -> bool {
        if !self.grid.contains(cell) || self.pathfinder.is_blocked(cell) {
            return false;
        }
        let mut blocked = self.pathfinder.blocked().clone();
        blocked.insert(cell);
        self.pathfinder = PathFinder::for_grid(&self.grid, blocked);
        info!("Blocked cell {}", cell);
        true
    }

    /// Reopen a blocked cell. Returns false if it was not blocked.
    pub fn unblock_cell(&mut self, cell: Cell) -> bool {
        if !self.pathfinder.is_blocked(cell) {
            return false;
        }
        let mut blocked = self.pathfinder.blocked().clone();
        blocked.remove(&cell);
        self.pathfinder = PathFinder::for_grid(&self.grid, blocked);
        info!("Unblocked cell {}", cell);
        true
    }

    /// Route a vehicle toward `destination` instead of its own. Returns
    /// false if no such vehicle exists.
    pub fn set_destination_override(&mut self, id: &str, destination: Cell) -> bool {
        if self.registry.get(id).is_none() {
            return false;
        }
        self.destination_overrides.insert(id.to_string(), destination);
        true
    }

    pub fn clear_destination_override(&mut self, id: &str) -> bool {
        self.destination_overrides.remove(id).is_some()
    }

    /// The light cycle at an intersection cell
    pub fn light(&self, cell: Cell) -> Option<&LightCycle> {
        self.lights.get(&cell)
    }

    /// Current color at every intersection
    pub fn light_states(&self) -> HashMap<Cell, LightState> {
        self.lights
            .iter()
            .map(|(cell, cycle)| (*cell, cycle.state()))
            .collect()
    }

    fn sync_grid_lights(&mut self) {
        for (cell, cycle) in &self.lights {
            self.grid.set_light_state(*cell, cycle.state());
        }
    }

    fn advance_lights(&mut self) {
        for (cell, cycle) in self.lights.iter_mut() {
            if let Some(state) = cycle.tick() {
                debug!("Light at {} turned {}", cell, state);
            }
        }
        self.sync_grid_lights();
    }

    /// Advance the simulation by one tick
    ///
    /// Lights advance first, then every vehicle moves at most one cell in
    /// creation order.
    pub fn tick(&mut self) -> TickReport {
        self.advance_lights();

        let lights = self.light_states();
        let pathfinder = &self.pathfinder;
        let occupancy = &mut self.occupancy;
        let overrides = &self.destination_overrides;
        let mut live = HashSet::new();
        let report = self.registry.with_vehicles_mut(|vehicles| {
            let vehicles = vehicles.inspect(|v| {
                if overrides.contains_key(&v.id) {
                    live.insert(v.id.clone());
                }
            });
            move_one_tick(vehicles, pathfinder, &lights, occupancy, Some(overrides))
        });

        // Vehicles despawned straight through the registry leave overrides behind
        self.destination_overrides.retain(|id, _| live.contains(id));

        self.tick += 1;
        debug!(
            "Tick {}: moved={}, arrived={}, unreachable={}, held_at_light={}, held_by_conflict={}",
            self.tick,
            report.moved,
            report.arrived,
            report.unreachable,
            report.held_at_light,
            report.held_by_conflict
        );
        report
    }

    /// Run `ticks` ticks, returning the combined report
    pub fn run(&mut self, ticks: u32) -> TickReport {
        let mut total = TickReport::default();
        for _ in 0..ticks {
            let report = self.tick();
            total.moved += report.moved;
            total.arrived += report.arrived;
            total.unreachable += report.unreachable;
            total.held_at_light += report.held_at_light;
            total.held_by_conflict += report.held_by_conflict;
        }
        total
    }

    /// One-paragraph description of the world state
    pub fn summary(&self) -> String {
        let vehicles = self.list();
        let arrived = vehicles.iter().filter(|v| v.has_arrived()).count();

        let mut out = String::new();
        let _ = writeln!(out, "=== Traffic Simulation Summary ===");
        let _ = writeln!(out, "Tick: {}", self.tick);
        let _ = writeln!(
            out,
            "Grid: {}x{}, Intersections: {}, Blocked cells: {}",
            self.grid.width(),
            self.grid.height(),
            self.lights.len(),
            self.pathfinder.blocked().len()
        );
        let _ = writeln!(out, "Vehicles: {} ({} at destination)", vehicles.len(), arrived);
        for (cell, cycle) in &self.lights {
            let _ = writeln!(
                out,
                "  Light {}: {} ({} ticks)",
                cell,
                cycle.state(),
                cycle.elapsed()
            );
        }
        out
    }

    /// Draw the grid as text
    ///
    /// `#` blocked, `G`/`Y`/`R` intersection light, `V` one vehicle,
    /// `*` several vehicles, `.` free cell.
    pub fn render_map(&self) -> String {
        let mut vehicles_at: HashMap<Cell, usize> = HashMap::new();
        for vehicle in self.list() {
            *vehicles_at.entry(vehicle.position).or_default() += 1;
        }

        let mut out = String::new();
        for y in 0..self.grid.height() {
            for x in 0..self.grid.width() {
                let cell = Cell::new(x, y);
                let glyph = match vehicles_at.get(&cell).copied() {
                    Some(1) => 'V',
                    Some(_) => '*',
                    None if self.pathfinder.is_blocked(cell) => '#',
                    None => match self.lights.get(&cell).map(LightCycle::state) {
                        Some(LightState::Green) => 'G',
                        Some(LightState::Yellow) => 'Y',
                        Some(LightState::Red) => 'R',
                        None => '.',
                    },
                };
                out.push(glyph);
            }
            out.push('\n');
        }
        out
    }
}
