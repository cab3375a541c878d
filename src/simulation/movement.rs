//! One simulation step of vehicle movement
//!
//! Vehicles are processed in the order the caller supplies them. Each one
//! asks the path finder for its route, looks at the light guarding the next
//! cell, and then tries to reserve that cell for this tick. The first
//! vehicle to reserve a cell wins it; later claimants hold in place.

use std::collections::HashMap;

use super::occupancy::Occupancy;
use super::pathfinder::PathFinder;
use super::types::{Cell, LightState};
use super::vehicle::Vehicle;

/// What happened to a single vehicle during a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// Advanced one cell to the contained position
    Moved(Cell),
    /// Already standing on its destination
    Arrived,
    /// No route to the destination exists
    Unreachable,
    /// Next cell is an intersection showing red or yellow
    HeldAtLight,
    /// Next cell was already claimed by an earlier vehicle this tick
    HeldByConflict,
}

/// Tally of outcomes for one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickReport {
    pub moved: usize,
    pub arrived: usize,
    pub unreachable: usize,
    pub held_at_light: usize,
    pub held_by_conflict: usize,
}

impl TickReport {
    fn record(&mut self, outcome: MoveOutcome) {
        match outcome {
            MoveOutcome::Moved(_) => self.moved += 1,
            MoveOutcome::Arrived => self.arrived += 1,
            MoveOutcome::Unreachable => self.unreachable += 1,
            MoveOutcome::HeldAtLight => self.held_at_light += 1,
            MoveOutcome::HeldByConflict => self.held_by_conflict += 1,
        }
    }

    /// Vehicles that did not change cell
    pub fn held(&self) -> usize {
        self.arrived + self.unreachable + self.held_at_light + self.held_by_conflict
    }

    pub fn total(&self) -> usize {
        self.moved + self.held()
    }
}

/// Move every vehicle by at most one cell
///
/// # Arguments
/// * `vehicles` - The vehicles to process; iteration order decides who wins
///   a contested cell
/// * `pathfinder` - Route planner honoring the current blocked cells
/// * `lights` - Current color of every signal-controlled cell
/// * `occupancy` - Reservations for this tick; cleared before use
/// * `destinations` - Optional per-vehicle destination overrides keyed by id
///
/// Vehicles already sharing a cell before the tick are left as they are;
/// only moves made during this tick are checked for conflicts.
pub fn move_one_tick<'a, I>(
    vehicles: I,
    pathfinder: &PathFinder,
    lights: &HashMap<Cell, LightState>,
    occupancy: &mut Occupancy,
    destinations: Option<&HashMap<String, Cell>>,
) -> TickReport
where
    I: IntoIterator<Item = &'a mut Vehicle>,
{
    occupancy.reset();

    let mut report = TickReport::default();
    for vehicle in vehicles {
        let destination = destinations
            .and_then(|overrides| overrides.get(&vehicle.id))
            .copied()
            .unwrap_or(vehicle.destination);

        let outcome = step_vehicle(vehicle, destination, pathfinder, lights, occupancy);
        report.record(outcome);
    }
    report
}

/// Resolve and apply one vehicle's move toward `destination`
pub fn step_vehicle(
    vehicle: &mut Vehicle,
    destination: Cell,
    pathfinder: &PathFinder,
    lights: &HashMap<Cell, LightState>,
    occupancy: &mut Occupancy,
) -> MoveOutcome {
    let path = pathfinder.path(vehicle.position, destination);
    let next = match path.as_slice() {
        [] => return MoveOutcome::Unreachable,
        [_] => return MoveOutcome::Arrived,
        [_, next, ..] => *next,
    };

    if let Some(state) = lights.get(&next) {
        if !state.allows_entry() {
            return MoveOutcome::HeldAtLight;
        }
    }

    if !occupancy.try_reserve(next) {
        return MoveOutcome::HeldByConflict;
    }

    vehicle.position = next;
    MoveOutcome::Moved(next)
}
