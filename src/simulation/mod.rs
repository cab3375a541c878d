//! Grid traffic simulation
//!
//! Deterministic, tick-driven simulation of vehicles moving over a bounded
//! grid with signal-controlled intersections. Nothing here performs I/O;
//! transports call into [`SimWorld`] or the individual components.

mod config;
mod grid;
mod lights;
mod movement;
mod occupancy;
mod pathfinder;
mod registry;
mod types;
mod vehicle;
mod world;

pub use config::{parse_cell, SimConfig};
pub use grid::{Grid, DEFAULT_INTERSECTIONS};
pub use lights::{LightCycle, LightTiming, GREEN_DURATION, RED_DURATION, YELLOW_DURATION};
pub use movement::{move_one_tick, step_vehicle, MoveOutcome, TickReport};
pub use occupancy::Occupancy;
pub use pathfinder::PathFinder;
pub use registry::VehicleRegistry;
pub use types::{Cell, Intersection, LightState, INVALID_ID};
pub use vehicle::{Vehicle, DEFAULT_SPEED};
pub use world::SimWorld;
