//! Grid Traffic Simulation Library
//!
//! A discrete-time traffic simulation over a grid of cells with
//! traffic-light intersections, A* routing and per-tick collision avoidance.

pub mod simulation;
