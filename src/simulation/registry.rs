//! Vehicle spawning and bookkeeping
//!
//! The registry is the only piece of the simulation shared across threads.
//! All state sits behind one reader/writer lock: `get`, `count` and `list`
//! take the read side and may run together, `spawn`, `insert`, `despawn`
//! and `with_vehicles_mut` take the write side.

use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use indexmap::IndexMap;
use log::{debug, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use uuid::Builder;

use super::types::Cell;
use super::vehicle::Vehicle;

#[derive(Debug, Default)]
struct RegistryState {
    /// Live vehicles in creation order
    vehicles: IndexMap<String, Vehicle>,
    /// Seeded RNG for reproducible spawns; the thread RNG is used when absent
    rng: Option<StdRng>,
}

/// Concurrency-safe store of every live vehicle
#[derive(Debug, Default)]
pub struct VehicleRegistry {
    state: RwLock<RegistryState>,
}

impl VehicleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry whose spawned positions, destinations and ids are
    /// reproducible for a given seed
    pub fn new_with_seed(seed: u64) -> Self {
        Self {
            state: RwLock::new(RegistryState {
                vehicles: IndexMap::new(),
                rng: Some(StdRng::seed_from_u64(seed)),
            }),
        }
    }

    // The map only holds plain data and every write leaves it consistent,
    // so a panic in another holder does not invalidate it.
    fn read(&self) -> RwLockReadGuard<'_, RegistryState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, RegistryState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Spawn `n` vehicles with random start and destination cells
    ///
    /// # Arguments
    /// * `n` - How many vehicles to create
    /// * `width` - Exclusive upper bound for x coordinates
    /// * `height` - Exclusive upper bound for y coordinates
    ///
    /// Returns the new ids in creation order. Nothing is created when `n`
    /// is zero or the bounds describe an empty grid.
    pub fn spawn(&self, n: usize, width: i32, height: i32) -> Vec<String> {
        if n == 0 {
            return Vec::new();
        }
        if width <= 0 || height <= 0 {
            warn!(
                "Ignoring spawn of {} vehicles on an empty {}x{} grid",
                n, width, height
            );
            return Vec::new();
        }

        let mut guard = self.write();
        let state = &mut *guard;
        let mut ids = Vec::with_capacity(n);

        for _ in 0..n {
            let vehicle = match &mut state.rng {
                Some(rng) => draw_vehicle(rng, &state.vehicles, width, height),
                None => draw_vehicle(&mut rand::rng(), &state.vehicles, width, height),
            };
            ids.push(vehicle.id.clone());
            state.vehicles.insert(vehicle.id.clone(), vehicle);
        }

        debug!(
            "Spawned {} vehicles, population now {}",
            ids.len(),
            state.vehicles.len()
        );
        ids
    }

    /// Add a prepared vehicle. Returns false, leaving the registry
    /// untouched, if its id is already live.
    pub fn insert(&self, vehicle: Vehicle) -> bool {
        let mut state = self.write();
        if state.vehicles.contains_key(&vehicle.id) {
            return false;
        }
        state.vehicles.insert(vehicle.id.clone(), vehicle);
        true
    }

    /// Remove the named vehicles
    ///
    /// Unknown and repeated ids are skipped. Returns how many distinct
    /// vehicles were actually removed.
    pub fn despawn<I, S>(&self, ids: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut state = self.write();
        let removed = ids
            .into_iter()
            .filter(|id| state.vehicles.shift_remove(id.as_ref()).is_some())
            .count();

        if removed > 0 {
            debug!(
                "Despawned {} vehicles, population now {}",
                removed,
                state.vehicles.len()
            );
        }
        removed
    }

    /// A copy of the vehicle with the given id, if it exists
    pub fn get(&self, id: &str) -> Option<Vehicle> {
        self.read().vehicles.get(id).cloned()
    }

    pub fn count(&self) -> usize {
        self.read().vehicles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().vehicles.is_empty()
    }

    /// Point-in-time copy of every vehicle, in creation order
    pub fn list(&self) -> Vec<Vehicle> {
        self.read().vehicles.values().cloned().collect()
    }

    /// Run `f` with exclusive access to the stored vehicles, in creation
    /// order. Every other registry call waits until `f` returns.
    pub fn with_vehicles_mut<R>(
        &self,
        f: impl FnOnce(indexmap::map::ValuesMut<'_, String, Vehicle>) -> R,
    ) -> R {
        let mut state = self.write();
        f(state.vehicles.values_mut())
    }
}

/// Draw a vehicle with a fresh id and uniformly random cells
fn draw_vehicle<R: Rng>(
    rng: &mut R,
    live: &IndexMap<String, Vehicle>,
    width: i32,
    height: i32,
) -> Vehicle {
    let id = loop {
        let bytes = rng.random::<u128>().to_le_bytes();
        let id = Builder::from_random_bytes(bytes).into_uuid().to_string();
        if !live.contains_key(&id) {
            break id;
        }
    };
    let position = Cell::new(rng.random_range(0..width), rng.random_range(0..height));
    let destination = Cell::new(rng.random_range(0..width), rng.random_range(0..height));
    Vehicle::new(id, position, destination)
}
