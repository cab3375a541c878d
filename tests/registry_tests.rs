//! Vehicle registry tests

use std::collections::HashSet;
use std::sync::Arc;
use std::thread;

use grid_traffic::simulation::{Cell, Vehicle, VehicleRegistry, DEFAULT_SPEED};

#[test]
fn test_spawn_yields_unique_retrievable_ids() {
    let registry = VehicleRegistry::new();
    let ids = registry.spawn(150, 20, 20);
    assert_eq!(ids.len(), 150);

    let unique: HashSet<&String> = ids.iter().collect();
    assert_eq!(unique.len(), 150);

    for id in &ids {
        let vehicle = registry.get(id).expect("spawned vehicle should be retrievable");
        assert_eq!(&vehicle.id, id);
        assert_eq!(vehicle.speed, DEFAULT_SPEED);
        assert!((0..20).contains(&vehicle.position.x));
        assert!((0..20).contains(&vehicle.position.y));
        assert!((0..20).contains(&vehicle.destination.x));
        assert!((0..20).contains(&vehicle.destination.y));
    }
    assert_eq!(registry.count(), 150);
}

#[test]
fn test_spawn_increases_count_by_n() {
    let registry = VehicleRegistry::new();
    registry.spawn(7, 5, 5);
    registry.spawn(3, 5, 5);
    assert_eq!(registry.count(), 10);
}

#[test]
fn test_spawn_zero_is_a_no_op() {
    let registry = VehicleRegistry::new();
    assert!(registry.spawn(0, 10, 10).is_empty());
    assert_eq!(registry.count(), 0);
    assert!(registry.is_empty());
}

#[test]
fn test_spawn_on_empty_grid_is_a_no_op() {
    let registry = VehicleRegistry::new();
    assert!(registry.spawn(5, 0, 10).is_empty());
    assert!(registry.spawn(5, 10, -1).is_empty());
    assert_eq!(registry.count(), 0);
}

#[test]
fn test_spawn_returns_ids_in_creation_order() {
    let registry = VehicleRegistry::new();
    let ids = registry.spawn(20, 8, 8);
    let listed: Vec<String> = registry.list().into_iter().map(|v| v.id).collect();
    assert_eq!(listed, ids);
}

#[test]
fn test_seeded_registries_are_reproducible() {
    let a = VehicleRegistry::new_with_seed(42);
    let b = VehicleRegistry::new_with_seed(42);
    let ids_a = a.spawn(10, 20, 20);
    let ids_b = b.spawn(10, 20, 20);
    assert_eq!(ids_a, ids_b);

    let cells = |r: &VehicleRegistry| -> Vec<(Cell, Cell)> {
        r.list().iter().map(|v| (v.position, v.destination)).collect()
    };
    assert_eq!(cells(&a), cells(&b));
}

#[test]
fn test_despawn_removes_named_vehicles() {
    let registry = VehicleRegistry::new();
    let ids = registry.spawn(10, 20, 20);
    assert_eq!(registry.despawn(&ids[..5]), 5);
    assert_eq!(registry.count(), 5);
    assert!(registry.get(&ids[0]).is_none());
    assert!(registry.get(&ids[9]).is_some());
}

#[test]
fn test_despawn_counts_distinct_known_ids() {
    let registry = VehicleRegistry::new();
    let ids = registry.spawn(2, 2, 2);

    let removed = registry.despawn([ids[0].as_str(), "unknown", ids[0].as_str()]);
    assert_eq!(removed, 1);
    assert_eq!(registry.count(), 1);

    assert_eq!(registry.despawn([&ids[1]]), 1);
    assert_eq!(registry.count(), 0);
    assert_eq!(registry.despawn(["still-unknown"]), 0);
    assert_eq!(registry.despawn(Vec::<String>::new()), 0);
}

#[test]
fn test_get_unknown_id_is_none() {
    let registry = VehicleRegistry::new();
    assert!(registry.get("nope").is_none());
}

#[test]
fn test_list_is_a_defensive_copy() {
    let registry = VehicleRegistry::new();
    registry.spawn(3, 2, 2);

    let mut list = registry.list();
    assert_eq!(list.len(), 3);
    let id = list[0].id.clone();
    let original = list[0].position;
    list[0].position = Cell::new(99, 99);
    list.clear();

    assert_eq!(registry.count(), 3);
    assert_eq!(registry.get(&id).map(|v| v.position), Some(original));
}

#[test]
fn test_insert_rejects_duplicate_ids() {
    let registry = VehicleRegistry::new();
    assert!(registry.insert(Vehicle::new("a", Cell::new(0, 0), Cell::new(1, 1))));
    assert!(!registry.insert(Vehicle::new("a", Cell::new(5, 5), Cell::new(1, 1))));
    assert_eq!(registry.count(), 1);
    assert_eq!(registry.get("a").map(|v| v.position), Some(Cell::new(0, 0)));
}

#[test]
fn test_with_vehicles_mut_updates_in_place() {
    let registry = VehicleRegistry::new();
    registry.insert(Vehicle::new("a", Cell::new(0, 0), Cell::new(3, 0)));
    registry.insert(Vehicle::new("b", Cell::new(1, 1), Cell::new(3, 1)));

    let order = registry.with_vehicles_mut(|vehicles| {
        vehicles
            .map(|v| {
                v.position.x += 1;
                v.id.clone()
            })
            .collect::<Vec<_>>()
    });
    assert_eq!(order, vec!["a".to_string(), "b".to_string()]);
    assert_eq!(registry.get("a").map(|v| v.position), Some(Cell::new(1, 0)));
    assert_eq!(registry.get("b").map(|v| v.position), Some(Cell::new(2, 1)));
}

#[test]
fn test_concurrent_spawn_despawn_and_reads() {
    let registry = Arc::new(VehicleRegistry::new());

    let writers: Vec<_> = (0..4)
        .map(|_| {
            let registry = Arc::clone(&registry);
            thread::spawn(move || {
                let ids = registry.spawn(50, 20, 20);
                let removed = registry.despawn(&ids[..10]);
                (ids, removed)
            })
        })
        .collect();

    let readers: Vec<_> = (0..4)
        .map(|_| {
            let registry = Arc::clone(&registry);
            thread::spawn(move || {
                for _ in 0..50 {
                    let snapshot = registry.list();
                    let unique: HashSet<&str> = snapshot.iter().map(|v| v.id.as_str()).collect();
                    assert_eq!(unique.len(), snapshot.len());
                    let _ = registry.count();
                }
            })
        })
        .collect();

    let mut all_ids = HashSet::new();
    for writer in writers {
        let (ids, removed) = writer.join().expect("writer thread panicked");
        assert_eq!(removed, 10);
        all_ids.extend(ids);
    }
    for reader in readers {
        reader.join().expect("reader thread panicked");
    }

    assert_eq!(all_ids.len(), 200);
    assert_eq!(registry.count(), 160);
}
