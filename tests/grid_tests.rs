//! Grid addressing and intersection seeding tests

use grid_traffic::simulation::{Cell, Grid, LightState, INVALID_ID};
use proptest::prelude::*;

#[test]
fn test_default_grid_seeds_four_intersections() {
    let grid = Grid::new(20, 20);
    let cells: Vec<Cell> = grid.intersections().iter().map(|i| i.cell).collect();
    assert_eq!(
        cells,
        vec![
            Cell::new(5, 5),
            Cell::new(5, 15),
            Cell::new(15, 5),
            Cell::new(15, 15)
        ]
    );
    assert!(grid
        .intersections()
        .iter()
        .all(|i| i.light_state == LightState::Red));
}

#[test]
fn test_small_grid_drops_out_of_bounds_intersections() {
    let grid = Grid::new(10, 10);
    let cells: Vec<Cell> = grid.intersections().iter().map(|i| i.cell).collect();
    assert_eq!(cells, vec![Cell::new(5, 5)]);

    assert!(Grid::new(5, 5).intersections().is_empty());
}

#[test]
fn test_intersections_returns_a_copy() {
    let mut grid = Grid::new(20, 20);
    let mut copy = grid.intersections();
    copy[0].light_state = LightState::Green;
    copy.clear();
    assert_eq!(grid.intersections().len(), 4);
    assert_eq!(grid.intersections()[0].light_state, LightState::Red);

    assert!(grid.set_light_state(Cell::new(5, 5), LightState::Green));
    assert_eq!(grid.intersections()[0].light_state, LightState::Green);
    assert!(!grid.set_light_state(Cell::new(0, 0), LightState::Green));
}

#[test]
fn test_is_valid_bounds() {
    let grid = Grid::new(4, 3);
    assert!(grid.is_valid(0, 0));
    assert!(grid.is_valid(3, 2));
    assert!(!grid.is_valid(4, 0));
    assert!(!grid.is_valid(0, 3));
    assert!(!grid.is_valid(-1, 0));
    assert!(!grid.is_valid(0, -1));
}

#[test]
fn test_id_mapping_uses_row_major_order() {
    let grid = Grid::new(4, 3);
    assert_eq!(grid.num_cells(), 12);
    assert_eq!(grid.to_id(0, 0), 0);
    assert_eq!(grid.to_id(3, 0), 3);
    assert_eq!(grid.to_id(0, 1), 4);
    assert_eq!(grid.to_id(3, 2), 11);
    assert_eq!(grid.from_id(6), Cell::new(2, 1));
}

#[test]
fn test_out_of_range_input_maps_to_sentinels() {
    let grid = Grid::new(4, 3);
    assert_eq!(grid.to_id(-1, 0), INVALID_ID);
    assert_eq!(grid.to_id(4, 0), INVALID_ID);
    assert_eq!(grid.to_id(0, 3), INVALID_ID);
    assert_eq!(grid.from_id(-1), Cell::INVALID);
    assert_eq!(grid.from_id(12), Cell::INVALID);
    assert_eq!(grid.from_id(i64::MAX), Cell::INVALID);
}

#[test]
fn test_empty_grid_has_no_valid_ids() {
    let grid = Grid::new(0, 7);
    assert_eq!(grid.num_cells(), 0);
    assert_eq!(grid.from_id(0), Cell::INVALID);
    assert_eq!(grid.to_id(0, 0), INVALID_ID);

    let negative = Grid::new(-3, 5);
    assert_eq!(negative.width(), 0);
    assert!(!negative.is_valid(0, 0));
}

#[test]
fn test_manhattan_distance_of_extreme_cells() {
    let low = Cell::new(i32::MIN, i32::MIN);
    let high = Cell::new(i32::MAX, i32::MAX);
    assert_eq!(low.manhattan(&high), 2 * u64::from(u32::MAX));
    assert_eq!(high.manhattan(&low), low.manhattan(&high));
    assert_eq!(Cell::new(-2, 3).manhattan(&Cell::new(4, -1)), 10);
}

proptest! {
    #[test]
    fn id_round_trip_for_valid_cells(
        width in 1i32..60,
        height in 1i32..60,
        x in 0i32..60,
        y in 0i32..60,
    ) {
        let grid = Grid::new(width, height);
        let (x, y) = (x % width, y % height);
        let id = grid.to_id(x, y);
        prop_assert!(id >= 0 && id < grid.num_cells());
        prop_assert_eq!(grid.from_id(id), Cell::new(x, y));
    }

    #[test]
    fn invalid_input_never_maps_to_a_valid_value(
        width in 1i32..30,
        height in 1i32..30,
        x in -50i32..80,
        y in -50i32..80,
    ) {
        let grid = Grid::new(width, height);
        if !grid.is_valid(x, y) {
            prop_assert_eq!(grid.to_id(x, y), INVALID_ID);
        }
        let id = x as i64 * 7 + y as i64;
        if id < 0 || id >= grid.num_cells() {
            prop_assert_eq!(grid.from_id(id), Cell::INVALID);
        }
    }
}
