//! Tests for floor and building topology

use elevator_simulator_core_rs::{
    Building, ConfigError, Direction, OccupantId, SimTime, WaitingEntry,
};

fn entry(id: usize, since: f64, travel: Direction) -> WaitingEntry {
    WaitingEntry {
        since: SimTime::from_seconds(since),
        occupant: OccupantId::new(id),
        travel,
    }
}

#[test]
fn test_labels_are_opaque() {
    // order comes from the configured sequence, not from the label text
    let building = Building::new(["SB", "B", "G", "1", "10", "2"]).unwrap();
    let sb = building.floor_by_name("SB").unwrap();
    let g = building.floor_by_name("G").unwrap();
    let ten = building.floor_by_name("10").unwrap();
    let two = building.floor_by_name("2").unwrap();

    assert_eq!(building.direction_to(sb, g), Direction::Up);
    assert_eq!(building.direction_to(two, ten), Direction::Down);
    assert_eq!(building.direction_to(g, g), Direction::Same);
    assert_eq!(building.distance(sb, two), 5);
    assert!(sb < g && ten < two);
}

#[test]
fn test_extremes_and_home() {
    let building = Building::new(["SB", "G", "5"]).unwrap();
    assert_eq!(building.bottom(), building.floor_by_name("SB").unwrap());
    assert_eq!(building.top(), building.floor_by_name("5").unwrap());
    assert_eq!(building.extreme_in(Direction::Up), building.top());
    assert_eq!(building.extreme_in(Direction::Down), building.bottom());
    assert_eq!(building.home_floor(), building.bottom());
}

#[test]
fn test_invalid_buildings_are_rejected() {
    let empty: [&str; 0] = [];
    assert_eq!(Building::new(empty).unwrap_err(), ConfigError::EmptyBuilding);
    assert_eq!(
        Building::new(["G", "1", "G"]).unwrap_err(),
        ConfigError::DuplicateFloor {
            label: "G".to_string()
        }
    );

    let building = Building::new(["G", "1"]).unwrap();
    assert_eq!(
        building.floor_by_name("99").unwrap_err(),
        ConfigError::UnknownFloor {
            label: "99".to_string()
        }
    );
}

#[test]
fn test_arrivals_view_stays_in_lock_step() {
    let mut building = Building::new(["G", "1", "2"]).unwrap();
    let g = building.floor_by_name("G").unwrap();
    let two = building.floor_by_name("2").unwrap();

    building.push(g, entry(0, 3.0, Direction::Up));
    building.push(two, entry(1, 1.0, Direction::Down));
    assert!(building.has_pending());

    // the global view is ordered by time across floors
    let order: Vec<usize> = building
        .all_arrivals()
        .iter()
        .map(|a| a.occupant.index())
        .collect();
    assert_eq!(order, vec![1, 0]);

    building.remove(g, OccupantId::new(0));
    assert!(building.floor(g).is_empty());
    assert_eq!(building.all_arrivals().len(), 1);
    assert_eq!(building.all_arrivals()[0].occupant, OccupantId::new(1));

    // removing an absent occupant is a silent no-op
    building.remove(g, OccupantId::new(0));
    assert_eq!(building.all_arrivals().len(), 1);

    building.remove(two, OccupantId::new(1));
    assert!(!building.has_pending());
}

#[test]
fn test_equal_arrival_times_keep_insertion_order() {
    let mut building = Building::new(["G", "1"]).unwrap();
    let g = building.floor_by_name("G").unwrap();
    building.push(g, entry(5, 2.0, Direction::Up));
    building.push(g, entry(6, 2.0, Direction::Up));
    building.push(g, entry(7, 2.0, Direction::Up));

    let order: Vec<usize> = building
        .floor(g)
        .waiting()
        .iter()
        .map(|e| e.occupant.index())
        .collect();
    assert_eq!(order, vec![5, 6, 7]);
}
