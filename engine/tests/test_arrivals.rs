//! Tests for the arrival-record boundary

use elevator_simulator_core_rs::{
    read_records, write_records, ArrivalRecord, CarConfig, ConfigError, DispatchConfig,
    Simulation, SimulationConfig, SimulationError,
};

fn record(arrival_time: f64, origin: &str, destination: &str) -> ArrivalRecord {
    ArrivalRecord {
        arrival_time,
        origin: origin.to_string(),
        destination: destination.to_string(),
    }
}

fn two_floor_sim() -> Simulation {
    let config = SimulationConfig::new(
        ["G", "1", "2"],
        vec![CarConfig::default()],
        DispatchConfig::Basic,
    );
    Simulation::new(config).unwrap()
}

#[test]
fn test_save_and_reload_a_schedule() {
    let records = vec![
        record(0.0, "G", "2"),
        record(3600.5, "2", "G"),
        record(90_000.0, "1", "2"),
    ];

    let mut buffer = Vec::new();
    write_records(&mut buffer, &records).unwrap();

    let text = String::from_utf8(buffer.clone()).unwrap();
    let mut lines = text.lines();
    assert_eq!(lines.next(), Some("arrival_time,origin,destination"));
    assert_eq!(lines.next(), Some("0.0,G,2"));

    let reloaded = read_records(buffer.as_slice()).unwrap();
    assert_eq!(reloaded, records);
}

#[test]
fn test_header_fields_are_parsed_by_name() {
    // extra columns and reordered headers are tolerated
    let raw = "origin,arrival_time,destination,weight\nG,12.5,2,80\n";
    let records = read_records(raw.as_bytes()).unwrap();
    assert_eq!(records, vec![record(12.5, "G", "2")]);
}

#[test]
fn test_malformed_rows_are_errors() {
    let raw = "arrival_time,origin,destination\nnot-a-number,G,2\n";
    assert!(read_records(raw.as_bytes()).is_err());
}

#[test]
fn test_unknown_floor_is_rejected_at_admission() {
    let mut sim = two_floor_sim();
    let err = sim.admit(&record(0.0, "G", "99")).unwrap_err();
    assert!(matches!(
        err,
        SimulationError::Config(ConfigError::UnknownFloor { .. })
    ));
}

#[test]
fn test_same_origin_destination_is_rejected() {
    let mut sim = two_floor_sim();
    let err = sim.admit(&record(0.0, "1", "1")).unwrap_err();
    assert!(matches!(
        err,
        SimulationError::Config(ConfigError::SameOriginDestination { .. })
    ));
}

#[test]
fn test_reloaded_schedule_replays_identically() {
    let records = vec![
        record(0.0, "G", "2"),
        record(1.0, "2", "G"),
        record(2.0, "1", "G"),
    ];

    let mut buffer = Vec::new();
    write_records(&mut buffer, &records).unwrap();
    let reloaded = read_records(buffer.as_slice()).unwrap();

    let mut first = two_floor_sim();
    first.admit_all(&records).unwrap();
    let first_summary = first.run().unwrap();

    let mut second = two_floor_sim();
    second.admit_all(&reloaded).unwrap();
    let second_summary = second.run().unwrap();

    // identical inputs, identical run
    assert_eq!(first_summary, second_summary);
    assert_eq!(first.log().records(), second.log().records());
}

#[test]
fn test_config_round_trips_through_json() {
    let raw = r#"{
        "floors": ["SB", "G", "1"],
        "cars": [{}, {"capacity": 8, "home": "1"}],
        "dispatch": {"strategy": "look"}
    }"#;
    let config: SimulationConfig = serde_json::from_str(raw).unwrap();
    assert_eq!(config.cars.len(), 2);
    assert_eq!(config.cars[0].capacity, 20);
    assert_eq!(config.cars[1].capacity, 8);
    assert_eq!(config.boarding_delay, 1.0);
    assert_eq!(config.seconds_per_floor, 1.0);
    assert!(Simulation::new(config).is_ok());
}

#[test]
fn test_transition_log_exports_json_lines() {
    let mut sim = two_floor_sim();
    sim.admit(&record(0.0, "G", "2")).unwrap();
    sim.run().unwrap();

    let lines = sim.log().to_json_lines().unwrap();
    assert_eq!(lines.lines().count(), sim.log().len());
    assert!(lines.contains("\"queued\""));
    assert!(lines.contains("\"stopped\""));
}
