//! End-to-end tests of the first-come policy
//!
//! The single-journey timing here pins down the whole car lifecycle: the
//! initial stop happens at the arrival instant, departure follows after the
//! boarding delay, and arrival time is proportional to floor distance.

use elevator_simulator_core_rs::{
    ArrivalRecord, CarConfig, CarId, DispatchConfig, OccupantState, Simulation, SimulationConfig,
    Transition,
};

fn record(arrival_time: f64, origin: &str, destination: &str) -> ArrivalRecord {
    ArrivalRecord {
        arrival_time,
        origin: origin.to_string(),
        destination: destination.to_string(),
    }
}

fn occupant_timeline(sim: &Simulation, id: elevator_simulator_core_rs::OccupantId) -> Vec<(OccupantState, f64)> {
    sim.log()
        .for_occupant(id)
        .iter()
        .filter_map(|t| match t {
            Transition::Occupant { state, time, .. } => Some((*state, *time)),
            _ => None,
        })
        .collect()
}

#[test]
fn test_single_journey_timing() {
    // boarding delay and travel time per floor both default to 1 second
    let config = SimulationConfig::new(
        ["G", "1", "2", "3"],
        vec![CarConfig::default()],
        DispatchConfig::Basic,
    );
    let mut sim = Simulation::new(config).unwrap();
    let id = sim.admit(&record(0.0, "G", "3")).unwrap();

    let summary = sim.run().unwrap();
    assert_eq!(summary.occupants_created, 1);
    assert_eq!(summary.journeys_completed, 1);
    assert_eq!(summary.undelivered, 0);

    let timeline = occupant_timeline(&sim, id);
    assert_eq!(
        timeline,
        vec![
            (OccupantState::Queued, 0.0),
            // boards during the initial stop, still at the arrival instant
            (OccupantState::PreService, 0.0),
            // departs after the boarding delay
            (OccupantState::Service, 1.0),
            // three floors at one second each
            (OccupantState::PostService, 4.0),
            (OccupantState::Idle, 4.0),
        ]
    );

    let stops: Vec<&str> = sim
        .log()
        .stops_for_car(CarId::new(0))
        .into_iter()
        .map(|f| sim.building().floor_name(f))
        .collect();
    assert_eq!(stops, vec!["G", "3"]);

    // delivered occupants are discarded
    assert!(sim.occupant(id).is_none());
}

#[test]
fn test_step_pumps_one_event_at_a_time() {
    let config = SimulationConfig::new(
        ["G", "1", "2", "3"],
        vec![CarConfig::default()],
        DispatchConfig::Basic,
    );
    let mut sim = Simulation::new(config).unwrap();
    assert_eq!(sim.cars().len(), 1);
    sim.admit(&record(0.0, "G", "2")).unwrap();

    let mut steps = 0;
    while sim.step().unwrap().is_some() {
        steps += 1;
    }
    let summary = sim.summary();
    assert_eq!(steps, summary.events_dispatched);
    assert_eq!(summary.journeys_completed, 1);
    assert_eq!(sim.pending_events(), 0);
}

#[test]
fn test_calls_are_served_in_arrival_order() {
    let config = SimulationConfig::new(
        ["G", "1", "2", "3"],
        vec![CarConfig::default()],
        DispatchConfig::Basic,
    );
    let mut sim = Simulation::new(config).unwrap();
    sim.admit_all(&[
        record(0.0, "2", "G"),
        record(0.5, "1", "3"),
    ])
    .unwrap();

    let summary = sim.run().unwrap();
    assert_eq!(summary.journeys_completed, 2);
    assert_eq!(summary.undelivered, 0);

    // first call floor is visited first
    let stops = sim.log().stops_for_car(CarId::new(0));
    let first_stop = sim.building().floor_name(stops[0]);
    assert_eq!(first_stop, "2");
}

#[test]
fn test_everyone_at_the_floor_boards() {
    let config = SimulationConfig::new(
        ["G", "1", "2", "3"],
        vec![CarConfig::default()],
        DispatchConfig::Basic,
    );
    let mut sim = Simulation::new(config).unwrap();
    // opposite journey directions from the same floor; both board at once
    let ids = sim
        .admit_all(&[record(0.0, "1", "3"), record(0.0, "1", "G")])
        .unwrap();

    let summary = sim.run().unwrap();
    assert_eq!(summary.journeys_completed, 2);

    for id in ids {
        let timeline = occupant_timeline(&sim, id);
        let board_time = timeline
            .iter()
            .find(|(state, _)| *state == OccupantState::PreService)
            .map(|(_, time)| *time)
            .unwrap();
        // both board at the car's first stop at floor 1
        assert_eq!(board_time, 1.0);
    }
}
