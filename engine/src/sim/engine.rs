//! Simulation engine
//!
//! The `Simulation` context owns every moving part of a run: the building,
//! the fleet, the occupant table, the future-event queue, the dispatcher,
//! the id allocator and the transition log. There are no process-wide
//! globals; construct a context, admit arrivals, run to queue exhaustion,
//! read out the log, discard.
//!
//! # Execution model
//!
//! Single-threaded and cooperative. The event queue is the only driver:
//! every mutation happens synchronously inside the handling of one popped
//! event, and "waiting" exists only as data (queued occupants, scheduled
//! future events). Once scheduled an event always fires; a policy that
//! changes its mind simply recomputes at the car's next stop.
//!
//! # Car lifecycle
//!
//! - An idle car is re-evaluated when work may exist. No destination: it
//!   stays parked with nothing scheduled. A destination at its own floor:
//!   it opens its doors immediately. Otherwise it starts moving.
//! - Entering `Stopped`: arrive at the destination floor, unload every
//!   rider bound for it, board per the policy's load spec, re-evaluate, and
//!   depart (or go idle) after the boarding delay.
//! - Entering `Moving`: riders settle in, and arrival is scheduled after
//!   `seconds_per_floor × distance`.
//!
//! # Example
//!
//! ```rust
//! use elevator_simulator_core_rs::arrivals::ArrivalRecord;
//! use elevator_simulator_core_rs::sim::{
//!     CarConfig, DispatchConfig, Simulation, SimulationConfig,
//! };
//!
//! let config = SimulationConfig::new(
//!     ["G", "1", "2", "3"],
//!     vec![CarConfig::default()],
//!     DispatchConfig::Basic,
//! );
//! let mut sim = Simulation::new(config).unwrap();
//! sim.admit(&ArrivalRecord {
//!     arrival_time: 0.0,
//!     origin: "G".to_string(),
//!     destination: "3".to_string(),
//! })
//! .unwrap();
//!
//! let summary = sim.run().unwrap();
//! assert_eq!(summary.journeys_completed, 1);
//! assert_eq!(summary.undelivered, 0);
//! ```

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::arrivals::ArrivalRecord;
use crate::controller::{
    AgingConfig, CarSectors, FixedSectorPolicy, FleetPolicy, NearestCarPolicy, SectorConfig,
};
use crate::core::ids::{CarId, IdAllocator, OccupantId};
use crate::core::time::SimTime;
use crate::models::car::{Car, CarState, LoadSpec};
use crate::models::event::{Transition, TransitionLog};
use crate::models::floor::{Building, Direction, FloorId, WaitingEntry};
use crate::models::occupant::{Occupant, OccupantState};
use crate::models::ConfigError;
use crate::policy::{BasicPolicy, DispatchPolicy, LookPolicy, ScanPolicy};
use crate::scheduler::{EmptyQueueError, Event, EventKind, EventScheduler};

// ============================================================================
// Configuration Types
// ============================================================================

/// Default car capacity when a car config does not override it.
pub const DEFAULT_CAPACITY: usize = 20;

fn default_capacity() -> usize {
    DEFAULT_CAPACITY
}

fn default_boarding_delay() -> f64 {
    1.0
}

fn default_seconds_per_floor() -> f64 {
    1.0
}

/// Complete configuration for one simulation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Ordered floor labels, lowest first. Labels are opaque strings.
    pub floors: Vec<String>,

    /// Per-car configuration; the fleet must not be empty.
    pub cars: Vec<CarConfig>,

    /// Dispatch strategy shared by the whole run.
    pub dispatch: DispatchConfig,

    /// Seconds a car dwells at a stop before departing.
    #[serde(default = "default_boarding_delay")]
    pub boarding_delay: f64,

    /// Seconds to travel one floor-order index unit.
    #[serde(default = "default_seconds_per_floor")]
    pub seconds_per_floor: f64,
}

impl SimulationConfig {
    /// Configuration with default boarding delay and travel speed.
    pub fn new<I, S>(floors: I, cars: Vec<CarConfig>, dispatch: DispatchConfig) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            floors: floors.into_iter().map(Into::into).collect(),
            cars,
            dispatch,
            boarding_delay: default_boarding_delay(),
            seconds_per_floor: default_seconds_per_floor(),
        }
    }
}

/// Per-car configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CarConfig {
    /// Maximum simultaneous riders; must be positive.
    #[serde(default = "default_capacity")]
    pub capacity: usize,

    /// Home floor label. Defaults to the building's lowest
    /// (ground-equivalent) floor.
    #[serde(default)]
    pub home: Option<String>,
}

impl Default for CarConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            home: None,
        }
    }
}

/// Dispatch strategy selection.
///
/// `Basic`, `Scan` and `Look` give every car its own independent policy;
/// the remaining variants share one fleet controller across all cars.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "strategy", rename_all = "snake_case")]
pub enum DispatchConfig {
    /// First-come floor queue per car.
    Basic,

    /// Directional sweep reversing only at the building extremes.
    Scan,

    /// Directional sweep reversing as soon as nothing remains ahead.
    Look,

    /// Fleet controller scoring every call against every car.
    NearestCar,

    /// Fleet controller with per-car up/down sectors; one entry per car.
    FixedSector { sectors: Vec<SectorConfig> },

    /// Fixed sectors plus wait-time aging and emergency escalation.
    FixedSectorAging {
        sectors: Vec<SectorConfig>,
        aging: AgingConfig,
    },
}

// ============================================================================
// Errors and run summary
// ============================================================================

/// Simulation error types.
#[derive(Debug, Error)]
pub enum SimulationError {
    /// Configuration rejected at setup or at the offending call.
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    /// The event queue was popped while empty.
    #[error(transparent)]
    EmptyQueue(#[from] EmptyQueueError),
}

/// Counters read out after a run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunSummary {
    pub events_dispatched: usize,
    pub occupants_created: usize,
    pub journeys_completed: usize,
    /// Occupants still waiting or riding when the queue drained.
    pub undelivered: usize,
    pub final_time: SimTime,
}

// ============================================================================
// Simulation
// ============================================================================

/// Either one policy per car or one shared fleet controller.
enum Dispatcher {
    PerCar(Vec<Box<dyn DispatchPolicy>>),
    Fleet(Box<dyn FleetPolicy>),
}

/// A complete simulation run: state, clock, fleet and dispatcher.
pub struct Simulation {
    building: Building,
    cars: Vec<Car>,
    /// Every live journey, keyed by id; completed journeys are discarded.
    occupants: HashMap<OccupantId, Occupant>,
    scheduler: EventScheduler,
    dispatcher: Dispatcher,
    ids: IdAllocator,
    log: TransitionLog,
    boarding_delay: f64,
    seconds_per_floor: f64,
    occupants_created: usize,
    journeys_completed: usize,
    events_dispatched: usize,
}

impl Simulation {
    /// Validate the configuration and build a ready-to-run context.
    pub fn new(config: SimulationConfig) -> Result<Self, SimulationError> {
        let building = Building::new(config.floors)?;
        if config.cars.is_empty() {
            return Err(ConfigError::EmptyFleet.into());
        }

        let mut ids = IdAllocator::new();
        let mut cars = Vec::with_capacity(config.cars.len());
        for car_config in &config.cars {
            let home = match &car_config.home {
                Some(label) => building.floor_by_name(label)?,
                None => building.home_floor(),
            };
            cars.push(Car::new(ids.next_car(), car_config.capacity, home)?);
        }

        let dispatcher = match &config.dispatch {
            DispatchConfig::Basic => Dispatcher::PerCar(
                cars.iter()
                    .map(|_| Box::new(BasicPolicy::new()) as Box<dyn DispatchPolicy>)
                    .collect(),
            ),
            DispatchConfig::Scan => Dispatcher::PerCar(
                cars.iter()
                    .map(|_| Box::new(ScanPolicy::new()) as Box<dyn DispatchPolicy>)
                    .collect(),
            ),
            DispatchConfig::Look => Dispatcher::PerCar(
                cars.iter()
                    .map(|_| Box::new(LookPolicy::new()) as Box<dyn DispatchPolicy>)
                    .collect(),
            ),
            DispatchConfig::NearestCar => {
                Dispatcher::Fleet(Box::new(NearestCarPolicy::new(cars.len())))
            }
            DispatchConfig::FixedSector { sectors } => {
                let resolved = resolve_sectors(sectors, &building, cars.len())?;
                Dispatcher::Fleet(Box::new(FixedSectorPolicy::new(resolved)))
            }
            DispatchConfig::FixedSectorAging { sectors, aging } => {
                let resolved = resolve_sectors(sectors, &building, cars.len())?;
                Dispatcher::Fleet(Box::new(FixedSectorPolicy::with_aging(resolved, *aging)))
            }
        };

        Ok(Self {
            building,
            cars,
            occupants: HashMap::new(),
            scheduler: EventScheduler::new(),
            dispatcher,
            ids,
            log: TransitionLog::new(),
            boarding_delay: config.boarding_delay,
            seconds_per_floor: config.seconds_per_floor,
            occupants_created: 0,
            journeys_completed: 0,
            events_dispatched: 0,
        })
    }

    pub fn building(&self) -> &Building {
        &self.building
    }

    pub fn cars(&self) -> &[Car] {
        &self.cars
    }

    /// A live journey, or `None` once delivered.
    pub fn occupant(&self, id: OccupantId) -> Option<&Occupant> {
        self.occupants.get(&id)
    }

    pub fn log(&self) -> &TransitionLog {
        &self.log
    }

    pub fn current_time(&self) -> SimTime {
        self.scheduler.current_time()
    }

    pub fn pending_events(&self) -> usize {
        self.scheduler.len()
    }

    // ------------------------------------------------------------------
    // Arrival admission
    // ------------------------------------------------------------------

    /// Validate one arrival record, create its occupant, and schedule the
    /// `Queued` transition at its arrival time.
    pub fn admit(&mut self, record: &ArrivalRecord) -> Result<OccupantId, SimulationError> {
        let origin = self.building.floor_by_name(&record.origin)?;
        let destination = self.building.floor_by_name(&record.destination)?;
        if origin == destination {
            return Err(ConfigError::SameOriginDestination {
                label: record.origin.clone(),
            }
            .into());
        }

        let id = self.ids.next_occupant();
        let time = SimTime::from_seconds(record.arrival_time);
        self.occupants
            .insert(id, Occupant::new(id, origin, destination, time));
        self.scheduler
            .schedule(time, EventKind::OccupantQueued { occupant: id });
        self.occupants_created += 1;
        Ok(id)
    }

    /// Admit a whole schedule.
    pub fn admit_all(
        &mut self,
        records: &[ArrivalRecord],
    ) -> Result<Vec<OccupantId>, SimulationError> {
        records.iter().map(|record| self.admit(record)).collect()
    }

    // ------------------------------------------------------------------
    // Run loop
    // ------------------------------------------------------------------

    /// Drain the event queue to completion.
    pub fn run(&mut self) -> Result<RunSummary, SimulationError> {
        while !self.scheduler.is_empty() {
            let event = self.scheduler.pop_earliest()?;
            self.dispatch(event)?;
        }
        Ok(self.summary())
    }

    /// Dispatch a single event, or `None` when the queue is empty.
    pub fn step(&mut self) -> Result<Option<Event>, SimulationError> {
        if self.scheduler.is_empty() {
            return Ok(None);
        }
        let event = self.scheduler.pop_earliest()?;
        self.dispatch(event)?;
        Ok(Some(event))
    }

    /// Counters as of now.
    pub fn summary(&self) -> RunSummary {
        RunSummary {
            events_dispatched: self.events_dispatched,
            occupants_created: self.occupants_created,
            journeys_completed: self.journeys_completed,
            undelivered: self.occupants.len(),
            final_time: self.scheduler.current_time(),
        }
    }

    fn dispatch(&mut self, event: Event) -> Result<(), SimulationError> {
        self.events_dispatched += 1;
        match event.kind {
            EventKind::OccupantQueued { occupant } => self.handle_arrival(occupant),
            EventKind::CarTransition { car, state } => {
                let index = self.car_index(car);
                self.apply_car_transition(index, state)
            }
        }?;
        // parked cars get a chance whenever work may exist
        self.wake_idle_cars()
    }

    fn car_index(&self, id: CarId) -> usize {
        let index = id.index();
        debug_assert_eq!(self.cars[index].id(), id);
        index
    }

    // ------------------------------------------------------------------
    // Event handling
    // ------------------------------------------------------------------

    /// An occupant's arrival time has come: it joins its origin floor queue.
    fn handle_arrival(&mut self, id: OccupantId) -> Result<(), SimulationError> {
        let (origin, entry) = {
            let occupant = self
                .occupants
                .get_mut(&id)
                .expect("arrival event for unknown occupant");
            occupant.set_state(OccupantState::Queued);
            let entry = WaitingEntry {
                since: occupant.arrived_at(),
                occupant: id,
                travel: occupant.travel(),
            };
            (occupant.origin(), entry)
        };
        self.building.push(origin, entry);
        self.log_occupant(id);
        Ok(())
    }

    /// Re-evaluate every parked car, in car-index order.
    fn wake_idle_cars(&mut self) -> Result<(), SimulationError> {
        if !self.building.has_pending() {
            return Ok(());
        }
        for index in 0..self.cars.len() {
            if self.cars[index].state() == CarState::Idle {
                self.reevaluate_idle(index)?;
            }
        }
        Ok(())
    }

    /// The idle re-evaluation trigger: no explicit event, just a decision.
    /// No destination leaves the car parked with nothing scheduled.
    fn reevaluate_idle(&mut self, index: usize) -> Result<(), SimulationError> {
        match self.compute_next_destination(index) {
            None => Ok(()),
            Some(destination) => {
                let current = self.cars[index].current_floor();
                self.cars[index].set_next_destination(Some(destination));
                if destination == current {
                    self.apply_car_transition(index, CarState::Stopped)
                } else {
                    let direction = self.building.direction_to(current, destination);
                    self.cars[index].set_direction(direction);
                    self.apply_car_transition(index, CarState::Moving)
                }
            }
        }
    }

    fn apply_car_transition(
        &mut self,
        index: usize,
        state: CarState,
    ) -> Result<(), SimulationError> {
        match state {
            CarState::Idle => {
                self.cars[index].set_state(CarState::Idle);
                self.log_car(index);
                // arrivals during the dwell may have brought new work
                self.reevaluate_idle(index)
            }

            CarState::Moving => {
                let now = self.scheduler.current_time();
                let destination = self.cars[index]
                    .next_destination()
                    .expect("moving car must have a destination");
                self.cars[index].set_state(CarState::Moving);
                self.log_car(index);
                self.promote_riders(index);

                let distance = self
                    .building
                    .distance(self.cars[index].current_floor(), destination);
                let travel = self.seconds_per_floor * distance as f64;
                self.scheduler.schedule(
                    now.offset(travel),
                    EventKind::CarTransition {
                        car: self.cars[index].id(),
                        state: CarState::Stopped,
                    },
                );
                Ok(())
            }

            CarState::Stopped => {
                let now = self.scheduler.current_time();
                if let Some(destination) = self.cars[index].next_destination() {
                    self.cars[index].set_current_floor(destination);
                    self.cars[index].set_next_destination(None);
                }
                self.cars[index].set_state(CarState::Stopped);
                self.log_car(index);

                self.unload(index);
                let spec = self.current_load_spec(index);
                self.board(index, &spec)?;

                let departure = now.offset(self.boarding_delay);
                let car_id = self.cars[index].id();
                match self.compute_next_destination(index) {
                    Some(destination) => {
                        let current = self.cars[index].current_floor();
                        self.cars[index].set_next_destination(Some(destination));
                        if destination != current {
                            let direction = self.building.direction_to(current, destination);
                            self.cars[index].set_direction(direction);
                        }
                        self.scheduler.schedule(
                            departure,
                            EventKind::CarTransition {
                                car: car_id,
                                state: CarState::Moving,
                            },
                        );
                    }
                    None => {
                        self.scheduler.schedule(
                            departure,
                            EventKind::CarTransition {
                                car: car_id,
                                state: CarState::Idle,
                            },
                        );
                    }
                }
                Ok(())
            }
        }
    }

    // ------------------------------------------------------------------
    // Boarding and unloading
    // ------------------------------------------------------------------

    /// Everyone bound for the current floor steps off and completes their
    /// journey; the record is discarded, never reused.
    fn unload(&mut self, index: usize) {
        let here = self.cars[index].current_floor();
        let leaving: Vec<OccupantId> = self.cars[index]
            .onboard()
            .iter()
            .filter(|rider| rider.destination == here)
            .map(|rider| rider.occupant)
            .collect();

        for id in leaving {
            self.cars[index].remove_onboard(id);
            self.occupants
                .get_mut(&id)
                .expect("unloading occupant must exist")
                .set_state(OccupantState::PostService);
            self.log_occupant(id);

            {
                let occupant = self
                    .occupants
                    .get_mut(&id)
                    .expect("unloading occupant must exist");
                occupant.set_state(OccupantState::Idle);
                occupant.set_car(None);
            }
            self.log_occupant(id);

            self.occupants.remove(&id);
            self.journeys_completed += 1;
        }
    }

    /// Board waiting occupants per the policy's load spec. The spec's
    /// iteration bound carries the capacity rule; an ambiguous spec is a
    /// configuration error, fatal to this call.
    fn board(&mut self, index: usize, spec: &LoadSpec) -> Result<usize, SimulationError> {
        spec.validate()?;
        let here = self.cars[index].current_floor();
        let limit = spec
            .limit
            .unwrap_or_else(|| self.cars[index].remaining_capacity());

        let floor = self.building.floor(here);
        let selected: Vec<OccupantId> = match spec.direction {
            Some(Direction::Up) => floor.waiting_up(limit).map(|e| e.occupant).collect(),
            Some(Direction::Down) => floor.waiting_down(limit).map(|e| e.occupant).collect(),
            Some(Direction::Same) => Vec::new(),
            None => match spec.destination {
                Some(destination) => floor
                    .waiting()
                    .iter()
                    .filter(|e| self.occupants[&e.occupant].destination() == destination)
                    .take(limit)
                    .map(|e| e.occupant)
                    .collect(),
                None => floor
                    .waiting()
                    .iter()
                    .take(limit)
                    .map(|e| e.occupant)
                    .collect(),
            },
        };

        let car_id = self.cars[index].id();
        let boarded = selected.len();
        for id in selected {
            self.building.remove(here, id);
            let destination = {
                let occupant = self
                    .occupants
                    .get_mut(&id)
                    .expect("boarding occupant must exist");
                occupant.set_state(OccupantState::PreService);
                occupant.set_car(Some(car_id));
                occupant.destination()
            };
            self.cars[index].push_onboard(id, destination);
            self.log_occupant(id);
        }
        Ok(boarded)
    }

    /// Riders settle in once the car departs.
    fn promote_riders(&mut self, index: usize) {
        let riders: Vec<OccupantId> = self.cars[index]
            .onboard()
            .iter()
            .map(|rider| rider.occupant)
            .collect();
        for id in riders {
            let boarding = self.occupants[&id].state() == OccupantState::PreService;
            if boarding {
                self.occupants
                    .get_mut(&id)
                    .expect("rider must exist")
                    .set_state(OccupantState::Service);
                self.log_occupant(id);
            }
        }
    }

    // ------------------------------------------------------------------
    // Dispatcher plumbing
    // ------------------------------------------------------------------

    fn compute_next_destination(&mut self, index: usize) -> Option<FloorId> {
        let now = self.scheduler.current_time();
        match &mut self.dispatcher {
            Dispatcher::PerCar(policies) => {
                policies[index].next_destination(&self.cars[index], &self.building, now)
            }
            Dispatcher::Fleet(fleet) => {
                // the global assignment scan runs to completion before this
                // car commits a decision
                fleet.assign(&self.cars, &self.building, now);
                fleet.next_destination(index, &self.cars[index], &self.building, now)
            }
        }
    }

    fn current_load_spec(&self, index: usize) -> LoadSpec {
        match &self.dispatcher {
            Dispatcher::PerCar(policies) => {
                policies[index].load_spec(&self.cars[index], &self.building)
            }
            Dispatcher::Fleet(fleet) => fleet.load_spec(index, &self.cars[index], &self.building),
        }
    }

    // ------------------------------------------------------------------
    // Logging
    // ------------------------------------------------------------------

    fn log_occupant(&mut self, id: OccupantId) {
        let occupant = &self.occupants[&id];
        let (car, car_state) = match occupant.car() {
            Some(car_id) => (Some(car_id), Some(self.cars[car_id.index()].state())),
            None => (None, None),
        };
        let now = self.scheduler.current_time();
        self.log.record(Transition::Occupant {
            occupant: id,
            day: now.day(),
            time: now.time_of_day(),
            state: occupant.state(),
            car,
            car_state,
        });
    }

    fn log_car(&mut self, index: usize) {
        let car = &self.cars[index];
        let now = self.scheduler.current_time();
        self.log.record(Transition::Car {
            car: car.id(),
            day: now.day(),
            time: now.time_of_day(),
            state: car.state(),
            floor: car.current_floor(),
        });
    }
}

fn resolve_sectors(
    configs: &[SectorConfig],
    building: &Building,
    num_cars: usize,
) -> Result<Vec<CarSectors>, SimulationError> {
    if configs.len() != num_cars {
        return Err(ConfigError::InvalidSector {
            detail: format!(
                "{} sector assignments for {} cars",
                configs.len(),
                num_cars
            ),
        }
        .into());
    }
    configs
        .iter()
        .map(|config| CarSectors::resolve(config, building).map_err(Into::into))
        .collect()
}
