//! Elevator Dispatch Simulator Core - Rust Engine
//!
//! Discrete-event simulation of vertical transport in a multi-floor
//! building: passengers arrive over time, call for service, and are carried
//! to their destinations by a fleet of cars under a chosen dispatch policy.
//! Given identical inputs (arrival schedule, building, policy
//! configuration) a run is fully reproducible.
//!
//! # Architecture
//!
//! - **core**: time values and identity allocation
//! - **scheduler**: global future-event queue and the simulation clock
//! - **models**: domain types (Building, Floor, Occupant, Car, transition log)
//! - **policy**: single-car dispatch strategies (first-come, sweep variants)
//! - **controller**: fleet controllers (nearest-car scoring, fixed sectors,
//!   wait-time aging)
//! - **arrivals**: the arrival-record boundary (delimited rows in and out)
//! - **sim**: the simulation context and run loop
//!
//! # Critical Invariants
//!
//! 1. Events dispatch in non-decreasing time; equal times keep scheduling
//!    order
//! 2. A car never carries more riders than its capacity
//! 3. An occupant is never in a floor queue and a car at the same time

// Module declarations
pub mod arrivals;
pub mod controller;
pub mod core;
pub mod models;
pub mod policy;
pub mod scheduler;
pub mod sim;

// Re-exports for convenience
pub use crate::core::ids::{CarId, IdAllocator, OccupantId};
pub use crate::core::time::{SimTime, SECONDS_PER_DAY};
pub use arrivals::{
    read_records, read_records_from_path, write_records, write_records_to_path, ArrivalError,
    ArrivalRecord,
};
pub use controller::{
    AgingConfig, CarSectors, FixedSectorPolicy, FleetPolicy, NearestCarPolicy, Sector,
    SectorConfig,
};
pub use models::{
    ArrivalEntry, Building, Car, CarState, ConfigError, Direction, Floor, FloorId, LoadSpec,
    Occupant, OccupantState, OnboardEntry, Transition, TransitionLog, WaitingEntry,
};
pub use policy::{BasicPolicy, DispatchPolicy, LookPolicy, ScanPolicy};
pub use scheduler::{EmptyQueueError, Event, EventKind, EventScheduler};
pub use sim::{
    CarConfig, DispatchConfig, RunSummary, Simulation, SimulationConfig, SimulationError,
    DEFAULT_CAPACITY,
};
