//! Domain models: floors and the building, occupants, cars, and the
//! transition log.

pub mod car;
pub mod event;
pub mod floor;
pub mod occupant;

use thiserror::Error;

// Re-exports
pub use car::{Car, CarState, LoadSpec, OnboardEntry};
pub use event::{Transition, TransitionLog};
pub use floor::{ArrivalEntry, Building, Direction, Floor, FloorId, WaitingEntry};
pub use occupant::{Occupant, OccupantState};

/// Configuration errors: rejected at setup or at the offending call, never
/// tolerated at runtime.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("unknown floor label: {label}")]
    UnknownFloor { label: String },

    #[error("building must have at least one floor")]
    EmptyBuilding,

    #[error("duplicate floor label: {label}")]
    DuplicateFloor { label: String },

    #[error("origin and destination are the same floor: {label}")]
    SameOriginDestination { label: String },

    #[error("car capacity must be positive")]
    NonPositiveCapacity,

    #[error("load spec cannot filter by both destination and direction")]
    AmbiguousLoadSpec,

    #[error("invalid sector: {detail}")]
    InvalidSector { detail: String },

    #[error("simulation requires at least one car")]
    EmptyFleet,
}
