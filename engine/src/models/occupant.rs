//! Occupant (passenger) model
//!
//! An occupant is a passive record: every transition is applied by the car
//! or controller carrying it. Exactly one occupant exists per journey; once
//! its destination is reached it returns to `Idle` and is discarded, never
//! reused.

use serde::{Deserialize, Serialize};

use crate::core::ids::{CarId, OccupantId};
use crate::core::time::SimTime;
use crate::models::floor::{Direction, FloorId};

/// Lifecycle of a passenger journey.
///
/// `Idle → Queued → PreService → Service → PostService → Idle`, where the
/// final `Idle` (destination reached) is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OccupantState {
    Idle,
    Queued,
    /// Boarding at a stop.
    PreService,
    /// Riding between floors.
    Service,
    /// Alighting at the destination.
    PostService,
}

/// A single passenger journey.
#[derive(Debug, Clone)]
pub struct Occupant {
    id: OccupantId,
    state: OccupantState,
    origin: FloorId,
    destination: FloorId,
    /// When the journey entered the system.
    arrived_at: SimTime,
    /// Back-reference to the car currently carrying this occupant, if any.
    /// Never ownership; the car owns its onboard set.
    car: Option<CarId>,
}

impl Occupant {
    /// Create a journey record in its initial `Idle` state.
    pub fn new(id: OccupantId, origin: FloorId, destination: FloorId, arrived_at: SimTime) -> Self {
        debug_assert_ne!(origin, destination, "journey must change floors");
        Self {
            id,
            state: OccupantState::Idle,
            origin,
            destination,
            arrived_at,
            car: None,
        }
    }

    pub fn id(&self) -> OccupantId {
        self.id
    }

    pub fn state(&self) -> OccupantState {
        self.state
    }

    pub fn origin(&self) -> FloorId {
        self.origin
    }

    pub fn destination(&self) -> FloorId {
        self.destination
    }

    pub fn arrived_at(&self) -> SimTime {
        self.arrived_at
    }

    /// The car currently carrying this occupant, if any.
    pub fn car(&self) -> Option<CarId> {
        self.car
    }

    /// Journey direction, fixed at creation.
    pub fn travel(&self) -> Direction {
        if self.destination > self.origin {
            Direction::Up
        } else {
            Direction::Down
        }
    }

    pub(crate) fn set_state(&mut self, state: OccupantState) {
        self.state = state;
    }

    pub(crate) fn set_car(&mut self, car: Option<CarId>) {
        self.car = car;
    }
}
