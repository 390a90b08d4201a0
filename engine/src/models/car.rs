//! Elevator car model
//!
//! A car is a record of physical state (floor, direction, onboard set) plus a
//! lifecycle state. All movement decisions come from the dispatch layer; the
//! car itself never chooses a destination.
//!
//! CRITICAL: the onboard set is exclusively owned. Occupants move between a
//! floor queue and a car's onboard set, never appearing in both.

use serde::{Deserialize, Serialize};

use crate::core::ids::{CarId, OccupantId};
use crate::models::floor::{Direction, FloorId};
use crate::models::ConfigError;

/// Lifecycle of a car.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CarState {
    /// Parked with no destination; woken by the next arrival.
    Idle,
    /// Dwelling at a floor for unloading and boarding.
    Stopped,
    /// Travelling between floors.
    Moving,
}

/// One rider in a car's onboard set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OnboardEntry {
    pub occupant: OccupantId,
    pub destination: FloorId,
}

/// Which waiting occupants a boarding pass should take.
///
/// A spec may bound boarding by journey direction or by destination floor,
/// but never both at once; asking for both is a configuration error, and the
/// load call rejects it rather than silently picking one filter.
///
/// The iteration bound (`limit`) is how dispatch policies enforce capacity:
/// a policy asks for at most the car's remaining space.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadSpec {
    pub direction: Option<Direction>,
    pub destination: Option<FloorId>,
    pub limit: Option<usize>,
}

impl LoadSpec {
    /// Board anyone waiting, FIFO.
    pub fn everyone() -> Self {
        Self::default()
    }

    /// Board only occupants whose journey direction matches.
    pub fn travelling(direction: Direction) -> Self {
        Self {
            direction: Some(direction),
            ..Self::default()
        }
    }

    /// Board only occupants bound for the given floor.
    pub fn bound_for(destination: FloorId) -> Self {
        Self {
            destination: Some(destination),
            ..Self::default()
        }
    }

    /// Cap the number of occupants taken.
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Reject ambiguous filter combinations.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.direction.is_some() && self.destination.is_some() {
            return Err(ConfigError::AmbiguousLoadSpec);
        }
        Ok(())
    }
}

/// A single elevator car.
#[derive(Debug, Clone)]
pub struct Car {
    id: CarId,
    state: CarState,
    capacity: usize,
    current_floor: FloorId,
    next_destination: Option<FloorId>,
    direction: Direction,
    onboard: Vec<OnboardEntry>,
}

impl Car {
    /// Create an idle car parked at `home`.
    pub fn new(id: CarId, capacity: usize, home: FloorId) -> Result<Self, ConfigError> {
        if capacity == 0 {
            return Err(ConfigError::NonPositiveCapacity);
        }
        Ok(Self {
            id,
            state: CarState::Idle,
            capacity,
            current_floor: home,
            next_destination: None,
            direction: Direction::Up,
            onboard: Vec::new(),
        })
    }

    pub fn id(&self) -> CarId {
        self.id
    }

    pub fn state(&self) -> CarState {
        self.state
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn current_floor(&self) -> FloorId {
        self.current_floor
    }

    pub fn next_destination(&self) -> Option<FloorId> {
        self.next_destination
    }

    /// Travel direction of the current or most recent movement.
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Riders currently onboard, in boarding order.
    pub fn onboard(&self) -> &[OnboardEntry] {
        &self.onboard
    }

    pub fn remaining_capacity(&self) -> usize {
        self.capacity - self.onboard.len()
    }

    pub(crate) fn set_state(&mut self, state: CarState) {
        self.state = state;
    }

    pub(crate) fn set_current_floor(&mut self, floor: FloorId) {
        self.current_floor = floor;
    }

    pub(crate) fn set_next_destination(&mut self, destination: Option<FloorId>) {
        self.next_destination = destination;
    }

    pub(crate) fn set_direction(&mut self, direction: Direction) {
        self.direction = direction;
    }

    /// Add a rider.
    ///
    /// # Panics
    ///
    /// Panics when the car is already full: the dispatch policy's iteration
    /// bound is responsible for never offering more riders than fit, so an
    /// overfull car is a core bug.
    pub(crate) fn push_onboard(&mut self, occupant: OccupantId, destination: FloorId) {
        assert!(
            self.onboard.len() < self.capacity,
            "car {:?} over capacity ({} onboard)",
            self.id,
            self.capacity
        );
        self.onboard.push(OnboardEntry {
            occupant,
            destination,
        });
    }

    /// Remove a rider. Silent no-op when absent.
    pub(crate) fn remove_onboard(&mut self, occupant: OccupantId) -> bool {
        match self.onboard.iter().position(|e| e.occupant == occupant) {
            Some(pos) => {
                self.onboard.remove(pos);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::floor::Building;

    #[test]
    fn test_ambiguous_load_spec_rejected() {
        let building = Building::new(["G", "1"]).unwrap();
        let one = building.floor_by_name("1").unwrap();
        let spec = LoadSpec {
            direction: Some(Direction::Up),
            destination: Some(one),
            limit: None,
        };
        assert_eq!(spec.validate(), Err(ConfigError::AmbiguousLoadSpec));
        assert!(LoadSpec::travelling(Direction::Up).validate().is_ok());
        assert!(LoadSpec::bound_for(one).validate().is_ok());
    }

    #[test]
    fn test_zero_capacity_rejected() {
        let building = Building::new(["G", "1"]).unwrap();
        let g = building.floor_by_name("G").unwrap();
        assert_eq!(
            Car::new(CarId::new(0), 0, g).unwrap_err(),
            ConfigError::NonPositiveCapacity
        );
    }

    #[test]
    #[should_panic(expected = "over capacity")]
    fn test_overfull_car_is_fatal() {
        let building = Building::new(["G", "1"]).unwrap();
        let g = building.floor_by_name("G").unwrap();
        let one = building.floor_by_name("1").unwrap();
        let mut car = Car::new(CarId::new(0), 1, g).unwrap();
        car.push_onboard(OccupantId::new(0), one);
        car.push_onboard(OccupantId::new(1), one);
    }
}
