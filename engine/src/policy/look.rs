//! Early-reversal sweep dispatch
//!
//! Like the directional sweep, but the car turns around as soon as no pending
//! pickup or onboard drop-off remains ahead in its current direction. It
//! retries exactly once in the opposite direction before reporting that there
//! is nothing to do, so an empty building can never flip it back and forth.

use crate::core::time::SimTime;
use crate::models::car::{Car, LoadSpec};
use crate::models::floor::{Building, Direction, FloorId};
use crate::policy::{dropoff_candidate, nearest, pickup_candidate, DispatchPolicy};

#[derive(Debug)]
pub struct LookPolicy {
    direction: Direction,
}

impl Default for LookPolicy {
    fn default() -> Self {
        Self {
            direction: Direction::Up,
        }
    }
}

impl LookPolicy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current sweep direction.
    pub fn direction(&self) -> Direction {
        self.direction
    }
}

impl DispatchPolicy for LookPolicy {
    fn next_destination(
        &mut self,
        car: &Car,
        building: &Building,
        _now: SimTime,
    ) -> Option<FloorId> {
        // bounded retry: original direction, then its reverse, then give up
        for _ in 0..2 {
            let direction = self.direction;
            let pickups = building
                .all_arrivals()
                .iter()
                .filter_map(|e| pickup_candidate(car, building, direction, e));
            let dropoffs = car
                .onboard()
                .iter()
                .filter_map(|r| dropoff_candidate(car, building, direction, r.destination));
            if let Some(floor) = nearest(building, car.current_floor(), pickups.chain(dropoffs)) {
                return Some(floor);
            }
            self.direction = direction.reversed();
        }
        None
    }

    fn load_spec(&self, car: &Car, _building: &Building) -> LoadSpec {
        LoadSpec::travelling(self.direction).with_limit(car.remaining_capacity())
    }
}
