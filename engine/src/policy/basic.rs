//! First-come dispatch
//!
//! The simplest strategy: keep a FIFO queue of floors that have work, visit
//! them in order, and board everyone at each stop. The car parks only when
//! no floor anywhere has a pending call and nobody is onboard.

use std::collections::VecDeque;

use crate::core::time::SimTime;
use crate::models::car::{Car, LoadSpec};
use crate::models::floor::{Building, FloorId};
use crate::policy::DispatchPolicy;

#[derive(Debug, Default)]
pub struct BasicPolicy {
    /// Floors with pending work, first-seen first.
    destinations: VecDeque<FloorId>,
}

impl BasicPolicy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append floors that have gained work since the last evaluation.
    fn refresh(&mut self, car: &Car, building: &Building) {
        for arrival in building.all_arrivals() {
            if !self.destinations.contains(&arrival.floor) {
                self.destinations.push_back(arrival.floor);
            }
        }
        for rider in car.onboard() {
            if !self.destinations.contains(&rider.destination) {
                self.destinations.push_back(rider.destination);
            }
        }
    }
}

impl DispatchPolicy for BasicPolicy {
    fn next_destination(
        &mut self,
        car: &Car,
        building: &Building,
        _now: SimTime,
    ) -> Option<FloorId> {
        self.refresh(car, building);

        // One pass over the queue: drop floors whose work has been serviced,
        // keep call-only floors the full car cannot take yet.
        let mut remaining = self.destinations.len();
        while remaining > 0 {
            remaining -= 1;
            let floor = self.destinations.pop_front().expect("bounded by len");
            let has_call = !building.floor(floor).is_empty();
            let has_dropoff = car.onboard().iter().any(|r| r.destination == floor);
            if has_dropoff || (has_call && car.remaining_capacity() > 0) {
                return Some(floor);
            }
            if has_call {
                // revisit once space frees up
                self.destinations.push_back(floor);
            }
        }
        None
    }

    fn load_spec(&self, car: &Car, _building: &Building) -> LoadSpec {
        LoadSpec::everyone().with_limit(car.remaining_capacity())
    }
}
