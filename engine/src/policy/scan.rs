//! Directional sweep dispatch
//!
//! The car sweeps monotonically toward the extreme floor in its current
//! direction, servicing the nearest pickup or drop-off ahead at each step.
//! When nothing is ahead but work remains elsewhere it continues to the
//! extreme and only reverses there; it parks only when no call is pending
//! anywhere and nobody is onboard.

use crate::core::time::SimTime;
use crate::models::car::{Car, LoadSpec};
use crate::models::floor::{Building, Direction, FloorId};
use crate::policy::{dropoff_candidate, nearest, pickup_candidate, DispatchPolicy};

#[derive(Debug)]
pub struct ScanPolicy {
    direction: Direction,
}

impl Default for ScanPolicy {
    fn default() -> Self {
        Self {
            direction: Direction::Up,
        }
    }
}

impl ScanPolicy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current sweep direction.
    pub fn direction(&self) -> Direction {
        self.direction
    }
}

impl DispatchPolicy for ScanPolicy {
    fn next_destination(
        &mut self,
        car: &Car,
        building: &Building,
        _now: SimTime,
    ) -> Option<FloorId> {
        // at most one reversal per evaluation, taken at the extreme
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

            let idle = !building.has_pending() && car.onboard().is_empty();
            if idle {
                return None;
            }
            let extreme = building.extreme_in(direction);
            if car.current_floor() != extreme {
                // work exists somewhere behind: finish the sweep first
                return Some(extreme);
            }
            self.direction = direction.reversed();
        }
        None
    }

    fn load_spec(&self, car: &Car, _building: &Building) -> LoadSpec {
        LoadSpec::travelling(self.direction).with_limit(car.remaining_capacity())
    }
}
