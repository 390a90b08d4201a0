//! Nearest-car-first dispatch
//!
//! Every pending call is scored against every car with the Figure of
//! Suitability and assigned to the maximum; score ties break to the lowest
//! car index.

use crate::controller::{figure_of_suitability, nearest_assigned, FleetPolicy};
use crate::core::time::SimTime;
use crate::models::car::{Car, LoadSpec};
use crate::models::floor::{ArrivalEntry, Building, Direction, FloorId};

#[derive(Debug)]
pub struct NearestCarPolicy {
    /// Per-car assigned calls, rebuilt on every evaluation.
    assigned: Vec<Vec<ArrivalEntry>>,
    /// Per-car sweep direction used for candidate filtering and boarding.
    directions: Vec<Direction>,
}

impl NearestCarPolicy {
    pub fn new(num_cars: usize) -> Self {
        Self {
            assigned: vec![Vec::new(); num_cars],
            directions: vec![Direction::Up; num_cars],
        }
    }

    /// Calls currently assigned to the car at `index`.
    pub fn assigned(&self, index: usize) -> &[ArrivalEntry] {
        &self.assigned[index]
    }
}

impl FleetPolicy for NearestCarPolicy {
    fn assign(&mut self, cars: &[Car], building: &Building, _now: SimTime) {
        for calls in &mut self.assigned {
            calls.clear();
        }
        for call in building.all_arrivals() {
            let mut best = 0usize;
            let mut best_score = f64::MIN;
            for (index, car) in cars.iter().enumerate() {
                let score = figure_of_suitability(car, building, call);
                // strict comparison keeps the lowest index on ties
                if score > best_score {
                    best_score = score;
                    best = index;
                }
            }
            self.assigned[best].push(*call);
        }
    }

    fn next_destination(
        &mut self,
        index: usize,
        car: &Car,
        building: &Building,
        _now: SimTime,
    ) -> Option<FloorId> {
        nearest_assigned(car, building, &self.assigned[index], &mut self.directions[index])
    }

    fn load_spec(&self, index: usize, car: &Car, _building: &Building) -> LoadSpec {
        LoadSpec::travelling(self.directions[index]).with_limit(car.remaining_capacity())
    }
}
