//! Multi-car dispatch controllers
//!
//! A fleet controller owns the decision function shared by every car in the
//! fleet. Each evaluation runs in two phases: `assign` scans all pending
//! arrivals against all cars and rebuilds the per-car assignment view, then
//! each car independently picks its next destination from the calls assigned
//! to it plus its own drop-offs. The assignment scan runs to completion
//! inside one event's handling, before any single car commits a decision.
//!
//! Assignments are a derived view, rebuilt from the still-waiting arrivals
//! on every evaluation: a call only leaves the global view when its occupant
//! boards, so a call abandoned by a diverted car is simply re-assigned next
//! time around.

use crate::core::time::SimTime;
use crate::models::car::{Car, CarState, LoadSpec};
use crate::models::floor::{ArrivalEntry, Building, Direction, FloorId};
use crate::policy::{dropoff_candidate, nearest, pickup_candidate};

pub mod nearest_car;
pub mod sector;

// Re-exports
pub use nearest_car::NearestCarPolicy;
pub use sector::{AgingConfig, CarSectors, FixedSectorPolicy, Sector, SectorConfig};

/// Fleet-level strategy interface.
pub trait FleetPolicy: Send + Sync {
    /// Rebuild the per-car assignment view from every pending arrival.
    /// Runs atomically before any car of the fleet commits a decision.
    fn assign(&mut self, cars: &[Car], building: &Building, now: SimTime);

    /// Next destination for the car at `index`, from its assigned calls and
    /// onboard drop-offs.
    fn next_destination(
        &mut self,
        index: usize,
        car: &Car,
        building: &Building,
        now: SimTime,
    ) -> Option<FloorId>;

    /// Who boards when the car at `index` stops.
    fn load_spec(&self, index: usize, car: &Car, building: &Building) -> LoadSpec;
}

/// Figure of Suitability of `car` for `call`.
///
/// A car moving toward the call floor scores `(numFloors + 1) - distance`,
/// plus one when the call's journey direction matches the car's; any car not
/// moving toward the call at all scores exactly 1.
pub(crate) fn figure_of_suitability(car: &Car, building: &Building, call: &ArrivalEntry) -> f64 {
    let toward = car.state() == CarState::Moving
        && building.direction_to(car.current_floor(), call.floor) == car.direction();
    if !toward {
        return 1.0;
    }
    let distance = building.distance(car.current_floor(), call.floor);
    let mut score = (building.num_floors() + 1 - distance) as f64;
    if call.travel == car.direction() {
        score += 1.0;
    }
    score
}

/// Shared per-car destination pick: the nearest assigned call or drop-off in
/// the sweep direction, reversing once before giving up. The sweep direction
/// is updated in place so the boarding pass filters consistently.
pub(crate) fn nearest_assigned(
    car: &Car,
    building: &Building,
    assigned: &[ArrivalEntry],
    direction: &mut Direction,
) -> Option<FloorId> {
    for _ in 0..2 {
        let dir = *direction;
        let pickups = assigned
            .iter()
            .filter_map(|e| pickup_candidate(car, building, dir, e));
        let dropoffs = car
            .onboard()
            .iter()
            .filter_map(|r| dropoff_candidate(car, building, dir, r.destination));
        if let Some(floor) = nearest(building, car.current_floor(), pickups.chain(dropoffs)) {
            return Some(floor);
        }
        *direction = dir.reversed();
    }
    None
}
