//! Single-car dispatch policies
//!
//! A dispatch policy answers two questions for one car: "what floor next"
//! and "who boards at this stop". Policies hold only their own strategy
//! state (a destination queue, a sweep direction); they never own occupants
//! or floors, and boarding itself is executed by the engine from the
//! returned [`LoadSpec`].
//!
//! Capacity is enforced through the load spec's iteration bound: a policy
//! asks for at most the car's remaining space.

use crate::core::time::SimTime;
use crate::models::car::{Car, LoadSpec};
use crate::models::floor::{ArrivalEntry, Building, Direction, FloorId};

pub mod basic;
pub mod look;
pub mod scan;

// Re-exports
pub use basic::BasicPolicy;
pub use look::LookPolicy;
pub use scan::ScanPolicy;

/// Strategy interface for a single car.
pub trait DispatchPolicy: Send + Sync {
    /// The next floor this car should service, or `None` to park. Called on
    /// every stop and whenever an idle car is woken; "no destination" is a
    /// normal outcome, not an error.
    fn next_destination(&mut self, car: &Car, building: &Building, now: SimTime)
        -> Option<FloorId>;

    /// Who boards at the current stop.
    fn load_spec(&self, car: &Car, building: &Building) -> LoadSpec;
}

/// Whether `entry` is a pickup the car travelling `direction` should count
/// as ahead of itself.
///
/// Strictly-ahead floors always qualify. The car's own floor qualifies only
/// for a direction-matched occupant with space remaining onboard, so that a
/// car that just reversed can re-open its doors for the opposite queue
/// without ever looping on a full car.
pub(crate) fn pickup_candidate(
    car: &Car,
    building: &Building,
    direction: Direction,
    entry: &ArrivalEntry,
) -> Option<FloorId> {
    match building.direction_to(car.current_floor(), entry.floor) {
        d if d == direction => Some(entry.floor),
        Direction::Same if entry.travel == direction && car.remaining_capacity() > 0 => {
            Some(entry.floor)
        }
        _ => None,
    }
}

/// Whether an onboard drop-off at `destination` lies ahead of the car in
/// `direction`.
pub(crate) fn dropoff_candidate(
    car: &Car,
    building: &Building,
    direction: Direction,
    destination: FloorId,
) -> Option<FloorId> {
    if building.direction_to(car.current_floor(), destination) == direction {
        Some(destination)
    } else {
        None
    }
}

/// The candidate floor closest to `from`; distance ties break to the lower
/// floor index for reproducibility.
pub(crate) fn nearest(
    building: &Building,
    from: FloorId,
    candidates: impl IntoIterator<Item = FloorId>,
) -> Option<FloorId> {
    candidates
        .into_iter()
        .min_by_key(|f| (building.distance(from, *f), f.index()))
}
