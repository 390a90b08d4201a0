//! Floor and building topology
//!
//! A building is an ordered sequence of floor labels. Labels are opaque
//! strings ("SB", "B", "G", "1", ...); all comparison, direction and distance
//! logic is defined by position in the configured order, never by parsing the
//! label.
//!
//! Each floor owns a waiting queue sorted by arrival time. Because dispatch
//! policies pull waiting occupants in different ways, the queue is a plain
//! sorted list rather than a strict queue type. The building additionally
//! maintains a global, time-ordered view of every pending arrival, kept in
//! lock-step with the per-floor queues; multi-car controllers score against
//! that view.
//!
//! # Critical Invariants
//!
//! 1. An occupant appears in at most one floor queue at a time.
//! 2. An occupant present in a floor queue is present in the arrivals view,
//!    and vice versa, until it boards a car.

use std::collections::HashMap;

use crate::core::ids::OccupantId;
use crate::core::time::SimTime;
use crate::models::ConfigError;

use serde::{Deserialize, Serialize};

/// Relative position of one floor with respect to another, or the journey
/// direction of a waiting occupant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Same,
}

impl Direction {
    /// The opposite sweep direction. `Same` has no opposite.
    pub fn reversed(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Same => Direction::Same,
        }
    }
}

/// Index of a floor in the building's configured order.
///
/// Ordering on `FloorId` is the building's vertical order: a larger id is a
/// higher floor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct FloorId(usize);

impl FloorId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// One waiting occupant in a floor queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaitingEntry {
    /// When the occupant joined the queue.
    pub since: SimTime,
    pub occupant: OccupantId,
    /// Journey direction (origin vs. destination), fixed for the journey.
    pub travel: Direction,
}

/// A pending arrival in the building-wide view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArrivalEntry {
    pub since: SimTime,
    pub occupant: OccupantId,
    pub floor: FloorId,
    pub travel: Direction,
}

/// A single floor with its waiting queue.
#[derive(Debug, Clone)]
pub struct Floor {
    id: FloorId,
    name: String,
    queue: Vec<WaitingEntry>,
}

impl Floor {
    fn new(id: FloorId, name: String) -> Self {
        Self {
            id,
            name,
            queue: Vec::new(),
        }
    }

    pub fn id(&self) -> FloorId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// All waiting occupants, oldest first.
    pub fn waiting(&self) -> &[WaitingEntry] {
        &self.queue
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Up to `limit` waiting occupants travelling up, in queue order.
    pub fn waiting_up(&self, limit: usize) -> impl Iterator<Item = &WaitingEntry> {
        self.queue
            .iter()
            .filter(|e| e.travel == Direction::Up)
            .take(limit)
    }

    /// Up to `limit` waiting occupants travelling down, in queue order.
    pub fn waiting_down(&self, limit: usize) -> impl Iterator<Item = &WaitingEntry> {
        self.queue
            .iter()
            .filter(|e| e.travel == Direction::Down)
            .take(limit)
    }

    fn push(&mut self, entry: WaitingEntry) {
        // insert keeping time order; equal times keep insertion order
        let pos = self.queue.partition_point(|e| e.since <= entry.since);
        self.queue.insert(pos, entry);
    }

    fn remove(&mut self, occupant: OccupantId) -> bool {
        match self.queue.iter().position(|e| e.occupant == occupant) {
            Some(pos) => {
                self.queue.remove(pos);
                true
            }
            None => false,
        }
    }
}

/// The building: floor order, per-floor queues and the global arrivals view.
///
/// # Example
/// ```
/// use elevator_simulator_core_rs::models::floor::{Building, Direction};
///
/// let building = Building::new(["SB", "B", "G", "1", "2"]).unwrap();
/// let sb = building.floor_by_name("SB").unwrap();
/// let two = building.floor_by_name("2").unwrap();
/// assert_eq!(building.direction_to(sb, two), Direction::Up);
/// assert_eq!(building.distance(sb, two), 4);
/// ```
#[derive(Debug, Clone)]
pub struct Building {
    floors: Vec<Floor>,
    by_name: HashMap<String, FloorId>,
    arrivals: Vec<ArrivalEntry>,
}

impl Building {
    /// Build from an ordered sequence of floor labels, lowest first.
    pub fn new<I, S>(labels: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut floors = Vec::new();
        let mut by_name = HashMap::new();
        for (index, label) in labels.into_iter().enumerate() {
            let name: String = label.into();
            let id = FloorId(index);
            if by_name.insert(name.clone(), id).is_some() {
                return Err(ConfigError::DuplicateFloor { label: name });
            }
            floors.push(Floor::new(id, name));
        }
        if floors.is_empty() {
            return Err(ConfigError::EmptyBuilding);
        }
        Ok(Self {
            floors,
            by_name,
            arrivals: Vec::new(),
        })
    }

    pub fn num_floors(&self) -> usize {
        self.floors.len()
    }

    pub fn floor(&self, id: FloorId) -> &Floor {
        &self.floors[id.index()]
    }

    pub fn floor_name(&self, id: FloorId) -> &str {
        self.floors[id.index()].name()
    }

    /// Resolve a floor label; unknown labels are a configuration error.
    pub fn floor_by_name(&self, name: &str) -> Result<FloorId, ConfigError> {
        self.by_name
            .get(name)
            .copied()
            .ok_or_else(|| ConfigError::UnknownFloor {
                label: name.to_string(),
            })
    }

    /// Direction of travel from `from` to `to` in the configured floor order.
    pub fn direction_to(&self, from: FloorId, to: FloorId) -> Direction {
        match from.index().cmp(&to.index()) {
            std::cmp::Ordering::Less => Direction::Up,
            std::cmp::Ordering::Greater => Direction::Down,
            std::cmp::Ordering::Equal => Direction::Same,
        }
    }

    /// Distance between two floors in floor-order index units.
    pub fn distance(&self, a: FloorId, b: FloorId) -> usize {
        a.index().abs_diff(b.index())
    }

    /// Lowest floor of the building.
    pub fn bottom(&self) -> FloorId {
        FloorId(0)
    }

    /// Highest floor of the building.
    pub fn top(&self) -> FloorId {
        FloorId(self.floors.len() - 1)
    }

    /// The extreme floor a sweep in `direction` ends at.
    pub fn extreme_in(&self, direction: Direction) -> FloorId {
        match direction {
            Direction::Down => self.bottom(),
            _ => self.top(),
        }
    }

    /// Home floor for newly spawned cars: the lowest (ground-equivalent)
    /// floor by convention.
    pub fn home_floor(&self) -> FloorId {
        self.bottom()
    }

    /// Add a waiting occupant to `floor`, keeping the arrivals view in
    /// lock-step.
    ///
    /// # Panics
    ///
    /// Panics if the occupant is already queued anywhere in the building;
    /// that is a core bug, not a recoverable condition.
    pub fn push(&mut self, floor: FloorId, entry: WaitingEntry) {
        assert!(
            !self.arrivals.iter().any(|a| a.occupant == entry.occupant),
            "occupant {:?} is already queued in the building",
            entry.occupant
        );
        self.floors[floor.index()].push(entry);
        let arrival = ArrivalEntry {
            since: entry.since,
            occupant: entry.occupant,
            floor,
            travel: entry.travel,
        };
        let pos = self.arrivals.partition_point(|a| a.since <= arrival.since);
        self.arrivals.insert(pos, arrival);
    }

    /// Remove a waiting occupant from `floor`. Silent no-op when absent.
    pub fn remove(&mut self, floor: FloorId, occupant: OccupantId) {
        let removed = self.floors[floor.index()].remove(occupant);
        let pos = self
            .arrivals
            .iter()
            .position(|a| a.occupant == occupant && a.floor == floor);
        if let Some(pos) = pos {
            self.arrivals.remove(pos);
        }
        debug_assert_eq!(removed, pos.is_some(), "floor queue and arrivals view diverged");
    }

    /// Snapshot of every pending arrival across the building, oldest first.
    pub fn all_arrivals(&self) -> &[ArrivalEntry] {
        &self.arrivals
    }

    /// Whether any occupant is waiting anywhere in the building.
    pub fn has_pending(&self) -> bool {
        !self.arrivals.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: usize, since: f64, travel: Direction) -> WaitingEntry {
        WaitingEntry {
            since: SimTime::from_seconds(since),
            occupant: OccupantId::new(id),
            travel,
        }
    }

    #[test]
    fn test_queue_stays_time_sorted() {
        let mut building = Building::new(["G", "1", "2"]).unwrap();
        let g = building.floor_by_name("G").unwrap();
        building.push(g, entry(0, 5.0, Direction::Up));
        building.push(g, entry(1, 1.0, Direction::Up));
        building.push(g, entry(2, 3.0, Direction::Down));

        let order: Vec<usize> = building
            .floor(g)
            .waiting()
            .iter()
            .map(|e| e.occupant.index())
            .collect();
        assert_eq!(order, vec![1, 2, 0]);
    }

    #[test]
    fn test_remove_absent_is_noop() {
        let mut building = Building::new(["G", "1"]).unwrap();
        let g = building.floor_by_name("G").unwrap();
        building.remove(g, OccupantId::new(9));
        assert!(building.floor(g).is_empty());
        assert!(!building.has_pending());
    }

    #[test]
    #[should_panic(expected = "already queued")]
    fn test_double_queue_is_fatal() {
        let mut building = Building::new(["G", "1"]).unwrap();
        let g = building.floor_by_name("G").unwrap();
        let one = building.floor_by_name("1").unwrap();
        building.push(g, entry(0, 0.0, Direction::Up));
        building.push(one, entry(0, 1.0, Direction::Down));
    }

    #[test]
    fn test_direction_iterators_respect_limit() {
        let mut building = Building::new(["G", "1", "2"]).unwrap();
        let g = building.floor_by_name("G").unwrap();
        building.push(g, entry(0, 0.0, Direction::Up));
        building.push(g, entry(1, 1.0, Direction::Down));
        building.push(g, entry(2, 2.0, Direction::Up));
        building.push(g, entry(3, 3.0, Direction::Up));

        let up: Vec<usize> = building
            .floor(g)
            .waiting_up(2)
            .map(|e| e.occupant.index())
            .collect();
        assert_eq!(up, vec![0, 2]);

        let down: Vec<usize> = building
            .floor(g)
            .waiting_down(5)
            .map(|e| e.occupant.index())
            .collect();
        assert_eq!(down, vec![1]);
    }
}
