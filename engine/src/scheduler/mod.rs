//! Future-event queue and simulation clock
//!
//! Everything in the simulation advances by popping the earliest scheduled
//! event and dispatching it to its subject. The queue is a min-heap ordered
//! by `(time, insertion sequence)`: equal-time events come back in the order
//! they were scheduled, which keeps reruns with identical inputs identical.
//!
//! Scheduling an event at a time earlier than the clock is allowed (it
//! models instantaneous recursive re-evaluation), but the clock itself never
//! moves backwards.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use thiserror::Error;

use crate::core::ids::{CarId, OccupantId};
use crate::core::time::SimTime;
use crate::models::car::CarState;

/// What a popped event asks its subject to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    /// The occupant's arrival time has come: it joins its origin floor queue.
    OccupantQueued { occupant: OccupantId },

    /// The car enters the given lifecycle state.
    CarTransition { car: CarId, state: CarState },
}

/// A scheduled event as handed back by [`EventScheduler::pop_earliest`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Event {
    pub time: SimTime,
    pub kind: EventKind,
}

/// Heap entry; the extra sequence number makes equal-time ordering stable.
#[derive(Debug, Clone, Copy)]
struct QueuedEvent {
    time: SimTime,
    seq: u64,
    kind: EventKind,
}

impl PartialEq for QueuedEvent {
    fn eq(&self, other: &Self) -> bool {
        self.time == other.time && self.seq == other.seq
    }
}

impl Eq for QueuedEvent {}

impl Ord for QueuedEvent {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering to make BinaryHeap a min-heap by (time, seq).
        other
            .time
            .cmp(&self.time)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for QueuedEvent {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Popping an empty queue: always a core bug, never expected in operation.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
#[error("popped an empty event queue")]
pub struct EmptyQueueError;

/// Global time-ordered event queue plus the simulation clock.
///
/// # Example
/// ```
/// use elevator_simulator_core_rs::scheduler::{EventKind, EventScheduler};
/// use elevator_simulator_core_rs::{OccupantId, SimTime};
///
/// let mut scheduler = EventScheduler::new();
/// scheduler.schedule(
///     SimTime::from_seconds(5.0),
///     EventKind::OccupantQueued { occupant: OccupantId::new(0) },
/// );
/// let event = scheduler.pop_earliest().unwrap();
/// assert_eq!(event.time, SimTime::from_seconds(5.0));
/// assert_eq!(scheduler.current_time(), SimTime::from_seconds(5.0));
/// ```
#[derive(Debug, Default)]
pub struct EventScheduler {
    events: BinaryHeap<QueuedEvent>,
    next_seq: u64,
    current_time: SimTime,
}

impl EventScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// "Now": the time of the most recently popped event. All policy
    /// decisions treat this value as the current time.
    pub fn current_time(&self) -> SimTime {
        self.current_time
    }

    /// Insert an event. Events for distinct purposes never collapse, even at
    /// the same timestamp.
    pub fn schedule(&mut self, time: SimTime, kind: EventKind) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.events.push(QueuedEvent { time, seq, kind });
    }

    /// Remove and return the earliest event, advancing the clock to its time.
    /// The clock never rewinds: an event scheduled into the past dispatches
    /// at the current clock value.
    pub fn pop_earliest(&mut self) -> Result<Event, EmptyQueueError> {
        let entry = self.events.pop().ok_or(EmptyQueueError)?;
        if entry.time > self.current_time {
            self.current_time = entry.time;
        }
        Ok(Event {
            time: entry.time,
            kind: entry.kind,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn occupant_event(id: usize) -> EventKind {
        EventKind::OccupantQueued {
            occupant: OccupantId::new(id),
        }
    }

    #[test]
    fn test_pops_in_time_order() {
        let mut scheduler = EventScheduler::new();
        scheduler.schedule(SimTime::from_seconds(10.0), occupant_event(0));
        scheduler.schedule(SimTime::from_seconds(5.0), occupant_event(1));
        scheduler.schedule(SimTime::from_seconds(20.0), occupant_event(2));

        let first = scheduler.pop_earliest().unwrap();
        assert_eq!(first.time, SimTime::from_seconds(5.0));
        assert_eq!(scheduler.current_time(), SimTime::from_seconds(5.0));

        let second = scheduler.pop_earliest().unwrap();
        assert_eq!(second.time, SimTime::from_seconds(10.0));

        let third = scheduler.pop_earliest().unwrap();
        assert_eq!(third.time, SimTime::from_seconds(20.0));

        assert!(scheduler.is_empty());
        assert_eq!(scheduler.pop_earliest(), Err(EmptyQueueError));
    }

    #[test]
    fn test_equal_times_pop_in_scheduling_order() {
        let mut scheduler = EventScheduler::new();
        for id in 0..5 {
            scheduler.schedule(SimTime::from_seconds(1.0), occupant_event(id));
        }
        for expected in 0..5 {
            let event = scheduler.pop_earliest().unwrap();
            assert_eq!(event.kind, occupant_event(expected));
        }
    }

    #[test]
    fn test_clock_never_rewinds() {
        let mut scheduler = EventScheduler::new();
        scheduler.schedule(SimTime::from_seconds(10.0), occupant_event(0));
        scheduler.pop_earliest().unwrap();
        assert_eq!(scheduler.current_time(), SimTime::from_seconds(10.0));

        // scheduling into the past is allowed, but the clock stays put
        scheduler.schedule(SimTime::from_seconds(3.0), occupant_event(1));
        let event = scheduler.pop_earliest().unwrap();
        assert_eq!(event.time, SimTime::from_seconds(3.0));
        assert_eq!(scheduler.current_time(), SimTime::from_seconds(10.0));
    }
}
