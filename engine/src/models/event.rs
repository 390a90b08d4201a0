//! Transition records for replay and offline analysis.
//!
//! Every occupant and car state change produces one record. The in-memory
//! log is the hand-off point to whatever store the caller persists rows in;
//! the core only appends, it never reads its own log back.
//!
//! Records can be exported as JSON lines for durable recording.

use serde::Serialize;

use crate::core::ids::{CarId, OccupantId};
use crate::models::car::CarState;
use crate::models::floor::FloorId;
use crate::models::occupant::OccupantState;

/// One state transition, stamped with simulated day and time-of-day.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "subject", rename_all = "snake_case")]
pub enum Transition {
    /// An occupant changed state. When the occupant is attached to a car the
    /// carrying car and its state at that moment are recorded alongside.
    Occupant {
        occupant: OccupantId,
        day: u32,
        time: f64,
        state: OccupantState,
        car: Option<CarId>,
        car_state: Option<CarState>,
    },

    /// A car changed state at the given floor.
    Car {
        car: CarId,
        day: u32,
        time: f64,
        state: CarState,
        floor: FloorId,
    },
}

impl Transition {
    /// Simulated day the transition happened on.
    pub fn day(&self) -> u32 {
        match self {
            Transition::Occupant { day, .. } => *day,
            Transition::Car { day, .. } => *day,
        }
    }

    /// Seconds since midnight of that day.
    pub fn time(&self) -> f64 {
        match self {
            Transition::Occupant { time, .. } => *time,
            Transition::Car { time, .. } => *time,
        }
    }

    /// The occupant this transition belongs to, if any.
    pub fn occupant(&self) -> Option<OccupantId> {
        match self {
            Transition::Occupant { occupant, .. } => Some(*occupant),
            Transition::Car { .. } => None,
        }
    }

    /// The car this transition belongs to or happened aboard, if any.
    pub fn car(&self) -> Option<CarId> {
        match self {
            Transition::Occupant { car, .. } => *car,
            Transition::Car { car, .. } => Some(*car),
        }
    }
}

/// Append-only log of all transitions in a run.
///
/// This is a simple wrapper around `Vec<Transition>` with convenience
/// queries.
#[derive(Debug, Clone, Default)]
pub struct TransitionLog {
    records: Vec<Transition>,
}

impl TransitionLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one record.
    pub fn record(&mut self, transition: Transition) {
        self.records.push(transition);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// All records, in the order they happened.
    pub fn records(&self) -> &[Transition] {
        &self.records
    }

    /// Records belonging to one occupant.
    pub fn for_occupant(&self, occupant: OccupantId) -> Vec<&Transition> {
        self.records
            .iter()
            .filter(|t| t.occupant() == Some(occupant))
            .collect()
    }

    /// Records belonging to one car, including transitions of its riders.
    pub fn for_car(&self, car: CarId) -> Vec<&Transition> {
        self.records
            .iter()
            .filter(|t| t.car() == Some(car))
            .collect()
    }

    /// Floors at which `car` opened its doors, in visit order.
    pub fn stops_for_car(&self, car: CarId) -> Vec<FloorId> {
        self.records
            .iter()
            .filter_map(|t| match t {
                Transition::Car {
                    car: c,
                    state: CarState::Stopped,
                    floor,
                    ..
                } if *c == car => Some(*floor),
                _ => None,
            })
            .collect()
    }

    /// Export as JSON lines, one record per line.
    pub fn to_json_lines(&self) -> Result<String, serde_json::Error> {
        let mut out = String::new();
        for record in &self.records {
            out.push_str(&serde_json::to_string(record)?);
            out.push('\n');
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn occupant_row(id: usize, state: OccupantState) -> Transition {
        Transition::Occupant {
            occupant: OccupantId::new(id),
            day: 0,
            time: 1.0,
            state,
            car: None,
            car_state: None,
        }
    }

    #[test]
    fn test_queries_by_subject() {
        let mut log = TransitionLog::new();
        log.record(occupant_row(0, OccupantState::Queued));
        log.record(occupant_row(1, OccupantState::Queued));
        log.record(occupant_row(0, OccupantState::Idle));

        assert_eq!(log.len(), 3);
        assert_eq!(log.for_occupant(OccupantId::new(0)).len(), 2);
        assert_eq!(log.for_occupant(OccupantId::new(1)).len(), 1);
        assert!(log.for_car(CarId::new(0)).is_empty());
    }

    #[test]
    fn test_json_lines_export() {
        let mut log = TransitionLog::new();
        log.record(occupant_row(7, OccupantState::Queued));
        let out = log.to_json_lines().unwrap();
        assert_eq!(out.lines().count(), 1);
        assert!(out.contains("\"queued\""));
    }
}
