//! Fixed-sector dispatch, with optional wait-time aging
//!
//! Each car owns a contiguous up-sector and down-sector of floors it
//! preferentially services. Calls outside a car's relevant sector stay
//! eligible: their score is divided by one plus the distance to the nearest
//! sector boundary, discounted but never zero.
//!
//! The aging variant additionally boosts a call's score by `(wait/max)²`
//! once its wait exceeds `max_wait`, and past `super_max_wait` forces an
//! idle car to take the call as an unconditional override destination,
//! bypassing scoring, sector and direction entirely.

use serde::{Deserialize, Serialize};

use crate::controller::{figure_of_suitability, nearest_assigned, FleetPolicy};
use crate::core::time::SimTime;
use crate::models::car::{Car, CarState, LoadSpec};
use crate::models::floor::{ArrivalEntry, Building, Direction, FloorId};
use crate::models::ConfigError;

/// Sector boundaries as floor labels, `[low, high]` inclusive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectorConfig {
    pub up: (String, String),
    pub down: (String, String),
}

/// Wait-time thresholds for the aging variant, in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AgingConfig {
    /// Beyond this wait a call's score scales by `(wait/max_wait)²`.
    pub max_wait: f64,
    /// Beyond this wait an idle car is commandeered outright.
    pub super_max_wait: f64,
}

/// A resolved, inclusive range of floors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sector {
    low: FloorId,
    high: FloorId,
}

impl Sector {
    pub fn new(low: FloorId, high: FloorId) -> Result<Self, ConfigError> {
        if low > high {
            return Err(ConfigError::InvalidSector {
                detail: format!(
                    "low bound (index {}) above high bound (index {})",
                    low.index(),
                    high.index()
                ),
            });
        }
        Ok(Self { low, high })
    }

    pub fn contains(&self, floor: FloorId) -> bool {
        self.low <= floor && floor <= self.high
    }

    /// Index distance from `floor` to the nearest sector boundary.
    pub fn boundary_distance(&self, floor: FloorId) -> usize {
        let to_low = floor.index().abs_diff(self.low.index());
        let to_high = floor.index().abs_diff(self.high.index());
        to_low.min(to_high)
    }
}

/// One car's up- and down-sector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CarSectors {
    pub up: Sector,
    pub down: Sector,
}

impl CarSectors {
    /// Resolve labelled bounds against the building; unknown labels are
    /// configuration errors.
    pub fn resolve(config: &SectorConfig, building: &Building) -> Result<Self, ConfigError> {
        let up = Sector::new(
            building.floor_by_name(&config.up.0)?,
            building.floor_by_name(&config.up.1)?,
        )?;
        let down = Sector::new(
            building.floor_by_name(&config.down.0)?,
            building.floor_by_name(&config.down.1)?,
        )?;
        Ok(Self { up, down })
    }

    /// The sector relevant to a call travelling in `travel`.
    fn relevant(&self, travel: Direction) -> Sector {
        match travel {
            Direction::Down => self.down,
            _ => self.up,
        }
    }
}

#[derive(Debug)]
pub struct FixedSectorPolicy {
    sectors: Vec<CarSectors>,
    aging: Option<AgingConfig>,
    /// Per-car assigned calls, rebuilt on every evaluation.
    assigned: Vec<Vec<ArrivalEntry>>,
    /// Per-car sweep direction used for candidate filtering and boarding.
    directions: Vec<Direction>,
    /// Per-car emergency destination; sticky until the call is picked up.
    overrides: Vec<Option<FloorId>>,
}

impl FixedSectorPolicy {
    pub fn new(sectors: Vec<CarSectors>) -> Self {
        let n = sectors.len();
        Self {
            sectors,
            aging: None,
            assigned: vec![Vec::new(); n],
            directions: vec![Direction::Up; n],
            overrides: vec![None; n],
        }
    }

    pub fn with_aging(sectors: Vec<CarSectors>, aging: AgingConfig) -> Self {
        let mut policy = Self::new(sectors);
        policy.aging = Some(aging);
        policy
    }

    /// Calls currently assigned to the car at `index`.
    pub fn assigned(&self, index: usize) -> &[ArrivalEntry] {
        &self.assigned[index]
    }

    /// Emergency destination of the car at `index`, if any.
    pub fn override_destination(&self, index: usize) -> Option<FloorId> {
        self.overrides[index]
    }

    fn score(
        &self,
        index: usize,
        car: &Car,
        building: &Building,
        call: &ArrivalEntry,
        now: SimTime,
    ) -> f64 {
        let mut score = figure_of_suitability(car, building, call);
        let sector = self.sectors[index].relevant(call.travel);
        if !sector.contains(call.floor) {
            score /= (1 + sector.boundary_distance(call.floor)) as f64;
        }
        if let Some(aging) = self.aging {
            let wait = now.elapsed_since(call.since);
            if wait > aging.max_wait {
                let ratio = wait / aging.max_wait;
                score *= ratio * ratio;
            }
        }
        score
    }

    fn is_super_aged(&self, call: &ArrivalEntry, now: SimTime) -> bool {
        match self.aging {
            Some(aging) => now.elapsed_since(call.since) > aging.super_max_wait,
            None => false,
        }
    }

    /// Rebuild the sticky override slots: drop overrides whose call has been
    /// picked up, then hand each unclaimed super-aged call to the first idle
    /// car without one.
    fn refresh_overrides(&mut self, cars: &[Car], building: &Building, now: SimTime) {
        let super_aged: Vec<FloorId> = building
            .all_arrivals()
            .iter()
            .filter(|c| self.is_super_aged(c, now))
            .map(|c| c.floor)
            .collect();

        for slot in &mut self.overrides {
            if let Some(floor) = *slot {
                if !super_aged.contains(&floor) {
                    *slot = None;
                }
            }
        }

        for floor in super_aged {
            if self.overrides.contains(&Some(floor)) {
                continue;
            }
            let idle = cars
                .iter()
                .enumerate()
                .find(|(i, c)| c.state() == CarState::Idle && self.overrides[*i].is_none());
            if let Some((index, _)) = idle {
                self.overrides[index] = Some(floor);
            }
        }
    }
}

impl FleetPolicy for FixedSectorPolicy {
    fn assign(&mut self, cars: &[Car], building: &Building, now: SimTime) {
        self.refresh_overrides(cars, building, now);

        for calls in &mut self.assigned {
            calls.clear();
        }
        for call in building.all_arrivals() {
            // super-aged calls claimed by an override skip normal scoring
            if self.is_super_aged(call, now) && self.overrides.contains(&Some(call.floor)) {
                continue;
            }
            let mut best = 0usize;
            let mut best_score = f64::MIN;
            for (index, car) in cars.iter().enumerate() {
                let score = self.score(index, car, building, call, now);
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
        if let Some(floor) = self.overrides[index] {
            let toward = building.direction_to(car.current_floor(), floor);
            if toward != Direction::Same {
                self.directions[index] = toward;
            }
            return Some(floor);
        }
        nearest_assigned(car, building, &self.assigned[index], &mut self.directions[index])
    }

    fn load_spec(&self, index: usize, car: &Car, _building: &Building) -> LoadSpec {
        // an emergency stop boards without a direction filter, so the aged
        // occupant cannot be stranded by the car's approach direction
        if self.overrides[index] == Some(car.current_floor()) {
            return LoadSpec::everyone().with_limit(car.remaining_capacity());
        }
        LoadSpec::travelling(self.directions[index]).with_limit(car.remaining_capacity())
    }
}
