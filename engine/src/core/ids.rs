//! Identity allocation
//!
//! Occupants and cars are referred to by small integer ids handed out
//! monotonically by the [`IdAllocator`] owned by the simulation context.
//! Ids are never reused within a run.

use serde::{Deserialize, Serialize};

/// Identity of a single passenger journey.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct OccupantId(usize);

impl OccupantId {
    pub fn new(index: usize) -> Self {
        OccupantId(index)
    }

    pub fn index(self) -> usize {
        self.0
    }
}

/// Identity of an elevator car.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CarId(usize);

impl CarId {
    pub fn new(index: usize) -> Self {
        CarId(index)
    }

    pub fn index(self) -> usize {
        self.0
    }
}

/// Monotonic id source owned by the simulation context.
#[derive(Debug, Clone, Default)]
pub struct IdAllocator {
    next_occupant: usize,
    next_car: usize,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_occupant(&mut self) -> OccupantId {
        let id = OccupantId(self.next_occupant);
        self.next_occupant += 1;
        id
    }

    pub fn next_car(&mut self) -> CarId {
        let id = CarId(self.next_car);
        self.next_car += 1;
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_monotonic() {
        let mut ids = IdAllocator::new();
        assert_eq!(ids.next_occupant(), OccupantId::new(0));
        assert_eq!(ids.next_occupant(), OccupantId::new(1));
        assert_eq!(ids.next_car(), CarId::new(0));
        assert_eq!(ids.next_car(), CarId::new(1));
    }
}
