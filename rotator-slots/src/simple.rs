//! First-in-first-out rotation.

use crate::assigner::{RotationId, Slot, SlotAssigner};
use crate::config::ConfigError;

/// Keeps the most recent `num_slots` archives.
///
/// `id_to_slot(id) = id mod num_slots`, so archive `id` evicts archive
/// `id - num_slots`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimpleRotator {
    num_slots: u64,
}

impl SimpleRotator {
    /// Create a FIFO rotator. `num_slots` must be at least 1.
    pub fn new(num_slots: u32) -> Result<Self, ConfigError> {
        if num_slots == 0 {
            return Err(ConfigError::InvalidSlotCount(num_slots));
        }
        Ok(Self {
            num_slots: u64::from(num_slots),
        })
    }

    pub fn num_slots(&self) -> u64 {
        self.num_slots
    }
}

impl SlotAssigner for SimpleRotator {
    fn id_to_slot(&self, id: RotationId) -> Slot {
        id % self.num_slots
    }

    fn slot_count(&self) -> u64 {
        self.num_slots
    }

    fn slots(&self) -> Vec<Slot> {
        (0..self.num_slots).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_rejects_zero_slots() {
        assert_eq!(SimpleRotator::new(0), Err(ConfigError::InvalidSlotCount(0)));
    }

    #[test]
    fn test_simple_assignment() {
        let rotator = SimpleRotator::new(4).unwrap();
        assert_eq!(rotator.id_to_slot(0), 0);
        assert_eq!(rotator.id_to_slot(3), 3);
        assert_eq!(rotator.id_to_slot(4), 0);
        assert_eq!(rotator.id_to_slot(7), 3);
    }

    #[test]
    fn test_simple_single_slot_always_zero() {
        let rotator = SimpleRotator::new(1).unwrap();
        for id in 0..20 {
            assert_eq!(rotator.id_to_slot(id), 0);
        }
    }

    #[test]
    fn test_simple_slots_listing() {
        let rotator = SimpleRotator::new(5).unwrap();
        assert_eq!(rotator.slots(), vec![0, 1, 2, 3, 4]);
        assert_eq!(rotator.slot_count(), 5);
    }

    #[test]
    fn test_simple_handles_max_id() {
        let rotator = SimpleRotator::new(10).unwrap();
        assert_eq!(rotator.id_to_slot(u64::MAX), u64::MAX % 10);
    }
}
