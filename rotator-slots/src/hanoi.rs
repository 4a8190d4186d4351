//! Tower of Hanoi rotation.
//!
//! Slots are the powers of two `1, 2, 4, …, 2^(n-1)`. The archive in slot
//! `2^k` is replaced once every `2^(k+1)` rotations, so each older archive is
//! kept twice as long as the one before it. Id 0, and every `2^(n-1)`-th id
//! after it, takes the largest slot.

use crate::assigner::{RotationId, Slot, SlotAssigner};
use crate::config::ConfigError;

/// Largest slot count whose top slot, `2^(n-1)`, still fits in a `u64`.
pub const MAX_HANOI_SLOTS: u32 = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HanoiRotator {
    num_slots: u32,
    max_slot: u64,
}

impl HanoiRotator {
    /// Create a Hanoi rotator with `num_slots` slots (1..=64).
    pub fn new(num_slots: u32) -> Result<Self, ConfigError> {
        if num_slots == 0 {
            return Err(ConfigError::InvalidSlotCount(num_slots));
        }
        if num_slots > MAX_HANOI_SLOTS {
            return Err(ConfigError::TooManyHanoiSlots(num_slots));
        }
        Ok(Self {
            num_slots,
            max_slot: 1u64 << (num_slots - 1),
        })
    }

    pub fn num_slots(&self) -> u32 {
        self.num_slots
    }

    /// The largest slot, `2^(num_slots - 1)`.
    pub fn max_slot(&self) -> Slot {
        self.max_slot
    }
}

impl SlotAssigner for HanoiRotator {
    fn id_to_slot(&self, id: RotationId) -> Slot {
        let adjusted = id % self.max_slot;
        if adjusted == 0 {
            return self.max_slot;
        }
        // Largest power of two dividing `adjusted`. Since adjusted < max_slot
        // this is always one of the configured slots.
        1u64 << adjusted.trailing_zeros()
    }

    fn slot_count(&self) -> u64 {
        u64::from(self.num_slots)
    }

    fn slots(&self) -> Vec<Slot> {
        (0..self.num_slots).map(|k| 1u64 << k).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hanoi(n: u32) -> HanoiRotator {
        HanoiRotator::new(n).unwrap()
    }

    #[test]
    fn test_hanoi_rejects_zero_slots() {
        assert_eq!(HanoiRotator::new(0), Err(ConfigError::InvalidSlotCount(0)));
    }

    #[test]
    fn test_hanoi_rejects_slots_beyond_u64() {
        assert_eq!(HanoiRotator::new(65), Err(ConfigError::TooManyHanoiSlots(65)));
        assert!(HanoiRotator::new(64).is_ok());
    }

    #[test]
    fn test_hanoi_first_backup_takes_largest_slot() {
        assert_eq!(hanoi(3).id_to_slot(0), 4);
        assert_eq!(hanoi(4).id_to_slot(0), 8);
        assert_eq!(hanoi(5).id_to_slot(0), 16);
    }

    #[test]
    fn test_hanoi_four_slots() {
        let rotator = hanoi(4);
        assert_eq!(rotator.id_to_slot(1), 1);
        assert_eq!(rotator.id_to_slot(3), 1);
        assert_eq!(rotator.id_to_slot(9), 1);
        assert_eq!(rotator.id_to_slot(2), 2);
        assert_eq!(rotator.id_to_slot(18), 2);
        assert_eq!(rotator.id_to_slot(4), 4);
        assert_eq!(rotator.id_to_slot(8), 8);
        assert_eq!(rotator.id_to_slot(24), 8);
    }

    #[test]
    fn test_hanoi_wraps_at_max_slot() {
        assert_eq!(hanoi(5).id_to_slot(16), 16);
        assert_eq!(hanoi(5).id_to_slot(30), 2);
        assert_eq!(hanoi(5).id_to_slot(32), 16);
        assert_eq!(hanoi(6).id_to_slot(32), 32);
    }

    #[test]
    fn test_hanoi_single_slot() {
        let rotator = hanoi(1);
        for id in 0..10 {
            assert_eq!(rotator.id_to_slot(id), 1);
        }
    }

    #[test]
    fn test_hanoi_sixty_four_slots() {
        let rotator = hanoi(64);
        assert_eq!(rotator.max_slot(), 1u64 << 63);
        assert_eq!(rotator.id_to_slot(0), 1u64 << 63);
        assert_eq!(rotator.id_to_slot(1u64 << 62), 1u64 << 62);
        assert_eq!(rotator.id_to_slot(u64::MAX), 1);
    }

    #[test]
    fn test_hanoi_slots_listing() {
        assert_eq!(hanoi(4).slots(), vec![1, 2, 4, 8]);
        assert_eq!(hanoi(4).slot_count(), 4);
    }
}
