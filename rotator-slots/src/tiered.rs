//! Tiered rotation, a generalization of grandfather-father-son.
//!
//! Tier 0 is the finest granularity (say, daily). Every `(t0 + 1)`-th
//! rotation is promoted to tier 1 instead of cycling through tier 0, every
//! `(t0 + 1)(t1 + 1)`-th rotation is promoted to tier 2, and so on. Slot ids
//! are absolute across tiers: tier `i` owns slots `m*k - 1` for
//! `k = 1..=t_i`, where `m` is the tier's multiplier.
//!
//! One tier of size `t` behaves like FIFO with `t` slots.

use crate::assigner::{RotationId, Slot, SlotAssigner};
use crate::config::ConfigError;

/// One granularity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tier {
    size: u64,
    multiplier: u64,
}

impl Tier {
    /// Number of slots in this tier.
    pub fn size(&self) -> u64 {
        self.size
    }

    /// Product of `(t_j + 1)` over all finer tiers.
    pub fn multiplier(&self) -> u64 {
        self.multiplier
    }

    /// Slots owned by this tier, ascending.
    pub fn slots(&self) -> impl Iterator<Item = Slot> + '_ {
        (1..=self.size).map(move |k| self.multiplier * k - 1)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TieredRotator {
    tiers: Vec<Tier>,
}

impl TieredRotator {
    /// Build a rotator from tier sizes, finest tier first.
    ///
    /// Every size must be at least 1, and the list must not be empty.
    pub fn new(tier_sizes: &[u32]) -> Result<Self, ConfigError> {
        if tier_sizes.is_empty() {
            return Err(ConfigError::NoSlots);
        }

        let mut tiers = Vec::with_capacity(tier_sizes.len());
        let mut multiplier: u64 = 1;
        for (index, &size) in tier_sizes.iter().enumerate() {
            if size == 0 {
                return Err(ConfigError::InvalidSlotCount(size));
            }
            let size = u64::from(size);
            tiers.push(Tier { size, multiplier });

            // The next tier's multiplier doubles as the bound on this tier's
            // largest slot (+1), so it must fit even for the coarsest tier.
            multiplier = multiplier
                .checked_mul(size + 1)
                .ok_or(ConfigError::TierOverflow { tier: index })?;
        }

        Ok(Self { tiers })
    }

    pub fn tiers(&self) -> &[Tier] {
        &self.tiers
    }
}

impl SlotAssigner for TieredRotator {
    fn id_to_slot(&self, id: RotationId) -> Slot {
        let coarsest = self.tiers.len() - 1;

        for (index, tier) in self.tiers.iter().enumerate().rev() {
            let quotient = id / tier.multiplier;
            let remainder = id % tier.multiplier;
            if remainder != tier.multiplier - 1 {
                continue;
            }

            // Finer tiers reserve one extra position per cycle for the
            // rotation that gets promoted to the next tier.
            let wrap = if index == coarsest {
                tier.size
            } else {
                tier.size + 1
            };
            return (quotient % wrap) * tier.multiplier + (tier.multiplier - 1);
        }

        // Tier 0 has multiplier 1 and matches every id.
        0
    }

    fn slot_count(&self) -> u64 {
        self.tiers.iter().map(|t| t.size).sum()
    }

    fn slots(&self) -> Vec<Slot> {
        let mut slots: Vec<Slot> = self.tiers.iter().flat_map(|t| t.slots()).collect();
        slots.sort_unstable();
        slots
    }
}
