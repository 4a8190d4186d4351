//! Algorithm selection and validation.

use std::fmt;

use thiserror::Error;

use crate::assigner::{RotationId, Slot, SlotAssigner};
use crate::hanoi::HanoiRotator;
use crate::simple::SimpleRotator;
use crate::tiered::TieredRotator;

/// Errors from building a slot assigner. All are detected before any I/O.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("requires at least one rotation slot")]
    NoSlots,

    #[error("slot counts must be at least 1, got {0}")]
    InvalidSlotCount(u32),

    #[error("the {algorithm} rotator takes a single slot count, got {count}")]
    MultipleSlotCounts { algorithm: AlgorithmKind, count: usize },

    #[error("the hanoi rotator supports at most 64 slots, got {0}")]
    TooManyHanoiSlots(u32),

    #[error("tier sizes overflow 64-bit slot ids at tier {tier}")]
    TierOverflow { tier: usize },
}

/// Which rotation scheme to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AlgorithmKind {
    /// First-in-first-out.
    #[default]
    Simple,
    /// Tower of Hanoi.
    Hanoi,
    /// Grandfather-father-son with arbitrary tiers.
    Tiered,
}

impl AlgorithmKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AlgorithmKind::Simple => "simple",
            AlgorithmKind::Hanoi => "hanoi",
            AlgorithmKind::Tiered => "tiered",
        }
    }
}

impl fmt::Display for AlgorithmKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// User-supplied algorithm parameters, before validation.
///
/// `slot_counts` holds one value for the simple and hanoi rotators, and one
/// value per tier (finest first) for the tiered rotator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlgorithmConfig {
    pub kind: AlgorithmKind,
    pub slot_counts: Vec<u32>,
}

impl AlgorithmConfig {
    pub fn new(kind: AlgorithmKind, slot_counts: Vec<u32>) -> Self {
        Self { kind, slot_counts }
    }

    /// Check slot counts against the selected algorithm.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.slot_counts.is_empty() {
            return Err(ConfigError::NoSlots);
        }
        if let Some(&bad) = self.slot_counts.iter().find(|&&n| n == 0) {
            return Err(ConfigError::InvalidSlotCount(bad));
        }
        if self.slot_counts.len() > 1 && self.kind != AlgorithmKind::Tiered {
            return Err(ConfigError::MultipleSlotCounts {
                algorithm: self.kind,
                count: self.slot_counts.len(),
            });
        }
        Ok(())
    }

    /// Validate and construct the algorithm.
    pub fn build(&self) -> Result<Algorithm, ConfigError> {
        self.validate()?;
        let first = self.slot_counts[0];
        let algorithm = match self.kind {
            AlgorithmKind::Simple => Algorithm::Simple(SimpleRotator::new(first)?),
            AlgorithmKind::Hanoi => Algorithm::Hanoi(HanoiRotator::new(first)?),
            AlgorithmKind::Tiered => Algorithm::Tiered(TieredRotator::new(&self.slot_counts)?),
        };
        Ok(algorithm)
    }
}

/// A validated slot assigner chosen at runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Algorithm {
    Simple(SimpleRotator),
    Hanoi(HanoiRotator),
    Tiered(TieredRotator),
}

impl Algorithm {
    pub fn kind(&self) -> AlgorithmKind {
        match self {
            Algorithm::Simple(_) => AlgorithmKind::Simple,
            Algorithm::Hanoi(_) => AlgorithmKind::Hanoi,
            Algorithm::Tiered(_) => AlgorithmKind::Tiered,
        }
    }
}

impl SlotAssigner for Algorithm {
    fn id_to_slot(&self, id: RotationId) -> Slot {
        match self {
            Algorithm::Simple(r) => r.id_to_slot(id),
            Algorithm::Hanoi(r) => r.id_to_slot(id),
            Algorithm::Tiered(r) => r.id_to_slot(id),
        }
    }

    fn slot_count(&self) -> u64 {
        match self {
            Algorithm::Simple(r) => r.slot_count(),
            Algorithm::Hanoi(r) => r.slot_count(),
            Algorithm::Tiered(r) => r.slot_count(),
        }
    }

    fn slots(&self) -> Vec<Slot> {
        match self {
            Algorithm::Simple(r) => r.slots(),
            Algorithm::Hanoi(r) => r.slots(),
            Algorithm::Tiered(r) => r.slots(),
        }
    }
}
