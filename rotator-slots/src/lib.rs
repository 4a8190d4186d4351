//! Slot assignment for backup rotation.
//!
//! Every rotated archive carries a [`RotationId`] that grows by one per
//! rotation. An algorithm maps that id to a [`Slot`]; when a new archive lands
//! in a slot, whatever archive previously held the slot is deleted. The choice
//! of mapping decides the retention pattern:
//!
//! - [`SimpleRotator`]: FIFO, keeps the newest `n` archives.
//! - [`HanoiRotator`]: Tower of Hanoi, older archives are kept exponentially
//!   more sparsely.
//! - [`TieredRotator`]: generalized grandfather-father-son.
//!
//! All three are pure and hold no state beyond their construction
//! parameters. [`AlgorithmConfig`] validates user input and builds the
//! matching [`Algorithm`].

pub mod assigner;
pub mod config;
pub mod hanoi;
pub mod simple;
pub mod tiered;

pub use assigner::{RotationId, Slot, SlotAssigner};
pub use config::{Algorithm, AlgorithmConfig, AlgorithmKind, ConfigError};
pub use hanoi::{HanoiRotator, MAX_HANOI_SLOTS};
pub use simple::SimpleRotator;
pub use tiered::{Tier, TieredRotator};
