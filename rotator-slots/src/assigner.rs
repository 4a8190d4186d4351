//! The slot-assignment capability shared by every algorithm.

/// Strictly increasing identifier assigned to each rotation event.
pub type RotationId = u64;

/// Bucket an archive occupies. Only one archive survives per slot.
pub type Slot = u64;

/// Maps rotation ids to slots.
///
/// Implementations must be pure: the same id always yields the same slot for
/// a given instance.
pub trait SlotAssigner: Send + Sync {
    /// Slot that the archive with `id` occupies.
    fn id_to_slot(&self, id: RotationId) -> Slot;

    /// Number of distinct slots this assigner can produce.
    fn slot_count(&self) -> u64;

    /// Every slot this assigner can produce, ascending.
    ///
    /// Allocates one entry per slot; check [`slot_count`](Self::slot_count)
    /// first when the configuration may be large.
    fn slots(&self) -> Vec<Slot>;
}

impl<T: SlotAssigner + ?Sized> SlotAssigner for &T {
    fn id_to_slot(&self, id: RotationId) -> Slot {
        (**self).id_to_slot(id)
    }

    fn slot_count(&self) -> u64 {
        (**self).slot_count()
    }

    fn slots(&self) -> Vec<Slot> {
        (**self).slots()
    }
}

impl<T: SlotAssigner + ?Sized> SlotAssigner for Box<T> {
    fn id_to_slot(&self, id: RotationId) -> Slot {
        (**self).id_to_slot(id)
    }

    fn slot_count(&self) -> u64 {
        (**self).slot_count()
    }

    fn slots(&self) -> Vec<Slot> {
        (**self).slots()
    }
}
