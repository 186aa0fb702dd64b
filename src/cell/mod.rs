//! The data buffer shared by producer and consumer.

mod slot;
use self::slot::Slot;

use std::fmt;
use std::num::NonZeroUsize;

/// A fixed-capacity ring of `u64` slots addressed by counter value.
///
/// Slot accesses carry no ordering of their own. Whether a reader sees the
/// latest write to a slot depends entirely on how the reader and the writer
/// synchronized through something else.
///
/// In regular builds every slot is a relaxed atomic, so an unsynchronized
/// access yields a possibly stale value rather than undefined behavior. With
/// the `loom` feature every slot is a checked cell and an unsynchronized
/// access panics with a causality violation.
pub struct DataBuffer {
    slots: Box<[Slot]>,
}

impl DataBuffer {
    /// Creates a buffer of `capacity` zeroed slots.
    pub fn new(capacity: NonZeroUsize) -> DataBuffer {
        let slots = (0..capacity.get()).map(|_| Slot::new(0)).collect();
        DataBuffer { slots }
    }

    /// Number of slots.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// The slot a counter value maps to, `counter mod capacity`.
    ///
    /// In range for every `u64`.
    pub fn index(&self, counter: u64) -> usize {
        // Capacity fits in a u64 on every supported target, and the remainder
        // is below capacity, so both conversions are lossless.
        (counter % self.slots.len() as u64) as usize
    }

    /// Writes `value` into the slot for `counter`.
    pub fn store(&self, counter: u64, value: u64) {
        self.slots[self.index(counter)].store(value);
    }

    /// Reads the slot for `counter`.
    pub fn load(&self, counter: u64) -> u64 {
        self.slots[self.index(counter)].load()
    }
}

impl fmt::Debug for DataBuffer {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt.debug_struct("DataBuffer")
            .field("capacity", &self.capacity())
            .finish()
    }
}
