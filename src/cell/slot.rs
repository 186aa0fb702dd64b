cfg_if::cfg_if! {
    if #[cfg(feature = "loom")] {
        use loom::cell::UnsafeCell;

        /// A buffer slot whose accesses are tracked by the model checker.
        pub(super) struct Slot(UnsafeCell<u64>);

        // Accesses go through `UnsafeCell::with{_mut}`, which the model
        // checker validates against the happens-before relation.
        unsafe impl Sync for Slot {}

        impl Slot {
            pub(super) fn new(value: u64) -> Slot {
                Slot(UnsafeCell::new(value))
            }

            pub(super) fn store(&self, value: u64) {
                self.0.with_mut(|ptr| unsafe { *ptr = value });
            }

            pub(super) fn load(&self) -> u64 {
                self.0.with(|ptr| unsafe { *ptr })
            }
        }
    } else {
        use std::sync::atomic::AtomicU64;
        use std::sync::atomic::Ordering::Relaxed;

        /// A buffer slot with no ordering of its own.
        pub(super) struct Slot(AtomicU64);

        impl Slot {
            pub(super) fn new(value: u64) -> Slot {
                Slot(AtomicU64::new(value))
            }

            pub(super) fn store(&self, value: u64) {
                self.0.store(value, Relaxed);
            }

            pub(super) fn load(&self) -> u64 {
                self.0.load(Relaxed)
            }
        }
    }
}
