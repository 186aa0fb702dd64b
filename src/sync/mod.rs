//! Synchronization primitives used by the racers.
//!
//! Regular builds use `std`. With the `loom` feature the same names resolve to
//! the checked versions from `loom`, so the racers can run inside
//! `loom::model`.

mod barrier;
pub use self::barrier::{Barrier, BarrierWaitResult};

cfg_if::cfg_if! {
    if #[cfg(feature = "loom")] {
        pub(crate) use loom::hint::spin_loop;
        pub(crate) use loom::sync::atomic::AtomicU64;
        pub(crate) use loom::sync::{Arc, Condvar, Mutex, MutexGuard};
        pub(crate) use loom::thread;
    } else {
        pub(crate) use std::hint::spin_loop;
        pub(crate) use std::sync::atomic::AtomicU64;
        pub(crate) use std::sync::{Arc, Condvar, Mutex, MutexGuard};
        pub(crate) use std::thread;
    }
}
