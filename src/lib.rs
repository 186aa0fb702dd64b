#![doc(html_root_url = "https://docs.rs/memorder/0.1.0")]
#![deny(missing_debug_implementations, missing_docs, rust_2018_idioms)]

//! Memorder runs racers that make the effect of atomic memory orders visible.
//!
//! # Background
//!
//! An atomic store that signals "the data is ready" only publishes the data if
//! the store and the matching load are ordered strongly enough. With
//! `Relaxed`, the signal and the data travel independently and a reader may
//! see the signal before the data. With `Release`/`Acquire` the signal carries
//! the data with it. `SeqCst` additionally puts every such operation into one
//! total order that all threads agree on.
//!
//! These guarantees are easy to state and hard to observe. Memorder provides
//! two racers that hammer on exactly those edges, count what they see and
//! report every violation.
//!
//! # Racers
//!
//! The [relaxed-order racer](crate::relaxed) has one producer and one consumer.
//! The producer writes `i` into a slot of a shared buffer, then publishes `i`
//! through an atomic counter. The consumer waits for the counter, reads the
//! slot and checks that it holds the value it was promised:
//!
//! ```no_run
//! use memorder::{relaxed, report, Mode};
//! use std::num::NonZeroUsize;
//!
//! let capacity = NonZeroUsize::new(10_000).unwrap();
//! let (tally, _) = relaxed::run(Mode::AcqRel, capacity, Some(1_000_000), report::Stdout)
//!     .unwrap();
//!
//! // Release/Acquire publishes the slot together with the counter.
//! assert_eq!(0, tally.failures);
//! ```
//!
//! The [sequential-consistency racer](crate::seq_cst) has two writers, each
//! bumping its own counter, and two readers that each wait for one counter
//! and then peek at the other. If, in some round, neither reader sees the
//! other counter caught up, the two readers disagreed on the order of two
//! independent writes. `SeqCst` forbids that outcome; weaker orders permit it
//! on hardware that is not multi-copy atomic.
//!
//! # Memory orders
//!
//! Both racers take a [`Mode`]. Each mode splits into the ordering used for
//! loads and the ordering used for stores, see [`Mode::orderings`].
//!
//! # Running
//!
//! The `memory_order_relaxed` and `memory_order_seq_cst` binaries take the
//! mode as their only argument and run until killed. A [`Builder`] collects the
//! optional bound on iterations and the other knobs from `MEMORDER_*`
//! environment variables.
//!
//! # Model checking
//!
//! With the `loom` feature enabled, every atomic, lock, thread and data slot
//! used by the racers is the [loom] checked version. Running a bounded racer
//! inside `loom::model` explores every interleaving and, for `Relaxed`,
//! reports the unsynchronized access to the data buffer as a causality
//! violation.
//!
//! [loom]: https://docs.rs/loom

pub mod cell;
pub mod cli;
mod error;
pub mod order;
pub mod relaxed;
pub mod report;
pub mod run;
pub mod seq_cst;
pub mod sync;

pub use crate::error::Error;
pub use crate::order::{Mode, Orderings};
pub use crate::run::{Builder, Racer, Summary};

/// Iteration numbers `1..=limit`, or practically unbounded without a limit.
pub(crate) fn sequence(limit: Option<u64>) -> std::ops::RangeInclusive<u64> {
    1..=limit.unwrap_or(u64::MAX)
}
