//! The relaxed-order racer.
//!
//! One producer, one consumer, one data buffer and one atomic counter. The
//! producer writes `i` into slot `i mod capacity` and publishes `i` through
//! the counter, then spins until the consumer hands the counter back as 0.
//! The consumer spins until the counter is nonzero, reads the slot the
//! counter points at and checks that it holds at least the published value.
//!
//! Whether that check can fail is decided by the [`Mode`]:
//!
//! * `acq_rel` and `seq_cst` make the counter store a release and the counter
//!   load an acquire, so the slot write is visible before the counter is.
//!   The check never fails.
//! * `relaxed` orders nothing. The consumer may see the counter before the
//!   slot and read a stale value.

use crate::cell::DataBuffer;
use crate::report::{Report, Tally, Violation};
use crate::sync::{spin_loop, thread, Arc, AtomicU64};
use crate::{sequence, Error, Mode, Orderings};

use std::num::NonZeroUsize;

use tracing::{debug, debug_span};

struct Shared {
    data: DataBuffer,
    counter: AtomicU64,
}

/// Runs the racer with `mode` until `limit` iterations completed.
///
/// Without a limit the racer runs until the process is killed. Every
/// violation is passed to `report` from the consumer thread; the reporter is
/// handed back together with the consumer's tally.
pub fn run<R>(
    mode: Mode,
    capacity: NonZeroUsize,
    limit: Option<u64>,
    report: R,
) -> Result<(Tally, R), Error>
where
    R: Report + Send + 'static,
{
    let orderings = mode.orderings();
    let shared = Arc::new(Shared {
        data: DataBuffer::new(capacity),
        counter: AtomicU64::new(0),
    });

    debug!(%mode, capacity = capacity.get(), ?limit, "spawning producer and consumer");

    let producer = {
        let shared = shared.clone();
        thread::Builder::new()
            .name("producer".to_string())
            .spawn(move || {
                let _span = debug_span!("producer").entered();
                produce(&shared, orderings, limit);
            })
            .map_err(|e| Error::Spawn("producer", e))?
    };

    let consumer = thread::Builder::new()
        .name("consumer".to_string())
        .spawn(move || {
            let _span = debug_span!("consumer").entered();
            let mut report = report;
            let tally = consume(&shared, orderings, limit, &mut report);
            (tally, report)
        })
        .map_err(|e| Error::Spawn("consumer", e))?;

    producer
        .join()
        .map_err(|_| Error::WorkerPanicked("producer"))?;
    consumer
        .join()
        .map_err(|_| Error::WorkerPanicked("consumer"))
}

fn produce(shared: &Shared, orderings: Orderings, limit: Option<u64>) {
    for i in sequence(limit) {
        shared.data.store(i, i);
        shared.counter.store(i, orderings.write);

        while shared.counter.load(orderings.read) != 0 {
            spin_loop();
        }
    }
}

fn consume<R: Report>(
    shared: &Shared,
    orderings: Orderings,
    limit: Option<u64>,
    report: &mut R,
) -> Tally {
    let mut tally = Tally::default();

    for i in sequence(limit) {
        let c = loop {
            let c = shared.counter.load(orderings.read);
            if c != 0 {
                break c;
            }
            spin_loop();
        };

        let d = shared.data.load(c);
        shared.counter.store(0, orderings.write);

        tally.iterations = i;

        if d < c {
            tally.failures += 1;
            debug!(data = d, counter = c, failures = tally.failures, "stale read");

            report.violation(Violation::StaleRead {
                data: d,
                counter: c,
                failures: tally.failures,
                rate: tally.rate(),
            });
        }
    }

    tally
}
