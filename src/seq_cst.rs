//! The sequential-consistency racer.
//!
//! Two writers each increment their own counter, A or B, once per round. Two
//! readers each wait until their own counter reaches the round number and
//! then check whether the other counter got there too. A round in which
//! neither reader saw the other counter caught up means the readers observed
//! the two increments in opposite orders. `SeqCst` rules that out; with
//! weaker orders it is possible on hardware without multi-copy atomicity.
//!
//! Rounds are fenced by two barriers. Everybody arrives at `end_point` once
//! the round is observed; the leading reader then checks the round, resets
//! the counters and advances the round number. Everybody arrives at
//! `restart_point` before starting the next round, so no thread runs ahead
//! into round `k + 1` while another still observes round `k`.

use crate::report::{Report, Tally, Violation};
use crate::sync::{spin_loop, thread, Arc, AtomicU64, Barrier};
use crate::{sequence, Error, Mode, Orderings};

use std::sync::atomic::Ordering::SeqCst;

use tracing::{debug, debug_span, trace};

/// Threads taking part in every round: two writers and two readers.
pub const PARTIES: usize = 4;

struct Shared {
    a: AtomicU64,
    b: AtomicU64,
    /// Readers that saw both counters at the round number.
    ok: AtomicU64,
    /// The round number, only advanced by the leader.
    expected: AtomicU64,
    end_point: Barrier,
    restart_point: Barrier,
}

#[derive(Debug, Clone, Copy)]
enum Side {
    A,
    B,
}

/// Runs the racer with `mode` until `limit` rounds completed.
///
/// Without a limit the racer runs until the process is killed. The reader
/// watching counter A leads every round and passes each violation to
/// `report`; the reporter is handed back together with the leader's tally.
pub fn run<R>(mode: Mode, limit: Option<u64>, report: R) -> Result<(Tally, R), Error>
where
    R: Report + Send + 'static,
{
    let orderings = mode.orderings();
    let shared = Arc::new(Shared {
        a: AtomicU64::new(0),
        b: AtomicU64::new(0),
        ok: AtomicU64::new(0),
        expected: AtomicU64::new(1),
        end_point: Barrier::new(PARTIES),
        restart_point: Barrier::new(PARTIES),
    });

    debug!(%mode, ?limit, "spawning writers and readers");

    let writers = [("writer-a", Side::A), ("writer-b", Side::B)]
        .into_iter()
        .map(|(name, side)| {
            let shared = shared.clone();
            thread::Builder::new()
                .name(name.to_string())
                .spawn(move || {
                    let _span = debug_span!("writer", ?side).entered();
                    write(&shared, side, orderings, limit);
                })
                .map_err(|e| Error::Spawn(name, e))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let follower = {
        let shared = shared.clone();
        thread::Builder::new()
            .name("reader-b".to_string())
            .spawn(move || {
                let _span = debug_span!("reader", side = ?Side::B).entered();
                read::<R>(&shared, Side::B, orderings, limit, None)
            })
            .map_err(|e| Error::Spawn("reader-b", e))?
    };

    let leader = thread::Builder::new()
        .name("reader-a".to_string())
        .spawn(move || {
            let _span = debug_span!("reader", side = ?Side::A, leader = true).entered();
            let mut report = report;
            let tally = read(&shared, Side::A, orderings, limit, Some(&mut report));
            (tally, report)
        })
        .map_err(|e| Error::Spawn("reader-a", e))?;

    for writer in writers {
        writer.join().map_err(|_| Error::WorkerPanicked("writer"))?;
    }
    follower
        .join()
        .map_err(|_| Error::WorkerPanicked("reader-b"))?;
    leader.join().map_err(|_| Error::WorkerPanicked("reader-a"))
}

fn write(shared: &Shared, side: Side, orderings: Orderings, limit: Option<u64>) {
    let counter = shared.counter(side);

    for _ in sequence(limit) {
        counter.fetch_add(1, orderings.write);
        shared.end_point.arrive_and_wait();
        shared.restart_point.arrive_and_wait();
    }
}

fn read<R: Report>(
    shared: &Shared,
    side: Side,
    orderings: Orderings,
    limit: Option<u64>,
    mut leader: Option<&mut R>,
) -> Tally {
    let mine = shared.counter(side);
    let other = shared.counter(side.other());
    let mut tally = Tally::default();

    for _ in sequence(limit) {
        let expected = shared.expected.load(SeqCst);

        while mine.load(orderings.read) != expected {
            spin_loop();
        }
        if other.load(orderings.read) == expected {
            shared.ok.fetch_add(1, SeqCst);
        }

        shared.end_point.arrive_and_wait();
        tally.iterations = expected;

        if let Some(report) = leader.as_deref_mut() {
            if shared.ok.load(SeqCst) == 0 {
                tally.failures += 1;
                debug!(round = expected, failures = tally.failures, "missed round");

                report.violation(Violation::MissedRound {
                    round: expected,
                    failures: tally.failures,
                    rate: tally.rate(),
                });
            }

            shared.a.store(expected, SeqCst);
            shared.b.store(expected, SeqCst);
            shared.expected.store(expected + 1, SeqCst);
            shared.ok.store(0, SeqCst);
            trace!(round = expected, "round closed");
        }

        shared.restart_point.arrive_and_wait();
    }

    tally
}

impl Shared {
    fn counter(&self, side: Side) -> &AtomicU64 {
        match side {
            Side::A => &self.a,
            Side::B => &self.b,
        }
    }
}

impl Side {
    fn other(self) -> Side {
        match self {
            Side::A => Side::B,
            Side::B => Side::A,
        }
    }
}
