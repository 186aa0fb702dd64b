#![cfg(not(feature = "loom"))]
#![deny(warnings, rust_2018_idioms)]

use memorder::cell::DataBuffer;
use memorder::relaxed;
use memorder::report::Violation;
use memorder::Mode;

use std::num::NonZeroUsize;

const ITERATIONS: u64 = 2_000;

fn capacity(n: usize) -> NonZeroUsize {
    NonZeroUsize::new(n).unwrap()
}

#[test]
fn acq_rel_never_reads_a_stale_slot() {
    let (tally, violations) =
        relaxed::run(Mode::AcqRel, capacity(10_000), Some(ITERATIONS), Vec::new()).unwrap();

    assert_eq!(ITERATIONS, tally.iterations);
    assert_eq!(0, tally.failures);
    assert!(violations.is_empty(), "{:?}", violations);
}

#[test]
fn seq_cst_never_reads_a_stale_slot() {
    let (tally, violations) =
        relaxed::run(Mode::SeqCst, capacity(10_000), Some(ITERATIONS), Vec::new()).unwrap();

    assert_eq!(ITERATIONS, tally.iterations);
    assert_eq!(0, tally.failures);
    assert!(violations.is_empty(), "{:?}", violations);
}

#[test]
fn single_slot_buffer_is_reused_safely() {
    let (tally, violations) =
        relaxed::run(Mode::AcqRel, capacity(1), Some(ITERATIONS), Vec::new()).unwrap();

    assert_eq!(ITERATIONS, tally.iterations);
    assert_eq!(0, tally.failures);
    assert!(violations.is_empty(), "{:?}", violations);
}

#[test]
fn relaxed_reports_what_it_counts() {
    let (tally, violations) =
        relaxed::run(Mode::Relaxed, capacity(16), Some(ITERATIONS), Vec::new()).unwrap();

    assert_eq!(ITERATIONS, tally.iterations);
    assert_eq!(tally.failures, violations.len() as u64);

    for (i, violation) in violations.iter().enumerate() {
        match *violation {
            Violation::StaleRead {
                data,
                counter,
                failures,
                rate,
            } => {
                assert!(data < counter);
                assert!(counter <= ITERATIONS);
                assert_eq!(i as u64 + 1, failures);
                assert!(rate > 0.0 && rate <= 1.0);
            }
            ref other => panic!("unexpected violation {:?}", other),
        }
    }
}

#[test]
fn zero_iterations_spawns_and_returns() {
    let (tally, violations) =
        relaxed::run(Mode::Relaxed, capacity(4), Some(0), Vec::new()).unwrap();

    assert_eq!(0, tally.iterations);
    assert_eq!(0, tally.failures);
    assert_eq!(0.0, tally.rate());
    assert!(violations.is_empty());
}

#[test]
fn index_stays_in_range_for_every_counter() {
    for cap in [1, 2, 3, 7, 10_000, 65_537] {
        let buffer = DataBuffer::new(capacity(cap));
        assert_eq!(cap, buffer.capacity());

        for counter in [0, 1, cap as u64 - 1, cap as u64, u64::MAX - 1, u64::MAX] {
            let index = buffer.index(counter);
            assert!(index < cap, "counter {} capacity {}", counter, cap);
            assert_eq!((counter % cap as u64) as usize, index);
        }
    }
}

#[test]
fn slots_wrap_around() {
    let buffer = DataBuffer::new(capacity(10_000));

    buffer.store(u64::MAX, 42);
    assert_eq!(42, buffer.load(u64::MAX));
    assert_eq!(42, buffer.load(u64::MAX % 10_000));

    buffer.store(10_001, 7);
    assert_eq!(7, buffer.load(1));
    assert_eq!(0, buffer.load(2));
}
