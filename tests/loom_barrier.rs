#![cfg(feature = "loom")]
#![deny(warnings, rust_2018_idioms)]

use loom::sync::atomic::AtomicUsize;
use loom::thread;
use memorder::sync::Barrier;

use std::sync::atomic::Ordering::{Relaxed, SeqCst};
use std::sync::Arc;

#[test]
fn exactly_one_leader() {
    loom::model(|| {
        let barrier = Arc::new(Barrier::new(2));
        let leaders = Arc::new(AtomicUsize::new(0));

        let th = {
            let (barrier, leaders) = (barrier.clone(), leaders.clone());
            thread::spawn(move || {
                if barrier.arrive_and_wait().is_leader() {
                    leaders.fetch_add(1, SeqCst);
                }
            })
        };

        if barrier.arrive_and_wait().is_leader() {
            leaders.fetch_add(1, SeqCst);
        }

        th.join().unwrap();

        assert_eq!(1, leaders.load(SeqCst));
        assert_eq!(1, barrier.generation());
    });
}

#[test]
fn publishes_writes_made_before_arriving() {
    loom::model(|| {
        let barrier = Arc::new(Barrier::new(2));
        let data = Arc::new(AtomicUsize::new(0));

        let th = {
            let (barrier, data) = (barrier.clone(), data.clone());
            thread::spawn(move || {
                data.store(1, Relaxed);
                barrier.arrive_and_wait();
            })
        };

        barrier.arrive_and_wait();
        assert_eq!(1, data.load(Relaxed));

        th.join().unwrap();
    });
}

#[test]
fn reusable_across_rounds() {
    loom::model(|| {
        let barrier = Arc::new(Barrier::new(2));

        let th = {
            let barrier = barrier.clone();
            thread::spawn(move || {
                barrier.arrive_and_wait();
                barrier.arrive_and_wait();
            })
        };

        assert_eq!(0, barrier.arrive_and_wait().generation());
        assert_eq!(1, barrier.arrive_and_wait().generation());

        th.join().unwrap();
        assert_eq!(2, barrier.generation());
    });
}

#[test]
#[should_panic(expected = "deadlock")]
fn short_of_quorum_deadlocks() {
    loom::model(|| {
        let barrier = Barrier::new(2);
        barrier.arrive_and_wait();
    });
}
