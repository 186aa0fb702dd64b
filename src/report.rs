//! Reporting ordering violations.

use std::fmt;

/// An ordering violation observed by a racer.
///
/// `Display` renders the line the binaries print to standard output.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Violation {
    /// The consumer read a slot that did not yet hold the published value.
    StaleRead {
        /// Value found in the slot.
        data: u64,
        /// Value published through the counter.
        counter: u64,
        /// Violations so far, this one included.
        failures: u64,
        /// `failures / iterations`.
        rate: f64,
    },

    /// Neither reader saw the other counter caught up in this round.
    MissedRound {
        /// The round number.
        round: u64,
        /// Violations so far, this one included.
        failures: u64,
        /// `failures / round`.
        rate: f64,
    },
}

/// Receives every violation a racer observes, in order.
pub trait Report {
    /// Called once per violation from the observing thread.
    fn violation(&mut self, violation: Violation);
}

/// Prints each violation as a line on standard output.
#[derive(Debug, Default, Clone, Copy)]
pub struct Stdout;

/// Number of iterations (or rounds) run and violations seen.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Tally {
    /// Completed iterations.
    pub iterations: u64,

    /// Violations among them.
    pub failures: u64,
}

impl Tally {
    /// Violations per iteration, 0 before the first iteration.
    pub fn rate(&self) -> f64 {
        if self.iterations == 0 {
            0.0
        } else {
            self.failures as f64 / self.iterations as f64
        }
    }
}

impl Report for Stdout {
    fn violation(&mut self, violation: Violation) {
        println!("{}", violation);
    }
}

impl Report for Vec<Violation> {
    fn violation(&mut self, violation: Violation) {
        self.push(violation);
    }
}

impl<R: Report + ?Sized> Report for &mut R {
    fn violation(&mut self, violation: Violation) {
        (**self).violation(violation);
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Violation::StaleRead {
                data,
                counter,
                failures,
                rate,
            } => write!(
                fmt,
                "data={} cnt={} failures={} rate={}",
                data, counter, failures, rate
            ),
            Violation::MissedRound {
                round,
                failures,
                rate,
            } => write!(fmt, "cnt={} failures={} rate={}", round, failures, rate),
        }
    }
}
