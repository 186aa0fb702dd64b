//! Producer/consumer racer: `memory_order_relaxed {relaxed|acq_rel|seq_cst}`.
//!
//! Run with `relaxed` to let the consumer read a slot before the producer's
//! write to it became visible. Every such stale read is printed.

use memorder::Racer;

use std::process::ExitCode;

fn main() -> ExitCode {
    memorder::cli::main(Racer::Relaxed)
}
