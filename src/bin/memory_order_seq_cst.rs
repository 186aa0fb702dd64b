//! Two writer, two reader racer: `memory_order_seq_cst {relaxed|acq_rel|seq_cst}`.
//!
//! Prints every round in which the readers disagreed on the order of the two
//! writes.

use memorder::Racer;

use std::process::ExitCode;

fn main() -> ExitCode {
    memorder::cli::main(Racer::SeqCst)
}
