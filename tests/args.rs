#![deny(warnings, rust_2018_idioms)]

use memorder::cli::{usage, Args};
use memorder::Mode;

#[test]
fn exactly_one_mode() {
    for mode in Mode::ALL {
        let args = Args::parse_from_args(["racer", mode.as_str()]).unwrap();
        assert_eq!(mode, args.mode);
    }
}

#[test]
fn separator_counts_as_an_argument() {
    assert!(Args::parse_from_args(["racer", "--", "seq_cst"]).is_none());
    assert!(Args::parse_from_args(["racer", "--", "relaxed"]).is_none());
    assert!(Args::parse_from_args(["racer", "--"]).is_none());
}

#[test]
fn wrong_argument_count() {
    assert!(Args::parse_from_args(Vec::<String>::new()).is_none());
    assert!(Args::parse_from_args(["racer"]).is_none());
    assert!(Args::parse_from_args(["racer", "acq_rel", "acq_rel"]).is_none());
}

#[test]
fn usage_line() {
    assert_eq!(
        "usage: ./racer {relaxed|acq_rel|seq_cst}",
        usage("./racer")
    );
}
