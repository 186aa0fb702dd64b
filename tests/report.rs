#![deny(warnings, rust_2018_idioms)]

use memorder::report::{Report, Stdout, Tally, Violation};

#[test]
fn stale_read_line() {
    let violation = Violation::StaleRead {
        data: 17,
        counter: 10_017,
        failures: 3,
        rate: 0.25,
    };

    assert_eq!("data=17 cnt=10017 failures=3 rate=0.25", violation.to_string());
}

#[test]
fn missed_round_line() {
    let violation = Violation::MissedRound {
        round: 8,
        failures: 1,
        rate: 0.125,
    };

    assert_eq!("cnt=8 failures=1 rate=0.125", violation.to_string());
}

#[test]
fn tally_rate() {
    assert_eq!(0.0, Tally::default().rate());

    let tally = Tally {
        iterations: 4,
        failures: 1,
    };
    assert_eq!(0.25, tally.rate());
}

#[test]
fn reports_through_mutable_references() {
    fn report_twice<R: Report>(mut report: R) {
        for round in 1..=2 {
            report.violation(Violation::MissedRound {
                round,
                failures: round,
                rate: 1.0,
            });
        }
    }

    let mut collected: Vec<Violation> = Vec::new();
    report_twice(&mut collected);
    assert_eq!(2, collected.len());

    report_twice(Stdout);
}
