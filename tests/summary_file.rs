#![cfg(all(feature = "report", not(feature = "loom")))]
#![deny(warnings, rust_2018_idioms)]

use memorder::{Builder, Mode, Racer};

use std::fs;

#[test]
fn bounded_run_stores_the_summary() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("summary.json");

    let mut builder = Builder::new();
    builder
        .max_iterations(200)
        .report_file(&path);

    let summary = builder
        .run(Racer::SeqCst, Mode::SeqCst, Vec::new())
        .unwrap();

    let stored: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();

    assert_eq!("seq_cst", stored["racer"]);
    assert_eq!("seq_cst", stored["mode"]);
    assert_eq!(200, stored["iterations"]);
    assert_eq!(summary.failures, stored["failures"].as_u64().unwrap());
    assert!(stored["elapsed_secs"].as_f64().is_some());
}

#[test]
fn summary_file_names_acq_rel() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("summary.json");

    let mut builder = Builder::new();
    builder
        .max_iterations(10)
        .report_file(&path);

    builder
        .run(Racer::Relaxed, Mode::AcqRel, Vec::new())
        .unwrap();

    let stored: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();

    assert_eq!("relaxed", stored["racer"]);
    assert_eq!("acq_rel", stored["mode"]);
    assert_eq!(0, stored["failures"]);
}
