#![allow(unused)]
//! CLI process-level integration harness.
//!
//! # What this covers
//!
//! This harness runs `eta` as a compiled binary via [`std::process::Command`]
//! against a fixture dataset, model, and config file.
//!
//! - **predict**: plain-text and `--json` output; exit code 0.
//! - **Validation**: a malformed time, or a value outside the training data,
//!   prints the message and exits non-zero.
//! - **options**: JSON listing of the selectable values.
//!
//! # Running
//!
//! ```sh
//! cargo test --test cli_harness
//! ```

mod common;
use common::*;

use std::path::Path;
use std::process::{Command, Output};

use pretty_assertions::assert_eq;
use serde_json::Value;

fn eta(config: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_eta"))
        .arg("--config")
        .arg(config)
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("run eta binary")
}

fn fixture_config(dir: &Path) -> std::path::PathBuf {
    let train = write_train_csv(dir);
    let model = write_flat_model(dir);
    write_config(dir, &train, &model)
}

#[test]
fn predict_prints_summary() {
    let dir = tempfile::tempdir().unwrap();
    let out = eta(
        &fixture_config(dir.path()),
        &[
            "predict",
            "--date", "2024-01-01",
            "--order-time", "11:45",
            "--pickup-time", "12:00",
            "--traffic", "Jam",
        ],
    );

    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));
    let stdout = String::from_utf8(out.stdout).unwrap();
    assert!(stdout.contains("Order Picked Up:     01 January 2024, 12:00 PM"), "{stdout}");
    assert!(stdout.contains("Total Delivery Time: 30.00 minutes"), "{stdout}");
    assert!(stdout.contains("Estimated Arrival:   01 January 2024, 12:30 PM"), "{stdout}");
}

#[test]
fn predict_json_contains_record() {
    let dir = tempfile::tempdir().unwrap();
    let out = eta(
        &fixture_config(dir.path()),
        &[
            "predict",
            "--json",
            "--date", "2024-01-01",
            "--order-time", "11:45",
            "--pickup-time", "12:00",
            "--city-code", "BANG",
            "--restaurant-lat", "-14.829222",
        ],
    );

    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));
    let body: Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(body["record"]["Delivery_person_ID"], "BANGRES13DEL02");
    assert_eq!(body["record"]["Restaurant_latitude"], "-14.829222");
    assert_eq!(body["summary"]["arrival"], "2024-01-01T12:20:00");
}

#[test]
fn malformed_time_exits_nonzero_with_message() {
    let dir = tempfile::tempdir().unwrap();
    let out = eta(
        &fixture_config(dir.path()),
        &["predict", "--order-time", "99:99"],
    );

    assert!(!out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(
        stderr.contains("Please enter time in HH:MM format (e.g. 14:30)"),
        "{stderr}"
    );
    assert!(out.stdout.is_empty());
}

#[test]
fn out_of_range_inputs_exit_nonzero_with_message() {
    let dir = tempfile::tempdir().unwrap();
    let config = fixture_config(dir.path());

    let out = eta(&config, &["predict", "--rating=-inf"]);
    assert!(!out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("delivery_person_rating must be between"), "{stderr}");
    assert!(out.stdout.is_empty());

    let out = eta(&config, &["predict", "--age", "500"]);
    assert!(!out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("delivery_person_age must be between 23 and 38"), "{stderr}");
}

#[test]
fn options_prints_json() {
    let dir = tempfile::tempdir().unwrap();
    let out = eta(&fixture_config(dir.path()), &["options"]);

    assert!(out.status.success());
    let body: Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(body["city_codes"][0], "INDO");
    assert_eq!(body["vehicle_conditions"], serde_json::json!([0, 1, 2]));
}

#[test]
fn missing_dataset_exits_nonzero() {
    let dir = tempfile::tempdir().unwrap();
    let config = fixture_config(dir.path());
    let out = eta(&config, &["--train", "/nonexistent/train.csv", "options"]);
    assert!(!out.status.success());
}
