#![forbid(unsafe_code)]
use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::tempdir;

fn cli(store: &std::path::Path) -> Command {
    let mut cmd = Command::cargo_bin("roster-cli").unwrap();
    cmd.arg("--store").arg(store);
    cmd
}

// 2025-03-05 est un mercredi : aucun repos hebdomadaire du jeu de
// données initial ne tombe ce jour-là.
const DATE: &str = "2025-03-05";

#[test]
fn board_seeds_a_missing_store() {
    let dir = tempdir().unwrap();
    let store = dir.path().join("roster.json");

    cli(&store)
        .args(["board", "--date", DATE])
        .assert()
        .success()
        .stdout(predicate::str::contains("Morning Shift"))
        .stdout(predicate::str::contains("Flight Manager"));

    assert!(store.exists(), "first run persists the seed dataset");
}

#[test]
fn auto_assign_meets_seed_minimums() {
    let dir = tempdir().unwrap();
    let store = dir.path().join("roster.json");

    cli(&store)
        .args(["auto-assign", "--date", DATE, "--rng-seed", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("placed"));

    cli(&store)
        .args(["board", "--date", DATE])
        .assert()
        .success()
        .stdout(predicate::str::contains("[SHORT]").not());
}

#[test]
fn ramp_placement_outside_flight_manager_fails() {
    let dir = tempdir().unwrap();
    let store = dir.path().join("roster.json");

    cli(&store)
        .args([
            "place",
            "--staff",
            "Peter Jones",
            "--shift",
            "Morning Shift",
            "--post",
            "SIC",
            "--date",
            DATE,
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot take"));
}

#[test]
fn place_then_unassign_roundtrip() {
    let dir = tempdir().unwrap();
    let store = dir.path().join("roster.json");

    cli(&store)
        .args([
            "place",
            "--staff",
            "Jane Smith",
            "--shift",
            "Evening Shift",
            "--post",
            "TICKETING",
            "--date",
            DATE,
        ])
        .assert()
        .success();

    cli(&store)
        .args(["board", "--date", DATE])
        .assert()
        .success()
        .stdout(predicate::str::contains("Jane Smith"));

    cli(&store)
        .args(["unassign", "--staff", "Jane Smith", "--date", DATE])
        .assert()
        .success();
}
