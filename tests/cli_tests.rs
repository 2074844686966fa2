use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::{prelude::PredicateBooleanExt, str::contains};
use tempfile::TempDir;

const BIN_NAME: &str = "goals";

fn goals(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin(BIN_NAME).expect("binary exists");
    cmd.env("SAVINGS_GOALS_DATA_DIR", home);
    cmd.env_remove("RUST_LOG");
    cmd
}

fn create_holiday(home: &Path) {
    goals(home)
        .args([
            "goal",
            "create",
            "holiday",
            "--start",
            "2024-01-01",
            "--duration",
            "1 year",
            "--target",
            "3650",
        ])
        .assert()
        .success()
        .stdout(contains("Created goal 'holiday'"));
}

#[test]
fn init_creates_settings_and_ledger_dir() {
    let home = TempDir::new().unwrap();

    goals(home.path())
        .arg("init")
        .assert()
        .success()
        .stdout(contains("Initialization complete"));

    assert!(home.path().join("config.json").exists());
    assert!(home.path().join("data").join("goals.json").exists());
    assert!(home.path().join("ledgers").is_dir());
}

#[test]
fn config_prints_paths() {
    let home = TempDir::new().unwrap();

    goals(home.path())
        .arg("config")
        .assert()
        .success()
        .stdout(
            contains("Goals file")
                .and(contains("goals.json"))
                .and(contains("Initialized:      false"))
                .and(contains("Goals:            0")),
        );
}

#[test]
fn created_goal_is_listed_and_persisted() {
    let home = TempDir::new().unwrap();
    create_holiday(home.path());

    goals(home.path())
        .args(["goal", "list"])
        .assert()
        .success()
        .stdout(contains("holiday").and(contains("1 goal(s)")));

    let saved = fs::read_to_string(home.path().join("data").join("goals.json")).unwrap();
    assert!(saved.contains("\"durationInSeconds\": 31536000"));
    assert!(saved.contains("\"endBalance\": 3650.0"));
}

#[test]
fn duplicate_goal_is_rejected() {
    let home = TempDir::new().unwrap();
    create_holiday(home.path());

    goals(home.path())
        .args(["goal", "create", "holiday", "--target", "100"])
        .assert()
        .failure()
        .stderr(contains("already exists"));
}

#[test]
fn duration_past_date_range_is_rejected() {
    let home = TempDir::new().unwrap();

    goals(home.path())
        .args([
            "goal",
            "create",
            "big",
            "--target",
            "100",
            "--duration",
            "300000 years",
        ])
        .assert()
        .failure()
        .stderr(contains("beyond the supported date range"));

    goals(home.path())
        .args(["goal", "list"])
        .assert()
        .success()
        .stdout(contains("No goals yet"));
}

#[test]
fn edit_and_delete_goal() {
    let home = TempDir::new().unwrap();
    create_holiday(home.path());

    goals(home.path())
        .args(["goal", "edit", "hol", "--target", "7300"])
        .assert()
        .success()
        .stdout(contains("Updated goal 'holiday'").and(contains("£7,300.00")));

    goals(home.path())
        .args(["goal", "delete", "holiday"])
        .assert()
        .success();

    goals(home.path())
        .args(["goal", "show", "holiday"])
        .assert()
        .failure()
        .stderr(contains("not found"));
}

#[test]
fn show_projects_progress_from_qif_ledger() {
    let home = TempDir::new().unwrap();
    create_holiday(home.path());

    fs::write(
        home.path().join("ledgers").join("bank.qif"),
        "!Type:Bank\nD01/02/2024\nT1,000.00\nPPayday\n^\n",
    )
    .unwrap();

    // 73 of 365 days elapsed: expected 730, achieved 1000
    goals(home.path())
        .args(["show", "--as-of", "2024-03-14"])
        .assert()
        .success()
        .stdout(
            contains("holiday")
                .and(contains("£730.00"))
                .and(contains("£1,000.00"))
                .and(contains("£270.00"))
                .and(contains("from 1 transaction(s)")),
        );
}

#[test]
fn show_fails_on_malformed_ledger() {
    let home = TempDir::new().unwrap();
    create_holiday(home.path());

    fs::write(
        home.path().join("ledgers").join("bank.csv"),
        "Date,Amount\n2024-02-01,lots\n",
    )
    .unwrap();

    goals(home.path())
        .arg("show")
        .assert()
        .failure()
        .stderr(contains("bank.csv"));
}

#[test]
fn transactions_lists_csv_ledger() {
    let home = TempDir::new().unwrap();
    let ledger = TempDir::new().unwrap();

    fs::write(
        ledger.path().join("export.csv"),
        "Date,Amount,Payee,Memo\n2024-06-01,-12.50,Grocer,\n2024-06-02,500,Employer,June\n",
    )
    .unwrap();

    goals(home.path())
        .args(["transactions", "--limit", "1", "--ledger-dir"])
        .arg(ledger.path())
        .assert()
        .success()
        .stdout(
            contains("Employer")
                .and(contains("Grocer").not())
                .and(contains("Showing 1 of 2")),
        );
}
