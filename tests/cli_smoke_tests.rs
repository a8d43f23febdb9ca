use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn budgetwise(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("budgetwise").unwrap();
    cmd.env("BUDGETWISE_HOME", home.path())
        .env_remove("BUDGETWISE_INSIGHTS_API_KEY")
        .env("NO_COLOR", "1");
    cmd
}

#[test]
fn version_prints_build_metadata() {
    let home = TempDir::new().unwrap();
    budgetwise(&home)
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")))
        .stdout(predicate::str::contains("Schema ver"));
}

#[test]
fn categories_lists_both_groups() {
    let home = TempDir::new().unwrap();
    budgetwise(&home)
        .arg("categories")
        .assert()
        .success()
        .stdout(predicate::str::contains("Dining Out"))
        .stdout(predicate::str::contains("Other Income"));
}

#[test]
fn seeded_data_is_persisted_between_runs() {
    let home = TempDir::new().unwrap();
    budgetwise(&home)
        .arg("seed")
        .assert()
        .success()
        .stdout(predicate::str::contains("Loaded 10 sample transactions"));
    assert!(home.path().join("ledger.json").exists());

    budgetwise(&home)
        .args(["list", "--type", "income"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Salary Deposit"))
        .stdout(predicate::str::contains("Freelance Project Payment"))
        .stdout(predicate::str::contains("Rent Payment").not());
}

#[test]
fn invalid_add_exits_with_an_error() {
    let home = TempDir::new().unwrap();
    budgetwise(&home)
        .args([
            "add",
            "-D",
            "Coffee",
            "--amount",
            "-3",
            "--type",
            "expense",
            "--category",
            "Dining Out",
        ])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Amount must be positive"));
}

#[test]
fn json_mode_prints_the_envelope() {
    let home = TempDir::new().unwrap();
    let output = budgetwise(&home)
        .args([
            "--json", "add", "-D", "Movie Tickets", "--amount", "25", "--type", "expense",
            "--category", "Entertainment", "--date", "2024-07-04",
        ])
        .output()
        .unwrap();
    assert!(output.status.success());
    let body: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["category"], "Entertainment");

    budgetwise(&home)
        .args(["--json", "delete", "999"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("\"success\": false"));
}

#[test]
fn ephemeral_runs_leave_no_files() {
    let home = TempDir::new().unwrap();
    budgetwise(&home)
        .args(["--ephemeral", "seed"])
        .assert()
        .success();
    assert!(!home.path().join("ledger.json").exists());
}

#[test]
fn budget_goals_round_trip_through_the_cli() {
    let home = TempDir::new().unwrap();
    budgetwise(&home)
        .args(["budget", "set", "Groceries", "300"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Budget for Groceries set to $300.00"));
    budgetwise(&home)
        .args(["budget", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Groceries"));
}

#[test]
fn insights_without_a_key_fail_cleanly() {
    let home = TempDir::new().unwrap();
    budgetwise(&home)
        .arg("insights")
        .assert()
        .failure()
        .stderr(predicate::str::contains("AI insights are not configured"));
}

#[test]
fn config_init_writes_defaults_once() {
    let home = TempDir::new().unwrap();
    budgetwise(&home)
        .args(["config", "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote"));
    assert!(home.path().join("config").join("config.json").exists());

    budgetwise(&home)
        .args(["config", "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));
}
