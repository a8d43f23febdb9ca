use std::fs;

use budgetwise_core::{sample::sample_ledger, BudgetGoalStore, CoreError, TransactionStore};
use budgetwise_domain::{Category, TransactionDraft, TransactionType};
use budgetwise_storage_json::JsonFileStore;
use chrono::NaiveDate;
use tempfile::tempdir;

fn groceries() -> TransactionDraft {
    TransactionDraft {
        date: NaiveDate::from_ymd_opt(2024, 7, 2).unwrap(),
        description: "Groceries at SuperMart".into(),
        amount: 75.5,
        transaction_type: TransactionType::Expense,
        category: Category::Groceries,
    }
}

#[test]
fn json_store_persists_across_reopen() {
    let dir = tempdir().expect("tempdir");
    let store = JsonFileStore::open_in(dir.path()).expect("open store");

    let stored = store.insert(groceries()).expect("insert");
    store
        .upsert_goal(Category::Groceries, 300.0)
        .expect("set goal");

    let reopened = JsonFileStore::open_in(dir.path()).expect("reopen");
    let transactions = reopened.transactions().expect("transactions");
    assert_eq!(transactions, vec![stored]);
    assert_eq!(reopened.goals().expect("goals")[0].amount, 300.0);
    assert!(!store.path().with_extension("json.tmp").exists());
}

#[test]
fn json_store_updates_and_removes_in_place() {
    let dir = tempdir().expect("tempdir");
    let store = JsonFileStore::open_in(dir.path()).expect("open store");
    let stored = store.insert(groceries()).expect("insert");

    let mut edited = groceries();
    edited.amount = 80.0;
    let updated = store
        .update(stored.id, edited)
        .expect("update")
        .expect("record exists");
    assert_eq!(updated.id, stored.id);
    assert_eq!(updated.amount, 80.0);

    assert!(store.remove(stored.id).expect("remove").is_some());
    assert!(store.remove(stored.id).expect("remove again").is_none());

    let reopened = JsonFileStore::open_in(dir.path()).expect("reopen");
    assert!(reopened.transactions().expect("transactions").is_empty());
}

#[test]
fn failed_write_leaves_state_unchanged() {
    let dir = tempdir().expect("tempdir");
    let store = JsonFileStore::open_in(dir.path()).expect("open store");
    store.insert(groceries()).expect("insert");

    // A directory squatting on the temp path makes the next write fail.
    fs::create_dir_all(store.path().with_extension("json.tmp")).expect("block tmp path");

    let err = store.insert(groceries()).expect_err("write must fail");
    assert!(matches!(err, CoreError::Io(_)));
    assert_eq!(store.transactions().expect("transactions").len(), 1);
}

#[test]
fn replace_loads_sample_ledger() {
    let dir = tempdir().expect("tempdir");
    let store = JsonFileStore::open_in(dir.path()).expect("open store");
    store.replace(sample_ledger()).expect("replace");

    let reopened = JsonFileStore::open_in(dir.path()).expect("reopen");
    assert_eq!(reopened.transactions().expect("transactions").len(), 10);
    assert_eq!(reopened.goals().expect("goals").len(), 7);
}

#[test]
fn newer_schema_versions_are_refused() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("ledger.json");
    fs::write(
        &path,
        concat!(
            r#"{"transactions":[],"budget_goals":[],"#,
            r#""updated_at":"2024-07-01T00:00:00Z","schema_version":99}"#
        ),
    )
    .expect("write document");

    let err = JsonFileStore::open(path).expect_err("newer schema");
    assert!(err.to_string().contains("schema version 99"));
}
