#![allow(dead_code)]

use std::{path::Path, sync::Arc};

use budgetwise::BudgetActions;
use budgetwise_core::TransactionForm;
use budgetwise_storage_json::JsonFileStore;

/// Builds a form from the five raw fields.
pub fn form(
    kind: &str,
    category: &str,
    amount: &str,
    date: &str,
    description: &str,
) -> TransactionForm {
    TransactionForm {
        description: description.to_string(),
        amount: amount.to_string(),
        transaction_type: kind.to_string(),
        category: category.to_string(),
        date: date.to_string(),
    }
}

/// Salary, rent and groceries from early July 2024.
pub fn july_forms() -> Vec<TransactionForm> {
    vec![
        form("income", "Salary", "3000", "2024-07-01", "Salary Deposit"),
        form("expense", "Housing", "1200", "2024-07-01", "Rent Payment"),
        form("expense", "Groceries", "75.50", "2024-07-02", "Groceries at SuperMart"),
    ]
}

/// In-memory actions preloaded with [`july_forms`].
pub fn july_actions() -> BudgetActions {
    let actions = BudgetActions::in_memory();
    for form in july_forms() {
        actions.add_transaction(&form).expect("seed transaction");
    }
    actions
}

/// Actions persisted to `ledger.json` under `dir`.
pub fn file_actions(dir: &Path) -> BudgetActions {
    let store = JsonFileStore::open_in(dir).expect("open json store");
    BudgetActions::with_store(Arc::new(store))
}

pub fn approx(left: f64, right: f64) -> bool {
    (left - right).abs() < 1e-9
}
