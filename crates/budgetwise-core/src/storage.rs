use uuid::Uuid;

use budgetwise_domain::{BudgetGoal, Category, Ledger, Transaction, TransactionDraft};

use crate::CoreResult;

/// Abstraction over persistence backends holding transaction records.
///
/// Snapshots are owned copies. Callers never hold a live reference into the store.
pub trait TransactionStore: Send + Sync {
    fn insert(&self, draft: TransactionDraft) -> CoreResult<Transaction>;
    /// Returns `Ok(None)` when no record carries `id`.
    fn update(&self, id: Uuid, draft: TransactionDraft) -> CoreResult<Option<Transaction>>;
    fn remove(&self, id: Uuid) -> CoreResult<Option<Transaction>>;
    fn transactions(&self) -> CoreResult<Vec<Transaction>>;
}

/// Abstraction over persistence backends holding per-category budget goals.
pub trait BudgetGoalStore: Send + Sync {
    /// Creates the goal for `category` or overwrites the existing amount.
    fn upsert_goal(&self, category: Category, amount: f64) -> CoreResult<BudgetGoal>;
    fn goals(&self) -> CoreResult<Vec<BudgetGoal>>;
}

/// Detects records that break ledger invariants, such as loaded documents edited by hand.
pub fn ledger_warnings(ledger: &Ledger) -> Vec<String> {
    let mut warnings = Vec::new();

    for txn in &ledger.transactions {
        if txn.category.kind() != txn.transaction_type {
            warnings.push(format!(
                "transaction {} uses {} category {} on a {} record",
                txn.id,
                txn.category.kind(),
                txn.category,
                txn.transaction_type
            ));
        }
        if !(txn.amount.is_finite() && txn.amount > 0.0) {
            warnings.push(format!(
                "transaction {} has non-positive amount {}",
                txn.id, txn.amount
            ));
        }
        if txn.description.trim().is_empty() {
            warnings.push(format!("transaction {} has an empty description", txn.id));
        }
    }

    let mut seen = Vec::new();
    for goal in &ledger.budget_goals {
        if seen.contains(&goal.category) {
            warnings.push(format!("duplicate budget goal for {}", goal.category));
        }
        seen.push(goal.category);
        if !goal.category.is_expense() {
            warnings.push(format!(
                "budget goal {} targets income category {}",
                goal.id, goal.category
            ));
        }
        if goal.amount < 0.0 {
            warnings.push(format!("budget goal {} has negative amount", goal.id));
        }
    }
    warnings
}
