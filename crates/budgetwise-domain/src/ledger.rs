//! The budget book: transactions plus per-category goals.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    budget::BudgetGoal,
    category::Category,
    common::position_of,
    transaction::{Transaction, TransactionDraft},
};

pub const CURRENT_SCHEMA_VERSION: u8 = 1;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Ledger {
    #[serde(default)]
    pub transactions: Vec<Transaction>,
    #[serde(default)]
    pub budget_goals: Vec<BudgetGoal>,
    pub updated_at: DateTime<Utc>,
    #[serde(default = "Ledger::schema_version_default")]
    pub schema_version: u8,
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new()
    }
}

impl Ledger {
    pub fn new() -> Self {
        Self {
            transactions: Vec::new(),
            budget_goals: Vec::new(),
            updated_at: Utc::now(),
            schema_version: CURRENT_SCHEMA_VERSION,
        }
    }

    /// Appends a transaction built from `draft` and returns the stored record.
    pub fn add_transaction(&mut self, draft: TransactionDraft) -> Transaction {
        let transaction = Transaction::new(draft);
        self.transactions.push(transaction.clone());
        self.touch();
        transaction
    }

    /// Replaces the fields of the transaction identified by `id`.
    pub fn update_transaction(&mut self, id: Uuid, draft: TransactionDraft) -> Option<Transaction> {
        let index = position_of(&self.transactions, id)?;
        let transaction = &mut self.transactions[index];
        transaction.apply(draft);
        let updated = transaction.clone();
        self.touch();
        Some(updated)
    }

    pub fn remove_transaction(&mut self, id: Uuid) -> Option<Transaction> {
        let index = position_of(&self.transactions, id)?;
        let removed = self.transactions.remove(index);
        self.touch();
        Some(removed)
    }

    pub fn goal_for(&self, category: Category) -> Option<&BudgetGoal> {
        self.budget_goals
            .iter()
            .find(|goal| goal.category == category)
    }

    /// Sets the monthly goal for `category`, overwriting an existing goal in place.
    pub fn upsert_goal(&mut self, category: Category, amount: f64) -> BudgetGoal {
        let goal = match self
            .budget_goals
            .iter_mut()
            .find(|goal| goal.category == category)
        {
            Some(existing) => {
                existing.amount = amount;
                existing.clone()
            }
            None => {
                let goal = BudgetGoal::new(category, amount);
                self.budget_goals.push(goal.clone());
                goal
            }
        };
        self.touch();
        goal
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    pub fn schema_version_default() -> u8 {
        CURRENT_SCHEMA_VERSION
    }
}
