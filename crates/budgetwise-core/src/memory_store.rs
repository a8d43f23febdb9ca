//! Process-local store backed by a lock-guarded [`Ledger`].

use std::sync::RwLock;

use tracing::debug;
use uuid::Uuid;

use budgetwise_domain::{BudgetGoal, Category, Ledger, Transaction, TransactionDraft};

use crate::{BudgetGoalStore, CoreError, CoreResult, TransactionStore};

#[derive(Debug, Default)]
pub struct InMemoryStore {
    ledger: RwLock<Ledger>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_ledger(ledger: Ledger) -> Self {
        Self {
            ledger: RwLock::new(ledger),
        }
    }

    fn write<T>(&self, apply: impl FnOnce(&mut Ledger) -> T) -> CoreResult<T> {
        let mut ledger = self.ledger.write().map_err(|_| CoreError::poisoned())?;
        Ok(apply(&mut ledger))
    }

    fn read<T>(&self, view: impl FnOnce(&Ledger) -> T) -> CoreResult<T> {
        let ledger = self.ledger.read().map_err(|_| CoreError::poisoned())?;
        Ok(view(&ledger))
    }
}

impl TransactionStore for InMemoryStore {
    fn insert(&self, draft: TransactionDraft) -> CoreResult<Transaction> {
        let stored = self.write(|ledger| ledger.add_transaction(draft))?;
        debug!(id = %stored.id, "transaction inserted in memory");
        Ok(stored)
    }

    fn update(&self, id: Uuid, draft: TransactionDraft) -> CoreResult<Option<Transaction>> {
        self.write(|ledger| ledger.update_transaction(id, draft))
    }

    fn remove(&self, id: Uuid) -> CoreResult<Option<Transaction>> {
        self.write(|ledger| ledger.remove_transaction(id))
    }

    fn transactions(&self) -> CoreResult<Vec<Transaction>> {
        self.read(|ledger| ledger.transactions.clone())
    }
}

impl BudgetGoalStore for InMemoryStore {
    fn upsert_goal(&self, category: Category, amount: f64) -> CoreResult<BudgetGoal> {
        self.write(|ledger| ledger.upsert_goal(category, amount))
    }

    fn goals(&self) -> CoreResult<Vec<BudgetGoal>> {
        self.read(|ledger| ledger.budget_goals.clone())
    }
}
