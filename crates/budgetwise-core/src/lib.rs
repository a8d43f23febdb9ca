//! budgetwise-core
//!
//! Business logic and services for BudgetWise.
//! Depends on budgetwise-domain. No CLI, no terminal I/O, no direct file or network access.

pub mod budget_service;
pub mod error;
pub mod format;
pub mod memory_store;
pub mod query_service;
pub mod sample;
pub mod storage;
pub mod summary_service;
pub mod validation;

pub use budget_service::*;
pub use error::{CoreError, CoreResult};
pub use memory_store::InMemoryStore;
pub use query_service::*;
pub use storage::{ledger_warnings, BudgetGoalStore, TransactionStore};
pub use summary_service::*;
pub use validation::*;

#[cfg(test)]
mod tests;
