//! budgetwise-domain
//!
//! Pure domain models (Ledger, Transaction, BudgetGoal, Category and derived reports).
//! No I/O, no CLI, no storage. Only data types and core enums.

pub mod budget;
pub mod category;
pub mod common;
pub mod ledger;
pub mod report;
pub mod transaction;

pub use budget::*;
pub use category::*;
pub use common::*;
pub use ledger::*;
pub use report::*;
pub use transaction::*;
