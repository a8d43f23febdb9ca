#![doc(test(attr(deny(warnings))))]

//! BudgetWise records income and expense transactions, tracks monthly budget goals per
//! category, builds dashboards and reports, and asks a language model for spending advice.
//!
//! The library exposes the action boundary used by both the HTTP API and the CLI.

pub mod actions;
pub mod cli;
pub mod errors;
pub mod insights;
pub mod server;
pub mod utils;

pub use actions::{ActionResponse, ActionResult, BudgetActions, CategoryCatalog};
pub use errors::{ActionError, ErrorKind};

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!(version = utils::build_info::VERSION, "BudgetWise tracing initialized.");
    });
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_does_not_panic() {
        super::init();
        super::init();
    }
}
