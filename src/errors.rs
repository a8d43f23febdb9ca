use serde::{Deserialize, Serialize};
use thiserror::Error;

use budgetwise_core::{CoreError, ValidationErrors};

use crate::insights::{GeneratorErrorKind, InsightError};

pub const UNEXPECTED_MESSAGE: &str = "An unexpected error occurred.";
pub const INSIGHTS_FALLBACK_MESSAGE: &str =
    "An unexpected error occurred while fetching AI insights.";
pub const INSIGHTS_NOT_CONFIGURED_MESSAGE: &str = "AI insights are not configured";

/// Failure categories reported at the action boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Validation,
    NotFound,
    Upstream,
    Unexpected,
}

/// Error returned by every [`BudgetActions`](crate::BudgetActions) operation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ActionError {
    #[error("{}", .0.join(", "))]
    Validation(Vec<String>),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Upstream(String),
    #[error("An unexpected error occurred.")]
    Unexpected,
}

impl ActionError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ActionError::Validation(_) => ErrorKind::Validation,
            ActionError::NotFound(_) => ErrorKind::NotFound,
            ActionError::Upstream(_) => ErrorKind::Upstream,
            ActionError::Unexpected => ErrorKind::Unexpected,
        }
    }

    /// Individual validation messages; empty for other kinds.
    pub fn issues(&self) -> &[String] {
        match self {
            ActionError::Validation(issues) => issues,
            _ => &[],
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ActionError::NotFound(message.into())
    }
}

impl From<ValidationErrors> for ActionError {
    fn from(errors: ValidationErrors) -> Self {
        ActionError::Validation(errors.messages())
    }
}

impl From<CoreError> for ActionError {
    fn from(error: CoreError) -> Self {
        match error {
            CoreError::Validation(errors) => errors.into(),
            CoreError::TransactionNotFound(_) => ActionError::not_found("Transaction not found."),
            other => {
                tracing::error!(error = %other, "store operation failed");
                ActionError::Unexpected
            }
        }
    }
}

impl From<InsightError> for ActionError {
    fn from(error: InsightError) -> Self {
        match error {
            InsightError::InvalidInput { .. } => ActionError::Validation(vec![error.to_string()]),
            InsightError::Upstream(inner) if inner.kind == GeneratorErrorKind::NotConfigured => {
                ActionError::Upstream(INSIGHTS_NOT_CONFIGURED_MESSAGE.into())
            }
            InsightError::Upstream(inner) if inner.message.trim().is_empty() => {
                tracing::error!(kind = %inner.kind, "AI insights request failed without detail");
                ActionError::Upstream(INSIGHTS_FALLBACK_MESSAGE.into())
            }
            other => {
                tracing::error!(error = %other, "AI insights request failed");
                ActionError::Upstream(other.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::insights::GeneratorError;

    #[test]
    fn storage_failures_become_generic_unexpected_errors() {
        let err: ActionError = CoreError::Storage("disk full".into()).into();
        assert_eq!(err, ActionError::Unexpected);
        assert_eq!(err.to_string(), "An unexpected error occurred.");
        assert_eq!(err.kind(), ErrorKind::Unexpected);
    }

    #[test]
    fn blank_upstream_messages_use_the_fallback() {
        let err: ActionError = InsightError::Upstream(GeneratorError::network(" ")).into();
        assert_eq!(err.to_string(), INSIGHTS_FALLBACK_MESSAGE);

        let err: ActionError = InsightError::Upstream(GeneratorError::not_configured("")).into();
        assert_eq!(err.to_string(), INSIGHTS_NOT_CONFIGURED_MESSAGE);

        let err: ActionError = InsightError::Cancelled.into();
        assert_eq!(err.kind(), ErrorKind::Upstream);
        assert_eq!(err.to_string(), "AI insights request was cancelled");
    }
}
