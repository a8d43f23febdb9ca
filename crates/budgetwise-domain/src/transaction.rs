//! Domain models for dated income and expense records.

use std::{fmt, str::FromStr};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{category::Category, common::*};

/// Direction of money flow for a transaction.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Income,
    Expense,
}

impl TransactionType {
    pub fn as_str(self) -> &'static str {
        match self {
            TransactionType::Income => "income",
            TransactionType::Expense => "expense",
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionType {
    type Err = ParseTransactionTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "income" => Ok(TransactionType::Income),
            "expense" => Ok(TransactionType::Expense),
            _ => Err(ParseTransactionTypeError(s.trim().to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseTransactionTypeError(pub String);

impl fmt::Display for ParseTransactionTypeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown transaction type `{}`", self.0)
    }
}

impl std::error::Error for ParseTransactionTypeError {}

/// Validated field values for a transaction that does not yet carry an identifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionDraft {
    pub date: NaiveDate,
    pub description: String,
    pub amount: f64,
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    pub category: Category,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: Uuid,
    pub date: NaiveDate,
    pub description: String,
    pub amount: f64,
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    pub category: Category,
}

impl Transaction {
    /// Materializes a draft with a freshly assigned identifier.
    pub fn new(draft: TransactionDraft) -> Self {
        Self::with_id(Uuid::new_v4(), draft)
    }

    pub fn with_id(id: Uuid, draft: TransactionDraft) -> Self {
        Self {
            id,
            date: draft.date,
            description: draft.description,
            amount: draft.amount,
            transaction_type: draft.transaction_type,
            category: draft.category,
        }
    }

    /// Replaces every field except the identifier.
    pub fn apply(&mut self, draft: TransactionDraft) {
        self.date = draft.date;
        self.description = draft.description;
        self.amount = draft.amount;
        self.transaction_type = draft.transaction_type;
        self.category = draft.category;
    }

    pub fn is_income(&self) -> bool {
        self.transaction_type == TransactionType::Income
    }

    pub fn is_expense(&self) -> bool {
        self.transaction_type == TransactionType::Expense
    }

    /// Calendar month bucket in zero-padded `YYYY-MM` form.
    pub fn month_key(&self) -> String {
        self.date.format("%Y-%m").to_string()
    }
}

impl Identifiable for Transaction {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl Displayable for Transaction {
    fn display_label(&self) -> String {
        format!(
            "{} {} [{} / {}] {:.2}",
            self.date, self.description, self.transaction_type, self.category, self.amount
        )
    }
}
