//! The fixed category taxonomy, partitioned into expense and income subsets.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::transaction::TransactionType;

/// Labels a transaction for budgeting and reporting.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Category {
    Groceries,
    Transport,
    Entertainment,
    Utilities,
    Healthcare,
    #[serde(rename = "Dining Out")]
    DiningOut,
    Shopping,
    Housing,
    #[serde(rename = "Other Expense")]
    OtherExpense,
    Salary,
    Freelance,
    Investment,
    Gifts,
    #[serde(rename = "Other Income")]
    OtherIncome,
}

impl Category {
    /// Categories usable on expense transactions and budget goals.
    pub const EXPENSE: [Category; 9] = [
        Category::Groceries,
        Category::Transport,
        Category::Entertainment,
        Category::Utilities,
        Category::Healthcare,
        Category::DiningOut,
        Category::Shopping,
        Category::Housing,
        Category::OtherExpense,
    ];

    /// Categories usable on income transactions.
    pub const INCOME: [Category; 5] = [
        Category::Salary,
        Category::Freelance,
        Category::Investment,
        Category::Gifts,
        Category::OtherIncome,
    ];

    /// Expense subset followed by the income subset.
    pub const ALL: [Category; 14] = [
        Category::Groceries,
        Category::Transport,
        Category::Entertainment,
        Category::Utilities,
        Category::Healthcare,
        Category::DiningOut,
        Category::Shopping,
        Category::Housing,
        Category::OtherExpense,
        Category::Salary,
        Category::Freelance,
        Category::Investment,
        Category::Gifts,
        Category::OtherIncome,
    ];

    /// Human-readable label, identical to the serialized form.
    pub fn label(self) -> &'static str {
        match self {
            Category::Groceries => "Groceries",
            Category::Transport => "Transport",
            Category::Entertainment => "Entertainment",
            Category::Utilities => "Utilities",
            Category::Healthcare => "Healthcare",
            Category::DiningOut => "Dining Out",
            Category::Shopping => "Shopping",
            Category::Housing => "Housing",
            Category::OtherExpense => "Other Expense",
            Category::Salary => "Salary",
            Category::Freelance => "Freelance",
            Category::Investment => "Investment",
            Category::Gifts => "Gifts",
            Category::OtherIncome => "Other Income",
        }
    }

    /// The transaction type whose subset contains this category.
    pub fn kind(self) -> TransactionType {
        if Self::INCOME.contains(&self) {
            TransactionType::Income
        } else {
            TransactionType::Expense
        }
    }

    pub fn is_expense(self) -> bool {
        self.kind() == TransactionType::Expense
    }

    /// Returns the categories belonging to `kind`.
    pub fn for_kind(kind: TransactionType) -> &'static [Category] {
        match kind {
            TransactionType::Income => &Self::INCOME,
            TransactionType::Expense => &Self::EXPENSE,
        }
    }

    /// Looks up a category by label, ignoring case and surrounding whitespace.
    pub fn from_label(value: &str) -> Option<Category> {
        let needle = value.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|category| category.label().eq_ignore_ascii_case(needle))
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Category {
    type Err = ParseCategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::from_label(s).ok_or_else(|| ParseCategoryError(s.trim().to_string()))
    }
}

/// Raised when a label does not name any known category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseCategoryError(pub String);

impl fmt::Display for ParseCategoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown category `{}`", self.0)
    }
}

impl std::error::Error for ParseCategoryError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subsets_partition_the_taxonomy() {
        assert_eq!(
            Category::EXPENSE.len() + Category::INCOME.len(),
            Category::ALL.len()
        );
        for category in Category::EXPENSE {
            assert_eq!(category.kind(), TransactionType::Expense);
        }
        for category in Category::INCOME {
            assert_eq!(category.kind(), TransactionType::Income);
        }
    }

    #[test]
    fn labels_round_trip_through_serde() {
        let json = serde_json::to_string(&Category::DiningOut).unwrap();
        assert_eq!(json, "\"Dining Out\"");
        let parsed: Category = serde_json::from_str("\"Other Income\"").unwrap();
        assert_eq!(parsed, Category::OtherIncome);
    }

    #[test]
    fn parsing_ignores_case_and_padding() {
        assert_eq!("  dining out ".parse::<Category>(), Ok(Category::DiningOut));
        assert_eq!(
            "Grocery".parse::<Category>(),
            Err(ParseCategoryError("Grocery".into()))
        );
    }
}
