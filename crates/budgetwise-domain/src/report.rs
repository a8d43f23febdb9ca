//! Derived figures recomputed from ledger snapshots. Never persisted.

use serde::{Deserialize, Serialize};

use crate::{category::Category, transaction::Transaction};

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyMetrics {
    pub total_income: f64,
    pub total_expenses: f64,
    pub net_balance: f64,
}

/// Spent-vs-budget figures for one category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorySpending {
    pub category: Category,
    pub spent: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budgeted: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyTrendPoint {
    /// Zero-padded `YYYY-MM`.
    pub month: String,
    pub income: f64,
    pub expenses: f64,
    pub net: f64,
}

/// One slice of the expense distribution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseShare {
    pub category: Category,
    pub amount: f64,
    pub share_percent: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetProgress {
    pub category: Category,
    pub spent: f64,
    pub budgeted: f64,
    pub remaining: f64,
    /// Capped at 100.
    pub percent_used: f64,
    pub over_budget: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    pub key_metrics: KeyMetrics,
    pub category_spending: Vec<CategorySpending>,
    pub budget_progress: Vec<BudgetProgress>,
    pub expense_distribution: Vec<ExpenseShare>,
    pub recent_transactions: Vec<Transaction>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialReport {
    pub key_metrics: KeyMetrics,
    pub monthly_trend: Vec<MonthlyTrendPoint>,
    pub expense_distribution: Vec<ExpenseShare>,
    pub category_spending: Vec<CategorySpending>,
}
