//! Demonstration data set for a fresh install.

use chrono::NaiveDate;

use budgetwise_domain::{Category, Ledger, TransactionDraft, TransactionType};

const IN: TransactionType = TransactionType::Income;
const OUT: TransactionType = TransactionType::Expense;

const TRANSACTIONS: &[(&str, &str, f64, TransactionType, Category)] = &[
    ("2024-07-01", "Salary Deposit", 3000.0, IN, Category::Salary),
    ("2024-07-01", "Rent Payment", 1200.0, OUT, Category::Housing),
    ("2024-07-02", "Groceries at SuperMart", 75.5, OUT, Category::Groceries),
    ("2024-07-03", "Dinner with Friends", 55.0, OUT, Category::DiningOut),
    ("2024-07-04", "Movie Tickets", 25.0, OUT, Category::Entertainment),
    ("2024-07-05", "Gasoline for Car", 40.0, OUT, Category::Transport),
    ("2024-07-08", "Electricity Bill", 85.2, OUT, Category::Utilities),
    ("2024-07-10", "Online Course Subscription", 20.0, OUT, Category::OtherExpense),
    ("2024-07-12", "Freelance Project Payment", 500.0, IN, Category::Freelance),
    ("2024-07-15", "New T-shirt", 30.0, OUT, Category::Shopping),
];

const GOALS: &[(Category, f64)] = &[
    (Category::Groceries, 300.0),
    (Category::DiningOut, 150.0),
    (Category::Entertainment, 100.0),
    (Category::Transport, 100.0),
    (Category::Shopping, 200.0),
    (Category::Utilities, 150.0),
    (Category::Housing, 1200.0),
];

/// Drafts for the sample transactions, in insertion order.
pub fn sample_drafts() -> Vec<TransactionDraft> {
    TRANSACTIONS
        .iter()
        .filter_map(|(date, description, amount, kind, category)| {
            Some(TransactionDraft {
                date: NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()?,
                description: (*description).to_string(),
                amount: *amount,
                transaction_type: *kind,
                category: *category,
            })
        })
        .collect()
}

pub fn sample_goals() -> Vec<(Category, f64)> {
    GOALS.to_vec()
}

/// A ledger holding the complete sample data set.
pub fn sample_ledger() -> Ledger {
    let mut ledger = Ledger::new();
    for draft in sample_drafts() {
        ledger.add_transaction(draft);
    }
    for (category, amount) in sample_goals() {
        ledger.upsert_goal(category, amount);
    }
    ledger
}
