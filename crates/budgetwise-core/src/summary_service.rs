//! Aggregation over transaction snapshots. Every function here is pure and total.

use std::{cmp::Ordering, collections::BTreeMap};

use budgetwise_domain::{
    BudgetGoal, Category, CategorySpending, Dashboard, ExpenseShare, FinancialReport, KeyMetrics,
    MonthlyTrendPoint, Transaction,
};

use crate::BudgetService;

pub struct SummaryService;

impl SummaryService {
    /// Totals per transaction type. Amounts are summed as given.
    pub fn key_metrics(transactions: &[Transaction]) -> KeyMetrics {
        let (total_income, total_expenses) =
            transactions.iter().fold((0.0, 0.0), |(income, expenses), txn| {
                if txn.is_income() {
                    (income + txn.amount, expenses)
                } else {
                    (income, expenses + txn.amount)
                }
            });
        KeyMetrics {
            total_income,
            total_expenses,
            net_balance: total_income - total_expenses,
        }
    }

    /// Spent-vs-budget rows for every category that has a goal or at least one expense.
    ///
    /// Rows are ordered by budgeted amount descending (no goal counts as 0), then by
    /// spent descending. The sort is stable, so remaining ties keep goal order followed
    /// by first-expense order.
    pub fn category_spending(
        transactions: &[Transaction],
        goals: &[BudgetGoal],
    ) -> Vec<CategorySpending> {
        let spent = expense_totals(transactions);

        let mut categories: Vec<Category> = Vec::new();
        for category in goals
            .iter()
            .map(|goal| goal.category)
            .chain(spent.iter().map(|(category, _)| *category))
        {
            if !categories.contains(&category) {
                categories.push(category);
            }
        }

        let mut rows: Vec<CategorySpending> = categories
            .into_iter()
            .map(|category| CategorySpending {
                category,
                spent: spent
                    .iter()
                    .find(|(candidate, _)| *candidate == category)
                    .map(|(_, total)| *total)
                    .unwrap_or(0.0),
                budgeted: goals
                    .iter()
                    .find(|goal| goal.category == category)
                    .map(|goal| goal.amount),
            })
            .collect();

        rows.sort_by(|a, b| {
            descending(a.budgeted.unwrap_or(0.0), b.budgeted.unwrap_or(0.0))
                .then_with(|| descending(a.spent, b.spent))
        });
        rows
    }

    /// Income, expenses and net per `YYYY-MM`, ascending by month.
    pub fn monthly_trend(transactions: &[Transaction]) -> Vec<MonthlyTrendPoint> {
        let mut months: BTreeMap<String, (f64, f64)> = BTreeMap::new();
        for txn in transactions {
            let entry = months.entry(txn.month_key()).or_insert((0.0, 0.0));
            if txn.is_income() {
                entry.0 += txn.amount;
            } else {
                entry.1 += txn.amount;
            }
        }
        months
            .into_iter()
            .map(|(month, (income, expenses))| MonthlyTrendPoint {
                month,
                income,
                expenses,
                net: income - expenses,
            })
            .collect()
    }

    /// Expense totals per category with their share of all expenses.
    pub fn expense_distribution(transactions: &[Transaction]) -> Vec<ExpenseShare> {
        let totals = expense_totals(transactions);
        let grand_total: f64 = totals.iter().map(|(_, amount)| amount).sum();

        let mut shares: Vec<ExpenseShare> = totals
            .into_iter()
            .map(|(category, amount)| ExpenseShare {
                category,
                amount,
                share_percent: if grand_total > 0.0 {
                    amount / grand_total * 100.0
                } else {
                    0.0
                },
            })
            .collect();
        shares.sort_by(|a, b| descending(a.amount, b.amount));
        shares
    }

    /// The `limit` most recent transactions, newest first.
    pub fn recent(transactions: &[Transaction], limit: usize) -> Vec<Transaction> {
        let mut ordered = transactions.to_vec();
        ordered.sort_by(|a, b| b.date.cmp(&a.date));
        ordered.truncate(limit);
        ordered
    }

    pub fn dashboard(
        transactions: &[Transaction],
        goals: &[BudgetGoal],
        recent_limit: usize,
    ) -> Dashboard {
        let category_spending = Self::category_spending(transactions, goals);
        Dashboard {
            key_metrics: Self::key_metrics(transactions),
            budget_progress: BudgetService::progress(&category_spending),
            category_spending,
            expense_distribution: Self::expense_distribution(transactions),
            recent_transactions: Self::recent(transactions, recent_limit),
        }
    }

    pub fn report(transactions: &[Transaction], goals: &[BudgetGoal]) -> FinancialReport {
        FinancialReport {
            key_metrics: Self::key_metrics(transactions),
            monthly_trend: Self::monthly_trend(transactions),
            expense_distribution: Self::expense_distribution(transactions),
            category_spending: Self::category_spending(transactions, goals),
        }
    }
}

/// Expense sums per category in first-appearance order.
fn expense_totals(transactions: &[Transaction]) -> Vec<(Category, f64)> {
    let mut totals: Vec<(Category, f64)> = Vec::new();
    for txn in transactions.iter().filter(|txn| txn.is_expense()) {
        match totals.iter_mut().find(|(category, _)| *category == txn.category) {
            Some((_, total)) => *total += txn.amount,
            None => totals.push((txn.category, txn.amount)),
        }
    }
    totals
}

fn descending(a: f64, b: f64) -> Ordering {
    b.partial_cmp(&a).unwrap_or(Ordering::Equal)
}
