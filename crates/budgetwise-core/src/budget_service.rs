use budgetwise_domain::{BudgetGoal, BudgetProgress, Category, CategorySpending, Transaction};

pub struct BudgetService;

impl BudgetService {
    /// Progress rows for every spending entry that carries a positive budget.
    pub fn progress(category_spending: &[CategorySpending]) -> Vec<BudgetProgress> {
        category_spending
            .iter()
            .filter_map(|row| match row.budgeted {
                Some(budgeted) if budgeted > 0.0 => {
                    Some(measure(row.category, row.spent, budgeted))
                }
                _ => None,
            })
            .collect()
    }

    /// Progress for each goal in goal order, including zero-amount goals.
    pub fn goal_progress(
        goals: &[BudgetGoal],
        transactions: &[Transaction],
    ) -> Vec<BudgetProgress> {
        goals
            .iter()
            .map(|goal| {
                let spent = Self::spent_in(goal.category, transactions);
                measure(goal.category, spent, goal.amount)
            })
            .collect()
    }

    pub fn spent_in(category: Category, transactions: &[Transaction]) -> f64 {
        transactions
            .iter()
            .filter(|txn| txn.is_expense() && txn.category == category)
            .map(|txn| txn.amount)
            .sum()
    }

    /// `min(spent / budgeted * 100, 100)`, or 0 when nothing is budgeted.
    pub fn percent_used(spent: f64, budgeted: f64) -> f64 {
        if budgeted > 0.0 {
            (spent / budgeted * 100.0).min(100.0)
        } else {
            0.0
        }
    }
}

fn measure(category: Category, spent: f64, budgeted: f64) -> BudgetProgress {
    BudgetProgress {
        category,
        spent,
        budgeted,
        remaining: budgeted - spent,
        percent_used: BudgetService::percent_used(spent, budgeted),
        over_budget: spent > budgeted,
    }
}
