use chrono::NaiveDate;

use crate::{
    sample::{sample_drafts, sample_ledger},
    BudgetService, InMemoryStore, QueryService, SortDirection, SortKey, SortSpec, SummaryService,
    TransactionQuery, TransactionStore,
};
use budgetwise_domain::{
    BudgetGoal, Category, KeyMetrics, Transaction, TransactionDraft, TransactionType,
};

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn txn(
    date: NaiveDate,
    description: &str,
    amount: f64,
    kind: TransactionType,
    category: Category,
) -> Transaction {
    Transaction::new(TransactionDraft {
        date,
        description: description.into(),
        amount,
        transaction_type: kind,
        category,
    })
}

fn scenario_one() -> Vec<Transaction> {
    vec![
        txn(day(2024, 7, 1), "Salary", 3000.0, TransactionType::Income, Category::Salary),
        txn(day(2024, 7, 1), "Rent", 1200.0, TransactionType::Expense, Category::Housing),
        txn(day(2024, 7, 2), "Groceries", 75.5, TransactionType::Expense, Category::Groceries),
    ]
}

fn sample_transactions() -> Vec<Transaction> {
    sample_drafts().into_iter().map(Transaction::new).collect()
}

#[test]
fn key_metrics_of_empty_set_are_zero() {
    assert_eq!(SummaryService::key_metrics(&[]), KeyMetrics::default());
}

#[test]
fn key_metrics_for_salary_rent_and_groceries() {
    let metrics = SummaryService::key_metrics(&scenario_one());
    assert_eq!(metrics.total_income, 3000.0);
    assert_eq!(metrics.total_expenses, 1275.5);
    assert_eq!(metrics.net_balance, 1724.5);
}

#[test]
fn net_balance_is_income_minus_expenses_for_every_prefix() {
    let all = sample_transactions();
    for end in 0..=all.len() {
        let metrics = SummaryService::key_metrics(&all[..end]);
        assert_eq!(
            metrics.net_balance,
            metrics.total_income - metrics.total_expenses
        );
    }
}

#[test]
fn category_spending_keeps_goals_without_spend_and_omits_idle_categories() {
    let goals = vec![
        BudgetGoal::new(Category::Groceries, 300.0),
        BudgetGoal::new(Category::Healthcare, 50.0),
    ];
    let rows = SummaryService::category_spending(&scenario_one(), &goals);

    let categories: Vec<Category> = rows.iter().map(|row| row.category).collect();
    assert_eq!(
        categories,
        vec![Category::Groceries, Category::Healthcare, Category::Housing]
    );
    let healthcare = &rows[1];
    assert_eq!(healthcare.spent, 0.0);
    assert_eq!(healthcare.budgeted, Some(50.0));
    let housing = &rows[2];
    assert_eq!(housing.budgeted, None);
    assert_eq!(housing.spent, 1200.0);

    for row in &rows {
        assert!(row.spent != 0.0 || goals.iter().any(|goal| goal.category == row.category));
        assert_ne!(row.category, Category::Salary);
    }
}

#[test]
fn category_spending_is_sorted_by_budget_then_spent() {
    let ledger = sample_ledger();
    let mut transactions = ledger.transactions.clone();
    transactions.push(txn(
        day(2024, 7, 20),
        "Pharmacy",
        60.0,
        TransactionType::Expense,
        Category::Healthcare,
    ));
    let rows = SummaryService::category_spending(&transactions, &ledger.budget_goals);

    for pair in rows.windows(2) {
        let (a, b) = (&pair[0], &pair[1]);
        let (budget_a, budget_b) = (a.budgeted.unwrap_or(0.0), b.budgeted.unwrap_or(0.0));
        assert!(budget_a >= budget_b);
        if budget_a == budget_b {
            assert!(a.spent >= b.spent);
        }
    }
    assert_eq!(rows[0].category, Category::Housing);
    // Dining Out and Utilities share a 150 budget; higher spend first.
    let utilities = rows.iter().position(|r| r.category == Category::Utilities).unwrap();
    let dining = rows.iter().position(|r| r.category == Category::DiningOut).unwrap();
    assert!(utilities < dining);
}

#[test]
fn groceries_progress_matches_progress_bar() {
    let goals = vec![BudgetGoal::new(Category::Groceries, 300.0)];
    let rows = SummaryService::category_spending(&scenario_one(), &goals);
    let groceries = rows
        .iter()
        .find(|row| row.category == Category::Groceries)
        .unwrap();
    assert_eq!(groceries.spent, 75.5);
    assert_eq!(groceries.budgeted, Some(300.0));

    let progress = BudgetService::progress(&rows);
    assert_eq!(progress.len(), 1);
    assert!((progress[0].percent_used - 25.1666).abs() < 0.001);
    assert!(!progress[0].over_budget);
    assert_eq!(progress[0].remaining, 224.5);
}

#[test]
fn progress_is_capped_at_one_hundred_percent() {
    let transactions = vec![txn(
        day(2024, 7, 3),
        "Banquet",
        400.0,
        TransactionType::Expense,
        Category::DiningOut,
    )];
    let goals = vec![
        BudgetGoal::new(Category::DiningOut, 150.0),
        BudgetGoal::new(Category::Shopping, 0.0),
    ];
    let progress = BudgetService::goal_progress(&goals, &transactions);

    assert_eq!(progress[0].percent_used, 100.0);
    assert!(progress[0].over_budget);
    assert_eq!(progress[0].remaining, -250.0);
    assert_eq!(progress[1].percent_used, 0.0);
    assert!(!progress[1].over_budget);
}

#[test]
fn monthly_trend_groups_by_month_in_ascending_order() {
    let mut transactions = scenario_one();
    transactions.push(txn(
        day(2024, 6, 28),
        "Bonus",
        200.0,
        TransactionType::Income,
        Category::Gifts,
    ));
    transactions.push(txn(
        day(2023, 12, 5),
        "Gift",
        80.0,
        TransactionType::Expense,
        Category::Shopping,
    ));

    let trend = SummaryService::monthly_trend(&transactions);
    let months: Vec<&str> = trend.iter().map(|point| point.month.as_str()).collect();
    assert_eq!(months, vec!["2023-12", "2024-06", "2024-07"]);

    let july = &trend[2];
    assert_eq!(july.income, 3000.0);
    assert_eq!(july.expenses, 1275.5);
    assert_eq!(july.net, 1724.5);
    assert_eq!(trend[0].net, -80.0);
}

#[test]
fn expense_distribution_shares_sum_to_one_hundred() {
    let distribution = SummaryService::expense_distribution(&sample_transactions());
    assert_eq!(distribution[0].category, Category::Housing);
    let total: f64 = distribution.iter().map(|share| share.share_percent).sum();
    assert!((total - 100.0).abs() < 1e-9);
    assert!(distribution.iter().all(|share| share.category.is_expense()));
    assert!(SummaryService::expense_distribution(&[]).is_empty());
}

#[test]
fn dashboard_limits_recent_transactions() {
    let ledger = sample_ledger();
    let dashboard = SummaryService::dashboard(&ledger.transactions, &ledger.budget_goals, 5);

    assert_eq!(dashboard.recent_transactions.len(), 5);
    assert_eq!(dashboard.recent_transactions[0].description, "New T-shirt");
    assert_eq!(dashboard.key_metrics.total_income, 3500.0);
    assert_eq!(dashboard.budget_progress.len(), 7);
}

#[test]
fn type_filter_keeps_only_salary() {
    let query = TransactionQuery::new().transaction_type(TransactionType::Income);
    let result = QueryService::apply(&scenario_one(), &query);
    assert_eq!(result.len(), 1);
    assert_eq!(result[0].category, Category::Salary);
}

#[test]
fn category_filter_keeps_only_that_category() {
    let mut transactions = scenario_one();
    transactions.push(txn(
        day(2024, 7, 9),
        "Farmers market",
        20.0,
        TransactionType::Expense,
        Category::Groceries,
    ));
    let query = TransactionQuery::new().category(Category::Groceries);
    let result = QueryService::apply(&transactions, &query);
    assert_eq!(result.len(), 2);
    assert!(result.iter().all(|t| t.category == Category::Groceries));
}

#[test]
fn start_date_alone_drops_earlier_rows() {
    let query = TransactionQuery::new().between(Some(day(2024, 7, 8)), None);
    let result = QueryService::apply(&sample_transactions(), &query);
    let dates: Vec<NaiveDate> = result.iter().map(|t| t.date).collect();
    assert_eq!(result.len(), 4);
    assert!(dates.contains(&day(2024, 7, 8)));
    assert!(dates.iter().all(|date| *date >= day(2024, 7, 8)));
}

#[test]
fn filtering_is_idempotent() {
    let query = TransactionQuery::new()
        .search("e")
        .transaction_type(TransactionType::Expense)
        .between(Some(day(2024, 7, 2)), Some(day(2024, 7, 10)))
        .sorted_by(SortKey::Amount, SortDirection::Ascending);
    let once = QueryService::apply(&sample_transactions(), &query);
    let twice = QueryService::apply(&once, &query);
    assert_eq!(once, twice);
}

#[test]
fn end_date_is_inclusive_and_search_ignores_case() {
    let query = TransactionQuery::new()
        .search("SUPERMART")
        .between(Some(day(2024, 7, 2)), Some(day(2024, 7, 2)));
    let result = QueryService::apply(&sample_transactions(), &query);
    assert_eq!(result.len(), 1);
    assert_eq!(result[0].description, "Groceries at SuperMart");
}

#[test]
fn reversing_distinct_keys_reverses_sequence() {
    let transactions = sample_transactions();
    for key in [SortKey::Description, SortKey::Amount] {
        let ascending = SortSpec::new(key, SortDirection::Ascending);
        let up = QueryService::apply(
            &transactions,
            &TransactionQuery::new().sorted_by(key, ascending.direction),
        );
        let mut down = QueryService::apply(
            &transactions,
            &TransactionQuery::new().sorted_by(key, ascending.reversed().direction),
        );
        down.reverse();
        assert_eq!(up, down);
    }
}

#[test]
fn ties_keep_snapshot_order_in_both_directions() {
    let transactions = scenario_one();
    for direction in [SortDirection::Ascending, SortDirection::Descending] {
        let sorted = QueryService::apply(
            &transactions,
            &TransactionQuery::new().sorted_by(SortKey::Date, direction),
        );
        let salary = sorted.iter().position(|t| t.description == "Salary").unwrap();
        let rent = sorted.iter().position(|t| t.description == "Rent").unwrap();
        assert!(salary < rent);
    }
}

#[test]
fn apply_does_not_mutate_snapshot() {
    let store = InMemoryStore::from_ledger(sample_ledger());
    let snapshot = store.transactions().unwrap();
    let before = snapshot.clone();
    let _ = QueryService::apply(
        &snapshot,
        &TransactionQuery::new().sorted_by(SortKey::Category, SortDirection::Descending),
    );
    assert_eq!(snapshot, before);
}

#[test]
fn newest_first_is_default_listing() {
    let listed = QueryService::newest_first(&sample_transactions());
    assert_eq!(listed[0].date, day(2024, 7, 15));
    assert_eq!(listed.last().unwrap().date, day(2024, 7, 1));
    // Same-day records stay in insertion order.
    assert_eq!(listed[8].description, "Salary Deposit");
    assert_eq!(listed[9].description, "Rent Payment");
}
