use std::hint::black_box;

use budgetwise_core::{
    sample::{sample_drafts, sample_goals},
    QueryService, SortDirection, SortKey, SummaryService, TransactionQuery,
};
use budgetwise_domain::{BudgetGoal, Category, Ledger, Transaction, TransactionType};
use chrono::Duration;
use criterion::{criterion_group, criterion_main, Criterion};

const RECORDS: usize = 10_000;

/// Repeats the sample transactions across consecutive days.
fn ledger_with(records: usize) -> Ledger {
    let mut ledger = Ledger::new();
    let drafts = sample_drafts();
    for index in 0..records {
        let mut draft = drafts[index % drafts.len()].clone();
        draft.date += Duration::days((index / drafts.len()) as i64);
        draft.amount += (index % 97) as f64;
        ledger.add_transaction(draft);
    }
    for (category, amount) in sample_goals() {
        ledger.upsert_goal(category, amount);
    }
    ledger
}

fn bench_aggregation(c: &mut Criterion) {
    let ledger = ledger_with(RECORDS);
    let transactions: &[Transaction] = &ledger.transactions;
    let goals: &[BudgetGoal] = &ledger.budget_goals;

    c.bench_function("summary.dashboard_10k", |b| {
        b.iter(|| SummaryService::dashboard(black_box(transactions), black_box(goals), 5))
    });
    c.bench_function("summary.report_10k", |b| {
        b.iter(|| SummaryService::report(black_box(transactions), black_box(goals)))
    });
}

fn bench_query(c: &mut Criterion) {
    let ledger = ledger_with(RECORDS);
    let transactions: &[Transaction] = &ledger.transactions;
    let filtered = TransactionQuery::new()
        .search("at")
        .category(Category::Groceries)
        .transaction_type(TransactionType::Expense)
        .sorted_by(SortKey::Amount, SortDirection::Ascending);
    let everything =
        TransactionQuery::new().sorted_by(SortKey::Description, SortDirection::Descending);

    c.bench_function("query.filtered_10k", |b| {
        b.iter(|| QueryService::apply(black_box(transactions), &filtered))
    });
    c.bench_function("query.sort_all_10k", |b| {
        b.iter(|| QueryService::apply(black_box(transactions), &everything))
    });
}

criterion_group!(benches, bench_aggregation, bench_query);
criterion_main!(benches);
