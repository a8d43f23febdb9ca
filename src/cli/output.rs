use std::fmt;

use colored::Colorize;

use budgetwise_core::format::{format_percent, CurrencyFormatter, DateFormatter, LocaleFormatter};
use budgetwise_domain::{
    BudgetGoal, BudgetProgress, CategorySpending, Dashboard, ExpenseShare, FinancialReport,
    KeyMetrics, Transaction,
};

/// Message categories used by the CLI output helpers.
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Info,
    Success,
    Warning,
    Error,
    Section,
}

fn style(kind: MessageKind, message: impl fmt::Display) -> String {
    let text = message.to_string();
    match kind {
        MessageKind::Section => format!("=== {} ===", text.trim()).bold().to_string(),
        MessageKind::Info => format!("INFO: {text}"),
        MessageKind::Success => format!("SUCCESS: [✓] {text}").bright_green().to_string(),
        MessageKind::Warning => format!("WARNING: [!] {text}").bright_yellow().to_string(),
        MessageKind::Error => format!("ERROR: [x] {text}").bright_red().to_string(),
    }
}

pub fn print(kind: MessageKind, message: impl fmt::Display) {
    let formatted = style(kind, message);
    match kind {
        MessageKind::Error | MessageKind::Warning => eprintln!("{}", formatted),
        MessageKind::Section => println!("\n{}", formatted),
        _ => println!("{}", formatted),
    }
}

pub fn info(message: impl fmt::Display) {
    print(MessageKind::Info, message);
}

pub fn success(message: impl fmt::Display) {
    print(MessageKind::Success, message);
}

pub fn warning(message: impl fmt::Display) {
    print(MessageKind::Warning, message);
}

pub fn error(message: impl fmt::Display) {
    print(MessageKind::Error, message);
}

pub fn section(title: impl fmt::Display) {
    print(MessageKind::Section, title);
}

/// Renders read models with the configured locale and currency.
pub struct Renderer {
    formatter: LocaleFormatter,
    currency: String,
}

impl Renderer {
    pub fn new(locale: &str, currency: &str) -> Self {
        Self {
            formatter: LocaleFormatter::for_locale(locale),
            currency: currency.to_string(),
        }
    }

    pub fn money(&self, amount: f64) -> String {
        self.formatter.format_amount(amount, &self.currency)
    }

    fn signed_money(&self, txn: &Transaction) -> String {
        let text = format!("{:>14}", self.money(txn.amount));
        if txn.is_income() {
            text.green().to_string()
        } else {
            text.red().to_string()
        }
    }

    pub fn transactions(&self, transactions: &[Transaction]) {
        if transactions.is_empty() {
            info("No transactions found.");
            return;
        }
        println!(
            "{:<36}  {:<12}  {:<30}  {:<8}  {:<14}  {:>14}",
            "ID", "DATE", "DESCRIPTION", "TYPE", "CATEGORY", "AMOUNT"
        );
        for txn in transactions {
            println!(
                "{:<36}  {:<12}  {:<30}  {:<8}  {:<14}  {}",
                txn.id,
                self.formatter.format_date(txn.date),
                truncate(&txn.description, 30),
                txn.transaction_type,
                txn.category,
                self.signed_money(txn)
            );
        }
    }

    pub fn transaction(&self, verb: &str, txn: &Transaction) {
        success(format!(
            "{verb} {} on {}: {} ({}, {})",
            txn.description,
            self.formatter.format_date(txn.date),
            self.money(txn.amount),
            txn.transaction_type,
            txn.category
        ));
        info(format!("id {}", txn.id));
    }

    pub fn goals(&self, goals: &[BudgetGoal]) {
        if goals.is_empty() {
            info("No budget goals set.");
            return;
        }
        for goal in goals {
            println!("{:<14}  {:>14} / month", goal.category, self.money(goal.amount));
        }
    }

    pub fn progress(&self, rows: &[BudgetProgress]) {
        if rows.is_empty() {
            info("No budget goals set.");
            return;
        }
        for row in rows {
            let bar = progress_bar(row.percent_used, 20);
            let line = format!(
                "{:<14}  [{}] {:>8}  {} of {}  ({} left)",
                row.category,
                bar,
                format_percent(row.percent_used),
                self.money(row.spent),
                self.money(row.budgeted),
                self.money(row.remaining)
            );
            if row.over_budget {
                println!("{}  {}", line.red(), "OVER BUDGET".red().bold());
            } else {
                println!("{}", line);
            }
        }
    }

    pub fn key_metrics(&self, metrics: &KeyMetrics) {
        println!("Total income   : {}", self.money(metrics.total_income).green());
        println!("Total expenses : {}", self.money(metrics.total_expenses).red());
        let net = self.money(metrics.net_balance);
        if metrics.net_balance < 0.0 {
            println!("Net balance    : {}", net.red().bold());
        } else {
            println!("Net balance    : {}", net.bold());
        }
    }

    pub fn category_spending(&self, rows: &[CategorySpending]) {
        for row in rows {
            let budget = row
                .budgeted
                .map(|amount| self.money(amount))
                .unwrap_or_else(|| "-".to_string());
            println!(
                "{:<14}  spent {:>14}  budget {:>14}",
                row.category,
                self.money(row.spent),
                budget
            );
        }
    }

    pub fn distribution(&self, shares: &[ExpenseShare]) {
        if shares.is_empty() {
            info("No expenses recorded.");
            return;
        }
        for share in shares {
            println!(
                "{:<14}  {:>14}  {:>8}",
                share.category,
                self.money(share.amount),
                format_percent(share.share_percent)
            );
        }
    }

    pub fn dashboard(&self, dashboard: &Dashboard) {
        section("Key metrics");
        self.key_metrics(&dashboard.key_metrics);
        section("Budget progress");
        self.progress(&dashboard.budget_progress);
        section("Expense distribution");
        self.distribution(&dashboard.expense_distribution);
        section("Recent transactions");
        self.transactions(&dashboard.recent_transactions);
    }

    pub fn report(&self, report: &FinancialReport) {
        section("Key metrics");
        self.key_metrics(&report.key_metrics);
        section("Monthly trend");
        if report.monthly_trend.is_empty() {
            info("No transactions recorded.");
        }
        for point in &report.monthly_trend {
            println!(
                "{}  income {:>14}  expenses {:>14}  net {:>14}",
                point.month,
                self.money(point.income),
                self.money(point.expenses),
                self.money(point.net)
            );
        }
        section("Spending by category");
        self.category_spending(&report.category_spending);
        section("Expense distribution");
        self.distribution(&report.expense_distribution);
    }
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let mut shortened: String = text.chars().take(width.saturating_sub(1)).collect();
    shortened.push('…');
    shortened
}

fn progress_bar(percent: f64, width: usize) -> String {
    let filled = ((percent / 100.0) * width as f64).round().clamp(0.0, width as f64) as usize;
    format!("{}{}", "#".repeat(filled), "-".repeat(width - filled))
}
