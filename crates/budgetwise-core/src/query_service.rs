//! Filtering and ordering of transaction snapshots.

use std::{cmp::Ordering, fmt, str::FromStr};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use budgetwise_domain::{Category, Transaction, TransactionType};

use crate::validation::{parse_category, parse_date, parse_type, ValidationErrors, ValidationIssue};

/// Filter value that disables the category predicate.
pub const ALL_CATEGORIES: &str = "_all_categories_";
/// Filter value that disables the type predicate.
pub const ALL_TYPES: &str = "_all_types_";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    Description,
    Category,
    Amount,
    Date,
    Type,
}

impl FromStr for SortKey {
    type Err = ValidationIssue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "description" => Ok(SortKey::Description),
            "category" => Ok(SortKey::Category),
            "amount" => Ok(SortKey::Amount),
            "date" => Ok(SortKey::Date),
            "type" => Ok(SortKey::Type),
            other => Err(ValidationIssue::UnknownSortKey(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl FromStr for SortDirection {
    type Err = ValidationIssue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ascending" | "asc" => Ok(SortDirection::Ascending),
            "descending" | "desc" => Ok(SortDirection::Descending),
            other => Err(ValidationIssue::UnknownSortDirection(other.to_string())),
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortDirection::Ascending => f.write_str("ascending"),
            SortDirection::Descending => f.write_str("descending"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    pub key: SortKey,
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn new(key: SortKey, direction: SortDirection) -> Self {
        Self { key, direction }
    }

    pub fn reversed(self) -> Self {
        let direction = match self.direction {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        };
        Self { direction, ..self }
    }
}

impl Default for SortSpec {
    /// Newest first.
    fn default() -> Self {
        Self::new(SortKey::Date, SortDirection::Descending)
    }
}

/// Typed filter and sort configuration. Every `None` predicate is inactive.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransactionQuery {
    pub search: Option<String>,
    pub category: Option<Category>,
    pub transaction_type: Option<TransactionType>,
    pub start_date: Option<NaiveDate>,
    /// Inclusive calendar day.
    pub end_date: Option<NaiveDate>,
    pub sort: SortSpec,
}

impl TransactionQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    pub fn category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    pub fn transaction_type(mut self, kind: TransactionType) -> Self {
        self.transaction_type = Some(kind);
        self
    }

    pub fn between(mut self, start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        self.start_date = start;
        self.end_date = end;
        self
    }

    pub fn sorted_by(mut self, key: SortKey, direction: SortDirection) -> Self {
        self.sort = SortSpec::new(key, direction);
        self
    }

    /// True when the record satisfies every active predicate.
    pub fn matches(&self, txn: &Transaction) -> bool {
        if let Some(term) = self.search.as_deref().filter(|term| !term.is_empty()) {
            if !txn
                .description
                .to_lowercase()
                .contains(&term.to_lowercase())
            {
                return false;
            }
        }
        if self.category.is_some_and(|category| txn.category != category) {
            return false;
        }
        if self
            .transaction_type
            .is_some_and(|kind| txn.transaction_type != kind)
        {
            return false;
        }
        if self.start_date.is_some_and(|start| txn.date < start) {
            return false;
        }
        // Strictly before the day after `end`.
        if let Some(end) = self.end_date {
            if let Some(next_day) = end.succ_opt() {
                if txn.date >= next_day {
                    return false;
                }
            }
        }
        true
    }
}

/// String-typed query options as they arrive from a query string or CLI flags.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TransactionQueryParams {
    pub search: Option<String>,
    pub category: Option<String>,
    #[serde(rename = "type")]
    pub transaction_type: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub sort_key: Option<String>,
    pub sort_direction: Option<String>,
}

impl TransactionQueryParams {
    pub fn into_query(self) -> Result<TransactionQuery, ValidationErrors> {
        let mut issues = Vec::new();
        let mut query = TransactionQuery {
            search: active(self.search.as_deref(), &[]).map(str::to_string),
            ..TransactionQuery::default()
        };

        if let Some(raw) = active(self.category.as_deref(), &[ALL_CATEGORIES, "all"]) {
            match parse_category(raw) {
                Ok(category) => query.category = Some(category),
                Err(issue) => issues.push(issue),
            }
        }
        if let Some(raw) = active(self.transaction_type.as_deref(), &[ALL_TYPES, "all"]) {
            match parse_type(raw) {
                Ok(kind) => query.transaction_type = Some(kind),
                Err(issue) => issues.push(issue),
            }
        }
        for (raw, slot) in [
            (self.start_date.as_deref(), &mut query.start_date),
            (self.end_date.as_deref(), &mut query.end_date),
        ] {
            if let Some(raw) = active(raw, &[]) {
                match parse_date(raw) {
                    Ok(date) => *slot = Some(date),
                    Err(issue) => issues.push(issue),
                }
            }
        }

        let default = SortSpec::default();
        let key = match active(self.sort_key.as_deref(), &[]) {
            Some(raw) => raw.parse().unwrap_or_else(|issue| {
                issues.push(issue);
                default.key
            }),
            None => default.key,
        };
        let direction = match active(self.sort_direction.as_deref(), &[]) {
            Some(raw) => raw.parse().unwrap_or_else(|issue| {
                issues.push(issue);
                default.direction
            }),
            None => default.direction,
        };
        query.sort = SortSpec::new(key, direction);

        if issues.is_empty() {
            Ok(query)
        } else {
            Err(ValidationErrors::new(issues))
        }
    }
}

fn active<'a>(raw: Option<&'a str>, sentinels: &[&str]) -> Option<&'a str> {
    raw.map(str::trim)
        .filter(|value| !value.is_empty())
        .filter(|value| !sentinels.iter().any(|s| value.eq_ignore_ascii_case(s)))
}

pub struct QueryService;

impl QueryService {
    /// Filters then stably sorts a copy of `transactions`. The input is left untouched.
    pub fn apply(transactions: &[Transaction], query: &TransactionQuery) -> Vec<Transaction> {
        let mut selected: Vec<Transaction> = transactions
            .iter()
            .filter(|txn| query.matches(txn))
            .cloned()
            .collect();
        Self::sort(&mut selected, query.sort);
        selected
    }

    pub fn sort(transactions: &mut [Transaction], spec: SortSpec) {
        transactions.sort_by(|a, b| {
            let ordering = compare(a, b, spec.key);
            match spec.direction {
                SortDirection::Ascending => ordering,
                SortDirection::Descending => ordering.reverse(),
            }
        });
    }

    /// Default listing: date descending, ties in store order.
    pub fn newest_first(transactions: &[Transaction]) -> Vec<Transaction> {
        let mut ordered = transactions.to_vec();
        Self::sort(&mut ordered, SortSpec::default());
        ordered
    }
}

fn compare(a: &Transaction, b: &Transaction, key: SortKey) -> Ordering {
    match key {
        SortKey::Description => a.description.cmp(&b.description),
        SortKey::Category => a.category.label().cmp(b.category.label()),
        SortKey::Amount => a.amount.partial_cmp(&b.amount).unwrap_or(Ordering::Equal),
        SortKey::Date => a.date.cmp(&b.date),
        SortKey::Type => a.transaction_type.as_str().cmp(b.transaction_type.as_str()),
    }
}
