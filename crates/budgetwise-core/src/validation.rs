//! Typed validation of raw form input into domain drafts.
//!
//! Every rejection reason is its own [`ValidationIssue`] variant. Forms collect all
//! issues before failing so callers can report them together.

use std::fmt;

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

use budgetwise_domain::{Category, TransactionDraft, TransactionType};

const SUGGESTION_THRESHOLD: f64 = 0.8;

static DATE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("date pattern compiles"));

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationIssue {
    #[error("{0} is required")]
    MissingField(&'static str),
    #[error("Description is required")]
    MissingDescription,
    #[error("Amount `{0}` is not a number")]
    InvalidAmount(String),
    #[error("Amount must be positive")]
    NonPositiveAmount,
    #[error("Type must be `income` or `expense`, got `{0}`")]
    UnknownType(String),
    #[error("Unknown category `{input}`{}", suggestion_hint(.suggestion))]
    UnknownCategory {
        input: String,
        suggestion: Option<Category>,
    },
    #[error("Category `{category}` cannot be used on {kind} transactions")]
    CategoryTypeMismatch {
        category: Category,
        kind: TransactionType,
    },
    #[error("Date must be in YYYY-MM-DD format")]
    MalformedDate(String),
    #[error("Date `{0}` is not a valid calendar day")]
    InvalidCalendarDate(String),
    #[error("Budget amount must be zero or greater")]
    NegativeBudgetAmount,
    #[error("Unknown sort key `{0}`")]
    UnknownSortKey(String),
    #[error("Sort direction must be `ascending` or `descending`, got `{0}`")]
    UnknownSortDirection(String),
    #[error("Budget goals only apply to expense categories, `{0}` is an income category")]
    IncomeBudgetCategory(Category),
}

fn suggestion_hint(suggestion: &Option<Category>) -> String {
    suggestion
        .map(|category| format!(" (did you mean `{category}`?)"))
        .unwrap_or_default()
}

/// All issues found in one form, in field order.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationErrors(Vec<ValidationIssue>);

impl ValidationErrors {
    pub fn new(issues: Vec<ValidationIssue>) -> Self {
        Self(issues)
    }

    pub fn single(issue: ValidationIssue) -> Self {
        Self(vec![issue])
    }

    pub fn issues(&self) -> &[ValidationIssue] {
        &self.0
    }

    pub fn contains(&self, issue: &ValidationIssue) -> bool {
        self.0.contains(issue)
    }

    pub fn messages(&self) -> Vec<String> {
        self.0.iter().map(ToString::to_string).collect()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return f.write_str("Invalid input.");
        }
        f.write_str(&self.messages().join(", "))
    }
}

impl std::error::Error for ValidationErrors {}

impl From<ValidationIssue> for ValidationErrors {
    fn from(issue: ValidationIssue) -> Self {
        Self::single(issue)
    }
}

/// Raw transaction fields as submitted by a form, CLI flags or JSON body.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransactionForm {
    pub description: String,
    #[serde(deserialize_with = "text_or_number")]
    pub amount: String,
    #[serde(rename = "type")]
    pub transaction_type: String,
    pub category: String,
    pub date: String,
}

impl TransactionForm {
    pub fn validate(&self) -> Result<TransactionDraft, ValidationErrors> {
        let mut issues = Vec::new();

        let description = self.description.trim();
        if description.is_empty() {
            issues.push(ValidationIssue::MissingDescription);
        }

        let amount = match parse_amount(&self.amount) {
            Ok(value) if value > 0.0 => Some(value),
            Ok(_) => {
                issues.push(ValidationIssue::NonPositiveAmount);
                None
            }
            Err(issue) => {
                issues.push(issue);
                None
            }
        };

        let transaction_type = match parse_type(&self.transaction_type) {
            Ok(kind) => Some(kind),
            Err(issue) => {
                issues.push(issue);
                None
            }
        };

        let category = match parse_category(&self.category) {
            Ok(category) => Some(category),
            Err(issue) => {
                issues.push(issue);
                None
            }
        };

        if let (Some(kind), Some(category)) = (transaction_type, category) {
            if category.kind() != kind {
                issues.push(ValidationIssue::CategoryTypeMismatch { category, kind });
            }
        }

        let date = match parse_date(&self.date) {
            Ok(date) => Some(date),
            Err(issue) => {
                issues.push(issue);
                None
            }
        };

        match (amount, transaction_type, category, date) {
            (Some(amount), Some(transaction_type), Some(category), Some(date))
                if issues.is_empty() =>
            {
                Ok(TransactionDraft {
                    date,
                    description: description.to_string(),
                    amount,
                    transaction_type,
                    category,
                })
            }
            _ => Err(ValidationErrors::new(issues)),
        }
    }
}

/// Raw budget goal fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BudgetGoalForm {
    pub category: String,
    #[serde(deserialize_with = "text_or_number")]
    pub amount: String,
}

/// A goal that passed validation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValidGoal {
    pub category: Category,
    pub amount: f64,
}

impl BudgetGoalForm {
    pub fn validate(&self) -> Result<ValidGoal, ValidationErrors> {
        let mut issues = Vec::new();

        let category = match parse_category(&self.category) {
            Ok(category) if category.is_expense() => Some(category),
            Ok(category) => {
                issues.push(ValidationIssue::IncomeBudgetCategory(category));
                None
            }
            Err(issue) => {
                issues.push(issue);
                None
            }
        };

        let amount = match parse_amount(&self.amount) {
            Ok(value) if value >= 0.0 => Some(value),
            Ok(_) => {
                issues.push(ValidationIssue::NegativeBudgetAmount);
                None
            }
            Err(issue) => {
                issues.push(issue);
                None
            }
        };

        match (category, amount) {
            (Some(category), Some(amount)) => Ok(ValidGoal { category, amount }),
            _ => Err(ValidationErrors::new(issues)),
        }
    }
}

/// Parses a category label, suggesting the closest known label on failure.
pub fn parse_category(input: &str) -> Result<Category, ValidationIssue> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(ValidationIssue::MissingField("Category"));
    }
    Category::from_label(trimmed).ok_or_else(|| ValidationIssue::UnknownCategory {
        input: trimmed.to_string(),
        suggestion: closest_category(trimmed),
    })
}

fn closest_category(input: &str) -> Option<Category> {
    let needle = input.to_ascii_lowercase();
    Category::ALL
        .iter()
        .map(|category| {
            let score = strsim::jaro_winkler(&needle, &category.label().to_ascii_lowercase());
            (*category, score)
        })
        .filter(|(_, score)| *score >= SUGGESTION_THRESHOLD)
        .max_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
        .map(|(category, _)| category)
}

pub fn parse_type(input: &str) -> Result<TransactionType, ValidationIssue> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(ValidationIssue::MissingField("Type"));
    }
    trimmed
        .parse()
        .map_err(|_| ValidationIssue::UnknownType(trimmed.to_string()))
}

/// Accepts only zero-padded `YYYY-MM-DD` strings naming a real calendar day.
pub fn parse_date(input: &str) -> Result<NaiveDate, ValidationIssue> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(ValidationIssue::MissingField("Date"));
    }
    if !DATE_PATTERN.is_match(trimmed) {
        return Err(ValidationIssue::MalformedDate(trimmed.to_string()));
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .map_err(|_| ValidationIssue::InvalidCalendarDate(trimmed.to_string()))
}

fn parse_amount(input: &str) -> Result<f64, ValidationIssue> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(ValidationIssue::MissingField("Amount"));
    }
    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(ValidationIssue::InvalidAmount(trimmed.to_string())),
    }
}

fn text_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(f64),
        Text(String),
    }

    Ok(match Option::<Raw>::deserialize(deserializer)? {
        Some(Raw::Number(value)) => value.to_string(),
        Some(Raw::Text(text)) => text,
        None => String::new(),
    })
}
