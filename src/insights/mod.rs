//! AI budget insights: schema-checked input, a templated prompt and one generator call
//! bounded by a timeout and a cancellation token.

mod client;
mod error;

pub use client::ChatCompletionsGenerator;
pub use error::{classify_http_status, GeneratorError, GeneratorErrorKind, InsightError};

use std::{sync::Arc, time::Duration};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;

use budgetwise_config::InsightsSettings;
use budgetwise_domain::{BudgetGoal, Transaction};

/// Produces raw text for a prompt. Implementations make a single attempt.
#[async_trait]
pub trait InsightGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, GeneratorError>;
}

/// The three text fields an insight request is built from.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct InsightInput {
    /// JSON-encoded array of transactions.
    pub transactions: String,
    /// JSON-encoded array of budget goals.
    pub budget_goals: String,
    /// Free text such as "end of the month".
    pub timeline: String,
}

impl InsightInput {
    pub fn new(
        transactions: impl Into<String>,
        budget_goals: impl Into<String>,
        timeline: impl Into<String>,
    ) -> Self {
        Self {
            transactions: transactions.into(),
            budget_goals: budget_goals.into(),
            timeline: timeline.into(),
        }
    }

    /// Serializes store snapshots the same way the dashboard assistant sends them.
    pub fn from_snapshots(
        transactions: &[Transaction],
        goals: &[BudgetGoal],
        timeline: impl Into<String>,
    ) -> Result<Self, serde_json::Error> {
        Ok(Self::new(
            serde_json::to_string(transactions)?,
            serde_json::to_string(goals)?,
            timeline,
        ))
    }

    pub fn validate(&self) -> Result<(), InsightError> {
        let missing: Vec<&'static str> = [
            ("transactions", &self.transactions),
            ("budgetGoals", &self.budget_goals),
            ("timeline", &self.timeline),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name)
        .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(InsightError::InvalidInput { missing })
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsightOutput {
    pub insights: String,
}

/// Embeds the three input fields verbatim.
pub fn build_prompt(input: &InsightInput) -> String {
    format!(
        "You are an AI Budget Assistant that provides personalized spending insights and \
recommendations to help users achieve their financial targets. Analyze the user's transactions \
and budget goals to provide actionable advice.

Transactions: {}
Budget Goals: {}
Timeline: {}

Based on this information, provide spending insights and personalized recommendations to \
achieve budget goals by the specified timeline. Focus on specific categories where spending can \
be reduced.

Respond with a JSON object of the form {{\"insights\": \"<your advice>\"}} and nothing else.",
        input.transactions, input.budget_goals, input.timeline
    )
}

/// Checks generator text against the `{"insights": <non-empty string>}` contract.
pub fn parse_output(raw: &str) -> Result<InsightOutput, InsightError> {
    let body = strip_code_fence(raw.trim());
    let output: InsightOutput = serde_json::from_str(body)
        .map_err(|err| InsightError::MalformedOutput(err.to_string()))?;
    if output.insights.trim().is_empty() {
        return Err(InsightError::MalformedOutput("`insights` is empty".into()));
    }
    Ok(output)
}

fn strip_code_fence(text: &str) -> &str {
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    rest.strip_suffix("```").unwrap_or(rest).trim()
}

/// Runs insight requests against a generator with a per-request timeout.
#[derive(Clone)]
pub struct InsightService {
    generator: Arc<dyn InsightGenerator>,
    timeout: Duration,
}

impl InsightService {
    pub fn new(generator: Arc<dyn InsightGenerator>, timeout: Duration) -> Self {
        Self { generator, timeout }
    }

    /// `None` when no API key is configured.
    pub fn from_settings(settings: &InsightsSettings) -> Option<Self> {
        let generator = ChatCompletionsGenerator::from_settings(settings)?;
        Some(Self::new(
            Arc::new(generator),
            Duration::from_secs(settings.timeout_secs),
        ))
    }

    pub async fn request(
        &self,
        input: &InsightInput,
        cancel: &CancellationToken,
    ) -> Result<InsightOutput, InsightError> {
        input.validate()?;
        let prompt = build_prompt(input);

        let raw = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(InsightError::Cancelled),
            outcome = tokio::time::timeout(self.timeout, self.generator.generate(&prompt)) => {
                match outcome {
                    Ok(result) => result?,
                    Err(_) => return Err(InsightError::TimedOut(self.timeout)),
                }
            }
        };

        parse_output(&raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_names_every_blank_field() {
        let input = InsightInput::new("[]", "  ", "");
        assert_eq!(
            input.validate(),
            Err(InsightError::InvalidInput {
                missing: vec!["budgetGoals", "timeline"]
            })
        );
        assert!(InsightInput::new("[]", "[]", "end of month").validate().is_ok());
    }

    #[test]
    fn prompt_embeds_fields_verbatim() {
        let input = InsightInput::new(
            r#"[{"amount":75.5}]"#,
            r#"[{"category":"Groceries"}]"#,
            "end of month",
        );
        let prompt = build_prompt(&input);
        assert!(prompt.contains(r#"Transactions: [{"amount":75.5}]"#));
        assert!(prompt.contains(r#"Budget Goals: [{"category":"Groceries"}]"#));
        assert!(prompt.contains("Timeline: end of month"));
        assert!(prompt.contains(r#"{"insights": "<your advice>"}"#));
    }

    #[test]
    fn parse_output_accepts_fenced_json() {
        let fenced = "```json\n{\"insights\": \"Cut dining out.\"}\n```";
        assert_eq!(parse_output(fenced).unwrap().insights, "Cut dining out.");
        assert_eq!(
            parse_output("{\"insights\":\"Spend less\"}").unwrap().insights,
            "Spend less"
        );
    }

    #[test]
    fn parse_output_rejects_schema_violations() {
        assert!(matches!(
            parse_output("just some prose"),
            Err(InsightError::MalformedOutput(_))
        ));
        assert!(matches!(
            parse_output("{\"insights\": \"  \"}"),
            Err(InsightError::MalformedOutput(_))
        ));
        assert!(matches!(
            parse_output("{\"advice\": \"x\"}"),
            Err(InsightError::MalformedOutput(_))
        ));
    }

    #[test]
    fn input_uses_camel_case_on_the_wire() {
        let input: InsightInput =
            serde_json::from_str(r#"{"transactions":"[]","budgetGoals":"[]","timeline":"Q3"}"#)
                .unwrap();
        assert_eq!(input.budget_goals, "[]");
    }
}
