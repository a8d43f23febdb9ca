//! OpenAI-compatible chat completions client used to generate insights.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use budgetwise_config::InsightsSettings;

use super::{error::GeneratorError, InsightGenerator};

const SYSTEM_PROMPT: &str = "You are an AI Budget Assistant. Reply with a single JSON object.";

/// Posts one non-streaming chat completion per prompt.
pub struct ChatCompletionsGenerator {
    client: Client,
    endpoint: String,
    model: String,
    api_key: String,
}

impl ChatCompletionsGenerator {
    pub fn new(
        endpoint: impl Into<String>,
        model: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.into(),
            model: model.into(),
            api_key: api_key.into(),
        }
    }

    /// Builds a generator when the configured API key variable is set.
    pub fn from_settings(settings: &InsightsSettings) -> Option<Self> {
        let api_key = settings.api_key()?;
        Some(Self::new(&settings.endpoint, &settings.model, api_key))
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    response_format: ResponseFormat,
    stream: bool,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

#[async_trait]
impl InsightGenerator for ChatCompletionsGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, GeneratorError> {
        let request = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
            response_format: ResponseFormat {
                kind: "json_object",
            },
            stream: false,
        };

        let response = match self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) if e.is_timeout() => {
                return Err(GeneratorError::network(format!("Request timeout: {}", e)))
            }
            Err(e) if e.is_connect() => {
                return Err(GeneratorError::network(format!("Connection failed: {}", e)))
            }
            Err(e) => return Err(GeneratorError::network(format!("Request failed: {}", e))),
        };

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| GeneratorError::network(format!("Failed to read response: {}", e)))?;

        if !status.is_success() {
            tracing::warn!(
                status = status.as_u16(),
                model = %self.model,
                "insight generator rejected request"
            );
            return Err(GeneratorError::from_status(status.as_u16(), body));
        }

        let parsed: ChatResponse = serde_json::from_str(&body)
            .map_err(|e| GeneratorError::parse(format!("Failed to parse response: {}", e)))?;

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or_else(|| GeneratorError::parse("No content in response"))
    }
}
