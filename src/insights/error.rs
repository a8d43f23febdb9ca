//! Failure types for insight generation.

use std::{fmt, time::Duration};

use thiserror::Error;

/// Classification of generator failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeneratorErrorKind {
    /// No API key or endpoint is available.
    NotConfigured,
    /// Connection failed, reset or timed out at the transport level.
    Network,
    RateLimited,
    ClientError,
    ServerError,
    /// The endpoint answered with something other than a chat completion.
    ParseError,
}

impl fmt::Display for GeneratorErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GeneratorErrorKind::NotConfigured => write!(f, "Not configured"),
            GeneratorErrorKind::Network => write!(f, "Network error"),
            GeneratorErrorKind::RateLimited => write!(f, "Rate limited"),
            GeneratorErrorKind::ClientError => write!(f, "Client error"),
            GeneratorErrorKind::ServerError => write!(f, "Server error"),
            GeneratorErrorKind::ParseError => write!(f, "Parse error"),
        }
    }
}

/// Error raised by an [`InsightGenerator`](super::InsightGenerator).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", describe(.kind, .status_code, .message))]
pub struct GeneratorError {
    pub kind: GeneratorErrorKind,
    pub status_code: Option<u16>,
    pub message: String,
}

impl GeneratorError {
    pub fn not_configured(message: impl Into<String>) -> Self {
        Self::new(GeneratorErrorKind::NotConfigured, None, message)
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::new(GeneratorErrorKind::Network, None, message)
    }

    pub fn parse(message: impl Into<String>) -> Self {
        Self::new(GeneratorErrorKind::ParseError, None, message)
    }

    pub fn from_status(status: u16, body: impl Into<String>) -> Self {
        Self::new(classify_http_status(status), Some(status), body)
    }

    fn new(
        kind: GeneratorErrorKind,
        status_code: Option<u16>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            status_code,
            message: message.into(),
        }
    }
}

fn describe(kind: &GeneratorErrorKind, status_code: &Option<u16>, message: &str) -> String {
    match (*kind, *status_code) {
        (GeneratorErrorKind::NotConfigured, _) => message.to_string(),
        (kind, Some(code)) => format!("{kind} (HTTP {code}): {message}"),
        (kind, None) => format!("{kind}: {message}"),
    }
}

/// Maps an HTTP status to a failure kind.
pub fn classify_http_status(status: u16) -> GeneratorErrorKind {
    match status {
        429 => GeneratorErrorKind::RateLimited,
        400..=499 => GeneratorErrorKind::ClientError,
        _ => GeneratorErrorKind::ServerError,
    }
}

/// Outcome of a failed insight request.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InsightError {
    #[error("Invalid input for AI insights: {} required", .missing.join(", "))]
    InvalidInput { missing: Vec<&'static str> },
    #[error("{0}")]
    Upstream(#[from] GeneratorError),
    #[error("AI insights request timed out after {}s", .0.as_secs())]
    TimedOut(Duration),
    #[error("AI insights request was cancelled")]
    Cancelled,
    #[error("AI insights response was malformed: {0}")]
    MalformedOutput(String),
}
