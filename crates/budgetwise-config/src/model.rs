use std::{env, path::PathBuf};

use serde::{Deserialize, Serialize};

use crate::ConfigError;

pub const HOME_ENV: &str = "BUDGETWISE_HOME";
pub const HOST_ENV: &str = "BUDGETWISE_HOST";
pub const PORT_ENV: &str = "BUDGETWISE_PORT";
pub const INSIGHTS_ENDPOINT_ENV: &str = "BUDGETWISE_INSIGHTS_ENDPOINT";
pub const INSIGHTS_MODEL_ENV: &str = "BUDGETWISE_INSIGHTS_MODEL";
pub const INSIGHTS_TIMEOUT_ENV: &str = "BUDGETWISE_INSIGHTS_TIMEOUT_SECS";

/// Stores user preferences plus server and insight settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub locale: String,
    pub currency: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Optional custom data directory. Defaults to `$BUDGETWISE_HOME` or `~/.budgetwise`.
    pub data_dir: Option<PathBuf>,

    #[serde(default = "Config::default_recent_limit")]
    pub recent_transactions_limit: usize,

    #[serde(default)]
    pub server: ServerSettings,

    #[serde(default)]
    pub insights: InsightsSettings,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            locale: "en-US".into(),
            currency: "USD".into(),
            data_dir: None,
            recent_transactions_limit: Self::default_recent_limit(),
            server: ServerSettings::default(),
            insights: InsightsSettings::default(),
        }
    }
}

impl Config {
    pub fn default_recent_limit() -> usize {
        5
    }

    /// Root for the config file and the data file.
    pub fn resolve_data_dir(&self) -> PathBuf {
        if let Some(path) = &self.data_dir {
            return path.clone();
        }
        default_data_dir()
    }

    /// Applies `BUDGETWISE_*` overrides from the process environment.
    pub fn apply_env(&mut self) -> Result<(), ConfigError> {
        self.apply_overrides(|key| env::var(key).ok())
    }

    /// Applies overrides from `lookup`, which maps a variable name to its value.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let value = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        if let Some(host) = value(HOST_ENV) {
            self.server.host = host.trim().to_string();
        }
        if let Some(port) = value(PORT_ENV) {
            self.server.port = port
                .trim()
                .parse()
                .map_err(|err| ConfigError::InvalidValue(PORT_ENV.into(), format!("{}", err)))?;
        }
        if let Some(endpoint) = value(INSIGHTS_ENDPOINT_ENV) {
            self.insights.endpoint = endpoint.trim().to_string();
        }
        if let Some(model) = value(INSIGHTS_MODEL_ENV) {
            self.insights.model = model.trim().to_string();
        }
        if let Some(timeout) = value(INSIGHTS_TIMEOUT_ENV) {
            let secs: u64 = timeout.trim().parse().map_err(|err| {
                ConfigError::InvalidValue(INSIGHTS_TIMEOUT_ENV.into(), format!("{}", err))
            })?;
            if secs == 0 {
                return Err(ConfigError::InvalidValue(
                    INSIGHTS_TIMEOUT_ENV.into(),
                    "timeout must be at least one second".into(),
                ));
            }
            self.insights.timeout_secs = secs;
        }
        Ok(())
    }
}

/// `$BUDGETWISE_HOME` when set, otherwise `~/.budgetwise`.
pub fn default_data_dir() -> PathBuf {
    if let Some(home) = env::var_os(HOME_ENV).filter(|value| !value.is_empty()) {
        return PathBuf::from(home);
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".budgetwise")
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".into(),
            port: 9002,
        }
    }
}

impl ServerSettings {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Settings for the chat-completions endpoint used to generate insights.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsightsSettings {
    pub endpoint: String,
    pub model: String,
    /// Name of the environment variable holding the API key. The key is never persisted.
    pub api_key_env: String,
    #[serde(default = "InsightsSettings::default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for InsightsSettings {
    fn default() -> Self {
        Self {
            endpoint: "https://generativelanguage.googleapis.com/v1beta/openai/chat/completions"
                .into(),
            model: "gemini-2.0-flash".into(),
            api_key_env: "BUDGETWISE_INSIGHTS_API_KEY".into(),
            timeout_secs: Self::default_timeout_secs(),
        }
    }
}

impl InsightsSettings {
    pub fn default_timeout_secs() -> u64 {
        30
    }

    /// Reads the API key from the configured environment variable.
    pub fn api_key(&self) -> Option<String> {
        env::var(&self.api_key_env)
            .ok()
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty())
    }
}
