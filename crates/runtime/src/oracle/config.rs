//! Oracle endpoint configuration.

use std::env;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "http://localhost:11434";
pub const DEFAULT_MODEL: &str = "llama3.2";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Where and how to reach the decision model.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OracleConfig {
    pub base_url: String,
    pub model: String,
    pub request_timeout: Duration,
}

impl Default for OracleConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl OracleConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `OLLAMA_BASE_URL` - Endpoint root (default: `http://localhost:11434`)
    /// - `OLLAMA_MODEL` - Model identifier (default: `llama3.2`)
    /// - `OLLAMA_TIMEOUT_SECS` - Per-request timeout (default: 30)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(url) = read_non_empty("OLLAMA_BASE_URL") {
            config.base_url = url.trim_end_matches('/').to_string();
        }

        if let Some(model) = read_non_empty("OLLAMA_MODEL") {
            config.model = model;
        }

        if let Some(secs) = read_non_empty("OLLAMA_TIMEOUT_SECS").and_then(|v| v.parse::<u64>().ok())
        {
            config.request_timeout = Duration::from_secs(secs.max(1));
        }

        config
    }

    pub(crate) fn generate_url(&self) -> String {
        format!("{}/api/generate", self.base_url)
    }
}

fn read_non_empty(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}
