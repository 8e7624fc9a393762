//! Ollama generate-API client.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

use agent_core::{Location, Threat};

use super::config::OracleConfig;
use super::prompt::{clean_response, combat_prompt, engagement_prompt};
use crate::api::{CombatDecision, DecisionOracle, EngagementDecision, HealthSnapshot, OracleError};

/// Request body for `/api/generate`.
#[derive(Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
    format: &'a str,
}

/// Response from `/api/generate` with `stream: false`.
#[derive(Deserialize)]
struct GenerateResponse {
    response: String,
}

/// Decision oracle backed by an Ollama-compatible model server.
#[derive(Clone)]
pub struct OllamaOracle {
    client: reqwest::Client,
    config: OracleConfig,
}

impl OllamaOracle {
    pub fn new(config: OracleConfig) -> Result<Self, OracleError> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| OracleError::communication(config.base_url.clone(), e))?;

        Ok(Self { client, config })
    }

    pub fn from_env() -> Result<Self, OracleError> {
        Self::new(OracleConfig::from_env())
    }

    pub fn config(&self) -> &OracleConfig {
        &self.config
    }

    /// Sends a prompt and decodes the model's JSON answer into `T`.
    async fn generate<T: DeserializeOwned>(&self, prompt: &str) -> Result<T, OracleError> {
        let url = self.config.generate_url();
        let body = GenerateRequest {
            model: &self.config.model,
            prompt,
            stream: false,
            format: "json",
        };

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| OracleError::communication(url.clone(), e))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| OracleError::communication(url.clone(), e))?;

        if !status.is_success() {
            return Err(OracleError::Status {
                status: status.as_u16(),
                body: text,
            });
        }

        debug!(target: "runtime::oracle", model = %self.config.model, "Oracle response: {}", text);
        decode_generate_response(&text)
    }
}

/// Decodes the outer generate envelope, then the decision inside it.
fn decode_generate_response<T: DeserializeOwned>(text: &str) -> Result<T, OracleError> {
    let envelope: GenerateResponse =
        serde_json::from_str(text).map_err(|source| OracleError::Decode {
            raw: text.to_string(),
            source,
        })?;

    let cleaned = clean_response(&envelope.response);
    serde_json::from_str(cleaned).map_err(|source| OracleError::Decode {
        raw: cleaned.to_string(),
        source,
    })
}

#[async_trait]
impl DecisionOracle for OllamaOracle {
    async fn make_combat_decision(
        &self,
        location: Location,
        threat: &Threat,
        health: &HealthSnapshot,
        weapons: &[String],
    ) -> Result<CombatDecision, OracleError> {
        let prompt = combat_prompt(location, threat, health, weapons);
        let decision: CombatDecision = self.generate(&prompt).await?;

        debug!(
            target: "runtime::oracle",
            action = ?decision.action,
            confidence = decision.confidence,
            model = %self.config.model,
            "Model combat decision: {}",
            decision.explanation
        );
        Ok(decision)
    }

    async fn should_engage_proactively(
        &self,
        threat: &Threat,
        location: Location,
        health: &HealthSnapshot,
    ) -> Result<EngagementDecision, OracleError> {
        let prompt = engagement_prompt(threat, location, health);
        let decision: EngagementDecision = self.generate(&prompt).await?;

        debug!(
            target: "runtime::oracle",
            threat = %threat.id,
            should_engage = decision.should_engage,
            confidence = decision.confidence,
            model = %self.config.model,
            "Model engagement decision: {}",
            decision.explanation
        );
        Ok(decision)
    }
}
