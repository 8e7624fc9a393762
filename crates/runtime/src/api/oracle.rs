//! Asynchronous abstraction over the external decision service.
//!
//! The processor consults a [`DecisionOracle`] for two verdicts: whether a
//! freshly scanned threat is worth engaging, and what to do next while a
//! threat is active. Implementations may call a remote model, apply local
//! rules, or replay scripted fixtures.
use std::collections::BTreeMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use agent_core::{Location, Threat};

use super::errors::OracleError;

/// Part name → health percentage.
pub type HealthSnapshot = BTreeMap<String, f64>;

/// Tactical action requested by the oracle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CombatAction {
    Move,
    Attack,
    Defend,
    Retreat,
    /// Anything else the oracle answered; handled as a no-op.
    #[serde(other)]
    Unrecognized,
}

/// Structured verdict for the engagement loop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombatDecision {
    pub action: CombatAction,
    #[serde(default)]
    pub target: String,
    #[serde(default)]
    pub weapon: String,
    /// 1 to 10.
    #[serde(default)]
    pub priority: u8,
    /// 0 to 1.
    #[serde(default)]
    pub confidence: f64,
    #[serde(default)]
    pub explanation: String,
}

impl CombatDecision {
    pub fn new(action: CombatAction) -> Self {
        Self {
            action,
            target: String::new(),
            weapon: String::new(),
            priority: 5,
            confidence: 1.0,
            explanation: String::new(),
        }
    }

    pub fn attack(target: impl Into<String>, weapon: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            weapon: weapon.into(),
            ..Self::new(CombatAction::Attack)
        }
    }

    pub fn with_explanation(mut self, explanation: impl Into<String>) -> Self {
        self.explanation = explanation.into();
        self
    }
}

/// Verdict on whether to engage a scanned threat.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngagementDecision {
    pub should_engage: bool,
    #[serde(default)]
    pub confidence: f64,
    #[serde(default)]
    pub explanation: String,
}

impl EngagementDecision {
    pub fn new(should_engage: bool, explanation: impl Into<String>) -> Self {
        Self {
            should_engage,
            confidence: 1.0,
            explanation: explanation.into(),
        }
    }
}

/// External decision service.
#[async_trait]
pub trait DecisionOracle: Send + Sync {
    /// Chooses the next tactical action against the active threat.
    async fn make_combat_decision(
        &self,
        location: Location,
        threat: &Threat,
        health: &HealthSnapshot,
        weapons: &[String],
    ) -> Result<CombatDecision, OracleError>;

    /// Decides whether a scanned threat should become the active target.
    async fn should_engage_proactively(
        &self,
        threat: &Threat,
        location: Location,
        health: &HealthSnapshot,
    ) -> Result<EngagementDecision, OracleError>;
}
