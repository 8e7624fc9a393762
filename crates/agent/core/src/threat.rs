//! Hostile entities tracked by the agent.

use chrono::{DateTime, Utc};

use crate::spatial::Location;

/// Health every threat starts with.
pub const THREAT_MAX_HEALTH: f64 = 100.0;

/// Highest severity a threat can carry.
pub const MAX_SEVERITY: u8 = 9;

/// An external entity the agent may engage.
///
/// Only combat resolution mutates a threat, and only its health.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Threat {
    pub id: String,
    pub kind: String,
    pub description: String,
    pub location: Location,
    /// 1 (low) to 9 (critical).
    pub severity: u8,
    /// 0 to 100.
    pub health: f64,
    pub detected_at: DateTime<Utc>,
}

impl Threat {
    /// Creates a full-health threat detected now. Severity is clamped to 1..=9.
    pub fn new(
        id: impl Into<String>,
        kind: impl Into<String>,
        location: Location,
        severity: u8,
    ) -> Self {
        Self {
            id: id.into(),
            kind: kind.into(),
            description: String::new(),
            location,
            severity: severity.clamp(1, MAX_SEVERITY),
            health: THREAT_MAX_HEALTH,
            detected_at: Utc::now(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_health(mut self, health: f64) -> Self {
        self.health = health.clamp(0.0, THREAT_MAX_HEALTH);
        self
    }

    /// Reduces health, clamped at zero, and returns the damage dealt.
    pub fn apply_damage(&mut self, damage: f64) -> f64 {
        if damage <= 0.0 || damage.is_nan() {
            return 0.0;
        }
        let dealt = damage.min(self.health);
        self.health = (self.health - dealt).max(0.0);
        dealt
    }

    pub fn is_eliminated(&self) -> bool {
        self.health <= 0.0
    }
}
