//! Defensive strategies.

use std::collections::HashMap;

use crate::anatomy::{BodyPart, PartKind};
use crate::error::StrategyError;
use crate::threat::{MAX_SEVERITY, Threat};

use super::StrategyAction;

const SHIELD_BOOST: f64 = 1.5;
const ARMOR_BOOST: f64 = 1.3;
const PROTECTION_CEILING: f64 = 100.0;

/// Defensive behaviors.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum DefenseAction {
    /// Scales shield strength by 1.5, capped at 100.
    EmergencyShields,
    /// Evasive movement; validated only.
    EvasiveManeuver,
    /// Scales armor by 1.3, capped at 100. Critical parts only.
    ReinforceCriticalSystems,
    /// Scales shield strength by `severity / 10`, capped at 100.
    DistributeShieldPower,
}

impl StrategyAction for DefenseAction {
    fn name(&self) -> &'static str {
        match self {
            Self::EmergencyShields => "emergency_shields",
            Self::EvasiveManeuver => "evasive_maneuver",
            Self::ReinforceCriticalSystems => "reinforce_critical_systems",
            Self::DistributeShieldPower => "distribute_shield_power",
        }
    }

    fn apply(&self, part: &BodyPart, threat: &Threat) -> Result<(), StrategyError> {
        match self {
            Self::EmergencyShields => {
                let shield = part.modify_protection(|p| {
                    p.shield_strength = (p.shield_strength * SHIELD_BOOST).min(PROTECTION_CEILING);
                    p.shield_strength
                });
                tracing::debug!(target: "agent::defense", part = part.name(), shield, "Emergency shields up");
            }
            Self::EvasiveManeuver => {
                tracing::debug!(
                    target: "agent::defense",
                    part = part.name(),
                    threat = %threat.id,
                    "Evasive maneuver plotted"
                );
            }
            Self::ReinforceCriticalSystems => {
                if !part.is_critical() {
                    return Err(StrategyError::InvalidOperation {
                        action: self.name(),
                        reason: format!("{} is not a critical part", part.name()),
                    });
                }
                let armor = part.modify_protection(|p| {
                    p.armor_rating = (p.armor_rating * ARMOR_BOOST).min(PROTECTION_CEILING);
                    p.armor_rating
                });
                tracing::debug!(target: "agent::defense", part = part.name(), armor, "Critical systems reinforced");
            }
            Self::DistributeShieldPower => {
                let multiplier = f64::from(threat.severity.min(MAX_SEVERITY)) / 10.0;
                let shield = part.modify_protection(|p| {
                    p.shield_strength = (p.shield_strength * multiplier).min(PROTECTION_CEILING);
                    p.shield_strength
                });
                tracing::debug!(target: "agent::defense", part = part.name(), shield, "Shield power redistributed");
            }
        }
        Ok(())
    }
}

/// A prioritized defensive strategy. Lower priority is more urgent.
#[derive(Clone, Debug, PartialEq)]
pub struct DefenseStrategy {
    pub priority: u8,
    pub action: DefenseAction,
    pub description: &'static str,
}

impl DefenseStrategy {
    const fn new(priority: u8, action: DefenseAction, description: &'static str) -> Self {
        Self {
            priority,
            action,
            description,
        }
    }

    pub fn execute(&self, part: &BodyPart, threat: &Threat) -> Result<(), StrategyError> {
        self.action.apply(part, threat)
    }
}

/// Read-only table of defensive strategies per part category.
#[derive(Clone, Debug)]
pub struct DefenseCatalog {
    strategies: HashMap<PartKind, Vec<DefenseStrategy>>,
}

impl DefenseCatalog {
    pub fn new() -> Self {
        use DefenseAction::*;

        let standard = || {
            vec![
                DefenseStrategy::new(1, EmergencyShields, "Standard shield activation"),
                DefenseStrategy::new(2, EvasiveManeuver, "Basic evasive movement"),
            ]
        };

        let mut strategies = HashMap::new();
        strategies.insert(
            PartKind::Head,
            vec![
                DefenseStrategy::new(
                    1,
                    EmergencyShields,
                    "Emergency shield activation for critical head protection",
                ),
                DefenseStrategy::new(2, EvasiveManeuver, "Rapid evasive movement to protect head"),
            ],
        );
        strategies.insert(
            PartKind::Body,
            vec![
                DefenseStrategy::new(
                    1,
                    ReinforceCriticalSystems,
                    "Reinforcing critical system protection",
                ),
                DefenseStrategy::new(2, DistributeShieldPower, "Optimizing shield distribution"),
            ],
        );
        strategies.insert(PartKind::Arm, standard());
        strategies.insert(PartKind::Leg, standard());

        Self { strategies }
    }

    /// Strategies registered for the part's category, in priority order.
    pub fn strategies(&self, part: &BodyPart) -> &[DefenseStrategy] {
        self.strategies
            .get(&part.kind())
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}

impl Default for DefenseCatalog {
    fn default() -> Self {
        Self::new()
    }
}
