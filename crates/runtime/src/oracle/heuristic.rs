//! Rule-based oracle that answers without a model server.

use async_trait::async_trait;

use agent_core::{Location, OffenseCatalog, Threat};

use crate::api::{
    CombatAction, CombatDecision, DecisionOracle, EngagementDecision, HealthSnapshot, OracleError,
};

/// Threats at or above this severity are always engaged.
const HIGH_SEVERITY: u8 = 6;
/// Medium threats are engaged inside this radius.
const MEDIUM_SEVERITY: u8 = 3;
const MEDIUM_ENGAGE_RADIUS: f64 = 30.0;
/// Any part below this health percentage triggers a retreat.
const RETREAT_HEALTH: f64 = 20.0;
/// Slack around the engagement distance considered "in position".
const POSITION_TOLERANCE: f64 = 1.0;

/// Fixed engagement rules over the offense catalog's weapon ranges.
#[derive(Clone, Debug)]
pub struct HeuristicOracle {
    offense: OffenseCatalog,
    engagement_distance: f64,
}

impl HeuristicOracle {
    pub fn new(engagement_distance: f64) -> Self {
        Self {
            offense: OffenseCatalog::new(),
            engagement_distance,
        }
    }

    /// Highest-priority offered weapon whose range covers `distance`.
    fn weapon_in_range(&self, weapons: &[String], distance: f64) -> Option<String> {
        weapons
            .iter()
            .filter_map(|name| self.offense.strategy_for(name))
            .filter(|strategy| strategy.range >= distance)
            .min_by_key(|strategy| strategy.priority)
            .map(|strategy| strategy.action.to_string())
    }
}

impl Default for HeuristicOracle {
    fn default() -> Self {
        Self::new(20.0)
    }
}

#[async_trait]
impl DecisionOracle for HeuristicOracle {
    async fn make_combat_decision(
        &self,
        location: Location,
        threat: &Threat,
        health: &HealthSnapshot,
        weapons: &[String],
    ) -> Result<CombatDecision, OracleError> {
        let distance = location.distance(threat.location);

        if health.values().any(|percent| *percent < RETREAT_HEALTH) {
            return Ok(CombatDecision::new(CombatAction::Retreat)
                .with_explanation("structural integrity critical"));
        }

        let weapon = self.weapon_in_range(weapons, distance);
        let approaching = distance > self.engagement_distance + POSITION_TOLERANCE;

        let decision = match weapon {
            Some(weapon) if !approaching || threat.severity >= HIGH_SEVERITY => {
                CombatDecision::attack(&threat.id, weapon)
                    .with_explanation(format!("target in range at {distance:.1} m"))
            }
            _ if approaching => CombatDecision::new(CombatAction::Move)
                .with_explanation(format!("closing to engagement distance from {distance:.1} m")),
            _ => CombatDecision::new(CombatAction::Defend)
                .with_explanation("no weapon covers the target"),
        };

        Ok(CombatDecision {
            target: threat.id.clone(),
            ..decision
        })
    }

    async fn should_engage_proactively(
        &self,
        threat: &Threat,
        location: Location,
        _health: &HealthSnapshot,
    ) -> Result<EngagementDecision, OracleError> {
        if threat.severity >= HIGH_SEVERITY {
            return Ok(EngagementDecision::new(true, "high severity threat"));
        }

        let distance = threat.location.distance(location);
        if distance < MEDIUM_ENGAGE_RADIUS && threat.severity >= MEDIUM_SEVERITY {
            return Ok(EngagementDecision::new(true, "medium severity threat within range"));
        }

        Ok(EngagementDecision::new(false, "threat below engagement criteria"))
    }
}
