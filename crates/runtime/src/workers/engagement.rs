//! Periodic combat against the active threat.

use std::sync::Arc;

use tokio::time::Duration;
use tracing::{debug, info, warn};

use crate::api::CombatAction;
use crate::processor::Shared;

use super::{ShutdownSignal, ticker};

/// Asks the oracle for a combat decision each tick and carries it out.
pub(crate) struct EngagementWorker {
    shared: Arc<Shared>,
    period: Duration,
    weapons: Vec<String>,
}

impl EngagementWorker {
    pub(crate) fn new(shared: Arc<Shared>) -> Self {
        let period = shared.config.engagement_interval;
        let weapons = shared.offense.available_weapons();
        Self {
            shared,
            period,
            weapons,
        }
    }

    pub(crate) async fn run(self, mut shutdown: ShutdownSignal) {
        info!(target: "runtime::engagement", period_ms = self.period.as_millis() as u64, "Engagement worker started");
        let mut ticker = ticker(self.period);

        loop {
            tokio::select! {
                biased;
                _ = shutdown.fired() => break,
                _ = ticker.tick() => {
                    tokio::select! {
                        biased;
                        _ = shutdown.fired() => break,
                        _ = self.tick() => {}
                    }
                }
            }
        }

        info!(target: "runtime::engagement", "Engagement worker stopped");
    }

    async fn tick(&self) {
        let Some((location, threat)) = self.shared.engagement_target() else {
            return;
        };
        let health = self.shared.anatomy.health_status();

        let decision = match self
            .shared
            .oracle
            .make_combat_decision(location, &threat, &health, &self.weapons)
            .await
        {
            Ok(decision) => decision,
            Err(error) => {
                self.shared.metrics.record_oracle_failure();
                warn!(target: "runtime::oracle", threat = %threat.id, %error, "Combat decision failed");
                return;
            }
        };

        self.shared.metrics.record_decision();
        info!(
            target: "runtime::oracle",
            threat = %threat.id,
            action = ?decision.action,
            weapon = %decision.weapon,
            confidence = decision.confidence,
            explanation = %decision.explanation,
            "Combat decision"
        );

        let delta_secs = self.period.as_secs_f64();
        match decision.action {
            CombatAction::Move => self.shared.advance(&threat, delta_secs),
            CombatAction::Attack => self.shared.resolve_attack(&threat.id, &decision.weapon),
            CombatAction::Defend => self.shared.defend(&threat),
            CombatAction::Retreat => self.shared.retreat(&threat, delta_secs),
            CombatAction::Unrecognized => {
                debug!(target: "runtime::engagement", threat = %threat.id, "Unrecognized action; holding position");
            }
        }
    }
}
