//! State shared between the processor handle and its workers.
//!
//! Two locks guard the mutable engagement data: `engagement` (location and
//! active threat) and `status` (active flag, mode, last scan). When both are
//! needed they are taken in that order. Neither is ever held across an
//! `.await`, and body-part locks live inside the anatomy, independent of both.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use agent_core::{
    Anatomy, BodyPart, DefenseCatalog, Location, OffenseCatalog, OperationMode, StrategyError,
    Threat,
};

use crate::api::{DecisionOracle, ProcessorError, Result, StateViolation, ThreatScanner};
use crate::events::{CombatEvent, Event, EventBus, MovementEvent, StatusEvent, ThreatEvent};
use crate::workers::ProcessorMetrics;

use super::config::ProcessorConfig;

/// Point-in-time view of the processor's status.
#[derive(Debug, Clone, PartialEq)]
pub struct Status {
    /// True between `start()` and `stop()`.
    pub active: bool,
    pub mode: OperationMode,
    /// Completion time of the most recent scan sweep.
    pub last_scan: Option<DateTime<Utc>>,
}

#[derive(Debug)]
struct Engagement {
    location: Location,
    active_threat: Option<Threat>,
}

impl Engagement {
    fn is_target(&self, threat_id: &str) -> bool {
        self.active_threat
            .as_ref()
            .is_some_and(|active| active.id == threat_id)
    }
}

pub(crate) struct Shared {
    pub(crate) config: ProcessorConfig,
    pub(crate) anatomy: Arc<Anatomy>,
    pub(crate) offense: OffenseCatalog,
    pub(crate) defense: DefenseCatalog,
    pub(crate) oracle: Arc<dyn DecisionOracle>,
    pub(crate) scanner: Arc<dyn ThreatScanner>,
    pub(crate) events: EventBus,
    pub(crate) metrics: ProcessorMetrics,
    engagement: Mutex<Engagement>,
    status: RwLock<Status>,
}

impl Shared {
    pub(crate) fn new(
        config: ProcessorConfig,
        oracle: Arc<dyn DecisionOracle>,
        scanner: Arc<dyn ThreatScanner>,
    ) -> Result<Self> {
        let anatomy = Arc::new(Anatomy::new()?);
        let events = EventBus::with_capacity(config.event_buffer_size);
        let engagement = Engagement {
            location: config.start_location,
            active_threat: None,
        };

        Ok(Self {
            config,
            anatomy,
            offense: OffenseCatalog::new(),
            defense: DefenseCatalog::new(),
            oracle,
            scanner,
            events,
            metrics: ProcessorMetrics::new(),
            engagement: Mutex::new(engagement),
            status: RwLock::new(Status {
                active: false,
                mode: OperationMode::Normal,
                last_scan: None,
            }),
        })
    }

    fn lock_engagement(&self) -> MutexGuard<'_, Engagement> {
        self.engagement.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn read_status(&self) -> RwLockReadGuard<'_, Status> {
        self.status.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_status(&self) -> RwLockWriteGuard<'_, Status> {
        self.status.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn publish_all(&self, events: impl IntoIterator<Item = Event>) {
        for event in events {
            self.events.publish(event);
        }
    }

    // ------------------------------------------------------------------
    // Snapshots
    // ------------------------------------------------------------------

    pub(crate) fn status(&self) -> Status {
        self.read_status().clone()
    }

    pub(crate) fn is_active(&self) -> bool {
        self.read_status().active
    }

    pub(crate) fn set_active(&self, active: bool) {
        self.write_status().active = active;
    }

    pub(crate) fn location(&self) -> Location {
        self.lock_engagement().location
    }

    pub(crate) fn active_threat(&self) -> Option<Threat> {
        self.lock_engagement().active_threat.clone()
    }

    /// Location and active threat under one lock, or `None` when idle.
    pub(crate) fn engagement_target(&self) -> Option<(Location, Threat)> {
        let engagement = self.lock_engagement();
        let threat = engagement.active_threat.clone()?;
        Some((engagement.location, threat))
    }

    pub(crate) fn record_scan(&self) {
        self.write_status().last_scan = Some(Utc::now());
    }

    // ------------------------------------------------------------------
    // Threat acquisition and loss
    // ------------------------------------------------------------------

    /// Makes `threat` the active target and runs the acquisition strategies.
    ///
    /// Replaces any target already engaged. Fails without mutating anything
    /// when the processor is not active.
    pub(crate) fn acquire(&self, threat: Threat) -> Result<()> {
        let mut events = Vec::new();
        {
            let mut engagement = self.lock_engagement();
            let mut status = self.write_status();
            if !status.active {
                return Err(ProcessorError::invalid_state(StateViolation::NotActive));
            }

            if let Some(previous) = engagement.active_threat.replace(threat.clone())
                && previous.id != threat.id
            {
                info!(
                    target: "runtime::processor",
                    previous = %previous.id,
                    next = %threat.id,
                    "Switching target"
                );
            }

            events.push(Event::Threat(ThreatEvent::Acquired {
                threat: threat.clone(),
            }));
            events.extend(transition(&mut status, OperationMode::Combat));
        }

        info!(
            target: "runtime::processor",
            threat = %threat.id,
            severity = threat.severity,
            "Target acquired"
        );
        self.publish_all(events);

        self.run_acquisition_strategies(&threat);
        Ok(())
    }

    /// Defense for every critical part, then offense for each arm, then
    /// offense for the body. Failures are logged and skipped.
    fn run_acquisition_strategies(&self, threat: &Threat) {
        for part in self.anatomy.critical_parts() {
            for strategy in self.defense.strategies(&part) {
                self.log_strategy(strategy.description, &part, strategy.execute(&part, threat));
            }
        }

        let attackers = self
            .anatomy
            .arms()
            .iter()
            .chain(std::iter::once(self.anatomy.body()));
        for part in attackers {
            for strategy in self.offense.strategies(part) {
                self.log_strategy(strategy.description, part, strategy.execute(part, threat));
            }
        }
    }

    fn log_strategy(
        &self,
        description: &str,
        part: &BodyPart,
        outcome: std::result::Result<(), StrategyError>,
    ) -> bool {
        match outcome {
            Ok(()) => {
                info!(
                    target: "runtime::strategy",
                    strategy = description,
                    part = part.name(),
                    success = true,
                    "Strategy executed"
                );
                true
            }
            Err(error) => {
                self.metrics.record_strategy_failure();
                warn!(
                    target: "runtime::strategy",
                    strategy = description,
                    part = part.name(),
                    success = false,
                    %error,
                    "Strategy failed"
                );
                false
            }
        }
    }

    /// Drops the active threat after an empty scan.
    pub(crate) fn clear_lost_threat(&self) {
        let mut events = Vec::new();
        {
            let mut engagement = self.lock_engagement();
            let Some(lost) = engagement.active_threat.take() else {
                return;
            };
            let mut status = self.write_status();

            info!(target: "runtime::processor", threat = %lost.id, "Threat lost");
            events.push(Event::Threat(ThreatEvent::Lost { threat_id: lost.id }));
            events.extend(transition(&mut status, OperationMode::Normal));
        }
        self.publish_all(events);
    }

    // ------------------------------------------------------------------
    // Combat actions
    // ------------------------------------------------------------------

    /// Moves toward `threat`, provided it is still the active target.
    pub(crate) fn advance(&self, threat: &Threat, delta_secs: f64) {
        let speed = self.config.movement_speed.linear;
        self.relocate(threat, false, |from| {
            from.move_towards(threat.location, speed, delta_secs)
        });
    }

    /// Moves away from `threat`, provided it is still the active target.
    pub(crate) fn retreat(&self, threat: &Threat, delta_secs: f64) {
        let speed = self.config.movement_speed.linear;
        self.relocate(threat, true, |from| {
            from.retreat_from(threat.location, speed, delta_secs)
        });
    }

    fn relocate(&self, threat: &Threat, retreating: bool, step: impl FnOnce(Location) -> Location) {
        let movement = {
            let mut engagement = self.lock_engagement();
            if !engagement.is_target(&threat.id) {
                return;
            }
            let next = step(engagement.location);
            engagement.location = next;
            MovementEvent {
                location: next,
                distance_to_threat: next.distance(threat.location),
                retreating,
            }
        };

        debug!(
            target: "runtime::processor",
            x = movement.location.x,
            y = movement.location.y,
            z = movement.location.z,
            distance = movement.distance_to_threat,
            retreating,
            "Moved"
        );
        self.events.publish(Event::Movement(movement));
    }

    /// Applies one hit from `weapon` to the active threat.
    ///
    /// Unknown weapons and stale targets are ignored. A threat driven to zero
    /// health is cleared and the mode reverts to Normal in the same step.
    pub(crate) fn resolve_attack(&self, threat_id: &str, weapon: &str) {
        let Some(damage) = self.offense.weapon_damage(weapon) else {
            warn!(target: "runtime::processor", weapon, "Unknown weapon requested; ignoring attack");
            return;
        };

        let mut events = Vec::new();
        {
            let mut engagement = self.lock_engagement();
            let Some(target) = engagement
                .active_threat
                .as_mut()
                .filter(|active| active.id == threat_id)
            else {
                debug!(target: "runtime::processor", threat = threat_id, "Attack target no longer active");
                return;
            };

            let dealt = target.apply_damage(damage);
            let remaining = target.health;
            let eliminated = target.is_eliminated();
            self.metrics.record_hit();

            info!(
                target: "runtime::processor",
                threat = threat_id,
                weapon,
                damage = dealt,
                remaining,
                "Attack resolved"
            );
            events.push(Event::Combat(CombatEvent::Hit {
                threat_id: threat_id.to_string(),
                weapon: weapon.to_string(),
                damage: dealt,
                remaining,
            }));

            if eliminated {
                engagement.active_threat = None;
                let mut status = self.write_status();

                info!(target: "runtime::processor", threat = threat_id, "Threat eliminated");
                events.push(Event::Threat(ThreatEvent::Eliminated {
                    threat_id: threat_id.to_string(),
                }));
                events.extend(transition(&mut status, OperationMode::Normal));
            }
        }
        self.publish_all(events);
    }

    /// Runs the defensive strategies of every critical part.
    pub(crate) fn defend(&self, threat: &Threat) {
        let mut executed = 0;
        for part in self.anatomy.critical_parts() {
            for strategy in self.defense.strategies(&part) {
                if self.log_strategy(strategy.description, &part, strategy.execute(&part, threat)) {
                    executed += 1;
                }
            }
        }

        self.events.publish(Event::Combat(CombatEvent::Defended {
            threat_id: threat.id.clone(),
            strategies: executed,
        }));
    }
}

/// Sets the mode, returning the event to publish if it changed.
fn transition(status: &mut Status, to: OperationMode) -> Option<Event> {
    if status.mode == to {
        return None;
    }
    let from = std::mem::replace(&mut status.mode, to);
    info!(target: "runtime::processor", %from, %to, "Mode changed");
    Some(Event::Status(StatusEvent { from, to }))
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;

    use super::*;
    use crate::api::{CombatDecision, EngagementDecision, HealthSnapshot, OracleError};

    struct Silent;

    #[async_trait]
    impl DecisionOracle for Silent {
        async fn make_combat_decision(
            &self,
            _location: Location,
            _threat: &Threat,
            _health: &HealthSnapshot,
            _weapons: &[String],
        ) -> std::result::Result<CombatDecision, OracleError> {
            Err(OracleError::Status {
                status: 503,
                body: String::new(),
            })
        }

        async fn should_engage_proactively(
            &self,
            _threat: &Threat,
            _location: Location,
            _health: &HealthSnapshot,
        ) -> std::result::Result<EngagementDecision, OracleError> {
            Ok(EngagementDecision::new(false, "idle"))
        }
    }

    impl ThreatScanner for Silent {
        fn scan_area(&self, _location: Location) -> Vec<Threat> {
            Vec::new()
        }
    }

    fn shared() -> Shared {
        let shared = Shared::new(ProcessorConfig::default(), Arc::new(Silent), Arc::new(Silent))
            .unwrap();
        shared.set_active(true);
        shared
    }

    fn threat(id: &str) -> Threat {
        Threat::new(id, "hostile_robot", Location::new(30.0, 40.0, 0.0), 8)
    }

    #[test]
    fn acquire_requires_active_processor() {
        let shared = shared();
        shared.set_active(false);

        let err = shared.acquire(threat("T-1")).unwrap_err();
        assert!(matches!(
            err,
            ProcessorError::InvalidState {
                reason: StateViolation::NotActive
            }
        ));
        assert!(shared.active_threat().is_none());
        assert_eq!(shared.status().mode, OperationMode::Normal);
    }

    #[test]
    fn acquisition_enters_combat_and_runs_strategies() {
        let shared = shared();
        let mut status_rx = shared.events.subscribe(crate::events::Topic::Status);

        shared.acquire(threat("T-1")).unwrap();

        assert_eq!(shared.status().mode, OperationMode::Combat);
        assert_eq!(shared.active_threat().map(|t| t.id), Some("T-1".to_string()));
        assert_eq!(
            status_rx.try_recv().unwrap(),
            Event::Status(StatusEvent {
                from: OperationMode::Normal,
                to: OperationMode::Combat,
            })
        );

        // Head shields were boosted from 90 to the ceiling.
        assert_eq!(shared.anatomy.head().protection().shield_strength, 100.0);
        assert_eq!(shared.metrics.snapshot().strategy_failures, 0);
    }

    #[test]
    fn attack_ignores_stale_target_and_unknown_weapon() {
        let shared = shared();
        shared.acquire(threat("T-1")).unwrap();

        shared.resolve_attack("T-2", "missile");
        shared.resolve_attack("T-1", "railgun");
        assert_eq!(shared.active_threat().map(|t| t.health), Some(100.0));

        shared.resolve_attack("T-1", "laser");
        assert_eq!(shared.active_threat().map(|t| t.health), Some(70.0));
    }

    #[test]
    fn lost_threat_reverts_to_normal() {
        let shared = shared();
        shared.acquire(threat("T-1")).unwrap();

        shared.clear_lost_threat();
        assert!(shared.active_threat().is_none());
        assert_eq!(shared.status().mode, OperationMode::Normal);

        // Nothing to lose the second time.
        shared.clear_lost_threat();
    }

    #[test]
    fn movement_tracks_active_target_only() {
        let shared = shared();
        let target = threat("T-1");

        shared.advance(&target, 1.0);
        assert_eq!(shared.location(), Location::ORIGIN);

        shared.acquire(target.clone()).unwrap();
        shared.advance(&target, 1.0);
        assert!((shared.location().distance(target.location) - 45.0).abs() < 1e-9);

        shared.retreat(&target, 2.0);
        assert!((shared.location().distance(target.location) - 55.0).abs() < 1e-9);
    }
}
