//! Shared fixtures for the processor integration tests.
#![allow(dead_code)]

use std::collections::VecDeque;
use std::io;
use std::sync::{Arc, Mutex};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;

use agent_core::{Location, Threat};
use runtime::{
    CombatAction, CombatDecision, DecisionOracle, EngagementDecision, HealthSnapshot, OracleError,
    ProcessorConfig, ThreatScanner,
};

/// Oracle with canned answers. `None` makes the call fail.
pub struct StubOracle {
    engage: Option<bool>,
    combat: Option<CombatDecision>,
    engage_calls: AtomicUsize,
    combat_calls: AtomicUsize,
}

impl StubOracle {
    pub fn new(engage: Option<bool>, combat: Option<CombatDecision>) -> Self {
        Self {
            engage,
            combat,
            engage_calls: AtomicUsize::new(0),
            combat_calls: AtomicUsize::new(0),
        }
    }

    pub fn attacking(weapon: &str) -> Self {
        Self::new(Some(true), Some(CombatDecision::attack("", weapon)))
    }

    pub fn acting(action: CombatAction) -> Self {
        Self::new(Some(true), Some(CombatDecision::new(action)))
    }

    pub fn failing() -> Self {
        Self::new(None, None)
    }

    pub fn combat_calls(&self) -> usize {
        self.combat_calls.load(Ordering::SeqCst)
    }

    pub fn engage_calls(&self) -> usize {
        self.engage_calls.load(Ordering::SeqCst)
    }
}

fn unavailable() -> OracleError {
    OracleError::Status {
        status: 503,
        body: "model unavailable".to_string(),
    }
}

#[async_trait]
impl DecisionOracle for StubOracle {
    async fn make_combat_decision(
        &self,
        _location: Location,
        threat: &Threat,
        _health: &HealthSnapshot,
        _weapons: &[String],
    ) -> Result<CombatDecision, OracleError> {
        self.combat_calls.fetch_add(1, Ordering::SeqCst);
        let decision = self.combat.clone().ok_or_else(unavailable)?;
        Ok(CombatDecision {
            target: threat.id.clone(),
            ..decision
        })
    }

    async fn should_engage_proactively(
        &self,
        _threat: &Threat,
        _location: Location,
        _health: &HealthSnapshot,
    ) -> Result<EngagementDecision, OracleError> {
        self.engage_calls.fetch_add(1, Ordering::SeqCst);
        let engage = self.engage.ok_or_else(unavailable)?;
        Ok(EngagementDecision::new(engage, "stub"))
    }
}

/// Scanner replaying queued sweeps, then repeating `fallback` forever.
pub struct ScriptedScanner {
    sweeps: Mutex<VecDeque<Vec<Threat>>>,
    fallback: Vec<Threat>,
}

impl ScriptedScanner {
    pub fn new(sweeps: Vec<Vec<Threat>>, fallback: Vec<Threat>) -> Self {
        Self {
            sweeps: Mutex::new(sweeps.into()),
            fallback,
        }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new(), Vec::new())
    }

    pub fn always(threats: Vec<Threat>) -> Self {
        Self::new(Vec::new(), threats)
    }
}

impl ThreatScanner for ScriptedScanner {
    fn scan_area(&self, _location: Location) -> Vec<Threat> {
        let mut sweeps = self.sweeps.lock().unwrap();
        sweeps.pop_front().unwrap_or_else(|| self.fallback.clone())
    }
}

pub const HOUR: Duration = Duration::from_secs(3600);

/// Engagement every 100ms; health and scanning effectively disabled.
pub fn engagement_only() -> ProcessorConfig {
    ProcessorConfig {
        health_interval: HOUR,
        scan_interval: HOUR,
        engagement_interval: Duration::from_millis(100),
        ..ProcessorConfig::default()
    }
}

/// Scanning every 100ms; health and engagement effectively disabled.
pub fn scanning_only() -> ProcessorConfig {
    ProcessorConfig {
        health_interval: HOUR,
        scan_interval: Duration::from_millis(100),
        engagement_interval: HOUR,
        ..ProcessorConfig::default()
    }
}

pub fn hostile(id: &str, location: Location, severity: u8) -> Threat {
    Threat::new(id, "hostile_robot", location, severity)
}

/// Collects formatted log lines for assertions on what was reported.
#[derive(Clone, Default)]
pub struct LogCapture {
    buffer: Arc<Mutex<Vec<u8>>>,
}

impl LogCapture {
    /// Installs a capturing subscriber for the current thread.
    pub fn install(&self) -> tracing::subscriber::DefaultGuard {
        let subscriber = tracing_subscriber::fmt()
            .with_writer(self.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::DEBUG)
            .finish();
        tracing::subscriber::set_default(subscriber)
    }

    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.buffer.lock().unwrap()).into_owned()
    }
}

impl io::Write for LogCapture {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> tracing_subscriber::fmt::MakeWriter<'a> for LogCapture {
    type Writer = LogCapture;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}
