//! High-level processor orchestrator.
//!
//! The processor owns the shared engagement state and the three background
//! workers, and exposes a builder-based API for clients to start, observe
//! and stop the agent.

mod config;
mod state;

use std::sync::{Arc, Mutex, PoisonError};

use tokio::runtime::Handle;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tracing::{info, warn};

use agent_core::{Anatomy, Location, Threat};

use crate::api::{DecisionOracle, ProcessorError, Result, StateViolation, ThreatScanner, WorkerKind};
use crate::events::{Event, Topic};
use crate::scanner::SweepScanner;
use crate::workers::{
    EngagementWorker, HealthWorker, MetricsSnapshot, ScanWorker, ShutdownTrigger,
};

pub use config::ProcessorConfig;
pub use state::Status;

pub(crate) use state::Shared;

enum Lifecycle {
    NotStarted,
    Running(Vec<(WorkerKind, JoinHandle<()>)>),
    Stopped,
}

/// The agent's central coordinator.
///
/// Design: the processor owns its workers; every public method takes `&self`
/// so the processor can be shared behind an `Arc`.
pub struct Processor {
    shared: Arc<Shared>,
    shutdown: ShutdownTrigger,
    lifecycle: Mutex<Lifecycle>,
}

impl Processor {
    /// Create a new processor builder
    pub fn builder() -> ProcessorBuilder {
        ProcessorBuilder::new()
    }

    /// Spawns the health, scan and engagement workers on the current tokio
    /// runtime and marks the processor active.
    ///
    /// Single-use: fails if the processor was already started or stopped.
    pub fn start(&self) -> Result<()> {
        let mut lifecycle = self.lifecycle.lock().unwrap_or_else(PoisonError::into_inner);
        match *lifecycle {
            Lifecycle::NotStarted => {}
            Lifecycle::Running(_) => {
                return Err(ProcessorError::invalid_state(StateViolation::AlreadyStarted));
            }
            Lifecycle::Stopped => {
                return Err(ProcessorError::invalid_state(StateViolation::AlreadyStopped));
            }
        }

        let runtime = Handle::try_current()
            .map_err(|_| ProcessorError::invalid_state(StateViolation::NoAsyncRuntime))?;

        self.shared.set_active(true);

        let health = HealthWorker::new(Arc::clone(&self.shared));
        let scan = ScanWorker::new(Arc::clone(&self.shared));
        let engagement = EngagementWorker::new(Arc::clone(&self.shared));

        let workers = vec![
            (
                WorkerKind::Health,
                runtime.spawn(health.run(self.shutdown.signal())),
            ),
            (WorkerKind::Scan, runtime.spawn(scan.run(self.shutdown.signal()))),
            (
                WorkerKind::Engagement,
                runtime.spawn(engagement.run(self.shutdown.signal())),
            ),
        ];
        *lifecycle = Lifecycle::Running(workers);

        info!(target: "runtime::processor", "Processor started");
        Ok(())
    }

    /// Deactivates the processor, fires the shutdown signal and waits for
    /// every worker to exit.
    ///
    /// Idempotent. All workers are joined even if one of them failed; the
    /// first join failure is returned.
    pub async fn stop(&self) -> Result<()> {
        let previous = {
            let mut lifecycle = self.lifecycle.lock().unwrap_or_else(PoisonError::into_inner);
            std::mem::replace(&mut *lifecycle, Lifecycle::Stopped)
        };

        self.shared.set_active(false);
        self.shutdown.fire();

        let Lifecycle::Running(workers) = previous else {
            return Ok(());
        };

        let mut first_error = None;
        for (worker, handle) in workers {
            if let Err(source) = handle.await {
                warn!(target: "runtime::processor", %worker, error = %source, "Worker join failed");
                first_error.get_or_insert(ProcessorError::WorkerJoin { worker, source });
            }
        }

        info!(target: "runtime::processor", "Processor stopped");
        first_error.map_or(Ok(()), Err)
    }

    /// Hands a threat to the processor, making it the active target.
    ///
    /// Runs the acquisition strategies before returning. Fails with
    /// [`StateViolation::NotActive`] unless the processor is running, in which
    /// case nothing is mutated.
    pub fn report_threat(&self, threat: Threat) -> Result<()> {
        if !self.shared.is_active() {
            return Err(ProcessorError::invalid_state(StateViolation::NotActive));
        }

        warn!(
            target: "runtime::processor",
            threat = %threat.id,
            kind = %threat.kind,
            severity = threat.severity,
            x = threat.location.x,
            y = threat.location.y,
            z = threat.location.z,
            "Threat detected"
        );
        self.shared.acquire(threat)
    }

    pub fn status(&self) -> Status {
        self.shared.status()
    }

    pub fn anatomy(&self) -> Arc<Anatomy> {
        Arc::clone(&self.shared.anatomy)
    }

    /// Snapshot of the current target, if any.
    pub fn active_threat(&self) -> Option<Threat> {
        self.shared.active_threat()
    }

    pub fn location(&self) -> Location {
        self.shared.location()
    }

    pub fn config(&self) -> &ProcessorConfig {
        &self.shared.config
    }

    pub fn metrics(&self) -> MetricsSnapshot {
        self.shared.metrics.snapshot()
    }

    /// Subscribe to one event topic.
    pub fn subscribe_events(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.shared.events.subscribe(topic)
    }
}

impl Drop for Processor {
    fn drop(&mut self) {
        // Detached workers must not outlive the handle that can stop them.
        self.shutdown.fire();
    }
}

/// Builder for [`Processor`].
pub struct ProcessorBuilder {
    config: ProcessorConfig,
    oracle: Option<Arc<dyn DecisionOracle>>,
    scanner: Option<Arc<dyn ThreatScanner>>,
}

impl ProcessorBuilder {
    fn new() -> Self {
        Self {
            config: ProcessorConfig::default(),
            oracle: None,
            scanner: None,
        }
    }

    /// Override processor configuration
    pub fn config(mut self, config: ProcessorConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the required decision oracle
    pub fn oracle(mut self, oracle: impl DecisionOracle + 'static) -> Self {
        self.oracle = Some(Arc::new(oracle));
        self
    }

    /// Set a shared decision oracle
    pub fn shared_oracle(mut self, oracle: Arc<dyn DecisionOracle>) -> Self {
        self.oracle = Some(oracle);
        self
    }

    /// Set the threat scanner (defaults to [`SweepScanner`])
    pub fn scanner(mut self, scanner: impl ThreatScanner + 'static) -> Self {
        self.scanner = Some(Arc::new(scanner));
        self
    }

    /// Build the processor. Workers are not spawned until [`Processor::start`].
    pub fn build(self) -> Result<Processor> {
        let oracle = self.oracle.ok_or(ProcessorError::MissingOracle)?;
        let scanner = self
            .scanner
            .unwrap_or_else(|| Arc::new(SweepScanner::new()));

        let shared = Shared::new(self.config, oracle, scanner)?;

        Ok(Processor {
            shared: Arc::new(shared),
            shutdown: ShutdownTrigger::new(),
            lifecycle: Mutex::new(Lifecycle::NotStarted),
        })
    }
}
