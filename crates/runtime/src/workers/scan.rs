//! Periodic threat scanning and proactive acquisition.

use std::sync::Arc;

use tokio::time::Duration;
use tracing::{debug, info, warn};

use agent_core::{Location, Threat};

use crate::processor::Shared;

use super::{ShutdownSignal, ticker};

/// Sweeps for threats and lets the oracle pick the one to engage.
///
/// The first candidate the oracle approves becomes the active target, even
/// if another threat is already being engaged. An empty sweep drops the
/// active target.
pub(crate) struct ScanWorker {
    shared: Arc<Shared>,
    period: Duration,
}

impl ScanWorker {
    pub(crate) fn new(shared: Arc<Shared>) -> Self {
        let period = shared.config.scan_interval;
        Self { shared, period }
    }

    pub(crate) async fn run(self, mut shutdown: ShutdownSignal) {
        info!(target: "runtime::scanner", period_ms = self.period.as_millis() as u64, "Scan worker started");
        let mut ticker = ticker(self.period);

        loop {
            tokio::select! {
                biased;
                _ = shutdown.fired() => break,
                _ = ticker.tick() => {
                    // Oracle calls may stall; shutdown must not wait for them.
                    tokio::select! {
                        biased;
                        _ = shutdown.fired() => break,
                        _ = self.tick() => {}
                    }
                }
            }
        }

        info!(target: "runtime::scanner", "Scan worker stopped");
    }

    async fn tick(&self) {
        let location = self.shared.location();
        let threats = self.shared.scanner.scan_area(location);
        self.shared.record_scan();
        self.shared.metrics.record_scan(threats.len());

        if threats.is_empty() {
            self.shared.clear_lost_threat();
            return;
        }

        self.evaluate(location, threats).await;
    }

    async fn evaluate(&self, location: Location, threats: Vec<Threat>) {
        let health = self.shared.anatomy.health_status();

        for threat in threats.into_iter().filter(|t| t.health > 0.0) {
            let verdict = self
                .shared
                .oracle
                .should_engage_proactively(&threat, location, &health)
                .await;

            match verdict {
                Ok(decision) => {
                    self.shared.metrics.record_decision();
                    info!(
                        target: "runtime::oracle",
                        threat = %threat.id,
                        should_engage = decision.should_engage,
                        confidence = decision.confidence,
                        explanation = %decision.explanation,
                        "Engagement decision"
                    );

                    if decision.should_engage {
                        if let Err(error) = self.shared.acquire(threat) {
                            debug!(target: "runtime::scanner", %error, "Acquisition skipped");
                        }
                        return;
                    }
                }
                Err(error) => {
                    self.shared.metrics.record_oracle_failure();
                    warn!(
                        target: "runtime::oracle",
                        threat = %threat.id,
                        %error,
                        "Engagement decision failed"
                    );
                }
            }
        }
    }
}
