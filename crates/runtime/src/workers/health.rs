//! Periodic part regeneration.

use std::sync::Arc;

use tokio::time::{Duration, Instant};
use tracing::{debug, info};

use crate::processor::Shared;

use super::{ShutdownSignal, ticker};

/// Regenerates every part once per tick and reports the health snapshot.
pub(crate) struct HealthWorker {
    shared: Arc<Shared>,
    period: Duration,
}

impl HealthWorker {
    pub(crate) fn new(shared: Arc<Shared>) -> Self {
        let period = shared.config.health_interval;
        Self { shared, period }
    }

    pub(crate) async fn run(self, mut shutdown: ShutdownSignal) {
        info!(target: "runtime::health", period_ms = self.period.as_millis() as u64, "Health worker started");
        let mut ticker = ticker(self.period);

        loop {
            tokio::select! {
                biased;
                _ = shutdown.fired() => break,
                _ = ticker.tick() => self.tick(),
            }
        }

        info!(target: "runtime::health", "Health worker stopped");
    }

    fn tick(&self) {
        let anatomy = &self.shared.anatomy;
        anatomy.update_all_parts(Instant::now().into_std());

        for (name, percent) in anatomy.health_status() {
            debug!(
                target: "runtime::health",
                part = %name,
                percent,
                critical = anatomy.is_part_critical(&name),
                "Part health"
            );
        }
    }
}
