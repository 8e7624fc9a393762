//! Worker tasks that back the processor.
//!
//! Three independent loops share the processor state: the health worker
//! regenerates parts, the scan worker acquires threats, and the engagement
//! worker drives combat against the active threat. Each loop owns a clone of
//! one [`ShutdownSignal`] and exits as soon as it fires.

mod engagement;
mod health;
mod metrics;
mod scan;
mod shutdown;

use tokio::time::{self, Duration, Instant, Interval, MissedTickBehavior};

pub use metrics::{MetricsSnapshot, ProcessorMetrics};

pub(crate) use engagement::EngagementWorker;
pub(crate) use health::HealthWorker;
pub(crate) use scan::ScanWorker;
pub(crate) use shutdown::{ShutdownSignal, ShutdownTrigger};

/// Interval whose first tick lands one full period after creation.
///
/// A slow tick delays the next one instead of bursting to catch up, so ticks
/// within one loop never overlap.
fn ticker(period: Duration) -> Interval {
    let period = period.max(Duration::from_millis(1));
    let mut interval = time::interval_at(Instant::now() + period, period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    interval
}
