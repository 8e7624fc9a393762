//! Simulated 360° sweep scanner.
//!
//! Stands in for a sensor array: every sweep walks the bearings around the
//! agent and rolls for direct detections and for predicted contacts. High
//! confidence predictions are promoted to threats.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, PoisonError};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use agent_core::{Location, Threat};

use crate::api::ThreatScanner;

const DEFAULT_RANGE: f64 = 100.0;
const DEFAULT_RESOLUTION: f64 = 0.1;
const BEARING_STEP_DEG: f64 = 10.0;

const DETECTION_CHANCE: f64 = 0.05;
const PREDICTION_CHANCE: f64 = 0.1;
/// Predictions above this probability become threats.
const PROMOTION_THRESHOLD: f64 = 0.7;

/// Severity from distance: the closer, the more severe.
pub fn severity_for_distance(distance: f64) -> u8 {
    if distance < 10.0 {
        9
    } else if distance < 30.0 {
        6
    } else if distance < 60.0 {
        3
    } else {
        1
    }
}

/// Randomized sweep over fixed bearings with a seedable RNG.
#[derive(Debug)]
pub struct SweepScanner {
    range: f64,
    resolution: f64,
    rng: Mutex<StdRng>,
    next_id: AtomicU64,
}

impl SweepScanner {
    pub fn new() -> Self {
        Self::from_rng(StdRng::from_entropy())
    }

    /// Deterministic scanner for reproducible sweeps.
    pub fn with_seed(seed: u64) -> Self {
        Self::from_rng(StdRng::seed_from_u64(seed))
    }

    fn from_rng(rng: StdRng) -> Self {
        Self {
            range: DEFAULT_RANGE,
            resolution: DEFAULT_RESOLUTION,
            rng: Mutex::new(rng),
            next_id: AtomicU64::new(1),
        }
    }

    pub fn range(&self) -> f64 {
        self.range
    }

    fn next_threat_id(&self) -> String {
        format!("THREAT-{}", self.next_id.fetch_add(1, Ordering::Relaxed))
    }

    fn contact(&self, kind: &str, origin: Location, location: Location) -> Threat {
        let severity = severity_for_distance(origin.distance(location));
        Threat::new(self.next_threat_id(), kind, location, severity)
    }
}

impl Default for SweepScanner {
    fn default() -> Self {
        Self::new()
    }
}

impl ThreatScanner for SweepScanner {
    fn scan_area(&self, location: Location) -> Vec<Threat> {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        let mut threats = Vec::new();

        let bearings = (360.0 / BEARING_STEP_DEG) as u32;
        for step in 0..bearings {
            let bearing = (f64::from(step) * BEARING_STEP_DEG).to_radians();
            let radius = rng.gen_range(self.resolution..=self.range);
            let probe = location.offset(radius * bearing.cos(), radius * bearing.sin(), 0.0);

            if rng.gen_bool(DETECTION_CHANCE) {
                threats.push(self.contact("unknown", location, probe));
            }

            if rng.gen_bool(PREDICTION_CHANCE) {
                let probability = 1.0 - location.distance(probe) / self.range;
                if probability > PROMOTION_THRESHOLD {
                    threats.push(self.contact("predicted", location, probe));
                }
            }
        }

        if !threats.is_empty() {
            tracing::debug!(
                target: "runtime::scanner",
                count = threats.len(),
                x = location.x,
                y = location.y,
                "Sweep found contacts"
            );
        }

        threats
    }
}
