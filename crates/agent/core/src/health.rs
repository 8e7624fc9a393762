//! Lock-protected health bookkeeping for a single body part.
//!
//! Each tracker owns its own `RwLock`, so damage to one part never contends
//! with reads or regeneration of another. Regeneration is lazy: the runtime
//! calls [`HealthTracker::update`] once per health tick with the current
//! instant and the tracker heals for the elapsed wall-clock time.

use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::Instant;

use crate::error::{AnatomyError, Result};

/// Fraction of maximum health restored per second.
pub const DEFAULT_REGEN_RATE: f64 = 0.1;

/// Health at or above this fraction of maximum is not critical.
const CRITICAL_FRACTION: f64 = 0.2;

#[derive(Debug)]
struct HealthState {
    current: f64,
    maximum: f64,
    regen_rate: f64,
    last_update: Option<Instant>,
}

/// Thread-safe current/maximum health with saturating damage and healing.
///
/// Invariant: `0 <= current <= maximum` after every operation.
#[derive(Debug)]
pub struct HealthTracker {
    state: RwLock<HealthState>,
}

impl HealthTracker {
    /// Creates a tracker at full health with the default regeneration rate.
    pub fn new(maximum: f64) -> Self {
        let maximum = maximum.max(0.0);
        Self {
            state: RwLock::new(HealthState {
                current: maximum,
                maximum,
                regen_rate: DEFAULT_REGEN_RATE,
                last_update: None,
            }),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, HealthState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, HealthState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn get(&self) -> f64 {
        self.read().current
    }

    pub fn maximum(&self) -> f64 {
        self.read().maximum
    }

    pub fn regen_rate(&self) -> f64 {
        self.read().regen_rate
    }

    /// Current health as a percentage of maximum.
    pub fn percentage(&self) -> f64 {
        let state = self.read();
        if state.maximum <= 0.0 {
            return 0.0;
        }
        state.current / state.maximum * 100.0
    }

    /// Applies damage and returns the amount actually removed.
    ///
    /// Non-positive amounts are ignored.
    pub fn reduce(&self, amount: f64) -> f64 {
        if amount <= 0.0 || amount.is_nan() {
            return 0.0;
        }

        let mut state = self.write();
        let applied = amount.min(state.current);
        state.current = (state.current - applied).max(0.0);
        applied
    }

    /// Restores health and returns the amount actually added.
    ///
    /// Non-positive amounts are ignored.
    pub fn heal(&self, amount: f64) -> f64 {
        if amount <= 0.0 || amount.is_nan() {
            return 0.0;
        }

        let mut state = self.write();
        let applied = amount.min(state.maximum - state.current);
        state.current = (state.current + applied).min(state.maximum);
        applied
    }

    pub fn set_regen_rate(&self, rate: f64) -> Result<()> {
        if rate < 0.0 || rate.is_nan() {
            return Err(AnatomyError::NegativeRegenRate { rate });
        }
        self.write().regen_rate = rate;
        Ok(())
    }

    /// Applies regeneration for the time elapsed since the previous update.
    ///
    /// The first call only records the baseline. Instants that do not move
    /// forward are ignored, which makes duplicate ticks harmless.
    pub fn update(&self, now: Instant) {
        let mut state = self.write();

        let Some(last) = state.last_update else {
            state.last_update = Some(now);
            return;
        };

        let elapsed = match now.checked_duration_since(last) {
            Some(elapsed) if !elapsed.is_zero() => elapsed.as_secs_f64(),
            _ => return,
        };

        let regen = state.regen_rate * elapsed * state.maximum;
        state.current = (state.current + regen).min(state.maximum);
        state.last_update = Some(now);
    }

    /// True when current health is below 20% of maximum.
    pub fn is_critical(&self) -> bool {
        let state = self.read();
        state.current < state.maximum * CRITICAL_FRACTION
    }
}
