//! Individual body parts.

use std::sync::{PoisonError, RwLock};

use super::{Dimensions, Protection};
use crate::health::HealthTracker;

/// Starting and maximum health of every part.
pub(crate) const PART_MAX_HEALTH: f64 = 100.0;

/// Category of a body part; strategies are keyed by it.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum PartKind {
    Head,
    Body,
    Arm,
    Leg,
}

/// A physical component of the agent.
///
/// Protection and health are independently locked: strategies may adjust
/// shields while the health loop regenerates the same part.
#[derive(Debug)]
pub struct BodyPart {
    kind: PartKind,
    name: String,
    dimensions: Dimensions,
    protection: RwLock<Protection>,
    health: HealthTracker,
    critical: bool,
}

impl BodyPart {
    /// Creates a part at full health with the standard protection for its kind.
    pub fn new(
        kind: PartKind,
        name: impl Into<String>,
        dimensions: Dimensions,
        critical: bool,
    ) -> Self {
        Self {
            kind,
            name: name.into(),
            dimensions,
            protection: RwLock::new(Protection::for_kind(kind)),
            health: HealthTracker::new(PART_MAX_HEALTH),
            critical,
        }
    }

    pub fn kind(&self) -> PartKind {
        self.kind
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn dimensions(&self) -> &Dimensions {
        &self.dimensions
    }

    /// Design-time criticality, independent of current health.
    pub fn is_critical(&self) -> bool {
        self.critical
    }

    pub fn health(&self) -> &HealthTracker {
        &self.health
    }

    /// Snapshot of the current protection record.
    pub fn protection(&self) -> Protection {
        self.protection
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Mutates the protection record under its lock.
    pub fn modify_protection<R>(&self, f: impl FnOnce(&mut Protection) -> R) -> R {
        let mut protection = self.protection.write().unwrap_or_else(PoisonError::into_inner);
        f(&mut protection)
    }

    /// Applies protection-aware damage and returns the health actually lost.
    pub(crate) fn take_damage(&self, impact: f64) -> f64 {
        let applied = self.protection().mitigate(impact);
        self.health.reduce(applied)
    }
}
