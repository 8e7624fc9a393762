//! Typed payloads carried on each topic.

use agent_core::{Location, OperationMode, Threat};

/// Threat lifecycle events.
#[derive(Clone, Debug, PartialEq)]
pub enum ThreatEvent {
    /// A threat became the active target.
    Acquired { threat: Threat },
    /// The active threat's health reached zero.
    Eliminated { threat_id: String },
    /// A scan came back empty while a threat was active.
    Lost { threat_id: String },
}

/// Agent movement during engagement.
#[derive(Clone, Debug, PartialEq)]
pub struct MovementEvent {
    pub location: Location,
    pub distance_to_threat: f64,
    pub retreating: bool,
}

/// Combat resolution events.
#[derive(Clone, Debug, PartialEq)]
pub enum CombatEvent {
    Hit {
        threat_id: String,
        weapon: String,
        damage: f64,
        remaining: f64,
    },
    Defended {
        threat_id: String,
        strategies: usize,
    },
}

/// Operating mode transitions.
#[derive(Clone, Debug, PartialEq)]
pub struct StatusEvent {
    pub from: OperationMode,
    pub to: OperationMode,
}
