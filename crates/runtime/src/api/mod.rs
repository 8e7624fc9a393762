//! Public runtime API surface.
//!
//! This module gathers the types exposed to consumers of the runtime crate so
//! other layers can stay focused on orchestration, workers, or transport.

pub mod errors;
pub mod oracle;
pub mod scanner;

pub use errors::{OracleError, ProcessorError, Result, StateViolation, WorkerKind};
pub use oracle::{CombatAction, CombatDecision, DecisionOracle, EngagementDecision, HealthSnapshot};
pub use scanner::ThreatScanner;
