//! Runtime orchestration for the autonomous combat agent.
//!
//! This crate wires the domain model from `agent-core` together with a
//! threat scanner, a decision oracle and three background workers into a
//! cohesive processor API. Consumers build a [`Processor`], start it on a
//! tokio runtime, feed it threats, and subscribe to its events.
//!
//! Modules are organized by responsibility:
//! - [`processor`] hosts the orchestrator, its builder and configuration
//! - [`api`] exposes the traits and errors downstream clients interact with
//! - [`events`] provides the topic-based event bus
//! - [`oracle`] implements decision oracles (Ollama-backed and rule-based)
//! - [`scanner`] provides the simulated sweep scanner
//! - `workers` keeps the background loops internal to the crate
pub mod api;
pub mod events;
pub mod oracle;
pub mod processor;
pub mod scanner;

mod workers;

pub use api::{
    CombatAction, CombatDecision, DecisionOracle, EngagementDecision, HealthSnapshot, OracleError,
    ProcessorError, Result, StateViolation, ThreatScanner, WorkerKind,
};
pub use events::{CombatEvent, Event, EventBus, MovementEvent, StatusEvent, ThreatEvent, Topic};
pub use oracle::{HeuristicOracle, OllamaOracle, OracleConfig};
pub use processor::{Processor, ProcessorBuilder, ProcessorConfig, Status};
pub use scanner::SweepScanner;
pub use workers::{MetricsSnapshot, ProcessorMetrics};
