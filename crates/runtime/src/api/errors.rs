//! Unified error types surfaced by the runtime API.
//!
//! Direct calls on the processor return [`ProcessorError`]; failures of the
//! decision oracle are [`OracleError`] and never escape the worker loops,
//! which log them and move on to the next tick.
use std::fmt;

use thiserror::Error;

use agent_core::AnatomyError;

pub type Result<T> = std::result::Result<T, ProcessorError>;

#[derive(Debug, Error)]
pub enum ProcessorError {
    #[error("invalid processor state: {reason}")]
    InvalidState { reason: StateViolation },

    #[error(transparent)]
    Anatomy(#[from] AnatomyError),

    #[error("processor requires a decision oracle to be configured before building")]
    MissingOracle,

    #[error("{worker} worker join failed")]
    WorkerJoin {
        worker: WorkerKind,
        #[source]
        source: tokio::task::JoinError,
    },
}

impl ProcessorError {
    pub(crate) fn invalid_state(reason: StateViolation) -> Self {
        Self::InvalidState { reason }
    }
}

/// Why a lifecycle or threat operation was rejected.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum StateViolation {
    NotActive,
    AlreadyStarted,
    AlreadyStopped,
    NoAsyncRuntime,
}

impl fmt::Display for StateViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            StateViolation::NotActive => "system is not active",
            StateViolation::AlreadyStarted => "processor already started",
            StateViolation::AlreadyStopped => "processor already stopped",
            StateViolation::NoAsyncRuntime => "no tokio runtime available to spawn workers",
        };
        write!(f, "{}", label)
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum WorkerKind {
    Health,
    Scan,
    Engagement,
}

impl fmt::Display for WorkerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            WorkerKind::Health => "health",
            WorkerKind::Scan => "scan",
            WorkerKind::Engagement => "engagement",
        };
        write!(f, "{}", label)
    }
}

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, Error)]
pub enum OracleError {
    #[error("failed to reach decision oracle at {endpoint}")]
    Communication {
        endpoint: String,
        #[source]
        source: BoxError,
    },

    #[error("decision oracle responded with status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("failed to decode oracle decision (response: {raw})")]
    Decode {
        raw: String,
        #[source]
        source: serde_json::Error,
    },
}

impl OracleError {
    pub fn communication(endpoint: impl Into<String>, source: impl Into<BoxError>) -> Self {
        Self::Communication {
            endpoint: endpoint.into(),
            source: source.into(),
        }
    }
}
