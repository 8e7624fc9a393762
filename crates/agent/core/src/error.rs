//! Error types surfaced by the domain model.
//!
//! Anatomy lookups and strategy execution fail with distinct enums so callers
//! can tell a bad part name apart from an action applied to the wrong part.
use thiserror::Error;

use crate::anatomy::PartKind;

pub type Result<T, E = AnatomyError> = std::result::Result<T, E>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum AnatomyError {
    #[error("part not found: {name}")]
    PartNotFound { name: String },

    #[error(
        "invalid dimensions {width}x{height}x{depth} ({weight} kg): all values must be positive"
    )]
    InvalidDimensions {
        width: f64,
        height: f64,
        depth: f64,
        weight: f64,
    },

    #[error("regeneration rate cannot be negative (got {rate})")]
    NegativeRegenRate { rate: f64 },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StrategyError {
    #[error("{action} cannot be applied: {reason}")]
    InvalidOperation {
        action: &'static str,
        reason: String,
    },
}

impl StrategyError {
    /// Rejection for an action mounted on a different part category.
    pub fn wrong_part(action: &'static str, required: PartKind, actual: PartKind) -> Self {
        Self::InvalidOperation {
            action,
            reason: format!("requires a {required} part, got {actual}"),
        }
    }
}
