//! Offense and defense strategy catalogs.
//!
//! Each catalog is an immutable table from [`PartKind`] to an ordered list
//! of strategies, built once at construction and shared read-only afterwards.
//! Strategy behavior is a closed set of action variants implementing
//! [`StrategyAction`]; actions validate their inputs and apply at most a
//! protection adjustment. Damage to threats is resolved by the runtime.

mod defense;
mod offense;

pub use defense::{DefenseAction, DefenseCatalog, DefenseStrategy};
pub use offense::{OffenseAction, OffenseCatalog, OffenseStrategy};

use crate::anatomy::{BodyPart, PartKind};
use crate::error::StrategyError;
use crate::threat::Threat;

/// A single executable strategy behavior.
pub trait StrategyAction {
    /// Stable identifier used in logs and errors.
    fn name(&self) -> &'static str;

    /// Executes the action with `part` against `threat`.
    fn apply(&self, part: &BodyPart, threat: &Threat) -> Result<(), StrategyError>;
}

fn require_kind(
    action: &'static str,
    part: &BodyPart,
    required: PartKind,
) -> Result<(), StrategyError> {
    if part.kind() != required {
        return Err(StrategyError::wrong_part(action, required, part.kind()));
    }
    Ok(())
}
