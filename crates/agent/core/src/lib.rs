//! Domain model for the autonomous combat agent.
//!
//! `agent-core` defines the pieces the runtime processor mediates: spatial
//! arithmetic, per-part health bookkeeping, the anatomy registry, threats and
//! the static offense/defense strategy catalogs. Everything here is
//! synchronous; shared mutable data carries its own fine-grained lock so the
//! runtime can touch it from several workers without a global lock.
//!
//! Modules are organized by responsibility:
//! - [`spatial`] hosts locations and movement arithmetic
//! - [`health`] provides the lock-protected health tracker
//! - [`anatomy`] owns body parts, protection and the registry
//! - [`threat`] describes detected hostile entities
//! - [`strategy`] exposes the offense and defense catalogs
pub mod anatomy;
pub mod error;
pub mod health;
pub mod mode;
pub mod spatial;
pub mod strategy;
pub mod threat;

pub use anatomy::{Anatomy, BodyPart, Dimensions, PartKind, Protection};
pub use error::{AnatomyError, StrategyError};
pub use health::{DEFAULT_REGEN_RATE, HealthTracker};
pub use mode::OperationMode;
pub use spatial::{Location, MovementSpeed};
pub use strategy::{
    DefenseAction, DefenseCatalog, DefenseStrategy, OffenseAction, OffenseCatalog,
    OffenseStrategy, StrategyAction,
};
pub use threat::Threat;
