//! Physical structure of the agent.
//!
//! The [`Anatomy`] registry exclusively owns the six standard [`BodyPart`]s
//! and is the only path through which damage reaches them. Parts carry their
//! own [`Protection`] record and [`HealthTracker`](crate::HealthTracker), each
//! behind an independent lock.

mod dimensions;
mod part;
mod protection;
mod registry;

pub use dimensions::Dimensions;
pub use part::{BodyPart, PartKind};
pub use protection::Protection;
pub use registry::Anatomy;
