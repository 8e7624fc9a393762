//! Topic-based event bus for processor events.
//!
//! Workers publish what they did (acquisitions, movement, hits, mode
//! changes) to topics; consumers subscribe only to the topics they need.
//! Publishing is best-effort and never blocks a worker.

mod bus;
mod types;

pub use bus::{Event, EventBus, Topic};
pub use types::{CombatEvent, MovementEvent, StatusEvent, ThreatEvent};
