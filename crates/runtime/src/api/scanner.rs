//! Threat detection seam.
use agent_core::{Location, Threat};

/// Produces threat candidates around a location each scan tick.
///
/// The call is synchronous; every returned threat carries a unique id.
pub trait ThreatScanner: Send + Sync {
    fn scan_area(&self, location: Location) -> Vec<Threat>;
}
