//! Processor tuning knobs.

use std::time::Duration;

use agent_core::{Location, MovementSpeed};

/// Runtime configuration shared across the processor and its workers.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessorConfig {
    /// Period of the regeneration loop.
    pub health_interval: Duration,
    /// Period of the threat scan loop.
    pub scan_interval: Duration,
    /// Period of the engagement loop; also the movement time step.
    pub engagement_interval: Duration,
    /// Standoff distance the agent tries to hold from its target, in meters.
    pub engagement_distance: f64,
    pub movement_speed: MovementSpeed,
    pub start_location: Location,
    /// Capacity of each event topic.
    pub event_buffer_size: usize,
}

impl Default for ProcessorConfig {
    fn default() -> Self {
        Self {
            health_interval: Duration::from_secs(1),
            scan_interval: Duration::from_millis(500),
            engagement_interval: Duration::from_millis(100),
            engagement_distance: 20.0,
            movement_speed: MovementSpeed::default(),
            start_location: Location::ORIGIN,
            event_buffer_size: 64,
        }
    }
}
