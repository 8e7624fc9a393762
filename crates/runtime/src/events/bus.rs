//! Topic-based event bus implementation.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::broadcast;

use super::types::{CombatEvent, MovementEvent, StatusEvent, ThreatEvent};

/// Topics for event routing
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq)]
pub enum Topic {
    /// Threat acquisition, elimination and loss
    Threat,
    /// Agent movement
    Movement,
    /// Attack and defense resolution
    Combat,
    /// Mode transitions
    Status,
}

impl Topic {
    pub const ALL: [Topic; 4] = [Topic::Threat, Topic::Movement, Topic::Combat, Topic::Status];
}

/// Event wrapper that carries the topic and typed event
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Threat(ThreatEvent),
    Movement(MovementEvent),
    Combat(CombatEvent),
    Status(StatusEvent),
}

impl Event {
    pub fn topic(&self) -> Topic {
        match self {
            Event::Threat(_) => Topic::Threat,
            Event::Movement(_) => Topic::Movement,
            Event::Combat(_) => Topic::Combat,
            Event::Status(_) => Topic::Status,
        }
    }
}

/// Topic-based event bus
///
/// Channels for every topic are created up front and never change, so the
/// map needs no lock.
#[derive(Clone)]
pub struct EventBus {
    channels: Arc<HashMap<Topic, broadcast::Sender<Event>>>,
}

impl EventBus {
    /// Creates a new event bus with default capacity for each topic
    pub fn new() -> Self {
        Self::with_capacity(64)
    }

    /// Creates a new event bus with specified capacity per topic
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        let channels = Topic::ALL
            .into_iter()
            .map(|topic| (topic, broadcast::channel(capacity).0))
            .collect();

        Self {
            channels: Arc::new(channels),
        }
    }

    /// Publish an event to its corresponding topic
    pub fn publish(&self, event: Event) {
        let topic = event.topic();

        if let Some(tx) = self.channels.get(&topic)
            && tx.send(event).is_err()
        {
            // No subscribers for this topic - this is normal, not an error
            tracing::trace!("No subscribers for topic {:?}", topic);
        }
    }

    /// Subscribe to a specific topic
    ///
    /// Returns a receiver that will only receive events for that topic.
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        match self.channels.get(&topic) {
            Some(tx) => tx.subscribe(),
            // Every topic is registered in `with_capacity`; a detached
            // receiver is still a valid (silent) subscription.
            None => broadcast::channel(1).1,
        }
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
