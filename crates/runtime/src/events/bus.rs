//! Topic-based event bus implementation.

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use super::types::{CommitmentEvent, RefreshEvent};

/// Topics for event routing
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum Topic {
    /// Actor and batch refreshes
    Refresh,
    /// Commitment releases
    Commitment,
}

/// Event wrapper that carries the topic and typed event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Event {
    Refresh(RefreshEvent),
    Commitment(CommitmentEvent),
}

impl Event {
    pub fn topic(&self) -> Topic {
        match self {
            Event::Refresh(_) => Topic::Refresh,
            Event::Commitment(_) => Topic::Commitment,
        }
    }
}

/// Topic-based event bus
///
/// Each topic has its own broadcast channel, created up front.
#[derive(Clone)]
pub struct EventBus {
    refresh: broadcast::Sender<Event>,
    commitment: broadcast::Sender<Event>,
}

impl EventBus {
    /// Creates a new event bus with default capacity for each topic
    pub fn new() -> Self {
        Self::with_capacity(100)
    }

    /// Creates a new event bus with specified capacity per topic
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            refresh: broadcast::channel(capacity).0,
            commitment: broadcast::channel(capacity).0,
        }
    }

    fn sender(&self, topic: Topic) -> &broadcast::Sender<Event> {
        match topic {
            Topic::Refresh => &self.refresh,
            Topic::Commitment => &self.commitment,
        }
    }

    /// Publish an event to its corresponding topic
    pub fn publish(&self, event: Event) {
        let topic = event.topic();
        if self.sender(topic).send(event).is_err() {
            // No subscribers for this topic - this is normal, not an error
            tracing::trace!("No subscribers for topic {:?}", topic);
        }
    }

    /// Subscribe to a specific topic
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.sender(topic).subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::CommitmentEvent;

    #[tokio::test]
    async fn subscribers_only_see_their_topic() {
        let bus = EventBus::with_capacity(4);
        let mut refresh = bus.subscribe(Topic::Refresh);
        let mut commitment = bus.subscribe(Topic::Commitment);

        bus.publish(Event::Commitment(CommitmentEvent::Released {
            actor_id: "a".into(),
            released: Vec::new(),
        }));

        assert!(matches!(
            commitment.recv().await.unwrap(),
            Event::Commitment(_)
        ));
        assert!(refresh.try_recv().is_err());
    }
}
