//! Topic-based event bus implementation.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use super::types::{LogEvent, OutcomeEvent, TurnEvent};

/// Topics for event routing
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum Topic {
    /// Battle log lines
    Log,
    /// Turn changes
    Turn,
    /// End of battle
    Outcome,
}

impl Topic {
    pub const ALL: [Topic; 3] = [Topic::Log, Topic::Turn, Topic::Outcome];

    const fn slot(self) -> usize {
        match self {
            Topic::Log => 0,
            Topic::Turn => 1,
            Topic::Outcome => 2,
        }
    }
}

/// Event wrapper that carries the topic and typed event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Event {
    Log(LogEvent),
    Turn(TurnEvent),
    Outcome(OutcomeEvent),
}

impl Event {
    pub fn topic(&self) -> Topic {
        match self {
            Event::Log(_) => Topic::Log,
            Event::Turn(_) => Topic::Turn,
            Event::Outcome(_) => Topic::Outcome,
        }
    }
}

/// Topic-based event bus
///
/// One broadcast channel per topic, created up front. Publishing is
/// best-effort: events sent while nobody listens on a topic are dropped.
#[derive(Clone)]
pub struct EventBus {
    channels: Arc<[broadcast::Sender<Event>; 3]>,
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
            channels: Arc::new(Topic::ALL.map(|_| broadcast::channel(capacity).0)),
        }
    }

    /// Publish an event to its corresponding topic
    pub fn publish(&self, event: Event) {
        let topic = event.topic();
        let sent = self.channels[topic.slot()].send(event);
        if let Err(broadcast::error::SendError(dropped)) = sent {
            tracing::trace!(?topic, event = ?dropped, "no subscribers, event dropped");
        }
    }

    /// Subscribe to a specific topic
    ///
    /// Returns a receiver that will only receive events for that topic.
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.channels[topic.slot()].subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
