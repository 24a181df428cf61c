//! Session events — how a chat session tells its screen to re-render.
//!
//! Every transcript append and every flip of the "awaiting response" flag is
//! published here. The screen subscribes and scrolls to the newest entry.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::broadcast;

use crate::message::{MessageId, Sender, SessionId};

/// All events a chat session emits.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum SessionEvent {
    /// A message was appended to the transcript
    MessageAppended {
        session_id: SessionId,
        message_id: MessageId,
        sender: Sender,
        /// Zero-based position in the transcript
        position: usize,
        timestamp: DateTime<Utc>,
    },

    /// The session entered or left the awaiting-response state
    AwaitingChanged {
        session_id: SessionId,
        awaiting: bool,
        timestamp: DateTime<Utc>,
    },

    /// The reply backend failed; a stand-in reply was appended instead
    ResponderFailed {
        session_id: SessionId,
        error_message: String,
        timestamp: DateTime<Utc>,
    },

    /// The owning screen closed the session
    Closed {
        session_id: SessionId,
        timestamp: DateTime<Utc>,
    },
}

/// A broadcast-based event bus for session events.
///
/// Uses `tokio::sync::broadcast` for multi-consumer pub/sub.
pub struct EventBus {
    sender: broadcast::Sender<Arc<SessionEvent>>,
}

impl EventBus {
    /// Create a new event bus with the given capacity.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    /// Publish an event to all subscribers.
    pub fn publish(&self, event: SessionEvent) {
        // No subscribers is fine
        let _ = self.sender.send(Arc::new(event));
    }

    /// Subscribe to receive events.
    pub fn subscribe(&self) -> broadcast::Receiver<Arc<SessionEvent>> {
        self.sender.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn event_bus_publish_subscribe() {
        let bus = EventBus::new(16);
        let mut rx = bus.subscribe();

        bus.publish(SessionEvent::MessageAppended {
            session_id: SessionId("s1".into()),
            message_id: MessageId(2),
            sender: Sender::User,
            position: 1,
            timestamp: Utc::now(),
        });

        let event = rx.recv().await.unwrap();
        match event.as_ref() {
            SessionEvent::MessageAppended { message_id, sender, position, .. } => {
                assert_eq!(*message_id, MessageId(2));
                assert_eq!(*sender, Sender::User);
                assert_eq!(*position, 1);
            }
            _ => panic!("Expected MessageAppended event"),
        }
    }

    #[test]
    fn event_bus_no_subscribers_doesnt_panic() {
        let bus = EventBus::new(16);
        bus.publish(SessionEvent::Closed {
            session_id: SessionId::new(),
            timestamp: Utc::now(),
        });
    }

    #[test]
    fn zero_capacity_is_clamped() {
        let bus = EventBus::new(0);
        let _rx = bus.subscribe();
        bus.publish(SessionEvent::AwaitingChanged {
            session_id: SessionId::new(),
            awaiting: true,
            timestamp: Utc::now(),
        });
    }
}
