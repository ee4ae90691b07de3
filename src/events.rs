//! Engine event stream.
//!
//! The UI layer subscribes instead of polling; payloads are plain
//! serializable data with no animation semantics attached.

use serde::Serialize;
use tokio::sync::broadcast;

use crate::api::models::SwipeLimitInfo;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase", tag = "type")]
pub enum EngineEvent {
    /// A discovery page was accepted into the session.
    BatchLoaded { count: usize, has_more: bool },
    /// The server reported a mutual like.
    Matched { candidate_id: u64 },
    /// Something transient went wrong; the session moved on regardless.
    Notice { message: String },
    /// Fresh limit status from either a discovery response or a limit read.
    LimitUpdated(SwipeLimitInfo),
    /// No candidates left and the server has no more to offer.
    SessionExhausted,
    /// The session was discarded and a fresh one is starting.
    SessionReset,
}

/// Broadcast fan-out for engine events. Cloning shares the same channel.
#[derive(Clone)]
pub struct EventBus {
    sender: broadcast::Sender<EngineEvent>,
}

const DEFAULT_CAPACITY: usize = 64;

impl EventBus {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<EngineEvent> {
        self.sender.subscribe()
    }

    /// Emit to whoever is listening. A send with no subscribers is not an
    /// error for the engine; the state transition already happened.
    pub fn emit(&self, event: EngineEvent) {
        let _ = self.sender.send(event);
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}
