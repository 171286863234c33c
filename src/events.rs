//! Result notifications published by [`crate::ItchClient`].
//!
//! Every completed request is announced on a broadcast channel so several
//! parts of an application can observe API traffic without owning the call.
//! Publishing never blocks and is dropped silently when nobody listens.

use crate::protocol::models::{ApiResult, JsonObject};
use tokio::sync::broadcast;

/// Default capacity of the event channel.
pub const EVENT_CAPACITY: usize = 64;

/// A notification about a finished API call.
#[derive(Debug, Clone, PartialEq)]
pub enum ItchEvent {
    /// A request completed with status 200 and a JSON body.
    ApiResponse {
        /// Id of the originating request.
        request_id: u64,
        /// Wire name of the originating operation.
        endpoint: String,
        /// Normalized response object.
        data: JsonObject,
    },

    /// A request completed with an error.
    ApiError {
        /// Id of the originating request.
        request_id: u64,
        /// Wire name of the originating operation.
        endpoint: String,
        /// Human-readable reason.
        message: String,
        /// HTTP status, 0 when no response was received.
        http_status: u16,
    },

    /// A purchase verification finished (from the network or the cache).
    VerifyPurchaseResult {
        /// Whether the download key is a confirmed purchase.
        is_verified: bool,
        /// Response data or cached metadata.
        data: JsonObject,
    },
}

impl ItchEvent {
    /// The generic event for an API result.
    pub fn from_result(request_id: u64, result: &ApiResult) -> Self {
        match result {
            ApiResult::Success { endpoint, data } => Self::ApiResponse {
                request_id,
                endpoint: endpoint.clone(),
                data: data.clone(),
            },
            ApiResult::Error {
                endpoint,
                message,
                http_status,
            } => Self::ApiError {
                request_id,
                endpoint: endpoint.clone(),
                message: message.clone(),
                http_status: *http_status,
            },
        }
    }
}

/// Sender half of the event channel.
#[derive(Debug, Clone)]
pub struct EventBus {
    sender: broadcast::Sender<ItchEvent>,
}

impl EventBus {
    /// Create a bus holding up to `capacity` undelivered events per receiver.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Subscribe to events published from now on.
    pub fn subscribe(&self) -> broadcast::Receiver<ItchEvent> {
        self.sender.subscribe()
    }

    /// Publish an event to every current subscriber.
    pub fn publish(&self, event: ItchEvent) {
        // Err only means there are no receivers
        let _ = self.sender.send(event);
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(EVENT_CAPACITY)
    }
}
