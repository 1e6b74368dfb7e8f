//! Domain event bus.
//!
//! Every state change in the marketplace emits an event so downstream
//! consumers (notification workers, audit sinks) can react without the API
//! blocking on them. Events carry a versioned JSON envelope and are published
//! to the channel named by their routing key.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use redis::AsyncCommands;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

/// Envelope schema version. Bump on breaking payload changes.
pub const ENVELOPE_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventEnvelope {
    pub event_type: String,
    pub payload: Value,
    pub timestamp: DateTime<Utc>,
    pub version: u32,
}

impl EventEnvelope {
    pub fn new(event_type: &str, payload: Value) -> Self {
        Self {
            event_type: event_type.to_string(),
            payload,
            timestamp: Utc::now(),
            version: ENVELOPE_VERSION,
        }
    }
}

/// Channel name for an event type: dots become underscores, so
/// `placement.created` is delivered on `placement_created`.
pub fn routing_key(event_type: &str) -> String {
    event_type.replace('.', "_")
}

#[derive(Debug, Error)]
pub enum EventError {
    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("transport error: {0}")]
    Transport(#[from] redis::RedisError),
}

/// The event bus trait. Carried in `AppState` as `Arc<dyn EventPublisher>`
/// so handlers never depend on a concrete transport.
#[async_trait]
pub trait EventPublisher: Send + Sync {
    async fn publish(&self, event_type: &str, payload: Value) -> Result<(), EventError>;
}

/// Redis pub/sub backed bus.
pub struct RedisEventBus {
    client: redis::Client,
}

impl RedisEventBus {
    pub fn new(client: redis::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl EventPublisher for RedisEventBus {
    async fn publish(&self, event_type: &str, payload: Value) -> Result<(), EventError> {
        let envelope = EventEnvelope::new(event_type, payload);
        let body = serde_json::to_string(&envelope)?;
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        let receivers: i64 = conn.publish(routing_key(event_type), body).await?;
        debug!("Published {event_type} to {receivers} subscriber(s)");
        Ok(())
    }
}

/// Publishes an event, logging failures instead of propagating them.
/// Event publication is best-effort and never fails the request: the DB write
/// has already committed by the time this runs.
pub async fn emit<T: Serialize>(publisher: &dyn EventPublisher, event_type: &str, payload: &T) {
    let value = match serde_json::to_value(payload) {
        Ok(v) => v,
        Err(e) => {
            warn!("Failed to serialize {event_type} payload: {e}");
            return;
        }
    };
    if let Err(e) = publisher.publish(event_type, value).await {
        warn!("Failed to publish {event_type}: {e}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_routing_key_replaces_dots() {
        assert_eq!(routing_key("placement.created"), "placement_created");
        assert_eq!(routing_key("payout.failed"), "payout_failed");
        assert_eq!(routing_key("health"), "health");
    }

    #[test]
    fn test_envelope_carries_version_and_type() {
        let envelope = EventEnvelope::new("proposal.accepted", json!({"id": "x"}));
        assert_eq!(envelope.event_type, "proposal.accepted");
        assert_eq!(envelope.version, ENVELOPE_VERSION);
        assert_eq!(envelope.payload["id"], "x");
    }

    struct FailingPublisher;

    #[async_trait]
    impl EventPublisher for FailingPublisher {
        async fn publish(&self, _event_type: &str, _payload: Value) -> Result<(), EventError> {
            let parse_err = serde_json::from_str::<Value>("not json").unwrap_err();
            Err(EventError::Serialize(parse_err))
        }
    }

    #[tokio::test]
    async fn test_emit_swallows_publish_errors() {
        // Must not panic or propagate; failures are logged only.
        emit(&FailingPublisher, "proposal.created", &json!({"id": 1})).await;
    }
}
