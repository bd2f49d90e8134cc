use crate::event::EventRecord;
use crate::messaging::EventBus;
use crate::Result;
use serde_json::Value;
use std::sync::Arc;
use tracing::info;

/// Publishes raw event payloads to a topic, wrapped in an `EventRecord`.
pub struct EventProducer {
    bus: Arc<EventBus>,
    topic: String,
    source: String,
}

impl EventProducer {
    pub fn new(bus: Arc<EventBus>, topic: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            bus,
            topic: topic.into(),
            source: source.into(),
        }
    }

    /// Publish one event payload; returns the delivered-subscriber count.
    pub async fn publish_event(&self, event_type: &str, payload: Value) -> Result<u64> {
        let record = EventRecord::new(event_type, self.source.clone(), payload);
        let delivered = self.bus.publish(&self.topic, record).await?;
        info!(
            target: "event_producer",
            topic = %self.topic,
            event_type,
            delivered,
            "Event published"
        );
        Ok(delivered)
    }
}
