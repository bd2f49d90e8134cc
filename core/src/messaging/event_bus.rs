// Event bus implementation
use crate::event::EventRecord;
use crate::Result;
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

const SUBSCRIPTION_CAPACITY: usize = 1024;

#[derive(Debug, Clone)]
struct Subscription {
    id: String,
    sender: mpsc::Sender<EventRecord>,
}

/// Per-topic delivery statistics
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EventBusStats {
    pub total_published: u64,
    pub total_delivered: u64,
    pub dropped_events: u64,
    pub active_subscriptions: usize,
}

/// Topic-based pub/sub over bounded channels.
#[derive(Default)]
pub struct EventBus {
    // Topic -> subscriber list
    subscriptions: DashMap<String, Vec<Subscription>>,
    stats: DashMap<String, EventBusStats>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Publish an event to a topic; returns the number of subscribers the
    /// event was delivered to.
    pub async fn publish(&self, topic: &str, event: EventRecord) -> Result<u64> {
        debug!(target: "event_bus", event_id = %event.id, topic, "Publishing event");

        self.update_stats(topic, |stats| stats.total_published += 1);

        let senders: Vec<(String, mpsc::Sender<EventRecord>)> = match self.subscriptions.get(topic)
        {
            Some(subs) => subs
                .iter()
                .map(|s| (s.id.clone(), s.sender.clone()))
                .collect(),
            None => {
                warn!(target: "event_bus", topic, "No subscriptions for topic");
                return Ok(0);
            }
        };

        let mut delivered = 0;
        let mut dropped = 0;
        for (sub_id, sender) in senders {
            match sender.send(event.clone()).await {
                Ok(()) => delivered += 1,
                Err(_) => {
                    dropped += 1;
                    warn!(target: "event_bus", subscription = %sub_id, "Failed to deliver event");
                }
            }
        }

        self.update_stats(topic, |stats| {
            stats.total_delivered += delivered;
            stats.dropped_events += dropped;
        });

        Ok(delivered)
    }

    /// Subscribe to a topic; returns the subscription id and the receiving
    /// end of a bounded channel.
    pub fn subscribe(&self, topic: &str) -> (String, mpsc::Receiver<EventRecord>) {
        let subscription_id = format!("sub_{}_{}", topic, uuid::Uuid::new_v4());
        let (tx, rx) = mpsc::channel(SUBSCRIPTION_CAPACITY);

        self.subscriptions
            .entry(topic.to_string())
            .or_default()
            .push(Subscription {
                id: subscription_id.clone(),
                sender: tx,
            });
        self.update_stats(topic, |stats| stats.active_subscriptions += 1);

        info!(target: "event_bus", subscription = %subscription_id, topic, "Created subscription");
        (subscription_id, rx)
    }

    pub fn unsubscribe(&self, subscription_id: &str) {
        for mut entry in self.subscriptions.iter_mut() {
            let before = entry.value().len();
            entry.value_mut().retain(|sub| sub.id != subscription_id);
            let removed = before - entry.value().len();
            if removed > 0 {
                let topic = entry.key().clone();
                drop(entry);
                self.update_stats(&topic, |stats| {
                    stats.active_subscriptions = stats.active_subscriptions.saturating_sub(removed);
                });
                info!(target: "event_bus", subscription = %subscription_id, "Unsubscribed");
                return;
            }
        }
    }

    pub fn stats(&self, topic: &str) -> Option<EventBusStats> {
        self.stats.get(topic).map(|s| s.clone())
    }

    fn update_stats<F>(&self, topic: &str, f: F)
    where
        F: FnOnce(&mut EventBusStats),
    {
        let mut entry = self.stats.entry(topic.to_string()).or_default();
        f(entry.value_mut());
    }
}
