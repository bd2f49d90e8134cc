use crate::event::EventRecord;
use crate::messaging::EventBus;
use crate::router::EventRouter;
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{error, info};

/// Topics the worker consumes from and publishes to.
#[derive(Debug, Clone)]
pub struct WorkerConfig {
    pub event_topic: String,
    pub decision_topic: String,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            event_topic: std::env::var("EVENT_TOPIC")
                .ok()
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| "events".to_string()),
            decision_topic: std::env::var("DECISION_TOPIC")
                .ok()
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| "decisions".to_string()),
        }
    }
}

/// Background consumer: one message at a time through the router, decision
/// published on the outbound topic. Handler failures are absorbed by the
/// router's uniform error Decision, so the loop never stops on a bad event.
pub struct DecisionWorker {
    bus: Arc<EventBus>,
    router: Arc<EventRouter>,
    cfg: WorkerConfig,
}

impl DecisionWorker {
    pub fn new(bus: Arc<EventBus>, router: Arc<EventRouter>, cfg: WorkerConfig) -> Self {
        Self { bus, router, cfg }
    }

    /// Spawn the consume loop. Returns the task handle and a shutdown
    /// signal; shutdown is honored between messages, never mid-decision.
    pub fn start(self) -> (JoinHandle<()>, watch::Sender<bool>) {
        let (shutdown_tx, mut shutdown_rx) = watch::channel(false);

        let handle = tokio::spawn(async move {
            let (sub_id, mut rx) = self.bus.subscribe(&self.cfg.event_topic);
            info!(
                target: "decision_worker",
                event_topic = %self.cfg.event_topic,
                decision_topic = %self.cfg.decision_topic,
                "Decision worker started"
            );

            loop {
                tokio::select! {
                    changed = shutdown_rx.changed() => {
                        if changed.is_err() || *shutdown_rx.borrow() {
                            break;
                        }
                    }
                    received = rx.recv() => {
                        match received {
                            Some(record) => self.handle_record(record).await,
                            None => break,
                        }
                    }
                }
            }

            self.bus.unsubscribe(&sub_id);
            info!(target: "decision_worker", "Decision worker stopped");
        });

        (handle, shutdown_tx)
    }

    async fn handle_record(&self, record: EventRecord) {
        let decision = self.router.process(&record.payload).await;
        let payload = match serde_json::to_value(&decision) {
            Ok(value) => value,
            Err(err) => {
                error!(target: "decision_worker", error = %err, "Failed to serialize decision");
                return;
            }
        };
        let out = EventRecord::new("decision", "decision-worker", payload);
        if let Err(err) = self.bus.publish(&self.cfg.decision_topic, out).await {
            error!(
                target: "decision_worker",
                event_id = %record.id,
                error = %err,
                "Failed to publish decision"
            );
        }
    }
}
