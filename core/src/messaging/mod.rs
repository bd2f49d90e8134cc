//! Messaging collaborator: in-process broker plumbing around the pipeline.
//!
//! This module provides:
//! - `EventBus`: topic-based pub/sub over bounded channels with delivery stats
//! - `EventProducer`: publishes event payloads wrapped in an `EventRecord`
//! - `DecisionWorker`: background consumer invoking the router once per
//!   message, sequentially, publishing each Decision to an outbound topic
//!
//! Delivery is best-effort, at-least-once; there is no persistence.

mod event_bus;
mod producer;
mod worker;

pub use event_bus::{EventBus, EventBusStats};
pub use producer::EventProducer;
pub use worker::{DecisionWorker, WorkerConfig};
