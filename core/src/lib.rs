// Verdict Core Library
// Event-to-decision agentic pipeline runtime

pub mod decision;
pub mod event;
pub mod llm;
pub mod messaging;
pub mod parse;
pub mod prompt;
pub mod router;
pub mod telemetry;

// Export core types
pub use decision::{ActionType, Decision, DecisionDetails, TradeSize};
pub use event::{classify, CodeEvent, Event, EventRecord, FlightEvent, MarketEvent};
pub use llm::{ChatBackend, ModelBackend, ModelClientConfig, ModelStream, RealtimeClient, StreamEvent};
pub use messaging::{DecisionWorker, EventBus, EventBusStats, EventProducer, WorkerConfig};
pub use router::EventRouter;

// Error types
use thiserror::Error;

#[derive(Error, Debug)]
pub enum VerdictError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Model backend error: {0}")]
    Backend(String),

    #[error("Failed to stream text after {attempts} attempts: {source}")]
    ModelStreamExhausted {
        attempts: u32,
        #[source]
        source: Box<VerdictError>,
    },

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Event bus error: {0}")]
    EventBus(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, VerdictError>;
