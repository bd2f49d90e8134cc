use crate::Result;
use async_trait::async_trait;

/// Normalized incremental events produced by a model session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamEvent {
    /// Incremental text output chunk.
    Delta(String),
    /// Terminal marker; no further deltas will arrive.
    Done,
}

/// One in-flight model session. Short-lived: exists for the duration of a
/// single prompt/response exchange, then dropped. No cross-call state.
#[async_trait]
pub trait ModelStream: Send {
    async fn next_event(&mut self) -> Result<StreamEvent>;
}

/// Backend capability contract: open-session(prompt) -> incremental
/// text-delta stream with a terminal marker. Any backend satisfying this is
/// substitutable.
#[async_trait]
pub trait ModelBackend: Send + Sync {
    async fn open_stream(&self, prompt: &str) -> Result<Box<dyn ModelStream>>;
}
