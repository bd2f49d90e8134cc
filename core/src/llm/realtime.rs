use crate::llm::client::{ChatBackend, ModelClientConfig};
use crate::llm::retry::{Clock, RetrySchedule, RetryStep, TokioClock};
use crate::llm::stream::{ModelBackend, StreamEvent};
use crate::{Result, VerdictError};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Client that streams model text with bounded fixed-delay retry.
///
/// Each `stream_text` call opens a fresh session per attempt; a failed
/// attempt discards any partial accumulation before retrying.
pub struct RealtimeClient {
    backend: Arc<dyn ModelBackend>,
    max_retries: u32,
    retry_delay: Duration,
    clock: Arc<dyn Clock>,
}

impl RealtimeClient {
    pub fn new(backend: Arc<dyn ModelBackend>, max_retries: u32, retry_delay: Duration) -> Self {
        Self {
            backend,
            max_retries,
            retry_delay,
            clock: Arc::new(TokioClock),
        }
    }

    pub fn from_env() -> Result<Self> {
        let cfg = ModelClientConfig::default();
        let max_retries = cfg.max_retries;
        let retry_delay = Duration::from_millis(cfg.retry_delay_ms);
        let backend = ChatBackend::new(cfg)?;
        Ok(Self::new(Arc::new(backend), max_retries, retry_delay))
    }

    /// Substitute the sleep implementation (tests use a no-op clock).
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Stream the full response text for `prompt`, retrying transient
    /// failures. `retries` overrides the configured retry count for this
    /// call; total tries = `1 + retries`.
    pub async fn stream_text(&self, prompt: &str, retries: Option<u32>) -> Result<String> {
        let max_retries = retries.unwrap_or(self.max_retries);
        let mut schedule = RetrySchedule::new(max_retries, self.retry_delay);

        loop {
            let attempt = schedule.attempt().unwrap_or(0);
            match self.attempt_once(prompt).await {
                Ok(text) => {
                    info!(
                        target: "realtime_client",
                        attempt,
                        chars = text.len(),
                        "Completed streaming response"
                    );
                    return Ok(text);
                }
                Err(err) => match schedule.record_failure() {
                    RetryStep::Backoff(delay) => {
                        warn!(
                            target: "realtime_client",
                            attempt,
                            total = schedule.total_attempts(),
                            error = %err,
                            "Streaming attempt failed; retrying after {:?}",
                            delay
                        );
                        self.clock.sleep(delay).await;
                        schedule.resume();
                    }
                    RetryStep::Exhausted => {
                        return Err(VerdictError::ModelStreamExhausted {
                            attempts: schedule.total_attempts(),
                            source: Box::new(err),
                        });
                    }
                },
            }
        }
    }

    async fn attempt_once(&self, prompt: &str) -> Result<String> {
        // Session is scoped to this attempt; dropped on every exit path.
        let mut stream = self.backend.open_stream(prompt).await?;
        let mut text = String::new();
        loop {
            match stream.next_event().await? {
                StreamEvent::Delta(chunk) => {
                    debug!(target: "realtime_client", chunk = %chunk, "delta");
                    text.push_str(&chunk);
                }
                StreamEvent::Done => break,
            }
        }
        Ok(text)
    }
}
