use crate::llm::stream::{ModelBackend, ModelStream, StreamEvent};
use crate::{Result, VerdictError};
use async_trait::async_trait;
use futures::StreamExt;
use reqwest::Client;
use reqwest_eventsource::{Event as SseEvent, EventSource};
use serde_json::json;
use std::time::Duration;
use tracing::{debug, warn};

/// Configuration for the model client loaded from environment variables
#[derive(Debug, Clone)]
pub struct ModelClientConfig {
    pub base_url: String, // e.g., http://localhost:8000/v1
    pub model: String,    // e.g., gpt-4
    pub api_key: Option<String>,
    pub request_timeout_ms: u64,
    pub temperature: f32,
    pub max_tokens: u32,
    pub max_retries: u32,
    pub retry_delay_ms: u64,
}

impl Default for ModelClientConfig {
    fn default() -> Self {
        Self {
            base_url: std::env::var("MODEL_BASE_URL")
                .ok()
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| "http://localhost:8000/v1".to_string()),
            model: std::env::var("MODEL_NAME")
                .ok()
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| "gpt-4".to_string()),
            api_key: std::env::var("MODEL_API_KEY").ok().filter(|s| !s.is_empty()),
            request_timeout_ms: std::env::var("REQUEST_TIMEOUT_MS")
                .ok()
                .and_then(|v| v.parse::<u64>().ok())
                .unwrap_or(30_000),
            temperature: std::env::var("MODEL_TEMPERATURE")
                .ok()
                .and_then(|v| v.parse::<f32>().ok())
                .unwrap_or(0.7),
            max_tokens: std::env::var("MODEL_MAX_TOKENS")
                .ok()
                .and_then(|v| v.parse::<u32>().ok())
                .unwrap_or(1000),
            max_retries: std::env::var("MAX_RETRIES")
                .ok()
                .and_then(|v| v.parse::<u32>().ok())
                .unwrap_or(3),
            retry_delay_ms: std::env::var("RETRY_DELAY_MS")
                .ok()
                .and_then(|v| v.parse::<u64>().ok())
                .unwrap_or(1_000),
        }
    }
}

/// OpenAI-compatible Chat Completions backend consuming the response as a
/// server-sent event stream.
#[derive(Clone)]
pub struct ChatBackend {
    http: Client,
    cfg: ModelClientConfig,
}

impl ChatBackend {
    pub fn new(cfg: ModelClientConfig) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_millis(cfg.request_timeout_ms))
            .build()
            .map_err(|e| VerdictError::Backend(format!("Failed to build HTTP client: {e}")))?;
        Ok(Self { http, cfg })
    }

    pub fn from_env() -> Result<Self> {
        Self::new(ModelClientConfig::default())
    }

    pub fn config(&self) -> &ModelClientConfig {
        &self.cfg
    }
}

#[async_trait]
impl ModelBackend for ChatBackend {
    async fn open_stream(&self, prompt: &str) -> Result<Box<dyn ModelStream>> {
        let url = format!(
            "{}/chat/completions",
            self.cfg.base_url.trim_end_matches('/')
        );
        debug!(target: "chat_backend", "POST {} (streaming)", url);

        let body = json!({
            "model": self.cfg.model,
            "messages": [{"role": "user", "content": prompt}],
            "stream": true,
            "temperature": self.cfg.temperature,
            "max_tokens": self.cfg.max_tokens,
        });

        let mut req = self
            .http
            .post(&url)
            .header("Accept", "text/event-stream")
            .json(&body);
        if let Some(key) = &self.cfg.api_key {
            req = req.bearer_auth(key);
        }

        let source = EventSource::new(req)
            .map_err(|e| VerdictError::Backend(format!("Failed to open SSE stream: {e}")))?;
        Ok(Box::new(SseStream { source }))
    }
}

struct SseStream {
    source: EventSource,
}

#[async_trait]
impl ModelStream for SseStream {
    async fn next_event(&mut self) -> Result<StreamEvent> {
        loop {
            match self.source.next().await {
                Some(Ok(SseEvent::Open)) => {}
                Some(Ok(SseEvent::Message(message))) => {
                    if message.data.trim() == "[DONE]" {
                        self.source.close();
                        return Ok(StreamEvent::Done);
                    }
                    match delta_content(&message.data) {
                        Some(chunk) if !chunk.is_empty() => {
                            return Ok(StreamEvent::Delta(chunk));
                        }
                        // Role-only or empty chunks carry no text.
                        _ => {}
                    }
                }
                Some(Err(reqwest_eventsource::Error::StreamEnded)) | None => {
                    self.source.close();
                    return Ok(StreamEvent::Done);
                }
                Some(Err(err)) => {
                    self.source.close();
                    warn!(target: "chat_backend", error = %err, "SSE stream error");
                    return Err(VerdictError::Backend(format!("SSE stream error: {err}")));
                }
            }
        }
    }
}

/// Pull `choices[0].delta.content` out of one streamed chunk.
fn delta_content(data: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(data).ok()?;
    value
        .get("choices")?
        .get(0)?
        .get("delta")?
        .get("content")?
        .as_str()
        .map(|s| s.to_string())
}
