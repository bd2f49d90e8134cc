//! Streaming model client: backend trait, SSE transport, and retry control
//!
//! This module provides:
//! - `StreamEvent`, `ModelStream`, `ModelBackend` - the backend capability
//!   seam (open a session for one prompt, consume deltas to a terminal marker)
//! - `ModelClientConfig`, `ChatBackend` for OpenAI-compatible backends
//! - `RealtimeClient` driving a bounded fixed-delay retry schedule
//! - `Clock` so tests can run the retry loop without real sleeps

mod client;
mod realtime;
mod retry;
mod stream;

pub use client::{ChatBackend, ModelClientConfig};
pub use realtime::RealtimeClient;
pub use retry::{Clock, RetrySchedule, RetryState, RetryStep, TokioClock};
pub use stream::{ModelBackend, ModelStream, StreamEvent};
