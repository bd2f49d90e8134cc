// Bounded fixed-delay retry, modeled as an explicit state machine so the
// schedule can be tested without driving a real model session.
use async_trait::async_trait;
use std::time::Duration;

/// Sleep seam. Production code uses `TokioClock`; tests substitute a no-op
/// clock so retry paths run without real delays.
#[async_trait]
pub trait Clock: Send + Sync {
    async fn sleep(&self, duration: Duration);
}

pub struct TokioClock;

#[async_trait]
impl Clock for TokioClock {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Where the schedule currently stands. One logical call performs up to
/// `1 + max_retries` attempts; attempt indices are 0-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryState {
    Attempting(u32),
    Backoff(u32),
    Exhausted,
}

/// What the caller should do after recording a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryStep {
    Backoff(Duration),
    Exhausted,
}

#[derive(Debug, Clone)]
pub struct RetrySchedule {
    max_retries: u32,
    delay: Duration,
    state: RetryState,
}

impl RetrySchedule {
    pub fn new(max_retries: u32, delay: Duration) -> Self {
        Self {
            max_retries,
            delay,
            state: RetryState::Attempting(0),
        }
    }

    pub fn state(&self) -> RetryState {
        self.state
    }

    /// 0-based index of the current attempt, if one is in progress.
    pub fn attempt(&self) -> Option<u32> {
        match self.state {
            RetryState::Attempting(n) => Some(n),
            _ => None,
        }
    }

    /// Total attempts this schedule allows.
    pub fn total_attempts(&self) -> u32 {
        self.max_retries + 1
    }

    /// Record a failed attempt: either back off before the next one or give
    /// up once the attempt budget is spent.
    pub fn record_failure(&mut self) -> RetryStep {
        match self.state {
            RetryState::Attempting(n) if n < self.max_retries => {
                self.state = RetryState::Backoff(n);
                RetryStep::Backoff(self.delay)
            }
            _ => {
                self.state = RetryState::Exhausted;
                RetryStep::Exhausted
            }
        }
    }

    /// Backoff delay elapsed; move to the next attempt.
    pub fn resume(&mut self) {
        if let RetryState::Backoff(n) = self.state {
            self.state = RetryState::Attempting(n + 1);
        }
    }
}
