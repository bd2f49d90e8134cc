// Decision model: the pipeline's sole externally observable output shape
use serde::{Deserialize, Serialize};

/// Recommended action. The set is domain-dependent: flight handlers produce
/// REBOOK/NOTIFY/CANCEL/MONITOR, market handlers BUY/SELL/HOLD, code handlers
/// FIX, and every failure path ERROR.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActionType {
    Rebook,
    Notify,
    Cancel,
    Monitor,
    Buy,
    Sell,
    Hold,
    Fix,
    Error,
}

impl std::fmt::Display for ActionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ActionType::Rebook => "REBOOK",
            ActionType::Notify => "NOTIFY",
            ActionType::Cancel => "CANCEL",
            ActionType::Monitor => "MONITOR",
            ActionType::Buy => "BUY",
            ActionType::Sell => "SELL",
            ActionType::Hold => "HOLD",
            ActionType::Fix => "FIX",
            ActionType::Error => "ERROR",
        };
        f.write_str(s)
    }
}

/// Trade size extracted from a market response. Serializes as either a
/// percentage string (`"12.0%"`) or a bare number, matching the wire shape
/// consumers already expect.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TradeSize {
    Percent(String),
    Amount(f64),
}

/// Domain-specific structured fields. Untagged so the JSON shape stays flat
/// (`details.analysis`, `details.error`, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DecisionDetails {
    Code {
        analysis: String,
        solution: String,
        explanation: String,
        best_practices: String,
    },
    Market {
        asset: String,
        price: f64,
        size: TradeSize,
        raw_response: String,
    },
    Flight {
        raw_response: String,
        num_steps: usize,
    },
    Error {
        error: String,
    },
}

/// Structured output of one pipeline invocation. Immutable once constructed;
/// a pure function of the model's text plus the originating event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Decision {
    pub action_type: ActionType,
    pub details: DecisionDetails,
    pub confidence: f64,
    pub reasoning: String,
    pub steps: Vec<String>,
}

impl Decision {
    /// Uniform error envelope: every failure degrades to this shape so the
    /// consumer loop can keep processing subsequent events.
    pub fn error(message: impl Into<String>) -> Self {
        let message = message.into();
        Self {
            action_type: ActionType::Error,
            details: DecisionDetails::Error {
                error: message.clone(),
            },
            confidence: 0.0,
            reasoning: message,
            steps: Vec::new(),
        }
    }
}
