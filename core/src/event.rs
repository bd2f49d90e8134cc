// Event model: broker envelope + validating domain classification
use crate::{Result, VerdictError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Envelope carried on the bus. The pipeline itself only looks at `payload`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventRecord {
    pub id: String,
    pub event_type: String,
    pub source: String,
    pub timestamp: DateTime<Utc>,
    pub payload: Value,
}

impl EventRecord {
    pub fn new(event_type: impl Into<String>, source: impl Into<String>, payload: Value) -> Self {
        Self {
            id: format!("evt_{}", uuid::Uuid::new_v4()),
            event_type: event_type.into(),
            source: source.into(),
            timestamp: Utc::now(),
            payload,
        }
    }
}

/// Classified event. Handlers downstream receive a statically known shape
/// instead of probing an open map.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Flight(FlightEvent),
    Market(MarketEvent),
    Code(CodeEvent),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlightEvent {
    pub flight_id: String,
    pub status: String,
    pub timestamp: String,
    pub delay_minutes: Option<i64>,
    pub reason: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketEvent {
    pub market_data: MarketData,
    #[serde(default)]
    pub portfolio: BTreeMap<String, f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketData {
    pub asset: String,
    pub price: f64,
    pub volume: f64,
    pub indicators: Indicators,
    pub market_context: MarketContext,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Indicators {
    pub rsi: f64,
    pub macd: Macd,
    pub sentiment_score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Macd {
    pub value: f64,
    pub signal: f64,
    pub histogram: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketContext {
    pub trend: String,
    pub volatility: String,
    pub news_sentiment: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CodeEvent {
    pub code: String,
    #[serde(default)]
    pub execution_result: Option<ExecutionResult>,
    #[serde(default)]
    pub error_context: Option<ErrorContext>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionResult {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub output: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ErrorContext {
    #[serde(default)]
    pub error_type: Option<String>,
    #[serde(default)]
    pub error_message: Option<String>,
    #[serde(default)]
    pub error_line: Option<i64>,
    #[serde(default)]
    pub traceback: Option<String>,
}

fn non_empty_str(payload: &Value, key: &str) -> bool {
    payload
        .get(key)
        .and_then(|v| v.as_str())
        .map(|s| !s.is_empty())
        .unwrap_or(false)
}

/// Classify a raw payload into a typed event.
///
/// Dispatch is by key presence, first match wins, in a fixed order:
/// `code` -> `market_data` -> `flight_id` -> unknown. Events are assumed not
/// to carry multiple domains' keys; the order is a documented tie-break.
/// Required fields are validated here so handlers never see partial shapes.
pub fn classify(payload: &Value) -> Result<Event> {
    let obj = match payload.as_object() {
        Some(map) if !map.is_empty() => map,
        _ => return Err(VerdictError::Validation("Unknown event type".to_string())),
    };

    if obj.contains_key("code") {
        if !non_empty_str(payload, "code") {
            return Err(VerdictError::Validation("No code provided".to_string()));
        }
        let event: CodeEvent = serde_json::from_value(payload.clone())
            .map_err(|e| VerdictError::Validation(format!("Invalid code event: {e}")))?;
        return Ok(Event::Code(event));
    }

    if obj.contains_key("market_data") {
        let has_data = payload
            .get("market_data")
            .and_then(|v| v.as_object())
            .map(|m| !m.is_empty())
            .unwrap_or(false);
        if !has_data {
            return Err(VerdictError::Validation("Missing market data".to_string()));
        }
        let event: MarketEvent = serde_json::from_value(payload.clone())
            .map_err(|e| VerdictError::Validation(format!("Invalid market event: {e}")))?;
        return Ok(Event::Market(event));
    }

    if obj.contains_key("flight_id") {
        if !non_empty_str(payload, "flight_id")
            || !non_empty_str(payload, "status")
            || !non_empty_str(payload, "timestamp")
        {
            return Err(VerdictError::Validation(
                "Missing required flight event fields".to_string(),
            ));
        }
        let event: FlightEvent = serde_json::from_value(payload.clone())
            .map_err(|e| VerdictError::Validation(format!("Invalid flight event: {e}")))?;
        return Ok(Event::Flight(event));
    }

    Err(VerdictError::Validation("Unknown event type".to_string()))
}
