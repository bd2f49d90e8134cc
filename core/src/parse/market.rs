// Market response parsing: action label + trade size extraction.
use crate::decision::{ActionType, Decision, DecisionDetails, TradeSize};
use crate::event::MarketData;
use crate::parse::confidence::determine_confidence;
use crate::parse::steps::extract_steps;
use once_cell::sync::Lazy;
use regex::Regex;

static ACTION_LABEL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:1\.\s*)?Action:\s*\(?(\w+)").unwrap());

static SIZE_PERCENT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)size:?\s*(?:approximately\s+|about\s+|around\s+|~\s*)?([\d.]+)\s*%").unwrap()
});

static SIZE_AMOUNT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(?:size|buy|sell):?\s*(?:approximately\s+|about\s+)?([\d.]+)").unwrap()
});

static SIZE_RANGE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)size:?\s*(?:between\s+)?([\d.]+)\s*(?:-|to|and)\s*([\d.]+)").unwrap()
});

/// `1. Action: BUY` or `Action: BUY`, token upper-cased. Tokens outside the
/// BUY/SELL/HOLD set fold to HOLD, as does a missing label.
fn extract_action(response: &str) -> ActionType {
    let token = ACTION_LABEL
        .captures(response)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_uppercase());
    match token.as_deref() {
        Some("BUY") => ActionType::Buy,
        Some("SELL") => ActionType::Sell,
        _ => ActionType::Hold,
    }
}

/// `size: ~12%` style percentage.
fn extract_size_percent(response: &str) -> Option<TradeSize> {
    let value: f64 = SIZE_PERCENT.captures(response)?.get(1)?.as_str().parse().ok()?;
    Some(TradeSize::Percent(format!("{value:.1}%")))
}

/// Absolute quantity near "size"/"buy"/"sell".
fn extract_size_amount(response: &str) -> Option<TradeSize> {
    let value: f64 = SIZE_AMOUNT.captures(response)?.get(1)?.as_str().parse().ok()?;
    Some(TradeSize::Amount(value))
}

/// `size: 1-3` / `size: between 1 and 3`; yields the arithmetic mean.
fn extract_size_range(response: &str) -> Option<TradeSize> {
    let caps = SIZE_RANGE.captures(response)?;
    let low: f64 = caps.get(1)?.as_str().parse().ok()?;
    let high: f64 = caps.get(2)?.as_str().parse().ok()?;
    Some(TradeSize::Amount((low + high) / 2.0))
}

/// Pattern priority: percentage, then absolute quantity, then range. The
/// first pattern that matches wins even when a later one would also match.
fn extract_size(response: &str) -> TradeSize {
    extract_size_percent(response)
        .or_else(|| extract_size_amount(response))
        .or_else(|| extract_size_range(response))
        .unwrap_or(TradeSize::Amount(0.0))
}

pub fn parse(response: &str, market_data: &MarketData) -> Decision {
    let steps = extract_steps(response);
    let action_type = extract_action(response);
    let size = extract_size(response);
    let confidence = determine_confidence(response);

    Decision {
        action_type,
        details: DecisionDetails::Market {
            asset: market_data.asset.clone(),
            price: market_data.price,
            size,
            raw_response: response.to_string(),
        },
        confidence,
        reasoning: response.to_string(),
        steps,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{Indicators, Macd, MarketContext};

    fn market_data() -> MarketData {
        MarketData {
            asset: "BTC".into(),
            price: 43250.5,
            volume: 2.5,
            indicators: Indicators {
                rsi: 65.5,
                macd: Macd {
                    value: 100.0,
                    signal: 95.0,
                    histogram: 5.0,
                },
                sentiment_score: 0.82,
            },
            market_context: MarketContext {
                trend: "bullish".into(),
                volatility: "medium".into(),
                news_sentiment: "positive".into(),
            },
        }
    }

    #[test]
    fn action_label_variants() {
        assert_eq!(extract_action("1. Action: BUY"), ActionType::Buy);
        assert_eq!(extract_action("Action: sell"), ActionType::Sell);
        assert_eq!(extract_action("Action: HOLD"), ActionType::Hold);
        assert_eq!(extract_action("no label at all"), ActionType::Hold);
        assert_eq!(extract_action("Action: ACCUMULATE"), ActionType::Hold);
    }

    #[test]
    fn percentage_size() {
        assert_eq!(
            extract_size("Size: approximately 12%"),
            TradeSize::Percent("12.0%".into())
        );
        assert_eq!(
            extract_size("size: ~5%"),
            TradeSize::Percent("5.0%".into())
        );
    }

    #[test]
    fn absolute_size() {
        assert_eq!(extract_size("Size: 0.5"), TradeSize::Amount(0.5));
        assert_eq!(extract_size("buy 2.5 BTC"), TradeSize::Amount(2.5));
    }

    #[test]
    fn range_size_uses_mean() {
        assert_eq!(
            extract_size("Size: between 1 and 3"),
            TradeSize::Amount(2.0)
        );
    }

    #[test]
    fn dashed_range_resolves_via_absolute_pattern() {
        // Priority is percent -> absolute -> range; the absolute pattern
        // sees the lower bound first.
        assert_eq!(extract_size("size: 10-20"), TradeSize::Amount(10.0));
    }

    #[test]
    fn missing_size_defaults_to_zero() {
        assert_eq!(extract_size("No sizing guidance."), TradeSize::Amount(0.0));
    }

    #[test]
    fn parse_builds_market_decision() {
        let response = "1. Action: BUY\n2. Size: approximately 12%\n3. Momentum is clearly strong.";
        let decision = parse(response, &market_data());
        assert_eq!(decision.action_type, ActionType::Buy);
        assert_eq!(decision.confidence, 0.9);
        match decision.details {
            DecisionDetails::Market {
                ref asset,
                price,
                ref size,
                ..
            } => {
                assert_eq!(asset, "BTC");
                assert_eq!(price, 43250.5);
                assert_eq!(*size, TradeSize::Percent("12.0%".into()));
            }
            ref other => panic!("unexpected details: {other:?}"),
        }
        assert_eq!(decision.steps.len(), 3);
    }
}
