// Prompt synthesis: one pure function per event domain.
//
// Prompt text is deterministic given the event, so test fixtures do not need
// a live model backend.
use crate::event::{CodeEvent, FlightEvent, MarketEvent};
use std::fmt::Write;

/// 2-decimal, thousands-separated rendering, e.g. 43250.5 -> "43,250.50".
fn format_thousands(value: f64) -> String {
    let negative = value < 0.0;
    let formatted = format!("{:.2}", value.abs());
    let (int_part, frac_part) = formatted.split_once('.').unwrap_or((&formatted, "00"));
    let mut grouped = String::new();
    for (i, c) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    let sign = if negative { "-" } else { "" };
    format!("{sign}{grouped}.{frac_part}")
}

pub fn flight_prompt(event: &FlightEvent) -> String {
    let mut prompt = format!(
        "Flight {} is currently {} as of {}. ",
        event.flight_id, event.status, event.timestamp
    );

    if let Some(delay) = event.delay_minutes {
        let _ = write!(prompt, "The flight is delayed by {delay} minutes. ");
    }
    if let Some(reason) = &event.reason {
        let _ = write!(prompt, "The reason given is: {reason}. ");
    }

    prompt.push_str(
        "Based on this information, what action should be taken? \
         Consider passenger impact, operational constraints, and airline policies. \
         Respond with a structured decision including action type, specific details, \
         confidence level, and reasoning. List specific steps that should be taken.",
    );

    prompt
}

pub fn market_prompt(event: &MarketEvent) -> String {
    let data = &event.market_data;
    let mut prompt = format!(
        "Analyze the following market conditions for {}:\n\n\
         Price: ${}\n\
         Volume: {}\n\
         RSI: {}\n\
         MACD Value: {}\n\
         MACD Signal: {}\n\
         MACD Histogram: {}\n\
         Sentiment Score: {}\n\
         Market Trend: {}\n\
         Volatility: {}\n\
         News Sentiment: {}\n\n\
         Current Portfolio:\n",
        data.asset,
        format_thousands(data.price),
        data.volume,
        data.indicators.rsi,
        data.indicators.macd.value,
        data.indicators.macd.signal,
        data.indicators.macd.histogram,
        data.indicators.sentiment_score,
        data.market_context.trend,
        data.market_context.volatility,
        data.market_context.news_sentiment,
    );

    for (asset, amount) in &event.portfolio {
        let _ = writeln!(prompt, "{}: {}", asset, format_thousands(*amount));
    }

    prompt.push_str(
        "\nBased on this information, what trading action should be taken? \
         Consider technical indicators, market sentiment, and risk management. \
         Provide a structured response with:\n\
         1. Action (BUY/SELL/HOLD)\n\
         2. Size (if BUY/SELL)\n\
         3. Reasoning\n\
         4. Risk assessment\n\
         5. Confidence level",
    );

    prompt
}

pub fn code_prompt(event: &CodeEvent) -> String {
    let mut prompt = String::from(
        "As a Python expert, analyze this code and provide a detailed fix. \
         Format your response in clear sections:\n\n",
    );

    let _ = write!(prompt, "CODE TO FIX:\n```python\n{}\n```\n\n", event.code);

    let failed = event
        .execution_result
        .as_ref()
        .map(|r| !r.success)
        .unwrap_or(true);
    if failed {
        let ctx = event.error_context.clone().unwrap_or_default();
        let _ = write!(
            prompt,
            "ERROR DETAILS:\n\
             - Type: {}\n\
             - Message: {}\n\
             - Line: {}\n\
             - Traceback:\n{}\n\n",
            ctx.error_type.as_deref().unwrap_or("unknown"),
            ctx.error_message.as_deref().unwrap_or("unknown"),
            ctx.error_line
                .map(|l| l.to_string())
                .unwrap_or_else(|| "unknown".to_string()),
            ctx.traceback.as_deref().unwrap_or(""),
        );
    }

    if let Some(output) = event
        .execution_result
        .as_ref()
        .and_then(|r| r.output.as_deref())
        .filter(|o| !o.is_empty())
    {
        let _ = write!(prompt, "OUTPUT:\n{output}\n\n");
    }

    prompt.push_str(
        "Please provide a detailed analysis and fix in the following format:\n\n\
         1. ISSUE ANALYSIS\n   Explain what's wrong with the code\n\n\
         2. SOLUTION\n   Provide the corrected code with explanations\n\n\
         3. EXPLANATION\n   Explain why the fix works\n\n\
         4. BEST PRACTICES\n   List specific practices to prevent similar issues\n\n\
         Make your response clear and actionable.",
    );

    prompt
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{
        ErrorContext, ExecutionResult, Indicators, Macd, MarketContext, MarketData,
    };

    fn flight_event() -> FlightEvent {
        FlightEvent {
            flight_id: "AC1234".into(),
            status: "DELAYED".into(),
            timestamp: "2025-01-01T10:00:00Z".into(),
            delay_minutes: Some(120),
            reason: Some("Weather conditions".into()),
        }
    }

    #[test]
    fn thousands_formatting() {
        assert_eq!(format_thousands(43250.5), "43,250.50");
        assert_eq!(format_thousands(999.0), "999.00");
        assert_eq!(format_thousands(1_000_000.0), "1,000,000.00");
        assert_eq!(format_thousands(-1234.56), "-1,234.56");
    }

    #[test]
    fn flight_prompt_includes_optional_fields() {
        let prompt = flight_prompt(&flight_event());
        assert!(prompt.starts_with("Flight AC1234 is currently DELAYED"));
        assert!(prompt.contains("delayed by 120 minutes"));
        assert!(prompt.contains("The reason given is: Weather conditions."));
        assert!(prompt.contains("what action should be taken?"));
    }

    #[test]
    fn flight_prompt_omits_absent_fields() {
        let mut event = flight_event();
        event.delay_minutes = None;
        event.reason = None;
        let prompt = flight_prompt(&event);
        assert!(!prompt.contains("delayed by"));
        assert!(!prompt.contains("reason given"));
    }

    #[test]
    fn market_prompt_renders_indicators_and_portfolio() {
        let event = MarketEvent {
            market_data: MarketData {
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
            },
            portfolio: [("BTC".to_string(), 1.5), ("USD".to_string(), 50000.0)]
                .into_iter()
                .collect(),
        };
        let prompt = market_prompt(&event);
        assert!(prompt.contains("Price: $43,250.50"));
        assert!(prompt.contains("RSI: 65.5"));
        assert!(prompt.contains("Market Trend: bullish"));
        assert!(prompt.contains("BTC: 1.50"));
        assert!(prompt.contains("USD: 50,000.00"));
        assert!(prompt.contains("1. Action (BUY/SELL/HOLD)"));
    }

    #[test]
    fn code_prompt_embeds_error_context_on_failure() {
        let event = CodeEvent {
            code: "print(x)".into(),
            execution_result: Some(ExecutionResult {
                success: false,
                output: None,
            }),
            error_context: Some(ErrorContext {
                error_type: Some("NameError".into()),
                error_message: Some("name 'x' is not defined".into()),
                error_line: Some(1),
                traceback: Some("Traceback (most recent call last): ...".into()),
            }),
        };
        let prompt = code_prompt(&event);
        assert!(prompt.contains("```python\nprint(x)\n```"));
        assert!(prompt.contains("- Type: NameError"));
        assert!(prompt.contains("- Line: 1"));
        assert!(prompt.contains("1. ISSUE ANALYSIS"));
    }

    #[test]
    fn code_prompt_appends_output_on_success() {
        let event = CodeEvent {
            code: "print('hi')".into(),
            execution_result: Some(ExecutionResult {
                success: true,
                output: Some("hi".into()),
            }),
            error_context: None,
        };
        let prompt = code_prompt(&event);
        assert!(!prompt.contains("ERROR DETAILS"));
        assert!(prompt.contains("OUTPUT:\nhi"));
    }
}
