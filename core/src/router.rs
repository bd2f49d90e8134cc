// Event router: classify -> synthesize -> stream model -> parse.
use crate::decision::Decision;
use crate::event::{classify, CodeEvent, Event, FlightEvent, MarketEvent};
use crate::llm::RealtimeClient;
use crate::prompt;
use crate::{parse, Result};
use serde_json::Value;
use tracing::{error, info};

/// Routes raw event payloads through the decision pipeline. One invocation
/// is single-flow: classification, synthesis, the model round trip, and
/// parsing run sequentially with the network call as the only suspension
/// point.
pub struct EventRouter {
    client: RealtimeClient,
}

impl EventRouter {
    pub fn new(client: RealtimeClient) -> Self {
        Self { client }
    }

    /// Process one event payload into a Decision. Never fails: every error
    /// on the way (unknown domain, validation, model exhaustion, parsing)
    /// degrades to the uniform error Decision so the caller's loop can
    /// continue.
    pub async fn process(&self, payload: &Value) -> Decision {
        let event = match classify(payload) {
            Ok(event) => event,
            Err(err) => {
                error!(target: "event_router", error = %err, "Failed to classify event");
                return Decision::error(err.to_string());
            }
        };

        let result = match &event {
            Event::Code(code) => self.handle_code(code).await,
            Event::Market(market) => self.handle_market(market).await,
            Event::Flight(flight) => self.handle_flight(flight).await,
        };

        match result {
            Ok(decision) => decision,
            Err(err) => {
                error!(target: "event_router", error = %err, "Pipeline error");
                Decision::error(err.to_string())
            }
        }
    }

    async fn handle_flight(&self, event: &FlightEvent) -> Result<Decision> {
        let prompt = prompt::flight_prompt(event);
        let response = self.client.stream_text(&prompt, None).await?;
        let decision = parse::flight::parse(&response);
        info!(
            target: "event_router",
            flight_id = %event.flight_id,
            action = %decision.action_type,
            "Determined flight action"
        );
        Ok(decision)
    }

    async fn handle_market(&self, event: &MarketEvent) -> Result<Decision> {
        let prompt = prompt::market_prompt(event);
        let response = self.client.stream_text(&prompt, None).await?;
        let decision = parse::market::parse(&response, &event.market_data);
        info!(
            target: "event_router",
            asset = %event.market_data.asset,
            action = %decision.action_type,
            "Determined trading action"
        );
        Ok(decision)
    }

    async fn handle_code(&self, event: &CodeEvent) -> Result<Decision> {
        let prompt = prompt::code_prompt(event);
        let response = self.client.stream_text(&prompt, None).await?;
        let decision = parse::code::parse(&response);
        info!(
            target: "event_router",
            action = %decision.action_type,
            "Determined fix action"
        );
        Ok(decision)
    }
}
