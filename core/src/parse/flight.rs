// Flight response parsing: keyword-scan action selection.
use crate::decision::{ActionType, Decision, DecisionDetails};
use crate::parse::confidence::determine_confidence;
use crate::parse::steps::extract_steps;

/// Ordered action keyword map; earlier entries take precedence.
static ACTION_KEYWORDS: &[(ActionType, &[&str])] = &[
    (ActionType::Rebook, &["rebook", "alternative", "reschedule"]),
    (ActionType::Notify, &["notify", "inform", "communicate", "alert"]),
    (ActionType::Cancel, &["cancel"]),
    (ActionType::Monitor, &["monitor", "observe", "track"]),
];

/// Scan the map in order; for each entry the first extracted step is checked
/// before the full response text, and the first entry matching either wins.
/// A REBOOK keyword anywhere in the response therefore beats a NOTIFY
/// keyword confined to the step list. Defaults to MONITOR.
fn determine_action(response_lower: &str, first_step_lower: &str) -> ActionType {
    for (candidate, keywords) in ACTION_KEYWORDS {
        if keywords.iter().any(|k| first_step_lower.contains(k)) {
            return *candidate;
        }
        if keywords.iter().any(|k| response_lower.contains(k)) {
            return *candidate;
        }
    }
    ActionType::Monitor
}

pub fn parse(response: &str) -> Decision {
    let response_lower = response.to_lowercase();
    let steps = extract_steps(response);
    let first_step_lower = steps
        .first()
        .map(|s| s.to_lowercase())
        .unwrap_or_default();

    let action_type = determine_action(&response_lower, &first_step_lower);
    let confidence = determine_confidence(response);

    Decision {
        action_type,
        details: DecisionDetails::Flight {
            raw_response: response.to_string(),
            num_steps: steps.len(),
        },
        confidence,
        reasoning: response.to_string(),
        steps,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notify_only_response_selects_notify() {
        let decision = parse("We might need to notify passengers of the delay.");
        assert_eq!(decision.action_type, ActionType::Notify);
        assert_eq!(decision.confidence, 0.5);
    }

    #[test]
    fn monitor_response_selects_monitor() {
        let decision = parse("Continue to monitor the situation.");
        assert_eq!(decision.action_type, ActionType::Monitor);
    }

    #[test]
    fn rebook_in_body_beats_notify_in_steps() {
        let response = "We should definitely rebook the passengers. \
                        1. Notify affected passengers. 2. Arrange alternate flights.";
        let decision = parse(response);
        assert_eq!(decision.action_type, ActionType::Rebook);
        assert_eq!(decision.confidence, 0.9);
        assert_eq!(
            decision.steps,
            vec!["Notify affected passengers.", "Arrange alternate flights."]
        );
    }

    #[test]
    fn first_step_is_checked_before_body_per_entry() {
        let response = "Background: crews were informed.\n1. Cancel the flight.\n2. Refund fares.";
        let decision = parse(response);
        // "inform" in the body matches NOTIFY before the map reaches CANCEL,
        // even though the first step says "Cancel".
        assert_eq!(decision.action_type, ActionType::Notify);
    }

    #[test]
    fn defaults_to_monitor_with_default_confidence() {
        let decision = parse("Nothing actionable here.");
        assert_eq!(decision.action_type, ActionType::Monitor);
        assert_eq!(decision.confidence, 0.6);
        assert!(decision.steps.is_empty());
    }

    #[test]
    fn details_carry_raw_response_and_step_count() {
        let response = "Rebook now.\n1. Call the desk.";
        let decision = parse(response);
        match decision.details {
            DecisionDetails::Flight {
                ref raw_response,
                num_steps,
            } => {
                assert_eq!(raw_response, response);
                assert_eq!(num_steps, 1);
            }
            ref other => panic!("unexpected details: {other:?}"),
        }
        assert_eq!(decision.reasoning, response);
    }
}
