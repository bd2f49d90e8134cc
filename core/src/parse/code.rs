// Code-fix response parsing: four-section split.
use crate::decision::{ActionType, Decision, DecisionDetails};
use crate::parse::confidence::determine_confidence;
use crate::parse::steps::extract_steps;

const SECTION_HEADERS: [&str; 4] = ["ISSUE ANALYSIS", "SOLUTION", "EXPLANATION", "BEST PRACTICES"];

/// Split the response into the four named sections.
///
/// A line containing a header (case-insensitive substring) activates that
/// section; subsequent non-empty lines accumulate into it. Header lines
/// themselves are not accumulated, and lines before the first recognized
/// header are discarded. When a line names several headers, the last one in
/// declaration order wins.
fn split_sections(response: &str) -> [String; 4] {
    let mut sections: [String; 4] = Default::default();
    let mut current: Option<usize> = None;

    for line in response.lines() {
        let upper = line.to_uppercase();
        let mut is_header = false;
        for (idx, header) in SECTION_HEADERS.iter().enumerate() {
            if upper.contains(header) {
                current = Some(idx);
                is_header = true;
            }
        }
        if is_header {
            continue;
        }
        if let Some(idx) = current {
            if !line.trim().is_empty() {
                sections[idx].push_str(line);
                sections[idx].push('\n');
            }
        }
    }

    sections.map(|s| s.trim().to_string())
}

pub fn parse(response: &str) -> Decision {
    let [analysis, solution, explanation, best_practices] = split_sections(response);
    // Only the SOLUTION section contributes ordered steps.
    let steps = extract_steps(&solution);
    let confidence = determine_confidence(response);

    Decision {
        action_type: ActionType::Fix,
        details: DecisionDetails::Code {
            analysis,
            solution,
            explanation,
            best_practices,
        },
        confidence,
        reasoning: response.to_string(),
        steps,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RESPONSE: &str = "\
Preamble that belongs to no section.
1. ISSUE ANALYSIS
The variable x is undefined.
2. SOLUTION
Define x before use. You must:
1. Add an assignment.
2. Re-run the script.
3. EXPLANATION
Names must be bound before they are referenced.
4. BEST PRACTICES
Use a linter.";

    #[test]
    fn splits_all_four_sections() {
        let decision = parse(RESPONSE);
        assert_eq!(decision.action_type, ActionType::Fix);
        match decision.details {
            DecisionDetails::Code {
                ref analysis,
                ref solution,
                ref explanation,
                ref best_practices,
            } => {
                assert_eq!(analysis, "The variable x is undefined.");
                assert!(solution.starts_with("Define x before use."));
                assert_eq!(explanation, "Names must be bound before they are referenced.");
                assert_eq!(best_practices, "Use a linter.");
            }
            ref other => panic!("unexpected details: {other:?}"),
        }
    }

    #[test]
    fn steps_come_from_solution_only() {
        let decision = parse(RESPONSE);
        assert_eq!(
            decision.steps,
            vec!["Add an assignment.", "Re-run the script."]
        );
    }

    #[test]
    fn confidence_reflects_full_response() {
        // "must" is a high-tier phrase even though it sits in SOLUTION.
        assert_eq!(parse(RESPONSE).confidence, 0.9);
    }

    #[test]
    fn headers_match_case_insensitively() {
        let response = "issue analysis\nbad code\nsolution\nfix it";
        let decision = parse(response);
        match decision.details {
            DecisionDetails::Code {
                ref analysis,
                ref solution,
                ..
            } => {
                assert_eq!(analysis, "bad code");
                assert_eq!(solution, "fix it");
            }
            ref other => panic!("unexpected details: {other:?}"),
        }
    }

    #[test]
    fn unstructured_response_yields_empty_sections() {
        let decision = parse("no headers at all");
        match decision.details {
            DecisionDetails::Code {
                ref analysis,
                ref solution,
                ref explanation,
                ref best_practices,
            } => {
                assert!(analysis.is_empty());
                assert!(solution.is_empty());
                assert!(explanation.is_empty());
                assert!(best_practices.is_empty());
            }
            ref other => panic!("unexpected details: {other:?}"),
        }
        assert!(decision.steps.is_empty());
    }
}
