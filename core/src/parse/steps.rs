// Numbered-step extraction from model text.
use once_cell::sync::Lazy;
use regex::Regex;

static STEP_MARKER: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+\.\s+").unwrap());

/// Extract the ordered sequence of `<integer>. <content>` items.
///
/// Content runs from the marker to the next numbered marker or the end of
/// the line, whichever comes first, and is trimmed. Items may share a line.
/// A text with no numbered items yields an empty sequence.
pub fn extract_steps(text: &str) -> Vec<String> {
    let markers: Vec<_> = STEP_MARKER.find_iter(text).collect();
    let mut steps = Vec::with_capacity(markers.len());

    for (i, marker) in markers.iter().enumerate() {
        let start = marker.end();
        let mut end = markers
            .get(i + 1)
            .map(|next| next.start())
            .unwrap_or(text.len());
        if let Some(newline) = text[start..end].find('\n') {
            end = start + newline;
        }
        let content = text[start..end].trim();
        if !content.is_empty() {
            steps.push(content.to_string());
        }
    }

    steps
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_steps_on_separate_lines() {
        let text = "Plan:\n1. Notify passengers.\n2. Arrange flights.\n3. Monitor status.";
        assert_eq!(
            extract_steps(text),
            vec![
                "Notify passengers.",
                "Arrange flights.",
                "Monitor status."
            ]
        );
    }

    #[test]
    fn splits_steps_sharing_one_line() {
        let text = "We should definitely rebook. 1. Notify affected passengers. 2. Arrange alternate flights.";
        assert_eq!(
            extract_steps(text),
            vec!["Notify affected passengers.", "Arrange alternate flights."]
        );
    }

    #[test]
    fn content_stops_at_end_of_line() {
        let text = "1. First step\ntrailing prose that is not a step";
        assert_eq!(extract_steps(text), vec!["First step"]);
    }

    #[test]
    fn no_numbered_lines_yields_empty() {
        assert!(extract_steps("No structure here at all.").is_empty());
        assert!(extract_steps("").is_empty());
    }

    #[test]
    fn decimal_numbers_are_not_steps() {
        assert!(extract_steps("Size: 0.5 units of BTC").is_empty());
    }

    #[test]
    fn extraction_is_idempotent() {
        let text = "1. One\n2. Two";
        assert_eq!(extract_steps(text), extract_steps(text));
    }
}
