// Confidence lexicon: phrase presence -> confidence tier.

/// Phrases signalling strong commitment.
static HIGH_CONFIDENCE: &[&str] = &[
    "definitely",
    "certainly",
    "clearly",
    "obvious",
    "must",
    "essential",
    "critical",
    "always",
    "fundamental",
];

/// Hedging phrases.
static LOW_CONFIDENCE: &[&str] = &[
    "might", "may", "could", "possibly", "perhaps", "consider", "maybe", "uncertain", "unclear",
    "try",
];

/// Advisory phrases.
static MEDIUM_CONFIDENCE: &[&str] = &[
    "should",
    "recommend",
    "suggest",
    "typically",
    "generally",
    "usually",
    "often",
    "common",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfidenceTier {
    High,
    Medium,
    Low,
    Default,
}

impl ConfidenceTier {
    pub fn score(self) -> f64 {
        match self {
            ConfidenceTier::High => 0.9,
            ConfidenceTier::Medium => 0.7,
            ConfidenceTier::Low => 0.5,
            ConfidenceTier::Default => 0.6,
        }
    }
}

/// Case-insensitive substring match against the three phrase sets.
///
/// Evaluation order is fixed: high before low before medium. The first
/// matching tier wins regardless of how many sets match; this precedence is
/// deliberate.
pub fn confidence_tier(text: &str) -> ConfidenceTier {
    let lower = text.to_lowercase();
    if HIGH_CONFIDENCE.iter().any(|w| lower.contains(w)) {
        ConfidenceTier::High
    } else if LOW_CONFIDENCE.iter().any(|w| lower.contains(w)) {
        ConfidenceTier::Low
    } else if MEDIUM_CONFIDENCE.iter().any(|w| lower.contains(w)) {
        ConfidenceTier::Medium
    } else {
        ConfidenceTier::Default
    }
}

pub fn determine_confidence(text: &str) -> f64 {
    confidence_tier(text).score()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn high_tier_phrases_score_highest() {
        assert_eq!(determine_confidence("This is definitely the fix."), 0.9);
        assert_eq!(determine_confidence("It is CRITICAL to act now."), 0.9);
    }

    #[test]
    fn high_beats_low_when_both_present() {
        // Tier order is fixed: high checked before low before medium.
        let text = "You must act, though it might be risky.";
        assert_eq!(determine_confidence(text), 0.9);
    }

    #[test]
    fn low_beats_medium_when_both_present() {
        let text = "You should act, but it might not help.";
        assert_eq!(determine_confidence(text), 0.5);
    }

    #[test]
    fn medium_and_default_tiers() {
        assert_eq!(determine_confidence("We recommend rebooking."), 0.7);
        assert_eq!(determine_confidence("Rebook the flight now."), 0.6);
    }

    #[test]
    fn tier_is_deterministic() {
        let text = "Perhaps wait and see.";
        assert_eq!(confidence_tier(text), confidence_tier(text));
    }
}
