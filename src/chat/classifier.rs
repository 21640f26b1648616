use crate::session::Sentiment;

/// Phrases indicating possible self-harm or suicide ideation. Checked first,
/// a hit here is terminal and cannot be overridden by any other tier.
const CRISIS_PHRASES: &[&str] = &[
    "suicide",
    "kill myself",
    "end my life",
    "hurt myself",
    "want to die",
    "no point living",
];

/// Hopelessness, isolation and worthlessness terms.
const HIGH_RISK_WORDS: &[&str] = &[
    "hopeless",
    "worthless",
    "trapped",
    "burden",
    "alone",
    "empty",
];

const NEGATIVE_WORDS: &[&str] = &[
    "anxious",
    "depressed",
    "sad",
    "worried",
    "scared",
    "overwhelmed",
    "stressed",
];

const POSITIVE_WORDS: &[&str] = &[
    "good",
    "better",
    "happy",
    "grateful",
    "excited",
    "confident",
    "peaceful",
];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Classification {
    pub sentiment: Sentiment,
    pub confidence: f32,
}

/// Classifies free text into a sentiment tier by keyword-list membership.
///
/// Matching is case-insensitive substring containment, not word-boundary
/// tokenization. That mirrors the shipped behavior exactly, so "empty" also
/// matches inside "emptying".
pub fn classify(text: &str) -> Classification {
    let lower = text.to_lowercase();

    if CRISIS_PHRASES.iter().any(|phrase| lower.contains(phrase)) {
        return Classification {
            sentiment: Sentiment::Critical,
            confidence: 0.9,
        };
    }

    if HIGH_RISK_WORDS.iter().any(|word| lower.contains(word)) {
        return Classification {
            sentiment: Sentiment::Negative,
            confidence: 0.8,
        };
    }

    let negative_count = NEGATIVE_WORDS
        .iter()
        .filter(|word| lower.contains(*word))
        .count();
    let positive_count = POSITIVE_WORDS
        .iter()
        .filter(|word| lower.contains(*word))
        .count();

    if positive_count > negative_count {
        Classification {
            sentiment: Sentiment::Positive,
            confidence: (0.7 + positive_count as f32 * 0.1).min(1.0),
        }
    } else if negative_count > positive_count {
        Classification {
            sentiment: Sentiment::Negative,
            confidence: (0.6 + negative_count as f32 * 0.1).min(1.0),
        }
    } else {
        Classification {
            sentiment: Sentiment::Neutral,
            confidence: 0.5,
        }
    }
}
