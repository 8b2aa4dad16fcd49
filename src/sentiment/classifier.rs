// Hostility classification policy.
//
// Two signals decide the label, with explicit precedence: a hostile-term
// lexicon match forces Hostile regardless of polarity; otherwise polarity
// below the configured negative threshold is Hostile, polarity above a
// small positive band is Positive, and everything between is Neutral.
//
// The classifier is a pure function of the text — no side effects, same
// output for the same input.

use crate::model::HostilityLabel;

use super::traits::PolarityScorer;

/// Polarity above this is labeled Positive (when no hostile signal fired).
const POSITIVE_BAND: f64 = 0.05;

/// The output of classifying one post's text.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Classification {
    pub polarity: f64,
    pub label: HostilityLabel,
    /// True when a configured hostile keyword matched. Lexicon precedence:
    /// this alone makes the label Hostile.
    pub lexicon_hit: bool,
}

/// Combines a polarity scorer with the hostile-term lexicon.
pub struct HostilityClassifier<S: PolarityScorer> {
    scorer: S,
    /// Hostile when polarity falls below this (and no lexicon hit decided first).
    polarity_threshold: f64,
    /// Lowercased hostile terms, matched as substrings of the lowercased text.
    keywords: Vec<String>,
}

impl<S: PolarityScorer> HostilityClassifier<S> {
    /// `keywords` must already be normalized (lowercased, non-empty) —
    /// `keywords::normalize` does this.
    pub fn new(scorer: S, polarity_threshold: f64, keywords: Vec<String>) -> Self {
        Self {
            scorer,
            polarity_threshold,
            keywords,
        }
    }

    /// Classify one post's text.
    ///
    /// Empty or whitespace-only text yields neutral polarity and a
    /// non-hostile label — never an error.
    pub fn classify(&self, text: &str) -> Classification {
        if text.trim().is_empty() {
            return Classification {
                polarity: 0.0,
                label: HostilityLabel::Neutral,
                lexicon_hit: false,
            };
        }

        let polarity = self.scorer.score(text);

        let lower = text.to_lowercase();
        let lexicon_hit = self.keywords.iter().any(|k| lower.contains(k.as_str()));

        let label = if lexicon_hit || polarity < self.polarity_threshold {
            HostilityLabel::Hostile
        } else if polarity > POSITIVE_BAND {
            HostilityLabel::Positive
        } else {
            HostilityLabel::Neutral
        };

        Classification {
            polarity,
            label,
            lexicon_hit,
        }
    }
}
