// Valence-lexicon polarity scorer — the default `PolarityScorer`.
//
// A small embedded word-valence table in the TextBlob/VADER tradition:
// tokenize, look up each token's valence, flip the sign after a negation
// token, and average over the tokens that matched. Zero API calls, runs
// locally, fully deterministic. Swap in a pretrained model via the
// `PolarityScorer` trait when lexicon coverage isn't enough.

use super::traits::PolarityScorer;

/// (token, valence) pairs. Valence is in [-1, 1].
const VALENCE: &[(&str, f64)] = &[
    // Strongly negative
    ("destroying", -0.9),
    ("destroy", -0.85),
    ("destroyed", -0.85),
    ("hate", -0.9),
    ("hatred", -0.9),
    ("genocide", -1.0),
    ("massacre", -1.0),
    ("atrocity", -0.95),
    ("atrocities", -0.95),
    ("terror", -0.9),
    ("terrorist", -0.9),
    ("terrorism", -0.9),
    ("murder", -0.95),
    ("murderers", -0.95),
    ("evil", -0.85),
    ("enemy", -0.8),
    ("enemies", -0.8),
    ("traitor", -0.85),
    ("traitors", -0.85),
    ("crush", -0.7),
    ("eradicate", -0.9),
    ("invaders", -0.75),
    ("oppression", -0.8),
    ("oppressors", -0.8),
    ("brutality", -0.85),
    ("brutal", -0.75),
    // Moderately negative
    ("corrupt", -0.7),
    ("corruption", -0.7),
    ("failing", -0.6),
    ("failure", -0.6),
    ("failed", -0.6),
    ("shame", -0.6),
    ("shameful", -0.65),
    ("disgrace", -0.7),
    ("disgraceful", -0.7),
    ("liar", -0.7),
    ("lies", -0.6),
    ("fraud", -0.7),
    ("fake", -0.55),
    ("propaganda", -0.55),
    ("crisis", -0.5),
    ("collapse", -0.55),
    ("boycott", -0.6),
    ("attack", -0.6),
    ("attacks", -0.6),
    ("violence", -0.7),
    ("violent", -0.7),
    ("threat", -0.55),
    ("dangerous", -0.55),
    ("persecution", -0.75),
    ("siege", -0.6),
    ("occupation", -0.5),
    // Mildly negative
    ("bad", -0.4),
    ("wrong", -0.35),
    ("poor", -0.35),
    ("sad", -0.4),
    ("angry", -0.45),
    ("unfair", -0.45),
    ("problem", -0.3),
    ("worst", -0.6),
    ("awful", -0.6),
    ("terrible", -0.6),
    ("horrible", -0.65),
    // Positive
    ("good", 0.5),
    ("great", 0.6),
    ("nice", 0.5),
    ("love", 0.7),
    ("loved", 0.7),
    ("beautiful", 0.65),
    ("wonderful", 0.7),
    ("excellent", 0.75),
    ("amazing", 0.7),
    ("proud", 0.55),
    ("peace", 0.6),
    ("peaceful", 0.6),
    ("hope", 0.5),
    ("hopeful", 0.55),
    ("progress", 0.45),
    ("thriving", 0.6),
    ("prosperity", 0.6),
    ("celebrate", 0.6),
    ("welcome", 0.45),
    ("support", 0.4),
    ("together", 0.35),
    ("best", 0.6),
    ("happy", 0.6),
    ("joy", 0.65),
    ("thank", 0.5),
    ("thanks", 0.5),
];

/// Tokens that flip the valence of the word that follows them.
const NEGATIONS: &[&str] = &["not", "no", "never", "cannot", "cant", "dont", "isnt", "arent", "wont"];

/// The default polarity scorer. Stateless; construction is free.
#[derive(Debug, Default, Clone, Copy)]
pub struct LexiconScorer;

impl LexiconScorer {
    pub fn new() -> Self {
        Self
    }

    fn valence_of(token: &str) -> Option<f64> {
        VALENCE
            .iter()
            .find(|(word, _)| *word == token)
            .map(|(_, v)| *v)
    }
}

impl PolarityScorer for LexiconScorer {
    fn score(&self, text: &str) -> f64 {
        if text.trim().is_empty() {
            return 0.0;
        }

        // Lowercase and split on non-alphanumeric. Apostrophes are dropped
        // so "don't" tokenizes to "dont" and matches the negation list.
        let cleaned: String = text
            .to_lowercase()
            .chars()
            .map(|c| {
                if c.is_alphanumeric() || c == '#' || c == '@' {
                    c
                } else if c == '\'' {
                    '\0'
                } else {
                    ' '
                }
            })
            .filter(|&c| c != '\0')
            .collect();

        let tokens: Vec<&str> = cleaned.split_whitespace().collect();

        let mut sum = 0.0;
        let mut matched = 0usize;
        let mut negated = false;

        for token in &tokens {
            // Strip hashtag/mention sigils before lookup
            let bare = token.trim_start_matches(['#', '@']);

            if NEGATIONS.contains(&bare) {
                negated = true;
                continue;
            }

            if let Some(valence) = Self::valence_of(bare) {
                sum += if negated { -valence } else { valence };
                matched += 1;
            }
            negated = false;
        }

        if matched == 0 {
            return 0.0;
        }

        (sum / matched as f64).clamp(-1.0, 1.0)
    }
}
