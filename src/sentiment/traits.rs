// Polarity scorer trait — swap-ready abstraction.
//
// The default implementation is a local valence lexicon. A pretrained
// polarity model can be dropped in behind this trait without touching the
// classifier or the pipeline. Scorers are synchronous and pure: the engine
// is a batch transform and must stay deterministic for identical text.

/// Scores the sentiment polarity of a piece of text.
pub trait PolarityScorer {
    /// Polarity in [-1.0, 1.0]: negative is hostile-leaning, positive is
    /// supportive. Empty or whitespace-only text scores 0.0, never errors.
    fn score(&self, text: &str) -> f64;
}

impl<T: PolarityScorer + ?Sized> PolarityScorer for &T {
    fn score(&self, text: &str) -> f64 {
        (**self).score(text)
    }
}
