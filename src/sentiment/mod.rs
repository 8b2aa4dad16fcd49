// Sentiment subsystem: polarity scoring and hostility classification.

pub mod classifier;
pub mod lexicon;
pub mod traits;

pub use classifier::{Classification, HostilityClassifier};
pub use lexicon::LexiconScorer;
pub use traits::PolarityScorer;
