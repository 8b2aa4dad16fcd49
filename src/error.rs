// Engine error taxonomy.
//
// Two failure classes exist: a malformed post record (skipped and counted,
// the pipeline continues) and a misconfigured parameter (fails fast before
// any processing, because it would silently corrupt every downstream
// result). Empty input is never an error anywhere in the engine.

use thiserror::Error;

/// Errors surfaced by the analysis engine.
#[derive(Debug, Error)]
pub enum EngineError {
    /// A malformed post record. Callers running the full pipeline never see
    /// this — ingest converts it into a skip count — but single-record
    /// validation surfaces it directly.
    #[error("invalid post record: {reason}")]
    InvalidInput { reason: String },

    /// A misconfigured engine parameter, detected before processing begins.
    #[error(transparent)]
    Configuration(#[from] ConfigError),
}

/// Configuration validation failures. All of these are fatal at startup.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("engagement weight for {signal} must be non-negative, got {value}")]
    NegativeWeight { signal: &'static str, value: f64 },

    #[error("hostility polarity threshold {0} is outside [-1, 1]")]
    ThresholdOutOfRange(f64),

    #[error("community detection iteration cap must be at least 1")]
    ZeroIterationCap,

    #[error("top-N size must be at least 1")]
    ZeroTopN,

    #[error("velocity window must be positive, got {0} seconds")]
    NonPositiveWindow(i64),

    #[error("bot posting-rate threshold must be at least 1 post")]
    ZeroBotRate,

    #[error("bot duplicate-text threshold must be at least 2 occurrences")]
    LowDuplicateThreshold,

    #[error("bot rolling window must be positive, got {0} seconds")]
    NonPositiveBotWindow(i64),

    #[error("alert ratio {0} is outside [0, 1]")]
    AlertRatioOutOfRange(f64),
}
