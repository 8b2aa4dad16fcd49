// Weighted engagement score — the virality proxy.
//
// A fixed linear combination of the raw engagement counters. Reposts are
// the strongest virality signal and carry the heaviest weight, replies
// next, likes least. The weights live in a configuration object so
// analysts can retune them without touching the formula.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Per-signal weights for the engagement score.
///
/// Defaults: likes 1.0, retweets 2.0, replies 1.5. All weights must be
/// non-negative — a negative weight would break the monotonicity contract
/// and is rejected at startup.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct EngagementWeights {
    pub likes: f64,
    pub retweets: f64,
    pub replies: f64,
}

impl Default for EngagementWeights {
    fn default() -> Self {
        Self {
            likes: 1.0,
            retweets: 2.0,
            replies: 1.5,
        }
    }
}

impl EngagementWeights {
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (signal, value) in [
            ("likes", self.likes),
            ("retweets", self.retweets),
            ("replies", self.replies),
        ] {
            if value < 0.0 || value.is_nan() {
                return Err(ConfigError::NegativeWeight { signal, value });
            }
        }
        Ok(())
    }

    /// Compute the weighted engagement score for one post's counters.
    ///
    /// Monotonic non-decreasing in each counter; all-zero counters score 0.
    pub fn score(&self, likes: u64, retweets: u64, replies: u64) -> f64 {
        likes as f64 * self.likes + retweets as f64 * self.retweets + replies as f64 * self.replies
    }
}
