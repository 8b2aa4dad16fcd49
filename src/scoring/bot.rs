// Bot-likelihood heuristic — advisory automation signal per author.
//
// Two behavioral patterns feed it: abnormal posting rate (too many posts
// inside a short rolling window) and duplicate text (the same normalized
// text repeated across posts). The result is a 0-100 score, never a hard
// verdict — an analyst decides what to do with it.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Thresholds for the bot heuristic.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BotThresholds {
    /// Rolling window length in seconds (default 600 — ten minutes).
    pub window_secs: i64,
    /// Posts within one window at or above this count saturate the rate
    /// signal (default 5).
    pub rate_threshold: usize,
    /// Identical normalized texts at or above this count saturate the
    /// duplicate signal (default 3).
    pub duplicate_threshold: usize,
}

impl Default for BotThresholds {
    fn default() -> Self {
        Self {
            window_secs: 600,
            rate_threshold: 5,
            duplicate_threshold: 3,
        }
    }
}

impl BotThresholds {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.window_secs <= 0 {
            return Err(ConfigError::NonPositiveBotWindow(self.window_secs));
        }
        if self.rate_threshold == 0 {
            return Err(ConfigError::ZeroBotRate);
        }
        if self.duplicate_threshold < 2 {
            return Err(ConfigError::LowDuplicateThreshold);
        }
        Ok(())
    }
}

/// The computed signals for one author, kept for report transparency.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BotSignals {
    /// Most posts observed inside any single rolling window.
    pub max_burst: usize,
    /// Highest repetition count of any single normalized text.
    pub max_duplicates: usize,
    /// Advisory likelihood, 0-100.
    pub score: f64,
}

/// Compute bot signals for one author's posts.
///
/// `posts` is (created_at, text) pairs in any order. Empty input yields an
/// all-zero signal.
pub fn compute_bot_signals(posts: &[(DateTime<Utc>, &str)], thresholds: &BotThresholds) -> BotSignals {
    if posts.is_empty() {
        return BotSignals {
            max_burst: 0,
            max_duplicates: 0,
            score: 0.0,
        };
    }

    // Rate signal: sliding window over sorted timestamps.
    let mut times: Vec<i64> = posts.iter().map(|(t, _)| t.timestamp()).collect();
    times.sort_unstable();

    let mut max_burst = 0usize;
    let mut start = 0usize;
    for end in 0..times.len() {
        while times[end] - times[start] > thresholds.window_secs {
            start += 1;
        }
        max_burst = max_burst.max(end - start + 1);
    }

    // Duplicate signal: count identical normalized texts.
    let mut counts: HashMap<String, usize> = HashMap::new();
    for (_, text) in posts {
        let normalized = normalize_text(text);
        if normalized.is_empty() {
            continue;
        }
        *counts.entry(normalized).or_default() += 1;
    }
    let max_duplicates = counts.values().copied().max().unwrap_or(0);

    // Single posts never trip the rate signal; a burst only counts once
    // it involves more than one post.
    let rate_signal = if max_burst > 1 {
        (max_burst as f64 / thresholds.rate_threshold as f64).min(1.0)
    } else {
        0.0
    };
    let duplicate_signal = if max_duplicates > 1 {
        (max_duplicates as f64 / thresholds.duplicate_threshold as f64).min(1.0)
    } else {
        0.0
    };

    BotSignals {
        max_burst,
        max_duplicates,
        score: rate_signal.max(duplicate_signal) * 100.0,
    }
}

/// Lowercase and collapse whitespace so trivial edits don't defeat
/// duplicate detection.
fn normalize_text(text: &str) -> String {
    text.split_whitespace()
        .map(|w| w.to_lowercase())
        .collect::<Vec<_>>()
        .join(" ")
}
