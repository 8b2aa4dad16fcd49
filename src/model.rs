// Core data model — the records that flow through the analysis pipeline.
//
// These types are separate from ingest and scoring so every stage can use
// them without pulling in validation or classifier internals. A `Post` is
// what survives boundary validation; a `ClassifiedPost` is a `Post` plus
// the derived fields. Neither is mutated after construction.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A validated, normalized social-media post.
///
/// Counters are unsigned by construction — negative values are rejected at
/// the ingest boundary. `mentions` and `hashtags` keep source order and may
/// contain duplicates (a post can mention the same account twice).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: String,
    pub author_id: String,
    pub text: String,
    pub created_at: DateTime<Utc>,
    pub like_count: u64,
    pub retweet_count: u64,
    pub reply_count: u64,
    pub mentions: Vec<String>,
    pub hashtags: Vec<String>,
    /// Set at ingest when `created_at` was ahead of the capture time.
    /// The post is kept but surfaced as anomalous.
    pub future_dated: bool,
}

/// Sentiment label derived from polarity and the hostile-term lexicon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HostilityLabel {
    Hostile,
    Neutral,
    Positive,
}

impl HostilityLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            HostilityLabel::Hostile => "Hostile",
            HostilityLabel::Neutral => "Neutral",
            HostilityLabel::Positive => "Positive",
        }
    }
}

impl std::fmt::Display for HostilityLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A post with its derived analysis fields. Created once by the classify
/// pass and treated as immutable afterward.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifiedPost {
    pub post: Post,
    /// Polarity in [-1.0, 1.0]; 0.0 for empty or unscorable text.
    pub polarity: f64,
    pub label: HostilityLabel,
    /// Whether a configured hostile keyword matched the text. Kept for
    /// transparency — a lexicon hit forces the Hostile label.
    pub lexicon_hit: bool,
    /// Weighted engagement score, >= 0.
    pub engagement_score: f64,
}

impl ClassifiedPost {
    pub fn is_hostile(&self) -> bool {
        self.label == HostilityLabel::Hostile
    }
}

/// An ordered collection of classified posts plus its capture window.
///
/// The window defaults to the span between the earliest and latest post
/// timestamps. KPIs are recomputed on demand from the posts — the post
/// collection is the authoritative state.
#[derive(Debug, Clone)]
pub struct CorpusSnapshot {
    pub posts: Vec<ClassifiedPost>,
    pub window_start: Option<DateTime<Utc>>,
    pub window_end: Option<DateTime<Utc>>,
}

impl CorpusSnapshot {
    /// Build a snapshot whose window spans the post timestamps.
    /// An empty collection yields an empty snapshot with no window.
    pub fn new(posts: Vec<ClassifiedPost>) -> Self {
        let window_start = posts.iter().map(|p| p.post.created_at).min();
        let window_end = posts.iter().map(|p| p.post.created_at).max();
        Self {
            posts,
            window_start,
            window_end,
        }
    }

    /// Build a snapshot with a caller-supplied capture window.
    pub fn with_window(
        posts: Vec<ClassifiedPost>,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Self {
        Self {
            posts,
            window_start: Some(start),
            window_end: Some(end),
        }
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }

    pub fn hostile(&self) -> impl Iterator<Item = &ClassifiedPost> {
        self.posts.iter().filter(|p| p.is_hostile())
    }

    pub fn hostile_count(&self) -> usize {
        self.hostile().count()
    }

    /// Fraction of the corpus classified hostile, in [0, 1].
    /// 0.0 for an empty snapshot — "no signal yet", never an error.
    pub fn hostility_ratio(&self) -> f64 {
        if self.posts.is_empty() {
            return 0.0;
        }
        self.hostile_count() as f64 / self.posts.len() as f64
    }

    /// Hostile posts per hour over the given window length in seconds.
    /// When `window_secs` is None the snapshot's own span is used.
    /// A zero-length or missing span yields 0.0.
    pub fn velocity_per_hour(&self, window_secs: Option<i64>) -> f64 {
        let span_secs = match window_secs {
            Some(s) => s,
            None => match (self.window_start, self.window_end) {
                (Some(start), Some(end)) => (end - start).num_seconds(),
                _ => 0,
            },
        };
        if span_secs <= 0 {
            return 0.0;
        }
        self.hostile_count() as f64 / (span_secs as f64 / 3600.0)
    }
}
