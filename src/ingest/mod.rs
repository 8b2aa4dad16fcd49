// Ingest boundary — loosely-typed records in, validated Posts out.
//
// Collectors produce ad-hoc records (missing fields, negative counters,
// unparseable timestamps). This module converts them into the strongly
// typed `Post` before anything enters the engine. Malformed records are
// dropped and counted per reason — the pipeline continues, and the counts
// are surfaced to the caller for transparency.

pub mod entities;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::{debug, warn};

use crate::error::EngineError;
use crate::model::Post;

/// A raw post record as a collector hands it over. Everything is optional
/// or loosely typed; validation decides what survives.
#[derive(Debug, Clone, Deserialize)]
pub struct RawPost {
    pub id: Option<String>,
    pub author_id: Option<String>,
    pub text: Option<String>,
    /// RFC 3339 timestamp string.
    pub created_at: Option<String>,
    pub like_count: Option<i64>,
    pub retweet_count: Option<i64>,
    pub reply_count: Option<i64>,
    /// When absent, mentions are extracted from the text.
    #[serde(default)]
    pub mentions: Option<Vec<String>>,
    /// When absent, hashtags are extracted from the text.
    #[serde(default)]
    pub hashtags: Option<Vec<String>>,
}

/// Per-reason counts of records dropped (or flagged) at the boundary.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct IngestStats {
    pub accepted: usize,
    pub missing_field: usize,
    pub negative_counter: usize,
    pub bad_timestamp: usize,
    pub duplicate_id: usize,
    /// Future-dated posts are kept but flagged, not dropped.
    pub future_dated: usize,
}

impl IngestStats {
    pub fn skipped(&self) -> usize {
        self.missing_field + self.negative_counter + self.bad_timestamp + self.duplicate_id
    }
}

/// Validate a batch of raw records against the Post invariants.
///
/// `now` is the capture time used for future-dating checks — passed in so
/// the boundary stays deterministic under test. Duplicate identifiers keep
/// the first occurrence. An empty batch yields an empty result, no error.
pub fn validate_posts(raw: Vec<RawPost>, now: DateTime<Utc>) -> (Vec<Post>, IngestStats) {
    let mut stats = IngestStats::default();
    let mut seen_ids: HashSet<String> = HashSet::new();
    let mut posts = Vec::with_capacity(raw.len());

    for record in raw {
        match validate_one(record, now) {
            Ok(mut post) => {
                if !seen_ids.insert(post.id.clone()) {
                    stats.duplicate_id += 1;
                    continue;
                }
                if post.created_at > now {
                    post.future_dated = true;
                    stats.future_dated += 1;
                }
                stats.accepted += 1;
                posts.push(post);
            }
            Err(reason) => {
                warn!(%reason, "Dropped malformed post record");
                match reason {
                    SkipReason::MissingField(_) => stats.missing_field += 1,
                    SkipReason::NegativeCounter(_) => stats.negative_counter += 1,
                    SkipReason::BadTimestamp => stats.bad_timestamp += 1,
                }
            }
        }
    }

    debug!(
        accepted = stats.accepted,
        skipped = stats.skipped(),
        future_dated = stats.future_dated,
        "Ingest batch validated"
    );

    (posts, stats)
}

#[derive(Debug)]
enum SkipReason {
    MissingField(&'static str),
    NegativeCounter(&'static str),
    BadTimestamp,
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::MissingField(field) => write!(f, "missing field {field}"),
            SkipReason::NegativeCounter(field) => write!(f, "negative counter {field}"),
            SkipReason::BadTimestamp => write!(f, "non-parseable timestamp"),
        }
    }
}

/// Validate a single record, surfacing the failure as an `EngineError`.
/// The batch path goes through `validate_posts` instead, which counts
/// failures rather than propagating them.
pub fn validate_record(raw: RawPost, now: DateTime<Utc>) -> Result<Post, EngineError> {
    validate_one(raw, now).map_err(|reason| EngineError::InvalidInput {
        reason: reason.to_string(),
    })
}

fn validate_one(raw: RawPost, _now: DateTime<Utc>) -> Result<Post, SkipReason> {
    let id = non_empty(raw.id, "id")?;
    let author_id = non_empty(raw.author_id, "author_id")?;
    let text = raw.text.ok_or(SkipReason::MissingField("text"))?;

    let created_at = raw
        .created_at
        .ok_or(SkipReason::MissingField("created_at"))
        .and_then(|s| {
            DateTime::parse_from_rfc3339(&s)
                .map(|dt| dt.with_timezone(&Utc))
                .map_err(|_| SkipReason::BadTimestamp)
        })?;

    let like_count = counter(raw.like_count, "like_count")?;
    let retweet_count = counter(raw.retweet_count, "retweet_count")?;
    let reply_count = counter(raw.reply_count, "reply_count")?;

    // Collectors that hand over pre-split entity lists win; otherwise the
    // entities are pulled out of the raw text.
    let mentions = raw
        .mentions
        .unwrap_or_else(|| entities::extract_mentions(&text));
    let hashtags = raw
        .hashtags
        .unwrap_or_else(|| entities::extract_hashtags(&text));

    Ok(Post {
        id,
        author_id,
        text,
        created_at,
        like_count,
        retweet_count,
        reply_count,
        mentions,
        hashtags,
        future_dated: false,
    })
}

fn non_empty(value: Option<String>, field: &'static str) -> Result<String, SkipReason> {
    match value {
        Some(s) if !s.trim().is_empty() => Ok(s),
        _ => Err(SkipReason::MissingField(field)),
    }
}

fn counter(value: Option<i64>, field: &'static str) -> Result<u64, SkipReason> {
    // A missing counter is zero, not an error — collectors routinely omit
    // counters that the platform reported as absent.
    let v = value.unwrap_or(0);
    u64::try_from(v).map_err(|_| SkipReason::NegativeCounter(field))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(id: &str) -> RawPost {
        RawPost {
            id: Some(id.to_string()),
            author_id: Some("author-1".to_string()),
            text: Some("hello world".to_string()),
            created_at: Some("2026-01-15T10:00:00Z".to_string()),
            like_count: Some(1),
            retweet_count: Some(2),
            reply_count: Some(0),
            mentions: None,
            hashtags: None,
        }
    }

    fn now() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2026-02-01T00:00:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    #[test]
    fn valid_record_passes() {
        let (posts, stats) = validate_posts(vec![raw("p1")], now());
        assert_eq!(posts.len(), 1);
        assert_eq!(stats.accepted, 1);
        assert_eq!(stats.skipped(), 0);
    }

    #[test]
    fn missing_id_is_dropped_and_counted() {
        let mut bad = raw("p1");
        bad.id = None;
        let (posts, stats) = validate_posts(vec![bad, raw("p2")], now());
        assert_eq!(posts.len(), 1);
        assert_eq!(stats.missing_field, 1);
    }

    #[test]
    fn negative_counter_is_dropped() {
        let mut bad = raw("p1");
        bad.like_count = Some(-5);
        let (posts, stats) = validate_posts(vec![bad], now());
        assert!(posts.is_empty());
        assert_eq!(stats.negative_counter, 1);
    }

    #[test]
    fn bad_timestamp_is_dropped() {
        let mut bad = raw("p1");
        bad.created_at = Some("yesterday-ish".to_string());
        let (posts, stats) = validate_posts(vec![bad], now());
        assert!(posts.is_empty());
        assert_eq!(stats.bad_timestamp, 1);
    }

    #[test]
    fn duplicate_id_keeps_first() {
        let mut second = raw("p1");
        second.text = Some("different text".to_string());
        let (posts, stats) = validate_posts(vec![raw("p1"), second], now());
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].text, "hello world");
        assert_eq!(stats.duplicate_id, 1);
    }

    #[test]
    fn future_dated_is_flagged_not_dropped() {
        let mut future = raw("p1");
        future.created_at = Some("2027-01-01T00:00:00Z".to_string());
        let (posts, stats) = validate_posts(vec![future], now());
        assert_eq!(posts.len(), 1);
        assert!(posts[0].future_dated);
        assert_eq!(stats.future_dated, 1);
    }

    #[test]
    fn entities_extracted_when_lists_absent() {
        let mut record = raw("p1");
        record.text = Some("ask @alice about #Topic".to_string());
        let (posts, _) = validate_posts(vec![record], now());
        assert_eq!(posts[0].mentions, vec!["alice"]);
        assert_eq!(posts[0].hashtags, vec!["Topic"]);
    }

    #[test]
    fn supplied_entity_lists_win_over_extraction() {
        let mut record = raw("p1");
        record.text = Some("ask @alice about #Topic".to_string());
        record.mentions = Some(vec!["bob".to_string()]);
        record.hashtags = Some(vec![]);
        let (posts, _) = validate_posts(vec![record], now());
        assert_eq!(posts[0].mentions, vec!["bob"]);
        assert!(posts[0].hashtags.is_empty());
    }

    #[test]
    fn single_record_validation_surfaces_invalid_input() {
        let mut bad = raw("p1");
        bad.author_id = Some("  ".to_string());
        let err = validate_record(bad, now()).unwrap_err();
        assert!(err.to_string().contains("author_id"));
    }
}
