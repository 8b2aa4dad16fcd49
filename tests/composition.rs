// End-to-end pipeline tests: raw collector records through the full
// engine, checking the composed behavior the stages promise individually.

use argus::config::EngineConfig;
use argus::error::{ConfigError, EngineError};
use argus::forensics::{build_cooccurrence, CoOccurrenceAttribute};
use argus::ingest::RawPost;
use argus::pipeline;
use chrono::{DateTime, Utc};

fn capture_time() -> DateTime<Utc> {
    DateTime::parse_from_rfc3339("2026-03-01T12:00:00Z")
        .unwrap()
        .with_timezone(&Utc)
}

fn raw(
    id: &str,
    author: &str,
    text: &str,
    likes: i64,
    retweets: i64,
    replies: i64,
) -> RawPost {
    RawPost {
        id: Some(id.to_string()),
        author_id: Some(author.to_string()),
        text: Some(text.to_string()),
        created_at: Some("2026-03-01T10:00:00Z".to_string()),
        like_count: Some(likes),
        retweet_count: Some(retweets),
        reply_count: Some(replies),
        mentions: None,
        hashtags: None,
    }
}

// ============================================================
// The worked example: one hostile post, one benign post
// ============================================================

#[test]
fn worked_example_classification_and_ranking() {
    let mut config = EngineConfig::default();
    config.hostile_keywords = vec!["destroying".to_string()];

    let posts = vec![
        raw("1", "author-x", "they are destroying our nation #X", 10, 50, 2),
        raw("2", "author-y", "nice weather today #Y", 5, 1, 0),
    ];

    let report = pipeline::run(posts, &config, capture_time()).unwrap();

    assert_eq!(report.kpis.total_posts, 2);
    assert_eq!(report.kpis.hostile_posts, 1);
    assert!((report.kpis.hostility_ratio - 0.5).abs() < 1e-9);

    // Top-1 hostile post is post 1, engagement 10*1 + 50*2 + 2*1.5 = 113.
    let feed = &report.rankings.top_hostile_posts;
    assert_eq!(feed[0].post.id, "1");
    assert!((feed[0].engagement_score - 113.0).abs() < 1e-9);
    assert!(feed[0].lexicon_hit);

    // The benign post is classified but not hostile.
    let benign = report.posts.iter().find(|p| p.post.id == "2").unwrap();
    assert!(!benign.is_hostile());

    // Hashtags were extracted from the text at the boundary.
    assert_eq!(feed[0].post.hashtags, vec!["X"]);
}

#[test]
fn report_posts_are_sorted_by_engagement_descending() {
    let config = EngineConfig::default();
    let posts = vec![
        raw("small", "a", "plain text", 1, 0, 0),
        raw("big", "b", "plain text too", 0, 100, 0),
        raw("mid", "c", "also plain", 0, 10, 0),
    ];
    let report = pipeline::run(posts, &config, capture_time()).unwrap();
    let ids: Vec<&str> = report.posts.iter().map(|p| p.post.id.as_str()).collect();
    assert_eq!(ids, vec!["big", "mid", "small"]);
}

// ============================================================
// Empty and malformed input
// ============================================================

#[test]
fn empty_corpus_is_not_an_error() {
    let config = EngineConfig::default();
    let report = pipeline::run(vec![], &config, capture_time()).unwrap();

    assert_eq!(report.kpis.total_posts, 0);
    assert_eq!(report.kpis.hostility_ratio, 0.0);
    assert!(report.rankings.top_hostile_posts.is_empty());
    assert!(report.rankings.top_authors.is_empty());
    assert!(report.network.graph.is_empty());
    assert!(report.network.partition.is_empty());
    assert_eq!(report.ingest.accepted, 0);
}

#[test]
fn malformed_records_are_skipped_and_counted() {
    let config = EngineConfig::default();

    let mut no_id = raw("x", "a", "text", 0, 0, 0);
    no_id.id = None;
    let mut negative = raw("neg", "a", "text", 0, 0, 0);
    negative.retweet_count = Some(-3);
    let mut bad_time = raw("bt", "a", "text", 0, 0, 0);
    bad_time.created_at = Some("not a timestamp".to_string());

    let posts = vec![no_id, negative, bad_time, raw("ok", "a", "fine", 1, 1, 1)];
    let report = pipeline::run(posts, &config, capture_time()).unwrap();

    assert_eq!(report.kpis.total_posts, 1);
    assert_eq!(report.ingest.accepted, 1);
    assert_eq!(report.ingest.skipped(), 3);
    assert_eq!(report.ingest.missing_field, 1);
    assert_eq!(report.ingest.negative_counter, 1);
    assert_eq!(report.ingest.bad_timestamp, 1);
}

#[test]
fn future_dated_posts_are_flagged_but_analyzed() {
    let config = EngineConfig::default();
    let mut future = raw("f", "a", "from the future", 0, 0, 0);
    future.created_at = Some("2027-01-01T00:00:00Z".to_string());

    let report = pipeline::run(vec![future], &config, capture_time()).unwrap();
    assert_eq!(report.kpis.total_posts, 1);
    assert_eq!(report.ingest.future_dated, 1);
    assert!(report.posts[0].post.future_dated);
}

// ============================================================
// Configuration failures are fatal before processing
// ============================================================

#[test]
fn bad_config_fails_fast() {
    let mut config = EngineConfig::default();
    config.community.max_iterations = 0;

    let err = pipeline::run(vec![raw("1", "a", "text", 0, 0, 0)], &config, capture_time())
        .unwrap_err();
    match err {
        EngineError::Configuration(inner) => {
            assert_eq!(inner, ConfigError::ZeroIterationCap);
        }
        other => panic!("expected configuration error, got {other}"),
    }
}

#[test]
fn negative_weight_fails_fast() {
    let mut config = EngineConfig::default();
    config.engagement.likes = -1.0;
    assert!(pipeline::run(vec![], &config, capture_time()).is_err());
}

// ============================================================
// Network composition
// ============================================================

#[test]
fn mention_network_builds_from_hostile_posts_only() {
    let mut config = EngineConfig::default();
    config.hostile_keywords = vec!["smear".to_string()];

    let posts = vec![
        raw("1", "alpha", "a smear against @beta", 0, 0, 0),
        raw("2", "alpha", "another smear cc @beta", 0, 0, 0),
        raw("3", "gamma", "lovely chat with @delta", 0, 0, 0),
    ];
    let report = pipeline::run(posts, &config, capture_time()).unwrap();

    let graph = &report.network.graph;
    assert_eq!(graph.weight("alpha", "beta"), 2);
    // The benign mention never enters the graph.
    assert!(!graph.contains("gamma"));
    assert!(!graph.contains("delta"));

    // alpha and beta share a community.
    let partition = &report.network.partition;
    assert_eq!(partition.community_of("alpha"), partition.community_of("beta"));
}

#[test]
fn full_run_is_deterministic() {
    let mut config = EngineConfig::default();
    config.hostile_keywords = vec!["smear".to_string()];

    let make_posts = || {
        vec![
            raw("1", "a", "smear on @b and @c", 3, 1, 0),
            raw("2", "b", "smear back @a", 2, 2, 1),
            raw("3", "c", "smear at @d", 0, 5, 0),
            raw("4", "d", "smear everywhere @c", 1, 1, 1),
        ]
    };

    let first = pipeline::run(make_posts(), &config, capture_time()).unwrap();
    let second = pipeline::run(make_posts(), &config, capture_time()).unwrap();

    assert_eq!(
        first.network.partition.assignments(),
        second.network.partition.assignments()
    );
    let first_ids: Vec<&str> = first.posts.iter().map(|p| p.post.id.as_str()).collect();
    let second_ids: Vec<&str> = second.posts.iter().map(|p| p.post.id.as_str()).collect();
    assert_eq!(first_ids, second_ids);
}

// ============================================================
// Forensics over pipeline output
// ============================================================

#[test]
fn forensics_query_over_report_posts() {
    let mut config = EngineConfig::default();
    config.hostile_keywords = vec!["campaign".to_string()];

    let posts = vec![
        raw("1", "a", "the campaign is on #push #narrative", 0, 0, 0),
        raw("2", "b", "campaign continues #push #narrative", 0, 0, 0),
        raw("3", "c", "just gardening #flowers #spring", 0, 0, 0),
    ];
    let report = pipeline::run(posts, &config, capture_time()).unwrap();

    let graph = build_cooccurrence(
        &report.posts,
        |p| p.is_hostile(),
        CoOccurrenceAttribute::Hashtags,
        None,
    );
    assert_eq!(graph.weight("push", "narrative"), 2);
    assert_eq!(graph.weight("flowers", "spring"), 0);
}

// ============================================================
// Export
// ============================================================

#[test]
fn report_export_serializes_to_json() {
    let mut config = EngineConfig::default();
    config.hostile_keywords = vec!["smear".to_string()];

    let posts = vec![
        raw("1", "a", "smear on @b #tag", 1, 2, 3),
        raw("2", "b", "pleasant post", 4, 0, 0),
    ];
    let report = pipeline::run(posts, &config, capture_time()).unwrap();

    let json = serde_json::to_string(&report.export()).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    assert_eq!(value["kpis"]["total_posts"], 2);
    assert!(value["posts"].is_array());
    assert!(value["mention_edges"].is_array());
    assert!(value["communities"].is_array());
}
