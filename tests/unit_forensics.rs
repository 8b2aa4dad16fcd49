// Unit tests for co-occurrence forensics: symmetry, loop-freedom, filter
// behavior, and the presentation ordering.

use argus::forensics::{build_cooccurrence, CoOccurrenceAttribute};
use argus::model::{ClassifiedPost, HostilityLabel, Post};
use chrono::{TimeZone, Utc};

fn post(
    id: &str,
    author: &str,
    label: HostilityLabel,
    hashtags: &[&str],
    mentions: &[&str],
) -> ClassifiedPost {
    ClassifiedPost {
        post: Post {
            id: id.to_string(),
            author_id: author.to_string(),
            text: String::new(),
            created_at: Utc.timestamp_opt(1_750_000_000, 0).unwrap(),
            like_count: 0,
            retweet_count: 0,
            reply_count: 0,
            mentions: mentions.iter().map(|m| m.to_string()).collect(),
            hashtags: hashtags.iter().map(|h| h.to_string()).collect(),
            future_dated: false,
        },
        polarity: 0.0,
        label,
        lexicon_hit: false,
        engagement_score: 0.0,
    }
}

#[test]
fn weights_are_symmetric() {
    let posts = vec![
        post("1", "a", HostilityLabel::Hostile, &["x", "y"], &[]),
        post("2", "b", HostilityLabel::Hostile, &["y", "x"], &[]),
    ];
    let graph = build_cooccurrence(&posts, |_| true, CoOccurrenceAttribute::Hashtags, None);
    assert_eq!(graph.weight("x", "y"), graph.weight("y", "x"));
    assert_eq!(graph.weight("x", "y"), 2);
}

#[test]
fn no_self_loops_exist() {
    let posts = vec![post(
        "1",
        "a",
        HostilityLabel::Hostile,
        &["tag", "tag", "other"],
        &[],
    )];
    let graph = build_cooccurrence(&posts, |_| true, CoOccurrenceAttribute::Hashtags, None);
    assert_eq!(graph.weight("tag", "tag"), 0);
    for edge in graph.edges_by_weight() {
        assert_ne!(edge.a, edge.b, "self-loop {}-{}", edge.a, edge.b);
    }
}

#[test]
fn duplicates_within_a_post_count_once() {
    let posts = vec![post(
        "1",
        "a",
        HostilityLabel::Hostile,
        &["x", "x", "y", "y"],
        &[],
    )];
    let graph = build_cooccurrence(&posts, |_| true, CoOccurrenceAttribute::Hashtags, None);
    assert_eq!(graph.weight("x", "y"), 1);
}

#[test]
fn filter_restricts_the_input_set() {
    let posts = vec![
        post("1", "target", HostilityLabel::Hostile, &["x", "y"], &[]),
        post("2", "other", HostilityLabel::Hostile, &["x", "y"], &[]),
        post("3", "target", HostilityLabel::Hostile, &["y", "z"], &[]),
    ];
    let graph = build_cooccurrence(
        &posts,
        |p| p.post.author_id == "target",
        CoOccurrenceAttribute::Hashtags,
        None,
    );
    assert_eq!(graph.weight("x", "y"), 1);
    assert_eq!(graph.weight("y", "z"), 1);
}

#[test]
fn zero_match_filter_yields_empty_graph_not_error() {
    let posts = vec![post("1", "a", HostilityLabel::Hostile, &["x", "y"], &[])];
    let graph = build_cooccurrence(
        &posts,
        |p| p.post.author_id == "nobody",
        CoOccurrenceAttribute::Hashtags,
        None,
    );
    assert!(graph.is_empty());
    assert_eq!(graph.node_count(), 0);
    assert_eq!(graph.edge_count(), 0);
    assert!(graph.edges_by_weight().is_empty());
}

#[test]
fn hostile_subset_is_the_canonical_filter() {
    let posts = vec![
        post("1", "a", HostilityLabel::Hostile, &["campaign", "smear"], &[]),
        post("2", "b", HostilityLabel::Positive, &["campaign", "smear"], &[]),
    ];
    let graph = build_cooccurrence(
        &posts,
        |p| p.is_hostile(),
        CoOccurrenceAttribute::Hashtags,
        None,
    );
    // Only the hostile post contributes.
    assert_eq!(graph.weight("campaign", "smear"), 1);
}

#[test]
fn author_attribute_links_coappearing_actors() {
    let posts = vec![
        post("1", "a", HostilityLabel::Hostile, &[], &["b", "c"]),
        post("2", "a", HostilityLabel::Hostile, &[], &["b"]),
    ];
    let graph = build_cooccurrence(&posts, |_| true, CoOccurrenceAttribute::Authors, None);
    assert_eq!(graph.weight("a", "b"), 2);
    assert_eq!(graph.weight("a", "c"), 1);
    assert_eq!(graph.weight("b", "c"), 1);
}

#[test]
fn presentation_order_is_weight_descending_with_stable_ties() {
    let posts = vec![
        post("1", "a", HostilityLabel::Hostile, &["p", "q"], &[]),
        post("2", "b", HostilityLabel::Hostile, &["p", "q"], &[]),
        post("3", "c", HostilityLabel::Hostile, &["m", "n"], &[]),
        post("4", "d", HostilityLabel::Hostile, &["k", "l"], &[]),
    ];
    let graph = build_cooccurrence(&posts, |_| true, CoOccurrenceAttribute::Hashtags, None);
    let edges = graph.edges_by_weight();
    assert_eq!(edges[0].weight, 2);
    assert_eq!((edges[0].a.as_str(), edges[0].b.as_str()), ("p", "q"));
    // Ties at weight 1 resolve lexicographically.
    assert_eq!((edges[1].a.as_str(), edges[1].b.as_str()), ("k", "l"));
    assert_eq!((edges[2].a.as_str(), edges[2].b.as_str()), ("m", "n"));
}

#[test]
fn max_nodes_restricts_to_most_frequent() {
    let posts = vec![
        post("1", "a", HostilityLabel::Hostile, &["hot", "warm", "cold"], &[]),
        post("2", "b", HostilityLabel::Hostile, &["hot", "warm"], &[]),
        post("3", "c", HostilityLabel::Hostile, &["hot"], &[]),
    ];
    let graph = build_cooccurrence(&posts, |_| true, CoOccurrenceAttribute::Hashtags, Some(2));
    assert_eq!(graph.node_count(), 2);
    assert_eq!(graph.weight("hot", "warm"), 2);
    assert_eq!(graph.weight("hot", "cold"), 0);
}
