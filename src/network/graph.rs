// Mention graph — who mentions whom among hostile posts.
//
// Directed weighted edges accumulated from (author, mentioned-author)
// pairs; a repeated mention inside one post adds weight. Self-mentions are
// excluded. Every hostile-post author becomes a node even with no mentions
// in or out, so isolated actors still show up in the partition.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::model::ClassifiedPost;

/// Directed weighted mention graph. Node identity is the author id string;
/// edges are stored on interned indices with deterministic iteration order.
#[derive(Debug, Clone, Default)]
pub struct MentionGraph {
    nodes: Vec<String>,
    index: HashMap<String, usize>,
    edges: BTreeMap<(usize, usize), u64>,
}

/// One directed edge in export form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MentionEdge {
    pub from: String,
    pub to: String,
    pub weight: u64,
}

impl MentionGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the graph from the hostile subset of a corpus.
    /// An empty subset yields an empty graph.
    pub fn build<'a>(hostile: impl IntoIterator<Item = &'a ClassifiedPost>) -> Self {
        let mut graph = Self::new();
        for classified in hostile {
            let post = &classified.post;
            let author = graph.intern(&post.author_id);
            for mentioned in &post.mentions {
                if mentioned == &post.author_id {
                    continue;
                }
                let target = graph.intern(mentioned);
                *graph.edges.entry((author, target)).or_insert(0) += 1;
            }
        }
        graph
    }

    fn intern(&mut self, id: &str) -> usize {
        if let Some(&i) = self.index.get(id) {
            return i;
        }
        let i = self.nodes.len();
        self.nodes.push(id.to_string());
        self.index.insert(id.to_string(), i);
        i
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn nodes(&self) -> &[String] {
        &self.nodes
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Weight of the directed edge from -> to; 0 when absent.
    pub fn weight(&self, from: &str, to: &str) -> u64 {
        match (self.index.get(from), self.index.get(to)) {
            (Some(&a), Some(&b)) => self.edges.get(&(a, b)).copied().unwrap_or(0),
            _ => 0,
        }
    }

    /// Directed edges in deterministic (source, target) index order.
    pub fn edges(&self) -> impl Iterator<Item = (&str, &str, u64)> {
        self.edges
            .iter()
            .map(|(&(a, b), &w)| (self.nodes[a].as_str(), self.nodes[b].as_str(), w))
    }

    /// Edge list in export form, heaviest first, then source/target order.
    pub fn export(&self) -> Vec<MentionEdge> {
        let mut out: Vec<MentionEdge> = self
            .edges()
            .map(|(from, to, weight)| MentionEdge {
                from: from.to_string(),
                to: to.to_string(),
                weight,
            })
            .collect();
        out.sort_by(|a, b| {
            b.weight
                .cmp(&a.weight)
                .then_with(|| a.from.cmp(&b.from))
                .then_with(|| a.to.cmp(&b.to))
        });
        out
    }

    /// Symmetrized adjacency lists for community detection: directed
    /// weights summed across both directions, each undirected edge present
    /// in both endpoint lists.
    pub(crate) fn undirected_adjacency(&self) -> Vec<Vec<(usize, f64)>> {
        let mut symmetric: BTreeMap<(usize, usize), f64> = BTreeMap::new();
        for (&(a, b), &w) in &self.edges {
            let key = if a < b { (a, b) } else { (b, a) };
            *symmetric.entry(key).or_insert(0.0) += w as f64;
        }
        let mut adjacency = vec![Vec::new(); self.nodes.len()];
        for (&(a, b), &w) in &symmetric {
            adjacency[a].push((b, w));
            adjacency[b].push((a, w));
        }
        adjacency
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{HostilityLabel, Post};
    use chrono::{TimeZone, Utc};

    fn hostile_post(id: &str, author: &str, mentions: &[&str]) -> ClassifiedPost {
        ClassifiedPost {
            post: Post {
                id: id.to_string(),
                author_id: author.to_string(),
                text: String::new(),
                created_at: Utc.timestamp_opt(1_700_000_000, 0).unwrap(),
                like_count: 0,
                retweet_count: 0,
                reply_count: 0,
                mentions: mentions.iter().map(|m| m.to_string()).collect(),
                hashtags: vec![],
                future_dated: false,
            },
            polarity: -0.8,
            label: HostilityLabel::Hostile,
            lexicon_hit: false,
            engagement_score: 0.0,
        }
    }

    #[test]
    fn repeated_mentions_accumulate_weight() {
        let posts = vec![
            hostile_post("1", "a", &["b", "b"]),
            hostile_post("2", "a", &["b"]),
        ];
        let graph = MentionGraph::build(&posts);
        assert_eq!(graph.weight("a", "b"), 3);
        assert_eq!(graph.weight("b", "a"), 0);
    }

    #[test]
    fn self_mentions_are_excluded() {
        let posts = vec![hostile_post("1", "a", &["a", "b"])];
        let graph = MentionGraph::build(&posts);
        assert_eq!(graph.weight("a", "a"), 0);
        assert_eq!(graph.weight("a", "b"), 1);
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn isolated_author_is_still_a_node() {
        let posts = vec![hostile_post("1", "loner", &[])];
        let graph = MentionGraph::build(&posts);
        assert_eq!(graph.node_count(), 1);
        assert!(graph.contains("loner"));
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn empty_input_yields_empty_graph() {
        let graph = MentionGraph::build(&[]);
        assert!(graph.is_empty());
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn export_orders_by_weight_desc() {
        let posts = vec![
            hostile_post("1", "a", &["b"]),
            hostile_post("2", "c", &["d", "d", "d"]),
        ];
        let edges = MentionGraph::build(&posts).export();
        assert_eq!(edges[0].from, "c");
        assert_eq!(edges[0].weight, 3);
        assert_eq!(edges[1].weight, 1);
    }
}
