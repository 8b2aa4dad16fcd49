// Co-occurrence forensics — campaign structure discovery.
//
// For a caller-selected subset of posts (one author's hostile output, the
// whole hostile set, anything a predicate describes), build an undirected
// weighted graph over hashtags or actors: edge weight = number of posts in
// which both endpoints appear together. The graph is weight-annotated, not
// pre-sorted — `edges_by_weight` produces the presentation order. Built
// fresh per query; nothing is cached.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::model::ClassifiedPost;

/// Which attribute to co-occur on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CoOccurrenceAttribute {
    /// Hashtags appearing together in one post.
    Hashtags,
    /// Actors appearing together in one post: the author plus everyone
    /// mentioned.
    Authors,
}

/// One undirected edge in export form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoOccurrenceEdge {
    pub a: String,
    pub b: String,
    pub weight: u64,
}

/// Undirected weighted co-occurrence graph. Self-pairs are never recorded;
/// weights are symmetric by construction.
#[derive(Debug, Clone, Default)]
pub struct CoOccurrenceGraph {
    nodes: Vec<String>,
    index: HashMap<String, usize>,
    /// Keyed (low, high) on interned indices.
    weights: BTreeMap<(usize, usize), u64>,
}

impl CoOccurrenceGraph {
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn nodes(&self) -> &[String] {
        &self.nodes
    }

    /// Symmetric lookup: weight(a, b) == weight(b, a). 0 when absent.
    pub fn weight(&self, a: &str, b: &str) -> u64 {
        match (self.index.get(a), self.index.get(b)) {
            (Some(&i), Some(&j)) if i != j => {
                let key = if i < j { (i, j) } else { (j, i) };
                self.weights.get(&key).copied().unwrap_or(0)
            }
            _ => 0,
        }
    }

    /// Edges sorted by weight descending, endpoint names ascending on ties.
    pub fn edges_by_weight(&self) -> Vec<CoOccurrenceEdge> {
        let mut edges: Vec<CoOccurrenceEdge> = self
            .weights
            .iter()
            .map(|(&(i, j), &w)| {
                // Present endpoints in lexicographic order regardless of
                // intern order.
                let (a, b) = if self.nodes[i] <= self.nodes[j] {
                    (self.nodes[i].clone(), self.nodes[j].clone())
                } else {
                    (self.nodes[j].clone(), self.nodes[i].clone())
                };
                CoOccurrenceEdge { a, b, weight: w }
            })
            .collect();
        edges.sort_by(|x, y| {
            y.weight
                .cmp(&x.weight)
                .then_with(|| x.a.cmp(&y.a))
                .then_with(|| x.b.cmp(&y.b))
        });
        edges
    }

    fn intern(&mut self, value: &str) -> usize {
        if let Some(&i) = self.index.get(value) {
            return i;
        }
        let i = self.nodes.len();
        self.nodes.push(value.to_string());
        self.index.insert(value.to_string(), i);
        i
    }

    fn record_pair(&mut self, a: usize, b: usize) {
        if a == b {
            return;
        }
        let key = if a < b { (a, b) } else { (b, a) };
        *self.weights.entry(key).or_insert(0) += 1;
    }
}

/// Build a co-occurrence graph over the posts the filter selects.
///
/// Attribute values are de-duplicated within a post (a hashtag used twice
/// in one post still counts once toward each pair). `max_nodes` keeps only
/// the N most frequent values across the selected posts before pairing —
/// ties on frequency resolve lexicographically. A filter matching zero
/// posts yields an empty graph, not an error.
pub fn build_cooccurrence<F>(
    posts: &[ClassifiedPost],
    filter: F,
    attribute: CoOccurrenceAttribute,
    max_nodes: Option<usize>,
) -> CoOccurrenceGraph
where
    F: Fn(&ClassifiedPost) -> bool,
{
    let selected: Vec<&ClassifiedPost> = posts.iter().filter(|p| filter(p)).collect();

    // Per-post unique value sets, sorted for deterministic pairing.
    let per_post: Vec<Vec<String>> = selected
        .iter()
        .map(|p| {
            let mut values = attribute_values(p, attribute);
            values.sort();
            values.dedup();
            values
        })
        .collect();

    // Optional restriction to the most frequent values.
    let keep: Option<HashMap<&str, ()>> = max_nodes.map(|n| {
        let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
        for values in &per_post {
            for v in values {
                *counts.entry(v.as_str()).or_insert(0) += 1;
            }
        }
        let mut ranked: Vec<(&str, usize)> = counts.into_iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        ranked.into_iter().take(n).map(|(v, _)| (v, ())).collect()
    });

    let mut graph = CoOccurrenceGraph::default();
    for values in &per_post {
        let kept: Vec<&String> = values
            .iter()
            .filter(|v| match &keep {
                Some(set) => set.contains_key(v.as_str()),
                None => true,
            })
            .collect();
        let indices: Vec<usize> = kept.iter().map(|v| graph.intern(v)).collect();
        for (x, &i) in indices.iter().enumerate() {
            for &j in &indices[x + 1..] {
                graph.record_pair(i, j);
            }
        }
    }

    graph
}

fn attribute_values(post: &ClassifiedPost, attribute: CoOccurrenceAttribute) -> Vec<String> {
    match attribute {
        CoOccurrenceAttribute::Hashtags => post.post.hashtags.clone(),
        CoOccurrenceAttribute::Authors => {
            let mut actors = vec![post.post.author_id.clone()];
            actors.extend(post.post.mentions.iter().cloned());
            actors
        }
    }
}
