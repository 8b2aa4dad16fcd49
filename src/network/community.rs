// Community detection — greedy modularity optimization, Louvain style.
//
// Local-move passes shift each node to the neighboring community with the
// best modularity gain; an aggregation step then collapses communities
// into super-nodes and the passes repeat at the coarser level. Greedy
// tie-breaking is pinned two ways so identical input always yields the
// identical partition: the node visit order is shuffled by an RNG seeded
// from configuration, and equal-gain candidates resolve to the lowest
// community id. The iteration cap bounds both the sweeps per level and the
// number of levels, so the pass terminates on any graph.

use std::collections::BTreeMap;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ConfigError;

use super::graph::MentionGraph;

const GAIN_EPSILON: f64 = 1e-12;

/// Tunables for the community-detection pass.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CommunityConfig {
    /// Cap on local-move sweeps per level and on aggregation levels
    /// (default 20). Must be at least 1.
    pub max_iterations: usize,
    /// Seed for the visit-order shuffle. Part of the configuration surface
    /// so results are reproducible — never hidden.
    pub seed: u64,
}

impl Default for CommunityConfig {
    fn default() -> Self {
        Self {
            max_iterations: 20,
            seed: 7,
        }
    }
}

impl CommunityConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_iterations == 0 {
            return Err(ConfigError::ZeroIterationCap);
        }
        Ok(())
    }
}

/// A complete partition of the graph's nodes: every node has exactly one
/// community, community ids are contiguous from 0.
#[derive(Debug, Clone, Serialize)]
pub struct Partition {
    assignments: BTreeMap<String, usize>,
    community_count: usize,
    /// Modularity Q of the final partition over the input graph.
    pub modularity: f64,
}

impl Partition {
    pub fn community_of(&self, node: &str) -> Option<usize> {
        self.assignments.get(node).copied()
    }

    pub fn len(&self) -> usize {
        self.assignments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }

    pub fn community_count(&self) -> usize {
        self.community_count
    }

    pub fn assignments(&self) -> &BTreeMap<String, usize> {
        &self.assignments
    }

    /// Members grouped by community id. Members are in lexicographic order
    /// because the assignment map is ordered.
    pub fn communities(&self) -> Vec<Vec<&str>> {
        let mut groups: Vec<Vec<&str>> = vec![Vec::new(); self.community_count];
        for (node, &c) in &self.assignments {
            groups[c].push(node.as_str());
        }
        groups
    }
}

/// Run modularity optimization over the mention graph.
///
/// An empty graph returns an empty partition — no error. Nodes with no
/// edges end up in singleton communities.
pub fn detect_communities(graph: &MentionGraph, config: &CommunityConfig) -> Partition {
    let n = graph.node_count();
    if n == 0 {
        return Partition {
            assignments: BTreeMap::new(),
            community_count: 0,
            modularity: 0.0,
        };
    }

    let mut rng = StdRng::seed_from_u64(config.seed);

    let original_adjacency = graph.undirected_adjacency();
    let mut adjacency = original_adjacency.clone();
    let mut self_loops = vec![0.0_f64; n];
    // membership[i] = current-level node holding original node i
    let mut membership: Vec<usize> = (0..n).collect();

    for level in 0..config.max_iterations {
        let (communities, improved) =
            local_move(&adjacency, &self_loops, config.max_iterations, &mut rng);

        let (renumbered, community_count) = renumber(&communities);
        for m in membership.iter_mut() {
            *m = renumbered[*m];
        }

        debug!(
            level,
            nodes = adjacency.len(),
            communities = community_count,
            "Community detection level finished"
        );

        if !improved || community_count == adjacency.len() {
            break;
        }

        let aggregated = aggregate(&adjacency, &self_loops, &renumbered, community_count);
        adjacency = aggregated.0;
        self_loops = aggregated.1;
    }

    let (final_assignment, community_count) = renumber(&membership);
    let modularity = compute_modularity(&original_adjacency, &final_assignment);

    let assignments: BTreeMap<String, usize> = graph
        .nodes()
        .iter()
        .enumerate()
        .map(|(i, name)| (name.clone(), final_assignment[i]))
        .collect();

    Partition {
        assignments,
        community_count,
        modularity,
    }
}

/// One level of greedy local moves. Returns the community of each node and
/// whether any node moved.
fn local_move(
    adjacency: &[Vec<(usize, f64)>],
    self_loops: &[f64],
    max_sweeps: usize,
    rng: &mut StdRng,
) -> (Vec<usize>, bool) {
    let n = adjacency.len();
    let mut communities: Vec<usize> = (0..n).collect();

    // Weighted degree per node; self loops count twice, as in standard
    // modularity bookkeeping.
    let degree: Vec<f64> = (0..n)
        .map(|i| adjacency[i].iter().map(|&(_, w)| w).sum::<f64>() + 2.0 * self_loops[i])
        .collect();
    let two_m: f64 = degree.iter().sum();
    if two_m == 0.0 {
        // No edges at all — everything stays a singleton.
        return (communities, false);
    }

    let mut community_total: Vec<f64> = degree.clone();
    let mut any_moved = false;

    let mut order: Vec<usize> = (0..n).collect();
    for _sweep in 0..max_sweeps {
        order.shuffle(rng);
        let mut moved = false;

        for &i in &order {
            let current = communities[i];

            // Weight from i to each neighboring community. BTreeMap keeps
            // candidate order ascending, which is what makes the
            // lowest-id tie-break deterministic.
            let mut weight_to: BTreeMap<usize, f64> = BTreeMap::new();
            for &(j, w) in &adjacency[i] {
                *weight_to.entry(communities[j]).or_insert(0.0) += w;
            }

            community_total[current] -= degree[i];

            let stay_weight = weight_to.get(&current).copied().unwrap_or(0.0);
            let mut best_community = current;
            let mut best_gain = stay_weight - community_total[current] * degree[i] / two_m;

            for (&candidate, &weight) in &weight_to {
                if candidate == current {
                    continue;
                }
                let gain = weight - community_total[candidate] * degree[i] / two_m;
                if gain > best_gain + GAIN_EPSILON {
                    best_gain = gain;
                    best_community = candidate;
                }
            }

            community_total[best_community] += degree[i];
            if best_community != current {
                communities[i] = best_community;
                moved = true;
                any_moved = true;
            }
        }

        if !moved {
            break;
        }
    }

    (communities, any_moved)
}

/// Renumber community labels to be contiguous from 0, in node-index order.
fn renumber(communities: &[usize]) -> (Vec<usize>, usize) {
    let mut mapping: BTreeMap<usize, usize> = BTreeMap::new();
    let mut next = 0usize;
    let renumbered = communities
        .iter()
        .map(|&c| {
            *mapping.entry(c).or_insert_with(|| {
                let id = next;
                next += 1;
                id
            })
        })
        .collect();
    (renumbered, next)
}

/// Collapse each community into one super-node. Intra-community weight
/// becomes a self loop; inter-community weight becomes the new edges.
fn aggregate(
    adjacency: &[Vec<(usize, f64)>],
    self_loops: &[f64],
    communities: &[usize],
    community_count: usize,
) -> (Vec<Vec<(usize, f64)>>, Vec<f64>) {
    let mut new_self = vec![0.0_f64; community_count];
    let mut between: BTreeMap<(usize, usize), f64> = BTreeMap::new();

    for i in 0..adjacency.len() {
        let ci = communities[i];
        new_self[ci] += self_loops[i];
        for &(j, w) in &adjacency[i] {
            if j < i {
                // Each undirected edge appears in both lists; count once.
                continue;
            }
            let cj = communities[j];
            if ci == cj {
                new_self[ci] += w;
            } else {
                let key = if ci < cj { (ci, cj) } else { (cj, ci) };
                *between.entry(key).or_insert(0.0) += w;
            }
        }
    }

    let mut new_adjacency = vec![Vec::new(); community_count];
    for (&(a, b), &w) in &between {
        new_adjacency[a].push((b, w));
        new_adjacency[b].push((a, w));
    }

    (new_adjacency, new_self)
}

/// Modularity Q of an assignment over the original (loop-free) adjacency.
fn compute_modularity(adjacency: &[Vec<(usize, f64)>], communities: &[usize]) -> f64 {
    let n = adjacency.len();
    let degree: Vec<f64> = (0..n)
        .map(|i| adjacency[i].iter().map(|&(_, w)| w).sum::<f64>())
        .collect();
    let two_m: f64 = degree.iter().sum();
    if two_m == 0.0 {
        return 0.0;
    }

    let community_count = communities.iter().copied().max().map_or(0, |c| c + 1);
    let mut intra = vec![0.0_f64; community_count];
    let mut total = vec![0.0_f64; community_count];

    for i in 0..n {
        total[communities[i]] += degree[i];
        for &(j, w) in &adjacency[i] {
            if j < i {
                continue;
            }
            if communities[i] == communities[j] {
                // Both A_ij and A_ji contribute.
                intra[communities[i]] += 2.0 * w;
            }
        }
    }

    (0..community_count)
        .map(|c| intra[c] / two_m - (total[c] / two_m).powi(2))
        .sum()
}
