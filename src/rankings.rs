// Ranking & aggregation — corpus KPIs, top-N rankings, per-author metrics.
//
// Everything here is derived from a CorpusSnapshot and recomputed on
// demand. Orderings are total and deterministic: engagement ties break to
// the earlier timestamp, author ties break lexicographically. An empty
// corpus yields all-zero KPIs and empty rankings — the expected "no signal
// yet" state, never an error.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::config::EngineConfig;
use crate::model::{ClassifiedPost, CorpusSnapshot};
use crate::scoring::bot::{self, BotSignals, BotThresholds};

/// Corpus-level key indicators.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct CorpusKpis {
    pub total_posts: usize,
    pub hostile_posts: usize,
    /// Hostile / total, in [0, 1].
    pub hostility_ratio: f64,
    /// Hostile posts per hour over the configured (or snapshot) window.
    pub velocity_per_hour: f64,
    /// Mean per-author bot-likelihood, 0-100. Advisory.
    pub bot_likelihood: f64,
    /// Whether the hostility ratio crossed the configured alert threshold.
    pub alert: bool,
}

/// Aggregated metrics for one author.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthorMetrics {
    pub author_id: String,
    pub post_count: usize,
    pub hostile_count: usize,
    /// Percentage of this author's posts that are hostile, 0-100.
    pub hostility_score: f64,
    pub total_engagement: f64,
    pub bot: BotSignals,
}

/// The top-N rankings handed to the caller.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Rankings {
    /// Hostile posts by engagement descending.
    pub top_hostile_posts: Vec<ClassifiedPost>,
    /// Authors by hostile-post count descending.
    pub top_authors: Vec<AuthorMetrics>,
}

/// Compute the corpus KPIs.
pub fn compute_kpis(snapshot: &CorpusSnapshot, config: &EngineConfig) -> CorpusKpis {
    let total_posts = snapshot.len();
    let hostile_posts = snapshot.hostile_count();
    let hostility_ratio = snapshot.hostility_ratio();

    let authors = author_metrics(snapshot, &config.bot);
    let bot_likelihood = if authors.is_empty() {
        0.0
    } else {
        authors.iter().map(|a| a.bot.score).sum::<f64>() / authors.len() as f64
    };

    CorpusKpis {
        total_posts,
        hostile_posts,
        hostility_ratio,
        velocity_per_hour: snapshot.velocity_per_hour(config.velocity_window_secs),
        bot_likelihood,
        alert: total_posts > 0 && hostility_ratio >= config.alert_ratio,
    }
}

/// Hostile posts ordered by engagement score descending; ties go to the
/// earlier timestamp, then the post id, so the ordering is total.
pub fn top_hostile_posts(snapshot: &CorpusSnapshot, n: usize) -> Vec<ClassifiedPost> {
    let mut hostile: Vec<ClassifiedPost> = snapshot.hostile().cloned().collect();
    hostile.sort_by(|a, b| {
        b.engagement_score
            .partial_cmp(&a.engagement_score)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.post.created_at.cmp(&b.post.created_at))
            .then_with(|| a.post.id.cmp(&b.post.id))
    });
    hostile.truncate(n);
    hostile
}

/// Per-author aggregates over the whole snapshot (hostile and not), ordered
/// by hostile-post count descending, author id ascending on ties.
pub fn author_metrics(snapshot: &CorpusSnapshot, thresholds: &BotThresholds) -> Vec<AuthorMetrics> {
    // BTreeMap keys give the lexicographic half of the ordering for free.
    let mut by_author: BTreeMap<&str, Vec<&ClassifiedPost>> = BTreeMap::new();
    for post in &snapshot.posts {
        by_author
            .entry(post.post.author_id.as_str())
            .or_default()
            .push(post);
    }

    let mut metrics: Vec<AuthorMetrics> = by_author
        .into_iter()
        .map(|(author_id, posts)| {
            let hostile_count = posts.iter().filter(|p| p.is_hostile()).count();
            let total_engagement: f64 = posts.iter().map(|p| p.engagement_score).sum();
            let timeline: Vec<(chrono::DateTime<chrono::Utc>, &str)> = posts
                .iter()
                .map(|p| (p.post.created_at, p.post.text.as_str()))
                .collect();
            AuthorMetrics {
                author_id: author_id.to_string(),
                post_count: posts.len(),
                hostile_count,
                hostility_score: hostile_count as f64 / posts.len() as f64 * 100.0,
                total_engagement,
                bot: bot::compute_bot_signals(&timeline, thresholds),
            }
        })
        .collect();

    metrics.sort_by(|a, b| {
        b.hostile_count
            .cmp(&a.hostile_count)
            .then_with(|| a.author_id.cmp(&b.author_id))
    });
    metrics
}

/// Assemble the top-N rankings.
pub fn compute_rankings(snapshot: &CorpusSnapshot, config: &EngineConfig) -> Rankings {
    let mut top_authors = author_metrics(snapshot, &config.bot);
    top_authors.truncate(config.top_n);
    Rankings {
        top_hostile_posts: top_hostile_posts(snapshot, config.top_n),
        top_authors,
    }
}
