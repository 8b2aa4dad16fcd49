// Full analysis run: raw records in, structured intelligence picture out.
//
// Stage order: validate configuration (fail fast), validate records,
// classify + score every post, snapshot, rankings, mention network with
// communities. Each invocation is a pure function of its input corpus and
// configuration — the engine holds no state between runs. Co-occurrence
// forensics stays on demand via `forensics::build_cooccurrence`, because
// it is parameterized per query.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;

use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::ingest::{self, IngestStats, RawPost};
use crate::model::{ClassifiedPost, CorpusSnapshot, Post};
use crate::network::{detect_communities, MentionEdge, MentionGraph, Partition};
use crate::rankings::{self, CorpusKpis, Rankings};
use crate::sentiment::{HostilityClassifier, LexiconScorer, PolarityScorer};

/// Mention graph plus its community partition.
#[derive(Debug, Clone)]
pub struct NetworkAnalysis {
    pub graph: MentionGraph,
    pub partition: Partition,
}

/// Everything one engine invocation produces.
#[derive(Debug, Clone)]
pub struct AnalysisReport {
    /// All classified posts, engagement score descending.
    pub posts: Vec<ClassifiedPost>,
    pub kpis: CorpusKpis,
    pub rankings: Rankings,
    pub network: NetworkAnalysis,
    /// Boundary validation counts — skipped records surfaced for
    /// transparency, per reason.
    pub ingest: IngestStats,
}

/// Serializable view of a report for the external persistence collaborator.
#[derive(Debug, Serialize)]
pub struct ReportExport<'a> {
    pub posts: &'a [ClassifiedPost],
    pub kpis: &'a CorpusKpis,
    pub rankings: &'a Rankings,
    pub mention_edges: Vec<MentionEdge>,
    pub communities: Vec<Vec<&'a str>>,
    pub modularity: f64,
    pub ingest: &'a IngestStats,
}

impl AnalysisReport {
    pub fn export(&self) -> ReportExport<'_> {
        ReportExport {
            posts: &self.posts,
            kpis: &self.kpis,
            rankings: &self.rankings,
            mention_edges: self.network.graph.export(),
            communities: self.network.partition.communities(),
            modularity: self.network.partition.modularity,
            ingest: &self.ingest,
        }
    }
}

/// Classify and score a batch of validated posts.
pub fn classify_posts(
    posts: Vec<Post>,
    scorer: &dyn PolarityScorer,
    config: &EngineConfig,
) -> Vec<ClassifiedPost> {
    let classifier = HostilityClassifier::new(
        scorer,
        config.polarity_threshold,
        config.hostile_keywords.clone(),
    );

    posts
        .into_iter()
        .map(|post| {
            let classification = classifier.classify(&post.text);
            let engagement_score =
                config
                    .engagement
                    .score(post.like_count, post.retweet_count, post.reply_count);
            ClassifiedPost {
                post,
                polarity: classification.polarity,
                label: classification.label,
                lexicon_hit: classification.lexicon_hit,
                engagement_score,
            }
        })
        .collect()
}

/// Run the complete pipeline over raw collector records.
///
/// `now` is the capture time for future-dating checks. Empty input is the
/// "no signal yet" state: all-zero KPIs, empty rankings, empty graph —
/// never an error. The only error path is a misconfigured parameter.
pub fn run(
    raw: Vec<RawPost>,
    config: &EngineConfig,
    now: DateTime<Utc>,
) -> Result<AnalysisReport, EngineError> {
    config.validate()?;

    let (posts, ingest_stats) = ingest::validate_posts(raw, now);

    let scorer = LexiconScorer::new();
    let mut classified = classify_posts(posts, &scorer, config);
    classified.sort_by(|a, b| {
        b.engagement_score
            .partial_cmp(&a.engagement_score)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.post.created_at.cmp(&b.post.created_at))
            .then_with(|| a.post.id.cmp(&b.post.id))
    });

    let snapshot = CorpusSnapshot::new(classified);
    let kpis = rankings::compute_kpis(&snapshot, config);
    let rankings = rankings::compute_rankings(&snapshot, config);

    let hostile: Vec<&ClassifiedPost> = snapshot.hostile().collect();
    let graph = MentionGraph::build(hostile.iter().copied());
    let partition = detect_communities(&graph, &config.community);

    info!(
        posts = snapshot.len(),
        hostile = kpis.hostile_posts,
        skipped = ingest_stats.skipped(),
        communities = partition.community_count(),
        "Analysis complete"
    );

    Ok(AnalysisReport {
        posts: snapshot.posts,
        kpis,
        rankings,
        network: NetworkAnalysis { graph, partition },
        ingest: ingest_stats,
    })
}
