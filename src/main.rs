use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use argus::config::EngineConfig;
use argus::forensics::{self, CoOccurrenceAttribute};
use argus::ingest::RawPost;
use argus::output::terminal;
use argus::pipeline::{self, AnalysisReport};

/// Argus: hostile narrative analysis for short social-media posts.
///
/// Takes a corpus of raw posts collected upstream (JSON array) and derives
/// the analyst-facing picture: hostility classification, virality rankings,
/// the mention network with communities, and co-occurrence forensics.
#[derive(Parser)]
#[command(name = "argus", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full analysis and print the report
    Analyze {
        /// Path to a JSON array of raw post records
        input: PathBuf,

        /// Also write the structured report as JSON
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// KPIs and the hostile threat feed
    Report {
        /// Path to a JSON array of raw post records
        input: PathBuf,

        /// Only show posts at or above this engagement score
        #[arg(long, default_value = "0")]
        min_engagement: f64,
    },

    /// Mention network and its communities
    Network {
        /// Path to a JSON array of raw post records
        input: PathBuf,
    },

    /// Co-occurrence forensics over the hostile subset
    Forensics {
        /// Path to a JSON array of raw post records
        input: PathBuf,

        /// Restrict to one author's posts
        #[arg(long)]
        author: Option<String>,

        /// Attribute to co-occur on
        #[arg(long, value_enum, default_value = "hashtags")]
        on: AttributeArg,

        /// Keep only the N most frequent values before pairing
        #[arg(long, default_value = "15")]
        max_nodes: usize,

        /// How many pairs to print
        #[arg(long, default_value = "20")]
        limit: usize,
    },

    /// Show the active hostile-term lexicon
    Keywords,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum AttributeArg {
    Hashtags,
    Authors,
}

impl From<AttributeArg> for CoOccurrenceAttribute {
    fn from(arg: AttributeArg) -> Self {
        match arg {
            AttributeArg::Hashtags => CoOccurrenceAttribute::Hashtags,
            AttributeArg::Authors => CoOccurrenceAttribute::Authors,
        }
    }
}

fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    // Set up structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("argus=info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze { input, out } => {
            let config = EngineConfig::from_env()?;
            let report = run_analysis(&input, &config)?;
            terminal::display_report(&report);

            if let Some(path) = out {
                let json = serde_json::to_string_pretty(&report.export())?;
                fs::write(&path, json)
                    .with_context(|| format!("Failed to write report to {}", path.display()))?;
                println!("\nReport written to {}", path.display().to_string().bold());
            }
        }

        Commands::Report {
            input,
            min_engagement,
        } => {
            let config = EngineConfig::from_env()?;
            let mut report = run_analysis(&input, &config)?;

            if min_engagement > 0.0 {
                let before = report.rankings.top_hostile_posts.len();
                report
                    .rankings
                    .top_hostile_posts
                    .retain(|p| p.engagement_score >= min_engagement);
                println!(
                    "Showing {} of {} top hostile posts (engagement >= {})",
                    report.rankings.top_hostile_posts.len(),
                    before,
                    min_engagement,
                );
            }

            terminal::display_kpis(&report);
            terminal::display_threat_feed(&report);
            terminal::display_authors(&report.rankings.top_authors);
        }

        Commands::Network { input } => {
            let config = EngineConfig::from_env()?;
            let report = run_analysis(&input, &config)?;
            terminal::display_network(&report);
        }

        Commands::Forensics {
            input,
            author,
            on,
            max_nodes,
            limit,
        } => {
            let config = EngineConfig::from_env()?;
            // Forensics always runs over the full corpus, unfiltered by
            // engagement — accuracy over presentation.
            let report = run_analysis(&input, &config)?;

            let graph = forensics::build_cooccurrence(
                &report.posts,
                |p| {
                    p.is_hostile()
                        && author
                            .as_deref()
                            .map_or(true, |a| p.post.author_id == a)
                },
                on.into(),
                Some(max_nodes),
            );

            if let Some(a) = &author {
                println!("Forensics for author {}", a.bold());
            }
            terminal::display_cooccurrence(&graph, limit);
        }

        Commands::Keywords => {
            let config = EngineConfig::from_env()?;
            println!(
                "{}",
                format!("Active hostile-term lexicon ({} terms):", config.hostile_keywords.len())
                    .bold()
            );
            for term in &config.hostile_keywords {
                println!("  {term}");
            }
            println!(
                "\n{}",
                "Replace via ARGUS_KEYWORDS_FILE (one term per line).".dimmed()
            );
        }
    }

    Ok(())
}

/// Load raw posts and run the engine with a spinner while it works.
fn run_analysis(input: &PathBuf, config: &EngineConfig) -> Result<AnalysisReport> {
    let raw = load_posts(input)?;
    info!(records = raw.len(), "Loaded raw post records");

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("  {spinner} {msg}")
            .expect("valid template"),
    );
    spinner.set_message(format!("Analyzing {} posts...", raw.len()));

    let report = pipeline::run(raw, config, Utc::now())?;
    spinner.finish_and_clear();

    Ok(report)
}

fn load_posts(path: &PathBuf) -> Result<Vec<RawPost>> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read input file {}", path.display()))?;
    let raw: Vec<RawPost> = serde_json::from_str(&contents)
        .with_context(|| format!("{} is not a JSON array of post records", path.display()))?;
    Ok(raw)
}
