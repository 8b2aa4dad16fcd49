// Colored terminal output for the analysis report.
//
// This module owns all terminal-specific formatting: colors, tables,
// section headers. The engine itself returns plain structured data; a
// richer dashboard is an external collaborator that consumes the same
// report.

use colored::Colorize;

use crate::forensics::CoOccurrenceGraph;
use crate::model::HostilityLabel;
use crate::network::Partition;
use crate::pipeline::AnalysisReport;
use crate::rankings::AuthorMetrics;

/// Truncate to a character budget, appending an ellipsis when cut.
/// Char-based, not byte-based — slicing bytes can split a multi-byte
/// character and panic.
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let cut: String = text.chars().take(max_chars.saturating_sub(1)).collect();
    format!("{cut}\u{2026}")
}

fn colorize_label(label: HostilityLabel) -> colored::ColoredString {
    match label {
        HostilityLabel::Hostile => label.as_str().red().bold(),
        HostilityLabel::Neutral => label.as_str().normal(),
        HostilityLabel::Positive => label.as_str().green(),
    }
}

/// The KPI overview block.
pub fn display_kpis(report: &AnalysisReport) {
    let kpis = &report.kpis;
    println!("\n{}", "=== Campaign Overview ===".bold());
    println!("  Posts analyzed:    {}", kpis.total_posts);
    println!("  Hostile posts:     {}", kpis.hostile_posts);
    println!(
        "  Hostility ratio:   {:.1}%",
        kpis.hostility_ratio * 100.0
    );
    println!("  Velocity:          {:.2} hostile posts/hour", kpis.velocity_per_hour);
    println!("  Bot likelihood:    {:.1}/100 (advisory)", kpis.bot_likelihood);
    if report.ingest.skipped() > 0 {
        println!(
            "  {}",
            format!("Skipped {} malformed records at ingest", report.ingest.skipped()).yellow()
        );
    }
    if report.ingest.future_dated > 0 {
        println!(
            "  {}",
            format!("{} future-dated posts flagged", report.ingest.future_dated).yellow()
        );
    }
    if kpis.alert {
        println!(
            "\n  {}",
            format!(
                "ALERT: hostility ratio {:.1}% — possible coordinated campaign",
                kpis.hostility_ratio * 100.0
            )
            .red()
            .bold()
        );
    }
}

/// Top hostile posts by engagement — the threat feed.
pub fn display_threat_feed(report: &AnalysisReport) {
    let feed = &report.rankings.top_hostile_posts;
    if feed.is_empty() {
        println!("\nNo hostile posts detected in this corpus.");
        return;
    }

    println!(
        "\n{}",
        format!("=== Top Hostile Posts ({} shown) ===", feed.len()).bold()
    );
    println!(
        "  {:>4}  {:>8}  {:>6}  {:<8} {:<20} {}",
        "Rank".dimmed(),
        "Engage".dimmed(),
        "Pol".dimmed(),
        "Label".dimmed(),
        "Author".dimmed(),
        "Text".dimmed(),
    );
    for (i, post) in feed.iter().enumerate() {
        println!(
            "  {:>4}  {:>8.1}  {:>6.2}  {:<8} {:<20} {}",
            i + 1,
            post.engagement_score,
            post.polarity,
            colorize_label(post.label),
            truncate_chars(&post.post.author_id, 20),
            truncate_chars(&post.post.text, 60),
        );
    }
}

/// Per-author ranking table.
pub fn display_authors(authors: &[AuthorMetrics]) {
    if authors.is_empty() {
        println!("\nNo authors to rank.");
        return;
    }

    println!("\n{}", "=== Top Authors by Hostile Posts ===".bold());
    println!(
        "  {:>4}  {:<24} {:>7}  {:>8}  {:>9}  {:>8}  {:>5}",
        "Rank".dimmed(),
        "Author".dimmed(),
        "Posts".dimmed(),
        "Hostile".dimmed(),
        "Hostility".dimmed(),
        "Engage".dimmed(),
        "Bot".dimmed(),
    );
    for (i, author) in authors.iter().enumerate() {
        let hostility = format!("{:.0}%", author.hostility_score);
        let hostility = if author.hostility_score >= 50.0 {
            hostility.red()
        } else {
            hostility.normal()
        };
        println!(
            "  {:>4}  {:<24} {:>7}  {:>8}  {:>9}  {:>8.1}  {:>5.0}",
            i + 1,
            truncate_chars(&author.author_id, 24),
            author.post_count,
            author.hostile_count,
            hostility,
            author.total_engagement,
            author.bot.score,
        );
    }
}

/// Mention-network community summary.
pub fn display_network(report: &AnalysisReport) {
    let graph = &report.network.graph;
    let partition = &report.network.partition;

    println!("\n{}", "=== Mention Network ===".bold());
    if graph.is_empty() {
        println!("  No mention activity among hostile posts.");
        return;
    }
    println!(
        "  {} actors, {} mention edges, {} communities (modularity {:.3})",
        graph.node_count(),
        graph.edge_count(),
        partition.community_count(),
        partition.modularity,
    );

    display_communities(partition);

    let edges = graph.export();
    println!("\n  Heaviest mention edges:");
    for edge in edges.iter().take(10) {
        println!(
            "    {} {} {}  ({})",
            truncate_chars(&edge.from, 20),
            "->".dimmed(),
            truncate_chars(&edge.to, 20),
            edge.weight,
        );
    }
}

fn display_communities(partition: &Partition) {
    for (id, members) in partition.communities().iter().enumerate() {
        let shown: Vec<&str> = members.iter().take(8).copied().collect();
        let suffix = if members.len() > shown.len() {
            format!(" … +{}", members.len() - shown.len())
        } else {
            String::new()
        };
        println!(
            "    community {id} ({} members): {}{}",
            members.len(),
            shown.join(", "),
            suffix,
        );
    }
}

/// Co-occurrence table for the forensics view.
pub fn display_cooccurrence(graph: &CoOccurrenceGraph, limit: usize) {
    println!("\n{}", "=== Co-occurrence Forensics ===".bold());
    if graph.edge_count() == 0 {
        println!("  No co-occurring pairs in the selected posts.");
        return;
    }
    println!(
        "  {} values, {} co-occurring pairs",
        graph.node_count(),
        graph.edge_count()
    );
    println!("\n  {:>6}  {}", "Posts".dimmed(), "Pair".dimmed());
    for edge in graph.edges_by_weight().iter().take(limit) {
        println!(
            "  {:>6}  {} {} {}",
            edge.weight,
            edge.a,
            "+".dimmed(),
            edge.b
        );
    }
}

/// The full report: KPIs, threat feed, authors, network.
pub fn display_report(report: &AnalysisReport) {
    display_kpis(report);
    display_threat_feed(report);
    display_authors(&report.rankings.top_authors);
    display_network(report);
}
