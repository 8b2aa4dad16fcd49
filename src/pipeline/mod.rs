// The batch analysis pipeline.

pub mod analyze;

pub use analyze::{classify_posts, run, AnalysisReport, NetworkAnalysis, ReportExport};
