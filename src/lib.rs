// Argus: hostile narrative analysis for short social-media posts.
//
// This is the library root. Each module corresponds to a stage of the
// narrative analysis pipeline: validated post records in, a structured
// intelligence picture out (classification, rankings, mention network
// with communities, co-occurrence forensics).

pub mod config;
pub mod error;
pub mod forensics;
pub mod ingest;
pub mod keywords;
pub mod model;
pub mod network;
pub mod output;
pub mod pipeline;
pub mod rankings;
pub mod scoring;
pub mod sentiment;
