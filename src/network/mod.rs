// Mention network subsystem: graph construction and community detection.

pub mod community;
pub mod graph;

pub use community::{detect_communities, CommunityConfig, Partition};
pub use graph::{MentionEdge, MentionGraph};
