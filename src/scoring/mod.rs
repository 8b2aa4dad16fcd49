// Scoring subsystem: engagement weighting and the bot-likelihood heuristic.

pub mod bot;
pub mod engagement;

pub use bot::{BotSignals, BotThresholds};
pub use engagement::EngagementWeights;
