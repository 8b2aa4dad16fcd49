// Central engine configuration.
//
// Every tunable the analysis exposes lives here with an explicit default.
// `validate()` runs before any processing — a bad parameter would silently
// corrupt every downstream result, so it fails fast instead. The CLI loads
// overrides from `ARGUS_*` environment variables (a .env file is read
// automatically at startup via dotenvy).

use std::env;
use std::fs;

use anyhow::{Context, Result};

use crate::error::ConfigError;
use crate::keywords;
use crate::network::community::CommunityConfig;
use crate::scoring::{BotThresholds, EngagementWeights};

/// Full configuration surface of the engine.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// A post with polarity below this is hostile (default -0.3).
    pub polarity_threshold: f64,
    /// Hostile-term lexicon, lowercased. A match forces the Hostile label.
    pub hostile_keywords: Vec<String>,
    pub engagement: EngagementWeights,
    /// Size of the top-N rankings (default 10).
    pub top_n: usize,
    pub bot: BotThresholds,
    pub community: CommunityConfig,
    /// Velocity window in seconds. None uses the snapshot's own span.
    pub velocity_window_secs: Option<i64>,
    /// Hostility ratio at or above this raises the campaign alert (default 0.15).
    pub alert_ratio: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            polarity_threshold: -0.3,
            hostile_keywords: keywords::default_keywords(),
            engagement: EngagementWeights::default(),
            top_n: 10,
            bot: BotThresholds::default(),
            community: CommunityConfig::default(),
            velocity_window_secs: None,
            alert_ratio: 0.15,
        }
    }
}

impl EngineConfig {
    /// Validate every parameter. Called by the pipeline before processing.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(-1.0..=1.0).contains(&self.polarity_threshold) || self.polarity_threshold.is_nan() {
            return Err(ConfigError::ThresholdOutOfRange(self.polarity_threshold));
        }
        self.engagement.validate()?;
        if self.top_n == 0 {
            return Err(ConfigError::ZeroTopN);
        }
        self.bot.validate()?;
        self.community.validate()?;
        if let Some(secs) = self.velocity_window_secs {
            if secs <= 0 {
                return Err(ConfigError::NonPositiveWindow(secs));
            }
        }
        if !(0.0..=1.0).contains(&self.alert_ratio) || self.alert_ratio.is_nan() {
            return Err(ConfigError::AlertRatioOutOfRange(self.alert_ratio));
        }
        Ok(())
    }

    /// Load configuration from environment variables, falling back to
    /// defaults for anything unset.
    ///
    /// Recognized variables: ARGUS_POLARITY_THRESHOLD, ARGUS_KEYWORDS_FILE
    /// (one term per line, replaces the built-in lexicon), ARGUS_TOP_N,
    /// ARGUS_SEED, ARGUS_COMMUNITY_ITERATIONS, ARGUS_VELOCITY_WINDOW_SECS,
    /// ARGUS_ALERT_RATIO, and the three ARGUS_WEIGHT_* engagement weights.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(v) = env::var("ARGUS_POLARITY_THRESHOLD") {
            config.polarity_threshold = v
                .parse()
                .context("ARGUS_POLARITY_THRESHOLD is not a number")?;
        }
        if let Ok(path) = env::var("ARGUS_KEYWORDS_FILE") {
            let contents = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read keywords file {path}"))?;
            let terms: Vec<String> = contents.lines().map(|l| l.to_string()).collect();
            config.hostile_keywords = keywords::normalize(&terms);
        }
        if let Ok(v) = env::var("ARGUS_TOP_N") {
            config.top_n = v.parse().context("ARGUS_TOP_N is not an integer")?;
        }
        if let Ok(v) = env::var("ARGUS_SEED") {
            config.community.seed = v.parse().context("ARGUS_SEED is not an integer")?;
        }
        if let Ok(v) = env::var("ARGUS_COMMUNITY_ITERATIONS") {
            config.community.max_iterations = v
                .parse()
                .context("ARGUS_COMMUNITY_ITERATIONS is not an integer")?;
        }
        if let Ok(v) = env::var("ARGUS_VELOCITY_WINDOW_SECS") {
            config.velocity_window_secs = Some(
                v.parse()
                    .context("ARGUS_VELOCITY_WINDOW_SECS is not an integer")?,
            );
        }
        if let Ok(v) = env::var("ARGUS_ALERT_RATIO") {
            config.alert_ratio = v.parse().context("ARGUS_ALERT_RATIO is not a number")?;
        }
        if let Ok(v) = env::var("ARGUS_WEIGHT_LIKES") {
            config.engagement.likes = v.parse().context("ARGUS_WEIGHT_LIKES is not a number")?;
        }
        if let Ok(v) = env::var("ARGUS_WEIGHT_RETWEETS") {
            config.engagement.retweets =
                v.parse().context("ARGUS_WEIGHT_RETWEETS is not a number")?;
        }
        if let Ok(v) = env::var("ARGUS_WEIGHT_REPLIES") {
            config.engagement.replies =
                v.parse().context("ARGUS_WEIGHT_REPLIES is not a number")?;
        }

        config.validate()?;
        Ok(config)
    }
}
