//! Video analytics engine for vidpulse.
//!
//! Enriches a [`vidpulse_core::Dataset`] with sentiment and engagement
//! scores, then derives trending videos, engagement aggregates, the
//! sentiment distribution, title themes and top channels. Sentiment
//! scoring and phrase extraction are pluggable through [`SentimentScorer`]
//! and [`TopicExtractor`].

pub mod error;
pub mod insights;
pub mod pipeline;
pub mod scorer;
pub mod stages;
pub mod topics;

pub use error::{AnalysisError, StageFailure};
pub use insights::{
    ChannelStats, EngagementStats, IndustryThemes, Insights, InsightsBuilder, Section,
    SectionName, SentimentDistribution, TopChannels, TrendingVideo,
};
pub use pipeline::{AnalysisOutput, AnalysisPipeline};
pub use scorer::{LexiconScorer, ScorerError, SentimentScorer};
pub use stages::StageName;
pub use topics::{ExtractorError, HeuristicTopicExtractor, NullTopicExtractor, TopicExtractor};
