use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Polarity scores attached to a record by the sentiment stage.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SentimentScores {
    /// Signed aggregate polarity in `[-1.0, 1.0]`.
    pub compound: f64,
    /// Share of positive polarity mass in `[0.0, 1.0]`.
    pub positive: f64,
    /// Share of negative polarity mass in `[0.0, 1.0]`.
    pub negative: f64,
    /// Share of neutral mass in `[0.0, 1.0]`.
    pub neutral: f64,
}

impl SentimentScores {
    /// The result for empty or polarity-free text.
    pub const NEUTRAL: Self = Self {
        compound: 0.0,
        positive: 0.0,
        negative: 0.0,
        neutral: 1.0,
    };
}

/// One analyzed video: platform metadata plus fields derived by the
/// analysis stages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoRecord {
    /// Platform video ID. Unique within a [`crate::Dataset`].
    pub id: String,
    pub title: String,
    pub description: String,
    pub channel_id: String,
    /// Channel display name, e.g. `"Two Minute Papers"`.
    pub channel_name: String,
    pub published_at: Option<DateTime<Utc>>,
    pub view_count: u64,
    pub like_count: u64,
    pub comment_count: u64,
    /// Set by the sentiment stage.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sentiment: Option<SentimentScores>,
    /// Set by the engagement stage.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub engagement_score: Option<f64>,
}

impl VideoRecord {
    /// Build a record with no derived fields.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        channel_name: impl Into<String>,
        view_count: u64,
        like_count: u64,
        comment_count: u64,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: String::new(),
            channel_id: String::new(),
            channel_name: channel_name.into(),
            published_at: None,
            view_count,
            like_count,
            comment_count,
            sentiment: None,
            engagement_score: None,
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    #[must_use]
    pub fn with_channel_id(mut self, channel_id: impl Into<String>) -> Self {
        self.channel_id = channel_id.into();
        self
    }

    /// Title and description joined by a single space, as fed to the
    /// sentiment scorer.
    #[must_use]
    pub fn scoring_text(&self) -> String {
        format!("{} {}", self.title, self.description)
    }

    #[must_use]
    pub fn sentiment_compound(&self) -> Option<f64> {
        self.sentiment.map(|s| s.compound)
    }
}
