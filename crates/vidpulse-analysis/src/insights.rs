//! Insights accumulated across pipeline stages.

use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

use crate::error::AnalysisError;

/// Key of one insights section. Declaration order is pipeline order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionName {
    TrendingVideos,
    EngagementStats,
    SentimentDistribution,
    IndustryThemes,
    TopChannels,
}

impl SectionName {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            SectionName::TrendingVideos => "trending_videos",
            SectionName::EngagementStats => "engagement_stats",
            SectionName::SentimentDistribution => "sentiment_distribution",
            SectionName::IndustryThemes => "industry_themes",
            SectionName::TopChannels => "top_channels",
        }
    }
}

impl std::fmt::Display for SectionName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry of the trending view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendingVideo {
    pub id: String,
    pub title: String,
    pub channel_name: String,
    pub view_count: u64,
    pub like_count: u64,
    pub comment_count: u64,
    pub engagement_score: f64,
}

/// Dataset-wide engagement aggregates. Every mean over zero records is `0.0`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct EngagementStats {
    pub avg_views: f64,
    pub median_views: f64,
    pub avg_likes: f64,
    pub avg_comments: f64,
    /// Mean of `(likes + comments) / views` over records with at least one view.
    pub engagement_rate: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct SentimentDistribution {
    pub positive: usize,
    pub negative: usize,
    pub neutral: usize,
    pub avg_sentiment: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct IndustryThemes {
    pub top_themes: Vec<String>,
}

/// Aggregates for one channel group.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ChannelStats {
    /// Display name of the first record seen in the group.
    pub channel_name: String,
    /// Channel id of the first record seen in the group; may be empty.
    pub channel_id: String,
    pub video_count: usize,
    pub total_views: u64,
    pub total_likes: u64,
    pub total_comments: u64,
}

/// Channel groups ordered by total views, serialized as an ordered JSON
/// object keyed by group key.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TopChannels(pub Vec<(String, ChannelStats)>);

impl TopChannels {
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&ChannelStats> {
        self.0.iter().find(|(k, _)| k == key).map(|(_, stats)| stats)
    }

    #[must_use]
    pub fn keys(&self) -> Vec<&str> {
        self.0.iter().map(|(k, _)| k.as_str()).collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Serialize for TopChannels {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (key, stats) in &self.0 {
            map.serialize_entry(key, stats)?;
        }
        map.end()
    }
}

/// One published section payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Section {
    TrendingVideos(Vec<TrendingVideo>),
    EngagementStats(EngagementStats),
    SentimentDistribution(SentimentDistribution),
    IndustryThemes(IndustryThemes),
    TopChannels(TopChannels),
}

impl Section {
    #[must_use]
    pub fn name(&self) -> SectionName {
        match self {
            Section::TrendingVideos(_) => SectionName::TrendingVideos,
            Section::EngagementStats(_) => SectionName::EngagementStats,
            Section::SentimentDistribution(_) => SectionName::SentimentDistribution,
            Section::IndustryThemes(_) => SectionName::IndustryThemes,
            Section::TopChannels(_) => SectionName::TopChannels,
        }
    }
}

/// Accumulates sections while a pipeline runs. Moved through each stage and
/// frozen with [`InsightsBuilder::finish`].
#[derive(Debug, Default)]
pub struct InsightsBuilder {
    sections: Vec<Section>,
}

impl InsightsBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a section.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::DuplicateSection`] if a section with the same
    /// name was already published.
    pub fn with_section(mut self, section: Section) -> Result<Self, AnalysisError> {
        let name = section.name();
        if self.contains(name) {
            return Err(AnalysisError::DuplicateSection(name));
        }
        self.sections.push(section);
        Ok(self)
    }

    #[must_use]
    pub fn contains(&self, name: SectionName) -> bool {
        self.sections.iter().any(|s| s.name() == name)
    }

    #[must_use]
    pub fn finish(self) -> Insights {
        Insights {
            sections: self.sections,
        }
    }
}

/// Read-only insights produced by one pipeline run.
#[derive(Debug, Clone, PartialEq)]
pub struct Insights {
    sections: Vec<Section>,
}

impl Insights {
    /// Section names in publication order.
    #[must_use]
    pub fn section_names(&self) -> Vec<SectionName> {
        self.sections.iter().map(Section::name).collect()
    }

    #[must_use]
    pub fn section(&self, name: SectionName) -> Option<&Section> {
        self.sections.iter().find(|s| s.name() == name)
    }

    #[must_use]
    pub fn trending_videos(&self) -> Option<&[TrendingVideo]> {
        match self.section(SectionName::TrendingVideos)? {
            Section::TrendingVideos(v) => Some(v),
            _ => None,
        }
    }

    #[must_use]
    pub fn engagement_stats(&self) -> Option<&EngagementStats> {
        match self.section(SectionName::EngagementStats)? {
            Section::EngagementStats(s) => Some(s),
            _ => None,
        }
    }

    #[must_use]
    pub fn sentiment_distribution(&self) -> Option<&SentimentDistribution> {
        match self.section(SectionName::SentimentDistribution)? {
            Section::SentimentDistribution(d) => Some(d),
            _ => None,
        }
    }

    #[must_use]
    pub fn industry_themes(&self) -> Option<&IndustryThemes> {
        match self.section(SectionName::IndustryThemes)? {
            Section::IndustryThemes(t) => Some(t),
            _ => None,
        }
    }

    #[must_use]
    pub fn top_channels(&self) -> Option<&TopChannels> {
        match self.section(SectionName::TopChannels)? {
            Section::TopChannels(c) => Some(c),
            _ => None,
        }
    }
}

impl Serialize for Insights {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.sections.len()))?;
        for section in &self.sections {
            map.serialize_entry(section.name().as_str(), section)?;
        }
        map.end()
    }
}
