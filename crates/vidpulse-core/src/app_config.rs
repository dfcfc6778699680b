use serde::Serialize;

/// Which record field channel aggregates are grouped by.
///
/// `Name` merges distinct channels that share a display name; `Id` keeps
/// them apart but falls back to the name for records without a channel id.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChannelGrouping {
    #[default]
    Name,
    Id,
}

impl std::fmt::Display for ChannelGrouping {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChannelGrouping::Name => write!(f, "name"),
            ChannelGrouping::Id => write!(f, "id"),
        }
    }
}

impl std::str::FromStr for ChannelGrouping {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "name" => Ok(ChannelGrouping::Name),
            "id" => Ok(ChannelGrouping::Id),
            other => Err(format!("unknown channel grouping '{other}'; expected 'name' or 'id'")),
        }
    }
}

/// Tunables for one analysis run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisConfig {
    /// Compound scores strictly above this are positive.
    pub positive_threshold: f64,
    /// Compound scores strictly below this are negative.
    pub negative_threshold: f64,
    /// Minimum `comment_count` for a video to be considered trending.
    pub min_engagement_threshold: u64,
    pub trending_top_n: usize,
    pub theme_top_n: usize,
    pub channel_top_n: usize,
    pub channel_grouping: ChannelGrouping,
    pub log_level: String,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            positive_threshold: 0.05,
            negative_threshold: -0.05,
            min_engagement_threshold: 100,
            trending_top_n: 10,
            theme_top_n: 15,
            channel_top_n: 10,
            channel_grouping: ChannelGrouping::Name,
            log_level: "info".to_string(),
        }
    }
}
