//! Analysis stages, in pipeline order.

pub mod channels;
pub mod distribution;
pub mod engagement;
pub mod sentiment;
pub mod themes;

use serde::Serialize;

/// Identifies a stage in errors and logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StageName {
    Sentiment,
    Engagement,
    EngagementStats,
    Distribution,
    Themes,
    Channels,
}

impl std::fmt::Display for StageName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StageName::Sentiment => write!(f, "sentiment"),
            StageName::Engagement => write!(f, "engagement"),
            StageName::EngagementStats => write!(f, "engagement_stats"),
            StageName::Distribution => write!(f, "distribution"),
            StageName::Themes => write!(f, "themes"),
            StageName::Channels => write!(f, "channels"),
        }
    }
}

/// Arithmetic mean, `0.0` for an empty input.
#[allow(clippy::cast_precision_loss)]
pub(crate) fn mean<I>(values: I) -> f64
where
    I: IntoIterator<Item = f64>,
{
    let (sum, count) = values
        .into_iter()
        .fold((0.0_f64, 0_usize), |(sum, count), v| (sum + v, count + 1));
    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mean_of_empty_is_zero() {
        assert!(mean(Vec::new()).abs() < f64::EPSILON);
    }

    #[test]
    fn mean_of_values() {
        assert!((mean(vec![1.0, 2.0, 6.0]) - 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn stage_names_display_snake_case() {
        assert_eq!(StageName::Sentiment.to_string(), "sentiment");
        assert_eq!(StageName::EngagementStats.to_string(), "engagement_stats");
    }
}
