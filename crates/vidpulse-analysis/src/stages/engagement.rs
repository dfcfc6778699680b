//! Engagement scoring, trending selection and engagement aggregates.

use vidpulse_core::{Dataset, VideoRecord};

use super::mean;
use crate::insights::{EngagementStats, TrendingVideo};

pub const VIEW_WEIGHT: f64 = 0.5;
pub const LIKE_WEIGHT: f64 = 2.0;
pub const COMMENT_WEIGHT: f64 = 3.0;

/// `0.5 * views + 2.0 * likes + 3.0 * comments`.
#[allow(clippy::cast_precision_loss)]
#[must_use]
pub fn engagement_score(record: &VideoRecord) -> f64 {
    VIEW_WEIGHT * record.view_count as f64
        + LIKE_WEIGHT * record.like_count as f64
        + COMMENT_WEIGHT * record.comment_count as f64
}

/// Write `engagement_score` into every record, then select the trending view.
pub fn score_and_rank(
    dataset: &mut Dataset,
    min_comments: u64,
    top_n: usize,
) -> Vec<TrendingVideo> {
    dataset.enrich_engagement(engagement_score);
    let trending = select_trending(dataset, min_comments, top_n);
    tracing::debug!(
        records = dataset.len(),
        trending = trending.len(),
        min_comments,
        "engagement scores attached"
    );
    trending
}

/// The top `top_n` records by engagement score among those with at least
/// `min_comments` comments. Ties keep dataset order.
#[must_use]
pub fn select_trending(dataset: &Dataset, min_comments: u64, top_n: usize) -> Vec<TrendingVideo> {
    let mut candidates: Vec<(&VideoRecord, f64)> = dataset
        .records()
        .iter()
        .filter(|r| r.comment_count >= min_comments)
        .map(|r| (r, r.engagement_score.unwrap_or_else(|| engagement_score(r))))
        .collect();

    // sort_by is stable, so equal scores keep their dataset order.
    candidates.sort_by(|a, b| b.1.total_cmp(&a.1));
    candidates.truncate(top_n);

    candidates
        .into_iter()
        .map(|(r, score)| TrendingVideo {
            id: r.id.clone(),
            title: r.title.clone(),
            channel_name: r.channel_name.clone(),
            view_count: r.view_count,
            like_count: r.like_count,
            comment_count: r.comment_count,
            engagement_score: score,
        })
        .collect()
}

/// Aggregates over the whole dataset, not just the trending view.
///
/// Records with zero views are left out of `engagement_rate`, whose
/// per-record ratio is undefined for them.
#[allow(clippy::cast_precision_loss)]
#[must_use]
pub fn compute_stats(dataset: &Dataset) -> EngagementStats {
    let records = dataset.records();

    let engagement_rate = mean(records.iter().filter(|r| r.view_count > 0).map(|r| {
        (r.like_count as f64 + r.comment_count as f64) / r.view_count as f64
    }));

    EngagementStats {
        avg_views: mean(records.iter().map(|r| r.view_count as f64)),
        median_views: median(records.iter().map(|r| r.view_count).collect()),
        avg_likes: mean(records.iter().map(|r| r.like_count as f64)),
        avg_comments: mean(records.iter().map(|r| r.comment_count as f64)),
        engagement_rate,
    }
}

/// Median with the midpoint of the two middle values for even counts;
/// `0.0` for an empty input.
#[allow(clippy::cast_precision_loss)]
fn median(mut values: Vec<u64>) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.sort_unstable();
    let mid = values.len() / 2;
    if values.len() % 2 == 0 {
        (values[mid - 1] as f64 + values[mid] as f64) / 2.0
    } else {
        values[mid] as f64
    }
}
