//! Sentiment class counts.

use vidpulse_core::Dataset;

use super::mean;
use crate::error::StageFailure;
use crate::insights::SentimentDistribution;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SentimentClass {
    Positive,
    Negative,
    Neutral,
}

/// Positive above `positive_threshold`, negative below `negative_threshold`,
/// neutral otherwise (boundaries included).
#[must_use]
pub fn classify(compound: f64, positive_threshold: f64, negative_threshold: f64) -> SentimentClass {
    if compound > positive_threshold {
        SentimentClass::Positive
    } else if compound < negative_threshold {
        SentimentClass::Negative
    } else {
        SentimentClass::Neutral
    }
}

/// Count records per class and average `sentiment_compound`.
///
/// `neutral` is derived as `total - positive - negative` so the three
/// counts always sum to the dataset size.
///
/// # Errors
///
/// Returns [`StageFailure::MissingDerivedField`] if sentiment has not been
/// computed for the dataset.
pub fn summarize(
    dataset: &Dataset,
    positive_threshold: f64,
    negative_threshold: f64,
) -> Result<SentimentDistribution, StageFailure> {
    if !dataset.is_empty() && !dataset.derived().sentiment {
        return Err(StageFailure::MissingDerivedField("sentiment_compound"));
    }

    let compounds: Vec<f64> = dataset
        .records()
        .iter()
        .filter_map(|r| r.sentiment_compound())
        .collect();

    let mut positive = 0;
    let mut negative = 0;
    for &compound in &compounds {
        match classify(compound, positive_threshold, negative_threshold) {
            SentimentClass::Positive => positive += 1,
            SentimentClass::Negative => negative += 1,
            SentimentClass::Neutral => {}
        }
    }

    Ok(SentimentDistribution {
        positive,
        negative,
        neutral: dataset.len() - positive - negative,
        avg_sentiment: mean(compounds),
    })
}
