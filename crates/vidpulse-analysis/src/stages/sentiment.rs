//! Per-record sentiment enrichment.

use vidpulse_core::{Dataset, SentimentScores};

use crate::error::StageFailure;
use crate::scorer::SentimentScorer;

/// Score `title + " " + description` of every record and store the result.
///
/// Either every record is enriched or, on the first scorer failure or
/// out-of-range score, none is. Re-running overwrites earlier scores.
///
/// # Errors
///
/// Returns [`StageFailure::Scorer`] or [`StageFailure::ScoreOutOfRange`]
/// naming the offending record.
pub fn enrich(dataset: &mut Dataset, scorer: &dyn SentimentScorer) -> Result<(), StageFailure> {
    dataset.try_enrich_sentiment(|record| {
        let scores = scorer
            .polarity_scores(&record.scoring_text())
            .map_err(|source| StageFailure::Scorer {
                record_id: record.id.clone(),
                source,
            })?;
        check_ranges(&record.id, scores)?;
        Ok::<_, StageFailure>(scores)
    })?;

    tracing::debug!(records = dataset.len(), "sentiment scores attached");
    Ok(())
}

fn check_ranges(record_id: &str, scores: SentimentScores) -> Result<(), StageFailure> {
    let fields = [
        ("sentiment_compound", scores.compound, -1.0),
        ("sentiment_positive", scores.positive, 0.0),
        ("sentiment_negative", scores.negative, 0.0),
        ("sentiment_neutral", scores.neutral, 0.0),
    ];
    for (field, value, min) in fields {
        if !value.is_finite() || value < min || value > 1.0 {
            return Err(StageFailure::ScoreOutOfRange {
                record_id: record_id.to_string(),
                field,
                value,
            });
        }
    }
    Ok(())
}
