use std::collections::HashSet;

use serde::Serialize;

use crate::record::{SentimentScores, VideoRecord};
use crate::ValidationError;

/// Schema marker: which derived fields have been computed for every record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DerivedFields {
    pub sentiment: bool,
    pub engagement: bool,
}

/// An ordered, validated set of [`VideoRecord`]s.
///
/// Record identity (the id set and its order) is fixed at construction.
/// Derived fields are written only through the `enrich_*` methods, which
/// update every record or none.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Dataset {
    records: Vec<VideoRecord>,
    derived: DerivedFields,
}

impl Dataset {
    /// Validate and wrap a list of records.
    ///
    /// Derived fields already present on every record (e.g. a dataset
    /// re-loaded from an enriched export) are reflected in the schema marker.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] if any id is empty or duplicated.
    pub fn new(records: Vec<VideoRecord>) -> Result<Self, ValidationError> {
        validate_records(&records)?;
        let derived = DerivedFields {
            sentiment: !records.is_empty() && records.iter().all(|r| r.sentiment.is_some()),
            engagement: !records.is_empty()
                && records.iter().all(|r| r.engagement_score.is_some()),
        };
        Ok(Self { records, derived })
    }

    #[must_use]
    pub fn records(&self) -> &[VideoRecord] {
        &self.records
    }

    #[must_use]
    pub fn into_records(self) -> Vec<VideoRecord> {
        self.records
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    #[must_use]
    pub fn derived(&self) -> DerivedFields {
        self.derived
    }

    /// Look up a record by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&VideoRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    /// Score every record and store the results.
    ///
    /// All scores are computed before any record is touched, so a failure
    /// leaves the dataset exactly as it was.
    ///
    /// # Errors
    ///
    /// Returns the first error produced by `score`.
    pub fn try_enrich_sentiment<E, F>(&mut self, mut score: F) -> Result<(), E>
    where
        F: FnMut(&VideoRecord) -> Result<SentimentScores, E>,
    {
        let scores = self
            .records
            .iter()
            .map(&mut score)
            .collect::<Result<Vec<_>, E>>()?;
        for (record, scores) in self.records.iter_mut().zip(scores) {
            record.sentiment = Some(scores);
        }
        self.derived.sentiment = true;
        Ok(())
    }

    /// Compute and store the engagement score of every record.
    pub fn enrich_engagement<F>(&mut self, score: F)
    where
        F: Fn(&VideoRecord) -> f64,
    {
        for record in &mut self.records {
            record.engagement_score = Some(score(record));
        }
        self.derived.engagement = true;
    }
}

fn validate_records(records: &[VideoRecord]) -> Result<(), ValidationError> {
    let mut seen = HashSet::with_capacity(records.len());
    for (index, record) in records.iter().enumerate() {
        if record.id.trim().is_empty() {
            return Err(ValidationError::EmptyId { index });
        }
        if !seen.insert(record.id.as_str()) {
            return Err(ValidationError::DuplicateId(record.id.clone()));
        }
    }
    Ok(())
}
