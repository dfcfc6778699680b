use thiserror::Error;
use vidpulse_core::{ConfigError, ValidationError};

use crate::insights::SectionName;
use crate::scorer::ScorerError;
use crate::stages::StageName;
use crate::topics::ExtractorError;

/// Why a single stage could not complete.
#[derive(Debug, Error)]
pub enum StageFailure {
    #[error("scoring record '{record_id}' failed: {source}")]
    Scorer {
        record_id: String,
        #[source]
        source: ScorerError,
    },

    #[error("scorer returned {field} = {value} for record '{record_id}', outside its valid range")]
    ScoreOutOfRange {
        record_id: String,
        field: &'static str,
        value: f64,
    },

    #[error("topic extraction failed: {0}")]
    Extractor(#[from] ExtractorError),

    #[error("dataset is missing derived field {0}; run the stage that computes it first")]
    MissingDerivedField(&'static str),
}

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("dataset validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("invalid analysis config: {0}")]
    Config(#[from] ConfigError),

    #[error("{stage} stage failed: {source}")]
    Stage {
        stage: StageName,
        #[source]
        source: StageFailure,
    },

    #[error("insights section {0} was already published")]
    DuplicateSection(SectionName),
}

impl AnalysisError {
    /// The stage that failed, if this error came from stage execution.
    #[must_use]
    pub fn stage(&self) -> Option<StageName> {
        match self {
            AnalysisError::Stage { stage, .. } => Some(*stage),
            _ => None,
        }
    }
}
