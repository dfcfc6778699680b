//! Dataset ingestion from collector exports and enriched CSV export.

use std::io::{Read, Write};
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::dataset::Dataset;
use crate::record::{SentimentScores, VideoRecord};
use crate::{DatasetError, ValidationError};

/// One row as written by the video collector. Column names follow the
/// collector's export (`video_id`, `channel_title`) with the record's own
/// names accepted as aliases.
#[derive(Debug, Deserialize)]
struct RawRecord {
    #[serde(alias = "video_id")]
    id: String,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    channel_id: Option<String>,
    #[serde(default, alias = "channel_title")]
    channel_name: Option<String>,
    #[serde(default)]
    published_at: Option<DateTime<Utc>>,
    #[serde(default)]
    view_count: Option<i64>,
    #[serde(default)]
    like_count: Option<i64>,
    #[serde(default)]
    comment_count: Option<i64>,
    #[serde(default)]
    sentiment_compound: Option<f64>,
    #[serde(default)]
    sentiment_positive: Option<f64>,
    #[serde(default)]
    sentiment_negative: Option<f64>,
    #[serde(default)]
    sentiment_neutral: Option<f64>,
    #[serde(default)]
    engagement_score: Option<f64>,
}

impl RawRecord {
    fn into_record(self) -> Result<VideoRecord, ValidationError> {
        let view_count = non_negative(&self.id, "view_count", self.view_count)?;
        let like_count = non_negative(&self.id, "like_count", self.like_count)?;
        let comment_count = non_negative(&self.id, "comment_count", self.comment_count)?;

        let sentiment = match (
            self.sentiment_compound,
            self.sentiment_positive,
            self.sentiment_negative,
            self.sentiment_neutral,
        ) {
            (Some(compound), Some(positive), Some(negative), Some(neutral)) => {
                Some(SentimentScores {
                    compound,
                    positive,
                    negative,
                    neutral,
                })
            }
            _ => None,
        };

        Ok(VideoRecord {
            id: self.id,
            title: self.title.unwrap_or_default(),
            description: self.description.unwrap_or_default(),
            channel_id: self.channel_id.unwrap_or_default(),
            channel_name: self.channel_name.unwrap_or_default(),
            published_at: self.published_at,
            view_count,
            like_count,
            comment_count,
            sentiment,
            engagement_score: self.engagement_score,
        })
    }
}

/// Missing counts default to zero, matching the collector's behavior for
/// videos with hidden statistics.
fn non_negative(id: &str, field: &'static str, value: Option<i64>) -> Result<u64, ValidationError> {
    let value = value.unwrap_or(0);
    u64::try_from(value).map_err(|_| ValidationError::NegativeCount {
        id: id.to_string(),
        field,
        value,
    })
}

fn into_dataset(rows: Vec<RawRecord>) -> Result<Dataset, DatasetError> {
    let records = rows
        .into_iter()
        .map(RawRecord::into_record)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Dataset::new(records)?)
}

/// Parse a dataset from a JSON array of records.
///
/// # Errors
///
/// Returns [`DatasetError`] if the JSON is malformed or a record fails validation.
pub fn parse_json_dataset(json: &str) -> Result<Dataset, DatasetError> {
    let rows: Vec<RawRecord> = serde_json::from_str(json)?;
    into_dataset(rows)
}

/// Read a dataset from CSV with a header row. Unknown columns are ignored.
///
/// # Errors
///
/// Returns [`DatasetError`] if a row cannot be parsed or fails validation.
pub fn read_csv_dataset<R: Read>(reader: R) -> Result<Dataset, DatasetError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::Headers)
        .from_reader(reader);
    let rows = csv_reader
        .deserialize::<RawRecord>()
        .collect::<Result<Vec<_>, _>>()?;
    into_dataset(rows)
}

/// Load a dataset from a `.json` or `.csv` file.
///
/// # Errors
///
/// Returns [`DatasetError`] if the file cannot be read, has an unsupported
/// extension, cannot be parsed, or fails validation.
pub fn load_dataset(path: &Path) -> Result<Dataset, DatasetError> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    let io_err = |source| DatasetError::Io {
        path: path.display().to_string(),
        source,
    };

    match extension.as_str() {
        "json" => {
            let content = std::fs::read_to_string(path).map_err(io_err)?;
            parse_json_dataset(&content)
        }
        "csv" => {
            let file = std::fs::File::open(path).map_err(io_err)?;
            read_csv_dataset(file)
        }
        other => Err(DatasetError::UnsupportedFormat(other.to_string())),
    }
}

/// Flat row shape for the enriched export; derived columns are empty until
/// the corresponding stage has run.
#[derive(Debug, Serialize)]
struct EnrichedRow<'a> {
    video_id: &'a str,
    title: &'a str,
    description: &'a str,
    channel_id: &'a str,
    channel_title: &'a str,
    published_at: Option<DateTime<Utc>>,
    view_count: u64,
    like_count: u64,
    comment_count: u64,
    sentiment_compound: Option<f64>,
    sentiment_positive: Option<f64>,
    sentiment_negative: Option<f64>,
    sentiment_neutral: Option<f64>,
    engagement_score: Option<f64>,
}

impl<'a> From<&'a VideoRecord> for EnrichedRow<'a> {
    fn from(r: &'a VideoRecord) -> Self {
        Self {
            video_id: &r.id,
            title: &r.title,
            description: &r.description,
            channel_id: &r.channel_id,
            channel_title: &r.channel_name,
            published_at: r.published_at,
            view_count: r.view_count,
            like_count: r.like_count,
            comment_count: r.comment_count,
            sentiment_compound: r.sentiment.map(|s| s.compound),
            sentiment_positive: r.sentiment.map(|s| s.positive),
            sentiment_negative: r.sentiment.map(|s| s.negative),
            sentiment_neutral: r.sentiment.map(|s| s.neutral),
            engagement_score: r.engagement_score,
        }
    }
}

/// Write every record, including derived fields, as CSV.
///
/// # Errors
///
/// Returns [`DatasetError::Csv`] if serialization or the underlying write fails.
pub fn write_enriched_csv<W: Write>(dataset: &Dataset, writer: W) -> Result<(), DatasetError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for record in dataset.records() {
        csv_writer.serialize(EnrichedRow::from(record))?;
    }
    csv_writer.flush().map_err(csv::Error::from)?;
    Ok(())
}

/// Export the enriched dataset to a CSV file, creating or truncating it.
///
/// # Errors
///
/// Returns [`DatasetError`] if the file cannot be created or written.
pub fn export_enriched_csv(dataset: &Dataset, path: &Path) -> Result<(), DatasetError> {
    let file = std::fs::File::create(path).map_err(|source| DatasetError::Io {
        path: path.display().to_string(),
        source,
    })?;
    write_enriched_csv(dataset, file)
}
