//! Data model, validation, ingestion and configuration for vidpulse.

pub mod app_config;
pub mod config;
pub mod dataset;
pub mod error;
pub mod ingest;
pub mod record;

pub use app_config::{AnalysisConfig, ChannelGrouping};
pub use config::{load_analysis_config, load_analysis_config_from_env};
pub use dataset::{Dataset, DerivedFields};
pub use error::{ConfigError, DatasetError, ValidationError};
pub use ingest::{
    export_enriched_csv, load_dataset, parse_json_dataset, read_csv_dataset, write_enriched_csv,
};
pub use record::{SentimentScores, VideoRecord};
