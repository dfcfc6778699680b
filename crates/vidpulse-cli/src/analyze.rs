//! `analyze` and `validate` command handlers.

use std::path::{Path, PathBuf};

use clap::Args;
use vidpulse_analysis::{
    AnalysisPipeline, HeuristicTopicExtractor, Insights, LexiconScorer, NullTopicExtractor,
};
use vidpulse_core::{AnalysisConfig, ChannelGrouping};

/// Arguments for `analyze`. Unset flags keep the value from the environment.
#[derive(Debug, Args)]
pub(crate) struct AnalyzeArgs {
    /// Dataset file (.json or .csv)
    #[arg(long, short)]
    pub input: PathBuf,

    /// Write insights JSON here instead of stdout
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Also export the enriched dataset as CSV
    #[arg(long)]
    pub export_csv: Option<PathBuf>,

    #[arg(long, allow_negative_numbers = true)]
    pub positive_threshold: Option<f64>,

    #[arg(long, allow_negative_numbers = true)]
    pub negative_threshold: Option<f64>,

    /// Minimum comment count for a video to be considered trending
    #[arg(long)]
    pub min_engagement: Option<u64>,

    #[arg(long)]
    pub trending_top_n: Option<usize>,

    #[arg(long)]
    pub theme_top_n: Option<usize>,

    #[arg(long)]
    pub channel_top_n: Option<usize>,

    /// Group channels by display `name` or by channel `id`
    #[arg(long)]
    pub group_by: Option<ChannelGrouping>,

    /// Skip phrase extraction; `industry_themes` will be empty
    #[arg(long)]
    pub no_themes: bool,
}

/// Layer command-line overrides on top of the env-derived config.
pub(crate) fn apply_overrides(mut config: AnalysisConfig, args: &AnalyzeArgs) -> AnalysisConfig {
    if let Some(v) = args.positive_threshold {
        config.positive_threshold = v;
    }
    if let Some(v) = args.negative_threshold {
        config.negative_threshold = v;
    }
    if let Some(v) = args.min_engagement {
        config.min_engagement_threshold = v;
    }
    if let Some(v) = args.trending_top_n {
        config.trending_top_n = v;
    }
    if let Some(v) = args.theme_top_n {
        config.theme_top_n = v;
    }
    if let Some(v) = args.channel_top_n {
        config.channel_top_n = v;
    }
    if let Some(v) = args.group_by {
        config.channel_grouping = v;
    }
    config
}

/// Read the `VIDPULSE_*` config, then analyze with the flag overrides applied.
///
/// # Errors
///
/// Returns an error if an env var cannot be parsed, or as [`analyze_with`].
pub(crate) fn run_analyze(args: &AnalyzeArgs) -> anyhow::Result<()> {
    let config = vidpulse_core::load_analysis_config_from_env()?;
    analyze_with(config, args)
}

/// Load the dataset, run the pipeline and write the results.
///
/// # Errors
///
/// Returns an error if the config is invalid, the dataset cannot be loaded,
/// any stage fails, or an output file cannot be written.
pub(crate) fn analyze_with(config: AnalysisConfig, args: &AnalyzeArgs) -> anyhow::Result<()> {
    let config = apply_overrides(config, args);
    let dataset = vidpulse_core::load_dataset(&args.input)?;
    tracing::info!(input = %args.input.display(), records = dataset.len(), "dataset loaded");

    let pipeline = if args.no_themes {
        AnalysisPipeline::new(config, LexiconScorer::new(), NullTopicExtractor)?
    } else {
        AnalysisPipeline::new(config, LexiconScorer::new(), HeuristicTopicExtractor::new())?
    };
    let output = pipeline.run(dataset)?;

    let json = serde_json::to_string_pretty(&output.insights)?;
    match &args.output {
        Some(path) => {
            std::fs::write(path, json)
                .map_err(|e| anyhow::anyhow!("failed to write {}: {e}", path.display()))?;
            tracing::info!(output = %path.display(), "insights written");
        }
        None => println!("{json}"),
    }

    if let Some(path) = &args.export_csv {
        vidpulse_core::export_enriched_csv(&output.dataset, path)?;
        tracing::info!(output = %path.display(), "enriched dataset exported");
    }

    eprintln!("{}", summary_line(&output.insights, output.dataset.len()));
    Ok(())
}

/// Load and validate a dataset file.
///
/// # Errors
///
/// Returns an error if the file cannot be read, parsed, or validated.
pub(crate) fn run_validate(input: &Path) -> anyhow::Result<()> {
    let dataset = vidpulse_core::load_dataset(input)?;
    let derived = dataset.derived();
    println!(
        "{}: {} records valid (sentiment computed: {}, engagement computed: {})",
        input.display(),
        dataset.len(),
        derived.sentiment,
        derived.engagement
    );
    Ok(())
}

pub(crate) fn summary_line(insights: &Insights, records: usize) -> String {
    let trending = insights.trending_videos().map_or(0, <[_]>::len);
    let channels = insights.top_channels().map_or(0, |c| c.len());
    let themes = insights
        .industry_themes()
        .map_or(0, |t| t.top_themes.len());
    let (positive, negative, neutral) = insights
        .sentiment_distribution()
        .map_or((0, 0, 0), |d| (d.positive, d.negative, d.neutral));
    format!(
        "analyzed {records} videos: {trending} trending, {channels} channels, {themes} themes, \
         sentiment +{positive}/-{negative}/={neutral}"
    )
}
