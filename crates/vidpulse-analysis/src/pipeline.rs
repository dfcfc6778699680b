//! Analysis pipeline orchestration.

use vidpulse_core::{AnalysisConfig, Dataset, VideoRecord};

use crate::error::{AnalysisError, StageFailure};
use crate::insights::{Insights, InsightsBuilder, Section};
use crate::scorer::SentimentScorer;
use crate::stages::{channels, distribution, engagement, sentiment, themes, StageName};
use crate::topics::TopicExtractor;

/// Result of one pipeline run: the frozen insights and the enriched dataset.
#[derive(Debug)]
pub struct AnalysisOutput {
    pub insights: Insights,
    pub dataset: Dataset,
}

/// Runs the analysis stages over one dataset in a fixed order:
///
/// 1. Sentiment: score every record.
/// 2. Engagement: score every record and publish `trending_videos`.
/// 3. Engagement stats: publish `engagement_stats`.
/// 4. Distribution: publish `sentiment_distribution`.
/// 5. Themes: publish `industry_themes`.
/// 6. Channels: publish `top_channels`.
///
/// The first failing stage aborts the run; no partial insights are returned.
pub struct AnalysisPipeline {
    config: AnalysisConfig,
    scorer: Box<dyn SentimentScorer>,
    extractor: Box<dyn TopicExtractor>,
}

impl std::fmt::Debug for AnalysisPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnalysisPipeline")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

fn failed(stage: StageName) -> impl FnOnce(StageFailure) -> AnalysisError {
    move |source| AnalysisError::Stage { stage, source }
}

impl AnalysisPipeline {
    /// # Errors
    ///
    /// Returns [`AnalysisError::Config`] if `config` fails validation.
    pub fn new<S, T>(config: AnalysisConfig, scorer: S, extractor: T) -> Result<Self, AnalysisError>
    where
        S: SentimentScorer + 'static,
        T: TopicExtractor + 'static,
    {
        config.validate()?;
        Ok(Self {
            config,
            scorer: Box::new(scorer),
            extractor: Box::new(extractor),
        })
    }

    #[must_use]
    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Validate `records` into a [`Dataset`] and run every stage over it.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::Validation`] before any stage runs if the
    /// records are invalid, otherwise as [`AnalysisPipeline::run`].
    pub fn run_records(&self, records: Vec<VideoRecord>) -> Result<AnalysisOutput, AnalysisError> {
        let dataset = Dataset::new(records)?;
        self.run(dataset)
    }

    /// Run every stage over `dataset`.
    ///
    /// An empty dataset is not an error: every section is published with
    /// zero or empty aggregates.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::Stage`] naming the first stage that failed.
    pub fn run(&self, mut dataset: Dataset) -> Result<AnalysisOutput, AnalysisError> {
        let cfg = &self.config;
        tracing::info!(records = dataset.len(), "running analysis pipeline");
        if dataset.is_empty() {
            tracing::warn!("empty dataset; all aggregates default to zero");
        }

        let insights = InsightsBuilder::new();

        tracing::info!(stage = %StageName::Sentiment, "stage started");
        sentiment::enrich(&mut dataset, self.scorer.as_ref()).map_err(failed(StageName::Sentiment))?;

        tracing::info!(stage = %StageName::Engagement, "stage started");
        let trending = engagement::score_and_rank(
            &mut dataset,
            cfg.min_engagement_threshold,
            cfg.trending_top_n,
        );
        let insights = insights.with_section(Section::TrendingVideos(trending))?;

        tracing::info!(stage = %StageName::EngagementStats, "stage started");
        let stats = engagement::compute_stats(&dataset);
        let insights = insights.with_section(Section::EngagementStats(stats))?;

        tracing::info!(stage = %StageName::Distribution, "stage started");
        let dist = distribution::summarize(&dataset, cfg.positive_threshold, cfg.negative_threshold)
            .map_err(failed(StageName::Distribution))?;
        let insights = insights.with_section(Section::SentimentDistribution(dist))?;

        tracing::info!(stage = %StageName::Themes, "stage started");
        let themes = themes::extract(&dataset, self.extractor.as_ref(), cfg.theme_top_n)
            .map_err(failed(StageName::Themes))?;
        let insights = insights.with_section(Section::IndustryThemes(themes))?;

        tracing::info!(stage = %StageName::Channels, "stage started");
        let channels = channels::aggregate(&dataset, cfg.channel_grouping, cfg.channel_top_n);
        let insights = insights.with_section(Section::TopChannels(channels))?;

        tracing::info!(records = dataset.len(), "analysis complete");
        Ok(AnalysisOutput {
            insights: insights.finish(),
            dataset,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::insights::SectionName;
    use crate::scorer::LexiconScorer;
    use crate::topics::NullTopicExtractor;

    #[test]
    fn new_rejects_invalid_config() {
        let config = AnalysisConfig {
            trending_top_n: 0,
            ..AnalysisConfig::default()
        };
        let err = AnalysisPipeline::new(config, LexiconScorer, NullTopicExtractor).unwrap_err();
        assert!(matches!(err, AnalysisError::Config(_)), "got {err:?}");
    }

    #[test]
    fn sections_published_in_stage_order() {
        let pipeline =
            AnalysisPipeline::new(AnalysisConfig::default(), LexiconScorer, NullTopicExtractor)
                .unwrap();
        let out = pipeline
            .run_records(vec![VideoRecord::new("a", "great", "c", 1, 1, 1)])
            .unwrap();
        assert_eq!(
            out.insights.section_names(),
            vec![
                SectionName::TrendingVideos,
                SectionName::EngagementStats,
                SectionName::SentimentDistribution,
                SectionName::IndustryThemes,
                SectionName::TopChannels,
            ]
        );
        assert!(out.dataset.derived().sentiment);
        assert!(out.dataset.derived().engagement);
    }

    #[test]
    fn invalid_records_fail_before_any_stage() {
        let pipeline =
            AnalysisPipeline::new(AnalysisConfig::default(), LexiconScorer, NullTopicExtractor)
                .unwrap();
        let err = pipeline
            .run_records(vec![
                VideoRecord::new("dup", "t", "c", 0, 0, 0),
                VideoRecord::new("dup", "t", "c", 0, 0, 0),
            ])
            .unwrap_err();
        assert!(matches!(err, AnalysisError::Validation(_)));
        assert!(err.stage().is_none());
    }
}
