use crate::app_config::{AnalysisConfig, ChannelGrouping};
use crate::ConfigError;

/// Load analysis configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value cannot be parsed or fails validation.
pub fn load_analysis_config() -> Result<AnalysisConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_analysis_config_from_env()
}

/// Load analysis configuration from environment variables already in the process.
///
/// Unlike [`load_analysis_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value cannot be parsed or fails validation.
pub fn load_analysis_config_from_env() -> Result<AnalysisConfig, ConfigError> {
    build_analysis_config(|key| std::env::var(key))
}

/// Build analysis configuration using the provided env-var lookup function.
///
/// Every variable is optional; unset variables take the [`AnalysisConfig`]
/// defaults.
fn build_analysis_config<F>(lookup: F) -> Result<AnalysisConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let defaults = AnalysisConfig::default();

    let parse_f64 = |var: &str, default: f64| -> Result<f64, ConfigError> {
        match lookup(var) {
            Ok(raw) => raw.trim().parse::<f64>().map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            }),
            Err(_) => Ok(default),
        }
    };

    let parse_u64 = |var: &str, default: u64| -> Result<u64, ConfigError> {
        match lookup(var) {
            Ok(raw) => raw.trim().parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            }),
            Err(_) => Ok(default),
        }
    };

    let parse_usize = |var: &str, default: usize| -> Result<usize, ConfigError> {
        match lookup(var) {
            Ok(raw) => raw
                .trim()
                .parse::<usize>()
                .map_err(|e| ConfigError::InvalidEnvVar {
                    var: var.to_string(),
                    reason: e.to_string(),
                }),
            Err(_) => Ok(default),
        }
    };

    let positive_threshold = parse_f64("VIDPULSE_POSITIVE_THRESHOLD", defaults.positive_threshold)?;
    let negative_threshold = parse_f64("VIDPULSE_NEGATIVE_THRESHOLD", defaults.negative_threshold)?;
    let min_engagement_threshold = parse_u64(
        "VIDPULSE_MIN_ENGAGEMENT_THRESHOLD",
        defaults.min_engagement_threshold,
    )?;
    let trending_top_n = parse_usize("VIDPULSE_TRENDING_TOP_N", defaults.trending_top_n)?;
    let theme_top_n = parse_usize("VIDPULSE_THEME_TOP_N", defaults.theme_top_n)?;
    let channel_top_n = parse_usize("VIDPULSE_CHANNEL_TOP_N", defaults.channel_top_n)?;

    let channel_grouping = match lookup("VIDPULSE_CHANNEL_GROUPING") {
        Ok(raw) => raw
            .parse::<ChannelGrouping>()
            .map_err(|reason| ConfigError::InvalidEnvVar {
                var: "VIDPULSE_CHANNEL_GROUPING".to_string(),
                reason,
            })?,
        Err(_) => defaults.channel_grouping,
    };

    let log_level = lookup("VIDPULSE_LOG_LEVEL").unwrap_or(defaults.log_level);

    let config = AnalysisConfig {
        positive_threshold,
        negative_threshold,
        min_engagement_threshold,
        trending_top_n,
        theme_top_n,
        channel_top_n,
        channel_grouping,
        log_level,
    };
    config.validate()?;
    Ok(config)
}

impl AnalysisConfig {
    /// Check threshold ordering and ranges.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` describing the first violated rule.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("positive_threshold", self.positive_threshold),
            ("negative_threshold", self.negative_threshold),
        ] {
            if !value.is_finite() || !(-1.0..=1.0).contains(&value) {
                return Err(ConfigError::Validation(format!(
                    "{name} must be within [-1.0, 1.0], got {value}"
                )));
            }
        }

        if self.negative_threshold > self.positive_threshold {
            return Err(ConfigError::Validation(format!(
                "negative_threshold ({}) must not exceed positive_threshold ({})",
                self.negative_threshold, self.positive_threshold
            )));
        }

        for (name, value) in [
            ("trending_top_n", self.trending_top_n),
            ("theme_top_n", self.theme_top_n),
            ("channel_top_n", self.channel_top_n),
        ] {
            if value == 0 {
                return Err(ConfigError::Validation(format!("{name} must be at least 1")));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::env::VarError;

    use super::*;

    fn lookup_from_map<'a>(
        map: &'a HashMap<&'a str, &'a str>,
    ) -> impl Fn(&str) -> Result<String, VarError> + 'a {
        move |key| {
            map.get(key)
                .map(|v| (*v).to_string())
                .ok_or(VarError::NotPresent)
        }
    }

    #[test]
    fn build_analysis_config_uses_defaults_when_env_empty() {
        let map: HashMap<&str, &str> = HashMap::new();
        let cfg = build_analysis_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg, AnalysisConfig::default());
        assert!((cfg.positive_threshold - 0.05).abs() < f64::EPSILON);
        assert!((cfg.negative_threshold + 0.05).abs() < f64::EPSILON);
        assert_eq!(cfg.min_engagement_threshold, 100);
        assert_eq!(cfg.trending_top_n, 10);
        assert_eq!(cfg.theme_top_n, 15);
        assert_eq!(cfg.channel_top_n, 10);
        assert_eq!(cfg.channel_grouping, ChannelGrouping::Name);
        assert_eq!(cfg.log_level, "info");
    }

    #[test]
    fn build_analysis_config_applies_overrides() {
        let mut map = HashMap::new();
        map.insert("VIDPULSE_POSITIVE_THRESHOLD", "0.2");
        map.insert("VIDPULSE_NEGATIVE_THRESHOLD", "-0.3");
        map.insert("VIDPULSE_MIN_ENGAGEMENT_THRESHOLD", "5");
        map.insert("VIDPULSE_TRENDING_TOP_N", "3");
        map.insert("VIDPULSE_THEME_TOP_N", "7");
        map.insert("VIDPULSE_CHANNEL_TOP_N", "2");
        map.insert("VIDPULSE_CHANNEL_GROUPING", "ID");
        map.insert("VIDPULSE_LOG_LEVEL", "debug");
        let cfg = build_analysis_config(lookup_from_map(&map)).unwrap();
        assert!((cfg.positive_threshold - 0.2).abs() < f64::EPSILON);
        assert!((cfg.negative_threshold + 0.3).abs() < f64::EPSILON);
        assert_eq!(cfg.min_engagement_threshold, 5);
        assert_eq!(cfg.trending_top_n, 3);
        assert_eq!(cfg.theme_top_n, 7);
        assert_eq!(cfg.channel_top_n, 2);
        assert_eq!(cfg.channel_grouping, ChannelGrouping::Id);
        assert_eq!(cfg.log_level, "debug");
    }

    #[test]
    fn build_analysis_config_rejects_unparseable_threshold() {
        let mut map = HashMap::new();
        map.insert("VIDPULSE_POSITIVE_THRESHOLD", "high");
        let result = build_analysis_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "VIDPULSE_POSITIVE_THRESHOLD"),
            "expected InvalidEnvVar(VIDPULSE_POSITIVE_THRESHOLD), got: {result:?}"
        );
    }

    #[test]
    fn build_analysis_config_rejects_negative_engagement_threshold() {
        let mut map = HashMap::new();
        map.insert("VIDPULSE_MIN_ENGAGEMENT_THRESHOLD", "-1");
        let result = build_analysis_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "VIDPULSE_MIN_ENGAGEMENT_THRESHOLD"),
            "expected InvalidEnvVar(VIDPULSE_MIN_ENGAGEMENT_THRESHOLD), got: {result:?}"
        );
    }

    #[test]
    fn build_analysis_config_rejects_unknown_grouping() {
        let mut map = HashMap::new();
        map.insert("VIDPULSE_CHANNEL_GROUPING", "handle");
        let result = build_analysis_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "VIDPULSE_CHANNEL_GROUPING"),
            "expected InvalidEnvVar(VIDPULSE_CHANNEL_GROUPING), got: {result:?}"
        );
    }

    #[test]
    fn build_analysis_config_rejects_inverted_thresholds() {
        let mut map = HashMap::new();
        map.insert("VIDPULSE_POSITIVE_THRESHOLD", "-0.2");
        map.insert("VIDPULSE_NEGATIVE_THRESHOLD", "0.2");
        let result = build_analysis_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::Validation(_))),
            "expected Validation error, got: {result:?}"
        );
    }

    #[test]
    fn validate_rejects_out_of_range_threshold() {
        let cfg = AnalysisConfig {
            positive_threshold: 1.5,
            ..AnalysisConfig::default()
        };
        assert!(matches!(cfg.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn validate_rejects_zero_top_n() {
        let cfg = AnalysisConfig {
            channel_top_n: 0,
            ..AnalysisConfig::default()
        };
        let err = cfg.validate().unwrap_err();
        assert!(err.to_string().contains("channel_top_n"), "got: {err}");
    }

    #[test]
    fn validate_accepts_equal_thresholds() {
        let cfg = AnalysisConfig {
            positive_threshold: 0.0,
            negative_threshold: 0.0,
            ..AnalysisConfig::default()
        };
        assert!(cfg.validate().is_ok());
    }
}
