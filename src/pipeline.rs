//! Spatial pipeline orchestration
//!
//! This module provides the public API for spatial indicator processing: it
//! runs every indicator over the configured windows, summarizes them and
//! encodes the report.

use crate::config::SpatialConfig;
use crate::encoder::SpatialReportEncoder;
use crate::error::ComputeError;
use crate::grouping::{group_records, summarize, SpatialGrouping};
use crate::spatial::{
    churn_rate, entropy_of_antennas, frequent_antennas, number_of_antennas, percent_at_home,
    radius_of_gyration, spatial_diversity,
};
use crate::types::{SpatialIndicators, User};

/// Compute every spatial indicator for a user (stateless)
pub fn compute_indicators(
    user: &User,
    config: &SpatialConfig,
) -> Result<SpatialIndicators, ComputeError> {
    config.validate()?;
    let weight = config.diversity_weight()?;
    let grouping = SpatialGrouping::from_config(config);
    let summary = config.summary;

    let percent_at_home = summarize(
        &grouping.apply_positions(user, |p| percent_at_home(p, user)),
        summary,
    );
    let radius_of_gyration = summarize(
        &grouping.apply_positions(user, |p| radius_of_gyration(p, user)),
        summary,
    );
    let entropy_of_antennas = summarize(
        &grouping.apply_positions(user, entropy_of_antennas),
        summary,
    );
    let number_of_antennas = summarize(
        &grouping.apply_records(user, |r| Some(number_of_antennas(r) as f64)),
        summary,
    );
    let frequent_antennas = summarize(
        &grouping.apply_positions(user, |p| {
            Some(frequent_antennas(p, config.frequent_percentage) as f64)
        }),
        summary,
    );
    let spatial_diversity = summarize(
        &grouping.apply_records(user, |r| spatial_diversity(r, weight)),
        summary,
    );

    Ok(SpatialIndicators {
        percent_at_home,
        radius_of_gyration,
        entropy_of_antennas,
        number_of_antennas,
        frequent_antennas,
        spatial_diversity,
        churn_rate: churn_rate(user, config),
    })
}

/// Compute a user's spatial report as JSON (stateless, one-shot).
///
/// # Example
/// ```ignore
/// let json = spatial_to_json(&user, &SpatialConfig::default())?;
/// ```
pub fn spatial_to_json(user: &User, config: &SpatialConfig) -> Result<String, ComputeError> {
    let indicators = compute_indicators(user, config)?;
    let window_count = group_records(&user.records, config.groupby).len();

    let encoder = SpatialReportEncoder::new();
    encoder.encode_to_json(user, config, window_count, indicators)
}

/// Processor reusing one configuration and encoder across users
pub struct SpatialProcessor {
    config: SpatialConfig,
    encoder: SpatialReportEncoder,
}

impl Default for SpatialProcessor {
    fn default() -> Self {
        Self::new()
    }
}

impl SpatialProcessor {
    /// Create a processor with the default configuration
    pub fn new() -> Self {
        Self {
            config: SpatialConfig::default(),
            encoder: SpatialReportEncoder::new(),
        }
    }

    /// Create a processor with a validated configuration
    pub fn with_config(config: SpatialConfig) -> Result<Self, ComputeError> {
        config.validate()?;
        Ok(Self {
            config,
            encoder: SpatialReportEncoder::new(),
        })
    }

    pub fn config(&self) -> &SpatialConfig {
        &self.config
    }

    /// Compute indicators for a user, inferring the home first when configured.
    ///
    /// The caller's user is never modified.
    pub fn indicators(&self, user: &User) -> Result<SpatialIndicators, ComputeError> {
        if self.config.compute_home {
            let mut user = user.clone();
            user.compute_home();
            compute_indicators(&user, &self.config)
        } else {
            compute_indicators(user, &self.config)
        }
    }

    /// Process a user and return the report JSON
    pub fn process(&self, user: &User) -> Result<String, ComputeError> {
        let indicators = self.indicators(user)?;
        let window_count = group_records(&user.records, self.config.groupby).len();
        self.encoder
            .encode_to_json(user, &self.config, window_count, indicators)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grouping::GroupBy;
    use crate::statistics::Summary;
    use crate::types::{Interaction, Location, Position, Record};
    use chrono::{Duration, TimeZone, Utc};
    use pretty_assertions::assert_eq;

    /// One week of records: A x5, B x3, C x2, two hours apart from Monday 08:00
    fn sample_user() -> User {
        let start = Utc.with_ymd_and_hms(2024, 1, 15, 8, 0, 0).unwrap();
        let records = ["A", "A", "B", "A", "C", "B", "A", "C", "B", "A"]
            .iter()
            .enumerate()
            .map(|(i, id)| {
                Record::new(
                    start + Duration::hours(2 * i as i64),
                    Some(Interaction::Call),
                    Position::from_antenna(*id),
                )
            })
            .collect();

        let mut user = User::new("sample", records);
        user.antennas
            .insert("A".to_string(), Location::new(46.52, 6.63));
        user.antennas
            .insert("B".to_string(), Location::new(46.20, 6.14));
        user.antennas
            .insert("C".to_string(), Location::new(46.95, 7.45));
        user.home = Some(Position::from_antenna("A"));
        user
    }

    #[test]
    fn test_single_week_indicators() {
        let user = sample_user();
        let indicators = compute_indicators(&user, &SpatialConfig::default()).unwrap();

        assert_eq!(indicators.number_of_antennas, Some(3.0));
        assert_eq!(indicators.frequent_antennas, Some(2.0));
        assert_eq!(indicators.percent_at_home, Some(0.5));
        assert!(indicators.radius_of_gyration.unwrap() > 0.0);

        let entropy = indicators.entropy_of_antennas.unwrap();
        let expected = -[0.5f64, 0.3, 0.2].iter().map(|p| p * p.ln()).sum::<f64>();
        assert!((entropy - expected).abs() < 1e-12);

        let diversity = indicators.spatial_diversity.unwrap();
        assert!((diversity - expected / 3f64.ln()).abs() < 1e-12);

        // A single week has no week pair to compare
        assert_eq!(indicators.churn_rate, None);
    }

    #[test]
    fn test_repeated_weeks_summarize_to_same_values() {
        let user = sample_user();
        let mut repeated = user.clone();
        for week in 1..3 {
            repeated.records.extend(user.records.iter().map(|r| Record {
                timestamp: r.timestamp + Duration::weeks(week),
                ..r.clone()
            }));
        }

        let single = compute_indicators(&user, &SpatialConfig::default()).unwrap();
        let multi = compute_indicators(&repeated, &SpatialConfig::default()).unwrap();

        assert_eq!(multi.number_of_antennas, single.number_of_antennas);
        assert_eq!(multi.frequent_antennas, single.frequent_antennas);
        assert_eq!(multi.percent_at_home, single.percent_at_home);
        assert!(multi.churn_rate.unwrap().abs() < 1e-12);
    }

    #[test]
    fn test_empty_user() {
        let indicators = compute_indicators(&User::default(), &SpatialConfig::default()).unwrap();
        assert_eq!(indicators, SpatialIndicators::default());
    }

    #[test]
    fn test_invalid_interaction_is_rejected() {
        let config = SpatialConfig {
            diversity_interaction: Some("voicemail".to_string()),
            ..SpatialConfig::default()
        };
        assert!(matches!(
            compute_indicators(&sample_user(), &config),
            Err(ComputeError::InvalidInteraction(_))
        ));
        assert!(SpatialProcessor::with_config(config).is_err());
    }

    #[test]
    fn test_spatial_to_json() {
        let config = SpatialConfig {
            groupby: GroupBy::None,
            summary: Summary::Median,
            ..SpatialConfig::default()
        };
        let json = spatial_to_json(&sample_user(), &config).unwrap();
        let payload: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(payload["report_version"], "1.0.0");
        assert_eq!(payload["producer"]["name"], "mobility-flux");
        assert_eq!(payload["user"], "sample");
        assert_eq!(payload["window_count"], 1);
        assert_eq!(payload["config"]["summary"], "median");
        assert_eq!(payload["indicators"]["number_of_antennas"], 3.0);
    }

    #[test]
    fn test_processor_infers_home_without_mutating_user() {
        let mut user = sample_user();
        user.home = None;
        // A night record at C
        user.records.push(Record::new(
            Utc.with_ymd_and_hms(2024, 1, 17, 23, 30, 0).unwrap(),
            Some(Interaction::Text),
            Position::from_antenna("C"),
        ));

        let config = SpatialConfig {
            compute_home: true,
            ..SpatialConfig::default()
        };
        let processor = SpatialProcessor::with_config(config).unwrap();

        let indicators = processor.indicators(&user).unwrap();
        assert!(!user.has_home());
        let at_home = indicators.percent_at_home.unwrap();
        assert!(at_home > 0.0 && at_home < 1.0);

        let without_home = SpatialProcessor::new().indicators(&user).unwrap();
        assert_eq!(without_home.percent_at_home, None);

        assert!(processor.process(&user).is_ok());
    }
}
