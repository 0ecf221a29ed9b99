//! Spatial report encoder
//!
//! Wraps computed indicators with producer and provenance metadata and
//! serializes the result to JSON.

use chrono::Utc;
use uuid::Uuid;

use crate::config::SpatialConfig;
use crate::error::ComputeError;
use crate::types::{ReportProducer, SpatialIndicators, SpatialReportPayload, User};
use crate::{FLUX_VERSION, PRODUCER_NAME};

/// Current report schema version
pub const REPORT_VERSION: &str = "1.0.0";

/// Spatial report encoder
pub struct SpatialReportEncoder {
    instance_id: String,
}

impl Default for SpatialReportEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl SpatialReportEncoder {
    /// Create a new encoder with a unique instance ID
    pub fn new() -> Self {
        Self {
            instance_id: Uuid::new_v4().to_string(),
        }
    }

    /// Create an encoder with a specific instance ID
    pub fn with_instance_id(instance_id: String) -> Self {
        Self { instance_id }
    }

    pub fn instance_id(&self) -> &str {
        &self.instance_id
    }

    /// Build the report payload for a user's indicators
    pub fn encode(
        &self,
        user: &User,
        config: &SpatialConfig,
        window_count: usize,
        indicators: SpatialIndicators,
    ) -> SpatialReportPayload {
        let producer = ReportProducer {
            name: PRODUCER_NAME.to_string(),
            version: FLUX_VERSION.to_string(),
            instance_id: self.instance_id.clone(),
        };

        let observed_from_utc = user.records.iter().map(|r| r.timestamp).min();
        let observed_to_utc = user.records.iter().map(|r| r.timestamp).max();

        SpatialReportPayload {
            report_version: REPORT_VERSION.to_string(),
            producer,
            user: user.name.clone(),
            computed_at_utc: Utc::now().to_rfc3339(),
            observed_from_utc: observed_from_utc.map(|t| t.to_rfc3339()),
            observed_to_utc: observed_to_utc.map(|t| t.to_rfc3339()),
            config: config.clone(),
            window_count,
            indicators,
        }
    }

    /// Encode to JSON string
    pub fn encode_to_json(
        &self,
        user: &User,
        config: &SpatialConfig,
        window_count: usize,
        indicators: SpatialIndicators,
    ) -> Result<String, ComputeError> {
        let payload = self.encode(user, config, window_count, indicators);
        serde_json::to_string_pretty(&payload).map_err(ComputeError::JsonError)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Interaction, Position, Record};
    use chrono::TimeZone;

    fn sample_user() -> User {
        let records = vec![
            Record::new(
                Utc.with_ymd_and_hms(2024, 1, 15, 9, 0, 0).unwrap(),
                Some(Interaction::Call),
                Position::from_antenna("a"),
            ),
            Record::new(
                Utc.with_ymd_and_hms(2024, 1, 16, 18, 30, 0).unwrap(),
                Some(Interaction::Text),
                Position::from_antenna("b"),
            ),
        ];
        User::new("user-1", records)
    }

    #[test]
    fn test_encode_payload_metadata() {
        let encoder = SpatialReportEncoder::with_instance_id("instance-1".to_string());
        let indicators = SpatialIndicators {
            number_of_antennas: Some(2.0),
            ..SpatialIndicators::default()
        };

        let payload = encoder.encode(&sample_user(), &SpatialConfig::default(), 1, indicators);

        assert_eq!(payload.report_version, REPORT_VERSION);
        assert_eq!(payload.producer.name, PRODUCER_NAME);
        assert_eq!(payload.producer.instance_id, "instance-1");
        assert_eq!(payload.user, "user-1");
        assert_eq!(
            payload.observed_from_utc.as_deref(),
            Some("2024-01-15T09:00:00+00:00")
        );
        assert_eq!(
            payload.observed_to_utc.as_deref(),
            Some("2024-01-16T18:30:00+00:00")
        );
        assert_eq!(payload.window_count, 1);
    }

    #[test]
    fn test_encode_to_json_keeps_missing_values_as_null() {
        let encoder = SpatialReportEncoder::new();
        let json = encoder
            .encode_to_json(
                &User::default(),
                &SpatialConfig::default(),
                0,
                SpatialIndicators::default(),
            )
            .unwrap();

        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert!(value["indicators"]["churn_rate"].is_null());
        assert!(value.get("observed_from_utc").is_none());
        assert_eq!(value["config"]["groupby"], "week");
        let instance_id = value["producer"]["instance_id"].as_str().unwrap();
        assert!(Uuid::parse_str(instance_id).is_ok());
    }
}
