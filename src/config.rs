//! Configuration for spatial indicator computation.
//!
//! [`SpatialConfig`] centralizes the tunable parameters of a report: how
//! records are split into windows, how per-window values are summarized, and
//! the parameters of individual indicators.
//!
//! ```
//! use mobility_flux::{GroupBy, SpatialConfig, Summary};
//!
//! let config = SpatialConfig {
//!     groupby: GroupBy::Month,
//!     summary: Summary::Median,
//!     ..SpatialConfig::default()
//! };
//! assert!(config.validate().is_ok());
//! ```

use serde::{Deserialize, Serialize};

use crate::error::ComputeError;
use crate::grouping::GroupBy;
use crate::spatial::DiversityWeight;
use crate::statistics::Summary;

/// Default share of visits covered by `frequent_antennas`
pub const DEFAULT_FREQUENT_PERCENTAGE: f64 = 0.8;

/// Default bin width for churn rate, in minutes
pub const DEFAULT_BIN_MINUTES: u32 = 30;

/// Parameters for a spatial indicator report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpatialConfig {
    /// Time window each indicator is computed over
    pub groupby: GroupBy,
    /// Reduction applied to per-window values
    pub summary: Summary,
    /// Drop records without an interaction from the positions view
    pub filter_empty: bool,
    /// Visit share that `frequent_antennas` must cover (0-1)
    pub frequent_percentage: f64,
    /// Weighting for `spatial_diversity`: none, `call`, `text` or `call_duration`
    pub diversity_interaction: Option<String>,
    /// Bin width used by churn rate, in minutes
    pub bin_minutes: u32,
    /// Run home inference before computing indicators
    pub compute_home: bool,
}

impl Default for SpatialConfig {
    fn default() -> Self {
        Self {
            groupby: GroupBy::Week,
            summary: Summary::Mean,
            filter_empty: true,
            frequent_percentage: DEFAULT_FREQUENT_PERCENTAGE,
            diversity_interaction: None,
            bin_minutes: DEFAULT_BIN_MINUTES,
            compute_home: false,
        }
    }
}

impl SpatialConfig {
    /// Load a configuration from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, ComputeError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ComputeError> {
        if !(0.0..=1.0).contains(&self.frequent_percentage) {
            return Err(ComputeError::InvalidConfig(format!(
                "frequent_percentage must be within [0, 1], got {}",
                self.frequent_percentage
            )));
        }
        if self.bin_minutes == 0 {
            return Err(ComputeError::InvalidConfig(
                "bin_minutes must be positive".to_string(),
            ));
        }
        self.diversity_weight()?;
        Ok(())
    }

    /// Parsed `diversity_interaction`
    pub fn diversity_weight(&self) -> Result<DiversityWeight, ComputeError> {
        DiversityWeight::parse(self.diversity_interaction.as_deref())
    }
}
