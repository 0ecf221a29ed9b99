//! Normalized spatial diversity
//!
//! Shannon entropy of visited positions divided by its maximum for the number
//! of positions, optionally weighted by interaction type or call duration.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::str::FromStr;

use crate::error::ComputeError;
use crate::tools::entropy;
use crate::types::{Interaction, Position, Record};

/// What each record contributes to the diversity distribution
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiversityWeight {
    /// One per record, any interaction
    #[default]
    All,
    /// One per call
    Call,
    /// One per text
    Text,
    /// Call duration in seconds
    CallDuration,
}

impl DiversityWeight {
    /// Parse an optional interaction selector; `None` selects every record
    pub fn parse(interaction: Option<&str>) -> Result<Self, ComputeError> {
        interaction.map_or(Ok(DiversityWeight::All), str::parse::<DiversityWeight>)
    }

    /// Contribution of a record, `None` when the record is not counted
    fn mass(&self, record: &Record) -> Option<f64> {
        let is = |interaction| record.interaction == Some(interaction);
        match self {
            DiversityWeight::All => Some(1.0),
            DiversityWeight::Call => is(Interaction::Call).then_some(1.0),
            DiversityWeight::Text => is(Interaction::Text).then_some(1.0),
            DiversityWeight::CallDuration => {
                is(Interaction::Call).then(|| record.call_duration.unwrap_or(0.0))
            }
        }
    }
}

impl FromStr for DiversityWeight {
    type Err = ComputeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "call" => Ok(DiversityWeight::Call),
            "text" => Ok(DiversityWeight::Text),
            "call_duration" => Ok(DiversityWeight::CallDuration),
            other => Err(ComputeError::InvalidInteraction(other.to_string())),
        }
    }
}

/// Spatial diversity in `(0, 1]`.
///
/// `None` with fewer than two records, or when fewer than two positions carry
/// a positive weight.
pub fn spatial_diversity(records: &[Record], weight: DiversityWeight) -> Option<f64> {
    if records.len() < 2 {
        return None;
    }

    let mut masses: HashMap<&Position, f64> = HashMap::new();
    for record in records {
        if let Some(mass) = weight.mass(record) {
            *masses.entry(&record.position).or_insert(0.0) += mass;
        }
    }

    let masses: Vec<f64> = masses.into_values().filter(|&m| m > 0.0).collect();
    if masses.len() < 2 {
        log::debug!(
            "spatial_diversity: {} weighted categories, need at least 2",
            masses.len()
        );
        return None;
    }

    entropy(&masses).map(|h| h / (masses.len() as f64).ln())
}
