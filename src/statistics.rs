//! Summary statistics over per-window indicator values

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::ComputeError;

/// How a sequence of values is reduced to a single scalar
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Summary {
    /// Arithmetic mean (the `"default"` mode)
    #[default]
    Mean,
    /// Middle value; mean of the two middle values for even lengths
    Median,
    /// Population standard deviation
    Std,
    Min,
    Max,
}

impl FromStr for Summary {
    type Err = ComputeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "default" | "mean" => Ok(Summary::Mean),
            "median" => Ok(Summary::Median),
            "std" => Ok(Summary::Std),
            "min" => Ok(Summary::Min),
            "max" => Ok(Summary::Max),
            other => Err(ComputeError::InvalidSummary(other.to_string())),
        }
    }
}

/// Summarize `values`; `None` for an empty sequence
pub fn statistics(values: &[f64], summary: Summary) -> Option<f64> {
    if values.is_empty() {
        return None;
    }

    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;

    let value = match summary {
        Summary::Mean => mean,
        Summary::Median => {
            let mut sorted = values.to_vec();
            sorted.sort_by(f64::total_cmp);
            let mid = sorted.len() / 2;
            if sorted.len() % 2 == 0 {
                (sorted[mid - 1] + sorted[mid]) / 2.0
            } else {
                sorted[mid]
            }
        }
        Summary::Std => {
            let variance = values.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / n;
            variance.sqrt()
        }
        Summary::Min => values.iter().copied().fold(f64::INFINITY, f64::min),
        Summary::Max => values.iter().copied().fold(f64::NEG_INFINITY, f64::max),
    };
    Some(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_sequence_has_no_summary() {
        assert_eq!(statistics(&[], Summary::Mean), None);
        assert_eq!(statistics(&[], Summary::Max), None);
    }

    #[test]
    fn test_summary_modes() {
        let values = [4.0, 1.0, 3.0, 2.0];
        assert_eq!(statistics(&values, Summary::Mean), Some(2.5));
        assert_eq!(statistics(&values, Summary::Median), Some(2.5));
        assert_eq!(statistics(&values, Summary::Min), Some(1.0));
        assert_eq!(statistics(&values, Summary::Max), Some(4.0));

        let std = statistics(&values, Summary::Std).unwrap();
        assert!((std - 1.25f64.sqrt()).abs() < 1e-12);

        assert_eq!(statistics(&[5.0, 1.0, 3.0], Summary::Median), Some(3.0));
    }

    #[test]
    fn test_summary_from_str() {
        assert_eq!("default".parse::<Summary>().unwrap(), Summary::Mean);
        assert_eq!("std".parse::<Summary>().unwrap(), Summary::Std);
        assert!(matches!(
            "extended".parse::<Summary>(),
            Err(ComputeError::InvalidSummary(_))
        ));
    }

    #[test]
    fn test_summary_serialization() {
        let json = serde_json::to_string(&Summary::Median).unwrap();
        assert_eq!(json, "\"median\"");
    }
}
