//! Churn rate
//!
//! Week-over-week change of where a user spends time, measured as the cosine
//! distance between consecutive weekly visit distributions.

use std::collections::HashMap;

use crate::config::SpatialConfig;
use crate::grouping::{binning, group_records, GroupBy};
use crate::statistics::statistics;
use crate::tools::cosine_distance;
use crate::types::{Position, User};

/// Summarized cosine distance between consecutive weeks.
///
/// Records are split into weeks and binned every `config.bin_minutes` so that
/// bursts of records do not dominate a week. `None` for a user without
/// records; with a single week the (empty) distance list is handed to
/// `statistics` as is.
pub fn churn_rate(user: &User, config: &SpatialConfig) -> Option<f64> {
    if user.records.is_empty() {
        return None;
    }

    let weekly_positions: Vec<Vec<Position>> = group_records(&user.records, GroupBy::Week)
        .into_iter()
        .map(|week| binning(week, config.bin_minutes))
        .collect();

    // Universe of binned positions in first-seen order
    let mut universe: HashMap<&Position, usize> = HashMap::new();
    for position in weekly_positions.iter().flatten() {
        let next = universe.len();
        universe.entry(position).or_insert(next);
    }

    let frequencies: Vec<Vec<f64>> = weekly_positions
        .iter()
        .map(|week| {
            let mut counts = vec![0.0; universe.len()];
            for position in week {
                counts[universe[position]] += 1.0;
            }
            let total = week.len() as f64;
            counts.iter().map(|c| c / total).collect()
        })
        .collect();

    let distances: Vec<f64> = frequencies
        .windows(2)
        .filter_map(|pair| cosine_distance(&pair[0], &pair[1]))
        .collect();
    log::debug!(
        "churn_rate: {} weeks, {} week pairs",
        frequencies.len(),
        distances.len()
    );

    statistics(&distances, config.summary)
}
