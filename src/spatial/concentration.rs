//! Location concentration indicators
//!
//! How many places a user visits and how evenly visits spread across them.

use std::collections::{HashMap, HashSet};

use crate::tools::entropy;
use crate::types::{Position, Record};

/// Shannon entropy (natural log) of the visited positions; `None` when empty
pub fn entropy_of_antennas(positions: &[Position]) -> Option<f64> {
    let mut counts: HashMap<&Position, f64> = HashMap::new();
    for position in positions {
        *counts.entry(position).or_insert(0.0) += 1.0;
    }
    let masses: Vec<f64> = counts.into_values().collect();
    entropy(&masses)
}

/// Number of distinct positions in the records
pub fn number_of_antennas(records: &[Record]) -> usize {
    records
        .iter()
        .map(|r| &r.position)
        .collect::<HashSet<_>>()
        .len()
}

/// Number of most-visited locations that together account for `percentage`
/// (0-1) of all visits.
///
/// Locations are keyed by their canonical string form, so two positions that
/// print the same are counted as one location.
pub fn frequent_antennas(positions: &[Position], percentage: f64) -> usize {
    let mut visits: HashMap<String, usize> = HashMap::new();
    for position in positions {
        *visits.entry(position.to_string()).or_insert(0) += 1;
    }

    let total: usize = visits.values().sum();
    let mut target = (total as f64 * percentage).ceil();
    let mut counts: Vec<usize> = visits.into_values().collect();
    counts.sort_unstable();

    let distinct = counts.len();
    while target > 0.0 {
        match counts.pop() {
            Some(count) => target -= count as f64,
            None => break,
        }
    }
    distinct - counts.len()
}
