//! Record grouping
//!
//! Splits a user's records into time windows and dispatches an indicator once
//! per window. An indicator declares what it consumes by the method it is run
//! through: [`SpatialGrouping::apply_positions`] for the positions view or
//! [`SpatialGrouping::apply_records`] for raw records. Indicators that need the
//! user (home lookup, antenna coordinates) capture it in their closure.

use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::config::SpatialConfig;
use crate::statistics::{statistics, Summary};
use crate::tools::most_common;
use crate::types::{Position, Record, User};

/// Time window granularity
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupBy {
    /// ISO weeks, Monday 00:00 UTC to the next Monday
    #[default]
    Week,
    /// Calendar months (UTC)
    Month,
    /// A single window holding every record
    None,
}

impl GroupBy {
    fn window_key(&self, timestamp: &DateTime<Utc>) -> (i32, u32) {
        match self {
            GroupBy::Week => {
                let week = timestamp.iso_week();
                (week.year(), week.week())
            }
            GroupBy::Month => (timestamp.year(), timestamp.month()),
            GroupBy::None => (0, 0),
        }
    }
}

/// Split records into chronological windows.
///
/// Records with the same window key land in one window even when the input is
/// not sorted. Record order is preserved inside a window and empty windows are
/// never produced.
pub fn group_records(records: &[Record], groupby: GroupBy) -> Vec<Vec<&Record>> {
    let mut windows: BTreeMap<(i32, u32), Vec<&Record>> = BTreeMap::new();
    for record in records {
        windows
            .entry(groupby.window_key(&record.timestamp))
            .or_default()
            .push(record);
    }
    log::debug!(
        "grouped {} records into {} {:?} windows",
        records.len(),
        windows.len(),
        groupby
    );
    windows.into_values().collect()
}

/// Collapse consecutive records sharing a `bin_minutes` time bin into the
/// most common position of that bin (ties go to the first seen).
pub fn binning<'a, I>(records: I, bin_minutes: u32) -> Vec<Position>
where
    I: IntoIterator<Item = &'a Record>,
{
    let bin_seconds = i64::from(bin_minutes.max(1)) * 60;
    let mut binned = Vec::new();
    let mut current_bin: Option<i64> = None;
    let mut bin_positions: Vec<&Position> = Vec::new();

    for record in records {
        let bin = record.timestamp.timestamp().div_euclid(bin_seconds);
        if current_bin != Some(bin) {
            binned.extend(most_common(bin_positions.drain(..)));
            current_bin = Some(bin);
        }
        bin_positions.push(&record.position);
    }
    binned.extend(most_common(bin_positions.drain(..)));
    binned
}

/// Windowing strategy used to run an indicator over a user's records
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpatialGrouping {
    pub groupby: GroupBy,
    /// Drop records without an interaction from the positions view
    pub filter_empty: bool,
}

impl Default for SpatialGrouping {
    fn default() -> Self {
        Self {
            groupby: GroupBy::Week,
            filter_empty: true,
        }
    }
}

impl SpatialGrouping {
    pub fn new(groupby: GroupBy, filter_empty: bool) -> Self {
        Self {
            groupby,
            filter_empty,
        }
    }

    pub fn from_config(config: &SpatialConfig) -> Self {
        Self::new(config.groupby, config.filter_empty)
    }

    /// Run `f` on the positions of each window
    pub fn apply_positions<T, F>(&self, user: &User, mut f: F) -> Vec<T>
    where
        F: FnMut(&[Position]) -> T,
    {
        group_records(&user.records, self.groupby)
            .into_iter()
            .map(|window| {
                let positions: Vec<Position> = window
                    .into_iter()
                    .filter(|r| !self.filter_empty || r.interaction.is_some())
                    .map(|r| r.position.clone())
                    .collect();
                f(&positions)
            })
            .collect()
    }

    /// Run `f` on the full records of each window
    pub fn apply_records<T, F>(&self, user: &User, mut f: F) -> Vec<T>
    where
        F: FnMut(&[Record]) -> T,
    {
        group_records(&user.records, self.groupby)
            .into_iter()
            .map(|window| {
                let records: Vec<Record> = window.into_iter().cloned().collect();
                f(&records)
            })
            .collect()
    }
}

/// Summarize per-window results, ignoring windows without a result
pub fn summarize(per_window: &[Option<f64>], summary: Summary) -> Option<f64> {
    let values: Vec<f64> = per_window.iter().flatten().copied().collect();
    statistics(&values, summary)
}
