//! Mobility data types
//!
//! This module defines the user, record and position types consumed by the
//! spatial indicators. Indicators only read these values; the only mutation
//! offered here is home inference, which hosts run before computing indicators.

use chrono::{DateTime, Timelike, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::config::DEFAULT_BIN_MINUTES;
use crate::grouping::binning;
use crate::tools::most_common;

/// First hour (inclusive, UTC) of the night window used for home inference
pub const NIGHT_START_HOUR: u32 = 19;

/// Last hour (exclusive, UTC) of the night window used for home inference
pub const NIGHT_END_HOUR: u32 = 7;

/// Geographic coordinates in degrees
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Location {
    pub lat: f64,
    pub lon: f64,
}

impl Location {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

// Compared on bit patterns so that locations can key frequency maps.
impl PartialEq for Location {
    fn eq(&self, other: &Self) -> bool {
        self.lat.to_bits() == other.lat.to_bits() && self.lon.to_bits() == other.lon.to_bits()
    }
}

impl Eq for Location {}

impl Hash for Location {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.lat.to_bits().hash(state);
        self.lon.to_bits().hash(state);
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.lat, self.lon)
    }
}

/// Place a record occurred at: an antenna id, explicit coordinates, or both
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    /// Antenna (cell tower) identifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub antenna: Option<String>,
    /// Explicit coordinates
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
}

impl Position {
    /// Position identified by an antenna id
    pub fn from_antenna(antenna: impl Into<String>) -> Self {
        Self {
            antenna: Some(antenna.into()),
            location: None,
        }
    }

    /// Position identified by coordinates
    pub fn from_location(lat: f64, lon: f64) -> Self {
        Self {
            antenna: None,
            location: Some(Location::new(lat, lon)),
        }
    }

    /// Whether the position carries an antenna id or coordinates
    pub fn is_known(&self) -> bool {
        self.antenna.is_some() || self.location.is_some()
    }

    /// Resolve the coordinates of this position for a user.
    ///
    /// Explicit coordinates take precedence; otherwise the antenna is looked up
    /// in the user's antenna table.
    pub fn get_location(&self, user: &User) -> Option<Location> {
        if let Some(location) = self.location {
            return Some(location);
        }
        self.antenna
            .as_ref()
            .and_then(|antenna| user.antennas.get(antenna))
            .copied()
    }
}

/// Canonical string form: the antenna id, else `lat,lon`, else `unknown`.
impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.antenna, &self.location) {
            (Some(antenna), _) => write!(f, "{antenna}"),
            (None, Some(location)) => write!(f, "{location}"),
            (None, None) => write!(f, "unknown"),
        }
    }
}

/// Interaction type of a record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Interaction {
    Call,
    Text,
}

/// A single interaction event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Record {
    /// Event timestamp
    pub timestamp: DateTime<Utc>,
    /// Interaction type (`None` for no-answer or location-only records)
    #[serde(default)]
    pub interaction: Option<Interaction>,
    /// Call duration in seconds (calls only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub call_duration: Option<f64>,
    /// Where the interaction happened
    pub position: Position,
}

impl Record {
    pub fn new(
        timestamp: DateTime<Utc>,
        interaction: Option<Interaction>,
        position: Position,
    ) -> Self {
        Self {
            timestamp,
            interaction,
            call_duration: None,
            position,
        }
    }

    /// A call record with its duration in seconds
    pub fn call(timestamp: DateTime<Utc>, duration_sec: f64, position: Position) -> Self {
        Self {
            timestamp,
            interaction: Some(Interaction::Call),
            call_duration: Some(duration_sec),
            position,
        }
    }
}

/// A user and their interaction history
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct User {
    /// User identifier
    #[serde(default)]
    pub name: String,
    /// Records ordered by timestamp
    #[serde(default)]
    pub records: Vec<Record>,
    /// Antenna coordinates keyed by antenna id
    #[serde(default)]
    pub antennas: HashMap<String, Location>,
    /// Inferred home position
    #[serde(default)]
    pub home: Option<Position>,
}

impl User {
    pub fn new(name: impl Into<String>, records: Vec<Record>) -> Self {
        Self {
            name: name.into(),
            records,
            ..Self::default()
        }
    }

    pub fn has_home(&self) -> bool {
        self.home.is_some()
    }

    /// Infer the home as the most frequent position during night hours.
    ///
    /// Night records are first collapsed into time bins, so a burst of events
    /// counts once. Returns the inferred home. Ties go to the position seen
    /// first; without any night record the home is cleared.
    pub fn compute_home(&mut self) -> Option<&Position> {
        let night = self.records.iter().filter(|r| is_night(&r.timestamp));
        let binned = binning(night, DEFAULT_BIN_MINUTES);

        self.home = most_common(binned.iter());
        if self.home.is_none() {
            log::warn!("no night records for user {:?}, home left unset", self.name);
        }
        self.home.as_ref()
    }
}

fn is_night(timestamp: &DateTime<Utc>) -> bool {
    let hour = timestamp.hour();
    hour >= NIGHT_START_HOUR || hour < NIGHT_END_HOUR
}

// ============================================================================
// Report Types
// ============================================================================

/// Summarized spatial indicators for one user
///
/// Each value is the per-window result reduced with the configured summary;
/// `None` when no window produced a result.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SpatialIndicators {
    pub percent_at_home: Option<f64>,
    /// Kilometers
    pub radius_of_gyration: Option<f64>,
    pub entropy_of_antennas: Option<f64>,
    pub number_of_antennas: Option<f64>,
    pub frequent_antennas: Option<f64>,
    pub spatial_diversity: Option<f64>,
    pub churn_rate: Option<f64>,
}

/// Report producer metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportProducer {
    /// Name of the producing software
    pub name: String,
    /// Version of the producing software
    pub version: String,
    /// Unique instance identifier (UUID)
    pub instance_id: String,
}

/// Spatial report payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpatialReportPayload {
    /// Report schema version
    pub report_version: String,
    pub producer: ReportProducer,
    /// User identifier
    pub user: String,
    /// When this payload was computed (RFC3339)
    pub computed_at_utc: String,
    /// First and last record timestamps (RFC3339)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub observed_from_utc: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub observed_to_utc: Option<String>,
    /// Configuration the indicators were computed with
    pub config: crate::config::SpatialConfig,
    /// Number of windows the records were split into
    pub window_count: usize,
    pub indicators: SpatialIndicators,
}
