//! Mobility Flux - On-device compute engine for spatial mobility indicators
//!
//! Flux derives spatial indicators from a user's geolocated interaction records
//! (calls and texts tied to antennas or coordinates) through a deterministic
//! pipeline: time windowing → per-window indicators → summary → report encoding.
//!
//! ## Indicators
//!
//! - **Presence**: share of interactions at home
//! - **Dispersion**: radius of gyration around the visit barycenter
//! - **Concentration**: antenna entropy, number of antennas, frequent antennas
//! - **Diversity**: entropy normalized by its maximum
//! - **Churn**: week-over-week cosine distance of visit distributions

pub mod config;
pub mod encoder;
pub mod error;
pub mod grouping;
pub mod pipeline;
pub mod spatial;
pub mod statistics;
pub mod tools;
pub mod types;

pub use config::SpatialConfig;
pub use error::ComputeError;
pub use grouping::{GroupBy, SpatialGrouping};
pub use pipeline::{compute_indicators, spatial_to_json, SpatialProcessor};
pub use spatial::DiversityWeight;
pub use statistics::{statistics, Summary};
pub use types::{Interaction, Location, Position, Record, SpatialIndicators, User};

/// Flux version embedded in all reports
pub const FLUX_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Producer name for reports
pub const PRODUCER_NAME: &str = "mobility-flux";
