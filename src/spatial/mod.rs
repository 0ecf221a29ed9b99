//! Spatial indicators
//!
//! Each indicator is a pure function over one window of positions or records
//! (churn rate takes the whole user and windows internally). Missing or
//! degenerate data yields `None`, never an error.
//!
//! Indicators: presence at home, radius of gyration, antenna entropy, number of
//! antennas, frequent antennas, spatial diversity and churn rate.

pub mod churn;
pub mod concentration;
pub mod dispersion;
pub mod diversity;
pub mod presence;

pub use churn::churn_rate;
pub use concentration::{entropy_of_antennas, frequent_antennas, number_of_antennas};
pub use dispersion::{radius_of_gyration, radius_of_movement};
pub use diversity::{spatial_diversity, DiversityWeight};
pub use presence::percent_at_home;
