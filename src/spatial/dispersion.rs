//! Dispersion indicators
//!
//! The radius of gyration is the equivalent distance of the visited mass from
//! its center of gravity (Gonzalez, Hidalgo & Barabási, 2008).

use std::collections::HashMap;

use crate::error::ComputeError;
use crate::tools::great_circle_distance;
use crate::types::{Location, Position, Record, User};

/// Radius of gyration in kilometers.
///
/// Positions are resolved to coordinates through the user (explicit location,
/// else antenna table); unresolvable positions are ignored. `None` when no
/// position resolves.
pub fn radius_of_gyration(positions: &[Position], user: &User) -> Option<f64> {
    let mut visits: HashMap<Location, usize> = HashMap::new();
    for location in positions.iter().filter_map(|p| p.get_location(user)) {
        *visits.entry(location).or_insert(0) += 1;
    }

    if visits.is_empty() {
        log::debug!("radius_of_gyration: no geolocated position");
        return None;
    }

    let total = visits.values().sum::<usize>() as f64;

    let (lat_sum, lon_sum) = visits
        .iter()
        .fold((0.0, 0.0), |(lat, lon), (location, &count)| {
            (lat + location.lat * count as f64, lon + location.lon * count as f64)
        });
    let barycenter = Location::new(lat_sum / total, lon_sum / total);

    let variance: f64 = visits
        .iter()
        .map(|(location, &count)| {
            count as f64 / total * great_circle_distance(&barycenter, location).powi(2)
        })
        .sum();

    Some(variance.sqrt())
}

/// Radius of movement. Declared without a settled definition; always errors.
pub fn radius_of_movement(_records: &[Record]) -> Result<Option<f64>, ComputeError> {
    Err(ComputeError::NotImplemented("radius_of_movement"))
}
