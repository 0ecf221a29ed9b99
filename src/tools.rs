//! Numeric helpers shared by the spatial indicators
//!
//! Great-circle distance, Shannon entropy and cosine distance. Every helper
//! returns `None` (or a neutral value) instead of dividing by zero.

use geo::{Distance, Haversine, Point};
use std::collections::HashMap;
use std::hash::Hash;

use crate::types::Location;

/// Mean Earth radius in kilometers, as used by `geo::Haversine`
pub const EARTH_RADIUS_KM: f64 = 6371.0088;

/// Great-circle distance between two locations in kilometers (haversine)
pub fn great_circle_distance(a: &Location, b: &Location) -> f64 {
    let origin = Point::new(a.lon, a.lat);
    let destination = Point::new(b.lon, b.lat);
    Haversine::distance(origin, destination) / 1000.0
}

/// Shannon entropy (natural log) of a distribution of non-negative masses
///
/// Returns `None` when the distribution is empty or carries no mass. Zero
/// entries contribute nothing.
pub fn entropy(masses: &[f64]) -> Option<f64> {
    let total: f64 = masses.iter().sum();
    if masses.is_empty() || total <= 0.0 {
        return None;
    }

    let h = masses
        .iter()
        .filter(|&&m| m > 0.0)
        .map(|&m| {
            let p = m / total;
            p * p.ln()
        })
        .sum::<f64>();
    // Avoid reporting -0.0 for a single category
    Some(if h == 0.0 { 0.0 } else { -h })
}

/// Cosine distance `1 - (a.b) / (|a| |b|)` between two dense vectors
///
/// Returns `None` if the lengths differ or either vector has zero norm.
pub fn cosine_distance(a: &[f64], b: &[f64]) -> Option<f64> {
    if a.len() != b.len() {
        return None;
    }

    let dot: f64 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a = a.iter().map(|x| x * x).sum::<f64>().sqrt();
    let norm_b = b.iter().map(|x| x * x).sum::<f64>().sqrt();

    if norm_a <= 0.0 || norm_b <= 0.0 {
        return None;
    }
    Some(1.0 - dot / (norm_a * norm_b))
}

/// Most frequent item; ties go to the item seen first
pub(crate) fn most_common<'a, T, I>(items: I) -> Option<T>
where
    T: Eq + Hash + Clone + 'a,
    I: IntoIterator<Item = &'a T>,
{
    // item -> (count, first index)
    let mut counts: HashMap<&T, (usize, usize)> = HashMap::new();
    for (index, item) in items.into_iter().enumerate() {
        counts.entry(item).or_insert((0, index)).0 += 1;
    }

    counts
        .into_iter()
        .max_by(|(_, (count_a, first_a)), (_, (count_b, first_b))| {
            count_a.cmp(count_b).then(first_b.cmp(first_a))
        })
        .map(|(item, _)| item.clone())
}
