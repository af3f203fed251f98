//! Proximity classification against fixed population centres.
//!
//! A sighting is labelled dangerous when it lies within half a degree of
//! Delhi, Mumbai or Chennai.
//!
//! # Distance model
//!
//! Distances are plain Euclidean in degree space, not geodesic. One degree of
//! longitude shrinks with latitude, so the effective radius is an ellipse that
//! narrows east-west the further a zone is from the equator. The 0.5° threshold
//! is fixed and not configurable.

/// A known human-populated centre.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReferenceZone {
    pub name: &'static str,
    pub lat: f64,
    pub lng: f64,
}

impl ReferenceZone {
    /// Planar distance in degrees from this zone to `(lat, lng)`.
    pub fn distance(&self, lat: f64, lng: f64) -> f64 {
        ((lat - self.lat).powi(2) + (lng - self.lng).powi(2)).sqrt()
    }
}

pub static REFERENCE_ZONES: [ReferenceZone; 3] = [
    ReferenceZone {
        name: "Delhi",
        lat: 28.6139,
        lng: 77.2090,
    },
    ReferenceZone {
        name: "Mumbai",
        lat: 19.0760,
        lng: 72.8777,
    },
    ReferenceZone {
        name: "Chennai",
        lat: 13.0827,
        lng: 80.2707,
    },
];

/// Strict upper bound, in degrees, for a point to count as near a zone.
pub const DANGER_RADIUS_DEG: f64 = 0.5;

/// True if `(lat, lng)` is strictly closer than [`DANGER_RADIUS_DEG`] to any
/// reference zone.
///
/// Total on all inputs: NaN coordinates never compare less than the radius,
/// so they classify as safe.
pub fn classify(lat: f64, lng: f64) -> bool {
    near_any(&REFERENCE_ZONES, lat, lng)
}

fn near_any(zones: &[ReferenceZone], lat: f64, lng: f64) -> bool {
    zones
        .iter()
        .any(|zone| zone.distance(lat, lng) < DANGER_RADIUS_DEG)
}

/// The closest reference zone within the danger radius, with its distance.
pub fn nearest_zone(lat: f64, lng: f64) -> Option<(&'static ReferenceZone, f64)> {
    REFERENCE_ZONES
        .iter()
        .map(|zone| (zone, zone.distance(lat, lng)))
        .filter(|(_, d)| *d < DANGER_RADIUS_DEG)
        .min_by(|a, b| a.1.total_cmp(&b.1))
}
