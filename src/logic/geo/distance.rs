//! Distance Helpers - Haversine & Proximity Lookups

use super::reference::{Region, FAULT_LINES, REGIONS};

const EARTH_RADIUS_KM: f64 = 6371.0;

/// Great-circle distance between two coordinates in kilometers.
pub fn haversine_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let dlat = (lat2 - lat1).to_radians();
    let dlon = (lon2 - lon1).to_radians();

    let a = (dlat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (dlon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

/// Distance from a coordinate to the nearest known fault vertex.
pub fn nearest_fault_distance_km(lat: f64, lon: f64) -> f64 {
    FAULT_LINES
        .iter()
        .flat_map(|fault| fault.vertices.iter())
        .map(|&(flat, flon)| haversine_km(lat, lon, flat, flon))
        .fold(f64::INFINITY, f64::min)
}

/// Monitored region closest to a coordinate, with its distance in km.
pub fn nearest_region(lat: f64, lon: f64) -> Option<(&'static Region, f64)> {
    nearest_region_of(&REGIONS, lat, lon)
}

/// Same lookup over an arbitrary region table.
pub fn nearest_region_of(regions: &[Region], lat: f64, lon: f64) -> Option<(&Region, f64)> {
    regions
        .iter()
        .map(|region| (region, haversine_km(lat, lon, region.lat, region.lon)))
        .min_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
}

// ============================================================================
// TESTS
// ============================================================================
