//! Feature Extraction - Event List to Feature Vector
//!
//! Pure function of the event list, target coordinate, window and `now`.
//! Filter ladder:
//! 1. events inside the window, within 300 km, magnitude >= 2.0
//! 2. same filter without the magnitude floor
//! 3. defaults vector (fault distance still computed from geometry)

use crate::logic::feed::SeismicEvent;
use crate::logic::geo::{haversine_km, nearest_fault_distance_km};

use super::vector::FeatureVector;

pub const EXTRACTION_RADIUS_KM: f64 = 300.0;
pub const MAGNITUDE_FLOOR: f64 = 2.0;

const DEFAULT_DISTANCE_KM: f64 = 300.0;
const DEFAULT_DEPTH_KM: f64 = 10.0;
const DEFAULT_INTERVAL_SECS: f64 = 3600.0;
const SHALLOW_DEPTH_KM: f64 = 10.0;

#[derive(Debug, Clone, Copy)]
pub struct ExtractionParams {
    pub lat: f64,
    pub lon: f64,
    pub window_hours: i64,
    /// Epoch seconds; passed in so extraction stays deterministic.
    pub now: i64,
}

/// Extract the feature vector for one target coordinate.
pub fn extract(events: &[SeismicEvent], params: ExtractionParams) -> FeatureVector {
    let window_start = params.now - params.window_hours * 3600;
    let fault_distance = nearest_fault_distance_km(params.lat, params.lon);

    // (event, distance) pairs inside the window and radius
    let in_radius: Vec<(&SeismicEvent, f64)> = events
        .iter()
        .filter(|e| e.occurred_at >= window_start)
        .map(|e| (e, haversine_km(params.lat, params.lon, e.lat, e.lon)))
        .filter(|(_, d)| *d < EXTRACTION_RADIUS_KM)
        .collect();

    let mut selected: Vec<(&SeismicEvent, f64)> = in_radius
        .iter()
        .filter(|(e, _)| e.magnitude >= MAGNITUDE_FLOOR)
        .cloned()
        .collect();
    if selected.is_empty() {
        selected = in_radius;
    }

    if selected.is_empty() {
        return defaults_vector(fault_distance);
    }

    let count = selected.len();
    let magnitudes: Vec<f64> = selected.iter().map(|(e, _)| e.magnitude).collect();
    let distances: Vec<f64> = selected.iter().map(|(_, d)| *d).collect();
    let depths: Vec<f64> = selected
        .iter()
        .map(|(e, _)| if e.depth_km > 0.0 { e.depth_km } else { DEFAULT_DEPTH_KM })
        .collect();

    let max_magnitude = magnitudes.iter().cloned().fold(f64::MIN, f64::max);
    let mean_magnitude = mean(&magnitudes);
    let std_magnitude = std_dev(&magnitudes, mean_magnitude);
    let min_distance = distances.iter().cloned().fold(f64::MAX, f64::min);
    let mean_distance = mean(&distances);
    let mean_depth = mean(&depths);

    let (mean_interval, min_interval) = intervals(&selected);

    let mut times: Vec<(i64, f64)> = selected
        .iter()
        .map(|(e, _)| (e.occurred_at, e.magnitude))
        .collect();
    times.sort_by_key(|(t, _)| *t);
    let magnitude_trend = trend(&times);

    let activity_density = if mean_distance > 0.0 {
        count as f64 / (std::f64::consts::PI * mean_distance * mean_distance)
    } else {
        0.0
    };

    let mut v = FeatureVector::new();
    v.set_by_name("event_count", count as f64);
    v.set_by_name("max_magnitude", max_magnitude);
    v.set_by_name("mean_magnitude", mean_magnitude);
    v.set_by_name("std_magnitude", std_magnitude);
    v.set_by_name("min_distance", min_distance);
    v.set_by_name("mean_distance", mean_distance);
    v.set_by_name("mean_depth", mean_depth);
    v.set_by_name("mean_interval", mean_interval);
    v.set_by_name("min_interval", min_interval);
    v.set_by_name("mag_above_4", count_where(&magnitudes, |m| m >= 4.0));
    v.set_by_name("mag_above_5", count_where(&magnitudes, |m| m >= 5.0));
    v.set_by_name("mag_above_6", count_where(&magnitudes, |m| m >= 6.0));
    v.set_by_name("within_50km", count_where(&distances, |d| d < 50.0));
    v.set_by_name("within_100km", count_where(&distances, |d| d < 100.0));
    v.set_by_name("within_150km", count_where(&distances, |d| d < 150.0));
    v.set_by_name("shallow_count", count_where(&depths, |d| d <= SHALLOW_DEPTH_KM));
    v.set_by_name("nearest_fault_distance", fault_distance);
    v.set_by_name("activity_density", activity_density);
    v.set_by_name("magnitude_distance_ratio", max_magnitude / (min_distance + 1.0));
    v.set_by_name("magnitude_trend", magnitude_trend);
    v
}

fn defaults_vector(fault_distance: f64) -> FeatureVector {
    let mut v = FeatureVector::new();
    v.set_by_name("min_distance", DEFAULT_DISTANCE_KM);
    v.set_by_name("mean_distance", DEFAULT_DISTANCE_KM);
    v.set_by_name("mean_depth", DEFAULT_DEPTH_KM);
    v.set_by_name("mean_interval", DEFAULT_INTERVAL_SECS);
    v.set_by_name("min_interval", DEFAULT_INTERVAL_SECS);
    v.set_by_name("nearest_fault_distance", fault_distance);
    v
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

fn std_dev(values: &[f64], mean: f64) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / values.len() as f64;
    variance.sqrt()
}

fn count_where(values: &[f64], pred: impl Fn(f64) -> bool) -> f64 {
    values.iter().filter(|&&v| pred(v)).count() as f64
}

fn intervals(selected: &[(&SeismicEvent, f64)]) -> (f64, f64) {
    if selected.len() < 2 {
        return (DEFAULT_INTERVAL_SECS, DEFAULT_INTERVAL_SECS);
    }
    let mut times: Vec<i64> = selected.iter().map(|(e, _)| e.occurred_at).collect();
    times.sort_unstable();

    let gaps: Vec<f64> = times.windows(2).map(|w| (w[1] - w[0]) as f64).collect();
    let min = gaps.iter().cloned().fold(f64::MAX, f64::min);
    (mean(&gaps), min)
}

/// Mean magnitude of the later half minus the earlier half, time-ordered.
/// Needs at least three events to say anything.
fn trend(times: &[(i64, f64)]) -> f64 {
    if times.len() < 3 {
        return 0.0;
    }
    let mid = times.len() / 2;
    let first: Vec<f64> = times[..mid].iter().map(|(_, m)| *m).collect();
    let second: Vec<f64> = times[mid..].iter().map(|(_, m)| *m).collect();
    mean(&second) - mean(&first)
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const NOW: i64 = 1_700_000_000;

    fn params() -> ExtractionParams {
        // Near Istanbul
        ExtractionParams { lat: 41.0, lon: 29.0, window_hours: 168, now: NOW }
    }

    fn event(mag: f64, lat: f64, lon: f64, age_secs: i64) -> SeismicEvent {
        SeismicEvent::new(mag, lat, lon, NOW - age_secs).with_depth(8.0)
    }

    #[test]
    fn test_empty_events_defaults() {
        let v = extract(&[], params());
        assert_eq!(v.value("event_count"), 0.0);
        assert_eq!(v.value("min_distance"), 300.0);
        assert_eq!(v.value("mean_depth"), 10.0);
        assert_eq!(v.value("mean_interval"), 3600.0);
        assert!(v.value("nearest_fault_distance") > 0.0);
        assert_eq!(v.value("magnitude_trend"), 0.0);
    }

    #[test]
    fn test_basic_extraction() {
        let events = vec![
            event(4.5, 40.9, 28.9, 600),
            event(3.0, 40.8, 29.1, 1200),
            event(5.1, 41.1, 29.2, 1800),
        ];
        let v = extract(&events, params());

        assert_eq!(v.value("event_count"), 3.0);
        assert_eq!(v.value("max_magnitude"), 5.1);
        assert_eq!(v.value("mag_above_4"), 2.0);
        assert_eq!(v.value("mag_above_5"), 1.0);
        assert_eq!(v.value("mag_above_6"), 0.0);
        assert!(v.value("min_distance") < 30.0);
        assert_eq!(v.value("within_50km"), 3.0);
        assert_eq!(v.value("shallow_count"), 3.0);
        assert_eq!(v.value("min_interval"), 600.0);
    }

    #[test]
    fn test_window_excludes_old_events() {
        let events = vec![
            event(4.5, 40.9, 28.9, 600),
            // 30 days old, outside the 168 h window
            event(6.0, 40.9, 28.9, 30 * 24 * 3600),
        ];
        let v = extract(&events, params());
        assert_eq!(v.value("event_count"), 1.0);
        assert_eq!(v.value("max_magnitude"), 4.5);
    }

    #[test]
    fn test_radius_excludes_far_events() {
        let events = vec![
            event(4.5, 40.9, 28.9, 600),
            // Van is ~1200 km from Istanbul
            event(5.5, 38.5, 43.4, 600),
        ];
        let v = extract(&events, params());
        assert_eq!(v.value("event_count"), 1.0);
    }

    #[test]
    fn test_fallback_drops_magnitude_floor() {
        // All below the 2.0 floor, still inside the radius
        let events = vec![
            event(1.2, 40.9, 28.9, 600),
            event(1.5, 40.8, 29.1, 1200),
        ];
        let v = extract(&events, params());
        assert_eq!(v.value("event_count"), 2.0);
        assert_eq!(v.value("max_magnitude"), 1.5);
    }

    #[test]
    fn test_trend_positive_for_growing_magnitudes() {
        let events = vec![
            event(2.5, 40.9, 28.9, 3000),
            event(3.0, 40.9, 28.9, 2000),
            event(4.5, 40.9, 28.9, 1000),
            event(5.0, 40.9, 28.9, 500),
        ];
        let v = extract(&events, params());
        assert!(v.value("magnitude_trend") > 1.0, "got {}", v.value("magnitude_trend"));
    }

    #[test]
    fn test_no_nan_anywhere() {
        let single = vec![event(3.3, 40.9, 28.9, 600)];
        for v in [extract(&[], params()), extract(&single, params())] {
            for (i, value) in v.values.iter().enumerate() {
                assert!(!value.is_nan(), "feature {} is NaN", i);
            }
        }
    }
}
