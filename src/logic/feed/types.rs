//! Feed Types - Seismic Event Model & Errors

use serde::{Deserialize, Serialize};

/// Default hypocenter depth when the feed omits it.
pub const DEFAULT_DEPTH_KM: f64 = 10.0;

/// A single earthquake observation from the upstream feed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeismicEvent {
    pub magnitude: f64,
    pub depth_km: f64,
    pub lat: f64,
    pub lon: f64,
    /// Origin time, epoch seconds UTC.
    pub occurred_at: i64,
    pub location: String,
}

impl SeismicEvent {
    pub fn new(magnitude: f64, lat: f64, lon: f64, occurred_at: i64) -> Self {
        Self {
            magnitude,
            depth_km: DEFAULT_DEPTH_KM,
            lat,
            lon,
            occurred_at,
            location: String::new(),
        }
    }

    pub fn with_depth(mut self, depth_km: f64) -> Self {
        self.depth_km = depth_km;
        self
    }
}

// ============================================================================
// ERRORS
// ============================================================================

/// Transient ingestion failure from the upstream feed.
#[derive(Debug, Clone)]
pub enum FeedError {
    Network { message: String },
    BadStatus { code: u16 },
    Decode { message: String },
}

impl std::fmt::Display for FeedError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FeedError::Network { message } => write!(f, "feed network error: {}", message),
            FeedError::BadStatus { code } => write!(f, "feed returned HTTP {}", code),
            FeedError::Decode { message } => write!(f, "feed decode error: {}", message),
        }
    }
}

impl std::error::Error for FeedError {}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_defaults() {
        let event = SeismicEvent::new(4.2, 40.0, 29.0, 1_700_000_000);
        assert_eq!(event.depth_km, DEFAULT_DEPTH_KM);
        assert!(event.location.is_empty());
    }

    #[test]
    fn test_error_display() {
        let err = FeedError::BadStatus { code: 502 };
        assert_eq!(err.to_string(), "feed returned HTTP 502");
    }
}
