//! Feed Source - Upstream HTTP Client
//!
//! The live feed answers with a `{"result": [...]}` envelope; each item
//! carries magnitude, depth and a GeoJSON point in (lon, lat) order. Parsing
//! is tolerant: items missing coordinates are dropped, missing depth falls
//! back to the default.

use std::time::Duration;

use chrono::Utc;
use serde::Deserialize;

use super::types::{FeedError, SeismicEvent, DEFAULT_DEPTH_KM};

/// Capability seam for the upstream feed. The cache and workers only see
/// this trait; tests substitute an in-memory source.
pub trait FeedSource: Send + Sync {
    fn fetch_events(&self) -> impl std::future::Future<Output = Result<Vec<SeismicEvent>, FeedError>> + Send;
}

// ============================================================================
// WIRE FORMAT
// ============================================================================

#[derive(Debug, Deserialize)]
struct FeedEnvelope {
    #[serde(default)]
    result: Vec<RawFeedItem>,
}

#[derive(Debug, Deserialize)]
struct RawFeedItem {
    #[serde(default)]
    mag: f64,
    depth: Option<f64>,
    geojson: Option<GeoPoint>,
    /// Epoch seconds; absent on some mirrors.
    created_at: Option<i64>,
    #[serde(default)]
    title: String,
}

#[derive(Debug, Deserialize)]
struct GeoPoint {
    #[serde(default)]
    coordinates: Vec<f64>,
}

impl RawFeedItem {
    fn into_event(self, now: i64) -> Option<SeismicEvent> {
        let coords = self.geojson?.coordinates;
        if coords.len() < 2 {
            return None;
        }
        Some(SeismicEvent {
            magnitude: self.mag,
            depth_km: self.depth.unwrap_or(DEFAULT_DEPTH_KM),
            lon: coords[0],
            lat: coords[1],
            occurred_at: self.created_at.unwrap_or(now),
            location: self.title,
        })
    }
}

// ============================================================================
// HTTP SOURCE
// ============================================================================

pub struct HttpFeedSource {
    client: reqwest::Client,
    url: String,
}

impl HttpFeedSource {
    pub fn new(url: &str, timeout_secs: u64) -> Result<Self, FeedError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| FeedError::Network { message: e.to_string() })?;

        Ok(Self { client, url: url.to_string() })
    }
}

impl FeedSource for HttpFeedSource {
    async fn fetch_events(&self) -> Result<Vec<SeismicEvent>, FeedError> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| FeedError::Network { message: e.to_string() })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FeedError::BadStatus { code: status.as_u16() });
        }

        let envelope: FeedEnvelope = response
            .json()
            .await
            .map_err(|e| FeedError::Decode { message: e.to_string() })?;

        let now = Utc::now().timestamp();
        let events: Vec<SeismicEvent> = envelope
            .result
            .into_iter()
            .filter_map(|item| item.into_event(now))
            .collect();

        log::debug!("Feed fetch: {} events", events.len());
        Ok(events)
    }
}

// ============================================================================
// TESTS
// ============================================================================
