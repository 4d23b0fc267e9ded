//! Feed Cache - TTL Slot With Retry & Stale Fallback
//!
//! Single cached payload shared by every worker. Within the TTL callers are
//! served from the slot without touching the network. On expiry one refresh
//! runs (concurrent callers wait on the refresh lock and re-check), with a
//! bounded number of attempts and a fixed delay between them. A failed
//! refresh serves the stale slot when one exists; the slot itself is only
//! replaced on success.

use std::time::Duration;

use chrono::Utc;
use parking_lot::RwLock;

use super::source::FeedSource;
use super::types::SeismicEvent;

struct CachedFeed {
    events: Vec<SeismicEvent>,
    fetched_at: i64,
}

pub struct FeedCache<S: FeedSource> {
    source: S,
    ttl_secs: i64,
    attempts: u32,
    retry_delay: Duration,
    slot: RwLock<Option<CachedFeed>>,
    refresh: tokio::sync::Mutex<()>,
}

impl<S: FeedSource> FeedCache<S> {
    pub fn new(source: S, ttl_secs: i64, attempts: u32, retry_delay_secs: u64) -> Self {
        Self {
            source,
            ttl_secs,
            attempts: attempts.max(1),
            retry_delay: Duration::from_secs(retry_delay_secs),
            slot: RwLock::new(None),
            refresh: tokio::sync::Mutex::new(()),
        }
    }

    /// Current events plus whether they came from the cache slot.
    /// Fresh network data answers `false`; a TTL hit or a stale fallback
    /// after failed attempts answers `true`.
    pub async fn fetch(&self) -> (Vec<SeismicEvent>, bool) {
        if let Some(events) = self.cached_within_ttl() {
            return (events, true);
        }

        let _guard = self.refresh.lock().await;

        // Another caller may have refreshed while we waited.
        if let Some(events) = self.cached_within_ttl() {
            return (events, true);
        }

        for attempt in 1..=self.attempts {
            match self.source.fetch_events().await {
                Ok(events) => {
                    *self.slot.write() = Some(CachedFeed {
                        events: events.clone(),
                        fetched_at: Utc::now().timestamp(),
                    });
                    return (events, false);
                }
                Err(e) => {
                    log::warn!("Feed fetch attempt {}/{} failed: {}", attempt, self.attempts, e);
                    if attempt < self.attempts {
                        tokio::time::sleep(self.retry_delay).await;
                    }
                }
            }
        }

        let stale = self.slot.read().as_ref().map(|c| c.events.clone());
        match stale {
            Some(events) => {
                log::warn!("Feed unavailable, serving stale cache ({} events)", events.len());
                (events, true)
            }
            None => (Vec::new(), false),
        }
    }

    fn cached_within_ttl(&self) -> Option<Vec<SeismicEvent>> {
        let slot = self.slot.read();
        let cached = slot.as_ref()?;
        if Utc::now().timestamp() - cached.fetched_at < self.ttl_secs {
            Some(cached.events.clone())
        } else {
            None
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
