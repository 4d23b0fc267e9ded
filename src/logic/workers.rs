//! Background Workers - Periodic Alert & Collection Loops
//!
//! Two loops share the feed cache: a fast alert sweep (default 30 s) and a
//! bulk training-data cycle (default 1800 s). Both take every collaborator
//! through the constructor and stop when the shared shutdown signal flips.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use parking_lot::Mutex;
use tokio::sync::watch;

use super::alerts::AlertStateMachine;
use super::collector::TrainingCollector;
use super::damage;
use super::evaluator::RegionEvaluator;
use super::feed::{FeedCache, FeedSource};
use super::geo::{haversine_km, nearest_region_of, Region};
use super::notify::message::{format_big_quake, format_early_warning};
use super::notify::{NotificationDispatcher, SubscriberRegistry};

const BIG_QUAKE_MAGNITUDE: f64 = 5.0;
const BIG_QUAKE_RADIUS_KM: f64 = 150.0;
/// A subscriber belongs to a region only within this distance of its center.
const SUBSCRIBER_REGION_RADIUS_KM: f64 = 200.0;

// ============================================================================
// ALERT WORKER
// ============================================================================

pub struct AlertWorker<S: FeedSource> {
    cache: Arc<FeedCache<S>>,
    evaluator: RegionEvaluator,
    state: AlertStateMachine,
    dispatcher: Arc<NotificationDispatcher>,
    registry: Arc<dyn SubscriberRegistry>,
    regions: Vec<Region>,
    big_quake_gate_secs: i64,
    last_big_quake_alert: Mutex<i64>,
}

impl<S: FeedSource> AlertWorker<S> {
    pub fn new(
        cache: Arc<FeedCache<S>>,
        evaluator: RegionEvaluator,
        state: AlertStateMachine,
        dispatcher: Arc<NotificationDispatcher>,
        registry: Arc<dyn SubscriberRegistry>,
        regions: Vec<Region>,
        big_quake_gate_secs: i64,
    ) -> Self {
        Self {
            cache,
            evaluator,
            state,
            dispatcher,
            registry,
            regions,
            big_quake_gate_secs,
            last_big_quake_alert: Mutex::new(0),
        }
    }

    pub async fn run(&self, interval_secs: u64, mut shutdown: watch::Receiver<bool>) {
        log::info!("Alert worker started (interval {}s)", interval_secs);
        let mut ticker = tokio::time::interval(Duration::from_secs(interval_secs));
        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    self.run_cycle().await;
                }
                _ = shutdown.changed() => {
                    if *shutdown.borrow() {
                        log::info!("Alert worker stopping");
                        return;
                    }
                }
            }
        }
    }

    pub async fn run_cycle(&self) {
        let now = Utc::now().timestamp();
        let (events, from_cache) = self.cache.fetch().await;
        if events.is_empty() {
            log::debug!("Alert cycle: feed empty, skipping sweep");
            return;
        }
        log::debug!(
            "Alert cycle: {} events (cached: {})",
            events.len(),
            from_cache
        );

        let assessments = self.evaluator.evaluate_all(&self.regions, &events, now);
        let mut snapshot = None;

        for assessment in &assessments {
            let emission = self.state.apply(&assessment.region_id, assessment.level, now);
            if !emission.should_notify {
                continue;
            }
            let Some(region) = self.regions.iter().find(|r| r.id == assessment.region_id) else {
                continue;
            };

            log::warn!(
                "[EARLY WARNING] {} level {} (score {:.2}, predicted M{:.1})",
                region.name,
                assessment.level.as_str(),
                assessment.warning_score,
                assessment.predicted_magnitude.unwrap_or(0.0)
            );

            let subscribers =
                snapshot.get_or_insert_with(|| self.registry.list_subscribers());
            let text = format_early_warning(region, assessment);

            for subscriber in subscribers.iter() {
                let in_region = nearest_region_of(&self.regions, subscriber.lat, subscriber.lon)
                    .map(|(nearest, distance)| {
                        nearest.id == region.id && distance <= SUBSCRIBER_REGION_RADIUS_KM
                    })
                    .unwrap_or(false);
                if !in_region {
                    continue;
                }
                let attempt = self.dispatcher.dispatch(subscriber, &text);
                if !attempt.delivered() {
                    log::warn!("Early warning delivery failed for subscriber {}", subscriber.id);
                }
            }
        }

        self.check_big_quakes(&events, now);
    }

    /// Direct alerts for actual large events, gated globally so a single
    /// quake does not hammer subscribers across cycles.
    fn check_big_quakes(&self, events: &[super::feed::SeismicEvent], now: i64) {
        let mut last_alert = self.last_big_quake_alert.lock();
        if now - *last_alert < self.big_quake_gate_secs {
            return;
        }

        let Some(quake) = events
            .iter()
            .filter(|e| {
                e.magnitude >= BIG_QUAKE_MAGNITUDE && now - e.occurred_at < self.big_quake_gate_secs
            })
            .max_by(|a, b| a.magnitude.partial_cmp(&b.magnitude).unwrap_or(std::cmp::Ordering::Equal))
        else {
            return;
        };

        log::warn!(
            "[BIG QUAKE] M{:.1} at {} ({:.2}, {:.2})",
            quake.magnitude,
            if quake.location.is_empty() { "unknown" } else { &quake.location },
            quake.lat,
            quake.lon
        );

        for subscriber in self.registry.list_subscribers() {
            let distance = haversine_km(subscriber.lat, subscriber.lon, quake.lat, quake.lon);
            if distance > BIG_QUAKE_RADIUS_KM {
                continue;
            }
            let Some((region, _)) =
                nearest_region_of(&self.regions, subscriber.lat, subscriber.lon)
            else {
                continue;
            };
            let estimate =
                damage::estimate(quake.magnitude, quake.depth_km, distance, &region.fragility);
            let text = format_big_quake(quake, distance, &estimate);
            if !self.dispatcher.dispatch(&subscriber, &text).delivered() {
                log::warn!("Big quake delivery failed for subscriber {}", subscriber.id);
            }
        }

        // Gate on handling, not on delivery: a quake with nobody in radius
        // must not re-alert every cycle.
        *last_alert = now;
    }
}

// ============================================================================
// COLLECTION WORKER
// ============================================================================

pub struct CollectionWorker<S: FeedSource> {
    cache: Arc<FeedCache<S>>,
    collector: TrainingCollector,
    regions: Vec<Region>,
}

impl<S: FeedSource> CollectionWorker<S> {
    pub fn new(
        cache: Arc<FeedCache<S>>,
        collector: TrainingCollector,
        regions: Vec<Region>,
    ) -> Self {
        Self { cache, collector, regions }
    }

    pub async fn run(&self, interval_secs: u64, mut shutdown: watch::Receiver<bool>) {
        log::info!("Collection worker started (interval {}s)", interval_secs);
        let mut ticker = tokio::time::interval(Duration::from_secs(interval_secs));
        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    self.run_cycle().await;
                }
                _ = shutdown.changed() => {
                    if *shutdown.borrow() {
                        log::info!("Collection worker stopping");
                        return;
                    }
                }
            }
        }
    }

    pub async fn run_cycle(&self) {
        let now = Utc::now().timestamp();
        let (events, _) = self.cache.fetch().await;
        if events.is_empty() {
            log::debug!("Collection cycle: feed empty, skipping");
            return;
        }
        let appended = self.collector.run_cycle(&self.regions, &events, now);
        if appended > 0 {
            log::info!(
                "Collection cycle: {} new records ({} total)",
                appended,
                self.collector.record_count()
            );
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::collector::{LogRetrainHook, NullSink};
    use crate::logic::feed::{FeedError, SeismicEvent};
    use crate::logic::geo::FragilityMix;
    use crate::logic::notify::channels::NotifyChannel;
    use crate::logic::notify::types::{ChannelError, Subscriber};
    use crate::logic::notify::InMemoryRegistry;
    use crate::logic::scoring::{AnomalyDetector, ScorerStack};
    use parking_lot::Mutex as PlMutex;

    struct StaticSource {
        events: Vec<SeismicEvent>,
    }

    impl FeedSource for StaticSource {
        async fn fetch_events(&self) -> Result<Vec<SeismicEvent>, FeedError> {
            Ok(self.events.clone())
        }
    }

    struct RecordingChannel {
        sent: Arc<PlMutex<Vec<String>>>,
    }

    impl NotifyChannel for RecordingChannel {
        fn name(&self) -> &'static str {
            "recording"
        }

        fn send(&self, _recipient: &Subscriber, text: &str) -> Result<(), ChannelError> {
            self.sent.lock().push(text.to_string());
            Ok(())
        }
    }

    fn istanbul() -> Region {
        Region {
            id: "istanbul".to_string(),
            name: "Istanbul".to_string(),
            lat: 41.0082,
            lon: 28.9784,
            fragility: FragilityMix { reinforced: 0.35, normal: 0.50, weak: 0.15 },
        }
    }

    fn swarm_events(now: i64) -> Vec<SeismicEvent> {
        let mut events: Vec<SeismicEvent> = (0..30)
            .map(|i| {
                SeismicEvent::new(3.0 + (i as f64) * 0.08, 41.05, 29.0, now - (30 - i) * 200)
                    .with_depth(8.0)
            })
            .collect();
        events.push(SeismicEvent::new(5.6, 41.05, 29.0, now - 100).with_depth(8.0));
        events
    }

    fn worker_with(
        events: Vec<SeismicEvent>,
        subscribers: Vec<Subscriber>,
    ) -> (AlertWorker<StaticSource>, Arc<PlMutex<Vec<String>>>) {
        let sent = Arc::new(PlMutex::new(Vec::new()));
        let cache = Arc::new(FeedCache::new(StaticSource { events }, 300, 2, 0));
        let evaluator = RegionEvaluator::new(
            ScorerStack::heuristic_only(),
            AnomalyDetector::new(),
            200.0,
            168,
        );
        let dispatcher = Arc::new(NotificationDispatcher::new(vec![Box::new(
            RecordingChannel { sent: sent.clone() },
        )]));
        let worker = AlertWorker::new(
            cache,
            evaluator,
            AlertStateMachine::new(3600),
            dispatcher,
            Arc::new(InMemoryRegistry::new(subscribers)),
            vec![istanbul()],
            1800,
        );
        (worker, sent)
    }

    #[tokio::test]
    async fn test_alert_cycle_notifies_nearby_subscriber() {
        let now = Utc::now().timestamp();
        let subscriber = Subscriber::register("+905551234567", 41.02, 28.99).unwrap();
        let (worker, sent) = worker_with(swarm_events(now), vec![subscriber]);

        worker.run_cycle().await;

        let messages = sent.lock();
        assert!(!messages.is_empty());
        assert!(messages.iter().any(|m| m.contains("[EARLY WARNING] Istanbul")));
        // The M5.6 event also triggers the direct big-quake path
        assert!(messages.iter().any(|m| m.contains("[BIG QUAKE]")));
    }

    #[tokio::test]
    async fn test_second_cycle_suppressed_by_cooldown() {
        let now = Utc::now().timestamp();
        let subscriber = Subscriber::register("+905551234567", 41.02, 28.99).unwrap();
        let (worker, sent) = worker_with(swarm_events(now), vec![subscriber]);

        worker.run_cycle().await;
        let first_wave = sent.lock().len();
        assert!(first_wave > 0);

        worker.run_cycle().await;
        assert_eq!(sent.lock().len(), first_wave);
    }

    #[tokio::test]
    async fn test_empty_feed_skips_sweep() {
        let subscriber = Subscriber::register("+905551234567", 41.02, 28.99).unwrap();
        let (worker, sent) = worker_with(Vec::new(), vec![subscriber]);

        worker.run_cycle().await;
        assert!(sent.lock().is_empty());
    }

    #[tokio::test]
    async fn test_distant_subscriber_not_notified() {
        let now = Utc::now().timestamp();
        // Subscriber near Van, far outside the Istanbul region
        let subscriber = Subscriber::register("+905551234567", 38.5, 43.4).unwrap();
        let (worker, sent) = worker_with(swarm_events(now), vec![subscriber]);

        worker.run_cycle().await;
        assert!(sent.lock().is_empty());
    }

    #[tokio::test]
    async fn test_big_quake_gate_stamps_without_recipients() {
        let now = Utc::now().timestamp();
        let events = vec![SeismicEvent::new(5.8, 41.05, 29.0, now - 60).with_depth(9.0)];
        let (worker, sent) = worker_with(events, Vec::new());

        worker.run_cycle().await;
        assert!(sent.lock().is_empty());
        assert!(*worker.last_big_quake_alert.lock() >= now);
    }

    #[tokio::test]
    async fn test_collection_worker_skips_empty_feed() {
        let cache = Arc::new(FeedCache::new(StaticSource { events: Vec::new() }, 300, 2, 0));
        let collector = TrainingCollector::new(
            Box::new(NullSink),
            Box::new(LogRetrainHook),
            168,
            1000,
            10_000,
        );
        let worker = CollectionWorker::new(cache, collector, vec![istanbul()]);

        worker.run_cycle().await;
        assert_eq!(worker.collector.record_count(), 0);
    }

    #[tokio::test]
    async fn test_collection_worker_appends() {
        let now = Utc::now().timestamp();
        let cache = Arc::new(FeedCache::new(StaticSource { events: swarm_events(now) }, 300, 2, 0));
        let collector = TrainingCollector::new(
            Box::new(NullSink),
            Box::new(LogRetrainHook),
            168,
            1000,
            10_000,
        );
        let worker = CollectionWorker::new(cache, collector, vec![istanbul()]);

        worker.run_cycle().await;
        assert_eq!(worker.collector.record_count(), 1);
    }

    #[tokio::test]
    async fn test_shutdown_stops_worker() {
        let (worker, _) = worker_with(Vec::new(), Vec::new());
        let (tx, rx) = watch::channel(false);

        let handle = tokio::spawn(async move {
            worker.run(3600, rx).await;
        });

        tx.send(true).unwrap();
        tokio::time::timeout(Duration::from_secs(5), handle)
            .await
            .expect("worker did not stop on shutdown signal")
            .unwrap();
    }

    #[tokio::test]
    async fn test_big_quake_gate_suppresses_repeat() {
        let now = Utc::now().timestamp();
        // One large quake, no surrounding swarm: no early warning fires
        let events = vec![SeismicEvent::new(5.8, 41.05, 29.0, now - 60).with_depth(9.0)];
        let subscriber = Subscriber::register("+905551234567", 41.02, 28.99).unwrap();
        let (worker, sent) = worker_with(events, vec![subscriber]);

        worker.run_cycle().await;
        let big_quakes = sent
            .lock()
            .iter()
            .filter(|m| m.contains("[BIG QUAKE]"))
            .count();
        assert_eq!(big_quakes, 1);

        worker.run_cycle().await;
        let after_second = sent
            .lock()
            .iter()
            .filter(|m| m.contains("[BIG QUAKE]"))
            .count();
        assert_eq!(after_second, 1);
    }
}
