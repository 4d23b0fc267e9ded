//! QuakeWatch Core - Main Entry Point
//!
//! Composition root: builds the feed cache, scorer stack, evaluator, alert
//! state machine, notification channels and workers, then runs the two
//! loops until Ctrl-C.

mod logic;

use std::sync::Arc;

use logic::alerts::AlertStateMachine;
use logic::collector::{FsHistorySink, HistorySink, LogRetrainHook, TrainingCollector};
use logic::config::AppConfig;
use logic::evaluator::RegionEvaluator;
use logic::feed::{FeedCache, HttpFeedSource};
use logic::geo::REGIONS;
use logic::notify::{
    JsonFileRegistry, NotificationDispatcher, NotifyChannel, SmsChannel, WhatsAppChannel,
};
use logic::scoring::{AnomalyDetector, FsArtifactStore, ScorerStack};
use logic::workers::{AlertWorker, CollectionWorker};

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = AppConfig::default();
    log::info!("Starting QuakeWatch Core...");
    log::info!("   Feed: {}", config.feed_url);
    log::info!("   Alert interval: {}s", config.alert_interval_secs);
    log::info!("   Collection interval: {}s", config.collect_interval_secs);

    let source = match HttpFeedSource::new(&config.feed_url, config.feed_timeout_secs) {
        Ok(source) => source,
        Err(e) => {
            log::error!("Feed client init failed: {}", e);
            return;
        }
    };
    let cache = Arc::new(FeedCache::new(
        source,
        config.cache_ttl_secs,
        config.fetch_attempts,
        config.retry_delay_secs,
    ));

    let artifact_store = match &config.artifact_dir {
        Some(dir) => FsArtifactStore::new(dir),
        None => FsArtifactStore::default_location(),
    };
    let stack = ScorerStack::from_store(&artifact_store);
    if stack.has_ensemble() {
        log::info!("Ensemble scorer active");
    } else {
        log::info!("Ensemble artifact not found - using heuristic fallback");
    }

    let evaluator = RegionEvaluator::new(
        stack,
        AnomalyDetector::new(),
        config.region_radius_km,
        config.warning_window_hours,
    );

    let channels: Vec<Box<dyn NotifyChannel>> = vec![
        Box::new(WhatsAppChannel::new(
            &config.whatsapp_service_url,
            config.notify_timeout_secs,
        )),
        Box::new(SmsChannel::new(
            &config.sms_api_url,
            &config.sms_auth_token,
            &config.sms_from_number,
            config.notify_timeout_secs,
        )),
    ];
    let dispatcher = Arc::new(NotificationDispatcher::new(channels));
    let registry = Arc::new(JsonFileRegistry::new(config.subscriber_file.clone()));

    let alert_worker = AlertWorker::new(
        cache.clone(),
        evaluator,
        AlertStateMachine::new(config.cooldown_secs),
        dispatcher,
        registry,
        REGIONS.clone(),
        config.big_quake_gate_secs,
    );

    let sink: Box<dyn HistorySink> = match &config.history_file {
        Some(path) => Box::new(FsHistorySink::new(path.clone())),
        None => Box::new(FsHistorySink::default_location()),
    };
    let collector = TrainingCollector::new(
        sink,
        Box::new(LogRetrainHook),
        config.warning_window_hours,
        config.retrain_threshold,
        config.history_cap,
    );
    let collection_worker = CollectionWorker::new(cache, collector, REGIONS.clone());

    let (shutdown_tx, shutdown_rx) = tokio::sync::watch::channel(false);

    let alert_handle = {
        let rx = shutdown_rx.clone();
        let interval = config.alert_interval_secs;
        tokio::spawn(async move { alert_worker.run(interval, rx).await })
    };
    let collect_handle = {
        let rx = shutdown_rx;
        let interval = config.collect_interval_secs;
        tokio::spawn(async move { collection_worker.run(interval, rx).await })
    };

    if let Err(e) = tokio::signal::ctrl_c().await {
        log::error!("Shutdown signal listener failed: {}", e);
    }
    log::info!("Shutdown requested");
    let _ = shutdown_tx.send(true);

    let _ = alert_handle.await;
    let _ = collect_handle.await;
    log::info!("QuakeWatch Core stopped");
}
