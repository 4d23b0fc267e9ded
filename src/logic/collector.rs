//! Training Data Collector - Bulk Feature History
//!
//! Each bulk cycle turns the feed into one labeled record per region
//! (features + heuristic risk score). Records are deduplicated per region
//! within an hour, capped at a fixed history size, persisted through the
//! injected sink, and counted against the retrain threshold. Crossing the
//! threshold fires the retrain hook exactly once per crossing.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::PathBuf;

use chrono::Utc;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::logic::features::{extract, ExtractionParams, FeatureVector};
use crate::logic::feed::SeismicEvent;
use crate::logic::geo::Region;
use crate::logic::scoring::HeuristicScorer;

/// Records newer than this per region are considered duplicates.
const DEDUP_WINDOW_SECS: i64 = 3600;
/// Only the most recent records are scanned for duplicates.
const DEDUP_SCAN_DEPTH: usize = 100;

// ============================================================================
// RECORD
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingRecord {
    pub id: String,
    pub region_id: String,
    pub features: FeatureVector,
    pub risk_score: f64,
    pub collected_at: i64,
}

// ============================================================================
// SINK
// ============================================================================

/// Persistence seam for the training history.
pub trait HistorySink: Send + Sync {
    fn load(&self) -> Vec<TrainingRecord>;
    fn save(&self, records: &[TrainingRecord]);
}

pub struct FsHistorySink {
    path: PathBuf,
}

impl FsHistorySink {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn default_location() -> Self {
        let dir = dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("QuakeWatch");
        Self { path: dir.join("training_history.json") }
    }
}

impl HistorySink for FsHistorySink {
    fn load(&self) -> Vec<TrainingRecord> {
        if !self.path.exists() {
            return Vec::new();
        }
        match File::open(&self.path) {
            Ok(file) => serde_json::from_reader(BufReader::new(file)).unwrap_or_else(|e| {
                log::warn!("Training history parse failed: {}", e);
                Vec::new()
            }),
            Err(e) => {
                log::warn!("Training history open failed: {}", e);
                Vec::new()
            }
        }
    }

    fn save(&self, records: &[TrainingRecord]) {
        if let Some(parent) = self.path.parent() {
            if let Err(e) = fs::create_dir_all(parent) {
                log::error!("Training history dir create failed: {}", e);
                return;
            }
        }
        match File::create(&self.path) {
            Ok(file) => {
                if let Err(e) = serde_json::to_writer(BufWriter::new(file), records) {
                    log::error!("Training history write failed: {}", e);
                }
            }
            Err(e) => log::error!("Training history create failed: {}", e),
        }
    }
}

/// Discards everything; for configurations without persistence.
pub struct NullSink;

impl HistorySink for NullSink {
    fn load(&self) -> Vec<TrainingRecord> {
        Vec::new()
    }

    fn save(&self, _records: &[TrainingRecord]) {}
}

// ============================================================================
// RETRAIN HOOK
// ============================================================================

/// Receives the exactly-once signal when the history crosses the retrain
/// threshold.
pub trait RetrainHook: Send + Sync {
    fn retrain_requested(&self, record_count: usize);
}

/// Default hook: log and move on; training runs out-of-process.
pub struct LogRetrainHook;

impl RetrainHook for LogRetrainHook {
    fn retrain_requested(&self, record_count: usize) {
        log::info!("[RETRAIN] Training history reached {} records", record_count);
    }
}

// ============================================================================
// COLLECTOR
// ============================================================================

pub struct TrainingCollector {
    scorer: HeuristicScorer,
    sink: Box<dyn HistorySink>,
    hook: Box<dyn RetrainHook>,
    records: Mutex<Vec<TrainingRecord>>,
    window_hours: i64,
    retrain_threshold: usize,
    history_cap: usize,
}

impl TrainingCollector {
    pub fn new(
        sink: Box<dyn HistorySink>,
        hook: Box<dyn RetrainHook>,
        window_hours: i64,
        retrain_threshold: usize,
        history_cap: usize,
    ) -> Self {
        let records = sink.load();
        if !records.is_empty() {
            log::info!("Training history loaded: {} records", records.len());
        }
        Self {
            scorer: HeuristicScorer::new(),
            sink,
            hook,
            records: Mutex::new(records),
            window_hours,
            retrain_threshold,
            history_cap,
        }
    }

    /// One bulk cycle over the region table. Returns how many records were
    /// appended.
    pub fn run_cycle(&self, regions: &[Region], events: &[SeismicEvent], now: i64) -> usize {
        let mut records = self.records.lock();
        let before = records.len();

        for region in regions {
            if Self::is_duplicate(&records, &region.id, now) {
                continue;
            }

            let params = ExtractionParams {
                lat: region.lat,
                lon: region.lon,
                window_hours: self.window_hours,
                now,
            };
            let features = extract(events, params);
            // A region with no windowed activity yields the defaults vector;
            // that is not a training sample.
            if features.value("event_count") == 0.0 {
                continue;
            }
            let risk_score = self.scorer.assess(&features).score;

            records.push(TrainingRecord {
                id: Uuid::new_v4().to_string(),
                region_id: region.id.clone(),
                features,
                risk_score,
                collected_at: now,
            });
        }

        let appended = records.len() - before;
        if appended == 0 {
            return 0;
        }

        let overflow = records.len().saturating_sub(self.history_cap);
        if overflow > 0 {
            records.drain(0..overflow);
        }

        self.sink.save(&records);
        let after = records.len();
        drop(records);

        log::debug!("Collection cycle appended {} records ({} total)", appended, after);

        if before <= self.retrain_threshold && after > self.retrain_threshold {
            self.hook.retrain_requested(after);
        }

        appended
    }

    pub fn record_count(&self) -> usize {
        self.records.lock().len()
    }

    fn is_duplicate(records: &[TrainingRecord], region_id: &str, now: i64) -> bool {
        records
            .iter()
            .rev()
            .take(DEDUP_SCAN_DEPTH)
            .any(|r| r.region_id == region_id && now - r.collected_at < DEDUP_WINDOW_SECS)
    }
}

// ============================================================================
// TESTS
// ============================================================================
