//! Logic Module - Business Logic & Engines
//!
//! - `feed/` - Upstream feed client and TTL cache
//! - `features/` - Windowed feature extraction (versioned layout)
//! - `scoring/` - Heuristic + ensemble risk scorers, anomaly detection
//! - `evaluator` - Per-region early-warning evaluation
//! - `alerts/` - Alert levels and cooldown state machine
//! - `notify/` - Subscribers, channels, dispatch
//! - `collector` - Training-data history with retrain trigger
//! - `workers` - Periodic loops wired from the composition root

pub mod alerts;
pub mod collector;
pub mod config;
pub mod damage;
pub mod evaluator;
pub mod features;
pub mod feed;
pub mod geo;
pub mod notify;
pub mod scoring;
pub mod validation;
pub mod workers;
