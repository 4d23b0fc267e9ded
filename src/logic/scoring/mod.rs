//! Scoring Module - Risk Scorers & Anomaly Detection
//!
//! - `types` - Assessment results, levels, errors
//! - `thresholds` - Level ladder and heuristic factor weights
//! - `heuristic` - Additive rule-based scorer (always available)
//! - `artifact` - Versioned ensemble artifact + store
//! - `ensemble` - Weighted linear ensemble with fallback stack
//! - `anomaly` - Rule-based anomaly detector

pub mod anomaly;
pub mod artifact;
pub mod ensemble;
pub mod heuristic;
pub mod thresholds;
pub mod types;

pub use anomaly::AnomalyDetector;
pub use artifact::{ArtifactStore, EnsembleArtifact, FsArtifactStore, LinearModel};
pub use ensemble::{EnsembleScorer, ScorerStack};
pub use heuristic::HeuristicScorer;
pub use types::{AnomalyReport, RiskAssessment, RiskLevel, ScoreError, ScoreMethod, Scorer};
