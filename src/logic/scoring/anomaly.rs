//! Anomaly Detector - Rule-Based Swarm Signatures
//!
//! Additive factor score capped at 1.0; a report is "detected" above 0.5,
//! so no single factor trips it alone.

use crate::logic::features::FeatureVector;

use super::types::AnomalyReport;

const HIGH_COUNT_THRESHOLD: f64 = 20.0;
const LARGE_MAGNITUDE_THRESHOLD: f64 = 5.0;
const CLOSE_PROXIMITY_KM: f64 = 20.0;
const RAPID_SEQUENCE_SECS: f64 = 300.0;
const RISING_TREND_THRESHOLD: f64 = 0.5;

const HIGH_COUNT_WEIGHT: f64 = 0.3;
const LARGE_MAGNITUDE_WEIGHT: f64 = 0.4;
const CLOSE_PROXIMITY_WEIGHT: f64 = 0.5;
const RAPID_SEQUENCE_WEIGHT: f64 = 0.3;
const RISING_TREND_WEIGHT: f64 = 0.4;

const DETECTION_THRESHOLD: f64 = 0.5;

#[derive(Debug, Default, Clone)]
pub struct AnomalyDetector;

impl AnomalyDetector {
    pub fn new() -> Self {
        Self
    }

    pub fn detect(&self, features: &FeatureVector) -> AnomalyReport {
        let mut report = AnomalyReport::default();
        let mut score = 0.0;

        if features.value("event_count") > HIGH_COUNT_THRESHOLD {
            report.high_count = true;
            score += HIGH_COUNT_WEIGHT;
        }
        if features.value("max_magnitude") >= LARGE_MAGNITUDE_THRESHOLD {
            report.large_magnitude = true;
            score += LARGE_MAGNITUDE_WEIGHT;
        }
        if features.value("min_distance") < CLOSE_PROXIMITY_KM {
            report.close_proximity = true;
            score += CLOSE_PROXIMITY_WEIGHT;
        }
        if features.value("min_interval") < RAPID_SEQUENCE_SECS {
            report.rapid_sequence = true;
            score += RAPID_SEQUENCE_WEIGHT;
        }
        if features.value("magnitude_trend") > RISING_TREND_THRESHOLD {
            report.rising_trend = true;
            score += RISING_TREND_WEIGHT;
        }

        report.score = score.min(1.0);
        report.detected = report.score > DETECTION_THRESHOLD;
        report
    }
}

// ============================================================================
// TESTS
// ============================================================================
