//! Region Evaluator - Early-Warning Assessment Per Region
//!
//! Selects the events inside a region's monitoring radius, extracts the
//! windowed features, scores risk through the injected scorer stack and
//! derives the warning level.
//!
//! The escalation gate: Medium and above require BOTH the warning-score
//! threshold AND a predicted magnitude of at least 5.0. Score alone never
//! pushes a region past Low.

use crate::logic::alerts::AlertLevel;
use crate::logic::features::{extract, ExtractionParams, FeatureVector};
use crate::logic::feed::SeismicEvent;
use crate::logic::geo::{haversine_km, Region};
use crate::logic::scoring::{AnomalyDetector, AnomalyReport, RiskAssessment, ScorerStack};
use crate::logic::validation::{validate_coordinates, ValidationError};

// ============================================================================
// WARNING CONSTANTS
// ============================================================================

const TREND_PREDICTION_THRESHOLD: f64 = 0.2;
const TREND_PREDICTION_CAP: f64 = 7.0;
const LARGE_EVENT_MAGNITUDE: f64 = 4.5;
const ANOMALY_PREDICTED_FLOOR: f64 = 5.0;
const ESCALATION_MAGNITUDE: f64 = 5.0;

const CRITICAL_SCORE: f64 = 0.7;
const HIGH_SCORE: f64 = 0.5;
const MEDIUM_SCORE: f64 = 0.4;
const LOW_SCORE: f64 = 0.3;

#[derive(Debug, Clone)]
pub struct RegionAssessment {
    pub region_id: String,
    pub level: AlertLevel,
    /// Additive warning score in [0, 1].
    pub warning_score: f64,
    pub predicted_magnitude: Option<f64>,
    pub risk: RiskAssessment,
    pub anomaly: AnomalyReport,
    pub features: FeatureVector,
    pub event_count: usize,
    /// Expected onset window for notifiable levels.
    pub time_horizon: Option<&'static str>,
}

pub struct RegionEvaluator {
    stack: ScorerStack,
    anomaly: AnomalyDetector,
    region_radius_km: f64,
    window_hours: i64,
}

impl RegionEvaluator {
    pub fn new(
        stack: ScorerStack,
        anomaly: AnomalyDetector,
        region_radius_km: f64,
        window_hours: i64,
    ) -> Self {
        Self { stack, anomaly, region_radius_km, window_hours }
    }

    pub fn evaluate(
        &self,
        region: &Region,
        events: &[SeismicEvent],
        now: i64,
    ) -> Result<RegionAssessment, ValidationError> {
        validate_coordinates(region.lat, region.lon)?;

        let nearby: Vec<SeismicEvent> = events
            .iter()
            .filter(|e| haversine_km(region.lat, region.lon, e.lat, e.lon) <= self.region_radius_km)
            .cloned()
            .collect();

        let params = ExtractionParams {
            lat: region.lat,
            lon: region.lon,
            window_hours: self.window_hours,
            now,
        };
        let features = extract(&nearby, params);
        let risk = self.stack.assess(&features);

        if nearby.is_empty() {
            return Ok(RegionAssessment {
                region_id: region.id.clone(),
                level: AlertLevel::Normal,
                warning_score: 0.0,
                predicted_magnitude: None,
                risk,
                anomaly: AnomalyReport::default(),
                features,
                event_count: 0,
                time_horizon: None,
            });
        }

        let anomaly = self.anomaly.detect(&features);
        let (warning_score, predicted_magnitude) = warning_score(&features, &anomaly);
        let (level, time_horizon) = alert_level(warning_score, predicted_magnitude);

        Ok(RegionAssessment {
            region_id: region.id.clone(),
            level,
            warning_score,
            predicted_magnitude,
            risk,
            anomaly,
            features,
            event_count: nearby.len(),
            time_horizon,
        })
    }

    /// Sweep the whole region table. Regions with bad reference coordinates
    /// are logged and skipped rather than failing the sweep.
    pub fn evaluate_all(
        &self,
        regions: &[Region],
        events: &[SeismicEvent],
        now: i64,
    ) -> Vec<RegionAssessment> {
        regions
            .iter()
            .filter_map(|region| match self.evaluate(region, events, now) {
                Ok(assessment) => Some(assessment),
                Err(e) => {
                    log::error!("Skipping region {}: {}", region.id, e);
                    None
                }
            })
            .collect()
    }
}

fn warning_score(features: &FeatureVector, anomaly: &AnomalyReport) -> (f64, Option<f64>) {
    let mut score: f64 = 0.0;
    let mut predicted: Option<f64> = None;

    let count = features.value("event_count");
    let max_mag = features.value("max_magnitude");
    let min_distance = features.value("min_distance");
    let min_interval = features.value("min_interval");
    let trend = features.value("magnitude_trend");
    let fault_distance = features.value("nearest_fault_distance");

    if count > 20.0 {
        score += 0.3;
    }

    if trend > TREND_PREDICTION_THRESHOLD {
        let projected = (max_mag + trend * 2.0).min(TREND_PREDICTION_CAP);
        predicted = Some(projected);
        if projected >= ESCALATION_MAGNITUDE {
            score += 0.5;
        }
    }

    if max_mag >= LARGE_EVENT_MAGNITUDE {
        score += 0.4;
        predicted = Some(predicted.map_or(max_mag, |p| p.max(max_mag)));
    }

    if min_distance < 30.0 {
        score += 0.6;
    } else if min_distance < 50.0 {
        score += 0.4;
    }

    if trend > 0.3 {
        score += 0.5;
    }

    if min_interval < 300.0 {
        score += 0.4;
    }

    if anomaly.detected {
        score += 0.6;
        predicted = Some(predicted.map_or(ANOMALY_PREDICTED_FLOOR, |p| {
            p.max(ANOMALY_PREDICTED_FLOOR)
        }));
    }

    if fault_distance < 25.0 {
        score += 0.3;
    }

    (score.min(1.0), predicted)
}

fn alert_level(score: f64, predicted: Option<f64>) -> (AlertLevel, Option<&'static str>) {
    let pm = predicted.unwrap_or(0.0);
    let escalation_allowed = pm >= ESCALATION_MAGNITUDE;

    if score >= CRITICAL_SCORE && escalation_allowed {
        (AlertLevel::Critical, Some("0-24h"))
    } else if score >= HIGH_SCORE && escalation_allowed {
        (AlertLevel::High, Some("24-72h"))
    } else if score >= MEDIUM_SCORE && escalation_allowed {
        (AlertLevel::Medium, Some("72-168h"))
    } else if score >= LOW_SCORE {
        (AlertLevel::Low, None)
    } else {
        (AlertLevel::Normal, None)
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::geo::FragilityMix;
    use crate::logic::scoring::ScoreMethod;

    const NOW: i64 = 1_700_000_000;

    fn istanbul() -> Region {
        Region {
            id: "istanbul".to_string(),
            name: "Istanbul".to_string(),
            lat: 41.0082,
            lon: 28.9784,
            fragility: FragilityMix { reinforced: 0.35, normal: 0.50, weak: 0.15 },
        }
    }

    fn evaluator() -> RegionEvaluator {
        RegionEvaluator::new(ScorerStack::heuristic_only(), AnomalyDetector::new(), 200.0, 168)
    }

    fn event(mag: f64, lat: f64, lon: f64, age_secs: i64) -> SeismicEvent {
        SeismicEvent::new(mag, lat, lon, NOW - age_secs).with_depth(8.0)
    }

    #[test]
    fn test_rejects_bad_coordinates() {
        let mut region = istanbul();
        region.lat = 120.0;
        let err = evaluator().evaluate(&region, &[], NOW).unwrap_err();
        assert_eq!(err.field, "lat");
    }

    #[test]
    fn test_no_nearby_events_is_normal() {
        // Activity near Van, ~1200 km from Istanbul
        let events = vec![event(5.5, 38.5, 43.4, 600)];
        let a = evaluator().evaluate(&istanbul(), &events, NOW).unwrap();
        assert_eq!(a.level, AlertLevel::Normal);
        assert_eq!(a.warning_score, 0.0);
        assert_eq!(a.event_count, 0);
        assert!(a.predicted_magnitude.is_none());
        // Risk still reflects the fault-proximity baseline
        assert_eq!(a.risk.method, ScoreMethod::Heuristic);
        assert!(a.risk.score > 0.0);
    }

    #[test]
    fn test_quiet_activity_stays_low_or_normal() {
        let events = vec![
            event(2.8, 40.9, 28.9, 7200),
            event(3.1, 40.8, 29.1, 14400),
        ];
        let a = evaluator().evaluate(&istanbul(), &events, NOW).unwrap();
        assert!(a.level <= AlertLevel::Low);
    }

    #[test]
    fn test_high_score_without_predicted_magnitude_caps_at_low() {
        // Small events ~25 km out: the proximity factor alone clears the
        // High threshold, but nothing predicts a 5.0 magnitude
        let events: Vec<SeismicEvent> = (0..5)
            .map(|i| event(3.0, 41.23, 28.98, 600 + i * 600))
            .collect();
        let a = evaluator().evaluate(&istanbul(), &events, NOW).unwrap();
        assert!(a.warning_score >= MEDIUM_SCORE, "got {}", a.warning_score);
        assert!(a.predicted_magnitude.is_none());
        assert_eq!(a.level, AlertLevel::Low);
    }

    #[test]
    fn test_escalates_when_magnitude_predicted() {
        // Rising swarm with a large event close to the city
        let mut events: Vec<SeismicEvent> = (0..30)
            .map(|i| event(3.0 + (i as f64) * 0.08, 41.05, 29.0, (30 - i) * 200))
            .collect();
        events.push(event(5.4, 41.05, 29.0, 100));

        let a = evaluator().evaluate(&istanbul(), &events, NOW).unwrap();
        assert!(a.predicted_magnitude.unwrap() >= 5.0);
        assert!(a.level >= AlertLevel::High, "got {:?}", a.level);
        assert!(a.time_horizon.is_some());
    }

    #[test]
    fn test_warning_score_capped_at_one() {
        let events: Vec<SeismicEvent> = (0..40)
            .map(|i| event(4.0 + (i as f64) * 0.05, 41.02, 28.99, 50 + i * 60))
            .collect();
        let a = evaluator().evaluate(&istanbul(), &events, NOW).unwrap();
        assert!(a.warning_score <= 1.0);
    }

    #[test]
    fn test_evaluate_all_covers_regions() {
        let regions = vec![istanbul()];
        let out = evaluator().evaluate_all(&regions, &[], NOW);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].region_id, "istanbul");
    }
}
