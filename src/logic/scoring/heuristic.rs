//! Heuristic Scorer - Additive Capped Risk Factors
//!
//! Always available; the ensemble falls back to this path. Each factor
//! contributes a bounded amount, the sum is clamped to [0, 10].

use crate::logic::features::FeatureVector;

use super::thresholds::{
    ladder_above, ladder_below, BASELINE_FLOOR, BASELINE_LADDER, COUNT_LADDER, COUNT_PER_EVENT,
    DEPTH_LADDER, DISTANCE_LADDER, FAULT_LADDER, LARGE_EVENT_LADDER, MAGNITUDE_LADDER,
    MAGNITUDE_PER_UNIT, MEAN_DISTANCE_NEAR_BONUS, MEAN_DISTANCE_NEAR_KM,
};
use super::types::{RiskAssessment, ScoreError, ScoreMethod, Scorer};

#[derive(Debug, Default, Clone)]
pub struct HeuristicScorer;

impl HeuristicScorer {
    pub fn new() -> Self {
        Self
    }

    /// Total scoring path; never fails.
    pub fn assess(&self, features: &FeatureVector) -> RiskAssessment {
        let count = features.value("event_count");
        let fault_distance = features.value("nearest_fault_distance");

        if count == 0.0 {
            return self.baseline(fault_distance);
        }

        let mut score = 0.0;
        let mut reasons = Vec::new();

        let max_mag = features.value("max_magnitude");
        match ladder_above(max_mag, MAGNITUDE_LADDER) {
            Some(c) => {
                score += c;
                reasons.push(format!("max magnitude {:.1}", max_mag));
            }
            None => score += max_mag * MAGNITUDE_PER_UNIT,
        }

        match ladder_above(count, COUNT_LADDER) {
            Some(c) => {
                score += c;
                reasons.push(format!("{} events in window", count as u64));
            }
            None => score += count * COUNT_PER_EVENT,
        }

        let min_distance = features.value("min_distance");
        let mean_distance = features.value("mean_distance");
        if let Some(c) = ladder_below(min_distance, DISTANCE_LADDER) {
            score += c;
            reasons.push(format!("nearest event {:.0} km away", min_distance));
        } else if mean_distance < MEAN_DISTANCE_NEAR_KM {
            score += MEAN_DISTANCE_NEAR_BONUS;
        }

        if let Some(c) = ladder_below(fault_distance, FAULT_LADDER) {
            score += c;
            reasons.push(format!("fault line {:.0} km away", fault_distance));
        }

        if let Some(c) = ladder_below(features.value("mean_depth"), DEPTH_LADDER) {
            score += c;
            reasons.push("shallow activity".to_string());
        }

        if let Some(c) = ladder_above(features.value("mag_above_4"), LARGE_EVENT_LADDER) {
            score += c;
            reasons.push(format!("{} events of M4+", features.value("mag_above_4") as u64));
        }

        RiskAssessment::new(score, ScoreMethod::Heuristic, reasons)
    }

    fn baseline(&self, fault_distance: f64) -> RiskAssessment {
        let score = ladder_below(fault_distance, BASELINE_LADDER).unwrap_or(BASELINE_FLOOR);
        RiskAssessment::new(
            score,
            ScoreMethod::Heuristic,
            vec![format!(
                "no recent activity, fault proximity baseline ({:.0} km)",
                fault_distance
            )],
        )
    }
}

impl Scorer for HeuristicScorer {
    fn name(&self) -> &'static str {
        "heuristic"
    }

    fn score(&self, features: &FeatureVector) -> Result<RiskAssessment, ScoreError> {
        Ok(self.assess(features))
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::scoring::types::RiskLevel;

    fn vector(pairs: &[(&str, f64)]) -> FeatureVector {
        let mut v = FeatureVector::new();
        for (name, value) in pairs {
            assert!(v.set_by_name(name, *value), "unknown feature {}", name);
        }
        v
    }

    #[test]
    fn test_baseline_near_fault() {
        let v = vector(&[("nearest_fault_distance", 15.0), ("min_distance", 300.0)]);
        let a = HeuristicScorer::new().assess(&v);
        assert_eq!(a.score, 3.5);
        assert_eq!(a.method, ScoreMethod::Heuristic);
    }

    #[test]
    fn test_baseline_far_from_fault() {
        let v = vector(&[("nearest_fault_distance", 250.0)]);
        let a = HeuristicScorer::new().assess(&v);
        assert_eq!(a.score, 1.0);
        assert_eq!(a.level, RiskLevel::Low);
    }

    #[test]
    fn test_quiet_region_scores_low() {
        let v = vector(&[
            ("event_count", 2.0),
            ("max_magnitude", 2.4),
            ("min_distance", 180.0),
            ("mean_distance", 200.0),
            ("mean_depth", 15.0),
            ("nearest_fault_distance", 120.0),
        ]);
        let a = HeuristicScorer::new().assess(&v);
        // 2.4*0.3 + 2*0.15 = 1.02
        assert!(a.score < 1.5, "got {}", a.score);
        assert_eq!(a.level, RiskLevel::Low);
    }

    #[test]
    fn test_dense_swarm_clamps_to_ten() {
        let v = vector(&[
            ("event_count", 60.0),
            ("max_magnitude", 6.2),
            ("min_distance", 8.0),
            ("mean_distance", 40.0),
            ("mean_depth", 4.0),
            ("mag_above_4", 6.0),
            ("nearest_fault_distance", 5.0),
        ]);
        let a = HeuristicScorer::new().assess(&v);
        assert_eq!(a.score, 10.0);
        assert_eq!(a.level, RiskLevel::VeryHigh);
        assert!(!a.reasons.is_empty());
    }

    #[test]
    fn test_moderate_activity_mid_band() {
        let v = vector(&[
            ("event_count", 12.0),
            ("max_magnitude", 4.1),
            ("min_distance", 60.0),
            ("mean_distance", 120.0),
            ("mean_depth", 12.0),
            ("mag_above_4", 1.0),
            ("nearest_fault_distance", 40.0),
        ]);
        let a = HeuristicScorer::new().assess(&v);
        // 1.2 + 1.5 + 0.5 + 0.8 + 0.3 = 4.3
        assert!((a.score - 4.3).abs() < 1e-9, "got {}", a.score);
        assert_eq!(a.level, RiskLevel::MediumHigh);
    }
}
