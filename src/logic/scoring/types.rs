//! Scoring Types - Results, Levels & Errors

use serde::{Deserialize, Serialize};

use crate::logic::features::FeatureVector;

use super::thresholds::RiskThresholds;

// ============================================================================
// RISK LEVEL
// ============================================================================

/// Qualitative band over the 0..10 risk score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    LowMedium,
    Medium,
    MediumHigh,
    High,
    VeryHigh,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::LowMedium => "low_medium",
            RiskLevel::Medium => "medium",
            RiskLevel::MediumHigh => "medium_high",
            RiskLevel::High => "high",
            RiskLevel::VeryHigh => "very_high",
        }
    }

    pub fn from_score(score: f64) -> Self {
        Self::from_score_with(score, &RiskThresholds::default())
    }

    pub fn from_score_with(score: f64, t: &RiskThresholds) -> Self {
        if score < t.low_max {
            RiskLevel::Low
        } else if score < t.low_medium_max {
            RiskLevel::LowMedium
        } else if score < t.medium_max {
            RiskLevel::Medium
        } else if score < t.medium_high_max {
            RiskLevel::MediumHigh
        } else if score < t.high_max {
            RiskLevel::High
        } else {
            RiskLevel::VeryHigh
        }
    }
}

// ============================================================================
// SCORE METHOD
// ============================================================================

/// Which path produced an assessment. `Fallback` means the ensemble was
/// configured but unavailable and the heuristic answered instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScoreMethod {
    Heuristic,
    Ensemble,
    Fallback,
}

impl ScoreMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScoreMethod::Heuristic => "heuristic",
            ScoreMethod::Ensemble => "ensemble",
            ScoreMethod::Fallback => "fallback",
        }
    }
}

// ============================================================================
// ASSESSMENT
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskAssessment {
    /// Clamped to [0, 10], never NaN.
    pub score: f64,
    pub level: RiskLevel,
    pub method: ScoreMethod,
    pub reasons: Vec<String>,
}

impl RiskAssessment {
    pub fn new(score: f64, method: ScoreMethod, reasons: Vec<String>) -> Self {
        let score = if score.is_nan() { 0.0 } else { score.clamp(0.0, 10.0) };
        Self {
            score,
            level: RiskLevel::from_score(score),
            method,
            reasons,
        }
    }

    pub fn with_method(mut self, method: ScoreMethod) -> Self {
        self.method = method;
        self
    }
}

// ============================================================================
// ANOMALY REPORT
// ============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnomalyReport {
    /// Additive factor score capped at 1.0.
    pub score: f64,
    pub detected: bool,
    pub high_count: bool,
    pub large_magnitude: bool,
    pub close_proximity: bool,
    pub rapid_sequence: bool,
    pub rising_trend: bool,
}

// ============================================================================
// ERRORS
// ============================================================================

#[derive(Debug, Clone)]
pub enum ScoreError {
    ArtifactMissing,
    ArtifactInvalid { message: String },
    ModelUnavailable { message: String },
}

impl std::fmt::Display for ScoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScoreError::ArtifactMissing => write!(f, "ensemble artifact not found"),
            ScoreError::ArtifactInvalid { message } => {
                write!(f, "ensemble artifact invalid: {}", message)
            }
            ScoreError::ModelUnavailable { message } => {
                write!(f, "model unavailable: {}", message)
            }
        }
    }
}

impl std::error::Error for ScoreError {}

// ============================================================================
// SCORER TRAIT
// ============================================================================

/// Capability seam for risk scorers. Injected wherever scoring happens;
/// nothing reaches for a global model.
pub trait Scorer: Send + Sync {
    fn name(&self) -> &'static str;
    fn score(&self, features: &FeatureVector) -> Result<RiskAssessment, ScoreError>;
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_ladder() {
        assert_eq!(RiskLevel::from_score(0.0), RiskLevel::Low);
        assert_eq!(RiskLevel::from_score(1.5), RiskLevel::LowMedium);
        assert_eq!(RiskLevel::from_score(2.5), RiskLevel::Medium);
        assert_eq!(RiskLevel::from_score(4.0), RiskLevel::MediumHigh);
        assert_eq!(RiskLevel::from_score(6.0), RiskLevel::High);
        assert_eq!(RiskLevel::from_score(7.5), RiskLevel::VeryHigh);
        assert_eq!(RiskLevel::from_score(10.0), RiskLevel::VeryHigh);
    }

    #[test]
    fn test_assessment_clamps() {
        let high = RiskAssessment::new(42.0, ScoreMethod::Heuristic, vec![]);
        assert_eq!(high.score, 10.0);
        assert_eq!(high.level, RiskLevel::VeryHigh);

        let negative = RiskAssessment::new(-3.0, ScoreMethod::Heuristic, vec![]);
        assert_eq!(negative.score, 0.0);
    }

    #[test]
    fn test_assessment_rejects_nan() {
        let nan = RiskAssessment::new(f64::NAN, ScoreMethod::Ensemble, vec![]);
        assert_eq!(nan.score, 0.0);
        assert_eq!(nan.level, RiskLevel::Low);
    }

    #[test]
    fn test_level_ordering() {
        assert!(RiskLevel::VeryHigh > RiskLevel::High);
        assert!(RiskLevel::Medium > RiskLevel::LowMedium);
    }
}
