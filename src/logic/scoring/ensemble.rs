//! Ensemble Scorer - Weighted Linear Blend With Fallback
//!
//! Blends the artifact's sub-models by their weights. The `ScorerStack`
//! wraps it with the heuristic: any ensemble failure, from a missing
//! artifact at startup to an incompatible vector at runtime, degrades to
//! the heuristic result tagged `Fallback`. Scoring never errors out to the
//! caller.

use crate::logic::features::FeatureVector;

use super::artifact::{ArtifactStore, EnsembleArtifact};
use super::heuristic::HeuristicScorer;
use super::types::{RiskAssessment, ScoreError, ScoreMethod, Scorer};

// ============================================================================
// ENSEMBLE
// ============================================================================

pub struct EnsembleScorer {
    artifact: EnsembleArtifact,
}

impl EnsembleScorer {
    /// Load and validate from a store.
    pub fn load(store: &dyn ArtifactStore) -> Result<Self, ScoreError> {
        let artifact = store.load()?;
        log::info!(
            "Ensemble artifact loaded: {} models, trained at {}",
            artifact.models.len(),
            artifact.created_at
        );
        Ok(Self { artifact })
    }

    pub fn from_artifact(artifact: EnsembleArtifact) -> Result<Self, ScoreError> {
        artifact.validate()?;
        Ok(Self { artifact })
    }

    fn blend(&self, features: &FeatureVector) -> f64 {
        self.artifact
            .models
            .iter()
            .map(|m| {
                let dot: f64 = m
                    .coefficients
                    .iter()
                    .zip(features.as_slice())
                    .map(|(c, v)| c * v)
                    .sum();
                m.weight * (m.bias + dot)
            })
            .sum()
    }
}

impl Scorer for EnsembleScorer {
    fn name(&self) -> &'static str {
        "ensemble"
    }

    fn score(&self, features: &FeatureVector) -> Result<RiskAssessment, ScoreError> {
        features.validate().map_err(|e| ScoreError::ModelUnavailable { message: e.to_string() })?;

        let score = self.blend(features);
        Ok(RiskAssessment::new(
            score,
            ScoreMethod::Ensemble,
            vec![format!("{}-model ensemble blend", self.artifact.models.len())],
        ))
    }
}

// ============================================================================
// SCORER STACK
// ============================================================================

/// Ensemble-first scoring with a total heuristic floor.
pub struct ScorerStack {
    ensemble: Option<EnsembleScorer>,
    ensemble_expected: bool,
    heuristic: HeuristicScorer,
}

impl ScorerStack {
    /// Try the artifact store; run heuristic-with-fallback-tag when the
    /// ensemble cannot be loaded.
    pub fn from_store(store: &dyn ArtifactStore) -> Self {
        match EnsembleScorer::load(store) {
            Ok(ensemble) => Self {
                ensemble: Some(ensemble),
                ensemble_expected: true,
                heuristic: HeuristicScorer::new(),
            },
            Err(e) => {
                log::debug!("Ensemble unavailable ({}), using heuristic fallback", e);
                Self {
                    ensemble: None,
                    ensemble_expected: true,
                    heuristic: HeuristicScorer::new(),
                }
            }
        }
    }

    /// Heuristic-only configuration (no ensemble expected).
    pub fn heuristic_only() -> Self {
        Self {
            ensemble: None,
            ensemble_expected: false,
            heuristic: HeuristicScorer::new(),
        }
    }

    pub fn has_ensemble(&self) -> bool {
        self.ensemble.is_some()
    }

    /// Total scoring: always produces an assessment.
    pub fn assess(&self, features: &FeatureVector) -> RiskAssessment {
        if let Some(ensemble) = &self.ensemble {
            match ensemble.score(features) {
                Ok(assessment) => return assessment,
                Err(e) => log::debug!("Ensemble scoring failed ({}), using fallback", e),
            }
        }

        let assessment = self.heuristic.assess(features);
        if self.ensemble_expected {
            assessment.with_method(ScoreMethod::Fallback)
        } else {
            assessment
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
