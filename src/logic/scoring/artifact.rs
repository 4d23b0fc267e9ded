//! Ensemble Artifact - Versioned Model Storage
//!
//! The trained ensemble ships as a tagged JSON document. Loading checks the
//! schema version, the feature layout it was trained against, and a sha256
//! checksum over the model payload. Anything off rejects the artifact; the
//! scorer stack then answers with the heuristic fallback.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::logic::features::{layout_hash, FEATURE_COUNT, FEATURE_VERSION};

use super::types::ScoreError;

/// Artifact schema version. Bump on any structural change; older documents
/// are rejected, not sniffed.
pub const ARTIFACT_SCHEMA_VERSION: u32 = 1;

const ARTIFACT_FILE_NAME: &str = "ensemble.json";

// ============================================================================
// ARTIFACT
// ============================================================================

/// One linear sub-model of the ensemble.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinearModel {
    pub name: String,
    /// Blend weight; the three production models carry 0.40 / 0.35 / 0.25.
    pub weight: f64,
    pub bias: f64,
    pub coefficients: Vec<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnsembleArtifact {
    pub schema_version: u32,
    pub created_at: i64,
    pub feature_version: u8,
    pub layout_hash: u32,
    pub models: Vec<LinearModel>,
    /// sha256 over the serialized `models` array, hex encoded.
    pub checksum: String,
}

impl EnsembleArtifact {
    pub fn new(models: Vec<LinearModel>, created_at: i64) -> Self {
        let checksum = Self::compute_checksum(&models);
        Self {
            schema_version: ARTIFACT_SCHEMA_VERSION,
            created_at,
            feature_version: FEATURE_VERSION,
            layout_hash: layout_hash(),
            models,
            checksum,
        }
    }

    pub fn compute_checksum(models: &[LinearModel]) -> String {
        let payload = serde_json::to_vec(models).unwrap_or_default();
        let mut hasher = Sha256::new();
        hasher.update(&payload);
        hex::encode(hasher.finalize())
    }

    pub fn validate(&self) -> Result<(), ScoreError> {
        if self.schema_version != ARTIFACT_SCHEMA_VERSION {
            return Err(ScoreError::ArtifactInvalid {
                message: format!(
                    "unsupported schema version {} (expected {})",
                    self.schema_version, ARTIFACT_SCHEMA_VERSION
                ),
            });
        }
        if self.feature_version != FEATURE_VERSION || self.layout_hash != layout_hash() {
            return Err(ScoreError::ArtifactInvalid {
                message: format!(
                    "feature layout mismatch: artifact v{}/{:08x}, runtime v{}/{:08x}",
                    self.feature_version,
                    self.layout_hash,
                    FEATURE_VERSION,
                    layout_hash()
                ),
            });
        }
        if self.models.is_empty() {
            return Err(ScoreError::ArtifactInvalid {
                message: "artifact carries no models".to_string(),
            });
        }
        for model in &self.models {
            if model.coefficients.len() != FEATURE_COUNT {
                return Err(ScoreError::ArtifactInvalid {
                    message: format!(
                        "model '{}' has {} coefficients (expected {})",
                        model.name,
                        model.coefficients.len(),
                        FEATURE_COUNT
                    ),
                });
            }
        }
        if self.checksum != Self::compute_checksum(&self.models) {
            return Err(ScoreError::ArtifactInvalid {
                message: "checksum mismatch".to_string(),
            });
        }
        Ok(())
    }
}

// ============================================================================
// ARTIFACT STORE
// ============================================================================

/// Where ensemble artifacts live. Injected so tests and tooling can swap
/// the filesystem out.
pub trait ArtifactStore: Send + Sync {
    fn load(&self) -> Result<EnsembleArtifact, ScoreError>;
    fn save(&self, artifact: &EnsembleArtifact) -> Result<(), ScoreError>;
}

pub struct FsArtifactStore {
    path: PathBuf,
}

impl FsArtifactStore {
    pub fn new(dir: &Path) -> Self {
        Self { path: dir.join(ARTIFACT_FILE_NAME) }
    }

    /// Default location under the platform data dir.
    pub fn default_location() -> Self {
        let dir = dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("QuakeWatch")
            .join("models");
        Self { path: dir.join(ARTIFACT_FILE_NAME) }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ArtifactStore for FsArtifactStore {
    fn load(&self) -> Result<EnsembleArtifact, ScoreError> {
        if !self.path.exists() {
            return Err(ScoreError::ArtifactMissing);
        }
        let raw = fs::read_to_string(&self.path).map_err(|e| ScoreError::ArtifactInvalid {
            message: format!("read failed: {}", e),
        })?;
        let artifact: EnsembleArtifact =
            serde_json::from_str(&raw).map_err(|e| ScoreError::ArtifactInvalid {
                message: format!("parse failed: {}", e),
            })?;
        artifact.validate()?;
        Ok(artifact)
    }

    fn save(&self, artifact: &EnsembleArtifact) -> Result<(), ScoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| ScoreError::ArtifactInvalid {
                message: format!("create dir failed: {}", e),
            })?;
        }
        let raw = serde_json::to_string_pretty(artifact).map_err(|e| {
            ScoreError::ArtifactInvalid { message: format!("serialize failed: {}", e) }
        })?;
        fs::write(&self.path, raw).map_err(|e| ScoreError::ArtifactInvalid {
            message: format!("write failed: {}", e),
        })
    }
}

// ============================================================================
// TEST SUPPORT
// ============================================================================

#[cfg(test)]
pub(crate) fn sample_artifact() -> EnsembleArtifact {
    let models = vec![
        LinearModel {
            name: "rf".to_string(),
            weight: 0.40,
            bias: 0.5,
            coefficients: vec![0.01; FEATURE_COUNT],
        },
        LinearModel {
            name: "xgb".to_string(),
            weight: 0.35,
            bias: 0.4,
            coefficients: vec![0.02; FEATURE_COUNT],
        },
        LinearModel {
            name: "lgb".to_string(),
            weight: 0.25,
            bias: 0.3,
            coefficients: vec![0.015; FEATURE_COUNT],
        },
    ];
    EnsembleArtifact::new(models, 1_700_000_000)
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_artifact_passes() {
        assert!(sample_artifact().validate().is_ok());
    }

    #[test]
    fn test_wrong_schema_version_rejected() {
        let mut artifact = sample_artifact();
        artifact.schema_version = ARTIFACT_SCHEMA_VERSION + 1;
        assert!(matches!(artifact.validate(), Err(ScoreError::ArtifactInvalid { .. })));
    }

    #[test]
    fn test_layout_mismatch_rejected() {
        let mut artifact = sample_artifact();
        artifact.layout_hash ^= 1;
        assert!(artifact.validate().is_err());
    }

    #[test]
    fn test_tampered_models_fail_checksum() {
        let mut artifact = sample_artifact();
        artifact.models[0].bias = 99.0;
        assert!(matches!(artifact.validate(), Err(ScoreError::ArtifactInvalid { message }) if message.contains("checksum")));
    }

    #[test]
    fn test_wrong_coefficient_count_rejected() {
        let mut artifact = sample_artifact();
        artifact.models[0].coefficients.pop();
        artifact.checksum = EnsembleArtifact::compute_checksum(&artifact.models);
        assert!(artifact.validate().is_err());
    }

    #[test]
    fn test_fs_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsArtifactStore::new(dir.path());

        assert!(matches!(store.load(), Err(ScoreError::ArtifactMissing)));

        let artifact = sample_artifact();
        store.save(&artifact).unwrap();

        let loaded = store.load().unwrap();
        assert_eq!(loaded.models.len(), 3);
        assert_eq!(loaded.checksum, artifact.checksum);
    }

    #[test]
    fn test_fs_store_rejects_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsArtifactStore::new(dir.path());
        fs::create_dir_all(dir.path()).unwrap();
        fs::write(store.path(), "not json").unwrap();

        assert!(matches!(store.load(), Err(ScoreError::ArtifactInvalid { .. })));
    }
}
