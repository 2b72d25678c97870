//! Load model artifacts from disk.
//!
//! Artifacts are two JSON files:
//!
//! - the linear model (`feature_names`, `coef`, `intercept`)
//! - the scaler (`kind` = `standard` | `min_max`, `feature_names`, parameters)
//!
//! Loading distinguishes three failures so the startup message is actionable:
//! the file is missing, the file is not valid JSON for the expected type, or
//! the content does not match the canonical feature schema.

use std::fmt;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;

use crate::error::{AppError, EXIT_ARTIFACT};
use crate::models::{Artifacts, LinearModel, Scaler};

pub const DEFAULT_MODEL_PATH: &str = "artifacts/lr_model.json";
pub const DEFAULT_SCALER_PATH: &str = "artifacts/scaler.json";

/// Which artifact an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactRole {
    Model,
    Scaler,
}

impl fmt::Display for ArtifactRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArtifactRole::Model => write!(f, "model"),
            ArtifactRole::Scaler => write!(f, "scaler"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ArtifactError {
    #[error("{role} artifact not found at '{}': {reason}", .path.display())]
    Missing {
        role: ArtifactRole,
        path: PathBuf,
        reason: String,
    },

    #[error("{role} artifact at '{}' is corrupt: {reason}", .path.display())]
    Corrupt {
        role: ArtifactRole,
        path: PathBuf,
        reason: String,
    },

    #[error("{role} artifact schema mismatch: {reason}")]
    SchemaMismatch { role: ArtifactRole, reason: String },
}

impl From<ArtifactError> for AppError {
    fn from(err: ArtifactError) -> Self {
        AppError::new(EXIT_ARTIFACT, err.to_string())
    }
}

/// Locations of the two artifact files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPaths {
    pub model: PathBuf,
    pub scaler: PathBuf,
}

impl Default for ArtifactPaths {
    fn default() -> Self {
        Self {
            model: PathBuf::from(DEFAULT_MODEL_PATH),
            scaler: PathBuf::from(DEFAULT_SCALER_PATH),
        }
    }
}

/// Load and schema-check both artifacts.
pub fn load_artifacts(paths: &ArtifactPaths) -> Result<Artifacts, ArtifactError> {
    let model: LinearModel = read_json(ArtifactRole::Model, &paths.model)?;
    let scaler: Scaler = read_json(ArtifactRole::Scaler, &paths.scaler)?;
    let artifacts = Artifacts {
        model,
        scaler,
        paths: paths.clone(),
    };
    artifacts.check_schema()?;

    tracing::info!(
        model = %paths.model.display(),
        scaler = %paths.scaler.display(),
        scaler_kind = artifacts.scaler.display_name(),
        "artifacts loaded"
    );

    Ok(artifacts)
}

fn read_json<T: DeserializeOwned>(role: ArtifactRole, path: &Path) -> Result<T, ArtifactError> {
    if path.is_dir() {
        return Err(ArtifactError::Missing {
            role,
            path: path.to_path_buf(),
            reason: "path is a directory".to_string(),
        });
    }

    let file = File::open(path).map_err(|e| ArtifactError::Missing {
        role,
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    serde_json::from_reader(BufReader::new(file)).map_err(|e| ArtifactError::Corrupt {
        role,
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::domain::RawForm;
    use crate::models::Predictor;
    use crate::models::predictor::tests::test_artifacts;
    use crate::preprocess::preprocess_form;

    /// Unique scratch directory under the system temp dir, removed on drop.
    struct ScratchDir(PathBuf);

    impl ScratchDir {
        fn new(name: &str) -> Self {
            let dir = std::env::temp_dir().join(format!(
                "ghg-predict-{name}-{}",
                std::process::id()
            ));
            std::fs::create_dir_all(&dir).unwrap();
            Self(dir)
        }
    }

    impl std::ops::Deref for ScratchDir {
        type Target = Path;

        fn deref(&self) -> &Path {
            &self.0
        }
    }

    impl Drop for ScratchDir {
        fn drop(&mut self) {
            let _ = std::fs::remove_dir_all(&self.0);
        }
    }

    fn write_fixture(dir: &Path) -> ArtifactPaths {
        let artifacts = test_artifacts();
        let paths = ArtifactPaths {
            model: dir.join("model.json"),
            scaler: dir.join("scaler.json"),
        };
        std::fs::write(&paths.model, serde_json::to_string(&artifacts.model).unwrap()).unwrap();
        std::fs::write(&paths.scaler, serde_json::to_string(&artifacts.scaler).unwrap()).unwrap();
        paths
    }

    #[test]
    fn loads_valid_artifacts() {
        let dir = ScratchDir::new("valid");
        let paths = write_fixture(&dir);
        let loaded = load_artifacts(&paths).unwrap();
        assert_eq!(loaded.model, test_artifacts().model);
        assert_eq!(loaded.paths, paths);
    }

    #[test]
    fn missing_file_is_reported_as_missing() {
        let dir = ScratchDir::new("missing");
        let paths = ArtifactPaths {
            model: dir.join("nope.json"),
            scaler: dir.join("nope-either.json"),
        };
        match load_artifacts(&paths) {
            Err(ArtifactError::Missing { role, .. }) => assert_eq!(role, ArtifactRole::Model),
            other => panic!("expected Missing, got {other:?}"),
        }
    }

    #[test]
    fn garbage_file_is_reported_as_corrupt() {
        let dir = ScratchDir::new("corrupt");
        let paths = write_fixture(&dir);
        std::fs::write(&paths.scaler, b"\x80\x04pickle").unwrap();
        match load_artifacts(&paths) {
            Err(ArtifactError::Corrupt { role, .. }) => assert_eq!(role, ArtifactRole::Scaler),
            other => panic!("expected Corrupt, got {other:?}"),
        }
    }

    #[test]
    fn reordered_features_are_a_schema_mismatch() {
        let dir = ScratchDir::new("schema");
        let paths = write_fixture(&dir);
        let mut model = test_artifacts().model;
        model.feature_names.swap(2, 3);
        std::fs::write(&paths.model, serde_json::to_string(&model).unwrap()).unwrap();

        let err = load_artifacts(&paths).unwrap_err();
        assert!(matches!(
            err,
            ArtifactError::SchemaMismatch {
                role: ArtifactRole::Model,
                ..
            }
        ));
        let app: AppError = err.into();
        assert_eq!(app.exit_code(), 3);
        assert!(app.to_string().contains("feature #2"));
    }

    #[test]
    fn shipped_artifacts_load_and_predict() {
        let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("artifacts");
        let artifacts = load_artifacts(&ArtifactPaths {
            model: dir.join("lr_model.json"),
            scaler: dir.join("scaler.json"),
        })
        .unwrap();
        assert_eq!(artifacts.scaler.display_name(), "standard");

        let form = RawForm {
            supply_wo_margin: 1.0,
            margin: 0.2,
            dq_reliability: 0.9,
            dq_temporal: 0.8,
            dq_geo: 0.85,
            dq_tech: 0.7,
            dq_data: 0.65,
            ..RawForm::default()
        };
        let features = preprocess_form(&form).unwrap();
        let out = Predictor::new(Arc::new(artifacts)).unwrap().predict(&features).unwrap();
        assert!(out.prediction.value.is_finite());
        assert_eq!(out.contributions.len(), 10);
    }
}
