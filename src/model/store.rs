use super::{Classifier, load_classifier};
use crate::config::{LoadStrategy, ModelConfig};
use crate::{Error, Result};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, error, info};

enum Source {
    Loaded(Arc<dyn Classifier>),
    /// The startup load failed; every caller gets the same failure.
    Unavailable(String),
    PerRequest(PathBuf),
}

/// Owns access to the model artifact for the lifetime of the server.
pub struct ModelStore {
    source: Source,
}

impl ModelStore {
    /// Builds the store according to `config.load`. A failed startup load is
    /// logged and remembered rather than aborting the process.
    pub fn open(config: &ModelConfig) -> Self {
        match config.load {
            LoadStrategy::Startup => match load_classifier(&config.path) {
                Ok(classifier) => {
                    info!("Model loaded from {}", config.path.display());
                    Self::from_classifier(classifier)
                }
                Err(e) => {
                    error!("Model unavailable, predictions will fail: {}", e);
                    Self::unavailable(e.to_string())
                }
            },
            LoadStrategy::PerRequest => {
                info!(
                    "Model will be read from {} on every request",
                    config.path.display()
                );
                Self {
                    source: Source::PerRequest(config.path.clone()),
                }
            }
        }
    }

    pub fn from_classifier(classifier: Arc<dyn Classifier>) -> Self {
        Self {
            source: Source::Loaded(classifier),
        }
    }

    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self {
            source: Source::Unavailable(reason.into()),
        }
    }

    pub async fn get(&self) -> Result<Arc<dyn Classifier>> {
        match &self.source {
            Source::Loaded(classifier) => Ok(Arc::clone(classifier)),
            Source::Unavailable(reason) => Err(Error::model(reason.clone())),
            Source::PerRequest(path) => {
                debug!("Reading model artifact {}", path.display());
                let path = path.clone();
                tokio::task::spawn_blocking(move || load_classifier(path))
                    .await
                    .map_err(|e| Error::internal(format!("model load task failed: {e}")))?
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn config(path: &Path, load: LoadStrategy) -> ModelConfig {
        ModelConfig {
            path: path.to_path_buf(),
            load,
        }
    }

    #[tokio::test]
    async fn test_missing_artifact_fails_every_call() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.json");
        let store = ModelStore::open(&config(&path, LoadStrategy::Startup));

        for _ in 0..3 {
            let err = store.get().await.err().unwrap();
            assert!(matches!(err, Error::Model(_)));
        }
    }

    #[tokio::test]
    async fn test_per_request_picks_up_new_artifact() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.json");
        let store = ModelStore::open(&config(&path, LoadStrategy::PerRequest));

        assert!(store.get().await.is_err());

        std::fs::write(
            &path,
            r#"{
                "classes": [0, 1],
                "features": {},
                "booster": { "objective": "binary:logistic", "trees": [] }
            }"#,
        )
        .unwrap();

        let classifier = store.get().await.unwrap();
        assert_eq!(classifier.classes(), &[0, 1]);
    }
}
