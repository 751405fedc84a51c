mod artifact;
mod booster;
mod frame;
mod store;

pub use artifact::{BoosterSpec, FeatureSpec, ModelArtifact, NodeSpec, Objective, TreeSpec};
pub use booster::GradientBoostedClassifier;
pub use frame::{COLUMNS, FeatureFrame, FeatureRow};
pub use store::ModelStore;

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;

/// A pre-fit classifier over the five game attributes.
pub trait Classifier: Send + Sync {
    /// Class labels, in the order probabilities are reported.
    fn classes(&self) -> &[i64];

    /// One probability vector per frame row, aligned with [`Classifier::classes`].
    fn predict_proba(&self, frame: &FeatureFrame) -> Result<Vec<Vec<f64>>>;

    fn info(&self) -> ModelInfo;

    /// Label of the most probable class for each row.
    fn predict(&self, frame: &FeatureFrame) -> Result<Vec<i64>> {
        let classes = self.classes();
        self.predict_proba(frame)?
            .iter()
            .map(|row| {
                let idx = argmax(row)?;
                classes.get(idx).copied().ok_or_else(|| {
                    Error::inference(format!(
                        "probability index {idx} has no class label ({} classes)",
                        classes.len()
                    ))
                })
            })
            .collect()
    }
}

/// Description of the loaded model, served by the metadata endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelInfo {
    pub classes: Vec<i64>,
    #[serde(default)]
    pub class_names: Vec<String>,
    pub objective: String,
    pub n_trees: usize,
    pub n_features: usize,
}

/// Reads, validates and prepares the artifact at `path`.
pub fn load_classifier(path: impl AsRef<Path>) -> Result<Arc<dyn Classifier>> {
    let artifact = ModelArtifact::load(path)?;
    let classifier = GradientBoostedClassifier::from_artifact(artifact)?;
    Ok(Arc::new(classifier))
}

/// Index of the first maximum, matching numpy's `argmax`.
pub fn argmax(values: &[f64]) -> Result<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, &value) in values.iter().enumerate() {
        if value.is_nan() {
            return Err(Error::inference(format!("NaN probability at index {i}")));
        }
        match best {
            Some((_, current)) if value <= current => {}
            _ => best = Some((i, value)),
        }
    }
    best.map(|(i, _)| i)
        .ok_or_else(|| Error::inference("empty probability vector"))
}
