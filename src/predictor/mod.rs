mod types;

pub use types::*;

use crate::model::{FeatureFrame, ModelInfo, ModelStore};
use crate::{Error, Result};
use std::sync::Arc;
use tracing::debug;

/// Answers prediction requests against the model held by a [`ModelStore`].
#[derive(Clone)]
pub struct Predictor {
    store: Arc<ModelStore>,
}

impl Predictor {
    pub fn new(store: ModelStore) -> Self {
        Self {
            store: Arc::new(store),
        }
    }

    pub async fn predict(&self, request: &PredictionRequest) -> Result<PredictionOutput> {
        request.validate()?;

        let frame = FeatureFrame::single(request);
        let model = self.store.get().await?;

        let target = model
            .predict(&frame)?
            .into_iter()
            .next()
            .ok_or_else(|| Error::inference("model returned no class for the row"))?;
        let probability = model
            .predict_proba(&frame)?
            .into_iter()
            .next()
            .ok_or_else(|| Error::inference("model returned no probabilities for the row"))?;

        if probability.len() != model.classes().len() {
            return Err(Error::inference(format!(
                "model returned {} probabilities for {} classes",
                probability.len(),
                model.classes().len()
            )));
        }

        debug!("Predicted class {} with probabilities {:?}", target, probability);

        Ok(PredictionOutput {
            target,
            probability,
        })
    }

    pub async fn info(&self) -> Result<ModelInfo> {
        Ok(self.store.get().await?.info())
    }
}
