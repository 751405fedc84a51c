mod client;
pub mod form;
pub mod report;

pub use client::PredictorClient;
pub use form::FormValues;

use crate::{Error, Result, config::CollectorConfig, predictor::PredictionOutput};
use tracing::{info, warn};

/// Submits form values to the Predictor Service and extracts the probability
/// of the configured positive class.
pub struct Collector {
    client: PredictorClient,
    positive_class: i64,
}

impl Collector {
    pub fn new(config: &CollectorConfig) -> Result<Self> {
        Ok(Self {
            client: PredictorClient::new(config)?,
            positive_class: config.positive_class,
        })
    }

    pub async fn submit(&self, values: &FormValues) -> Result<f64> {
        let request = values.to_request();
        let output = self.client.predict(&request).await?;
        info!("Predicted class {}", output.target);

        let classes = match self.client.model_info().await {
            Ok(info) => Some(info.classes),
            Err(e) => {
                warn!("Model metadata unavailable, assuming labels equal indices: {}", e);
                None
            }
        };

        positive_probability(&output, classes.as_deref(), self.positive_class)
    }

    /// Never fails: errors become the inline message shown in place of the metric.
    pub async fn submit_for_display(
        &self,
        values: &FormValues,
    ) -> std::result::Result<f64, String> {
        self.submit(values).await.map_err(|e| e.to_string())
    }
}

/// Probability of class `label`, located through the model's class list when known.
pub fn positive_probability(
    output: &PredictionOutput,
    classes: Option<&[i64]>,
    label: i64,
) -> Result<f64> {
    let index = match classes {
        Some(classes) => classes.iter().position(|c| *c == label).ok_or_else(|| {
            Error::config(format!("class {label} is not among model classes {classes:?}"))
        })?,
        None => usize::try_from(label)
            .map_err(|_| Error::config(format!("class {label} cannot be used as an index")))?,
    };

    output.probability.get(index).copied().ok_or_else(|| {
        Error::model(format!(
            "no probability for class {label} (response has {} entries)",
            output.probability.len()
        ))
    })
}
