use crate::{
    Error, Result,
    config::CollectorConfig,
    model::ModelInfo,
    predictor::{PredictionOutput, PredictionRequest},
    server::{API_PREFIX, ErrorResponse},
};
use serde::de::DeserializeOwned;
use tracing::debug;

/// HTTP client for the Predictor Service.
pub struct PredictorClient {
    base_url: String,
    client: reqwest::Client,
}

impl PredictorClient {
    pub fn new(config: &CollectorConfig) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(config.timeout()).build()?;
        Ok(Self {
            base_url: config.predictor_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}{}", self.base_url, API_PREFIX, path)
    }

    pub async fn predict(&self, request: &PredictionRequest) -> Result<PredictionOutput> {
        debug!("Submitting prediction request to {}", self.base_url);
        let response = self
            .client
            .post(self.url("/predict"))
            .json(request)
            .send()
            .await?;
        decode(response).await
    }

    pub async fn model_info(&self) -> Result<ModelInfo> {
        let response = self.client.get(self.url("/model")).send().await?;
        decode(response).await
    }
}

async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
    let status = response.status();
    if status.is_success() {
        return Ok(response.json::<T>().await?);
    }

    // Prefer the service's own error message over the bare status line.
    let message = match response.json::<ErrorResponse>().await {
        Ok(body) => body.error,
        Err(_) => status.canonical_reason().unwrap_or("unknown error").to_string(),
    };
    Err(Error::Upstream {
        status: status.as_u16(),
        message,
    })
}
