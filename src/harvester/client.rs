use super::types::{CatalogRecord, parse_listing_page};
use crate::{Error, Result, config::HarvesterConfig};
use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

/// Remote catalog the harvester reads from.
#[async_trait]
pub trait CatalogApi: Send + Sync {
    /// Records on listing page `page`; empty once pagination is exhausted.
    async fn fetch_page(&self, page: u32) -> Result<Vec<CatalogRecord>>;

    async fn fetch_details(&self, appid: u64) -> Result<CatalogRecord>;
}

/// Client for the SteamSpy `api.php` endpoints.
pub struct SteamSpyClient {
    listing_url: String,
    detail_url: String,
    client: reqwest::Client,
}

impl SteamSpyClient {
    pub fn new(config: &HarvesterConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .build()?;

        Ok(Self {
            listing_url: config.listing_url.clone(),
            detail_url: config.detail_url.clone(),
            client,
        })
    }

    async fn get_json(&self, url: &str, query: &[(&str, String)]) -> Result<Value> {
        let response = self
            .client
            .get(url)
            .query(query)
            .send()
            .await?
            .error_for_status()?;
        let body = response.json::<Value>().await?;
        Ok(body)
    }
}

#[async_trait]
impl CatalogApi for SteamSpyClient {
    async fn fetch_page(&self, page: u32) -> Result<Vec<CatalogRecord>> {
        debug!("Requesting listing page {}", page);
        let body = self
            .get_json(
                &self.listing_url,
                &[("request", "all".to_string()), ("page", page.to_string())],
            )
            .await?;
        parse_listing_page(body)
    }

    async fn fetch_details(&self, appid: u64) -> Result<CatalogRecord> {
        debug!("Requesting details for appid {}", appid);
        let body = self
            .get_json(
                &self.detail_url,
                &[
                    ("request", "appdetails".to_string()),
                    ("appid", appid.to_string()),
                ],
            )
            .await?;
        CatalogRecord::from_value(body)
            .map_err(|e| Error::catalog(format!("appid {appid}: {e}")))
    }
}
