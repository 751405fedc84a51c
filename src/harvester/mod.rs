//! Two-phase scrape of the SteamSpy catalog.
//!
//! The listing phase walks `request=all` pages and is all-or-nothing past the
//! first failure: a broken page ends the phase, keeping what was already
//! collected. The detail phase enriches each listed game and skips games whose
//! request fails. Requests are paced with fixed delays and never retried.

mod client;
mod output;
mod types;

pub use client::{CatalogApi, SteamSpyClient};
pub use output::{columns, save_records, write_records};
pub use types::{CatalogRecord, parse_listing_page};

use crate::{Error, Result, config::HarvesterConfig};
use std::time::Duration;
use tracing::{error, info, warn};

/// Why the listing phase stopped.
#[derive(Debug, Clone, PartialEq)]
pub enum ListingStop {
    /// A page came back empty; pagination is over.
    Exhausted { page: u32 },
    /// Every configured page was fetched.
    MaxPages,
    /// A page failed and the phase was aborted.
    Failed { page: u32, error: String },
}

#[derive(Debug, Clone)]
pub struct ListingOutcome {
    pub records: Vec<CatalogRecord>,
    pub pages_fetched: u32,
    pub stop: ListingStop,
}

/// A listed game whose detail request failed.
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedItem {
    pub index: usize,
    pub appid: u64,
    pub error: String,
}

#[derive(Debug, Clone)]
pub struct DetailOutcome {
    pub records: Vec<CatalogRecord>,
    pub skipped: Vec<SkippedItem>,
    /// Listed games without an appid; no request was made for them.
    pub missing_appid: usize,
}

#[derive(Debug, Clone)]
pub struct HarvestReport {
    pub listing: ListingOutcome,
    pub details: DetailOutcome,
}

pub struct Harvester {
    api: Box<dyn CatalogApi>,
    max_pages: u32,
    page_delay: Duration,
    detail_delay: Duration,
    progress_every: usize,
}

impl Harvester {
    pub fn new(api: Box<dyn CatalogApi>, config: &HarvesterConfig) -> Self {
        Self {
            api,
            max_pages: config.max_pages,
            page_delay: config.page_delay(),
            detail_delay: config.detail_delay(),
            progress_every: config.progress_every.max(1),
        }
    }

    pub fn from_config(config: &HarvesterConfig) -> Result<Self> {
        let api = SteamSpyClient::new(config)?;
        Ok(Self::new(Box::new(api), config))
    }

    pub async fn fetch_listings(&self) -> ListingOutcome {
        let mut records = Vec::new();
        let mut pages_fetched = 0;

        for page in 0..self.max_pages {
            if page > 0 {
                tokio::time::sleep(self.page_delay).await;
            }

            match self.api.fetch_page(page).await {
                Ok(batch) if batch.is_empty() => {
                    info!("Page {} is empty, listing complete", page);
                    return ListingOutcome {
                        records,
                        pages_fetched,
                        stop: ListingStop::Exhausted { page },
                    };
                }
                Ok(batch) => {
                    records.extend(batch);
                    pages_fetched += 1;
                    info!("Fetched page {}: {} total games", page + 1, records.len());
                }
                Err(e) => {
                    error!("Error on page {}: {}", page, e);
                    return ListingOutcome {
                        records,
                        pages_fetched,
                        stop: ListingStop::Failed {
                            page,
                            error: e.to_string(),
                        },
                    };
                }
            }
        }

        ListingOutcome {
            records,
            pages_fetched,
            stop: ListingStop::MaxPages,
        }
    }

    pub async fn fetch_details(&self, games: &[CatalogRecord]) -> DetailOutcome {
        let mut records = Vec::new();
        let mut skipped = Vec::new();
        let mut missing_appid = 0;
        let mut requested = false;

        for (index, game) in games.iter().enumerate() {
            let Some(appid) = game.appid() else {
                missing_appid += 1;
                continue;
            };

            if requested {
                tokio::time::sleep(self.detail_delay).await;
            }
            requested = true;

            match self.fetch_one(appid).await {
                Ok(record) => records.push(record),
                Err(e) => {
                    warn!("Error on game {} (appid {}): {}", index, appid, e);
                    skipped.push(SkippedItem {
                        index,
                        appid,
                        error: e.to_string(),
                    });
                }
            }

            if (index + 1) % self.progress_every == 0 {
                info!("Fetched details for {}/{} games", index + 1, games.len());
            }
        }

        DetailOutcome {
            records,
            skipped,
            missing_appid,
        }
    }

    async fn fetch_one(&self, appid: u64) -> Result<CatalogRecord> {
        let mut record = self.api.fetch_details(appid).await?;
        record
            .normalize_tags()
            .map_err(|e| Error::catalog(format!("appid {appid}: {e}")))?;
        Ok(record)
    }

    /// Runs both phases. Nothing is persisted here; callers save the report.
    pub async fn run(&self) -> HarvestReport {
        info!("Step 1: Fetching all game pages...");
        let listing = self.fetch_listings().await;
        info!("Found {} games", listing.records.len());

        info!("Step 2: Fetching tags and genres...");
        let details = self.fetch_details(&listing.records).await;
        info!(
            "Fetched details for {} games ({} skipped, {} without appid)",
            details.records.len(),
            details.skipped.len(),
            details.missing_appid
        );

        HarvestReport { listing, details }
    }
}

impl HarvestReport {
    pub fn save(&self, config: &HarvesterConfig) -> Result<()> {
        save_records(&config.listing_output, &self.listing.records)?;
        save_records(&config.details_output, &self.details.records)?;
        Ok(())
    }
}
