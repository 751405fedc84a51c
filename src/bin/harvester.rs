use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use steam_predictor::{
    config,
    harvester::{Harvester, ListingStop},
    logging::{self, LogFormat},
};
use tracing::{info, warn};

/// Scrape SteamSpy into steam.csv and steamspy_appdetails.csv.
#[derive(Parser, Debug)]
#[command(name = "harvester", about = "Build the training dataset from the SteamSpy API")]
struct Args {
    /// Number of listing pages to request at most
    #[arg(long)]
    max_pages: Option<u32>,

    /// Where to write the listing records
    #[arg(long)]
    listing_output: Option<PathBuf>,

    /// Where to write the detail records
    #[arg(long)]
    details_output: Option<PathBuf>,

    /// Milliseconds to wait between listing pages
    #[arg(long)]
    page_delay_ms: Option<u64>,

    /// Milliseconds to wait between detail requests
    #[arg(long)]
    detail_delay_ms: Option<u64>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let mut config = config::load().await.context("Failed to load configuration")?;
    logging::init(&config.server.logs.level, LogFormat::Json)?;

    let harvest = &mut config.harvester;
    if let Some(max_pages) = args.max_pages {
        harvest.max_pages = max_pages;
    }
    if let Some(path) = args.listing_output {
        harvest.listing_output = path;
    }
    if let Some(path) = args.details_output {
        harvest.details_output = path;
    }
    if let Some(ms) = args.page_delay_ms {
        harvest.page_delay_ms = ms;
    }
    if let Some(ms) = args.detail_delay_ms {
        harvest.detail_delay_ms = ms;
    }

    let harvester = Harvester::from_config(&config.harvester)?;
    let report = harvester.run().await;

    if let ListingStop::Failed { page, error } = &report.listing.stop {
        warn!("Listing stopped early at page {}: {}", page, error);
    }

    report
        .save(&config.harvester)
        .context("Failed to write harvested records")?;

    info!(
        "Harvest finished: {} games listed, {} details saved, {} skipped",
        report.listing.records.len(),
        report.details.records.len(),
        report.details.skipped.len()
    );

    Ok(())
}
