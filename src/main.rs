//! # Mars Scrape
//!
//! Scrapes a handful of static pages about Mars into one flat record: the
//! latest news headline and teaser, the featured full-size image, a
//! Mars/Earth facts table, and the four hemisphere images.
//!
//! ## Usage
//!
//! ```sh
//! mars_scrape -o ./records
//! ```
//!
//! ## Architecture
//!
//! One linear pass, no concurrency and no retries:
//! 1. **News**: read the first entry of the news listing (browser)
//! 2. **Featured image**: click "FULL IMAGE" and read the revealed image (browser)
//! 3. **Facts**: fetch the facts page and re-render its first table (HTTP)
//! 4. **Hemispheres**: click through four thumbnails, going back after each (browser)
//! 5. **Output**: store the record as JSON, or print it

use clap::Parser;
use std::error::Error;
use tracing::{debug, error, info, instrument};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod browser;
mod cli;
mod config;
mod mars_scrape;
mod models;
mod outputs;
mod scrapers;
mod utils;

use cli::Cli;
use config::{BrowserSettings, load_site_config};
use mars_scrape::ScrapeContext;
use outputs::json::JsonStore;
use utils::ensure_writable_dir;

#[tokio::main]
#[instrument]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("mars_scrape starting up");

    // Parse CLI
    let args = Cli::parse();
    debug!(?args, "Parsed CLI arguments");

    let store = args.output_dir.as_deref().map(JsonStore::new);

    if args.list {
        let Some(store) = store else {
            return Err("--list requires --output-dir".into());
        };
        let records = store.find_all().await?;
        println!("{}", serde_json::to_string_pretty(&records)?);
        return Ok(());
    }

    // Early check: ensure the record store is writable before launching a browser
    if let Some(dir) = args.output_dir.as_deref() {
        if let Err(e) = ensure_writable_dir(dir).await {
            error!(
                path = %dir,
                error = %e,
                "Output directory is not writable (fix perms or choose a different path)"
            );
            return Err(e);
        }
    }

    // ---- Load configuration ----
    let sites = load_site_config(args.config.as_deref()).await?;
    let browser = BrowserSettings {
        chrome_path: args.chrome_path.clone(),
        headless: !args.headful,
    };
    let ctx = ScrapeContext::new(sites, browser);

    // ---- Scrape ----
    let record = match mars_scrape::scrape(&ctx).await {
        Ok(record) => record,
        Err(e) => {
            error!(error = %e, "Scrape failed");
            return Err(e);
        }
    };

    // ---- Output ----
    match store {
        Some(store) => {
            let path = store.insert_one(&record).await?;
            info!(path = %path.display(), "Record stored");
        }
        None => println!("{}", serde_json::to_string_pretty(&record)?),
    }

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        secs = elapsed.as_secs(),
        millis = elapsed.subsec_millis(),
        "Execution complete"
    );

    Ok(())
}
