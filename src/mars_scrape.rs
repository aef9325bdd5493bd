//! One full scrape pass over all Mars pages.
//!
//! [`scrape`] launches a browser, runs every page scraper in a fixed order,
//! and assembles the results into a [`MarsRecord`]. Steps run one after the
//! other against the same browser tab; nothing is retried.

use crate::browser::BrowserSession;
use crate::browser::chrome::ChromeSession;
use crate::config::{BrowserSettings, SiteConfig};
use crate::models::MarsRecord;
use crate::scrapers::{facts, featured_image, hemispheres, news};
use chrono::Local;
use reqwest::Client;
use std::error::Error;
use std::time::Instant;
use tracing::{info, instrument, warn};

/// Everything a scrape needs, constructed once by the caller.
#[derive(Debug, Clone)]
pub struct ScrapeContext {
    /// Client used for pages fetched without the browser.
    pub client: Client,
    pub sites: SiteConfig,
    pub browser: BrowserSettings,
}

impl ScrapeContext {
    pub fn new(sites: SiteConfig, browser: BrowserSettings) -> Self {
        Self {
            client: Client::new(),
            sites,
            browser,
        }
    }
}

/// Launch a browser, scrape every page, and close the browser.
///
/// The browser is closed before any scrape error is returned.
#[instrument(level = "info", skip_all)]
pub async fn scrape(ctx: &ScrapeContext) -> Result<MarsRecord, Box<dyn Error>> {
    let mut session = ChromeSession::launch(&ctx.browser).await?;
    let record = scrape_with(&mut session, ctx).await;
    if let Err(e) = session.quit().await {
        warn!(error = %e, "Failed to close browser");
    }
    record
}

/// Scrape every page using an already open `session`.
pub async fn scrape_with<S: BrowserSession>(
    session: &mut S,
    ctx: &ScrapeContext,
) -> Result<MarsRecord, Box<dyn Error>> {
    let t0 = Instant::now();
    let sites = &ctx.sites;

    let (news_title, news_paragraph) = news::mars_news(session, &sites.news_url).await?;
    let featured_image = featured_image::featured_image(
        session,
        &sites.featured_image_url,
        &sites.featured_image_base,
    )
    .await?;
    let facts = facts::mars_facts(&ctx.client, &sites.facts_url).await;
    let hemispheres = hemispheres::hemispheres(session, &sites.hemispheres_url).await?;

    let record = MarsRecord {
        news_title,
        news_paragraph,
        featured_image,
        facts,
        hemispheres,
        last_modified: Local::now(),
    };

    info!(
        elapsed_ms = t0.elapsed().as_millis() as u64,
        has_news = record.news_title.is_some(),
        has_featured_image = record.featured_image.is_some(),
        has_facts = record.facts.is_some(),
        hemispheres = record.hemispheres.len(),
        "Scrape complete"
    );
    Ok(record)
}
