//! Latest-article scraper for the Mars news listing.
//!
//! The listing page renders one `div.list_text` per article, newest first.
//! Only the first one is read.

use crate::browser::BrowserSession;
use crate::utils::element_text;
use once_cell::sync::Lazy;
use scraper::{Html, Selector};
use std::error::Error;
use tracing::{info, instrument, warn};

static LIST_TEXT: Lazy<Selector> = Lazy::new(|| Selector::parse("div.list_text").unwrap());
static CONTENT_TITLE: Lazy<Selector> =
    Lazy::new(|| Selector::parse("div.content_title").unwrap());
static TEASER_BODY: Lazy<Selector> =
    Lazy::new(|| Selector::parse("div.article_teaser_body").unwrap());

/// Visit the news listing and extract the latest headline and teaser.
#[instrument(level = "info", skip(session))]
pub async fn mars_news<S: BrowserSession>(
    session: &mut S,
    url: &str,
) -> Result<(Option<String>, Option<String>), Box<dyn Error>> {
    session.visit(url).await?;
    let html = session.html().await?;
    Ok(parse_news(&html))
}

/// Extract `(title, paragraph)` from the first listing entry.
///
/// Returns `(None, None)` if the entry, its title or its teaser is missing.
pub fn parse_news(html: &str) -> (Option<String>, Option<String>) {
    let document = Html::parse_document(html);

    let found = document.select(&LIST_TEXT).next().and_then(|slide| {
        let title = slide.select(&CONTENT_TITLE).next()?;
        let teaser = slide.select(&TEASER_BODY).next()?;
        Some((element_text(title), element_text(teaser)))
    });

    match found {
        Some((title, paragraph)) => {
            info!(%title, "Parsed latest news article");
            (Some(title), Some(paragraph))
        }
        None => {
            warn!("News listing entry not found");
            (None, None)
        }
    }
}
