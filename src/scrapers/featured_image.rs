//! Featured image scraper for the space images gallery.
//!
//! The gallery shows a thumbnail; the full-size image (`img.fancybox-image`)
//! only exists in the DOM after the "FULL IMAGE" button is pressed.

use crate::browser::BrowserSession;
use once_cell::sync::Lazy;
use scraper::{Html, Selector};
use std::error::Error;
use tracing::{info, instrument, warn};

/// Zero-based position of the "FULL IMAGE" button among the page's buttons.
const FULL_IMAGE_BUTTON: usize = 1;

static FANCYBOX_IMAGE: Lazy<Selector> =
    Lazy::new(|| Selector::parse("img.fancybox-image").unwrap());

/// Open the gallery, reveal the full-size image, and return its absolute URL.
///
/// A missing button is an automation failure and propagates; a missing image
/// element yields `Ok(None)`.
#[instrument(level = "info", skip(session))]
pub async fn featured_image<S: BrowserSession>(
    session: &mut S,
    url: &str,
    base: &str,
) -> Result<Option<String>, Box<dyn Error>> {
    session.visit(url).await?;
    session.click_nth("button", FULL_IMAGE_BUTTON).await?;
    let html = session.html().await?;
    Ok(parse_featured_image(&html, base))
}

/// Find the full-size image and prefix its `src` with `base`.
///
/// The prefix is plain concatenation; the relative path is not normalized.
pub fn parse_featured_image(html: &str, base: &str) -> Option<String> {
    let document = Html::parse_document(html);
    let src = document
        .select(&FANCYBOX_IMAGE)
        .next()
        .and_then(|img| img.value().attr("src"));

    match src {
        Some(rel) => {
            let image_url = format!("{base}{rel}");
            info!(%image_url, "Parsed featured image");
            Some(image_url)
        }
        None => {
            warn!("Featured image element not found");
            None
        }
    }
}
