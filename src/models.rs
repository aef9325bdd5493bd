//! Data models for a single Mars scrape.
//!
//! - [`MarsRecord`]: the flat summary produced by one full scrape pass
//! - [`Hemisphere`]: one entry of the hemisphere image gallery
//!
//! Every extracted field is optional. A selector that misses leaves `None`
//! in place of the value, so a record is always structurally complete and
//! serializes with all six top-level keys (`null` for the missing ones).

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// One hemisphere from the gallery: its heading and full-size image link.
///
/// Both fields are `None` together when the detail page is missing either
/// the heading or the "Sample" link.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Hemisphere {
    /// Heading of the hemisphere detail page, e.g. "Cerberus Hemisphere Enhanced".
    pub title: Option<String>,
    /// Absolute URL of the full-size sample image.
    pub image_url: Option<String>,
}

impl Hemisphere {
    /// The entry recorded when a detail page could not be read.
    pub fn missing() -> Self {
        Self {
            title: None,
            image_url: None,
        }
    }
}

/// The result of one scrape pass.
///
/// Created fresh on every scrape; identity (if any) is assigned by whatever
/// stores it.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct MarsRecord {
    /// Headline of the latest news article.
    pub news_title: Option<String>,
    /// Teaser paragraph of the latest news article.
    pub news_paragraph: Option<String>,
    /// Absolute URL of the full-size featured image.
    pub featured_image: Option<String>,
    /// Mars/Earth comparison table, rendered as HTML.
    pub facts: Option<String>,
    /// Hemisphere gallery entries in page order.
    pub hemispheres: Vec<Hemisphere>,
    /// When this record was assembled.
    pub last_modified: DateTime<Local>,
}
