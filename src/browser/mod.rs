//! Automated browser sessions.
//!
//! The gallery pages only reveal their image links after client-side
//! interaction, so two of the four extractors drive a real browser through
//! the [`BrowserSession`] trait:
//!
//! - [`chrome::ChromeSession`]: headless Chromium over the DevTools protocol
//! - `fixture::FixtureBrowser` (tests only): canned pages and click targets
//!
//! A session is stateful (current page, history) and is owned by exactly one
//! scrape at a time.

pub mod chrome;
#[cfg(test)]
pub mod fixture;

use std::error::Error;

/// One live browser instance that renders and navigates pages.
///
/// Every method fails with an error when the browser cannot do what was
/// asked; none of them retry.
pub trait BrowserSession {
    /// Navigate to `url` and wait for the page to load.
    async fn visit(&mut self, url: &str) -> Result<(), Box<dyn Error>>;

    /// Rendered HTML of the current page.
    async fn html(&self) -> Result<String, Box<dyn Error>>;

    /// Query `selector` on the current page and click the match at `index`.
    ///
    /// For controls that change the page in place; no navigation is awaited.
    /// The query runs on every call, so handles are never reused across
    /// navigations. An out-of-range `index` is an error.
    async fn click_nth(&mut self, selector: &str, index: usize) -> Result<(), Box<dyn Error>>;

    /// Like [`click_nth`](Self::click_nth), for a match that opens another
    /// page: returns once the new page has committed and finished loading.
    async fn follow_nth(&mut self, selector: &str, index: usize) -> Result<(), Box<dyn Error>>;

    /// Go back one entry in the session history and wait for that page to load.
    async fn back(&mut self) -> Result<(), Box<dyn Error>>;

    /// Shut the browser down.
    async fn quit(self) -> Result<(), Box<dyn Error>>;
}
