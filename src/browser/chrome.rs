//! Chromium-backed [`BrowserSession`] using chromiumoxide.

use super::BrowserSession;
use crate::config::BrowserSettings;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::cdp::browser_protocol::page::{
    EventFrameNavigated, GetNavigationHistoryParams, NavigateToHistoryEntryParams,
};
use chromiumoxide::element::Element;
use chromiumoxide::listeners::EventStream;
use chromiumoxide::page::Page;
use futures::StreamExt;
use std::error::Error;
use std::time::Instant;
use tokio::task::JoinHandle;
use tracing::{debug, info, instrument, warn};

/// A single Chromium process with one open tab.
pub struct ChromeSession {
    browser: Browser,
    page: Page,
    handler: JoinHandle<()>,
}

impl std::fmt::Debug for ChromeSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChromeSession").finish_non_exhaustive()
    }
}

impl ChromeSession {
    /// Launch Chromium and open a blank tab.
    #[instrument(level = "info")]
    pub async fn launch(settings: &BrowserSettings) -> Result<Self, Box<dyn Error>> {
        let mut builder = BrowserConfig::builder()
            .arg("--disable-gpu")
            .arg("--no-sandbox")
            .arg("--disable-dev-shm-usage")
            .arg("--disable-extensions");
        if let Some(path) = &settings.chrome_path {
            builder = builder.chrome_executable(path);
        }
        if !settings.headless {
            builder = builder.with_head();
        }
        let config = builder
            .build()
            .map_err(|e| format!("failed to build browser config: {e}"))?;

        let (browser, mut handler) = Browser::launch(config).await?;

        // The CDP connection only makes progress while its event stream is polled.
        let handler = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    debug!(error = %e, "Browser handler event error");
                }
            }
        });

        let page = browser.new_page("about:blank").await?;
        info!(headless = settings.headless, "Launched Chromium");

        Ok(Self {
            browser,
            page,
            handler,
        })
    }

    async fn nth_element(&self, selector: &str, index: usize) -> Result<Element, Box<dyn Error>> {
        let mut elements = self.page.find_elements(selector).await?;
        if index >= elements.len() {
            return Err(format!(
                "no element at index {index} for selector {selector:?} ({} found)",
                elements.len()
            )
            .into());
        }
        Ok(elements.swap_remove(index))
    }

    /// Wait until the main frame commits a new document, then until it loads.
    ///
    /// `navigated` must be subscribed before the navigation is triggered:
    /// the driver answers a bare load wait at once while the old document is
    /// still marked loaded.
    async fn finish_navigation(
        &self,
        navigated: &mut EventStream<EventFrameNavigated>,
    ) -> Result<(), Box<dyn Error>> {
        loop {
            let event = navigated
                .next()
                .await
                .ok_or("browser closed while waiting for navigation")?;
            if event.frame.parent_id.is_none() {
                debug!(url = %event.frame.url, "Main frame navigated");
                break;
            }
        }
        self.page.wait_for_navigation().await?;
        Ok(())
    }
}

impl BrowserSession for ChromeSession {
    #[instrument(level = "info", skip(self))]
    async fn visit(&mut self, url: &str) -> Result<(), Box<dyn Error>> {
        let t0 = Instant::now();
        self.page.goto(url).await?;
        debug!(elapsed_ms = t0.elapsed().as_millis() as u64, "Page loaded");
        Ok(())
    }

    async fn html(&self) -> Result<String, Box<dyn Error>> {
        Ok(self.page.content().await?)
    }

    #[instrument(level = "debug", skip(self))]
    async fn click_nth(&mut self, selector: &str, index: usize) -> Result<(), Box<dyn Error>> {
        let element = self.nth_element(selector, index).await?;
        element.click().await?;
        Ok(())
    }

    #[instrument(level = "debug", skip(self))]
    async fn follow_nth(&mut self, selector: &str, index: usize) -> Result<(), Box<dyn Error>> {
        let element = self.nth_element(selector, index).await?;
        let mut navigated = self.page.event_listener::<EventFrameNavigated>().await?;
        element.click().await?;
        self.finish_navigation(&mut navigated).await
    }

    async fn back(&mut self) -> Result<(), Box<dyn Error>> {
        let history = self.page.execute(GetNavigationHistoryParams::default()).await?;
        let current = usize::try_from(history.current_index)?;
        let previous = current
            .checked_sub(1)
            .and_then(|i| history.entries.get(i))
            .ok_or("no previous page in session history")?;

        let mut navigated = self.page.event_listener::<EventFrameNavigated>().await?;
        self.page
            .execute(NavigateToHistoryEntryParams::new(previous.id))
            .await?;
        self.finish_navigation(&mut navigated).await?;
        debug!(url = %previous.url, "Navigated back");
        Ok(())
    }

    async fn quit(self) -> Result<(), Box<dyn Error>> {
        let Self {
            mut browser,
            page,
            handler,
        } = self;
        drop(page);

        browser.close().await?;
        if let Err(e) = browser.wait().await {
            warn!(error = %e, "Chromium did not exit cleanly");
        }
        handler.abort();
        info!("Closed Chromium");
        Ok(())
    }
}
