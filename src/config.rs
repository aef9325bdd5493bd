//! Site and browser configuration.
//!
//! The scraper targets four fixed sites by default. A YAML file can override
//! any of them (useful for mirrors or local fixtures):
//!
//! ```yaml
//! news_url: https://redplanetscience.com/
//! featured_image_url: https://spaceimages-mars.com
//! featured_image_base: https://spaceimages-mars.com/
//! facts_url: https://galaxyfacts-mars.com
//! hemispheres_url: https://marshemispheres.com/
//! ```
//!
//! Missing keys fall back to the defaults above.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::path::PathBuf;
use tokio::fs;
use tracing::{info, instrument};
use url::Url;

/// URLs of the pages scraped on every pass.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct SiteConfig {
    /// News listing page.
    pub news_url: String,
    /// Image gallery page holding the featured image.
    pub featured_image_url: String,
    /// Prefix joined to the featured image's relative `src`.
    pub featured_image_base: String,
    /// Page whose first table holds the Mars/Earth facts.
    pub facts_url: String,
    /// Hemisphere gallery root. The index page is `{hemispheres_url}index.html`
    /// and sample links are prefixed with this value.
    pub hemispheres_url: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            news_url: "https://redplanetscience.com/".to_string(),
            featured_image_url: "https://spaceimages-mars.com".to_string(),
            featured_image_base: "https://spaceimages-mars.com/".to_string(),
            facts_url: "https://galaxyfacts-mars.com".to_string(),
            hemispheres_url: "https://marshemispheres.com/".to_string(),
        }
    }
}

impl SiteConfig {
    /// Check that every configured URL parses as an absolute URL.
    pub fn validate(&self) -> Result<(), Box<dyn Error>> {
        for (name, value) in [
            ("news_url", &self.news_url),
            ("featured_image_url", &self.featured_image_url),
            ("featured_image_base", &self.featured_image_base),
            ("facts_url", &self.facts_url),
            ("hemispheres_url", &self.hemispheres_url),
        ] {
            Url::parse(value).map_err(|e| format!("invalid {name} {value:?}: {e}"))?;
        }
        Ok(())
    }
}

/// Load a [`SiteConfig`] from a YAML file, or the defaults when no path is given.
#[instrument(level = "info")]
pub async fn load_site_config(path: Option<&str>) -> Result<SiteConfig, Box<dyn Error>> {
    let config = match path {
        Some(path) => {
            let yaml = fs::read_to_string(path).await?;
            let config: SiteConfig = serde_yaml::from_str(&yaml)?;
            info!(path, "Loaded site configuration");
            config
        }
        None => SiteConfig::default(),
    };
    config.validate()?;
    Ok(config)
}

/// How the automated browser is launched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrowserSettings {
    /// Explicit Chromium executable; the driver's own lookup is used when `None`.
    pub chrome_path: Option<PathBuf>,
    pub headless: bool,
}

impl Default for BrowserSettings {
    fn default() -> Self {
        Self {
            chrome_path: None,
            headless: true,
        }
    }
}
