//! In-memory [`BrowserSession`] for tests.
//!
//! Pages are keyed by URL. A click is resolved through `links`, keyed by the
//! current URL and the selector, which lists the target URL of each match in
//! document order. `click_nth` only checks that the match exists;
//! `follow_nth` navigates to its target.

use super::BrowserSession;
use std::collections::HashMap;
use std::error::Error;

#[derive(Debug, Default)]
pub struct FixtureBrowser {
    pub pages: HashMap<String, String>,
    pub links: HashMap<(String, String), Vec<String>>,
    pub history: Vec<String>,
    /// Every `click_nth`/`follow_nth` call as `(url, selector, index)`.
    pub clicks: Vec<(String, String, usize)>,
}

impl FixtureBrowser {
    pub fn page(mut self, url: &str, html: &str) -> Self {
        self.pages.insert(url.to_string(), html.to_string());
        self
    }

    pub fn link(mut self, from: &str, selector: &str, targets: &[&str]) -> Self {
        self.links.insert(
            (from.to_string(), selector.to_string()),
            targets.iter().map(|t| t.to_string()).collect(),
        );
        self
    }

    fn current(&self) -> Result<&String, Box<dyn Error>> {
        Ok(self.history.last().ok_or("no page loaded")?)
    }

    fn resolve(&mut self, selector: &str, index: usize) -> Result<String, Box<dyn Error>> {
        let url = self.current()?.clone();
        self.clicks.push((url.clone(), selector.to_string(), index));

        let target = self
            .links
            .get(&(url, selector.to_string()))
            .and_then(|targets| targets.get(index))
            .ok_or_else(|| format!("no element at index {index} for selector {selector:?}"))?;
        Ok(target.clone())
    }
}

impl BrowserSession for FixtureBrowser {
    async fn visit(&mut self, url: &str) -> Result<(), Box<dyn Error>> {
        if !self.pages.contains_key(url) {
            return Err(format!("navigation failed: {url}").into());
        }
        self.history.push(url.to_string());
        Ok(())
    }

    async fn html(&self) -> Result<String, Box<dyn Error>> {
        let url = self.current()?;
        Ok(self.pages[url].clone())
    }

    async fn click_nth(&mut self, selector: &str, index: usize) -> Result<(), Box<dyn Error>> {
        self.resolve(selector, index)?;
        Ok(())
    }

    async fn follow_nth(&mut self, selector: &str, index: usize) -> Result<(), Box<dyn Error>> {
        let target = self.resolve(selector, index)?;
        self.visit(&target).await
    }

    async fn back(&mut self) -> Result<(), Box<dyn Error>> {
        if self.history.len() < 2 {
            return Err("no previous page in session history".into());
        }
        self.history.pop();
        Ok(())
    }

    async fn quit(self) -> Result<(), Box<dyn Error>> {
        Ok(())
    }
}
