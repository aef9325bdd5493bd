//! Hemisphere gallery scraper.
//!
//! The index page shows one thumbnail per hemisphere. Each thumbnail links to
//! a detail page holding the hemisphere's name (`h2.title`) and a "Sample"
//! link to the full-size image. The scraper clicks through the first
//! [`HEMISPHERE_COUNT`] thumbnails, going back to the index after each one.

use crate::browser::BrowserSession;
use crate::models::Hemisphere;
use crate::utils::element_text;
use once_cell::sync::Lazy;
use scraper::{Html, Selector};
use std::error::Error;
use tracing::{info, instrument, warn};

/// Number of hemispheres on the index page.
pub const HEMISPHERE_COUNT: usize = 4;

/// Clickable thumbnails on the index page.
pub const THUMBNAIL_SELECTOR: &str = "a.product-item img";

const SAMPLE_LINK_TEXT: &str = "Sample";

static TITLE: Lazy<Selector> = Lazy::new(|| Selector::parse("h2.title").unwrap());
static ANCHOR: Lazy<Selector> = Lazy::new(|| Selector::parse("a").unwrap());

/// Visit the gallery index and collect every hemisphere's title and image URL.
///
/// `base_url` is the gallery root: the index is `{base_url}index.html` and
/// each sample link is prefixed with `base_url`. A click or navigation
/// failure aborts the whole gallery.
#[instrument(level = "info", skip(session))]
pub async fn hemispheres<S: BrowserSession>(
    session: &mut S,
    base_url: &str,
) -> Result<Vec<Hemisphere>, Box<dyn Error>> {
    session.visit(&format!("{base_url}index.html")).await?;

    let mut hemisphere_image_urls = Vec::with_capacity(HEMISPHERE_COUNT);
    for i in 0..HEMISPHERE_COUNT {
        // Thumbnails are looked up again after every navigation.
        session.follow_nth(THUMBNAIL_SELECTOR, i).await?;
        let html = session.html().await?;
        let hemisphere = parse_hemisphere(&html, base_url);
        info!(index = i, title = ?hemisphere.title, "Parsed hemisphere");
        hemisphere_image_urls.push(hemisphere);
        session.back().await?;
    }

    Ok(hemisphere_image_urls)
}

/// Extract the title and absolute sample image URL from a detail page.
///
/// If either the title or the "Sample" link (or its `href`) is missing,
/// both fields are `None`.
pub fn parse_hemisphere(html: &str, base_url: &str) -> Hemisphere {
    let document = Html::parse_document(html);

    let title = document.select(&TITLE).next().map(element_text);
    let sample = document
        .select(&ANCHOR)
        .find(|a| element_text(*a) == SAMPLE_LINK_TEXT)
        .and_then(|a| a.value().attr("href"));

    match (title, sample) {
        (Some(title), Some(href)) => Hemisphere {
            title: Some(title),
            image_url: Some(format!("{base_url}{href}")),
        },
        (title, sample) => {
            warn!(
                has_title = title.is_some(),
                has_sample = sample.is_some(),
                "Hemisphere detail page incomplete"
            );
            Hemisphere::missing()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::browser::fixture::FixtureBrowser;

    const BASE: &str = "https://marshemispheres.com/";
    const INDEX: &str = "https://marshemispheres.com/index.html";

    const NAMES: [&str; 4] = [
        "Cerberus Hemisphere Enhanced",
        "Schiaparelli Hemisphere Enhanced",
        "Syrtis Major Hemisphere Enhanced",
        "Valles Marineris Hemisphere Enhanced",
    ];

    fn detail_page(name: &str, slug: &str) -> String {
        format!(
            r#"<html><body>
                 <h2 class="title">{name}</h2>
                 <div class="downloads"><ul>
                   <li><a href="images/{slug}.tif">Original</a></li>
                   <li><a href="images/{slug}.jpg" target="_blank">Sample</a></li>
                 </ul></div>
               </body></html>"#
        )
    }

    fn gallery() -> FixtureBrowser {
        let slugs = ["cerberus", "schiaparelli", "syrtis", "valles"];
        let targets: Vec<String> = slugs.iter().map(|s| format!("{BASE}{s}.html")).collect();
        let target_refs: Vec<&str> = targets.iter().map(String::as_str).collect();

        let mut browser = FixtureBrowser::default()
            .page(INDEX, "<html><body>index</body></html>")
            .link(INDEX, THUMBNAIL_SELECTOR, &target_refs);
        for ((name, slug), url) in NAMES.iter().zip(slugs).zip(&targets) {
            browser = browser.page(url, &detail_page(name, slug));
        }
        browser
    }

    #[test]
    fn test_parse_hemisphere_complete() {
        let hemisphere = parse_hemisphere(&detail_page(NAMES[0], "cerberus"), BASE);
        assert_eq!(hemisphere.title.as_deref(), Some(NAMES[0]));
        assert_eq!(
            hemisphere.image_url.as_deref(),
            Some("https://marshemispheres.com/images/cerberus.jpg")
        );
    }

    #[test]
    fn test_parse_hemisphere_missing_title_nulls_both() {
        let html = r#"<a href="images/x.jpg">Sample</a>"#;
        assert_eq!(parse_hemisphere(html, BASE), Hemisphere::missing());
    }

    #[test]
    fn test_parse_hemisphere_missing_sample_nulls_both() {
        let html = r#"<h2 class="title">Cerberus</h2><a href="images/x.tif">Original</a>"#;
        assert_eq!(parse_hemisphere(html, BASE), Hemisphere::missing());
    }

    #[test]
    fn test_parse_hemisphere_sample_text_must_match_exactly() {
        let html = r#"<h2 class="title">Cerberus</h2><a href="images/x.jpg">Sample image</a>"#;
        assert_eq!(parse_hemisphere(html, BASE), Hemisphere::missing());
    }

    #[tokio::test]
    async fn test_hemispheres_visits_all_four() {
        let mut session = gallery();
        let result = hemispheres(&mut session, BASE).await.unwrap();

        assert_eq!(result.len(), HEMISPHERE_COUNT);
        for (hemisphere, name) in result.iter().zip(NAMES) {
            assert_eq!(hemisphere.title.as_deref(), Some(name));
        }
        assert_eq!(
            result[3].image_url.as_deref(),
            Some("https://marshemispheres.com/images/valles.jpg")
        );
        // Back on the index after the last detail page.
        assert_eq!(session.history, vec![INDEX.to_string()]);
    }

    #[tokio::test]
    async fn test_hemispheres_requeries_thumbnails_each_iteration() {
        let mut session = gallery();
        hemispheres(&mut session, BASE).await.unwrap();

        let expected: Vec<_> = (0..HEMISPHERE_COUNT)
            .map(|i| (INDEX.to_string(), THUMBNAIL_SELECTOR.to_string(), i))
            .collect();
        assert_eq!(session.clicks, expected);
    }

    #[tokio::test]
    async fn test_hemispheres_incomplete_detail_page() {
        let mut session = gallery().page(
            "https://marshemispheres.com/syrtis.html",
            r#"<h2 class="title">Syrtis Major Hemisphere Enhanced</h2>"#,
        );
        let result = hemispheres(&mut session, BASE).await.unwrap();

        assert_eq!(result.len(), HEMISPHERE_COUNT);
        assert_eq!(result[2], Hemisphere::missing());
        assert!(result[3].title.is_some());
    }

    #[tokio::test]
    async fn test_hemispheres_missing_thumbnail_aborts() {
        let mut session = gallery().link(
            INDEX,
            THUMBNAIL_SELECTOR,
            &["https://marshemispheres.com/cerberus.html"],
        );
        assert!(hemispheres(&mut session, BASE).await.is_err());
    }
}
