//! Page scrapers, one per target site.
//!
//! # Sources
//!
//! | Page | Module | Method | Output |
//! |------|--------|--------|--------|
//! | Mars news listing | [`news`] | Browser | Latest headline and teaser |
//! | Space images gallery | [`featured_image`] | Browser + click | Full-size image URL |
//! | Galaxy facts | [`facts`] | Plain HTTP | Re-rendered comparison table |
//! | Hemisphere gallery | [`hemispheres`] | Browser + click/back ×4 | Titles and sample image URLs |
//!
//! # Common Patterns
//!
//! Each module splits into an async step that drives the browser (or HTTP
//! client) and a pure `parse_*` function over the fetched HTML. Parsers never
//! fail: a missing element becomes `None`. Browser errors propagate.

pub mod facts;
pub mod featured_image;
pub mod hemispheres;
pub mod news;
