//! Output of scraped records.
//!
//! # Submodules
//!
//! - [`json`]: append-only store writing one JSON file per record
//!
//! Without an output directory the binary prints the record to stdout instead.

pub mod json;
