//! Command-line interface definitions for mars_scrape.
//!
//! All arguments can be provided via command-line flags or environment variables.

use clap::Parser;
use std::path::PathBuf;

/// Scrape the Mars pages into one record.
///
/// # Examples
///
/// ```sh
/// # Scrape and print the record as JSON
/// mars_scrape
///
/// # Scrape and store the record
/// mars_scrape -o ./records
///
/// # Show every stored record
/// mars_scrape -o ./records --list
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Directory of the JSON record store
    #[arg(short, long, env = "MARS_OUTPUT_DIR")]
    pub output_dir: Option<String>,

    /// Optional path to a YAML site configuration
    #[arg(short, long)]
    pub config: Option<String>,

    /// Chromium executable to launch instead of the auto-detected one
    #[arg(long, env = "CHROME_PATH")]
    pub chrome_path: Option<PathBuf>,

    /// Show the browser window
    #[arg(long)]
    pub headful: bool,

    /// Print all stored records instead of scraping (requires --output-dir)
    #[arg(long, requires = "output_dir")]
    pub list: bool,
}
