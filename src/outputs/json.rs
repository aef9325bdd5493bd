//! Append-only JSON record store.
//!
//! Each scrape is written to its own file, grouped by local date:
//! ```text
//! output_dir/
//! └── 2025-05-06/
//!     ├── 083015.123456.json
//!     └── 201002.654321.json
//! ```
//!
//! Files are never overwritten or merged. Two records stamped with the same
//! microsecond get a numeric suffix (`083015.123456-1.json`).

use crate::models::MarsRecord;
use std::error::Error;
use std::io::ErrorKind;
use std::path::PathBuf;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{debug, error, info, instrument, warn};

/// A directory of stored [`MarsRecord`]s.
#[derive(Debug, Clone)]
pub struct JsonStore {
    root: PathBuf,
}

impl JsonStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Write `record` as a new file and return its path.
    #[instrument(level = "info", skip_all, fields(root = %self.root.display()))]
    pub async fn insert_one(&self, record: &MarsRecord) -> Result<PathBuf, Box<dyn Error>> {
        let json = serde_json::to_string_pretty(record)?;

        let date_dir = self
            .root
            .join(record.last_modified.date_naive().to_string());
        if let Err(e) = fs::create_dir_all(&date_dir).await {
            error!(dir = %date_dir.display(), error = %e, "Failed to create record dir");
            return Err(e.into());
        }

        let stem = record.last_modified.format("%H%M%S%.6f").to_string();
        let mut attempt = 0usize;
        loop {
            let name = if attempt == 0 {
                format!("{stem}.json")
            } else {
                format!("{stem}-{attempt}.json")
            };
            let path = date_dir.join(name);

            match fs::OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&path)
                .await
            {
                Ok(mut file) => {
                    file.write_all(json.as_bytes()).await?;
                    file.flush().await?;
                    info!(path = %path.display(), "Stored record");
                    return Ok(path);
                }
                Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                    debug!(path = %path.display(), "Record file exists; trying next suffix");
                    attempt += 1;
                }
                Err(e) => return Err(e.into()),
            }
        }
    }

    /// Read every stored record, oldest first.
    ///
    /// Files that cannot be read as UTF-8 or fail to parse are logged and
    /// skipped. A missing root directory means an empty store.
    #[instrument(level = "info", skip_all, fields(root = %self.root.display()))]
    pub async fn find_all(&self) -> Result<Vec<MarsRecord>, Box<dyn Error>> {
        let mut records = Vec::new();

        let mut dates = match fs::read_dir(&self.root).await {
            Ok(dates) => dates,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(records),
            Err(e) => return Err(e.into()),
        };

        while let Some(date_dir) = dates.next_entry().await? {
            if !date_dir.file_type().await?.is_dir() {
                continue;
            }
            let mut files = fs::read_dir(date_dir.path()).await?;
            while let Some(file) = files.next_entry().await? {
                let path = file.path();
                if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
                    continue;
                }
                let json = match fs::read_to_string(&path).await {
                    Ok(json) => json,
                    Err(e) => {
                        warn!(path = %path.display(), error = %e, "Skipping unreadable record");
                        continue;
                    }
                };
                match serde_json::from_str::<MarsRecord>(&json) {
                    Ok(record) => records.push(record),
                    Err(e) => warn!(path = %path.display(), error = %e, "Skipping unreadable record"),
                }
            }
        }

        records.sort_by_key(|record| record.last_modified);
        info!(count = records.len(), "Loaded stored records");
        Ok(records)
    }
}
