//! Export of the collected tables
//!
//! Both tables of a run share one timestamp, so their file names pair up:
//! `<output>/repos_<unixtime>.<ext>` and `<output>/repos_duplicates_<unixtime>.<ext>`.

mod dataset;
mod format;

pub use dataset::{Dataset, ID_COLUMN, LICENSE_COLUMN, normalize_license};
pub use format::{cell_text, write_dataset};

use std::path::{Path, PathBuf};

use log::info;
use thiserror::Error;

use crate::config::OutputFormat;

/// Errors raised while writing result tables
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Write failed: {0}")]
    Write(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("license value {0} has no string `key`")]
    MalformedLicense(String),
}

/// Writes tables into one output directory in one format
#[derive(Debug, Clone)]
pub struct Exporter {
    output: PathBuf,
    format: OutputFormat,
    timestamp: i64,
}

impl Exporter {
    /// Exporter stamping file names with the current Unix time.
    #[must_use]
    pub fn new(output: impl Into<PathBuf>, format: OutputFormat) -> Self {
        Self::with_timestamp(output, format, chrono::Utc::now().timestamp())
    }

    #[must_use]
    pub fn with_timestamp(output: impl Into<PathBuf>, format: OutputFormat, timestamp: i64) -> Self {
        Self {
            output: output.into(),
            format,
            timestamp,
        }
    }

    /// Path a table called `name` is written to.
    #[must_use]
    pub fn path_for(&self, name: &str) -> PathBuf {
        self.output.join(format!(
            "{name}_{}.{}",
            self.timestamp,
            self.format.extension()
        ))
    }

    /// Write `dataset` as `name`, creating the output directory if needed.
    ///
    /// The table is rendered in memory and written in one go.
    pub async fn write(&self, dataset: &Dataset, name: &str) -> Result<PathBuf, ExportError> {
        let mut rendered = Vec::new();
        write_dataset(self.format, dataset, &mut rendered)?;

        create_dir(&self.output).await?;
        let path = self.path_for(name);
        tokio::fs::write(&path, rendered)
            .await
            .map_err(|source| ExportError::Io {
                path: path.clone(),
                source,
            })?;
        info!("Wrote {} rows to {}", dataset.len(), path.display());
        Ok(path)
    }
}

async fn create_dir(dir: &Path) -> Result<(), ExportError> {
    tokio::fs::create_dir_all(dir)
        .await
        .map_err(|source| ExportError::Io {
            path: dir.to_path_buf(),
            source,
        })
}
