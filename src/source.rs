//! Location and format detection for the sales data file.
//!
//! The dashboard reads exactly one file per load. Its format is decided by
//! the file extension, and each format maps to the DuckDB table function
//! that reads it.

use crate::config;
use crate::error::{DashboardError, Result};
use std::fmt;
use std::path::{Path, PathBuf};

/// Tabular file formats DuckDB can read for us.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Csv,
    Tsv,
    Xlsx,
    Json,
    NdJson,
    Parquet,
}

impl SourceFormat {
    /// Detect the format from a file extension (case-insensitive).
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();

        match ext.as_str() {
            "csv" => Ok(Self::Csv),
            "tsv" => Ok(Self::Tsv),
            "xlsx" => Ok(Self::Xlsx),
            "json" => Ok(Self::Json),
            "ndjson" | "jsonl" => Ok(Self::NdJson),
            "parquet" => Ok(Self::Parquet),
            _ => Err(DashboardError::InvalidArgument(format!(
                "Unsupported data file format '{}': {}",
                ext,
                path.display()
            ))),
        }
    }

    /// DuckDB extension that must be loaded before reading this format.
    pub fn required_extension(&self) -> Option<&'static str> {
        match self {
            Self::Xlsx => Some("excel"),
            _ => None,
        }
    }
}

impl fmt::Display for SourceFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Csv => "csv",
            Self::Tsv => "tsv",
            Self::Xlsx => "xlsx",
            Self::Json => "json",
            Self::NdJson => "ndjson",
            Self::Parquet => "parquet",
        };
        f.write_str(name)
    }
}

/// A sales data file on disk together with its detected format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataSource {
    pub path: PathBuf,
    pub format: SourceFormat,
}

impl DataSource {
    /// Resolve a data source, detecting the format from the extension.
    ///
    /// Does not touch the filesystem; see [`DataSource::ensure_exists`].
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let format = SourceFormat::from_path(&path)?;
        Ok(Self { path, format })
    }

    /// Fail with [`DashboardError::NotFound`] if the file is missing.
    pub fn ensure_exists(&self) -> Result<()> {
        if self.path.is_file() {
            Ok(())
        } else {
            Err(DashboardError::NotFound(format!(
                "Sales data file not found: {}",
                self.path.display()
            )))
        }
    }

    /// The DuckDB table function expression that reads this file.
    ///
    /// CSV and TSV are read with every column as VARCHAR so that malformed
    /// cells reach the cleaner as text instead of failing the whole read.
    /// Excel cells that do not match the inferred column type become NULL.
    /// JSON date detection is pinned to the day-month-year format.
    pub fn reader_sql(&self) -> String {
        // Use forward slashes for DuckDB compatibility
        let path = self.path.to_string_lossy().replace('\\', "/").replace('\'', "''");
        match self.format {
            SourceFormat::Csv => format!(
                "read_csv('{}', header = true, all_varchar = true)",
                path
            ),
            SourceFormat::Tsv => format!(
                "read_csv('{}', header = true, delim = '\t', all_varchar = true)",
                path
            ),
            SourceFormat::Xlsx => format!(
                "read_xlsx('{}', header = true, ignore_errors = true)",
                path
            ),
            SourceFormat::Json => format!(
                "read_json_auto('{}', dateformat = '{}')",
                path,
                config::DATE_FORMAT
            ),
            SourceFormat::NdJson => format!(
                "read_json_auto('{}', format = 'newline_delimited', dateformat = '{}')",
                path,
                config::DATE_FORMAT
            ),
            SourceFormat::Parquet => format!("read_parquet('{}')", path),
        }
    }
}
