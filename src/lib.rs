//! Interactive sales dashboard core.
//!
//! Loads a tabular sales file (CSV, TSV, XLSX, JSON or Parquet) through an
//! in-memory DuckDB database, drops invalid rows, aggregates the rest per
//! product and per month, and turns chart selections and sort toggles into
//! [`RenderRequest`]s for a presentation layer to draw.
//!
//! # Quick start
//!
//! ```no_run
//! use sales_dashboard::{ChartKind, Event, Metric, SalesDashboard};
//!
//! let mut dashboard = SalesDashboard::builder()
//!     .data_path("sales_data.csv")
//!     .build()
//!     .unwrap();
//! dashboard.load().unwrap();
//!
//! let chart = dashboard.handle(Event::SelectView(ChartKind::QuantityBar)).unwrap();
//! let resorted = dashboard.handle(Event::ToggleSort(Metric::Quantity)).unwrap();
//! println!("{}", resorted.unwrap());
//! # let _ = chart;
//! ```

pub mod aggregate;
pub mod cleaning;
pub mod config;
pub mod connection;
pub mod error;
pub mod format;
pub mod models;
pub mod session;
pub mod sort;
pub mod source;
#[cfg(feature = "tui")]
pub mod ui;
pub mod view;

pub use connection::Connection;
pub use error::{DashboardError, Result};
pub use models::{
    Aggregation, ChartData, ChartKind, CleanRecord, LoadReport, MonthlySummary, ProductSummary,
    RawRecord, RawTable, RenderRequest, SummaryRow, ValueFormat,
};
pub use session::{Dataset, Event, Session};
pub use sort::{Metric, SortDirection, SortState};
pub use source::{DataSource, SourceFormat};
pub use view::ViewController;

use std::fmt;
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// SalesDashboardBuilder
// ---------------------------------------------------------------------------

/// Builder for configuring and constructing a [`SalesDashboard`].
///
/// Use [`SalesDashboard::builder()`] to obtain a builder, chain configuration
/// methods, and call [`build()`](SalesDashboardBuilder::build).
pub struct SalesDashboardBuilder {
    data_path: Option<PathBuf>,
    title: String,
}

impl Default for SalesDashboardBuilder {
    fn default() -> Self {
        Self {
            data_path: None,
            title: config::DEFAULT_TITLE.to_string(),
        }
    }
}

impl SalesDashboardBuilder {
    /// Set the sales data file.
    ///
    /// If not set, `sales_data.xlsx` in the user's desktop directory is used
    /// (see [`config::default_data_path`]).
    pub fn data_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.data_path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Set the window title. Defaults to [`config::DEFAULT_TITLE`].
    pub fn title<S: Into<String>>(mut self, title: S) -> Self {
        self.title = title.into();
        self
    }

    /// Build the dashboard and open its DuckDB connection.
    ///
    /// Fails if the data file has an unsupported extension. The file itself
    /// is not read until [`SalesDashboard::load`].
    pub fn build(self) -> Result<SalesDashboard> {
        let path = self.data_path.unwrap_or_else(config::default_data_path);
        let source = DataSource::new(path)?;
        let conn = Connection::new()?;
        Ok(SalesDashboard {
            conn,
            source,
            title: self.title,
            session: Session::new(),
        })
    }
}

// ---------------------------------------------------------------------------
// SalesDashboard
// ---------------------------------------------------------------------------

/// Orchestrates loading, cleaning and view selection for one data file.
///
/// Owns the [`Connection`] and the [`Session`]; the presentation layer feeds
/// it [`Event`]s and draws the returned [`RenderRequest`]s.
pub struct SalesDashboard {
    conn: Connection,
    source: DataSource,
    title: String,
    session: Session,
}

impl SalesDashboard {
    /// Create a new builder for configuring the dashboard.
    pub fn builder() -> SalesDashboardBuilder {
        SalesDashboardBuilder::default()
    }

    /// Read, clean and install the data file as the session's dataset.
    ///
    /// Any error (missing file, unreadable table, missing columns) leaves the
    /// previously loaded dataset untouched. A file whose rows are all
    /// invalid loads successfully as an empty dataset.
    pub fn load(&mut self) -> Result<LoadReport> {
        let table = self.conn.load_source(&self.source)?;
        let (records, report) = cleaning::clean_with_report(&table)?;
        tracing::info!(
            rows_read = report.rows_read,
            rows_kept = report.rows_kept,
            rows_dropped = report.rows_dropped,
            "cleaned sales data"
        );
        self.session.replace_dataset(Dataset::new(records, report));
        Ok(report)
    }

    /// Apply one user event.
    ///
    /// [`Event::LoadRequested`] reloads the file and, on success, re-renders
    /// the current chart. Other events are delegated to [`Session::update`].
    pub fn handle(&mut self, event: Event) -> Result<Option<RenderRequest>> {
        match event {
            Event::LoadRequested => {
                self.load()?;
                Ok(self.session.refresh())
            }
            other => Ok(self.session.update(other)),
        }
    }

    /// Formatted product summary table of the loaded dataset.
    pub fn summary_table(&self) -> Vec<SummaryRow> {
        self.session.views().summary_table()
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn data_path(&self) -> &Path {
        &self.source.path
    }
}

// ---------------------------------------------------------------------------
// Display
// ---------------------------------------------------------------------------

impl fmt::Display for SalesDashboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let loaded = match self.session.dataset() {
            Some(dataset) => dataset.report().rows_kept.to_string(),
            None => "none".to_string(),
        };
        let view = match self.session.current_view() {
            Some(kind) => kind.label(),
            None => "none",
        };
        write!(
            f,
            "SalesDashboard(source={} [{}], rows={}, view={})",
            self.source.path.display(),
            self.source.format,
            loaded,
            view
        )
    }
}
