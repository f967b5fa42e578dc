//! Session state: the loaded dataset, the sort directions and the selected
//! chart, plus the event-driven transition function that mutates them.
//!
//! The session is a plain value owned by the dashboard. User interaction is
//! expressed as [`Event`]s passed to [`Session::update`], which returns the
//! [`RenderRequest`] the presentation layer should draw next.

use serde::{Deserialize, Serialize};
use std::cell::OnceCell;

use crate::aggregate;
use crate::models::{Aggregation, ChartKind, CleanRecord, LoadReport, RenderRequest};
use crate::sort::{Metric, SortDirection, SortState};
use crate::view::ViewController;

// ---------------------------------------------------------------------------
// Event
// ---------------------------------------------------------------------------

/// A discrete user action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "value", rename_all = "snake_case")]
pub enum Event {
    /// Re-read the data file. Handled by the owner of the data source.
    LoadRequested,
    SelectView(ChartKind),
    ToggleSort(Metric),
}

// ---------------------------------------------------------------------------
// Dataset
// ---------------------------------------------------------------------------

/// Clean records of one load, with their aggregation computed on first use.
#[derive(Debug, Clone)]
pub struct Dataset {
    records: Vec<CleanRecord>,
    report: LoadReport,
    aggregation: OnceCell<Aggregation>,
}

impl Dataset {
    pub fn new(records: Vec<CleanRecord>, report: LoadReport) -> Self {
        Self {
            records,
            report,
            aggregation: OnceCell::new(),
        }
    }

    /// A dataset built directly from clean records (nothing dropped).
    pub fn from_records(records: Vec<CleanRecord>) -> Self {
        let report = LoadReport {
            rows_read: records.len(),
            rows_kept: records.len(),
            rows_dropped: 0,
        };
        Self::new(records, report)
    }

    pub fn records(&self) -> &[CleanRecord] {
        &self.records
    }

    pub fn report(&self) -> LoadReport {
        self.report
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Whether [`Dataset::aggregation`] has already been computed.
    pub fn is_aggregated(&self) -> bool {
        self.aggregation.get().is_some()
    }

    /// Per-product and per-month summaries, aggregated once and memoized.
    pub fn aggregation(&self) -> &Aggregation {
        self.aggregation.get_or_init(|| {
            let aggregation = aggregate::aggregate(&self.records);
            tracing::debug!(
                records = self.records.len(),
                products = aggregation.products.len(),
                months = aggregation.months.len(),
                "aggregated dataset"
            );
            aggregation
        })
    }
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default)]
pub struct Session {
    dataset: Option<Dataset>,
    sort: SortState,
    view: Option<ChartKind>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_dataset(dataset: Dataset) -> Self {
        Self {
            dataset: Some(dataset),
            ..Self::default()
        }
    }

    pub fn dataset(&self) -> Option<&Dataset> {
        self.dataset.as_ref()
    }

    /// Swap in a freshly loaded dataset, returning the previous one.
    ///
    /// Sort directions and the selected chart are kept.
    pub fn replace_dataset(&mut self, dataset: Dataset) -> Option<Dataset> {
        self.dataset.replace(dataset)
    }

    pub fn sort(&self) -> &SortState {
        &self.sort
    }

    pub fn current_view(&self) -> Option<ChartKind> {
        self.view
    }

    /// Read-only view builder over this session.
    pub fn views(&self) -> ViewController<'_> {
        ViewController::new(self)
    }

    /// Make `kind` the current chart and build its request.
    pub fn select_view(&mut self, kind: ChartKind) -> RenderRequest {
        self.view = Some(kind);
        self.views().render(kind)
    }

    pub fn toggle_sort(&mut self, metric: Metric) -> SortDirection {
        self.sort.toggle(metric)
    }

    /// Rebuild the request for the current chart, if one is selected.
    pub fn refresh(&self) -> Option<RenderRequest> {
        self.view.map(|kind| self.views().render(kind))
    }

    /// Apply one event and return what should be drawn next.
    ///
    /// `None` means the screen does not change.
    pub fn update(&mut self, event: Event) -> Option<RenderRequest> {
        match event {
            Event::SelectView(kind) => Some(self.select_view(kind)),
            Event::ToggleSort(metric) => {
                self.toggle_sort(metric);
                self.refresh()
            }
            Event::LoadRequested => None,
        }
    }
}
