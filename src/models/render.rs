use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::format;
use crate::sort::{Metric, SortDirection};

/// Width in characters of the longest bar in the text rendering.
const TEXT_BAR_WIDTH: usize = 30;

// ---------------------------------------------------------------------------
// ChartKind — The four selectable views
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    Pie,
    QuantityBar,
    RevenueBar,
    TimeSeries,
}

impl ChartKind {
    /// All chart kinds in control-panel order.
    pub const ALL: [ChartKind; 4] = [
        ChartKind::Pie,
        ChartKind::QuantityBar,
        ChartKind::RevenueBar,
        ChartKind::TimeSeries,
    ];

    /// Button label shown in the control panel.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Pie => "Pie Chart",
            Self::QuantityBar => "Quantity Bar",
            Self::RevenueBar => "Revenue Bar",
            Self::TimeSeries => "Time Series",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::Pie => "Sales Distribution by Product",
            Self::QuantityBar => "Total Quantity Sold by Product",
            Self::RevenueBar => "Total Revenue by Product",
            Self::TimeSeries => "Total Quantity Sold Over Time",
        }
    }

    /// The metric whose sort direction orders this chart, if any.
    pub fn sort_metric(&self) -> Option<Metric> {
        match self {
            Self::QuantityBar => Some(Metric::Quantity),
            Self::RevenueBar => Some(Metric::Revenue),
            Self::Pie | Self::TimeSeries => None,
        }
    }
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// ValueFormat — How chart values are printed
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueFormat {
    /// Whole units with thousands separators (`15,000`).
    Quantity,
    /// Currency in millions (`$1.23M`).
    Millions,
}

impl ValueFormat {
    pub fn format(&self, value: f64) -> String {
        match self {
            Self::Quantity => format::quantity(value),
            Self::Millions => format::millions(value),
        }
    }
}

// ---------------------------------------------------------------------------
// ChartData — The ordered points of a chart
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabeledValue {
    pub label: String,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatedValue {
    pub date: NaiveDate,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "points", rename_all = "snake_case")]
pub enum ChartData {
    Labeled(Vec<LabeledValue>),
    Dated(Vec<DatedValue>),
    /// Nothing survived cleaning, or no dataset is loaded.
    NoData,
}

// ---------------------------------------------------------------------------
// RenderRequest — What the presentation layer should draw
// ---------------------------------------------------------------------------

/// Data-only description of one chart.
///
/// Built by [`ViewController`](crate::view::ViewController); the presentation
/// layer decides how to draw it. The `Display` impl gives a plain-text
/// rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderRequest {
    pub kind: ChartKind,
    pub title: String,
    pub x_axis: Option<String>,
    pub y_axis: Option<String>,
    pub value_format: ValueFormat,
    /// Present only for charts ordered by a sort toggle.
    pub sort: Option<SortDirection>,
    pub data: ChartData,
}

impl RenderRequest {
    /// A request that renders the explicit "no data" state for `kind`.
    pub fn no_data(kind: ChartKind, value_format: ValueFormat) -> Self {
        Self {
            kind,
            title: kind.title().to_string(),
            x_axis: None,
            y_axis: None,
            value_format,
            sort: None,
            data: ChartData::NoData,
        }
    }

    pub fn is_empty(&self) -> bool {
        match &self.data {
            ChartData::Labeled(points) => points.is_empty(),
            ChartData::Dated(points) => points.is_empty(),
            ChartData::NoData => true,
        }
    }

    /// Point labels in display order (months as `YYYY-MM`).
    pub fn labels(&self) -> Vec<String> {
        match &self.data {
            ChartData::Labeled(points) => points.iter().map(|p| p.label.clone()).collect(),
            ChartData::Dated(points) => points.iter().map(|p| format::month(p.date)).collect(),
            ChartData::NoData => Vec::new(),
        }
    }

    /// Point values in display order.
    pub fn values(&self) -> Vec<f64> {
        match &self.data {
            ChartData::Labeled(points) => points.iter().map(|p| p.value).collect(),
            ChartData::Dated(points) => points.iter().map(|p| p.value).collect(),
            ChartData::NoData => Vec::new(),
        }
    }

    /// Each point's percentage of the total, as drawn by a pie chart.
    ///
    /// Returns zero shares when the total is zero.
    pub fn shares(&self) -> Vec<(String, f64)> {
        let values = self.values();
        let total: f64 = values.iter().sum();
        self.labels()
            .into_iter()
            .zip(values)
            .map(|(label, value)| {
                let pct = if total > 0.0 { value / total * 100.0 } else { 0.0 };
                (label, pct)
            })
            .collect()
    }
}

impl fmt::Display for RenderRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.sort {
            Some(direction) => writeln!(f, "{} ({})", self.title, direction)?,
            None => writeln!(f, "{}", self.title)?,
        }

        if self.is_empty() {
            return writeln!(f, "  No data to display.");
        }

        let labels = self.labels();
        let width = labels.iter().map(|l| l.chars().count()).max().unwrap_or(0);

        if self.kind == ChartKind::Pie {
            for (label, pct) in self.shares() {
                writeln!(f, "  {:<width$}  {}", label, format::percent(pct), width = width)?;
            }
            return Ok(());
        }

        let values = self.values();
        let max = values.iter().cloned().fold(0.0_f64, f64::max);
        for (label, value) in labels.iter().zip(values) {
            let len = if max > 0.0 {
                (value / max * TEXT_BAR_WIDTH as f64).round() as usize
            } else {
                0
            };
            writeln!(
                f,
                "  {:<width$}  {} {}",
                label,
                "█".repeat(len),
                self.value_format.format(value),
                width = width
            )?;
        }
        Ok(())
    }
}
