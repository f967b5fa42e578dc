//! Chart and summary-table construction over a [`Session`].

use crate::format;
use crate::models::{
    ChartData, ChartKind, DatedValue, LabeledValue, ProductSummary, RenderRequest, SummaryRow,
    ValueFormat,
};
use crate::session::Session;
use crate::sort::Metric;

// ---------------------------------------------------------------------------
// ViewController
// ---------------------------------------------------------------------------

/// Builds [`RenderRequest`]s from the session's dataset and sort state.
///
/// Borrows the session, so every request reflects the sort directions at the
/// moment it is built. Aggregation is triggered on first use and memoized by
/// the dataset.
pub struct ViewController<'a> {
    session: &'a Session,
}

impl<'a> ViewController<'a> {
    /// Create a new `ViewController` bound to the given session.
    pub fn new(session: &'a Session) -> Self {
        Self { session }
    }

    /// Build the request for `kind` without changing the selected chart.
    pub fn render(&self, kind: ChartKind) -> RenderRequest {
        match kind {
            ChartKind::Pie => self.pie(),
            ChartKind::QuantityBar => self.bar(Metric::Quantity),
            ChartKind::RevenueBar => self.bar(Metric::Revenue),
            ChartKind::TimeSeries => self.time_series(),
        }
    }

    /// Product summaries ordered by `metric` in its current direction.
    ///
    /// The sort is stable, so equal totals stay in product-name order.
    pub fn sorted_products(&self, metric: Metric) -> Vec<ProductSummary> {
        let mut products = self.products().to_vec();
        let direction = self.session.sort().current(metric);
        match metric {
            Metric::Quantity => products
                .sort_by(|a, b| direction.apply(a.total_quantity.cmp(&b.total_quantity))),
            Metric::Revenue => products.sort_by(|a, b| {
                direction.apply(a.total_revenue_millions.total_cmp(&b.total_revenue_millions))
            }),
        }
        products
    }

    /// Formatted rows of the product summary table, in product-name order.
    pub fn summary_table(&self) -> Vec<SummaryRow> {
        self.products()
            .iter()
            .map(|p| SummaryRow {
                product_name: p.product_name.clone(),
                total_quantity: format::quantity(p.total_quantity as f64),
                total_revenue: format::millions(p.total_revenue_millions),
            })
            .collect()
    }

    fn products(&self) -> &'a [ProductSummary] {
        match self.session.dataset() {
            Some(dataset) => &dataset.aggregation().products,
            None => &[],
        }
    }

    fn pie(&self) -> RenderRequest {
        let products = self.products();
        if products.is_empty() {
            return RenderRequest::no_data(ChartKind::Pie, ValueFormat::Millions);
        }

        let points = products
            .iter()
            .map(|p| LabeledValue {
                label: p.product_name.clone(),
                value: p.total_revenue_millions,
            })
            .collect();

        RenderRequest {
            kind: ChartKind::Pie,
            title: ChartKind::Pie.title().to_string(),
            x_axis: None,
            y_axis: None,
            value_format: ValueFormat::Millions,
            sort: None,
            data: ChartData::Labeled(points),
        }
    }

    fn bar(&self, metric: Metric) -> RenderRequest {
        let (kind, y_axis, value_format) = match metric {
            Metric::Quantity => (ChartKind::QuantityBar, "Quantity Sold", ValueFormat::Quantity),
            Metric::Revenue => (ChartKind::RevenueBar, "Revenue in $M", ValueFormat::Millions),
        };

        let products = self.sorted_products(metric);
        if products.is_empty() {
            return RenderRequest::no_data(kind, value_format);
        }

        let points = products
            .into_iter()
            .map(|p| {
                let value = match metric {
                    Metric::Quantity => p.total_quantity as f64,
                    Metric::Revenue => p.total_revenue_millions,
                };
                LabeledValue {
                    label: p.product_name,
                    value,
                }
            })
            .collect();

        RenderRequest {
            kind,
            title: kind.title().to_string(),
            x_axis: Some("Product".to_string()),
            y_axis: Some(y_axis.to_string()),
            value_format,
            sort: Some(self.session.sort().current(metric)),
            data: ChartData::Labeled(points),
        }
    }

    fn time_series(&self) -> RenderRequest {
        let months = match self.session.dataset() {
            Some(dataset) => &dataset.aggregation().months,
            None => return RenderRequest::no_data(ChartKind::TimeSeries, ValueFormat::Quantity),
        };
        if months.is_empty() {
            return RenderRequest::no_data(ChartKind::TimeSeries, ValueFormat::Quantity);
        }

        let points = months
            .iter()
            .map(|m| DatedValue {
                date: m.month_start,
                value: m.total_quantity as f64,
            })
            .collect();

        RenderRequest {
            kind: ChartKind::TimeSeries,
            title: ChartKind::TimeSeries.title().to_string(),
            x_axis: Some("Date".to_string()),
            y_axis: Some("Quantity Sold".to_string()),
            value_format: ValueFormat::Quantity,
            sort: None,
            data: ChartData::Dated(points),
        }
    }
}
