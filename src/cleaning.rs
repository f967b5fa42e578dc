//! Row validation: raw text cells in, typed clean records out.
//!
//! Every field has its own parse function. A row is kept only if all four
//! fields parse; a single bad or missing field drops the whole row. Dropped
//! rows are counted but never repaired or defaulted.

use chrono::NaiveDate;

use crate::config;
use crate::error::{DashboardError, Result};
use crate::models::{CleanRecord, LoadReport, RawRecord, RawTable};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Why a single cell was rejected.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FieldError {
    #[error("missing value")]
    Missing,

    #[error("not a number: {0:?}")]
    NotNumeric(String),

    #[error("negative value: {0}")]
    Negative(String),

    #[error("not a whole number: {0}")]
    Fractional(String),

    #[error("quantity above {max}: {value}")]
    TooLarge { value: String, max: u64 },

    #[error("not a {format} date: {value:?}")]
    BadDate { value: String, format: &'static str },
}

/// Why a row was dropped: the first field that failed.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{field}: {source}")]
pub struct RowError {
    pub field: &'static str,
    pub source: FieldError,
}

impl RowError {
    fn at(field: &'static str) -> impl FnOnce(FieldError) -> RowError {
        move |source| RowError { field, source }
    }
}

// ---------------------------------------------------------------------------
// Field parsers
// ---------------------------------------------------------------------------

/// Product names are kept verbatim; only absent or blank names are rejected.
pub fn parse_product_name(cell: Option<&str>) -> std::result::Result<String, FieldError> {
    match cell {
        Some(name) if !name.trim().is_empty() => Ok(name.to_string()),
        _ => Err(FieldError::Missing),
    }
}

/// A non-negative whole number no larger than [`config::MAX_QUANTITY`].
///
/// Stricter than "any numeric value": negative and fractional quantities are
/// rejected and drop the row. `10` and `10.0` are both accepted.
pub fn parse_quantity(cell: Option<&str>) -> std::result::Result<u64, FieldError> {
    let text = non_blank(cell)?;
    let n = match text.parse::<u64>() {
        Ok(n) => n,
        Err(_) => {
            let n = parse_number(text)?;
            if n < 0.0 {
                return Err(FieldError::Negative(text.to_string()));
            }
            if n.fract() != 0.0 {
                return Err(FieldError::Fractional(text.to_string()));
            }
            if n >= u64::MAX as f64 {
                return Err(too_large(text));
            }
            n as u64
        }
    };
    if n > config::MAX_QUANTITY {
        return Err(too_large(text));
    }
    Ok(n)
}

fn too_large(text: &str) -> FieldError {
    FieldError::TooLarge {
        value: text.to_string(),
        max: config::MAX_QUANTITY,
    }
}

/// A finite, non-negative number. Negative prices drop the row.
pub fn parse_unit_price(cell: Option<&str>) -> std::result::Result<f64, FieldError> {
    let text = non_blank(cell)?;
    let n = parse_number(text)?;
    if n < 0.0 {
        return Err(FieldError::Negative(text.to_string()));
    }
    Ok(n)
}

/// A calendar date in [`config::DATE_FORMAT`] (day-month-year).
pub fn parse_date(cell: Option<&str>) -> std::result::Result<NaiveDate, FieldError> {
    let text = non_blank(cell)?;
    NaiveDate::parse_from_str(text, config::DATE_FORMAT).map_err(|_| FieldError::BadDate {
        value: text.to_string(),
        format: config::DATE_FORMAT,
    })
}

fn non_blank(cell: Option<&str>) -> std::result::Result<&str, FieldError> {
    match cell.map(str::trim) {
        Some(text) if !text.is_empty() => Ok(text),
        _ => Err(FieldError::Missing),
    }
}

fn parse_number(text: &str) -> std::result::Result<f64, FieldError> {
    match text.parse::<f64>() {
        Ok(n) if n.is_finite() => Ok(n),
        _ => Err(FieldError::NotNumeric(text.to_string())),
    }
}

// ---------------------------------------------------------------------------
// Record and table cleaning
// ---------------------------------------------------------------------------

/// Validate one row, reporting the first field that fails.
pub fn clean_record(raw: &RawRecord) -> std::result::Result<CleanRecord, RowError> {
    let product_name = parse_product_name(raw.product_name.as_deref())
        .map_err(RowError::at(config::COL_PRODUCT_NAME))?;
    let quantity =
        parse_quantity(raw.quantity.as_deref()).map_err(RowError::at(config::COL_QUANTITY))?;
    let unit_price = parse_unit_price(raw.unit_price.as_deref())
        .map_err(RowError::at(config::COL_SALES_PRICE))?;
    let date = parse_date(raw.date.as_deref()).map_err(RowError::at(config::COL_DATE))?;

    Ok(CleanRecord {
        product_name,
        quantity,
        unit_price,
        date,
    })
}

/// Keep the rows that pass [`clean_record`], in input order.
pub fn clean_records(raw: &[RawRecord]) -> Vec<CleanRecord> {
    clean_records_with_report(raw).0
}

/// Like [`clean_records`], also returning how many rows were kept and dropped.
pub fn clean_records_with_report(raw: &[RawRecord]) -> (Vec<CleanRecord>, LoadReport) {
    let mut kept = Vec::with_capacity(raw.len());
    let mut dropped = 0;

    for (index, record) in raw.iter().enumerate() {
        match clean_record(record) {
            Ok(clean) => kept.push(clean),
            Err(e) => {
                dropped += 1;
                tracing::debug!(row = index, error = %e, "dropping invalid row");
            }
        }
    }

    let report = LoadReport {
        rows_read: raw.len(),
        rows_kept: kept.len(),
        rows_dropped: dropped,
    };
    (kept, report)
}

/// Clean a whole table read from the data file.
///
/// Fails with [`DashboardError::Schema`] if any required column is missing.
/// Invalid rows are dropped; an all-invalid table yields an empty vector.
pub fn clean(table: &RawTable) -> Result<Vec<CleanRecord>> {
    clean_with_report(table).map(|(records, _)| records)
}

/// Like [`clean`], also returning the row counts.
pub fn clean_with_report(table: &RawTable) -> Result<(Vec<CleanRecord>, LoadReport)> {
    let missing = table.missing_columns();
    if !missing.is_empty() {
        return Err(DashboardError::Schema(format!(
            "missing required column(s): {} (found: {})",
            missing.join(", "),
            table.columns.join(", ")
        )));
    }

    let (records, report) = clean_records_with_report(&table.records());
    if report.rows_kept == 0 && report.rows_read > 0 {
        tracing::warn!(rows = report.rows_read, "every row failed validation");
    }
    Ok((records, report))
}
