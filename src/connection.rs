//! DuckDB connection wrapper that reads the sales file into a raw table.
//!
//! Uses schema introspection to normalize the table on load:
//! - every non-text column is cast to VARCHAR so the cleaner sees text only
//! - native DATE/TIMESTAMP columns are rendered in the day-month-year format

use crate::config;
use crate::error::{DashboardError, Result};
use crate::models::RawTable;
use crate::source::DataSource;
use duckdb::{types::ValueRef, Connection as DuckDbConnection};
use std::cell::RefCell;
use std::collections::{HashMap, HashSet};

/// Wraps an in-memory DuckDB connection holding the loaded sales rows.
pub struct Connection {
    conn: DuckDbConnection,
    loaded_extensions: RefCell<HashSet<&'static str>>,
}

impl Connection {
    /// Open an in-memory DuckDB database.
    pub fn new() -> Result<Self> {
        let conn = DuckDbConnection::open_in_memory()?;
        Ok(Self {
            conn,
            loaded_extensions: RefCell::new(HashSet::new()),
        })
    }

    /// Read `source` into the raw sales table and return its rows.
    ///
    /// The table is replaced in a single statement, so a failed read leaves
    /// any previously loaded rows in place. A file DuckDB cannot read as a
    /// table is reported as [`DashboardError::Schema`].
    pub fn load_source(&self, source: &DataSource) -> Result<RawTable> {
        source.ensure_exists()?;
        if let Some(extension) = source.format.required_extension() {
            self.ensure_extension(extension)?;
        }

        let reader = source.reader_sql();
        let replace_clause = self.build_text_replace(&reader).map_err(|e| {
            DashboardError::Schema(format!(
                "cannot read {} as a {} table: {}",
                source.path.display(),
                source.format,
                e
            ))
        })?;

        self.conn
            .execute_batch(&format!(
                "CREATE OR REPLACE TABLE {} AS SELECT *{} FROM {}",
                config::RAW_TABLE,
                replace_clause,
                reader
            ))
            .map_err(|e| {
                DashboardError::Schema(format!(
                    "cannot load {}: {}",
                    source.path.display(),
                    e
                ))
            })?;

        let table = self.read_table(config::RAW_TABLE)?;
        tracing::info!(
            path = %source.path.display(),
            format = %source.format,
            columns = table.columns.len(),
            rows = table.rows.len(),
            "loaded sales data"
        );
        Ok(table)
    }

    /// Read every row of a table along with its column names.
    pub fn read_table(&self, table: &str) -> Result<RawTable> {
        let columns = self.columns(table)?;
        let rows = self.execute(&format!("SELECT * FROM {}", quote_ident(table)))?;
        Ok(RawTable::new(columns, rows))
    }

    /// Column names of a table, in table order.
    pub fn columns(&self, table: &str) -> Result<Vec<String>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT column_name FROM (DESCRIBE {})",
            quote_ident(table)
        ))?;
        let mut rows = stmt.query([])?;
        let mut columns = Vec::new();
        while let Some(row) = rows.next()? {
            let name: String = row.get(0)?;
            columns.push(name);
        }
        Ok(columns)
    }

    /// Execute SQL and return results as a `Vec` of `HashMap`s.
    ///
    /// Each row is represented as a `HashMap<String, serde_json::Value>`.
    pub fn execute(&self, sql: &str) -> Result<Vec<HashMap<String, serde_json::Value>>> {
        let mut stmt = self.conn.prepare(sql)?;
        let mut rows_result = stmt.query([])?;

        // Column metadata is only available once the query has run
        let executed = rows_result.as_ref().ok_or_else(|| {
            DashboardError::InvalidArgument(format!("statement produced no result set: {}", sql))
        })?;
        let column_names: Vec<String> = executed
            .column_names()
            .into_iter()
            .map(|s| s.to_string())
            .collect();

        let mut out: Vec<HashMap<String, serde_json::Value>> = Vec::new();

        while let Some(row) = rows_result.next()? {
            let mut map = HashMap::with_capacity(column_names.len());
            for (i, col_name) in column_names.iter().enumerate() {
                let value = convert_value_ref(row.get_ref(i)?);
                map.insert(col_name.clone(), value);
            }
            out.push(map);
        }

        Ok(out)
    }

    /// Install and load a DuckDB extension once per connection.
    fn ensure_extension(&self, name: &'static str) -> Result<()> {
        if self.loaded_extensions.borrow().contains(name) {
            return Ok(());
        }
        self.conn
            .execute_batch(&format!("INSTALL {}; LOAD {};", name, name))?;
        self.loaded_extensions.borrow_mut().insert(name);
        tracing::debug!(extension = name, "loaded DuckDB extension");
        Ok(())
    }

    /// Build a REPLACE clause that turns every column into text.
    ///
    /// Only reads the file's schema (DESCRIBE). VARCHAR columns are left as
    /// they are, dates and timestamps are formatted with the cleaner's date
    /// format, and everything else is cast to VARCHAR.
    fn build_text_replace(&self, reader: &str) -> Result<String> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT column_name, column_type FROM (DESCRIBE SELECT * FROM {})",
            reader
        ))?;

        let mut rows = stmt.query([])?;
        let mut exprs: Vec<String> = Vec::new();

        while let Some(row) = rows.next()? {
            let col_name: String = row.get(0)?;
            let col_type: String = row.get(1)?;
            let col = quote_ident(&col_name);

            if col_type == "VARCHAR" {
                continue;
            }
            if col_type == "DATE" || col_type.starts_with("TIMESTAMP") {
                exprs.push(format!(
                    "strftime({}, '{}') AS {}",
                    col,
                    config::DATE_FORMAT,
                    col
                ));
            } else {
                exprs.push(format!("CAST({} AS VARCHAR) AS {}", col, col));
            }
        }

        if exprs.is_empty() {
            Ok(String::new())
        } else {
            Ok(format!(" REPLACE ({})", exprs.join(", ")))
        }
    }
}

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// Convert a DuckDB `ValueRef` to a `serde_json::Value`.
fn convert_value_ref(val: ValueRef<'_>) -> serde_json::Value {
    match val {
        ValueRef::Null => serde_json::Value::Null,
        ValueRef::Boolean(b) => serde_json::Value::Bool(b),
        ValueRef::TinyInt(n) => serde_json::Value::Number(n.into()),
        ValueRef::SmallInt(n) => serde_json::Value::Number(n.into()),
        ValueRef::Int(n) => serde_json::Value::Number(n.into()),
        ValueRef::BigInt(n) => serde_json::Value::Number(n.into()),
        ValueRef::UTinyInt(n) => serde_json::Value::Number(n.into()),
        ValueRef::USmallInt(n) => serde_json::Value::Number(n.into()),
        ValueRef::UInt(n) => serde_json::Value::Number(n.into()),
        ValueRef::UBigInt(n) => serde_json::Value::Number(n.into()),
        ValueRef::HugeInt(n) => {
            // HugeInt may not fit in i64; fall back to its decimal text
            if let Ok(i) = i64::try_from(n) {
                serde_json::Value::Number(i.into())
            } else {
                serde_json::Value::String(n.to_string())
            }
        }
        ValueRef::Float(f) => serde_json::Number::from_f64(f as f64)
            .map(serde_json::Value::Number)
            .unwrap_or(serde_json::Value::Null),
        ValueRef::Double(f) => serde_json::Number::from_f64(f)
            .map(serde_json::Value::Number)
            .unwrap_or(serde_json::Value::Null),
        ValueRef::Text(bytes) => {
            serde_json::Value::String(String::from_utf8_lossy(bytes).to_string())
        }
        // Loaded tables are all text; other types only appear in ad-hoc queries
        _ => serde_json::Value::Null,
    }
}
