//! Connection integration tests: reading sales files into the raw table.

mod common;

use common::{write_file, SAMPLE_CSV};
use sales_dashboard::{
    ChartKind, Connection, DashboardError, DataSource, Event, SalesDashboard, SourceFormat,
};
use serde_json::Value;

// ---------------------------------------------------------------------------
// DataSource
// ---------------------------------------------------------------------------

#[test]
fn format_is_detected_from_extension() {
    let cases = [
        ("sales.csv", SourceFormat::Csv),
        ("sales.TSV", SourceFormat::Tsv),
        ("sales.xlsx", SourceFormat::Xlsx),
        ("sales.json", SourceFormat::Json),
        ("sales.jsonl", SourceFormat::NdJson),
        ("sales.parquet", SourceFormat::Parquet),
    ];
    for (name, expected) in cases {
        assert_eq!(DataSource::new(name).unwrap().format, expected, "{}", name);
    }
}

#[test]
fn unsupported_extension_is_rejected() {
    let err = DataSource::new("sales.docx").unwrap_err();
    assert!(matches!(err, DashboardError::InvalidArgument(_)));
    assert!(DataSource::new("sales").is_err());
}

#[test]
fn only_xlsx_needs_an_extension() {
    assert_eq!(SourceFormat::Xlsx.required_extension(), Some("excel"));
    assert_eq!(SourceFormat::Csv.required_extension(), None);
}

#[test]
fn missing_file_is_not_found() {
    let tmp_dir = tempfile::tempdir().unwrap();
    let source = DataSource::new(tmp_dir.path().join("absent.csv")).unwrap();
    let conn = Connection::new().unwrap();

    let err = conn.load_source(&source).unwrap_err();
    assert!(matches!(err, DashboardError::NotFound(_)));
}

// ---------------------------------------------------------------------------
// load_source
// ---------------------------------------------------------------------------

#[test]
fn csv_loads_every_row_as_text() {
    let tmp_dir = tempfile::tempdir().unwrap();
    let path = write_file(tmp_dir.path(), "sales.csv", SAMPLE_CSV);
    let conn = Connection::new().unwrap();

    let table = conn.load_source(&DataSource::new(&path).unwrap()).unwrap();
    assert_eq!(
        table.columns,
        vec!["Product Name", "Quantity", "Sales Price", "Date"]
    );
    assert_eq!(table.rows.len(), 9);
    assert_eq!(table.rows[0]["Product Name"], "Laptop");
    assert_eq!(table.rows[0]["Quantity"], "5");
    assert_eq!(table.rows[0]["Date"], "03-01-2024");
    assert_eq!(table.rows[6]["Quantity"], "N/A");
}

#[test]
fn csv_empty_cell_is_null() {
    let tmp_dir = tempfile::tempdir().unwrap();
    let path = write_file(tmp_dir.path(), "sales.csv", SAMPLE_CSV);
    let conn = Connection::new().unwrap();

    let table = conn.load_source(&DataSource::new(&path).unwrap()).unwrap();
    assert_eq!(table.rows[8]["Sales Price"], Value::Null);
    assert_eq!(table.records()[8].unit_price, None);
}

#[test]
fn tsv_is_read_with_tab_delimiter() {
    let tmp_dir = tempfile::tempdir().unwrap();
    let path = write_file(
        tmp_dir.path(),
        "sales.tsv",
        "Product Name\tQuantity\tSales Price\tDate\nWidget\t10\t2.0\t01-01-2024\n",
    );
    let conn = Connection::new().unwrap();

    let table = conn.load_source(&DataSource::new(&path).unwrap()).unwrap();
    assert_eq!(table.columns.len(), 4);
    assert_eq!(table.rows[0]["Sales Price"], "2.0");
}

#[test]
fn ndjson_numbers_are_cast_to_text() {
    let tmp_dir = tempfile::tempdir().unwrap();
    let path = write_file(
        tmp_dir.path(),
        "sales.ndjson",
        concat!(
            r#"{"Product Name": "Widget", "Quantity": 10, "Sales Price": 2.5, "Date": "01-01-2024"}"#,
            "\n",
            r#"{"Product Name": "Gadget", "Quantity": 3, "Sales Price": 10.0, "Date": "02-02-2024"}"#,
            "\n",
        ),
    );
    let conn = Connection::new().unwrap();

    let table = conn.load_source(&DataSource::new(&path).unwrap()).unwrap();
    assert_eq!(table.rows.len(), 2);
    assert_eq!(table.rows[0]["Quantity"], "10");
    assert_eq!(table.rows[0]["Sales Price"], "2.5");
    assert_eq!(table.rows[0]["Date"], "01-01-2024");
}

#[test]
fn native_date_columns_use_day_month_year() {
    let tmp_dir = tempfile::tempdir().unwrap();
    let path = tmp_dir.path().join("sales.parquet");
    duckdb::Connection::open_in_memory()
        .unwrap()
        .execute_batch(&format!(
            "COPY (SELECT 'Widget' AS \"Product Name\", 10 AS \"Quantity\", \
             2.5 AS \"Sales Price\", DATE '2024-01-15' AS \"Date\") \
             TO '{}' (FORMAT PARQUET)",
            path.to_string_lossy().replace('\\', "/")
        ))
        .unwrap();

    let conn = Connection::new().unwrap();
    let table = conn.load_source(&DataSource::new(&path).unwrap()).unwrap();
    assert_eq!(table.rows[0]["Date"], "15-01-2024");
    assert_eq!(table.rows[0]["Quantity"], "10");
}

#[test]
fn unreadable_json_is_schema_error() {
    let tmp_dir = tempfile::tempdir().unwrap();
    let path = write_file(tmp_dir.path(), "sales.json", "this is { not json");
    let conn = Connection::new().unwrap();

    let err = conn.load_source(&DataSource::new(&path).unwrap()).unwrap_err();
    match err {
        DashboardError::Schema(msg) => {
            // Fails in the parser, not in extension loading
            assert!(!msg.contains("xtension"), "{}", msg);
            assert!(msg.contains("JSON"), "{}", msg);
        }
        other => panic!("expected Schema error, got {:?}", other),
    }
}

// ---------------------------------------------------------------------------
// read_table / execute
// ---------------------------------------------------------------------------

#[test]
fn read_table_matches_loaded_rows() {
    let tmp_dir = tempfile::tempdir().unwrap();
    let path = write_file(tmp_dir.path(), "sales.csv", SAMPLE_CSV);
    let conn = Connection::new().unwrap();
    let loaded = conn.load_source(&DataSource::new(&path).unwrap()).unwrap();

    let reread = conn.read_table("sales_raw").unwrap();
    assert_eq!(reread.columns, loaded.columns);
    assert_eq!(reread.rows.len(), 9);
}

#[test]
fn execute_returns_rows_keyed_by_column() {
    let tmp_dir = tempfile::tempdir().unwrap();
    let path = write_file(tmp_dir.path(), "sales.csv", SAMPLE_CSV);
    let conn = Connection::new().unwrap();
    conn.load_source(&DataSource::new(&path).unwrap()).unwrap();

    let rows = conn
        .execute("SELECT COUNT(*) AS n FROM sales_raw WHERE \"Product Name\" = 'Phone'")
        .unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["n"].as_i64(), Some(3));
}

#[test]
fn failed_reload_keeps_previous_table() {
    let tmp_dir = tempfile::tempdir().unwrap();
    let path = write_file(tmp_dir.path(), "sales.json", "not json");
    let good = write_file(tmp_dir.path(), "sales.csv", SAMPLE_CSV);
    let conn = Connection::new().unwrap();
    conn.load_source(&DataSource::new(&good).unwrap()).unwrap();

    assert!(conn.load_source(&DataSource::new(&path).unwrap()).is_err());
    assert_eq!(conn.read_table("sales_raw").unwrap().rows.len(), 9);
}

// ---------------------------------------------------------------------------
// Excel
// ---------------------------------------------------------------------------

/// The excel extension is downloaded by DuckDB on first use.
fn excel_available() -> bool {
    let available = duckdb::Connection::open_in_memory()
        .and_then(|conn| conn.execute_batch("INSTALL excel; LOAD excel;"))
        .is_ok();
    if !available {
        eprintln!("  [SKIP] DuckDB excel extension not available");
    }
    available
}

fn xlsx_fixture() -> std::path::PathBuf {
    std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/sales.xlsx")
}

#[test]
fn xlsx_date_cells_and_bad_numbers() {
    if !excel_available() {
        return;
    }
    let conn = Connection::new().unwrap();
    let table = conn
        .load_source(&DataSource::new(xlsx_fixture()).unwrap())
        .unwrap();

    assert_eq!(
        table.columns,
        vec!["Product Name", "Quantity", "Sales Price", "Date"]
    );
    assert_eq!(table.rows.len(), 4);
    assert_eq!(table.rows[0]["Date"], "03-01-2024");
    assert_eq!(table.rows[3]["Date"], "14-02-2024");
    // Text in a numeric column becomes NULL
    assert_eq!(table.rows[2]["Product Name"], "Tablet");
    assert_eq!(table.rows[2]["Quantity"], Value::Null);
}

#[test]
fn xlsx_loads_through_dashboard() {
    if !excel_available() {
        return;
    }
    let mut dashboard = SalesDashboard::builder()
        .data_path(xlsx_fixture())
        .build()
        .unwrap();

    let report = dashboard.load().unwrap();
    assert_eq!(report.rows_read, 4);
    assert_eq!(report.rows_kept, 3);
    assert_eq!(report.rows_dropped, 1);

    let summary = dashboard.summary_table();
    let names: Vec<&str> = summary.iter().map(|r| r.product_name.as_str()).collect();
    assert_eq!(names, vec!["Laptop", "Phone"]);
    assert_eq!(summary[0].total_quantity, "5");
    assert_eq!(summary[1].total_quantity, "32");

    let months = dashboard
        .handle(Event::SelectView(ChartKind::TimeSeries))
        .unwrap()
        .unwrap();
    assert_eq!(months.labels(), vec!["2024-01", "2024-02"]);
    assert_eq!(months.values(), vec![25.0, 12.0]);
}
