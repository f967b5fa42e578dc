//! Terminal sales dashboard.
//!
//! Reads the file named by `SALES_DASHBOARD_DATA` (default: `sales_data.xlsx`
//! on the desktop). Log filter comes from `SALES_DASHBOARD_LOG`.

use sales_dashboard::{config, ui, SalesDashboard};
use tracing_subscriber::prelude::*;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_env(config::LOG_ENV)
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let dashboard = SalesDashboard::builder()
        .data_path(config::data_path_from_env())
        .build()?;
    tracing::info!(%dashboard, "starting dashboard");

    let mut app = ui::App::new(dashboard);
    app.start();
    ui::run(&mut app)?;
    Ok(())
}
