//! treemap-feeds — sheet source adapters for treemap.
//!
//! A [`SheetSource`] fetches the submissions CSV once per load. [`load`]
//! runs the whole read-only pipeline on top of it: fetch, parse, then derive
//! a [`LoadReport`]. Every call starts from scratch.

pub mod csv_rows;
pub mod error;
pub mod sheet;

pub use error::LoadError;
pub use sheet::SheetSource;

use treemap_core::{LoadReport, Normalizer};

/// Fetch the sheet and derive marker groups and the growth series.
pub async fn load(source: &SheetSource, normalizer: &Normalizer) -> Result<LoadReport, LoadError> {
    let rows = source.fetch_rows().await.inspect_err(|e| {
        tracing::error!(source = %source.describe(), error = %e, "sheet load failed");
    })?;

    let report = LoadReport::from_rows(normalizer, &rows, chrono::Utc::now());

    tracing::info!(
        source = %source.describe(),
        total = report.groups.total_count,
        shown = report.groups.shown_count,
        months = report.growth.months.len(),
        "sheet loaded"
    );

    Ok(report)
}
