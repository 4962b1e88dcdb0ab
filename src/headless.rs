//! Headless mode: load once, print, exit.
//!
//! Writes the status line and the visible markers to stdout in one of three
//! formats. `--chart` appends the monthly growth series. No terminal UI is
//! started and nothing is colourised.

use clap::ValueEnum;
use serde_json::{json, Value};
use std::fmt::Write as _;
use treemap_core::{geojson, CanonicalRecord, LoadReport, Marker};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// One marker per line after the status line.
    #[default]
    Text,
    /// A single JSON document.
    Json,
    /// A GeoJSON `FeatureCollection` of the visible markers.
    Geojson,
}

/// What to print and how.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeadlessOptions {
    pub format: OutputFormat,
    pub include_pending: bool,
    pub chart: bool,
}

/// Render one load as the full stdout payload.
pub fn render(report: &LoadReport, opts: HeadlessOptions) -> anyhow::Result<String> {
    match opts.format {
        OutputFormat::Text => Ok(render_text(report, opts)),
        OutputFormat::Json => render_json(report, opts),
        OutputFormat::Geojson => {
            let collection = geojson::feature_collection(&report.groups, opts.include_pending);
            Ok(serde_json::to_string_pretty(&collection)? + "\n")
        }
    }
}

fn render_text(report: &LoadReport, opts: HeadlessOptions) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", report.groups.status_line());

    for record in report.groups.visible(opts.include_pending) {
        let _ = writeln!(out, "{}", marker_line(record));
    }

    if opts.chart {
        let _ = writeln!(out);
        for month in &report.growth.months {
            let _ = writeln!(
                out,
                "{}  {:>4}  (total {})",
                month.month, month.count, month.cumulative
            );
        }
        let _ = writeln!(out, "{}", report.growth.note());
    }

    out
}

fn marker_line(record: &CanonicalRecord) -> String {
    format!(
        "[{}] {} ({:.6}, {:.6}) access={}",
        record.moderation(),
        record.name(),
        record.latitude(),
        record.longitude(),
        record.access()
    )
}

fn render_json(report: &LoadReport, opts: HeadlessOptions) -> anyhow::Result<String> {
    let groups = &report.groups;
    let markers = groups
        .markers(opts.include_pending)
        .iter()
        .map(marker_json)
        .collect::<Result<Vec<_>, _>>()?;

    let mut doc = json!({
        "status": groups.status_line(),
        "total_count": groups.total_count,
        "shown_count": groups.shown_count,
        "approved_count": groups.approved.len(),
        "pending_count": groups.pending.len(),
        "rejected_count": groups.rejected_count,
        "dropped_count": groups.dropped_count,
        "loaded_at": report.loaded_at.to_rfc3339(),
        "markers": markers,
    });

    if opts.chart {
        doc["growth"] = json!({
            "months": report.growth.months,
            "approved_total": report.growth.approved_total,
            "note": report.growth.note(),
        });
    }

    Ok(serde_json::to_string_pretty(&doc)? + "\n")
}

/// A marker with its escaped popup fields and the ready-made popup fragment.
fn marker_json(marker: &Marker) -> serde_json::Result<Value> {
    let mut value = serde_json::to_value(marker)?;
    value["popup_html"] = Value::String(marker.popup.to_html());
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use treemap_core::{Normalizer, RawRecord};

    fn report() -> LoadReport {
        let rows = vec![
            RawRecord::new()
                .with("lat", "52.1")
                .with("lng", "0.1")
                .with("name", "Old oak")
                .with("review_status", "approved")
                .with("Timestamp", "2026-03-04 10:00:00"),
            RawRecord::new()
                .with("lat", "52.2")
                .with("lng", "0.2")
                .with("name", "Young birch"),
            RawRecord::new().with("lat", "not a number").with("lng", "0.3"),
        ];
        LoadReport::from_rows(&Normalizer::default(), &rows, chrono::Utc::now())
    }

    #[test]
    fn text_hides_pending_unless_asked() {
        let r = report();
        let out = render(&r, HeadlessOptions::default()).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(
            lines[0],
            "Showing 2 trees (1 approved, 1 pending) out of 3 total records."
        );
        assert_eq!(lines.len(), 2);
        assert!(lines[1].starts_with("[approved] Old oak"));

        let opts = HeadlessOptions { include_pending: true, ..Default::default() };
        let out = render(&r, opts).unwrap();
        assert!(out.contains("[pending] Young birch"));
    }

    #[test]
    fn text_chart_appends_months_and_note() {
        let opts = HeadlessOptions { chart: true, ..Default::default() };
        let out = render(&report(), opts).unwrap();
        assert!(out.contains("2026-03     1  (total 1)"));
        assert!(out.ends_with("Total approved: 1.\n"));
    }

    #[test]
    fn json_counts_and_markers() {
        let opts = HeadlessOptions { format: OutputFormat::Json, ..Default::default() };
        let out = render(&report(), opts).unwrap();
        let v: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(v["total_count"], 3);
        assert_eq!(v["dropped_count"], 1);
        assert_eq!(v["markers"].as_array().map(Vec::len), Some(1));
        assert!(v.get("growth").is_none());
    }

    #[test]
    fn json_markers_carry_escaped_popup() {
        let rows = vec![RawRecord::new()
            .with("lat", "52.0")
            .with("lng", "0.1")
            .with("name", "<script>alert(1)</script>")
            .with("notes", "a & b")
            .with("review_status", "approved")];
        let report = LoadReport::from_rows(&Normalizer::default(), &rows, chrono::Utc::now());
        let opts = HeadlessOptions { format: OutputFormat::Json, ..Default::default() };
        let out = render(&report, opts).unwrap();

        assert!(!out.contains("<script>"));
        let v: serde_json::Value = serde_json::from_str(&out).unwrap();
        let marker = &v["markers"][0];
        assert_eq!(marker["state"], "approved");
        assert_eq!(marker["popup"]["name"], "&lt;script&gt;alert(1)&lt;/script&gt;");
        assert_eq!(marker["popup"]["notes"], "a &amp; b");
        assert!(marker["popup_html"]
            .as_str()
            .unwrap()
            .contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
    }

    #[test]
    fn geojson_is_feature_collection() {
        let opts = HeadlessOptions {
            format: OutputFormat::Geojson,
            include_pending: true,
            ..Default::default()
        };
        let out = render(&report(), opts).unwrap();
        let v: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(v["type"], "FeatureCollection");
        assert_eq!(v["features"].as_array().map(Vec::len), Some(2));
    }
}
