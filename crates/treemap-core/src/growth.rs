//! Approved submissions per calendar month.
//!
//! Only the moderation resolution from the normalizer is reused here; a row
//! does not need valid coordinates to count towards growth. Rows whose
//! timestamp cannot be parsed are skipped.

use crate::normalizer::{moderation_state, Normalizer};
use crate::types::{ModerationState, RawRecord};
use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};
use regex::Regex;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::OnceLock;

pub const EMPTY_NOTE: &str = "No approved trees with timestamps found yet.";
pub const LOAD_ERROR_NOTE: &str = "Could not load chart data.";

// `%.f` also matches an absent fraction.
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%B %d, %Y", "%d %B %Y"];

// ---------------------------------------------------------------------------
// Timestamp parsing
// ---------------------------------------------------------------------------

/// Parse a submission timestamp.
///
/// Generic formats are tried first (RFC 3339, RFC 2822, ISO and US
/// month-first layouts). When none match, a `day/month/year [hh:mm[:ss]]`
/// pattern is tried, which catches sheets exported with a day-first locale.
pub fn parse_timestamp(text: &str) -> Option<NaiveDateTime> {
    let s = text.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_local());
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(s) {
        return Some(dt.naive_local());
    }
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt);
        }
    }
    for fmt in DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return d.and_hms_opt(0, 0, 0);
        }
    }

    parse_day_first(s)
}

fn day_first_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^(\d{1,2})[/.-](\d{1,2})[/.-](\d{4})(?:\s+(\d{1,2}):(\d{2})(?::(\d{2}))?)?$")
            .expect("day-first timestamp pattern must compile")
    })
}

fn parse_day_first(s: &str) -> Option<NaiveDateTime> {
    let caps = day_first_pattern().captures(s)?;
    let num = |i: usize| -> Option<u32> {
        caps.get(i).map_or(Some(0), |m| m.as_str().parse().ok())
    };

    let day = num(1)?;
    let month = num(2)?;
    let year: i32 = caps.get(3)?.as_str().parse().ok()?;

    NaiveDate::from_ymd_opt(year, month, day)?.and_hms_opt(num(4)?, num(5)?, num(6)?)
}

// ---------------------------------------------------------------------------
// Aggregation
// ---------------------------------------------------------------------------

/// A calendar month, ordered chronologically and displayed as `YYYY-MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    pub year: i32,
    pub month: u32,
}

impl YearMonth {
    pub fn of(dt: &NaiveDateTime) -> Self {
        Self {
            year: dt.year(),
            month: dt.month(),
        }
    }
}

impl std::fmt::Display for YearMonth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{:02}", self.year, self.month)
    }
}

impl Serialize for YearMonth {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Approved submissions in one month plus the running total up to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthCount {
    pub month: YearMonth,
    pub count: usize,
    pub cumulative: usize,
}

/// Monthly growth series, sorted by month.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GrowthSeries {
    pub months: Vec<MonthCount>,
    /// Approved rows that landed in a month bucket.
    pub approved_total: usize,
}

impl GrowthSeries {
    pub fn is_empty(&self) -> bool {
        self.months.is_empty()
    }

    /// Caption shown under the chart.
    pub fn note(&self) -> String {
        if self.is_empty() {
            EMPTY_NOTE.to_string()
        } else {
            format!(
                "Updated automatically from the live submissions sheet. Total approved: {}.",
                self.approved_total
            )
        }
    }
}

/// Count approved rows per month of their submission timestamp.
pub fn aggregate(normalizer: &Normalizer, rows: &[RawRecord]) -> GrowthSeries {
    let mut by_month: BTreeMap<YearMonth, usize> = BTreeMap::new();
    let mut approved_total = 0;

    for raw in rows {
        if moderation_state(raw) != ModerationState::Approved {
            continue;
        }
        let Some(ts) = normalizer.timestamp(raw).and_then(parse_timestamp) else {
            tracing::trace!(timestamp = ?normalizer.timestamp(raw), "growth: unparseable timestamp");
            continue;
        };
        approved_total += 1;
        *by_month.entry(YearMonth::of(&ts)).or_default() += 1;
    }

    let mut running = 0;
    let months = by_month
        .into_iter()
        .map(|(month, count)| {
            running += count;
            MonthCount {
                month,
                count,
                cumulative: running,
            }
        })
        .collect();

    GrowthSeries {
        months,
        approved_total,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn ym(s: &str) -> String {
        YearMonth::of(&parse_timestamp(s).unwrap()).to_string()
    }

    #[rstest]
    #[case("2026-02-05T14:03:21Z", "2026-02")]
    #[case("2026-02-05T14:03:21+01:00", "2026-02")]
    #[case("Thu, 05 Feb 2026 14:03:21 +0000", "2026-02")]
    #[case("2026-03-01 08:00:00", "2026-03")]
    #[case("2026-03-01", "2026-03")]
    #[case("2026-02-05T14:03:21.123", "2026-02")]
    #[case("2026-02-05T14:03", "2026-02")]
    #[case("2026-02-05 14:03:21.5", "2026-02")]
    #[case("02/05/2026 14:03:21", "2026-02")]
    #[case("2/5/2026", "2026-02")]
    #[case("13/05/2026 09:15", "2026-05")]
    #[case("31/12/2025", "2025-12")]
    #[case("31.12.2025 23:59:59", "2025-12")]
    fn parses_timestamp_formats(#[case] text: &str, #[case] month: &str) {
        assert_eq!(ym(text), month);
    }

    #[rstest]
    #[case("")]
    #[case("yesterday")]
    #[case("45/45/2026")]
    #[case("13/13/2026")]
    fn rejects_garbage(#[case] text: &str) {
        assert_eq!(parse_timestamp(text), None);
    }

    fn approved(ts: &str) -> RawRecord {
        RawRecord::new().with("review_status", "approved").with("Timestamp", ts)
    }

    #[test]
    fn counts_approved_rows_per_month_with_running_total() {
        let rows = vec![
            approved("2026-03-02"),
            approved("2026-01-15"),
            approved("2026-01-20"),
            RawRecord::new().with("review_status", "pending").with("Timestamp", "2026-01-01"),
            RawRecord::new().with("status", "verified").with("Timestamp", "2026-02-10"),
            approved("not a date"),
        ];
        let series = aggregate(&Normalizer::default(), &rows);
        let summary: Vec<(String, usize, usize)> = series
            .months
            .iter()
            .map(|m| (m.month.to_string(), m.count, m.cumulative))
            .collect();
        assert_eq!(
            summary,
            vec![
                ("2026-01".to_string(), 2, 2),
                ("2026-02".to_string(), 1, 3),
                ("2026-03".to_string(), 1, 4),
            ]
        );
        assert_eq!(series.approved_total, 4);
    }

    #[test]
    fn empty_series_note() {
        let series = aggregate(&Normalizer::default(), &[]);
        assert!(series.is_empty());
        assert_eq!(series.note(), EMPTY_NOTE);
    }

    #[test]
    fn note_reports_total() {
        let series = aggregate(&Normalizer::default(), &[approved("2026-01-01")]);
        assert_eq!(
            series.note(),
            "Updated automatically from the live submissions sheet. Total approved: 1."
        );
    }
}
