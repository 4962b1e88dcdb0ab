//! Ergonomic constructors for sheet rows.
//!
//! These builders are designed for readability in test assertions, not for
//! production use.

use treemap_core::RawRecord;

// ---------------------------------------------------------------------------
// RawRecordBuilder
// ---------------------------------------------------------------------------

/// Fluent builder for [`RawRecord`] fixtures using the form's header names.
///
/// # Example
///
/// ```rust
/// let row = RawRecordBuilder::at(52.2, 0.12)
///     .name("Old oak")
///     .review_status("approved")
///     .timestamp("2026-03-04 10:00:00")
///     .build();
/// ```
pub struct RawRecordBuilder {
    record: RawRecord,
}

impl RawRecordBuilder {
    /// A row with numeric coordinates.
    pub fn at(lat: f64, lng: f64) -> Self {
        Self::new().field("lat", lat.to_string()).field("lng", lng.to_string())
    }

    /// A row with no fields at all.
    pub fn new() -> Self {
        Self {
            record: RawRecord::new(),
        }
    }

    pub fn field(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.record.insert(key, value);
        self
    }

    pub fn name(self, name: &str) -> Self {
        self.field("name", name)
    }

    pub fn access(self, access: &str) -> Self {
        self.field("access", access)
    }

    pub fn notes(self, notes: &str) -> Self {
        self.field("notes", notes)
    }

    pub fn photo(self, url: &str) -> Self {
        self.field("photo_url", url)
    }

    pub fn review_status(self, status: &str) -> Self {
        self.field("review_status", status)
    }

    pub fn legacy_status(self, status: &str) -> Self {
        self.field("status", status)
    }

    pub fn timestamp(self, ts: &str) -> Self {
        self.field("Timestamp", ts)
    }

    pub fn build(self) -> RawRecord {
        self.record
    }
}

impl Default for RawRecordBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// `n` approved rows spread along a line, for volume tests.
pub fn approved_rows(n: usize) -> Vec<RawRecord> {
    (0..n)
        .map(|i| {
            RawRecordBuilder::at(52.0 + i as f64 * 1e-4, 0.1)
                .name(&format!("tree {i}"))
                .review_status("approved")
                .build()
        })
        .collect()
}
