//! Core types for treemap-core.
//!
//! This module defines the data that flows through one load cycle: the
//! loosely-typed [`RawRecord`] parsed from a sheet row, the validated
//! [`CanonicalRecord`] produced by the normalizer, and the
//! [`ModerationState`] discriminant used to group records.

use serde::Serialize;

/// One spreadsheet row as parsed from a CSV with a header row.
///
/// Headers are kept in sheet order. Lookups through [`RawRecord::get`] and
/// [`RawRecord::first_of`] ignore surrounding whitespace and ASCII case in the
/// header name, and treat a blank value as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRecord {
    fields: Vec<(String, String)>,
}

impl RawRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a header/value pair. Later duplicates of the same header are
    /// kept but never win a lookup over an earlier non-blank value.
    pub fn insert(&mut self, header: impl Into<String>, value: impl Into<String>) {
        self.fields.push((header.into(), value.into()));
    }

    /// Builder-style [`RawRecord::insert`].
    pub fn with(mut self, header: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(header, value);
        self
    }

    /// Trimmed, non-blank value for `header`.
    pub fn get(&self, header: &str) -> Option<&str> {
        let wanted = header.trim();
        self.fields
            .iter()
            .filter(|(k, _)| k.trim().eq_ignore_ascii_case(wanted))
            .map(|(_, v)| v.trim())
            .find(|v| !v.is_empty())
    }

    /// Resolve the first candidate header that carries a value.
    pub fn first_of(&self, candidates: &[&str]) -> Option<&str> {
        candidates.iter().find_map(|c| self.get(c))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K, V> FromIterator<(K, V)> for RawRecord
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

/// Trust status of a submitted record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ModerationState {
    Approved,
    Pending,
    Rejected,
}

impl std::fmt::Display for ModerationState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ModerationState::Approved => write!(f, "approved"),
            ModerationState::Pending => write!(f, "pending"),
            ModerationState::Rejected => write!(f, "rejected"),
        }
    }
}

/// A validated, normalised submission ready for display.
///
/// Only the normalizer constructs these, and only when both coordinates are
/// finite. Fields are read through accessors; there is no way to mutate a
/// record once it has been derived.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CanonicalRecord {
    name: String,
    access: String,
    notes: String,
    photo_url: Option<String>,
    latitude: f64,
    longitude: f64,
    moderation: ModerationState,
    submitted_at: Option<String>,
}

impl CanonicalRecord {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        name: String,
        access: String,
        notes: String,
        photo_url: Option<String>,
        latitude: f64,
        longitude: f64,
        moderation: ModerationState,
        submitted_at: Option<String>,
    ) -> Self {
        Self {
            name,
            access,
            notes,
            photo_url,
            latitude,
            longitude,
            moderation,
            submitted_at,
        }
    }

    /// Display label. Falls back to "Unnamed tree".
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Access note. Falls back to "unknown".
    pub fn access(&self) -> &str {
        &self.access
    }

    /// Free-text notes, empty when the sheet had none.
    pub fn notes(&self) -> &str {
        &self.notes
    }

    pub fn photo_url(&self) -> Option<&str> {
        self.photo_url.as_deref()
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    pub fn moderation(&self) -> ModerationState {
        self.moderation
    }

    /// Raw submission timestamp text, exactly as the sheet had it.
    pub fn submitted_at(&self) -> Option<&str> {
        self.submitted_at.as_deref()
    }
}
