//! Normalizer — turns loosely-typed sheet rows into [`CanonicalRecord`] values.
//!
//! Each logical field has an ordered list of accepted header aliases, because
//! the submissions sheet has been edited by hand and by a form builder over
//! its lifetime. The first alias carrying a non-blank value wins.
//!
//! A row with a missing or non-finite coordinate produces `None`. Moderation
//! state never fails to resolve: see [`resolve_moderation`].

use crate::types::{CanonicalRecord, ModerationState, RawRecord};

// ---------------------------------------------------------------------------
// Header aliases
// ---------------------------------------------------------------------------

pub const LATITUDE_KEYS: &[&str] = &["lat", "Latitude", "latitude"];
pub const LONGITUDE_KEYS: &[&str] = &["lng", "Longitude", "longitude"];
pub const NAME_KEYS: &[&str] = &["name", "Tree name / label", "Tree name"];
pub const ACCESS_KEYS: &[&str] = &["access", "Access"];
pub const NOTES_KEYS: &[&str] = &["notes", "Notes / how to find it", "Notes"];
pub const PHOTO_KEYS: &[&str] = &["photo_url", "Photo URL", "photo"];
pub const REVIEW_STATUS_KEYS: &[&str] = &["review_status", "Review status", "Review Status"];
pub const LEGACY_STATUS_KEYS: &[&str] = &["status"];
pub const TIMESTAMP_KEYS: &[&str] = &["Timestamp", "timestamp"];

pub const DEFAULT_NAME: &str = "Unnamed tree";
pub const DEFAULT_ACCESS: &str = "unknown";

// ---------------------------------------------------------------------------
// Moderation
// ---------------------------------------------------------------------------

/// Resolve a moderation state from the review column and the legacy status
/// column.
///
/// | `review_status` | `status`   | result   |
/// |-----------------|------------|----------|
/// | `approved`      | any        | Approved |
/// | `rejected`      | any        | Rejected |
/// | other non-empty | any        | Pending  |
/// | empty / absent  | `verified` | Approved |
/// | empty / absent  | other      | Pending  |
///
/// Both inputs are compared trimmed and case-insensitively.
pub fn resolve_moderation(
    review_status: Option<&str>,
    legacy_status: Option<&str>,
) -> ModerationState {
    let review = fold(review_status);
    let legacy = fold(legacy_status);

    match (review.as_str(), legacy.as_str()) {
        ("approved", _) => ModerationState::Approved,
        ("rejected", _) => ModerationState::Rejected,
        ("", "verified") => ModerationState::Approved,
        ("", _) => ModerationState::Pending,
        (_, _) => ModerationState::Pending,
    }
}

/// Moderation state of a raw row, using the standard header aliases.
pub fn moderation_state(raw: &RawRecord) -> ModerationState {
    resolve_moderation(
        raw.first_of(REVIEW_STATUS_KEYS),
        raw.first_of(LEGACY_STATUS_KEYS),
    )
}

fn fold(value: Option<&str>) -> String {
    value.map(|v| v.trim().to_lowercase()).unwrap_or_default()
}

// ---------------------------------------------------------------------------
// Coordinates
// ---------------------------------------------------------------------------

/// Parse a coordinate cell. Empty, non-numeric, NaN and infinite values are
/// all rejected.
pub fn parse_coordinate(text: &str) -> Option<f64> {
    text.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

// ---------------------------------------------------------------------------
// Normalizer
// ---------------------------------------------------------------------------

/// Row normalizer. The only configurable part is which header carries the
/// submission timestamp; everything else uses the fixed alias tables above.
#[derive(Debug, Clone)]
pub struct Normalizer {
    timestamp_keys: Vec<String>,
}

impl Default for Normalizer {
    fn default() -> Self {
        Self {
            timestamp_keys: TIMESTAMP_KEYS.iter().map(|k| k.to_string()).collect(),
        }
    }
}

impl Normalizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Prefer `header` for the submission timestamp, ahead of the built-in
    /// `Timestamp` / `timestamp` aliases. A blank header is ignored.
    pub fn with_timestamp_header(mut self, header: impl Into<String>) -> Self {
        let header = header.into().trim().to_string();
        if header.is_empty() {
            return self;
        }
        self.timestamp_keys.retain(|k| !k.eq_ignore_ascii_case(&header));
        self.timestamp_keys.insert(0, header);
        self
    }

    /// Submission timestamp text of a raw row.
    pub fn timestamp<'a>(&self, raw: &'a RawRecord) -> Option<&'a str> {
        self.timestamp_keys.iter().find_map(|k| raw.get(k))
    }

    /// Normalise one row. Returns `None` when either coordinate is missing or
    /// not a finite number.
    pub fn normalize(&self, raw: &RawRecord) -> Option<CanonicalRecord> {
        let latitude = raw.first_of(LATITUDE_KEYS).and_then(parse_coordinate);
        let longitude = raw.first_of(LONGITUDE_KEYS).and_then(parse_coordinate);

        let (Some(latitude), Some(longitude)) = (latitude, longitude) else {
            tracing::trace!(
                lat = ?raw.first_of(LATITUDE_KEYS),
                lng = ?raw.first_of(LONGITUDE_KEYS),
                "normalizer: dropping row without finite coordinates"
            );
            return None;
        };

        Some(CanonicalRecord::new(
            raw.first_of(NAME_KEYS).unwrap_or(DEFAULT_NAME).to_string(),
            raw.first_of(ACCESS_KEYS).unwrap_or(DEFAULT_ACCESS).to_string(),
            raw.first_of(NOTES_KEYS).unwrap_or_default().to_string(),
            raw.first_of(PHOTO_KEYS).map(str::to_string),
            latitude,
            longitude,
            moderation_state(raw),
            self.timestamp(raw).map(str::to_string),
        ))
    }
}

/// Normalise one row with the default [`Normalizer`].
pub fn normalize(raw: &RawRecord) -> Option<CanonicalRecord> {
    Normalizer::default().normalize(raw)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
