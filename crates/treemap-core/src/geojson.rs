//! GeoJSON export of visible markers.
//!
//! Produces a `FeatureCollection` with one `Point` feature per record, the
//! same shape the static `trees.geojson` snapshot used. Property values are
//! the unescaped record fields; consumers that build HTML from them must
//! escape again.

use crate::partition::MarkerGroups;
use crate::types::CanonicalRecord;
use serde_json::{json, Value};

/// One GeoJSON `Feature` for a record. Coordinates are `[lng, lat]`.
pub fn feature(record: &CanonicalRecord) -> Value {
    json!({
        "type": "Feature",
        "geometry": {
            "type": "Point",
            "coordinates": [record.longitude(), record.latitude()],
        },
        "properties": {
            "name": record.name(),
            "access": record.access(),
            "notes": record.notes(),
            "photo_url": record.photo_url(),
            "status": record.moderation().to_string(),
        },
    })
}

/// A `FeatureCollection` of approved records, plus pending ones when
/// `include_pending`.
pub fn feature_collection(groups: &MarkerGroups, include_pending: bool) -> Value {
    let features: Vec<Value> = groups.visible(include_pending).map(feature).collect();
    json!({
        "type": "FeatureCollection",
        "features": features,
    })
}
