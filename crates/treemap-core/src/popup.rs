//! Marker payloads handed to a renderer.
//!
//! A [`Marker`] is a positioned [`Popup`]. Every text field of a popup is
//! [`Escaped`], so renderers can interpolate them into HTML directly.

use crate::escape::{escape_html, Escaped};
use crate::types::{CanonicalRecord, ModerationState};
use serde::Serialize;

/// Escaped popup content for one record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Popup {
    pub name: Escaped,
    pub access: Escaped,
    pub notes: Escaped,
    pub photo_url: Option<Escaped>,
}

impl Popup {
    pub fn from_record(record: &CanonicalRecord) -> Self {
        Self {
            name: escape_html(record.name()),
            access: escape_html(record.access()),
            notes: escape_html(record.notes()),
            photo_url: record.photo_url().map(escape_html),
        }
    }

    /// HTML fragment shown when a marker is clicked. The photo's alt text
    /// reuses the escaped name.
    pub fn to_html(&self) -> String {
        let mut html = String::from(r#"<div style="min-width:220px">"#);
        html.push_str(&format!(
            r#"<div style="font-weight:700;margin-bottom:6px">{}</div>"#,
            self.name
        ));
        html.push_str(&format!("<div><b>Access:</b> {}</div>", self.access));
        if !self.notes.is_empty() {
            html.push_str(&format!(r#"<div style="margin-top:6px">{}</div>"#, self.notes));
        }
        if let Some(ref src) = self.photo_url {
            html.push_str(&format!(
                r#"<div style="margin-top:8px"><img src="{}" alt="{}" style="max-width:220px;border-radius:8px"/></div>"#,
                src, self.name
            ));
        }
        html.push_str("</div>");
        html
    }
}

/// A positioned map marker.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    pub latitude: f64,
    pub longitude: f64,
    pub state: ModerationState,
    pub popup: Popup,
}

impl From<&CanonicalRecord> for Marker {
    fn from(record: &CanonicalRecord) -> Self {
        Self {
            latitude: record.latitude(),
            longitude: record.longitude(),
            state: record.moderation(),
            popup: Popup::from_record(record),
        }
    }
}
