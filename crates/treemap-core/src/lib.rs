//! treemap-core — pure pipeline stages for the community tree map.
//!
//! # Pipeline
//!
//! ```text
//! RawRecord ──► Normalizer ──► CanonicalRecord ──► Partitioner ──► MarkerGroups
//!     │                                                               │
//!     └──► growth::aggregate (approved per month)          popup / geojson
//! ```
//!
//! Every stage is a pure function over its input. Nothing here does I/O
//! except [`config::Config::load`]; fetching lives in `treemap-feeds` and all
//! mutable display state lives in `treemap-tui`.

pub mod config;
pub mod escape;
pub mod geojson;
pub mod growth;
pub mod normalizer;
pub mod partition;
pub mod popup;
pub mod report;
pub mod types;

pub use escape::{escape_html, Escaped};
pub use normalizer::{normalize, Normalizer};
pub use partition::{partition, partition_rows, MarkerGroups};
pub use popup::{Marker, Popup};
pub use report::LoadReport;
pub use types::{CanonicalRecord, ModerationState, RawRecord};
