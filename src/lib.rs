//! treemap — community tree map from a published submissions sheet.
//!
//! The binary is a thin shell over three crates, re-exported here so that
//! integration tests can import them through one path.
//!
//! # Architecture
//!
//! ```text
//! SheetSource ──► csv rows ──► Normalizer ──► Partitioner ──► TUI / headless
//!                     │
//!                     └──► growth::aggregate ──► chart
//! ```
//!
//! Every load is a fresh, read-only pass over the sheet.

pub mod headless;

pub use treemap_core as core;
pub use treemap_feeds as feeds;
pub use treemap_tui as tui;
