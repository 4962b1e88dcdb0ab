//! Groups normalised records by moderation state.
//!
//! The input is the sequence of normalizer outcomes for a whole sheet: `Some`
//! for a valid record, `None` for a row that was dropped for bad coordinates.
//! Dropped rows and rejected records still count towards the total so the
//! status line can show how many submissions are hidden.

use crate::normalizer::Normalizer;
use crate::popup::Marker;
use crate::types::{CanonicalRecord, ModerationState, RawRecord};
use serde::Serialize;

/// Static status text shown when a load fails.
pub const LOAD_ERROR_STATUS: &str = "Could not load tree data. Check the log for details.";

/// Result of partitioning one load.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MarkerGroups {
    /// Approved records, in sheet order.
    pub approved: Vec<CanonicalRecord>,
    /// Pending records, in sheet order. Hidden by default in the UI.
    pub pending: Vec<CanonicalRecord>,
    /// Every row seen, valid or not.
    pub total_count: usize,
    /// `approved.len() + pending.len()`.
    pub shown_count: usize,
    /// Valid records excluded because they were rejected.
    pub rejected_count: usize,
    /// Rows the normalizer dropped.
    pub dropped_count: usize,
}

impl MarkerGroups {
    /// Rows that did not make it into either group.
    pub fn excluded_count(&self) -> usize {
        self.rejected_count + self.dropped_count
    }

    /// Records in a single group. Asking for [`ModerationState::Rejected`]
    /// always yields an empty slice.
    pub fn group(&self, state: ModerationState) -> &[CanonicalRecord] {
        match state {
            ModerationState::Approved => &self.approved,
            ModerationState::Pending => &self.pending,
            ModerationState::Rejected => &[],
        }
    }

    /// Approved records, followed by pending ones when `include_pending`.
    pub fn visible(&self, include_pending: bool) -> impl Iterator<Item = &CanonicalRecord> {
        let pending: &[CanonicalRecord] = if include_pending { &self.pending } else { &[] };
        self.approved.iter().chain(pending.iter())
    }

    /// Markers for the visible records.
    pub fn markers(&self, include_pending: bool) -> Vec<Marker> {
        self.visible(include_pending).map(Marker::from).collect()
    }

    /// Plain-text summary for the status area.
    pub fn status_line(&self) -> String {
        format!(
            "Showing {} trees ({} approved, {} pending) out of {} total records.",
            self.shown_count,
            self.approved.len(),
            self.pending.len(),
            self.total_count
        )
    }
}

/// Partition normalizer outcomes into approved and pending groups. Order
/// within each group follows input order.
pub fn partition<I>(outcomes: I) -> MarkerGroups
where
    I: IntoIterator<Item = Option<CanonicalRecord>>,
{
    let mut groups = MarkerGroups::default();

    for outcome in outcomes {
        groups.total_count += 1;
        match outcome {
            None => groups.dropped_count += 1,
            Some(record) => match record.moderation() {
                ModerationState::Approved => groups.approved.push(record),
                ModerationState::Pending => groups.pending.push(record),
                ModerationState::Rejected => groups.rejected_count += 1,
            },
        }
    }

    groups.shown_count = groups.approved.len() + groups.pending.len();

    tracing::debug!(
        total = groups.total_count,
        approved = groups.approved.len(),
        pending = groups.pending.len(),
        rejected = groups.rejected_count,
        dropped = groups.dropped_count,
        "partition complete"
    );

    groups
}

/// Normalise and partition a batch of raw rows in one pass.
pub fn partition_rows(normalizer: &Normalizer, rows: &[RawRecord]) -> MarkerGroups {
    partition(rows.iter().map(|raw| normalizer.normalize(raw)))
}
