//! Everything derived from one load of the sheet.

use crate::growth::{self, GrowthSeries};
use crate::normalizer::Normalizer;
use crate::partition::{partition_rows, MarkerGroups};
use crate::types::RawRecord;

/// Marker groups and growth series for one load. Rebuilt from scratch on
/// every load; never updated in place.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadReport {
    pub groups: MarkerGroups,
    pub growth: GrowthSeries,
    pub loaded_at: chrono::DateTime<chrono::Utc>,
}

impl LoadReport {
    pub fn from_rows(
        normalizer: &Normalizer,
        rows: &[RawRecord],
        loaded_at: chrono::DateTime<chrono::Utc>,
    ) -> Self {
        Self {
            groups: partition_rows(normalizer, rows),
            growth: growth::aggregate(normalizer, rows),
            loaded_at,
        }
    }
}
