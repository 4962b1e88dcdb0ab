//! Domain-specific assertion macros for treemap harnesses.
//!
//! These wrap `pretty_assertions` and add failure messages that say which
//! pipeline count or group was off.

/// Assert the four partition counts and the two group sizes at once.
///
/// ```rust
/// assert_counts!(groups, total: 5, approved: 2, pending: 1, rejected: 1, dropped: 1);
/// ```
#[macro_export]
macro_rules! assert_counts {
    ($groups:expr, total: $t:expr, approved: $a:expr, pending: $p:expr, rejected: $r:expr, dropped: $d:expr) => {{
        let g: &treemap_core::MarkerGroups = &$groups;
        let actual = (
            g.total_count,
            g.approved.len(),
            g.pending.len(),
            g.rejected_count,
            g.dropped_count,
        );
        pretty_assertions::assert_eq!(
            actual,
            ($t, $a, $p, $r, $d),
            "assert_counts! failed: (total, approved, pending, rejected, dropped)"
        );
        pretty_assertions::assert_eq!(
            g.shown_count,
            g.approved.len() + g.pending.len(),
            "assert_counts! failed: shown_count must equal approved + pending"
        );
    }};
}

/// Assert that every record in a group has the given moderation state.
#[macro_export]
macro_rules! assert_all_state {
    ($records:expr, $state:expr) => {{
        for (i, record) in $records.iter().enumerate() {
            if record.moderation() != $state {
                panic!(
                    "assert_all_state! failed at index {}: expected {:?}, got {:?} ({:?})",
                    i,
                    $state,
                    record.moderation(),
                    record.name()
                );
            }
        }
    }};
}

/// Assert the names in a group, in order.
#[macro_export]
macro_rules! assert_names {
    ($records:expr, [$($name:expr),* $(,)?]) => {{
        let actual: Vec<&str> = $records.iter().map(|r| r.name()).collect();
        let expected: Vec<&str> = vec![$($name),*];
        pretty_assertions::assert_eq!(actual, expected, "assert_names! failed");
    }};
}
