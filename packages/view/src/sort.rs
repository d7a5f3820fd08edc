//! Typed, stable sorting.

use std::cmp::Ordering;

use barangay_map_barangay_models::{Barangay, SortDirection, SortKey};

/// Sorts records by `key` in `direction`.
///
/// Count columns compare numerically, with missing values ordered before
/// present ones. The name column compares case-insensitively. The sort is
/// stable, and descending is the exact reverse of the ascending order for
/// records that do not tie.
#[must_use]
pub fn sort(mut records: Vec<&Barangay>, key: SortKey, direction: SortDirection) -> Vec<&Barangay> {
    records.sort_by(|a, b| {
        let ord = compare(a, b, key);
        if direction.is_ascending() {
            ord
        } else {
            ord.reverse()
        }
    });
    records
}

/// Ascending comparison of two records on one column.
#[must_use]
pub fn compare(a: &Barangay, b: &Barangay, key: SortKey) -> Ordering {
    if key.is_text() {
        a.name.to_lowercase().cmp(&b.name.to_lowercase())
    } else {
        a.count(key).cmp(&b.count(key))
    }
}
