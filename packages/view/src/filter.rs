//! Name search.

use barangay_map_barangay_models::Barangay;

/// Keeps records whose name contains `term`, ignoring case.
///
/// An empty term matches everything. Input order is preserved.
#[must_use]
pub fn filter<'a, I>(records: I, term: &str) -> Vec<&'a Barangay>
where
    I: IntoIterator<Item = &'a Barangay>,
{
    let needle = term.to_lowercase();
    records
        .into_iter()
        .filter(|b| needle.is_empty() || b.name.to_lowercase().contains(&needle))
        .collect()
}
