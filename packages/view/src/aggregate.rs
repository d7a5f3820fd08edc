//! Record-set statistics.

use barangay_map_barangay_models::{AggregateStats, Barangay};

/// Counts records and sums their resources.
///
/// A record missing any of its three resource counts still contributes
/// the counts it has and is tallied in
/// [`AggregateStats::incomplete_records`]. The total saturates at
/// `u64::MAX` instead of overflowing.
#[must_use]
pub fn aggregate<'a, I>(records: I) -> AggregateStats
where
    I: IntoIterator<Item = &'a Barangay>,
{
    records
        .into_iter()
        .fold(AggregateStats::default(), |mut stats, b| {
            stats.barangay_count += 1;
            stats.total_resources = stats
                .total_resources
                .saturating_add(b.health_centers.unwrap_or(0))
                .saturating_add(b.schools.unwrap_or(0))
                .saturating_add(b.evacuation_sites.unwrap_or(0));
            if b.total_resources().is_none() {
                stats.incomplete_records += 1;
            }
            stats
        })
}
