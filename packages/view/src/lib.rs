#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! View pipeline for the barangay map.
//!
//! Every view is derived from the record store in a fixed order:
//!
//! 1. [`filter()`] by case-insensitive name search,
//! 2. [`sort()`] by a typed [`SortKey`](barangay_map_barangay_models::SortKey),
//! 3. [`aggregate()`] into counts,
//! 4. build a render model ([`table`], [`map`], [`dashboard`]).
//!
//! Filtering always runs before sorting, so toggling the sort direction
//! after a search keeps the filtered subset.

pub mod aggregate;
pub mod dashboard;
pub mod filter;
pub mod map;
pub mod sort;
pub mod table;

use barangay_map_barangay_models::Barangay;

pub use aggregate::aggregate;
pub use dashboard::{DashboardSummary, build_dashboard};
pub use filter::filter;
pub use map::{Bounds, MapMarker, MapView, build_map};
pub use sort::sort;
pub use table::{TablePhase, TableRow, TableSession, TableView, ViewEvent, ViewState};

/// Text shown for a missing count.
pub const MISSING_VALUE: &str = "n/a";

/// Derives the working set: `sort(filter(records, term), key, direction)`.
#[must_use]
pub fn working_set<'a>(records: &'a [Barangay], state: &ViewState) -> Vec<&'a Barangay> {
    sort(filter(records, &state.search), state.sort_key, state.direction)
}

/// Formats an optional count for display.
#[must_use]
pub fn display_count(value: Option<u64>) -> String {
    value.map_or_else(|| MISSING_VALUE.to_string(), |v| v.to_string())
}

/// Formats an optional population with thousands separators.
#[must_use]
pub fn display_population(value: Option<u64>) -> String {
    value.map_or_else(
        || MISSING_VALUE.to_string(),
        barangay_map_barangay_models::format_thousands,
    )
}


#[cfg(test)]
mod tests {
    use barangay_map_barangay_models::{SortDirection, SortKey};

    use super::*;
    use crate::fixtures::{alpha_beta, names, town};

    #[test]
    fn working_set_filters_before_sorting() {
        let records = town();
        let state = ViewState {
            search: "pob".to_string(),
            sort_key: SortKey::Population,
            direction: SortDirection::Ascending,
        };
        assert_eq!(
            names(&working_set(&records, &state)),
            vec!["Poblacion Norte", "Poblacion"]
        );

        let flipped = state.toggle_sort(SortKey::Population);
        assert_eq!(
            names(&working_set(&records, &flipped)),
            vec!["Poblacion", "Poblacion Norte"]
        );
    }

    #[test]
    fn scenario_alpha_beta() {
        let records = alpha_beta();
        let stats = aggregate(&records);
        assert_eq!(stats.barangay_count, 2);
        assert_eq!(stats.total_resources, 5);
        assert_eq!(names(&filter(&records, "alp")), vec!["Alpha"]);
        assert_eq!(
            names(&sort(records.iter().collect(), SortKey::Population, SortDirection::Descending)),
            vec!["Alpha", "Beta"]
        );
        assert_eq!(
            names(&sort(records.iter().collect(), SortKey::Name, SortDirection::Ascending)),
            vec!["Alpha", "Beta"]
        );
    }

    #[test]
    fn displays_missing_values() {
        assert_eq!(display_count(Some(3)), "3");
        assert_eq!(display_count(None), MISSING_VALUE);
        assert_eq!(display_population(Some(12_500)), "12,500");
        assert_eq!(display_population(None), MISSING_VALUE);
    }
}
