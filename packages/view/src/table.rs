//! Resources table: view state, the search/sort session, and row models.
//!
//! [`ViewState`] is a plain value. Each user action produces a new state
//! and a freshly derived [`TableView`]; nothing is held in globals.

use barangay_map_barangay_models::{Barangay, SortDirection, SortKey};
use serde::{Deserialize, Serialize};

use crate::{display_count, display_population, working_set};

/// Search term plus active sort column and direction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewState {
    /// Case-insensitive name search. Empty matches everything.
    pub search: String,
    /// Active sort column.
    pub sort_key: SortKey,
    /// Active sort direction.
    pub direction: SortDirection,
}

impl ViewState {
    /// Returns a copy with a new search term.
    #[must_use]
    pub fn with_search(&self, term: impl Into<String>) -> Self {
        Self {
            search: term.into(),
            ..self.clone()
        }
    }

    /// Returns the state after a click on a column header.
    ///
    /// Clicking the active column reverses the direction; clicking a
    /// different column switches to it in ascending order.
    #[must_use]
    pub fn toggle_sort(&self, key: SortKey) -> Self {
        let direction = if key == self.sort_key {
            self.direction.reversed()
        } else {
            SortDirection::Ascending
        };
        Self {
            search: self.search.clone(),
            sort_key: key,
            direction,
        }
    }

    /// Returns the state after `event`.
    #[must_use]
    pub fn apply(&self, event: &ViewEvent) -> Self {
        match event {
            ViewEvent::Search(term) => self.with_search(term.clone()),
            ViewEvent::SortClick(key) => self.toggle_sort(*key),
        }
    }
}

/// A user action on the resources table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewEvent {
    /// The search box changed.
    Search(String),
    /// A column header was clicked.
    SortClick(SortKey),
}

/// Where the table session is in its refresh cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TablePhase {
    /// Nothing derived yet.
    Idle,
    /// The search filter is being applied.
    Filtering,
    /// The filtered rows have been sorted and are ready to display.
    Sorted,
}

/// One rendered table row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableRow {
    /// Barangay name.
    pub name: String,
    /// Population with thousands separators.
    pub population: String,
    /// Health center count.
    pub health_centers: String,
    /// School count.
    pub schools: String,
    /// Evacuation site count.
    pub evacuation_sites: String,
}

impl From<&Barangay> for TableRow {
    fn from(b: &Barangay) -> Self {
        Self {
            name: b.name.clone(),
            population: display_population(b.population),
            health_centers: display_count(b.health_centers),
            schools: display_count(b.schools),
            evacuation_sites: display_count(b.evacuation_sites),
        }
    }
}

/// The state a table was derived from and its rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableView {
    /// State the rows reflect.
    pub state: ViewState,
    /// Rows in display order.
    pub rows: Vec<TableRow>,
}

impl TableView {
    /// Derives the table for `state` from the full record set.
    #[must_use]
    pub fn derive(records: &[Barangay], state: ViewState) -> Self {
        let rows = working_set(records, &state)
            .into_iter()
            .map(TableRow::from)
            .collect();
        Self { state, rows }
    }
}

/// Drives the table through search and sort events.
///
/// Every event re-runs the full pass (filter, then sort) over the
/// complete record set, so a sort click after a search keeps the search.
#[derive(Debug)]
pub struct TableSession<'a> {
    records: &'a [Barangay],
    state: ViewState,
    phase: TablePhase,
}

impl<'a> TableSession<'a> {
    /// Starts a session over `records` with the default state
    /// (no search, name ascending).
    #[must_use]
    pub fn new(records: &'a [Barangay]) -> Self {
        Self::with_state(records, ViewState::default())
    }

    /// Starts a session with an explicit initial state.
    #[must_use]
    pub const fn with_state(records: &'a [Barangay], state: ViewState) -> Self {
        Self {
            records,
            state,
            phase: TablePhase::Idle,
        }
    }

    /// Current phase.
    #[must_use]
    pub const fn phase(&self) -> TablePhase {
        self.phase
    }

    /// Current state.
    #[must_use]
    pub const fn state(&self) -> &ViewState {
        &self.state
    }

    /// Derives the view for the current state without changing it.
    pub fn refresh(&mut self) -> TableView {
        self.run_pass()
    }

    /// Handles a search box change.
    pub fn search(&mut self, term: impl Into<String>) -> TableView {
        self.handle(&ViewEvent::Search(term.into()))
    }

    /// Handles a column header click.
    pub fn click_sort(&mut self, key: SortKey) -> TableView {
        self.handle(&ViewEvent::SortClick(key))
    }

    /// Applies `event` and derives the new view.
    pub fn handle(&mut self, event: &ViewEvent) -> TableView {
        self.state = self.state.apply(event);
        self.run_pass()
    }

    fn run_pass(&mut self) -> TableView {
        self.transition(TablePhase::Filtering);
        let view = TableView::derive(self.records, self.state.clone());
        self.transition(TablePhase::Sorted);
        view
    }

    fn transition(&mut self, next: TablePhase) {
        log::trace!("Table phase {:?} -> {next:?}", self.phase);
        self.phase = next;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{alpha_beta, town};

    fn row_names(view: &TableView) -> Vec<&str> {
        view.rows.iter().map(|r| r.name.as_str()).collect()
    }

    #[test]
    fn same_key_twice_reverses_direction() {
        let state = ViewState::default().toggle_sort(SortKey::Schools);
        assert_eq!(state.sort_key, SortKey::Schools);
        assert_eq!(state.direction, SortDirection::Ascending);

        let state = state.toggle_sort(SortKey::Schools);
        assert_eq!(state.direction, SortDirection::Descending);

        let state = state.toggle_sort(SortKey::Schools);
        assert_eq!(state.direction, SortDirection::Ascending);
    }

    #[test]
    fn new_key_resets_to_ascending() {
        let state = ViewState::default()
            .toggle_sort(SortKey::Population)
            .toggle_sort(SortKey::Population);
        assert_eq!(state.direction, SortDirection::Descending);

        let state = state.toggle_sort(SortKey::Name);
        assert_eq!(state.sort_key, SortKey::Name);
        assert_eq!(state.direction, SortDirection::Ascending);
    }

    #[test]
    fn clicking_default_name_column_reverses() {
        let state = ViewState::default().toggle_sort(SortKey::Name);
        assert_eq!(state.direction, SortDirection::Descending);
    }

    #[test]
    fn toggle_keeps_search() {
        let state = ViewState::default()
            .with_search("pob")
            .toggle_sort(SortKey::Population);
        assert_eq!(state.search, "pob");
    }

    #[test]
    fn session_walks_through_phases() {
        let records = town();
        let mut session = TableSession::new(&records);
        assert_eq!(session.phase(), TablePhase::Idle);

        let view = session.refresh();
        assert_eq!(session.phase(), TablePhase::Sorted);
        assert_eq!(view.rows.len(), records.len());
        assert_eq!(view.rows[0].name, "Alae");

        session.search("pob");
        assert_eq!(session.phase(), TablePhase::Sorted);
        session.click_sort(SortKey::Population);
        assert_eq!(session.phase(), TablePhase::Sorted);
    }

    #[test]
    fn sort_click_after_search_keeps_filtered_subset() {
        let records = town();
        let mut session = TableSession::new(&records);

        let view = session.search("POB");
        assert_eq!(row_names(&view), vec!["Poblacion", "Poblacion Norte"]);

        let view = session.click_sort(SortKey::Population);
        assert_eq!(row_names(&view), vec!["Poblacion Norte", "Poblacion"]);

        let view = session.click_sort(SortKey::Population);
        assert_eq!(row_names(&view), vec!["Poblacion", "Poblacion Norte"]);
        assert_eq!(view.state.search, "POB");
        assert_eq!(view.state.direction, SortDirection::Descending);
    }

    #[test]
    fn clearing_search_restores_all_rows() {
        let records = town();
        let mut session = TableSession::new(&records);
        session.click_sort(SortKey::Schools);
        assert_eq!(session.search("norte").rows.len(), 1);
        let view = session.search("");
        assert_eq!(view.rows.len(), records.len());
        assert_eq!(view.state.sort_key, SortKey::Schools);
    }

    #[test]
    fn rows_are_formatted() {
        let mut records = alpha_beta();
        records[1].schools = None;
        let view = TableView::derive(&records, ViewState::default());
        assert_eq!(
            view.rows[0],
            TableRow {
                name: "Alpha".to_string(),
                population: "1,000".to_string(),
                health_centers: "1".to_string(),
                schools: "2".to_string(),
                evacuation_sites: "1".to_string(),
            }
        );
        assert_eq!(view.rows[1].schools, "n/a");
    }

    #[test]
    fn empty_store_gives_empty_table() {
        let mut session = TableSession::new(&[]);
        assert!(session.refresh().rows.is_empty());
        assert!(session.search("alpha").rows.is_empty());
    }

    #[test]
    fn view_state_round_trips_through_json() {
        let state = ViewState {
            search: "pob".to_string(),
            sort_key: SortKey::EvacuationSites,
            direction: SortDirection::Descending,
        };
        let json = serde_json::to_value(&state).unwrap();
        assert_eq!(json["sortKey"], "evacuation_sites");
        assert_eq!(json["direction"], "descending");
        let back: ViewState = serde_json::from_value(json).unwrap();
        assert_eq!(back, state);
    }
}
