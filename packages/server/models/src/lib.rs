#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! API request and response types for the barangay map server.
//!
//! These types are serialized to JSON for the REST API. They are separate
//! from the view-pipeline render models to allow independent evolution of
//! the API contract.

use barangay_map_barangay_models::{Coordinates, SortDirection, SortKey};
use barangay_map_view::{Bounds, DashboardSummary, MapMarker, MapView, TableRow, TableView, ViewState};
use barangay_map_weather::{Enrichment, render_weather_widget};
use serde::{Deserialize, Serialize};

/// Health check response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiHealth {
    /// Whether the service is healthy.
    pub healthy: bool,
    /// Service version.
    pub version: String,
}

/// Dashboard response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiDashboard {
    /// Number of loaded barangays.
    pub barangay_count: usize,
    /// Sum of all resource counts.
    pub total_resources: u64,
    /// Records missing at least one resource count.
    pub incomplete_records: usize,
    /// Whether the record feed failed to load.
    pub feed_degraded: bool,
    /// Headline weather.
    pub weather: Enrichment,
    /// Pre-rendered weather widget.
    pub weather_html: String,
}

impl From<DashboardSummary> for ApiDashboard {
    fn from(summary: DashboardSummary) -> Self {
        Self {
            barangay_count: summary.stats.barangay_count,
            total_resources: summary.stats.total_resources,
            incomplete_records: summary.stats.incomplete_records,
            feed_degraded: summary.feed_degraded,
            weather_html: render_weather_widget(&summary.weather),
            weather: summary.weather,
        }
    }
}

/// Query parameters for the resources endpoint.
///
/// The client sends back the state it was last given plus, optionally,
/// the column that was just clicked.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourcesQueryParams {
    /// Name search term.
    pub search: Option<String>,
    /// Active sort column.
    pub sort: Option<SortKey>,
    /// Active sort direction.
    pub direction: Option<SortDirection>,
    /// Column header that was clicked, if any.
    pub click: Option<SortKey>,
}

impl ResourcesQueryParams {
    /// The state after applying the optional click to the sent state.
    #[must_use]
    pub fn resolve_state(&self) -> ViewState {
        let state = ViewState {
            search: self.search.clone().unwrap_or_default(),
            sort_key: self.sort.unwrap_or_default(),
            direction: self.direction.unwrap_or_default(),
        };
        match self.click {
            Some(key) => state.toggle_sort(key),
            None => state,
        }
    }
}

/// Resources table response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResources {
    /// State the rows were derived from; send it back on the next request.
    pub state: ViewState,
    /// Rows in display order.
    pub rows: Vec<TableRow>,
    /// Number of rows matching the search.
    pub matched: usize,
    /// Number of loaded records.
    pub total: usize,
}

impl ApiResources {
    /// Wraps a derived table.
    #[must_use]
    pub fn new(table: TableView, total: usize) -> Self {
        Self {
            matched: table.rows.len(),
            state: table.state,
            rows: table.rows,
            total,
        }
    }
}

/// A map marker as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiMarker {
    /// Barangay name.
    pub name: String,
    /// Latitude.
    pub latitude: f64,
    /// Longitude.
    pub longitude: f64,
    /// Weather at the marker.
    pub weather: Enrichment,
    /// Pre-rendered popup content.
    pub popup_html: String,
}

impl From<MapMarker> for ApiMarker {
    fn from(marker: MapMarker) -> Self {
        Self {
            popup_html: marker.popup_html(),
            name: marker.name,
            latitude: marker.position.latitude,
            longitude: marker.position.longitude,
            weather: marker.weather,
        }
    }
}

/// Map response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiMap {
    /// Initial center.
    pub center: Coordinates,
    /// Initial zoom.
    pub zoom: u8,
    /// Box to fit to, absent when there are no markers.
    pub bounds: Option<Bounds>,
    /// Markers in record order.
    pub markers: Vec<ApiMarker>,
    /// Records without coordinates.
    pub skipped: usize,
}

impl From<MapView> for ApiMap {
    fn from(view: MapView) -> Self {
        Self {
            center: view.center,
            zoom: view.zoom,
            bounds: view.bounds,
            markers: view.markers.into_iter().map(ApiMarker::from).collect(),
            skipped: view.skipped,
        }
    }
}
