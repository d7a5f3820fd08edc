//! Map markers with per-point weather.
//!
//! Lookups run one at a time in record order: each marker's weather is
//! awaited before the next lookup starts, so marker order always matches
//! input order and the provider sees at most one request in flight.

use barangay_map_barangay_models::{Barangay, Coordinates};
use barangay_map_weather::widget::escape_html;
use barangay_map_weather::{Enrichment, WeatherResolver, render_weather_widget};
use serde::{Deserialize, Serialize};

use crate::{display_count, display_population};

/// Initial map center before fitting to markers.
pub const DEFAULT_MAP_CENTER: Coordinates = Coordinates::new(8.36858, 124.86665);

/// Initial zoom level.
pub const DEFAULT_MAP_ZOOM: u8 = 14;

/// Bounding box of the placed markers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    /// Minimum latitude.
    pub south: f64,
    /// Minimum longitude.
    pub west: f64,
    /// Maximum latitude.
    pub north: f64,
    /// Maximum longitude.
    pub east: f64,
}

impl Bounds {
    fn around(point: Coordinates) -> Self {
        Self {
            south: point.latitude,
            west: point.longitude,
            north: point.latitude,
            east: point.longitude,
        }
    }

    fn extend(&mut self, point: Coordinates) {
        self.south = self.south.min(point.latitude);
        self.west = self.west.min(point.longitude);
        self.north = self.north.max(point.latitude);
        self.east = self.east.max(point.longitude);
    }

    /// Smallest box containing every point, or `None` for no points.
    #[must_use]
    pub fn enclosing<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = Coordinates>,
    {
        let mut points = points.into_iter();
        let mut bounds = Self::around(points.next()?);
        for point in points {
            bounds.extend(point);
        }
        Some(bounds)
    }
}

/// One map marker and its popup content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapMarker {
    /// Barangay name.
    pub name: String,
    /// Marker position.
    pub position: Coordinates,
    /// Population with thousands separators.
    pub population: String,
    /// Health center count.
    pub health_centers: String,
    /// School count.
    pub schools: String,
    /// Evacuation site count.
    pub evacuation_sites: String,
    /// Weather at the marker.
    pub weather: Enrichment,
}

impl MapMarker {
    /// Pairs a record with its weather.
    #[must_use]
    pub fn new(barangay: &Barangay, position: Coordinates, weather: Enrichment) -> Self {
        Self {
            name: barangay.name.clone(),
            position,
            population: display_population(barangay.population),
            health_centers: display_count(barangay.health_centers),
            schools: display_count(barangay.schools),
            evacuation_sites: display_count(barangay.evacuation_sites),
            weather,
        }
    }

    /// Renders the popup HTML.
    #[must_use]
    pub fn popup_html(&self) -> String {
        format!(
            "<h3>{name}</h3>\
             <hr>\
             <p><strong>Population:</strong> {population}</p>\
             <p><strong>Health Centers:</strong> {health}</p>\
             <p><strong>Schools:</strong> {schools}</p>\
             <p><strong>Evacuation Sites:</strong> {evac}</p>\
             <hr>\
             <h4>Current Weather</h4>\
             {weather}",
            name = escape_html(&self.name),
            population = self.population,
            health = self.health_centers,
            schools = self.schools,
            evac = self.evacuation_sites,
            weather = render_weather_widget(&self.weather),
        )
    }
}

/// Everything needed to draw the map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapView {
    /// Initial center.
    pub center: Coordinates,
    /// Initial zoom.
    pub zoom: u8,
    /// Markers in record order.
    pub markers: Vec<MapMarker>,
    /// Box to fit the view to; `None` when there are no markers.
    pub bounds: Option<Bounds>,
    /// Records left off the map because they have no coordinates.
    pub skipped: usize,
}

/// Builds map markers, enriching each with weather in record order.
///
/// A failed lookup yields a marker showing "unavailable" weather; it
/// never drops the marker. Records without coordinates cannot be placed
/// and are counted in [`MapView::skipped`].
pub async fn build_map<'a, I>(records: I, resolver: &WeatherResolver) -> MapView
where
    I: IntoIterator<Item = &'a Barangay>,
{
    let mut markers = Vec::new();
    let mut skipped = 0;

    for barangay in records {
        let Some(position) = barangay.coordinates() else {
            log::warn!("Barangay '{}' has no coordinates; not placing a marker", barangay.name);
            skipped += 1;
            continue;
        };

        let weather = resolver
            .resolve(position.latitude, position.longitude)
            .await;
        markers.push(MapMarker::new(barangay, position, weather));
    }

    let bounds = Bounds::enclosing(markers.iter().map(|m| m.position));
    log::debug!("Built {} map markers ({skipped} skipped)", markers.len());

    MapView {
        center: DEFAULT_MAP_CENTER,
        zoom: DEFAULT_MAP_ZOOM,
        markers,
        bounds,
        skipped,
    }
}
