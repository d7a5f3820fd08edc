#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Barangay record types shared across the barangay map workspace.
//!
//! A [`Barangay`] is one administrative-unit entry from the record feed.
//! Feed entries are decoded leniently: a missing or non-numeric field
//! becomes `None` instead of rejecting the entry, so downstream code can
//! tell "no data" apart from "zero".

use serde::{Deserialize, Deserializer, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// One barangay with its population, resource counts, and location.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Barangay {
    /// Display name. Unique within a load by convention only.
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: String,
    /// Resident population.
    #[serde(default, deserialize_with = "lenient_count")]
    pub population: Option<u64>,
    /// Number of health centers.
    #[serde(default, deserialize_with = "lenient_count")]
    pub health_centers: Option<u64>,
    /// Number of schools.
    #[serde(default, deserialize_with = "lenient_count")]
    pub schools: Option<u64>,
    /// Number of designated evacuation sites.
    #[serde(default, deserialize_with = "lenient_count")]
    pub evacuation_sites: Option<u64>,
    /// Latitude (WGS84).
    #[serde(rename = "lat", default, deserialize_with = "lenient_float")]
    pub latitude: Option<f64>,
    /// Longitude (WGS84).
    #[serde(rename = "lng", default, deserialize_with = "lenient_float")]
    pub longitude: Option<f64>,
}

impl Barangay {
    /// Creates a fully populated record.
    #[must_use]
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        name: impl Into<String>,
        population: u64,
        health_centers: u64,
        schools: u64,
        evacuation_sites: u64,
        latitude: f64,
        longitude: f64,
    ) -> Self {
        Self {
            name: name.into(),
            population: Some(population),
            health_centers: Some(health_centers),
            schools: Some(schools),
            evacuation_sites: Some(evacuation_sites),
            latitude: Some(latitude),
            longitude: Some(longitude),
        }
    }

    /// Sum of health centers, schools, and evacuation sites.
    ///
    /// Returns `None` if any of the three counts is missing.
    #[must_use]
    pub fn total_resources(&self) -> Option<u64> {
        Some(
            self.health_centers?
                .saturating_add(self.schools?)
                .saturating_add(self.evacuation_sites?),
        )
    }

    /// Returns the record's location, if both coordinates are present.
    #[must_use]
    pub fn coordinates(&self) -> Option<Coordinates> {
        Some(Coordinates {
            latitude: self.latitude?,
            longitude: self.longitude?,
        })
    }

    /// Returns the numeric value for a count column.
    ///
    /// Returns `None` for [`SortKey::Name`] and for missing counts.
    #[must_use]
    pub const fn count(&self, key: SortKey) -> Option<u64> {
        match key {
            SortKey::Name => None,
            SortKey::Population => self.population,
            SortKey::HealthCenters => self.health_centers,
            SortKey::Schools => self.schools,
            SortKey::EvacuationSites => self.evacuation_sites,
        }
    }
}

/// A latitude/longitude pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    /// Latitude (WGS84).
    pub latitude: f64,
    /// Longitude (WGS84).
    pub longitude: f64,
}

impl Coordinates {
    /// Creates a coordinate pair.
    #[must_use]
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// Columns the resources table can be sorted by.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum SortKey {
    /// Barangay name, compared case-insensitively.
    #[default]
    Name,
    /// Population.
    Population,
    /// Health center count.
    HealthCenters,
    /// School count.
    Schools,
    /// Evacuation site count.
    EvacuationSites,
}

impl SortKey {
    /// Whether this column holds text rather than a count.
    #[must_use]
    pub const fn is_text(self) -> bool {
        matches!(self, Self::Name)
    }

    /// Returns all variants of this enum.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Name,
            Self::Population,
            Self::HealthCenters,
            Self::Schools,
            Self::EvacuationSites,
        ]
    }
}

/// Sort direction for the resources table.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum SortDirection {
    /// Smallest (or alphabetically first) first.
    #[default]
    Ascending,
    /// Largest (or alphabetically last) first.
    Descending,
}

impl SortDirection {
    /// Returns the opposite direction.
    #[must_use]
    pub const fn reversed(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }

    /// Whether this is [`SortDirection::Ascending`].
    #[must_use]
    pub const fn is_ascending(self) -> bool {
        matches!(self, Self::Ascending)
    }
}

/// Derived statistics over a set of barangays.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateStats {
    /// Number of records.
    pub barangay_count: usize,
    /// Sum of health centers, schools, and evacuation sites. Missing
    /// counts contribute zero.
    pub total_resources: u64,
    /// Records with at least one missing resource count. When non-zero,
    /// `total_resources` is a lower bound.
    pub incomplete_records: usize,
}

/// Formats a count with comma thousands separators (`1234567` →
/// `"1,234,567"`).
#[must_use]
pub fn format_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(s)) => s,
        Some(serde_json::Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    })
}

#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    clippy::cast_sign_loss,
    clippy::float_cmp
)]
fn lenient_count<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| {
        v.as_u64().or_else(|| {
            v.as_f64()
                .filter(|f| *f >= 0.0 && f.fract() == 0.0 && *f <= u64::MAX as f64)
                .map(|f| f as u64)
        })
    }))
}

fn lenient_float<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| v.as_f64()).filter(|f| f.is_finite()))
}
