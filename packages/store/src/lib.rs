#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Session record store for barangay data.
//!
//! The store is populated once from a [`RecordFeed`] and is read-only
//! afterwards. Loading never fails the caller: any I/O, HTTP, or parse
//! error leaves the store empty with a [`LoadStatus::Degraded`] marker so
//! the dashboard can still render zero-state statistics.

pub mod feed;

use barangay_map_barangay_models::Barangay;

pub use feed::{FileFeed, HttpFeed, RecordFeed, feed_for_location};

/// Default location of the bundled record feed.
pub const DEFAULT_DATA_PATH: &str = "data/barangay-resources.json";

/// Errors that can occur while fetching or decoding the record feed.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// HTTP request failed or returned a non-success status.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error reading a local feed file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The feed body was valid JSON but not a list of records.
    #[error("Unexpected feed shape: {message}")]
    Shape {
        /// Description of what was found instead.
        message: String,
    },
}

/// Outcome of the one-time store load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadStatus {
    /// The feed was fetched and decoded.
    Loaded,
    /// The feed could not be loaded; the store is empty.
    Degraded {
        /// Why the load failed.
        reason: String,
    },
}

/// Immutable record set for the session.
#[derive(Debug, Clone)]
pub struct RecordStore {
    records: Vec<Barangay>,
    status: LoadStatus,
}

impl RecordStore {
    /// Fetches the feed once and builds the store.
    ///
    /// On failure the error is logged and an empty, degraded store is
    /// returned instead.
    pub async fn load(feed: &dyn RecordFeed) -> Self {
        match feed.fetch().await.and_then(|body| parse_records(&body)) {
            Ok(records) => {
                log::info!(
                    "Loaded {} barangay records from {}",
                    records.len(),
                    feed.describe()
                );
                Self {
                    records,
                    status: LoadStatus::Loaded,
                }
            }
            Err(e) => {
                log::error!("Could not load barangay data from {}: {e}", feed.describe());
                Self {
                    records: Vec::new(),
                    status: LoadStatus::Degraded {
                        reason: e.to_string(),
                    },
                }
            }
        }
    }

    /// Builds a store from records already in memory.
    #[must_use]
    pub const fn from_records(records: Vec<Barangay>) -> Self {
        Self {
            records,
            status: LoadStatus::Loaded,
        }
    }

    /// All records in feed order.
    #[must_use]
    pub fn records(&self) -> &[Barangay] {
        &self.records
    }

    /// How the load went.
    #[must_use]
    pub const fn status(&self) -> &LoadStatus {
        &self.status
    }

    /// Whether the load failed and the store fell back to empty.
    #[must_use]
    pub const fn is_degraded(&self) -> bool {
        matches!(self.status, LoadStatus::Degraded { .. })
    }

    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the store holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Decodes a feed body into records.
///
/// The body must be a JSON array. Entries are not validated: malformed
/// fields decode as missing values, and entries that are not objects
/// pass through as records with every field missing.
///
/// # Errors
///
/// Returns [`StoreError::Shape`] if the body is not an array.
pub fn parse_records(body: &serde_json::Value) -> Result<Vec<Barangay>, StoreError> {
    let entries = body.as_array().ok_or_else(|| StoreError::Shape {
        message: format!("expected an array of records, found {}", json_kind(body)),
    })?;

    Ok(entries
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            serde_json::from_value(entry.clone()).unwrap_or_else(|e| {
                log::warn!("Record {i} is not an object ({e}); keeping it with no fields");
                Barangay::default()
            })
        })
        .collect())
}

const fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}
