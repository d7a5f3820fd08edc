#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Coordinate-keyed weather enrichment.
//!
//! [`WeatherResolver::resolve`] turns a latitude/longitude pair into an
//! [`Enrichment`]:
//!
//! 1. **No API key configured**: a fixed, clearly labeled placeholder
//!    snapshot so demos keep rendering.
//! 2. **Provider succeeded**: a live snapshot with temperatures rounded
//!    to whole degrees.
//! 3. **Provider failed** (transport error, non-success status, malformed
//!    body): [`Enrichment::Unavailable`]. Errors are logged, never
//!    returned to the caller.
//!
//! Every call issues its own request. There is no caching, no
//! deduplication of identical coordinates, and no retry.

pub mod openweather;
pub mod service_registry;
pub mod widget;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use openweather::OpenWeatherProvider;
pub use widget::render_weather_widget;

/// Current conditions at a point.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherSnapshot {
    /// Air temperature in °C, rounded to the nearest degree.
    pub temperature: i32,
    /// Apparent temperature in °C, rounded to the nearest degree.
    pub feels_like: i32,
    /// Short condition label (e.g., `"Clouds"`).
    pub condition: String,
    /// URL of the condition icon.
    pub icon_url: String,
}

impl WeatherSnapshot {
    /// The fixed snapshot returned when no API key is configured.
    #[must_use]
    pub fn placeholder() -> Self {
        Self {
            temperature: 28,
            feels_like: 32,
            condition: "Sunny (Dummy Data)".to_string(),
            icon_url: "http://openweathermap.org/img/wn/01d.png".to_string(),
        }
    }
}

/// Outcome of one weather lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "snapshot", rename_all = "snake_case")]
pub enum Enrichment {
    /// Data from the provider.
    Live(WeatherSnapshot),
    /// Demo data because no API key is configured.
    Placeholder(WeatherSnapshot),
    /// The lookup failed.
    Unavailable,
}

impl Enrichment {
    /// The snapshot to display, if any.
    #[must_use]
    pub const fn snapshot(&self) -> Option<&WeatherSnapshot> {
        match self {
            Self::Live(s) | Self::Placeholder(s) => Some(s),
            Self::Unavailable => None,
        }
    }

    /// Whether the lookup failed.
    #[must_use]
    pub const fn is_unavailable(&self) -> bool {
        matches!(self, Self::Unavailable)
    }
}

/// Errors from weather provider requests.
#[derive(Debug, Error)]
pub enum WeatherError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The provider answered with a non-success status.
    #[error("Provider returned HTTP {status}")]
    Status {
        /// HTTP status code.
        status: u16,
    },

    /// Response parsing failed.
    #[error("Parse error: {message}")]
    Parse {
        /// Description of the parsing failure.
        message: String,
    },
}

/// A source of current weather for a coordinate pair.
#[async_trait]
pub trait WeatherProvider: Send + Sync {
    /// Fetches current conditions at the given point.
    ///
    /// # Errors
    ///
    /// Returns [`WeatherError`] if the request or response parsing fails.
    async fn current(&self, latitude: f64, longitude: f64) -> Result<WeatherSnapshot, WeatherError>;
}

/// Resolves coordinates to an [`Enrichment`], degrading instead of failing.
pub struct WeatherResolver {
    provider: Option<Box<dyn WeatherProvider>>,
}

impl WeatherResolver {
    /// Creates a resolver backed by `provider`.
    #[must_use]
    pub fn new(provider: Box<dyn WeatherProvider>) -> Self {
        Self {
            provider: Some(provider),
        }
    }

    /// Creates a resolver with no provider; every lookup returns the
    /// placeholder snapshot.
    #[must_use]
    pub const fn without_credentials() -> Self {
        Self { provider: None }
    }

    /// Builds a resolver from the embedded `OpenWeather` config and the
    /// API key in the environment.
    ///
    /// # Errors
    ///
    /// Returns [`WeatherError::Http`] if the HTTP client cannot be built.
    pub fn from_env() -> Result<Self, WeatherError> {
        let service = service_registry::openweather();
        let Some(api_key) = service.api_key_from_env() else {
            log::warn!(
                "{} is not set; weather lookups will return placeholder data",
                service.api_key_env
            );
            return Ok(Self::without_credentials());
        };

        log::info!("Weather lookups enabled via {}", service.name);
        Ok(Self::new(Box::new(OpenWeatherProvider::new(
            &service, api_key,
        )?)))
    }

    /// Whether lookups go to a real provider.
    #[must_use]
    pub const fn has_credentials(&self) -> bool {
        self.provider.is_some()
    }

    /// Looks up current weather at a point.
    pub async fn resolve(&self, latitude: f64, longitude: f64) -> Enrichment {
        let Some(provider) = &self.provider else {
            return Enrichment::Placeholder(WeatherSnapshot::placeholder());
        };

        match provider.current(latitude, longitude).await {
            Ok(snapshot) => Enrichment::Live(snapshot),
            Err(e) => {
                log::warn!("Weather lookup failed for ({latitude}, {longitude}): {e}");
                Enrichment::Unavailable
            }
        }
    }
}

impl std::fmt::Debug for WeatherResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WeatherResolver")
            .field("has_credentials", &self.has_credentials())
            .finish()
    }
}

/// Rounds to the nearest integer with halves going toward positive
/// infinity (`2.5 → 3`, `-2.5 → -2`).
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn round_half_up(value: f64) -> i32 {
    let floor = value.floor();
    if value - floor >= 0.5 {
        (floor + 1.0) as i32
    } else {
        floor as i32
    }
}
