//! Compile-time weather service configuration.
//!
//! The provider endpoint is defined in `services/openweather.toml` and
//! embedded at compile time. The API key is never stored in the TOML;
//! it is read from the environment variable the config names.

use serde::Deserialize;

/// Placeholder value shipped in sample configs; treated as "no key".
const UNSET_KEY_SENTINEL: &str = "YOUR_API_KEY";

/// A weather service configuration loaded from TOML.
#[derive(Debug, Clone, Deserialize)]
pub struct WeatherService {
    /// Unique identifier (e.g., `"openweather"`).
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Current-weather endpoint URL.
    pub base_url: String,
    /// Base URL for condition icons; `{icon}.png` is appended.
    pub icon_base_url: String,
    /// Measurement units requested from the provider.
    #[serde(default = "default_units")]
    pub units: String,
    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Environment variable holding the API key.
    pub api_key_env: String,
}

fn default_units() -> String {
    "metric".to_string()
}

const fn default_timeout_secs() -> u64 {
    10
}

impl WeatherService {
    /// Reads the API key from the configured environment variable.
    ///
    /// Returns `None` when the variable is unset, blank, or still holds
    /// the sample-config sentinel.
    #[must_use]
    pub fn api_key_from_env(&self) -> Option<String> {
        normalize_api_key(std::env::var(&self.api_key_env).ok())
    }
}

/// Treats blank keys and the sample sentinel as absent.
#[must_use]
pub fn normalize_api_key(key: Option<String>) -> Option<String> {
    key.map(|k| k.trim().to_string())
        .filter(|k| !k.is_empty() && k != UNSET_KEY_SENTINEL)
}

// ── Compile-time embedded TOML ──────────────────────────────────────

const OPENWEATHER_TOML: &str = include_str!("../services/openweather.toml");

/// Returns the `OpenWeather` service configuration.
///
/// # Panics
///
/// Panics if the embedded TOML is malformed (this is a compile-time
/// guarantee since the config is embedded).
#[must_use]
pub fn openweather() -> WeatherService {
    toml::de::from_str(OPENWEATHER_TOML)
        .unwrap_or_else(|e| panic!("Failed to parse weather service 'openweather': {e}"))
}
