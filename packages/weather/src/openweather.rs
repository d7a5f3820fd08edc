//! `OpenWeather` current-weather client.
//!
//! One GET per lookup, keyed by latitude/longitude with metric units.
//!
//! See <https://openweathermap.org/current>

use std::time::Duration;

use async_trait::async_trait;

use crate::service_registry::WeatherService;
use crate::{WeatherError, WeatherProvider, WeatherSnapshot, round_half_up};

/// `OpenWeather` API provider.
#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    client: reqwest::Client,
    base_url: String,
    icon_base_url: String,
    units: String,
    api_key: String,
}

impl OpenWeatherProvider {
    /// Creates a provider from a service config and API key.
    ///
    /// # Errors
    ///
    /// Returns [`WeatherError::Http`] if the HTTP client cannot be built.
    pub fn new(service: &WeatherService, api_key: String) -> Result<Self, WeatherError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(service.timeout_secs))
            .build()?;
        Ok(Self {
            client,
            base_url: service.base_url.clone(),
            icon_base_url: service.icon_base_url.clone(),
            units: service.units.clone(),
            api_key,
        })
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    async fn current(&self, latitude: f64, longitude: f64) -> Result<WeatherSnapshot, WeatherError> {
        let resp = self
            .client
            .get(&self.base_url)
            .query(&[
                ("lat", latitude.to_string()),
                ("lon", longitude.to_string()),
                ("appid", self.api_key.clone()),
                ("units", self.units.clone()),
            ])
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(WeatherError::Status {
                status: status.as_u16(),
            });
        }

        let body: serde_json::Value = resp.json().await?;
        parse_response(&body, &self.icon_base_url)
    }
}

/// Extracts the four displayed fields from a current-weather body.
fn parse_response(
    body: &serde_json::Value,
    icon_base_url: &str,
) -> Result<WeatherSnapshot, WeatherError> {
    let temp = body["main"]["temp"]
        .as_f64()
        .ok_or_else(|| WeatherError::Parse {
            message: "Missing main.temp in OpenWeather response".to_string(),
        })?;

    let feels_like = body["main"]["feels_like"]
        .as_f64()
        .ok_or_else(|| WeatherError::Parse {
            message: "Missing main.feels_like in OpenWeather response".to_string(),
        })?;

    let condition = body["weather"][0]["main"]
        .as_str()
        .ok_or_else(|| WeatherError::Parse {
            message: "Missing weather[0].main in OpenWeather response".to_string(),
        })?;

    let icon = body["weather"][0]["icon"]
        .as_str()
        .ok_or_else(|| WeatherError::Parse {
            message: "Missing weather[0].icon in OpenWeather response".to_string(),
        })?;

    Ok(WeatherSnapshot {
        temperature: round_half_up(temp),
        feels_like: round_half_up(feels_like),
        condition: condition.to_string(),
        icon_url: format!("{}/{icon}.png", icon_base_url.trim_end_matches('/')),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service_registry;

    #[test]
    fn parses_current_weather() {
        let body = serde_json::json!({
            "main": { "temp": 27.6, "feels_like": 31.45, "humidity": 80 },
            "weather": [{ "id": 803, "main": "Clouds", "icon": "04d" }],
            "name": "Malaybalay"
        });
        let snapshot = parse_response(&body, "http://openweathermap.org/img/wn").unwrap();
        assert_eq!(snapshot.temperature, 28);
        assert_eq!(snapshot.feels_like, 31);
        assert_eq!(snapshot.condition, "Clouds");
        assert_eq!(snapshot.icon_url, "http://openweathermap.org/img/wn/04d.png");
    }

    #[test]
    fn rejects_body_without_weather_array() {
        let body = serde_json::json!({ "main": { "temp": 20.0, "feels_like": 19.0 } });
        let err = parse_response(&body, "http://icons").unwrap_err();
        assert!(matches!(err, WeatherError::Parse { .. }));
    }

    #[test]
    fn rejects_error_body() {
        let body = serde_json::json!({ "cod": 401, "message": "Invalid API key" });
        assert!(parse_response(&body, "http://icons").is_err());
    }

    #[tokio::test]
    async fn transport_failure_is_an_error() {
        let mut service = service_registry::openweather();
        service.base_url = "http://127.0.0.1:1/data/2.5/weather".to_string();
        service.timeout_secs = 2;
        let provider = OpenWeatherProvider::new(&service, "key".to_string()).unwrap();
        let err = provider.current(8.36, 124.86).await.unwrap_err();
        assert!(matches!(err, WeatherError::Http(_)));
    }
}
