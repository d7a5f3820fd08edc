//! HTML fragment for the weather widget shown on the dashboard and in
//! map popups.

use crate::Enrichment;

/// Text shown when a lookup failed.
pub const UNAVAILABLE_HTML: &str = "<p>Weather data unavailable.</p>";

/// Renders the weather widget for an enrichment result.
#[must_use]
pub fn render_weather_widget(enrichment: &Enrichment) -> String {
    let Some(weather) = enrichment.snapshot() else {
        return UNAVAILABLE_HTML.to_string();
    };

    let condition = escape_html(&weather.condition);
    format!(
        "<div class=\"weather-info\">\
         <img src=\"{icon}\" alt=\"{condition} icon\">\
         <span class=\"temp-main\">{temp}°C</span>\
         </div>\
         <div>\
         <p class=\"condition\">{condition}</p>\
         <p>Feels like: {feels}°C</p>\
         </div>",
        icon = escape_html(&weather.icon_url),
        temp = weather.temperature,
        feels = weather.feels_like,
    )
}

/// Escapes the five HTML-significant characters.
#[must_use]
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::WeatherSnapshot;

    #[test]
    fn renders_placeholder_snapshot() {
        let html = render_weather_widget(&Enrichment::Placeholder(WeatherSnapshot::placeholder()));
        assert!(html.contains("28°C"));
        assert!(html.contains("Feels like: 32°C"));
        assert!(html.contains("Sunny (Dummy Data)"));
        assert!(html.contains("http://openweathermap.org/img/wn/01d.png"));
    }

    #[test]
    fn renders_unavailable_text() {
        assert_eq!(render_weather_widget(&Enrichment::Unavailable), UNAVAILABLE_HTML);
    }

    #[test]
    fn escapes_condition_label() {
        let html = render_weather_widget(&Enrichment::Live(WeatherSnapshot {
            temperature: -3,
            feels_like: -8,
            condition: "<Snow & \"Ice\">".to_string(),
            icon_url: "http://icons/13n.png".to_string(),
        }));
        assert!(html.contains("&lt;Snow &amp; &quot;Ice&quot;&gt;"));
        assert!(html.contains("-3°C"));
        assert!(!html.contains("<Snow"));
    }
}
