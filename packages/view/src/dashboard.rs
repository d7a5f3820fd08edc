//! Dashboard summary: whole-dataset statistics and headline weather.

use barangay_map_barangay_models::{AggregateStats, Coordinates};
use barangay_map_store::RecordStore;
use barangay_map_weather::{Enrichment, WeatherResolver};
use serde::{Deserialize, Serialize};

use crate::aggregate;

/// Where the dashboard's weather widget looks (Manila).
pub const DASHBOARD_WEATHER_LOCATION: Coordinates = Coordinates::new(14.5995, 120.9842);

/// Content of the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    /// Statistics over every loaded record, regardless of table filters.
    pub stats: AggregateStats,
    /// Whether the record feed failed to load, so zero counts mean "no
    /// data" rather than "nothing there".
    pub feed_degraded: bool,
    /// Headline weather.
    pub weather: Enrichment,
}

/// Aggregates the full store, then looks up the headline weather.
pub async fn build_dashboard(store: &RecordStore, resolver: &WeatherResolver) -> DashboardSummary {
    let stats = aggregate(store.records());
    let weather = resolver
        .resolve(
            DASHBOARD_WEATHER_LOCATION.latitude,
            DASHBOARD_WEATHER_LOCATION.longitude,
        )
        .await;

    DashboardSummary {
        stats,
        feed_degraded: store.is_degraded(),
        weather,
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use barangay_map_store::{RecordFeed, StoreError};
    use barangay_map_weather::WeatherSnapshot;

    use super::*;
    use crate::fixtures::alpha_beta;

    struct UnreachableFeed;

    #[async_trait]
    impl RecordFeed for UnreachableFeed {
        fn describe(&self) -> String {
            "unreachable".to_string()
        }

        async fn fetch(&self) -> Result<serde_json::Value, StoreError> {
            Err(std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused").into())
        }
    }

    #[tokio::test]
    async fn summarizes_whole_store() {
        let store = RecordStore::from_records(alpha_beta());
        let summary = build_dashboard(&store, &WeatherResolver::without_credentials()).await;
        assert_eq!(summary.stats.barangay_count, 2);
        assert_eq!(summary.stats.total_resources, 5);
        assert!(!summary.feed_degraded);
        assert_eq!(
            summary.weather,
            Enrichment::Placeholder(WeatherSnapshot::placeholder())
        );
    }

    #[tokio::test]
    async fn failed_feed_shows_zero_state() {
        let store = RecordStore::load(&UnreachableFeed).await;
        let summary = build_dashboard(&store, &WeatherResolver::without_credentials()).await;
        assert_eq!(summary.stats, AggregateStats::default());
        assert!(summary.feed_degraded);
    }

    #[tokio::test]
    async fn empty_feed_is_zero_but_not_degraded() {
        let store = RecordStore::from_records(Vec::new());
        let summary = build_dashboard(&store, &WeatherResolver::without_credentials()).await;
        assert_eq!(summary.stats.barangay_count, 0);
        assert_eq!(summary.stats.total_resources, 0);
        assert!(!summary.feed_degraded);
    }
}
