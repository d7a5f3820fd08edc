//! Record feed sources.
//!
//! A feed returns the raw JSON body of the barangay record list. The
//! bundled feed is a local file; an HTTP feed is used when the configured
//! location is a URL.

use std::path::PathBuf;

use async_trait::async_trait;

use crate::StoreError;

/// Something that can produce the raw record list.
#[async_trait]
pub trait RecordFeed: Send + Sync {
    /// Human-readable description used in log messages.
    fn describe(&self) -> String;

    /// Fetches the raw feed body.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the body cannot be read or decoded as JSON.
    async fn fetch(&self) -> Result<serde_json::Value, StoreError>;
}

/// A feed backed by a JSON file on disk.
#[derive(Debug, Clone)]
pub struct FileFeed {
    path: PathBuf,
}

impl FileFeed {
    /// Creates a feed reading from `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl RecordFeed for FileFeed {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    async fn fetch(&self) -> Result<serde_json::Value, StoreError> {
        let bytes = tokio::fs::read(&self.path).await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

/// A feed fetched over HTTP with a single GET request.
#[derive(Debug, Clone)]
pub struct HttpFeed {
    client: reqwest::Client,
    url: String,
}

impl HttpFeed {
    /// Creates a feed fetching from `url`.
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), url)
    }

    /// Creates a feed sharing an existing HTTP client.
    #[must_use]
    pub fn with_client(client: reqwest::Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }
}

#[async_trait]
impl RecordFeed for HttpFeed {
    fn describe(&self) -> String {
        self.url.clone()
    }

    async fn fetch(&self) -> Result<serde_json::Value, StoreError> {
        let resp = self.client.get(&self.url).send().await?.error_for_status()?;
        let bytes = resp.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

/// Picks a feed implementation for a configured location.
///
/// `http://` and `https://` locations are fetched over HTTP; anything
/// else is treated as a file path.
#[must_use]
pub fn feed_for_location(location: &str) -> Box<dyn RecordFeed> {
    if location.starts_with("http://") || location.starts_with("https://") {
        Box::new(HttpFeed::new(location))
    } else {
        Box::new(FileFeed::new(location))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RecordStore;

    #[test]
    fn picks_feed_by_scheme() {
        assert_eq!(
            feed_for_location("https://example.org/barangays.json").describe(),
            "https://example.org/barangays.json"
        );
        assert_eq!(
            feed_for_location("data/barangay-resources.json").describe(),
            "data/barangay-resources.json"
        );
    }

    #[tokio::test]
    async fn reads_file_feed() {
        let tmp = std::env::temp_dir().join("barangay_store_test_file_feed.json");
        std::fs::write(
            &tmp,
            r#"[{"name":"Alpha","population":1000,"health_centers":1,"schools":2,"evacuation_sites":1,"lat":8.1,"lng":124.1}]"#,
        )
        .unwrap();

        let store = RecordStore::load(&FileFeed::new(&tmp)).await;
        assert!(!store.is_degraded());
        assert_eq!(store.len(), 1);
        assert_eq!(store.records()[0].population, Some(1000));

        let _ = std::fs::remove_file(&tmp);
    }

    #[tokio::test]
    async fn missing_file_degrades() {
        let tmp = std::env::temp_dir().join("barangay_store_test_missing.json");
        let _ = std::fs::remove_file(&tmp);
        let store = RecordStore::load(&FileFeed::new(&tmp)).await;
        assert!(store.is_degraded());
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn garbled_file_degrades() {
        let tmp = std::env::temp_dir().join("barangay_store_test_garbled.json");
        std::fs::write(&tmp, "[{\"name\": ").unwrap();
        let store = RecordStore::load(&FileFeed::new(&tmp)).await;
        assert!(store.is_degraded());
        let _ = std::fs::remove_file(&tmp);
    }

    #[tokio::test]
    async fn unreachable_http_feed_degrades() {
        let store = RecordStore::load(&HttpFeed::new("http://127.0.0.1:1/barangays.json")).await;
        assert!(store.is_degraded());
        assert!(store.is_empty());
    }
}
