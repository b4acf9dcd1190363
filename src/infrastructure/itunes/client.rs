//! iTunes Search API HTTP client.

use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::{Client, Url};
use tracing::{debug, warn};

use super::dto::parse_envelope;
use super::http_cache::HttpResponseCache;
use super::request_url::build_url;
use crate::domain::entities::CatalogRequest;
use crate::domain::errors::CatalogError;
use crate::domain::ports::{CatalogPort, CatalogResults};
use crate::infrastructure::locale::Locale;

/// Public iTunes Search API host.
pub const ITUNES_API_BASE: &str = "https://itunes.apple.com";

/// Per-request timeout for catalog calls.
pub const LOOKUP_TIMEOUT: Duration = Duration::from_secs(20);

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// iTunes lookup/search client.
pub struct ItunesClient {
    client: Client,
    base_url: String,
    locale: Locale,
    http_cache: HttpResponseCache,
}

impl ItunesClient {
    /// Creates new client against the public API.
    ///
    /// # Errors
    /// Returns error if HTTP client creation fails.
    pub fn new(locale: Locale) -> Result<Self, CatalogError> {
        Self::with_base_url(ITUNES_API_BASE, locale, LOOKUP_TIMEOUT)
    }

    /// Creates client with custom base URL and timeout.
    ///
    /// # Errors
    /// Returns error if HTTP client creation fails.
    pub fn with_base_url(
        base_url: impl Into<String>,
        locale: Locale,
        timeout: Duration,
    ) -> Result<Self, CatalogError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|e| CatalogError::transport(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.into(),
            locale,
            http_cache: HttpResponseCache::default(),
        })
    }

    async fn fetch_body(&self, url: Url) -> Result<Bytes, CatalogError> {
        if let Some(body) = self.http_cache.fresh(url.as_str()) {
            debug!(%url, "Serving catalog response from cache");
            return Ok(body);
        }

        let response = self.client.get(url.clone()).send().await.map_err(|e| {
            warn!(error = %e, "Failed to reach the iTunes API");
            if e.is_timeout() {
                CatalogError::transport("request timed out")
            } else if e.is_connect() {
                CatalogError::transport("failed to connect to the App Store")
            } else {
                CatalogError::transport(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            warn!(%status, "iTunes API returned an error status");
            return Err(CatalogError::HttpStatus {
                status: status.as_u16(),
            });
        }

        let headers = response.headers().clone();
        let body = response.bytes().await.map_err(|e| {
            warn!(error = %e, "Failed to read iTunes API response body");
            CatalogError::transport(format!("failed to read response: {e}"))
        })?;

        self.http_cache.store(url.as_str(), &headers, body.clone());
        Ok(body)
    }
}

#[async_trait]
impl CatalogPort for ItunesClient {
    async fn lookup(&self, request: &CatalogRequest) -> Result<CatalogResults, CatalogError> {
        let url = build_url(&self.base_url, request, &self.locale).inspect_err(|_| {
            warn!(mode = request.mode(), "Could not build catalog URL");
        })?;

        debug!(mode = request.mode(), %url, "Requesting catalog");

        let body = self.fetch_body(url).await?;

        let envelope = parse_envelope(&body).map_err(|e| {
            warn!(error = %e, "Failed to parse catalog response");
            CatalogError::decode(e.to_string())
        })?;

        let results = envelope.partition();

        debug!(
            result_count = envelope.result_count,
            software = results.software.len(),
            has_artist = results.artist.is_some(),
            "Catalog lookup finished"
        );

        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    fn client(server: &MockServer) -> ItunesClient {
        ItunesClient::with_base_url(server.base_url(), Locale::new("US", "en"), LOOKUP_TIMEOUT)
            .unwrap()
    }

    fn software(id: u64) -> serde_json::Value {
        json!({
            "wrapperType": "software",
            "kind": "software",
            "trackId": id,
            "trackName": format!("App {id}"),
            "genres": ["Utilities"]
        })
    }

    #[test]
    fn test_client_creation() {
        let client = ItunesClient::new(Locale::default());
        assert!(client.is_ok());
    }

    #[tokio::test]
    async fn test_developer_lookup() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/lookup")
                    .query_param("id", "356087517")
                    .query_param("entity", "software")
                    .query_param("country", "US")
                    .query_param("l", "en");
                then.status(200).json_body(json!({
                    "resultCount": 3,
                    "results": [
                        {
                            "wrapperType": "artist",
                            "artistName": "Daniel Amitay",
                            "artistId": 356087517
                        },
                        software(1),
                        software(2)
                    ]
                }));
            })
            .await;

        let results = client(&server)
            .lookup(&CatalogRequest::developer(356_087_517))
            .await
            .unwrap();

        assert_eq!(results.software.len(), 2);
        assert_eq!(results.artist.unwrap().artist_name, "Daniel Amitay");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_search_sends_encoded_term() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/search")
                    .query_param("term", "rock & roll");
                then.status(200)
                    .json_body(json!({"resultCount": 0, "results": []}));
            })
            .await;

        let results = client(&server)
            .lookup(&CatalogRequest::search("rock & roll"))
            .await
            .unwrap();

        assert!(results.software.is_empty());
        assert!(results.artist.is_none());
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_http_error_status() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.path("/lookup");
                then.status(503);
            })
            .await;

        let err = client(&server)
            .lookup(&CatalogRequest::app_ids([1]))
            .await
            .unwrap_err();

        assert_eq!(err, CatalogError::HttpStatus { status: 503 });
        assert!(err.is_transport());
    }

    #[tokio::test]
    async fn test_malformed_envelope() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.path("/lookup");
                then.status(200).body("<html>maintenance</html>");
            })
            .await;

        let err = client(&server)
            .lookup(&CatalogRequest::app_ids([1]))
            .await
            .unwrap_err();

        assert!(err.is_decode());
    }

    #[tokio::test]
    async fn test_connection_refused_is_transport_error() {
        let client = ItunesClient::with_base_url(
            "http://127.0.0.1:9",
            Locale::default(),
            Duration::from_secs(2),
        )
        .unwrap();

        let err = client
            .lookup(&CatalogRequest::developer(1))
            .await
            .unwrap_err();

        assert!(err.is_transport());
    }

    #[tokio::test]
    async fn test_slow_response_times_out() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.path("/lookup");
                then.status(200)
                    .delay(Duration::from_secs(2))
                    .json_body(json!({"resultCount": 0, "results": []}));
            })
            .await;

        let client = ItunesClient::with_base_url(
            server.base_url(),
            Locale::default(),
            Duration::from_millis(200),
        )
        .unwrap();

        let err = client
            .lookup(&CatalogRequest::developer(1))
            .await
            .unwrap_err();

        assert!(err.is_transport());
        assert_eq!(err, CatalogError::transport("request timed out"));
    }

    #[tokio::test]
    async fn test_fresh_responses_are_served_from_cache() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.path("/lookup");
                then.status(200)
                    .header("cache-control", "max-age=300")
                    .json_body(json!({"resultCount": 1, "results": [software(7)]}));
            })
            .await;

        let client = client(&server);
        let request = CatalogRequest::app_ids([7]);
        let first = client.lookup(&request).await.unwrap();
        let second = client.lookup(&request).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(mock.hits_async().await, 1);
    }

    #[tokio::test]
    async fn test_uncacheable_responses_hit_network() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.path("/lookup");
                then.status(200)
                    .json_body(json!({"resultCount": 1, "results": [software(7)]}));
            })
            .await;

        let client = client(&server);
        let request = CatalogRequest::app_ids([7]);
        client.lookup(&request).await.unwrap();
        client.lookup(&request).await.unwrap();

        assert_eq!(mock.hits_async().await, 2);
    }
}
