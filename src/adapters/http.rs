//! HTTP implementation of [`ListingSource`] backed by `reqwest`.

use crate::domain::model::MarsProperty;
use crate::domain::ports::{ConfigProvider, ListingSource};
use crate::utils::error::{MarsApiError, Result};
use async_trait::async_trait;
use once_cell::sync::Lazy;
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;

/// Root address of the Mars real-estate service.
pub const BASE_URL: &str = "https://mars.udacity.com/";

const PROPERTIES_PATH: &str = "realestate";

static SERVICE: Lazy<Arc<MarsApiService>> = Lazy::new(|| Arc::new(MarsApiService::new(BASE_URL)));

/// Process-wide access to the service bound to [`BASE_URL`].
pub struct MarsApi;

impl MarsApi {
    /// Built on first use; every call returns the same instance.
    pub fn service() -> Arc<MarsApiService> {
        Arc::clone(&SERVICE)
    }
}

#[derive(Debug, Clone)]
pub struct MarsApiService {
    base_url: String,
    client: Client,
}

impl MarsApiService {
    pub fn new(base_url: &str) -> Self {
        Self::with_client(base_url, Client::new())
    }

    pub fn with_client(base_url: &str, client: Client) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        }
    }

    /// Applies the configured timeout; without one the transport defaults stand.
    pub fn from_config<C: ConfigProvider>(config: &C) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(secs) = config.timeout_seconds() {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder.build().map_err(|e| MarsApiError::ConfigError {
            message: format!("failed to build HTTP client: {}", e),
        })?;
        Ok(Self::with_client(config.base_url(), client))
    }

    pub fn properties_url(&self) -> String {
        format!("{}/{}", self.base_url, PROPERTIES_PATH)
    }
}

#[async_trait]
impl ListingSource for MarsApiService {
    async fn get_properties(&self) -> Result<Vec<MarsProperty>> {
        let url = self.properties_url();
        tracing::debug!("Making API request to: {}", url);

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        tracing::debug!("API response status: {}", status);

        if !status.is_success() {
            return Err(MarsApiError::StatusError {
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        let properties: Vec<MarsProperty> = serde_json::from_str(&body)?;
        tracing::debug!("Decoded {} properties", properties.len());

        Ok(properties)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    struct TestConfig {
        base_url: String,
        timeout_seconds: Option<u64>,
    }

    impl ConfigProvider for TestConfig {
        fn base_url(&self) -> &str {
            &self.base_url
        }

        fn timeout_seconds(&self) -> Option<u64> {
            self.timeout_seconds
        }
    }

    #[test]
    fn test_properties_url_joins_base_and_path() {
        let service = MarsApiService::new(BASE_URL);
        assert_eq!(service.properties_url(), "https://mars.udacity.com/realestate");

        let service = MarsApiService::new("http://localhost:3000");
        assert_eq!(service.properties_url(), "http://localhost:3000/realestate");
    }

    #[test]
    fn test_singleton_is_shared() {
        let first = MarsApi::service();
        let second = MarsApi::service();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(first.properties_url(), "https://mars.udacity.com/realestate");
    }

    #[tokio::test]
    async fn test_get_properties_decodes_array() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(GET).path("/realestate");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!([
                    {"id": "424905", "img_src": "http://mars.jpl.nasa.gov/a.jpg", "type": "rent", "price": 450000},
                    {"id": "424906", "img_src": "http://mars.jpl.nasa.gov/b.jpg", "type": "buy", "price": 8000000.5}
                ]));
        });

        let service = MarsApiService::new(&server.base_url());
        let properties = service.get_properties().await.unwrap();

        api_mock.assert();
        assert_eq!(properties.len(), 2);
        assert_eq!(properties[0].id, "424905");
        assert_eq!(properties[0].image_url, "http://mars.jpl.nasa.gov/a.jpg");
        assert_eq!(properties[0].category, "rent");
        assert_eq!(properties[1].price, 8000000.5);
    }

    #[tokio::test]
    async fn test_get_properties_server_error() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(GET).path("/realestate");
            then.status(500).body("internal error");
        });

        let service = MarsApiService::new(&server.base_url());
        let err = service.get_properties().await.unwrap_err();

        api_mock.assert();
        assert!(matches!(err, MarsApiError::StatusError { status: 500 }));
        assert!(err.is_fetch_failure());
    }

    #[tokio::test]
    async fn test_get_properties_malformed_payload() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/realestate");
            then.status(200).body("{\"not\": \"an array\"}");
        });

        let service = MarsApiService::new(&server.base_url());
        let err = service.get_properties().await.unwrap_err();

        assert!(matches!(err, MarsApiError::DecodeError(_)));
    }

    #[tokio::test]
    async fn test_get_properties_connection_refused() {
        // Nothing listens on port 9 of the loopback interface.
        let service = MarsApiService::new("http://127.0.0.1:9");
        let err = service.get_properties().await.unwrap_err();

        assert!(matches!(err, MarsApiError::FetchError(_)));
    }

    #[tokio::test]
    async fn test_from_config_uses_base_url() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(GET).path("/realestate");
            then.status(200).json_body(serde_json::json!([]));
        });

        let config = TestConfig {
            base_url: format!("{}/", server.base_url()),
            timeout_seconds: Some(5),
        };
        let service = MarsApiService::from_config(&config).unwrap();
        let properties = service.get_properties().await.unwrap();

        api_mock.assert();
        assert!(properties.is_empty());
    }
}
