//! HTTP client abstraction for testability

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use reqwest::redirect::Policy;
use reqwest::Client;

use crate::config::AssetConfig;
use crate::error::FetchError;

/// Boxed future type for dyn-compatible async methods.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Maximum number of redirects followed per request.
const MAX_REDIRECTS: usize = 10;

/// Trait for HTTP client operations.
///
/// This abstraction allows for dependency injection and easier testing
/// by enabling mock HTTP clients in tests.
pub trait HttpClient: Send + Sync {
    /// Performs an HTTP GET request and returns the complete body.
    ///
    /// Redirects are followed transparently. A non-success final status is
    /// an error, as is a body that is not fully received.
    fn get<'a>(&'a self, url: &'a str) -> BoxFuture<'a, Result<Vec<u8>, FetchError>>;
}

/// Real HTTP client implementation using reqwest.
#[derive(Debug, Clone)]
pub struct ReqwestClient {
    client: Client,
    max_body_bytes: u64,
}

impl ReqwestClient {
    /// Creates a client with explicit limits.
    ///
    /// * `connect_timeout` - bound on establishing the connection
    /// * `attempt_timeout` - bound on the whole request including the body
    /// * `max_body_bytes` - bodies larger than this fail the attempt
    pub fn with_limits(
        connect_timeout: Duration,
        attempt_timeout: Duration,
        max_body_bytes: u64,
    ) -> Result<Self, FetchError> {
        let client = Client::builder()
            .connect_timeout(connect_timeout)
            .timeout(attempt_timeout)
            .redirect(Policy::limited(MAX_REDIRECTS))
            .user_agent(concat!("doomkit/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| FetchError::Request(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            max_body_bytes,
        })
    }

    /// Creates a client from the acquisition configuration.
    pub fn from_config(config: &AssetConfig) -> Result<Self, FetchError> {
        Self::with_limits(
            config.connect_timeout,
            config.attempt_timeout,
            config.max_archive_bytes,
        )
    }

    /// Largest body this client accepts.
    pub fn max_body_bytes(&self) -> u64 {
        self.max_body_bytes
    }
}

impl HttpClient for ReqwestClient {
    fn get<'a>(&'a self, url: &'a str) -> BoxFuture<'a, Result<Vec<u8>, FetchError>> {
        Box::pin(async move {
            let mut response = self.client.get(url).send().await.map_err(map_error)?;

            let status = response.status();
            if !status.is_success() {
                return Err(FetchError::Status(status.as_u16()));
            }

            let limit = self.max_body_bytes;
            let declared = response.content_length().unwrap_or(0);
            if declared > limit {
                return Err(FetchError::TooLarge { limit });
            }

            let mut body = Vec::with_capacity(declared as usize);
            while let Some(chunk) = response.chunk().await.map_err(map_error)? {
                if body.len() as u64 + chunk.len() as u64 > limit {
                    return Err(FetchError::TooLarge { limit });
                }
                body.extend_from_slice(&chunk);
            }

            Ok(body)
        })
    }
}

fn map_error(e: reqwest::Error) -> FetchError {
    if e.is_timeout() {
        FetchError::Timeout
    } else {
        FetchError::Request(e.to_string())
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// Mock HTTP client for testing.
    ///
    /// Answers from a per-URL script; unknown URLs fail like a refused
    /// connection. Every requested URL is recorded in order.
    #[derive(Default)]
    pub struct MockHttpClient {
        pub responses: HashMap<String, Result<Vec<u8>, FetchError>>,
        pub delay: Option<Duration>,
        pub calls: Mutex<Vec<String>>,
    }

    impl MockHttpClient {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn respond(mut self, url: &str, response: Result<Vec<u8>, FetchError>) -> Self {
            self.responses.insert(url.to_string(), response);
            self
        }

        pub fn with_delay(mut self, delay: Duration) -> Self {
            self.delay = Some(delay);
            self
        }

        pub fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl HttpClient for MockHttpClient {
        fn get<'a>(&'a self, url: &'a str) -> BoxFuture<'a, Result<Vec<u8>, FetchError>> {
            Box::pin(async move {
                self.calls.lock().unwrap().push(url.to_string());
                if let Some(delay) = self.delay {
                    tokio::time::sleep(delay).await;
                }
                self.responses
                    .get(url)
                    .cloned()
                    .unwrap_or_else(|| Err(FetchError::Request("connection refused".into())))
            })
        }
    }

    #[tokio::test]
    async fn test_mock_client_success() {
        let mock = MockHttpClient::new().respond("http://example.com/a.zip", Ok(vec![1, 2, 3]));

        let result = mock.get("http://example.com/a.zip").await;
        assert_eq!(result.unwrap(), vec![1, 2, 3]);
        assert_eq!(mock.calls(), vec!["http://example.com/a.zip"]);
    }

    #[tokio::test]
    async fn test_mock_client_unknown_url() {
        let mock = MockHttpClient::new();
        let result = mock.get("http://example.com/missing.zip").await;
        assert!(matches!(result, Err(FetchError::Request(_))));
    }

    #[test]
    fn test_reqwest_client_from_config() {
        let config = AssetConfig::default().with_max_archive_bytes(4096);
        let client = ReqwestClient::from_config(&config).unwrap();
        assert_eq!(client.max_body_bytes(), 4096);
    }
}
