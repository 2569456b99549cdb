//! HTTP client with rate limiting for catalog fetches
//!
//! Every source adapter owns one of these: a reqwest wrapper that spaces
//! requests out, retries transient errors (429, 5xx) with exponential
//! backoff, and maps terminal statuses onto the adapter error taxonomy.
//! Adapters never share a client, so a slow catalog throttles only its
//! own fetches.

use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::Mutex;
use tokio::time::sleep;

use crate::error::AdapterError;

/// Default User-Agent sent to catalogs
const DEFAULT_USER_AGENT: &str = concat!("ephunt/", env!("CARGO_PKG_VERSION"));

/// Maximum number of retry attempts for transient errors
const MAX_RETRIES: u32 = 3;

/// Base delay for exponential backoff (in milliseconds)
const BASE_RETRY_DELAY_MS: u64 = 1000;

/// Rate limiter to control request frequency
///
/// Ensures that requests are spaced at least `min_interval` apart so a
/// single search never hammers a catalog.
pub struct RateLimiter {
    /// Minimum interval between requests
    min_interval: Duration,
    /// Timestamp of the last request
    last_request: Arc<Mutex<Instant>>,
}

impl RateLimiter {
    /// Create a new rate limiter with the specified requests per second.
    ///
    /// # Arguments
    /// * `requests_per_second` - Maximum number of requests allowed per second
    pub fn new(requests_per_second: f64) -> Self {
        let min_interval = Duration::from_secs_f64(1.0 / requests_per_second);
        Self {
            min_interval,
            last_request: Arc::new(Mutex::new(Instant::now() - min_interval)),
        }
    }

    /// Acquire permission to make a request, sleeping if the minimum
    /// interval since the previous request has not yet elapsed.
    pub async fn acquire(&self) {
        let mut last = self.last_request.lock().await;
        let elapsed = last.elapsed();

        if elapsed < self.min_interval {
            sleep(self.min_interval - elapsed).await;
        }

        *last = Instant::now();
    }

    /// Get the minimum interval between requests.
    pub fn min_interval(&self) -> Duration {
        self.min_interval
    }
}

/// Configuration for a catalog HTTP client
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Maximum requests per second (default: 2.0)
    pub requests_per_second: f64,
    /// Request timeout in seconds (default: 30)
    pub timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            requests_per_second: 2.0,
            timeout_secs: 30,
        }
    }
}

/// HTTP client for catalog fetches with rate limiting and retry logic
///
/// This client automatically:
/// - Limits request rate to avoid catalog overload
/// - Retries transient errors (429, 5xx) with exponential backoff
/// - Maps 404 and exhausted 429 retries to typed adapter errors
pub struct CatalogClient {
    /// Underlying HTTP client
    client: reqwest::Client,
    /// Rate limiter for request throttling
    rate_limiter: RateLimiter,
}

impl CatalogClient {
    /// Create a new client with default configuration.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be created.
    pub fn new() -> Result<Self, AdapterError> {
        Self::with_config(ClientConfig::default())
    }

    /// Create a new client with custom configuration.
    ///
    /// # Arguments
    /// * `config` - Client configuration
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be created.
    pub fn with_config(config: ClientConfig) -> Result<Self, AdapterError> {
        let client = reqwest::Client::builder()
            .user_agent(DEFAULT_USER_AGENT)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            rate_limiter: RateLimiter::new(config.requests_per_second),
        })
    }

    /// Fetch the body at an absolute URL.
    ///
    /// Handles rate limiting and retries automatically.
    ///
    /// # Arguments
    /// * `url` - Absolute URL on the adapter's catalog
    ///
    /// # Errors
    /// - `AdapterError::Http` - Network or HTTP error after all retries
    /// - `AdapterError::RateLimited` - Catalog returned 429 after all retries
    /// - `AdapterError::NotFound` - Catalog returned 404
    pub async fn fetch(&self, url: &str) -> Result<String, AdapterError> {
        self.fetch_with_retry(url, 0).await
    }

    /// Internal method to fetch with retry logic.
    fn fetch_with_retry<'a>(
        &'a self,
        url: &'a str,
        attempt: u32,
    ) -> std::pin::Pin<Box<dyn std::future::Future<Output = Result<String, AdapterError>> + Send + 'a>>
    {
        Box::pin(async move {
            // Wait for rate limiter before making the request
            self.rate_limiter.acquire().await;

            let response = self.client.get(url).send().await?;
            let status = response.status();

            if status.is_success() {
                return Ok(response.text().await?);
            }

            // 404 - Not Found (no retry)
            if status == reqwest::StatusCode::NOT_FOUND {
                return Err(AdapterError::NotFound(url.to_string()));
            }

            // 429 - Rate Limited
            if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
                if attempt < MAX_RETRIES {
                    sleep(backoff_delay(attempt)).await;
                    return self.fetch_with_retry(url, attempt + 1).await;
                }
                return Err(AdapterError::RateLimited);
            }

            // 5xx - Server errors
            if status.is_server_error() && attempt < MAX_RETRIES {
                sleep(backoff_delay(attempt)).await;
                return self.fetch_with_retry(url, attempt + 1).await;
            }

            // Anything else is terminal
            Err(AdapterError::Http(response.error_for_status().unwrap_err()))
        })
    }
}

/// Calculate the exponential backoff delay for a retry attempt: 1s, 2s, 4s, ...
fn backoff_delay(attempt: u32) -> Duration {
    Duration::from_millis(BASE_RETRY_DELAY_MS * 2u64.pow(attempt))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_limiter_creation() {
        let limiter = RateLimiter::new(2.0);
        assert_eq!(limiter.min_interval(), Duration::from_millis(500));
    }

    #[test]
    fn test_rate_limiter_different_rates() {
        let limiter = RateLimiter::new(1.0);
        assert_eq!(limiter.min_interval(), Duration::from_secs(1));

        let limiter = RateLimiter::new(4.0);
        assert_eq!(limiter.min_interval(), Duration::from_millis(250));
    }

    #[test]
    fn test_client_config_default() {
        let config = ClientConfig::default();
        assert_eq!(config.requests_per_second, 2.0);
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn test_client_creation() {
        assert!(CatalogClient::new().is_ok());
    }

    #[test]
    fn test_client_with_custom_config() {
        let config = ClientConfig {
            requests_per_second: 1.0,
            timeout_secs: 60,
        };
        assert!(CatalogClient::with_config(config).is_ok());
    }

    #[test]
    fn test_backoff_delay_calculation() {
        assert_eq!(backoff_delay(0), Duration::from_millis(1000));
        assert_eq!(backoff_delay(1), Duration::from_millis(2000));
        assert_eq!(backoff_delay(2), Duration::from_millis(4000));
    }

    #[tokio::test]
    async fn test_rate_limiter_acquire() {
        let limiter = RateLimiter::new(10.0); // 100ms interval

        let start = Instant::now();
        limiter.acquire().await;
        limiter.acquire().await;
        let elapsed = start.elapsed();

        // Second acquire should wait at least 100ms
        assert!(elapsed >= Duration::from_millis(100));
    }

    #[tokio::test]
    async fn test_fetch_not_found() {
        use wiremock::matchers::method;
        use wiremock::{Mock, MockServer, ResponseTemplate};

        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let client = CatalogClient::new().unwrap();
        let result = client.fetch(&format!("{}/missing", server.uri())).await;
        assert!(matches!(result, Err(AdapterError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_fetch_success() {
        use wiremock::matchers::method;
        use wiremock::{Mock, MockServer, ResponseTemplate};

        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("hello"))
            .mount(&server)
            .await;

        let client = CatalogClient::new().unwrap();
        let body = client.fetch(&server.uri()).await.unwrap();
        assert_eq!(body, "hello");
    }
}
