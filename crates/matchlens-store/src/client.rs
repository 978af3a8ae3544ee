//! Shared HTTP client utilities

use crate::{Result, StoreError};
use reqwest::{Client, ClientBuilder};
use std::time::Duration;
use tracing::{debug, warn};

/// HTTP client configuration
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// Request timeout in seconds
    pub timeout_secs: u64,

    /// Connection timeout in seconds
    pub connect_timeout_secs: u64,

    /// Maximum number of idle connections per host
    pub pool_max_idle_per_host: usize,

    /// User agent string
    pub user_agent: String,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            // A full-table select over a few thousand games stays well under this
            timeout_secs: 30,
            connect_timeout_secs: 10,
            pool_max_idle_per_host: 4,
            user_agent: format!("MatchLens/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// Create a configured HTTP client with connection pooling
pub fn create_client(config: &HttpClientConfig) -> Result<Client> {
    ClientBuilder::new()
        .timeout(Duration::from_secs(config.timeout_secs))
        .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
        .pool_max_idle_per_host(config.pool_max_idle_per_host)
        // Supabase's gateway drops idle keep-alive connections after ~60s
        .pool_idle_timeout(Duration::from_secs(50))
        .user_agent(&config.user_agent)
        // Use rustls for TLS (no openssl dependency)
        .use_rustls_tls()
        .build()
        .map_err(|e| StoreError::ConfigError(format!("Failed to create HTTP client: {}", e)))
}

/// Bounded retry with a fixed delay between attempts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first
    pub max_attempts: u32,

    /// Pause between attempts
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            delay: Duration::from_millis(500),
        }
    }
}

fn is_retryable(err: &StoreError) -> bool {
    match err {
        // Network errors, connection errors, timeouts
        StoreError::HttpError(req_err) => {
            req_err.is_connect() || req_err.is_timeout() || req_err.is_request()
        }
        StoreError::QueryError { status_code, .. } => {
            matches!(status_code, 429 | 500 | 502 | 503 | 504)
        }
        _ => false,
    }
}

/// Run `operation` until it succeeds, fails permanently, or the policy is exhausted
pub async fn with_retry<F, Fut, T>(policy: RetryPolicy, operation: F) -> Result<T>
where
    F: Fn() -> Fut,
    Fut: std::future::Future<Output = Result<T>>,
{
    let max_attempts = policy.max_attempts.max(1);
    let mut attempt = 1;

    loop {
        match operation().await {
            Ok(result) => return Ok(result),
            Err(e) if attempt < max_attempts && is_retryable(&e) => {
                warn!(
                    "Store request failed (attempt {}/{}): {}",
                    attempt, max_attempts, e
                );
                debug!("Retrying after {:?}", policy.delay);
                tokio::time::sleep(policy.delay).await;
                attempt += 1;
            }
            Err(e) => return Err(e),
        }
    }
}
