//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawler, including:
//! - Building HTTP clients with proper user agent strings
//! - GET requests to fetch page content
//! - Retry logic for transient failures
//! - Error classification

use crate::config::{CrawlerConfig, UserAgentConfig};
use reqwest::{redirect::Policy, Client, StatusCode};
use std::time::Duration;
use url::Url;

/// Maximum number of redirects followed per request
const MAX_REDIRECTS: usize = 10;

/// Result of a fetch operation
#[derive(Debug)]
pub enum FetchResult {
    /// Successfully fetched the page
    Success {
        /// Final URL after redirects
        final_url: Url,
        /// HTTP status code
        status_code: u16,
        /// Page body content
        body: String,
    },

    /// Server answered with a non-success status
    HttpError {
        /// The HTTP status code
        status_code: u16,
    },

    /// Network error (connection refused, timeout, unreadable body, etc.)
    NetworkError {
        /// Error description
        error: String,
        /// Whether another attempt may succeed
        retryable: bool,
    },
}

impl FetchResult {
    /// Returns true if the failure is transient and worth another attempt
    ///
    /// | Condition | Retry |
    /// |-----------|-------|
    /// | HTTP 5xx | yes |
    /// | HTTP 408, 429 | yes |
    /// | Other HTTP errors | no |
    /// | Timeout, connection failure | yes |
    /// | Other network errors | no |
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Success { .. } => false,
            Self::HttpError { status_code } => {
                *status_code >= 500
                    || *status_code == StatusCode::REQUEST_TIMEOUT.as_u16()
                    || *status_code == StatusCode::TOO_MANY_REQUESTS.as_u16()
            }
            Self::NetworkError { retryable, .. } => *retryable,
        }
    }

    /// Short description of a failed fetch, for logs
    pub fn describe(&self) -> String {
        match self {
            Self::Success { status_code, .. } => format!("HTTP {}", status_code),
            Self::HttpError { status_code } => format!("HTTP {}", status_code),
            Self::NetworkError { error, .. } => error.clone(),
        }
    }
}

/// How transient failures are retried
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Attempts after the first one
    pub max_retries: u32,
    /// Pause before each retry
    pub delay: Duration,
}

impl From<&CrawlerConfig> for RetryPolicy {
    fn from(config: &CrawlerConfig) -> Self {
        Self {
            max_retries: config.max_retries,
            delay: Duration::from_millis(config.retry_delay),
        }
    }
}

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `crawler` - Timeout settings
/// * `user_agent` - The user agent configuration
///
/// # Example
///
/// ```no_run
/// use blog_harvest::config::{CrawlerConfig, UserAgentConfig};
/// use blog_harvest::crawler::build_http_client;
///
/// let client = build_http_client(&CrawlerConfig::default(), &UserAgentConfig::default()).unwrap();
/// ```
pub fn build_http_client(
    crawler: &CrawlerConfig,
    user_agent: &UserAgentConfig,
) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(user_agent.header_value())
        .timeout(Duration::from_secs(crawler.request_timeout))
        .connect_timeout(Duration::from_secs(crawler.request_timeout.min(10)))
        .redirect(Policy::limited(MAX_REDIRECTS))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a URL, retrying transient failures
///
/// The request is attempted once, then up to `retry.max_retries` more times
/// while the outcome is retryable (see [`FetchResult::is_retryable`]). The
/// last outcome is returned.
pub async fn fetch_url(client: &Client, url: &Url, retry: &RetryPolicy) -> FetchResult {
    let mut attempt = 0;

    loop {
        let result = fetch_once(client, url).await;

        if !result.is_retryable() || attempt >= retry.max_retries {
            return result;
        }

        attempt += 1;
        tracing::debug!(
            "Retrying {} ({}/{}) after {}",
            url,
            attempt,
            retry.max_retries,
            result.describe()
        );
        tokio::time::sleep(retry.delay).await;
    }
}

/// Performs a single GET request and classifies the outcome
async fn fetch_once(client: &Client, url: &Url) -> FetchResult {
    match client.get(url.clone()).send().await {
        Ok(response) => {
            let status = response.status();
            let final_url = response.url().clone();

            if !status.is_success() {
                return FetchResult::HttpError {
                    status_code: status.as_u16(),
                };
            }

            match response.text().await {
                Ok(body) => FetchResult::Success {
                    final_url,
                    status_code: status.as_u16(),
                    body,
                },
                Err(e) => FetchResult::NetworkError {
                    error: e.to_string(),
                    retryable: e.is_timeout(),
                },
            }
        }
        Err(e) => {
            // Classify error
            if e.is_timeout() {
                FetchResult::NetworkError {
                    error: "Request timeout".to_string(),
                    retryable: true,
                }
            } else if e.is_connect() {
                FetchResult::NetworkError {
                    error: "Connection refused".to_string(),
                    retryable: true,
                }
            } else if e.is_redirect() {
                FetchResult::NetworkError {
                    error: format!("Too many redirects: {}", e),
                    retryable: false,
                }
            } else {
                FetchResult::NetworkError {
                    error: e.to_string(),
                    retryable: false,
                }
            }
        }
    }
}
