use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;
use tokio_retry::RetryIf;

use crate::error::SyncError;
use crate::providers::ProviderError;

#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub initial_backoff: Duration,
}

impl RetryPolicy {
    pub fn new(max_retries: u32, initial_backoff: Duration) -> Self {
        Self { max_retries, initial_backoff }
    }

    pub fn none() -> Self {
        Self::new(0, Duration::ZERO)
    }

    /// Exponential backoff before retry number `attempt` (1-based)
    pub fn backoff(&self, attempt: u32) -> Duration {
        self.initial_backoff * 2u32.saturating_pow(attempt.saturating_sub(1))
    }

    /// Delays between attempts, one per allowed retry
    pub fn delays(&self) -> impl Iterator<Item = Duration> {
        let policy = *self;
        (1..=policy.max_retries).map(move |attempt| policy.backoff(attempt))
    }
}

/// Shared HTTP client for API and scrape providers: per-request timeout and
/// bounded retries with exponential backoff. Client errors are not retried.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
    timeout: Duration,
    retry: RetryPolicy,
}

impl HttpFetcher {
    pub fn new(timeout: Duration, retry: RetryPolicy) -> Result<Self, SyncError> {
        let client = Client::builder()
            .user_agent("loserpool-backend/0.1 (schedule sync)")
            .build()
            .map_err(|e| SyncError::Configuration(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self { client, timeout, retry })
    }

    pub async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, ProviderError> {
        let body = self.get_text(url).await?;
        serde_json::from_str(&body).map_err(|e| ProviderError::Parse {
            url: redact(url),
            message: e.to_string(),
        })
    }

    pub async fn get_text(&self, url: &str) -> Result<String, ProviderError> {
        let retry_strategy = self.retry.delays();
        let attempts = AtomicU32::new(0);

        let result = RetryIf::spawn(
            retry_strategy,
            || {
                attempts.fetch_add(1, Ordering::SeqCst);
                self.try_get(url)
            },
            |e: &ProviderError| {
                let retryable = is_retryable(e);
                if retryable {
                    tracing::warn!(
                        "Fetch of {} failed on attempt {} ({})",
                        redact(url),
                        attempts.load(Ordering::SeqCst),
                        e
                    );
                }
                retryable
            },
        )
        .await;

        result.map_err(|e| match e {
            ProviderError::Timeout { url, .. } => ProviderError::Timeout {
                url,
                attempts: attempts.load(Ordering::SeqCst),
            },
            other => other,
        })
    }

    async fn try_get(&self, url: &str) -> Result<String, ProviderError> {
        let response = self
            .client
            .get(url)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| request_error(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProviderError::Http {
                url: redact(url),
                status: status.as_u16(),
            });
        }

        response.text().await.map_err(|e| request_error(url, e))
    }
}

fn request_error(url: &str, e: reqwest::Error) -> ProviderError {
    if e.is_timeout() {
        ProviderError::Timeout { url: redact(url), attempts: 1 }
    } else {
        ProviderError::Network {
            url: redact(url),
            message: e.to_string(),
        }
    }
}

fn is_retryable(error: &ProviderError) -> bool {
    match error {
        ProviderError::Timeout { .. } | ProviderError::Network { .. } => true,
        ProviderError::Http { status, .. } => {
            *status == StatusCode::TOO_MANY_REQUESTS.as_u16() || *status >= 500
        }
        ProviderError::Parse { .. } | ProviderError::InvalidRequest(_) => false,
    }
}

/// Strip query strings so API keys never reach logs or error messages
fn redact(url: &str) -> String {
    match url.split_once('?') {
        Some((base, _)) => format!("{}?…", base),
        None => url.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backoff_doubles() {
        let policy = RetryPolicy::new(3, Duration::from_millis(100));
        assert_eq!(policy.backoff(1), Duration::from_millis(100));
        assert_eq!(policy.backoff(2), Duration::from_millis(200));
        assert_eq!(policy.backoff(3), Duration::from_millis(400));
        assert_eq!(policy.delays().count(), 3);
        assert_eq!(RetryPolicy::none().delays().count(), 0);
    }

    #[test]
    fn test_redact_hides_query() {
        assert_eq!(redact("https://api.example.com/x?key=secret"), "https://api.example.com/x?…");
        assert_eq!(redact("https://api.example.com/x"), "https://api.example.com/x");
    }

    #[test]
    fn test_client_errors_are_not_retried() {
        let not_found = ProviderError::Http { url: "u".into(), status: 404 };
        let unavailable = ProviderError::Http { url: "u".into(), status: 503 };
        assert!(!is_retryable(&not_found));
        assert!(is_retryable(&unavailable));
    }
}
