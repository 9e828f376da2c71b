//! Shared HTTP transport and response validation.

use std::time::Duration;

use reqwest::{Response, StatusCode};
use serde_json::Value;
use tracing::debug;

use crate::config::SuiteConfig;
use crate::error::{SuiteError, SuiteResult};

/// Request timeout for API calls.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Thin wrapper owning the HTTP client and target base URL.
///
/// Endpoint clients compose their requests through [`ApiClient::http`] and
/// funnel every response through [`ApiClient::validate`].
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Create a client targeting the configured base URL.
    pub fn new(config: &SuiteConfig) -> Self {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_default();
        Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        }
    }

    /// The underlying HTTP client.
    #[must_use]
    pub fn http(&self) -> &reqwest::Client {
        &self.http
    }

    /// Absolute URL for an API path.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// The configured base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Check the response status against the accepted set and leniently
    /// parse the body.
    ///
    /// Fails with [`SuiteError::UnexpectedStatus`] unless the actual status
    /// is a member of `expected` (one or many codes; some endpoints have
    /// two legitimate terminal outcomes, e.g. delete returning 204 or 404).
    /// An empty or non-JSON body yields `None` rather than an error; the
    /// no-content responses on this API carry no body at all.
    pub async fn validate(
        &self,
        response: Response,
        expected: &[StatusCode],
    ) -> SuiteResult<Option<Value>> {
        let actual = response.status();
        debug!(%actual, ?expected, url = %response.url(), "validating response");
        if !status_accepted(actual.as_u16(), expected) {
            return Err(SuiteError::UnexpectedStatus {
                expected: expected.iter().map(StatusCode::as_u16).collect(),
                actual: actual.as_u16(),
            });
        }
        let body = response.text().await?;
        Ok(parse_lenient(&body))
    }
}

/// Membership test for the accepted status set.
fn status_accepted(actual: u16, expected: &[StatusCode]) -> bool {
    expected.iter().any(|code| code.as_u16() == actual)
}

/// Parse a response body as JSON, mapping empty/invalid bodies to `None`.
fn parse_lenient(body: &str) -> Option<Value> {
    serde_json::from_str(body).ok()
}
