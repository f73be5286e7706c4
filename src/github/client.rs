// GitHub API HTTP client.
// Issues GET requests with fixed headers and maps non-success statuses to errors.

use std::sync::Mutex;

use reqwest::{
    Client, RequestBuilder, Response, StatusCode,
    header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue, USER_AGENT},
};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::{CardsError, Result};

use super::types::RateLimit;

const GITHUB_API_BASE: &str = "https://api.github.com";
const GITHUB_API_VERSION: &str = "2022-11-28";

/// GitHub API client with rate limit tracking.
///
/// Requests are anonymous unless a token is supplied.
pub struct GitHubClient {
    client: Client,
    base_url: String,
    rate_limit: Mutex<RateLimit>,
}

impl GitHubClient {
    /// Create a new GitHub client, optionally authenticated with a token.
    pub fn new(token: Option<&str>) -> Result<Self> {
        let mut headers = HeaderMap::new();

        if let Some(token) = token {
            headers.insert(
                AUTHORIZATION,
                HeaderValue::from_str(&format!("Bearer {}", token))
                    .map_err(|e| CardsError::Other(e.to_string()))?,
            );
        }
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github+json"),
        );
        headers.insert(
            "X-GitHub-Api-Version",
            HeaderValue::from_static(GITHUB_API_VERSION),
        );
        headers.insert(USER_AGENT, HeaderValue::from_static("repocards"));

        let client = Client::builder()
            .default_headers(headers)
            .build()
            .map_err(CardsError::Api)?;

        Ok(Self {
            client,
            base_url: GITHUB_API_BASE.to_string(),
            rate_limit: Mutex::new(RateLimit::default()),
        })
    }

    /// Get the last observed rate limit information.
    pub fn rate_limit(&self) -> RateLimit {
        self.rate_limit
            .lock()
            .map(|limit| limit.clone())
            .unwrap_or_default()
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }

    /// Make a GET request and decode the JSON body.
    pub async fn get_json<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T> {
        let url = self.url(endpoint);
        self.fetch(self.client.get(&url), &url).await
    }

    /// Make a GET request with query parameters and decode the JSON body.
    pub async fn get_json_with_params<T, P>(&self, endpoint: &str, params: &P) -> Result<T>
    where
        T: DeserializeOwned,
        P: serde::Serialize + ?Sized,
    {
        let url = self.url(endpoint);
        self.fetch(self.client.get(&url).query(params), &url).await
    }

    async fn fetch<T: DeserializeOwned>(&self, request: RequestBuilder, url: &str) -> Result<T> {
        debug!(url, "GET");
        let response = request.send().await.map_err(CardsError::Api)?;

        self.update_rate_limit(&response);
        let response = self.check_response(response)?;
        let body = response.text().await?;
        let value = serde_json::from_str(&body)?;
        Ok(value)
    }

    /// Update rate limit from response headers.
    fn update_rate_limit(&self, response: &Response) {
        let header = |name: &str| -> Option<u64> {
            response
                .headers()
                .get(name)
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse().ok())
        };

        let Ok(mut rate_limit) = self.rate_limit.lock() else {
            return;
        };
        if let Some(limit) = header("x-ratelimit-limit") {
            rate_limit.limit = limit;
        }
        if let Some(remaining) = header("x-ratelimit-remaining") {
            rate_limit.remaining = Some(remaining);
        }
        if let Some(reset) = header("x-ratelimit-reset") {
            rate_limit.reset = reset;
        }
    }

    /// Check response status and convert errors.
    fn check_response(&self, response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let url = response.url().to_string();
        match status {
            StatusCode::UNAUTHORIZED => Err(CardsError::Unauthorized),
            StatusCode::NOT_FOUND => Err(CardsError::NotFound(url)),
            StatusCode::FORBIDDEN | StatusCode::TOO_MANY_REQUESTS
                if self.rate_limit().is_exhausted() =>
            {
                Err(CardsError::RateLimited {
                    reset_at: self.rate_limit().reset_display(),
                })
            }
            status => Err(CardsError::Status {
                status: status.as_u16(),
                url,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_builds_without_token() {
        let client = GitHubClient::new(None).unwrap();
        assert_eq!(
            client.url("/users/octocat/repos"),
            "https://api.github.com/users/octocat/repos"
        );
        assert!(!client.rate_limit().is_exhausted());
    }

    #[test]
    fn test_client_rejects_unprintable_token() {
        assert!(GitHubClient::new(Some("bad\ntoken")).is_err());
    }
}
