//! GitHub API client
//!
//! Minimal GitHub REST client that returns responses as raw JSON documents.

use super::LOG_TARGET;
use crate::Result;
use chrono::{DateTime, Utc};
use ohno::{EnrichableExt, IntoAppError, bail};
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue};
use url::Url;

const USER_AGENT: &str = "github-report";
const GITHUB_JSON: &str = "application/vnd.github+json";

/// Rate limit information from response headers
#[derive(Debug, Clone, Copy)]
pub struct RateLimitInfo {
    pub remaining: usize,
    pub reset_at: DateTime<Utc>,
}

/// Result of an API call
#[derive(Debug)]
pub enum ApiResult<T> {
    /// Request succeeded - contains data and optional rate limit info
    Success(T, Option<RateLimitInfo>),

    /// Rate limited or forbidden (403 or 429)
    RateLimited(Option<RateLimitInfo>),

    /// The requested resource was not found (404)
    NotFound,

    /// Request failed for any other reason
    Failed(ohno::AppError),
}

/// GitHub API client
#[derive(Debug, Clone)]
#[expect(clippy::struct_field_names, reason = "client field stores the underlying HTTP client")]
pub struct Client {
    client: reqwest::Client,
    base_url: Url,
}

impl Client {
    /// Create a new client with an optional authentication token.
    ///
    /// Paths are resolved relative to `base_url`, which is treated as a directory.
    pub fn new(token: Option<&str>, base_url: &Url) -> Result<Self> {
        let mut headers = HeaderMap::new();
        let _ = headers.insert(ACCEPT, HeaderValue::from_static(GITHUB_JSON));

        if let Some(t) = token {
            let mut auth_val = HeaderValue::from_str(&format!("token {t}"))?;
            auth_val.set_sensitive(true);
            let _ = headers.insert(AUTHORIZATION, auth_val);
        }

        let client = reqwest::Client::builder().user_agent(USER_AGENT).default_headers(headers).build()?;

        let mut base_url = base_url.clone();
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        Ok(Self { client, base_url })
    }

    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// The absolute URL of an API path such as `/users/octocat/repos`.
    pub fn endpoint(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .into_app_err_with(|| format!("invalid API path '{path}'"))
    }

    /// Make an API call and classify the result
    pub async fn api_call(&self, url: &Url) -> ApiResult<reqwest::Response> {
        let resp = match self.client.get(url.clone()).send().await {
            Ok(r) => r,
            Err(e) => return ApiResult::Failed(e.into()),
        };

        let rate_limit = extract_rate_limit_from_headers(resp.headers());

        let status = resp.status();
        if status.is_success() {
            return ApiResult::Success(resp, rate_limit);
        }

        match status.as_u16() {
            403 | 429 => ApiResult::RateLimited(rate_limit),
            404 => ApiResult::NotFound,
            _ => ApiResult::Failed(ohno::app_err!("HTTP status {status}")),
        }
    }

    /// Fetch an API path and decode the response as JSON.
    pub async fn get_json(&self, path: &str) -> Result<serde_json::Value> {
        let url = self.endpoint(path)?;
        log::debug!(target: LOG_TARGET, "Fetching '{url}'");

        match self.api_call(&url).await {
            ApiResult::Success(resp, rate_limit) => {
                if let Some(info) = rate_limit {
                    log::debug!(target: LOG_TARGET, "{} API requests left until {}", info.remaining, info.reset_at);
                }

                resp.json().await.into_app_err_with(|| format!("could not decode the response from '{url}'"))
            }
            ApiResult::RateLimited(Some(info)) if info.remaining == 0 => {
                bail!("GitHub API rate limit exceeded while fetching '{url}', it resets at {}", info.reset_at)
            }
            ApiResult::RateLimited(_) => bail!("GitHub API refused access to '{url}'"),
            ApiResult::NotFound => bail!("'{url}' was not found"),
            ApiResult::Failed(e) => Err(e.enrich_with(|| format!("could not fetch '{url}'"))),
        }
    }
}

/// Extract rate limit information from API response headers
fn extract_rate_limit_from_headers(headers: &HeaderMap) -> Option<RateLimitInfo> {
    let remaining = headers.get("x-ratelimit-remaining")?.to_str().ok()?.parse::<usize>().ok()?;

    let reset_timestamp = headers.get("x-ratelimit-reset")?.to_str().ok()?.parse::<i64>().ok()?;

    let reset_at = DateTime::from_timestamp(reset_timestamp, 0)?;

    Some(RateLimitInfo { remaining, reset_at })
}
