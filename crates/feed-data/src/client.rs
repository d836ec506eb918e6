//! HTTP gateway client.

use async_trait::async_trait;
use feed_core::{FeedError, FeedResponse, QueryKey, Report, User};
use serde::de::DeserializeOwned;
use url::Url;

use crate::gateway::FeedGateway;

const USER_AGENT: &str = concat!("feed-client/", env!("CARGO_PKG_VERSION"));

/// `reqwest`-backed gateway.
///
/// No timeout is set: a hanging gateway leaves the caller in its fetching
/// state, which is what the feed view expects.
#[derive(Debug, Clone)]
pub struct HttpGateway {
    http: reqwest::Client,
    base_url: String,
}

impl HttpGateway {
    /// Create a gateway for the given base URL.
    pub fn new(base_url: impl Into<String>) -> Result<Self, FeedError> {
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| FeedError::Config(e.to_string()))?;
        Self::with_client(http, base_url)
    }

    /// Create a gateway reusing an existing `reqwest` client.
    pub fn with_client(http: reqwest::Client, base_url: impl Into<String>) -> Result<Self, FeedError> {
        let base_url = base_url.into();
        Url::parse(&base_url)
            .map_err(|e| FeedError::Config(format!("invalid base URL {}: {}", base_url, e)))?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL of an API path.
    pub fn endpoint(&self, path: &str) -> Result<Url, FeedError> {
        let full = format!("{}/{}", self.base_url, path.trim_start_matches('/'));
        Url::parse(&full).map_err(|e| FeedError::Config(format!("invalid URL {}: {}", full, e)))
    }

    /// URL of the feed page for `key`. `category` is only sent when set.
    pub fn feed_url(&self, key: &QueryKey) -> Result<Url, FeedError> {
        let mut url = self.endpoint("/api/feed")?;
        {
            let mut query = url.query_pairs_mut();
            for (name, value) in key.query_pairs() {
                query.append_pair(name, &value);
            }
        }
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, FeedError> {
        tracing::debug!(url = %url, "gateway request");

        let resp = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| FeedError::transport(e.to_string()))?;

        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|e| FeedError::transport(e.to_string()))?;

        decode_body(status.as_u16(), &body)
    }
}

/// Turn a response status and body into a typed result.
///
/// Non-2xx statuses become [`FeedError::Network`] carrying the body text.
pub fn decode_body<T: DeserializeOwned>(status: u16, body: &str) -> Result<T, FeedError> {
    if !(200..300).contains(&status) {
        return Err(FeedError::from_response(status, body));
    }
    Ok(serde_json::from_str(body)?)
}

#[async_trait]
impl FeedGateway for HttpGateway {
    async fn users(&self) -> Result<Vec<User>, FeedError> {
        self.get_json(self.endpoint("/api/users")?).await
    }

    async fn reports(&self) -> Result<Vec<Report>, FeedError> {
        self.get_json(self.endpoint("/api/reports")?).await
    }

    async fn feed(&self, key: &QueryKey) -> Result<FeedResponse, FeedError> {
        self.get_json(self.feed_url(key)?).await
    }
}
