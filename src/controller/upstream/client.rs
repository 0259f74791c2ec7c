use async_trait::async_trait;
use reqwest::{Client, Url};
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

use super::UpstreamError;
use crate::args::CleanArgs;

/// The third-party fighter feed.
#[async_trait]
pub trait FighterApi: Send + Sync {
    /// Every fighter, as the upstream `FightersBasic` listing returns them.
    async fn fighters(&self) -> Result<Value, UpstreamError>;

    /// One fighter by id.
    async fn fighter(&self, fighter_id: &str) -> Result<Value, UpstreamError>;
}

pub struct SportsDataClient {
    client: Client,
    base_url: Url,
    api_key: String,
    timeout: Option<Duration>,
}

impl SportsDataClient {
    /// # Errors
    ///
    /// Will return `Err` if `base_url` is not an absolute http(s) url or the
    /// http client cannot be built
    pub fn new(
        base_url: &str,
        api_key: impl Into<String>,
        timeout: Option<Duration>,
    ) -> Result<Self, UpstreamError> {
        let base_url = Url::parse(base_url.trim_end_matches('/'))
            .map_err(|e| UpstreamError::Network(format!("invalid upstream url '{base_url}': {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(UpstreamError::Network(format!(
                "upstream url '{base_url}' cannot carry a path"
            )));
        }
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| UpstreamError::Network(e.to_string()))?;
        Ok(Self {
            client,
            base_url,
            api_key: api_key.into(),
            timeout,
        })
    }

    /// # Errors
    ///
    /// Will return `Err` if the configured upstream url is unusable
    pub fn from_args(args: &CleanArgs) -> Result<Self, UpstreamError> {
        Self::new(&args.upstream_base_url, args.api_key.clone(), args.upstream_timeout)
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, UpstreamError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| UpstreamError::Network(format!("upstream url '{}' cannot carry a path", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        url.query_pairs_mut().append_pair("key", &self.api_key);
        Ok(url)
    }

    // the request url carries the api key, so it is stripped from errors
    fn classify(&self, err: reqwest::Error) -> UpstreamError {
        match self.timeout {
            Some(timeout) if err.is_timeout() => UpstreamError::Timeout(timeout),
            _ => UpstreamError::Network(err.without_url().to_string()),
        }
    }

    async fn get_json(&self, url: Url) -> Result<Value, UpstreamError> {
        debug!("GET {}{}", url.origin().ascii_serialization(), url.path());
        let resp = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(UpstreamError::Status {
                status: status.as_u16(),
                status_text: status.canonical_reason().unwrap_or_default().to_string(),
                body,
            });
        }

        let text = resp.text().await.map_err(|e| self.classify(e))?;
        serde_json::from_str(&text).map_err(|e| UpstreamError::Parse(e.to_string()))
    }
}

#[async_trait]
impl FighterApi for SportsDataClient {
    async fn fighters(&self) -> Result<Value, UpstreamError> {
        let url = self.endpoint(&["FightersBasic"])?;
        self.get_json(url).await
    }

    async fn fighter(&self, fighter_id: &str) -> Result<Value, UpstreamError> {
        let url = self.endpoint(&["Fighter", fighter_id.trim()])?;
        self.get_json(url).await
    }
}
