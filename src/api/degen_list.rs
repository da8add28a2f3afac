use reqwest::Client;
use std::time::Duration;
use tracing::{debug, info};
use url::Url;

use crate::config;
use crate::error::{Error, Result};
use crate::types::{DegenListData, DegenListItem};

/// Client for the degen leaderboard endpoint.
#[derive(Debug, Clone)]
pub struct DegenList {
    client: Client,
    endpoint: Url,
}

impl DegenList {
    /// Builds a client from the shared configuration.
    pub fn new() -> Result<Self> {
        let timeout = Duration::from_secs(config::get_http_timeout_seconds());
        Self::with_endpoint(&config::get_endpoint(), timeout)
    }

    pub fn with_endpoint(endpoint: &str, timeout: Duration) -> Result<Self> {
        let endpoint = Url::parse(endpoint)?;
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, endpoint })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Fetches the full leaderboard.
    pub async fn fetch(&self) -> Result<DegenListData> {
        debug!("GET {}", self.endpoint);
        let response = self
            .client
            .get(self.endpoint.clone())
            .send()
            .await?
            .error_for_status()?;
        let items = response.json::<DegenListData>().await?;
        info!("Fetched {} leaderboard entries", items.len());
        Ok(items)
    }

    /// Fetches the leaderboard and returns the entry for `token_address`.
    pub async fn fetch_item(&self, token_address: &str) -> Result<DegenListItem> {
        self.fetch()
            .await?
            .into_iter()
            .find(|item| item.token_address == token_address)
            .ok_or_else(|| Error::NotFound(format!("token {} is not on the leaderboard", token_address)))
    }
}

/// Explorer page for a token.
pub fn token_link(explorer_token_url: &str, token_address: &str) -> String {
    format!("{}/{}", explorer_token_url.trim_end_matches('/'), token_address)
}
