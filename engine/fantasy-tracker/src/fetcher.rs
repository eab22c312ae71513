use crate::config::StatsApiConfig;
use crate::error::{Result, TrackerError};
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, info};

/// Longest slice of an error response body kept in the error message
const ERROR_BODY_LIMIT: usize = 512;

/// Season stats table client
pub struct StatsFetcher {
    config: StatsApiConfig,
    client: Client,
}

impl StatsFetcher {
    /// Create a new fetcher instance
    pub fn new(config: StatsApiConfig) -> Result<Self> {
        let mut builder =
            Client::builder().user_agent(concat!("fantasy-tracker/", env!("CARGO_PKG_VERSION")));
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder.build()?;

        Ok(Self { config, client })
    }

    /// Returns the endpoint URL.
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// Fetch the season stats table and parse the body as JSON
    pub async fn fetch_stats_table(&self) -> Result<Value> {
        info!(
            "Fetching {} {} season totals from: {}",
            self.config.query.conference, self.config.query.seasons, self.config.base_url
        );

        let response = self
            .client
            .get(&self.config.base_url)
            .query(&self.config.query.to_query_pairs())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let mut body = response.text().await.unwrap_or_default();
            if body.len() > ERROR_BODY_LIMIT {
                let mut cut = ERROR_BODY_LIMIT;
                while !body.is_char_boundary(cut) {
                    cut -= 1;
                }
                body.truncate(cut);
            }
            return Err(TrackerError::HttpStatus { status: status.as_u16(), body });
        }

        let body = response.text().await?;
        debug!("Received {} bytes", body.len());

        serde_json::from_str(&body).map_err(TrackerError::MalformedResponse)
    }
}
