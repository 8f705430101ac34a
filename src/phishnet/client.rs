use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, warn};
use url::Url;

use crate::catalog::ShowCalendar;
use crate::error::{AppError, Result};
use crate::phishnet::models::{ShowsResponse, UpcomingShow};

const PHISHNET_API_BASE: &str = "https://api.phish.net/v5";

pub struct PhishnetClient {
    http_client: Client,
    api_key: String,
    api_base: String,
}

impl PhishnetClient {
    pub fn new(api_key: &str, timeout: Duration) -> Result<Self> {
        let http_client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            http_client,
            api_key: api_key.to_string(),
            api_base: PHISHNET_API_BASE.to_string(),
        })
    }

    pub fn with_api_base(mut self, api_base: &str) -> Self {
        self.api_base = api_base.trim_end_matches('/').to_string();
        self
    }

    pub fn shows_url(&self) -> Result<Url> {
        let mut url = Url::parse(&format!("{}/shows/artist/phish.json", self.api_base))?;
        url.query_pairs_mut()
            .append_pair("order_by", "showdate")
            .append_pair("direction", "asc")
            .append_pair("apikey", &self.api_key);
        Ok(url)
    }

    pub async fn shows(&self) -> Result<Vec<UpcomingShow>> {
        let url = self.shows_url()?;
        debug!("GET {}/shows/artist/phish.json", self.api_base);

        let response = self.http_client.get(url).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            warn!("phish.net request failed ({}): {}", status, error_text);
            return Err(AppError::PhishnetApi(format!("{}: {}", status, error_text)));
        }

        let body: ShowsResponse = response.json().await?;
        if body.error {
            return Err(AppError::PhishnetApi(
                body.error_message
                    .unwrap_or_else(|| "unknown error".to_string()),
            ));
        }

        debug!("phish.net returned {} shows", body.data.len());
        Ok(body.data)
    }
}

#[async_trait]
impl ShowCalendar for PhishnetClient {
    async fn upcoming_shows(&self) -> Result<Vec<UpcomingShow>> {
        self.shows().await
    }
}
