use crate::domain::model::Earthquake;
use crate::feed::geojson::parse_feed;
use crate::utils::error::{QuakeMapError, Result};
use reqwest::Client;
use std::time::Duration;

/// Single-shot reader for a GeoJSON earthquake feed.
#[derive(Debug, Clone)]
pub struct FeedClient {
    client: Client,
}

impl FeedClient {
    pub fn new(timeout: Option<Duration>) -> Result<Self> {
        let mut builder = Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")));
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
        })
    }

    pub async fn fetch(&self, url: &str) -> Result<Vec<Earthquake>> {
        tracing::debug!("Requesting feed: {}", url);
        let response = self.client.get(url).send().await?;

        let status = response.status();
        tracing::debug!("Feed response status: {}", status);
        if !status.is_success() {
            return Err(QuakeMapError::FeedStatusError {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await?;
        tracing::debug!("Feed body: {} bytes", body.len());
        parse_feed(&body)
    }
}
