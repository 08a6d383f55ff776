use async_trait::async_trait;
use chrono::Utc;
use log::debug;
use reqwest::{header, Client, ClientBuilder};
use std::collections::HashMap;
use std::time::Duration;
use thiserror::Error;
use url::Url;

use super::Scraper;
use crate::core::config::{DEFAULT_REQUEST_TIMEOUT, DEFAULT_USER_AGENT};
use crate::{BotError, BotResult, HttpResponse};

#[derive(Debug, Error)]
pub enum HttpScraperError {
    #[error("HTTP client error: {0}")]
    HttpError(#[from] reqwest::Error),
    #[error("Invalid header name: {0}")]
    InvalidHeaderName(#[from] header::InvalidHeaderName),
    #[error("Invalid header value: {0}")]
    InvalidHeaderValue(#[from] header::InvalidHeaderValue),
}

impl From<HttpScraperError> for BotError {
    fn from(err: HttpScraperError) -> Self {
        match err {
            HttpScraperError::HttpError(e) => BotError::HttpError(e),
            other => BotError::ConfigError(other.to_string()),
        }
    }
}

#[derive(Clone)]
pub struct HttpScraper {
    client: Client,
    user_agent: String,
    timeout: Duration,
}

impl HttpScraper {
    pub fn new() -> Result<Self, HttpScraperError> {
        Self::with_settings(DEFAULT_USER_AGENT, DEFAULT_REQUEST_TIMEOUT)
    }

    pub fn with_settings(user_agent: &str, timeout: Duration) -> Result<Self, HttpScraperError> {
        let client = ClientBuilder::new()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            user_agent: user_agent.to_string(),
            timeout,
        })
    }

    pub fn with_headers(mut self, headers: Vec<(&str, &str)>) -> Result<Self, HttpScraperError> {
        let mut header_map = header::HeaderMap::new();
        header_map.insert(
            header::USER_AGENT,
            header::HeaderValue::from_str(&self.user_agent)?,
        );

        for (key, value) in headers {
            let name = header::HeaderName::from_bytes(key.as_bytes())?;
            let value = header::HeaderValue::from_str(value)?;
            header_map.insert(name, value);
        }

        self.client = ClientBuilder::new()
            .default_headers(header_map)
            .timeout(self.timeout)
            .build()?;

        Ok(self)
    }

    fn extract_headers(response: &reqwest::Response) -> HashMap<String, String> {
        response
            .headers()
            .iter()
            .filter_map(|(k, v)| v.to_str().ok().map(|val| (k.to_string(), val.to_string())))
            .collect()
    }
}

#[async_trait]
impl Scraper for HttpScraper {
    async fn fetch(&self, url: Url) -> BotResult<HttpResponse> {
        let start_time = Utc::now();
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    BotError::ConnectionError(format!(
                        "request to {} timed out after {:?}",
                        url, self.timeout
                    ))
                } else {
                    BotError::from(HttpScraperError::from(e))
                }
            })?;

        let status = response.status().as_u16();
        let headers = Self::extract_headers(&response);
        let body = response.text().await.map_err(HttpScraperError::from)?;

        debug!(
            "GET {} -> status={}, body_length={}, elapsed={}ms",
            url,
            status,
            body.len(),
            (Utc::now() - start_time).num_milliseconds()
        );

        Ok(HttpResponse {
            url,
            status,
            headers,
            body,
            timestamp: start_time,
        })
    }
}
