use crate::{BotError, BotResult, HttpResponse};
use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::time::sleep;
use url::Url;

use super::Scraper;

#[derive(Clone)]
pub struct MockResponse {
    pub status: u16,
    pub body: String,
    pub delay: Option<std::time::Duration>,
}

impl MockResponse {
    pub fn ok(body: impl Into<String>) -> Self {
        Self {
            status: 200,
            body: body.into(),
            delay: None,
        }
    }

    pub fn status(status: u16) -> Self {
        Self {
            status,
            body: String::new(),
            delay: None,
        }
    }

    pub fn with_delay(mut self, delay: std::time::Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}

/// Replays canned responses in order (wrapping around) and counts calls.
///
/// A status of `0` simulates a transport failure.
#[derive(Clone)]
pub struct MockScraper {
    responses: Arc<Vec<MockResponse>>,
    calls: Arc<AtomicUsize>,
}

impl MockScraper {
    pub fn new(responses: Vec<MockResponse>) -> Self {
        Self {
            responses: Arc::new(responses),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Scraper for MockScraper {
    async fn fetch(&self, url: Url) -> BotResult<HttpResponse> {
        let index = self.calls.fetch_add(1, Ordering::SeqCst);
        if self.responses.is_empty() {
            return Err(BotError::ConfigError(
                "MockScraper has no responses configured".to_string(),
            ));
        }
        let response = &self.responses[index % self.responses.len()];

        if let Some(delay) = response.delay {
            sleep(delay).await;
        }

        if response.status == 0 {
            return Err(BotError::ConnectionError(format!(
                "simulated connection failure for {}",
                url
            )));
        }

        Ok(HttpResponse {
            url,
            status: response.status,
            headers: HashMap::new(),
            body: response.body.clone(),
            timestamp: Utc::now(),
        })
    }
}
