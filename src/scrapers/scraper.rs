use crate::{BotResult, HttpResponse};
use async_trait::async_trait;
use url::Url;

#[async_trait]
pub trait Scraper: Send + Sync {
    /// Performs a single GET. Non-2xx statuses are returned, not turned into errors.
    async fn fetch(&self, url: Url) -> BotResult<HttpResponse>;
}
