use log::{debug, error, info, warn};
use url::Url;

use super::ProductListing;
use crate::parser::{HtmlParser, Parser};
use crate::scrapers::Scraper;
use crate::{BotConfig, BotError, BotResult};

/// Pulls the search results page and turns it into listings.
pub struct CatalogFetcher {
    scraper: Box<dyn Scraper>,
    parser: Box<dyn Parser>,
    search_url: Url,
}

impl CatalogFetcher {
    pub fn new(scraper: Box<dyn Scraper>, parser: Box<dyn Parser>, search_url: Url) -> Self {
        Self {
            scraper,
            parser,
            search_url,
        }
    }

    /// Builds a fetcher with the default card selectors for the configured site.
    pub fn from_config(scraper: Box<dyn Scraper>, config: &BotConfig) -> BotResult<Self> {
        let parser = HtmlParser::new(config.site_origin()?)?;
        Ok(Self::new(scraper, Box::new(parser), config.search_url.clone()))
    }

    pub fn search_url(&self) -> &Url {
        &self.search_url
    }

    /// One GET, one parse. Transport failures and non-2xx statuses are errors;
    /// malformed cards are dropped by the parser.
    pub async fn fetch(&self) -> BotResult<Vec<ProductListing>> {
        let response = self
            .scraper
            .fetch(self.search_url.clone())
            .await
            .inspect_err(|e| error!("Error fetching {}: {}", self.search_url, e))?;

        if !response.is_success() {
            error!(
                "Error fetching {}: unexpected status {}",
                self.search_url, response.status
            );
            return Err(BotError::StatusError(response.status));
        }

        if !response.looks_like_html() {
            warn!(
                "Expected HTML from {} but got {:?}",
                self.search_url,
                response.content_type()
            );
        }

        let listings = self.parser.parse(&response)?;
        debug!(
            "Parsed response from {} in {}ms",
            self.search_url,
            response.age().num_milliseconds()
        );
        info!("Fetched {} listings from {}", listings.len(), self.search_url);
        Ok(listings)
    }

    /// Same as [`fetch`](Self::fetch) but reports any failure as an empty page.
    pub async fn fetch_or_empty(&self) -> Vec<ProductListing> {
        self.fetch().await.unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scrapers::mock_scraper::{MockResponse, MockScraper};
    use crate::scrapers::HttpScraper;
    use wiremock::matchers::{header_regex, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const PAGE: &str = r#"
        <div class="product-tile">
          <span class="product-title">Booster Bundle</span>
          <span class="price">$45.00</span>
          <span class="stock-availability">In stock</span>
          <a href="/product/booster-bundle/p/1">View</a>
        </div>
        <div class="product-tile">
          <span class="product-title">Elite Trainer Box</span>
          <span class="price">$79.00</span>
          <a href="/product/etb/p/2">View</a>
        </div>"#;

    fn fetcher(scraper: MockScraper) -> CatalogFetcher {
        let config = BotConfig::new("token", 1).unwrap();
        CatalogFetcher::from_config(Box::new(scraper), &config).unwrap()
    }

    #[tokio::test]
    async fn test_fetch_parses_listings() {
        let scraper = MockScraper::new(vec![MockResponse::ok(PAGE)]);
        let fetcher = fetcher(scraper.clone());

        let listings = fetcher.fetch().await.unwrap();

        assert_eq!(scraper.call_count(), 1);
        assert_eq!(listings.len(), 2);
        assert_eq!(
            listings[0].link.as_str(),
            "https://www.bigw.com.au/product/booster-bundle/p/1"
        );
        assert_eq!(listings[1].availability, "Unknown");
    }

    #[tokio::test]
    async fn test_non_success_status_is_an_error() {
        let fetcher = fetcher(MockScraper::new(vec![MockResponse::status(503)]));

        let result = fetcher.fetch().await;
        assert!(matches!(result, Err(BotError::StatusError(503))));
        assert!(fetcher.fetch_or_empty().await.is_empty());
    }

    #[tokio::test]
    async fn test_transport_failure_is_an_error() {
        let fetcher = fetcher(MockScraper::new(vec![MockResponse::status(0)]));

        assert!(matches!(
            fetcher.fetch().await,
            Err(BotError::ConnectionError(_))
        ));
        assert!(fetcher.fetch_or_empty().await.is_empty());
    }

    #[tokio::test]
    async fn test_fetch_against_http_server() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search/"))
            .and(query_param("text", "pokemon trading card game"))
            .and(header_regex("user-agent", r"Chrome/91\.0\.4472\.124"))
            .respond_with(ResponseTemplate::new(200).set_body_string(PAGE))
            .expect(1)
            .mount(&server)
            .await;

        let search_url = Url::parse(&format!(
            "{}/search/?text=pokemon+trading+card+game",
            server.uri()
        ))
        .unwrap();
        let config = BotConfig::new("token", 1)
            .unwrap()
            .with_search_url(search_url);
        let fetcher =
            CatalogFetcher::from_config(Box::new(HttpScraper::new().unwrap()), &config).unwrap();

        let listings = fetcher.fetch().await.unwrap();

        assert_eq!(listings.len(), 2);
        assert!(listings[0]
            .link
            .as_str()
            .starts_with(&format!("{}/product/", server.uri())));
    }
}
