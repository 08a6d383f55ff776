use crate::catalog::ProductListing;
use crate::parser::Parser;
use crate::{BotError, BotResult, HttpResponse};
use log::{debug, trace, warn};
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use url::Url;

/// CSS rules locating a product card and its fields on the search page.
#[derive(Debug, Clone)]
pub struct ListingSelectors {
    pub card: String,
    pub title: String,
    pub price: String,
    pub link: String,
    pub availability: String,
}

impl Default for ListingSelectors {
    fn default() -> Self {
        Self {
            card: ".product-tile".to_string(),
            title: ".product-title".to_string(),
            price: ".price".to_string(),
            link: "a".to_string(),
            availability: ".stock-availability".to_string(),
        }
    }
}

struct CompiledSelectors {
    card: Selector,
    title: Selector,
    price: Selector,
    link: Selector,
    availability: Selector,
}

fn compile(selector: &str) -> BotResult<Selector> {
    Selector::parse(selector)
        .map_err(|e| BotError::ConfigError(format!("invalid selector {:?}: {:?}", selector, e)))
}

pub struct HtmlParser {
    selectors: CompiledSelectors,
    origin: Url,
    whitespace: Regex,
}

impl HtmlParser {
    /// `origin` is the site root that relative product links are resolved against.
    pub fn new(origin: Url) -> BotResult<Self> {
        Self::with_selectors(origin, ListingSelectors::default())
    }

    pub fn with_selectors(origin: Url, selectors: ListingSelectors) -> BotResult<Self> {
        let whitespace = Regex::new(r"\s+")
            .map_err(|e| BotError::ConfigError(format!("invalid whitespace pattern: {}", e)))?;

        Ok(Self {
            selectors: CompiledSelectors {
                card: compile(&selectors.card)?,
                title: compile(&selectors.title)?,
                price: compile(&selectors.price)?,
                link: compile(&selectors.link)?,
                availability: compile(&selectors.availability)?,
            },
            origin,
            whitespace,
        })
    }

    fn text_of(&self, card: &ElementRef, selector: &Selector) -> Option<String> {
        card.select(selector).next().map(|node| {
            let text = node.text().collect::<String>();
            self.whitespace.replace_all(text.trim(), " ").into_owned()
        })
    }

    fn parse_card(&self, card: &ElementRef) -> BotResult<ProductListing> {
        let title = self
            .text_of(card, &self.selectors.title)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| BotError::ExtractionError("missing product title".to_string()))?;

        let price = self
            .text_of(card, &self.selectors.price)
            .ok_or_else(|| {
                BotError::ExtractionError(format!("missing price for {:?}", title))
            })?;

        let href = card
            .select(&self.selectors.link)
            .find_map(|a| a.value().attr("href"))
            .ok_or_else(|| BotError::ExtractionError(format!("missing link for {:?}", title)))?;
        let link = self.origin.join(href.trim()).map_err(|e| {
            BotError::ExtractionError(format!("bad link {:?} for {:?}: {}", href, title, e))
        })?;

        let availability = self.text_of(card, &self.selectors.availability);

        Ok(ProductListing::new(title, price, link, availability))
    }
}

impl Parser for HtmlParser {
    fn parse(&self, response: &HttpResponse) -> BotResult<Vec<ProductListing>> {
        let document = Html::parse_document(&response.body);
        trace!("Parsing HTML content: {}", response.body);

        let mut listings = Vec::new();
        let mut matched = 0usize;
        for card in document.select(&self.selectors.card) {
            matched += 1;
            match self.parse_card(&card) {
                Ok(listing) => listings.push(listing),
                Err(e) => warn!("Error parsing product card {}: {}", matched, e),
            }
        }

        debug!(
            "Parsed {} of {} product cards from {}",
            listings.len(),
            matched,
            response.url
        );
        Ok(listings)
    }
}
