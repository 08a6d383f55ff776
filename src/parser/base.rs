use crate::catalog::ProductListing;
use crate::{BotResult, HttpResponse};

pub trait Parser: Send + Sync {
    /// Extracts every well-formed listing from a search results page, in page order.
    fn parse(&self, response: &HttpResponse) -> BotResult<Vec<ProductListing>>;
}
