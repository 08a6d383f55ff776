mod fetcher;
mod listing;

pub use fetcher::CatalogFetcher;
pub use listing::{ProductListing, ProductSet, UNKNOWN_AVAILABILITY};
