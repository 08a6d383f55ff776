use serde::Serialize;
use std::fmt;
use url::Url;

pub const UNKNOWN_AVAILABILITY: &str = "Unknown";

/// Coarse product category guessed from the listing title.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ProductSet {
    BoosterPack,
    EliteTrainerBox,
    Unknown,
}

impl ProductSet {
    /// Keyword checks run in order against the lower-cased title; first match wins.
    pub fn from_title(title: &str) -> Self {
        let title = title.to_lowercase();
        if title.contains("booster") {
            ProductSet::BoosterPack
        } else if title.contains("etb") || title.contains("elite trainer box") {
            ProductSet::EliteTrainerBox
        } else {
            ProductSet::Unknown
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ProductSet::BoosterPack => "Booster Pack",
            ProductSet::EliteTrainerBox => "Elite Trainer Box",
            ProductSet::Unknown => "Unknown Set",
        }
    }
}

impl fmt::Display for ProductSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductListing {
    pub title: String,
    pub price: String,
    pub link: Url,
    pub availability: String,
    pub set: ProductSet,
}

impl ProductListing {
    pub fn new(
        title: impl Into<String>,
        price: impl Into<String>,
        link: Url,
        availability: Option<String>,
    ) -> Self {
        let title = title.into();
        let set = ProductSet::from_title(&title);
        Self {
            title,
            price: price.into(),
            link,
            availability: availability.unwrap_or_else(|| UNKNOWN_AVAILABILITY.to_string()),
            set,
        }
    }

    /// Deduplication key. Listings sharing title and price collapse into one.
    pub fn identity(&self) -> String {
        format!("{}-{}", self.title, self.price)
    }

    pub fn is_out_of_stock(&self) -> bool {
        self.availability.to_lowercase().contains("out of stock")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn link() -> Url {
        Url::parse("https://www.bigw.com.au/product/123").unwrap()
    }

    #[test]
    fn test_set_detection_order() {
        assert_eq!(
            ProductSet::from_title("Pokemon TCG Booster Pack"),
            ProductSet::BoosterPack
        );
        assert_eq!(
            ProductSet::from_title("Scarlet & Violet ETB"),
            ProductSet::EliteTrainerBox
        );
        assert_eq!(
            ProductSet::from_title("Pokemon Elite Trainer Box"),
            ProductSet::EliteTrainerBox
        );
        // "booster" is checked first
        assert_eq!(
            ProductSet::from_title("Elite Trainer Box with Booster Bundle"),
            ProductSet::BoosterPack
        );
        assert_eq!(
            ProductSet::from_title("Pikachu Plush"),
            ProductSet::Unknown
        );
        assert_eq!(ProductSet::Unknown.to_string(), "Unknown Set");
    }

    #[test]
    fn test_identity_and_defaults() {
        let listing = ProductListing::new("Booster Bundle", "$39.00", link(), None);

        assert_eq!(listing.identity(), "Booster Bundle-$39.00");
        assert_eq!(listing.availability, "Unknown");
        assert_eq!(listing.set, ProductSet::BoosterPack);
        assert!(!listing.is_out_of_stock());
    }

    #[test]
    fn test_serializes_for_logging() {
        let listing = ProductListing::new(
            "Scarlet & Violet ETB",
            "$69.00",
            link(),
            Some("In Stock".to_string()),
        );
        let value = serde_json::to_value(&listing).unwrap();

        assert_eq!(value["title"], "Scarlet & Violet ETB");
        assert_eq!(value["link"], "https://www.bigw.com.au/product/123");
        assert_eq!(value["set"], "EliteTrainerBox");
    }

    #[test]
    fn test_out_of_stock_any_case() {
        for status in ["Out Of Stock", "OUT OF STOCK", "Currently out of stock online"] {
            let listing =
                ProductListing::new("ETB", "$69.00", link(), Some(status.to_string()));
            assert!(listing.is_out_of_stock(), "{} should be out of stock", status);
        }

        let listing = ProductListing::new("ETB", "$69.00", link(), Some("In Stock".to_string()));
        assert!(!listing.is_out_of_stock());
    }
}
