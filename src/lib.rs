pub mod catalog;
pub mod core;
pub mod dedup;
pub mod http;
pub mod notify;
pub mod parser;
pub mod scrapers;
pub mod stats;

pub use crate::core::{run_forever, BotConfig, BotError, BotResult, ScheduledTask};
pub use catalog::{CatalogFetcher, ProductListing, ProductSet};
pub use dedup::{SeenSet, SeenStore};
pub use http::HttpResponse;
pub use notify::{ChangeNotifier, ChatSink, DiscordSink, TickOutcome};
pub use parser::Parser;
pub use scrapers::Scraper;
pub use stats::StatsTracker;
