pub mod config;
mod errors;
pub mod scheduler;

pub use config::BotConfig;
pub use errors::{BotError, BotResult};
pub use scheduler::{run_forever, ScheduledTask};
