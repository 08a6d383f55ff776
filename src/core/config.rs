use std::env;
use std::fmt;
use std::time::Duration;

use url::Url;

use super::{BotError, BotResult};

pub const DEFAULT_SEARCH_URL: &str =
    "https://www.bigw.com.au/search/?text=pokemon+trading+card+game";
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";
pub const DEFAULT_CHECK_INTERVAL: Duration = Duration::from_secs(5 * 60);
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Runtime settings for the bot.
///
/// Required values come from the environment (`DISCORD_TOKEN`, `CHANNEL_ID`);
/// everything else has a default and can be overridden with the `with_*` builders.
#[derive(Clone)]
pub struct BotConfig {
    pub discord_token: String,
    pub channel_id: u64,
    pub search_url: Url,
    pub user_agent: String,
    pub check_interval: Duration,
    pub request_timeout: Duration,
}

impl BotConfig {
    pub fn new(discord_token: impl Into<String>, channel_id: u64) -> BotResult<Self> {
        Ok(Self {
            discord_token: discord_token.into(),
            channel_id,
            search_url: Url::parse(DEFAULT_SEARCH_URL)?,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            check_interval: DEFAULT_CHECK_INTERVAL,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        })
    }

    /// Loads `.env` if present, then reads the process environment.
    pub fn from_env() -> BotResult<Self> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub(crate) fn from_lookup<F>(lookup: F) -> BotResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let token = lookup("DISCORD_TOKEN")
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| BotError::ConfigError("DISCORD_TOKEN must be set".to_string()))?;

        let channel_id = lookup("CHANNEL_ID")
            .ok_or_else(|| BotError::ConfigError("CHANNEL_ID must be set".to_string()))?
            .trim()
            .parse::<u64>()
            .map_err(|e| BotError::ConfigError(format!("CHANNEL_ID must be a number: {}", e)))?;

        let mut config = Self::new(token, channel_id)?;

        if let Some(url) = lookup("SEARCH_URL") {
            config = config.with_search_url(Url::parse(url.trim())?);
        }
        if let Some(user_agent) = lookup("USER_AGENT").filter(|ua| !ua.trim().is_empty()) {
            config = config.with_user_agent(user_agent.trim());
        }
        if let Some(secs) = lookup("CHECK_INTERVAL_SECS") {
            config = config.with_check_interval(Duration::from_secs(parse_secs(
                "CHECK_INTERVAL_SECS",
                &secs,
            )?));
        }
        if let Some(secs) = lookup("REQUEST_TIMEOUT_SECS") {
            config = config.with_request_timeout(Duration::from_secs(parse_secs(
                "REQUEST_TIMEOUT_SECS",
                &secs,
            )?));
        }

        Ok(config)
    }

    pub fn with_search_url(mut self, url: Url) -> Self {
        self.search_url = url;
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn with_check_interval(mut self, interval: Duration) -> Self {
        self.check_interval = interval;
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Scheme and host of the search URL, used to absolutise product links.
    pub fn site_origin(&self) -> BotResult<Url> {
        Ok(self.search_url.join("/")?)
    }
}

fn parse_secs(key: &str, value: &str) -> BotResult<u64> {
    match value.trim().parse::<u64>() {
        Ok(0) => Err(BotError::ConfigError(format!("{} must be greater than zero", key))),
        Ok(secs) => Ok(secs),
        Err(e) => Err(BotError::ConfigError(format!("{} must be a number: {}", key, e))),
    }
}

impl fmt::Debug for BotConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BotConfig")
            .field("discord_token", &"<redacted>")
            .field("channel_id", &self.channel_id)
            .field("search_url", &self.search_url.as_str())
            .field("user_agent", &self.user_agent)
            .field("check_interval", &self.check_interval)
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}
