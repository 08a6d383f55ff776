use async_trait::async_trait;
use log::{debug, warn};
use reqwest::{header, Client, ClientBuilder, StatusCode};
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;
use url::Url;

use super::sink::{id_from_string, ChannelInfo, ChatSink};
use crate::{BotError, BotResult};

pub const DISCORD_API_BASE: &str = "https://discord.com/api/v10/";

#[derive(Debug, Clone, Deserialize)]
pub struct CurrentUser {
    #[serde(deserialize_with = "id_from_string")]
    pub id: u64,
    pub username: String,
}

/// Bot-token client for the Discord REST API.
#[derive(Clone)]
pub struct DiscordSink {
    client: Client,
    api_base: Url,
}

impl DiscordSink {
    pub fn new(token: &str, timeout: Duration) -> BotResult<Self> {
        Self::with_api_base(token, timeout, Url::parse(DISCORD_API_BASE)?)
    }

    pub fn with_api_base(token: &str, timeout: Duration, api_base: Url) -> BotResult<Self> {
        let mut auth = header::HeaderValue::from_str(&format!("Bot {}", token))
            .map_err(|e| BotError::ConfigError(format!("invalid Discord token: {}", e)))?;
        auth.set_sensitive(true);

        let mut headers = header::HeaderMap::new();
        headers.insert(header::AUTHORIZATION, auth);

        let client = ClientBuilder::new()
            .default_headers(headers)
            .user_agent(concat!(
                "DiscordBot (https://github.com/restock-watch, ",
                env!("CARGO_PKG_VERSION"),
                ")"
            ))
            .timeout(timeout)
            .build()?;

        Ok(Self { client, api_base })
    }

    fn endpoint(&self, path: &str) -> BotResult<Url> {
        Ok(self.api_base.join(path)?)
    }

    /// Confirms the token works and returns the bot account.
    pub async fn login(&self) -> BotResult<CurrentUser> {
        let response = self.client.get(self.endpoint("users/@me")?).send().await?;
        if !response.status().is_success() {
            return Err(BotError::StatusError(response.status().as_u16()));
        }
        Ok(response.json::<CurrentUser>().await?)
    }
}

#[async_trait]
impl ChatSink for DiscordSink {
    async fn resolve_channel(&self, channel_id: u64) -> BotResult<Option<ChannelInfo>> {
        let url = self.endpoint(&format!("channels/{}", channel_id))?;
        let response = self.client.get(url).send().await?;

        match response.status() {
            status if status.is_success() => Ok(Some(response.json::<ChannelInfo>().await?)),
            StatusCode::NOT_FOUND | StatusCode::FORBIDDEN => {
                warn!(
                    "Channel {} is not visible to the bot (status {})",
                    channel_id,
                    response.status()
                );
                Ok(None)
            }
            status => Err(BotError::StatusError(status.as_u16())),
        }
    }

    async fn send(&self, channel: &ChannelInfo, content: &str) -> BotResult<()> {
        let url = self.endpoint(&format!("channels/{}/messages", channel.id))?;
        let response = self
            .client
            .post(url)
            .json(&json!({ "content": content }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(BotError::DeliveryError(format!(
                "Discord rejected message to channel {} with status {}: {}",
                channel.id, status, body
            )));
        }

        debug!(
            "Sent {} characters to channel {}",
            content.chars().count(),
            channel.id
        );
        Ok(())
    }
}
