use async_trait::async_trait;
use serde::Deserialize;

use crate::BotResult;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ChannelInfo {
    #[serde(deserialize_with = "id_from_string")]
    pub id: u64,
    #[serde(default)]
    pub name: Option<String>,
}

impl ChannelInfo {
    pub fn new(id: u64) -> Self {
        Self { id, name: None }
    }
}

/// Discord encodes snowflake ids as JSON strings.
pub(crate) fn id_from_string<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    raw.parse().map_err(serde::de::Error::custom)
}

/// Somewhere notifications can be delivered.
#[async_trait]
pub trait ChatSink: Send + Sync {
    /// `Ok(None)` when the channel does not exist or is not visible to the bot.
    async fn resolve_channel(&self, channel_id: u64) -> BotResult<Option<ChannelInfo>>;

    async fn send(&self, channel: &ChannelInfo, content: &str) -> BotResult<()>;
}
