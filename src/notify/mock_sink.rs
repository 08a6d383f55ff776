use async_trait::async_trait;
use parking_lot::RwLock;
use std::sync::Arc;

use super::sink::{ChannelInfo, ChatSink};
use crate::{BotError, BotResult};

/// In-memory [`ChatSink`] that records every message it is asked to send.
#[derive(Clone, Default)]
pub struct MockSink {
    channel: Option<ChannelInfo>,
    sent: Arc<RwLock<Vec<String>>>,
    fail_after: Option<usize>,
    fail_resolve: bool,
}

impl MockSink {
    /// A sink where `channel_id` resolves.
    pub fn with_channel(channel_id: u64) -> Self {
        Self {
            channel: Some(ChannelInfo::new(channel_id)),
            ..Self::default()
        }
    }

    /// A sink where no channel resolves.
    pub fn without_channel() -> Self {
        Self::default()
    }

    /// Sends succeed `count` times, then fail.
    pub fn failing_after(mut self, count: usize) -> Self {
        self.fail_after = Some(count);
        self
    }

    /// Channel lookups error out, as when Discord is unreachable.
    pub fn failing_resolve(mut self) -> Self {
        self.fail_resolve = true;
        self
    }

    pub fn sent(&self) -> Vec<String> {
        self.sent.read().clone()
    }
}

#[async_trait]
impl ChatSink for MockSink {
    async fn resolve_channel(&self, channel_id: u64) -> BotResult<Option<ChannelInfo>> {
        if self.fail_resolve {
            return Err(BotError::ConnectionError(format!(
                "mock lookup of channel {} failed",
                channel_id
            )));
        }
        Ok(self.channel.clone().filter(|c| c.id == channel_id))
    }

    async fn send(&self, channel: &ChannelInfo, content: &str) -> BotResult<()> {
        let mut sent = self.sent.write();
        if self.fail_after.is_some_and(|limit| sent.len() >= limit) {
            return Err(BotError::DeliveryError(format!(
                "mock delivery to channel {} failed",
                channel.id
            )));
        }
        sent.push(content.to_string());
        Ok(())
    }
}
