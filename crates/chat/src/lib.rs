//! Bridge to the third-party chat service.
//!
//! Spark does not implement chat itself. Once two teams are matched it
//! asks the chat service for a channel containing the participants; the
//! service owns sessions, messages and delivery.

pub mod config;
pub mod sendbird;

use std::sync::Arc;

use async_trait::async_trait;
use eyre::{eyre, Result};
use serde::{Deserialize, Serialize};

use crate::config::ChatConfig;
pub use sendbird::SendbirdBridge;

/// A channel created by the chat service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatChannel {
    pub channel_url: String,
    pub name: String,
    pub member_ids: Vec<String>,
}

#[async_trait]
pub trait ChatBridge: Send + Sync {
    /// Creates or updates the chat-side user so it can join channels.
    async fn register_user(&self, user_id: &str, nickname: &str) -> Result<()>;

    /// Creates a group channel. With `distinct`, an existing channel with
    /// exactly these members is reused.
    async fn create_channel(
        &self,
        name: &str,
        member_ids: &[String],
        distinct: bool,
    ) -> Result<ChatChannel>;
}

/// Used when no chat credentials are configured.
#[derive(Debug, Clone, Default)]
pub struct DisabledChatBridge;

#[async_trait]
impl ChatBridge for DisabledChatBridge {
    async fn register_user(&self, user_id: &str, _nickname: &str) -> Result<()> {
        tracing::debug!("Chat disabled, skipping registration of {}", user_id);
        Ok(())
    }

    async fn create_channel(
        &self,
        _name: &str,
        _member_ids: &[String],
        _distinct: bool,
    ) -> Result<ChatChannel> {
        Err(eyre!("Chat service is not configured"))
    }
}

/// Sendbird when credentials loaded, otherwise the disabled bridge. The
/// reason chat is off is logged, so call this after tracing is set up.
pub fn bridge_from_config(config: Result<ChatConfig>) -> Arc<dyn ChatBridge> {
    match config {
        Ok(config) => Arc::new(SendbirdBridge::new(config)),
        Err(e) => {
            tracing::warn!("Chat disabled: {}", e);
            Arc::new(DisabledChatBridge)
        }
    }
}
