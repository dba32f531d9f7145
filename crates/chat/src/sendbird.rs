use async_trait::async_trait;
use eyre::{eyre, Result, WrapErr};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

use crate::{config::ChatConfig, ChatBridge, ChatChannel};

const API_TOKEN_HEADER: &str = "Api-Token";

#[derive(Debug, Serialize)]
pub struct CreateUserBody<'a> {
    pub user_id: &'a str,
    pub nickname: &'a str,
    pub profile_url: &'a str,
}

#[derive(Debug, Serialize)]
pub struct CreateChannelBody<'a> {
    pub name: &'a str,
    pub user_ids: &'a [String],
    pub is_distinct: bool,
}

#[derive(Debug, Deserialize)]
struct ChannelReply {
    channel_url: String,
    name: String,
}

/// Talks to the Sendbird platform API over HTTPS.
#[derive(Debug, Clone)]
pub struct SendbirdBridge {
    client: reqwest::Client,
    config: ChatConfig,
}

impl SendbirdBridge {
    pub fn new(config: ChatConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/v3/{}", self.config.api_base_url(), path)
    }
}

#[async_trait]
impl ChatBridge for SendbirdBridge {
    async fn register_user(&self, user_id: &str, nickname: &str) -> Result<()> {
        let body = CreateUserBody {
            user_id,
            nickname,
            profile_url: "",
        };

        let response = self
            .client
            .post(self.url("users"))
            .header(API_TOKEN_HEADER, &self.config.api_token)
            .json(&body)
            .send()
            .await
            .wrap_err("Failed to reach chat service")?;

        match response.status() {
            status if status.is_success() => Ok(()),
            // The user already exists on the chat side; refresh the nickname.
            StatusCode::BAD_REQUEST => {
                let response = self
                    .client
                    .put(self.url(&format!("users/{}", user_id)))
                    .header(API_TOKEN_HEADER, &self.config.api_token)
                    .json(&serde_json::json!({ "nickname": nickname }))
                    .send()
                    .await
                    .wrap_err("Failed to reach chat service")?;
                response
                    .error_for_status()
                    .map(|_| ())
                    .wrap_err("Chat service rejected user update")
            }
            status => Err(eyre!("Chat service rejected user registration: {}", status)),
        }
    }

    async fn create_channel(
        &self,
        name: &str,
        member_ids: &[String],
        distinct: bool,
    ) -> Result<ChatChannel> {
        let body = CreateChannelBody {
            name,
            user_ids: member_ids,
            is_distinct: distinct,
        };

        let reply: ChannelReply = self
            .client
            .post(self.url("group_channels"))
            .header(API_TOKEN_HEADER, &self.config.api_token)
            .json(&body)
            .send()
            .await
            .wrap_err("Failed to reach chat service")?
            .error_for_status()
            .wrap_err("Chat service rejected channel creation")?
            .json()
            .await
            .wrap_err("Unexpected channel reply from chat service")?;

        tracing::info!("Chat channel {} created for {} members", reply.channel_url, member_ids.len());

        Ok(ChatChannel {
            channel_url: reply.channel_url,
            name: reply.name,
            member_ids: member_ids.to_vec(),
        })
    }
}
