use eyre::{eyre, Result};
use serde::Deserialize;
use std::env;

/// Credentials for the Sendbird platform API.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatConfig {
    /// Sendbird application id (required)
    pub app_id: String,
    /// Master or secondary API token (required)
    pub api_token: String,
    /// Overrides the API base URL, mostly for tests
    pub api_url: Option<String>,
}

impl ChatConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let app_id = env::var("SENDBIRD_APP_ID")
            .map_err(|_| eyre!("SENDBIRD_APP_ID environment variable not set"))?;

        let api_token = env::var("SENDBIRD_API_TOKEN")
            .map_err(|_| eyre!("SENDBIRD_API_TOKEN environment variable not set"))?;

        let api_url = env::var("SENDBIRD_API_URL").ok();

        Ok(Self {
            app_id,
            api_token,
            api_url,
        })
    }

    /// Base URL of the platform API, without a trailing slash
    pub fn api_base_url(&self) -> String {
        match &self.api_url {
            Some(url) => url.trim_end_matches('/').to_string(),
            None => format!("https://api-{}.sendbird.com", self.app_id),
        }
    }
}
