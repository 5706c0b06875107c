use crate::store::notion::{DEFAULT_API_VERSION, DEFAULT_BASE_URL};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotionConfig {
    /// Integration token. Prefer `NOTION_TOKEN` over persisting it here.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_token: Option<String>,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Sent as the `Notion-Version` header.
    #[serde(default = "default_version")]
    pub version: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.into()
}

fn default_version() -> String {
    DEFAULT_API_VERSION.into()
}

fn default_timeout_secs() -> u64 {
    60
}

impl Default for NotionConfig {
    fn default() -> Self {
        Self {
            api_token: None,
            base_url: default_base_url(),
            version: default_version(),
            timeout_secs: default_timeout_secs(),
        }
    }
}
