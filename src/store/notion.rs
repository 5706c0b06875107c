//! Notion REST binding for [`DocumentStore`].

use super::http_client::build_store_client;
use super::scrub::sanitize_api_error;
use super::traits::{ChildrenPage, DocumentStore};
use crate::blocks::{Block, CreatedPage, PageParent, RemoteBlock, RichText};
use crate::config::NotionConfig;
use crate::error::{ConfigError, StoreError};
use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::debug;

pub const DEFAULT_BASE_URL: &str = "https://api.notion.com/v1";
pub const DEFAULT_API_VERSION: &str = "2022-06-28";

pub struct NotionStore {
    base_url: String,
    /// Pre-computed `Authorization` header value.
    cached_auth: String,
    version: String,
    client: Client,
}

#[derive(Debug, Serialize)]
struct CreatePageRequest<'a> {
    parent: &'a PageParent,
    properties: serde_json::Value,
    children: &'a [Block],
}

#[derive(Debug, Serialize)]
struct AppendChildrenRequest<'a> {
    children: &'a [Block],
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

impl NotionStore {
    pub fn new(base_url: &str, token: &str, version: &str, timeout_secs: u64) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            cached_auth: format!("Bearer {token}"),
            version: version.to_string(),
            client: build_store_client(timeout_secs),
        }
    }

    pub fn from_config(config: &NotionConfig) -> Result<Self, ConfigError> {
        let token = config
            .api_token
            .as_deref()
            .filter(|t| !t.trim().is_empty())
            .ok_or(ConfigError::Missing {
                key: "notion.api_token",
            })?;
        Ok(Self::new(
            &config.base_url,
            token.trim(),
            &config.version,
            config.timeout_secs,
        ))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        self.client
            .request(method, format!("{}{path}", self.base_url))
            .header("Authorization", &self.cached_auth)
            .header("Notion-Version", &self.version)
    }

    async fn send<T: serde::de::DeserializeOwned>(
        &self,
        builder: reqwest::RequestBuilder,
    ) -> Result<T, StoreError> {
        let response = builder
            .send()
            .await
            .map_err(|e| StoreError::Transport(e.without_url().to_string()))?;
        if !response.status().is_success() {
            return Err(store_error(response).await);
        }
        response
            .json::<T>()
            .await
            .map_err(|e| StoreError::Decode(e.without_url().to_string()))
    }
}

/// Map a failed response onto the error taxonomy, scrubbing the body.
async fn store_error(response: Response) -> StoreError {
    let status = response.status();
    let retry_after_secs = response
        .headers()
        .get("retry-after")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse::<u64>().ok());
    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "<failed to read error body>".to_string());
    let message = match serde_json::from_str::<ErrorBody>(&body) {
        Ok(ErrorBody {
            code: Some(code),
            message: Some(message),
        }) => format!("{code}: {message}"),
        Ok(ErrorBody {
            message: Some(message),
            ..
        }) => message,
        _ => body,
    };
    let message = sanitize_api_error(&message);

    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => StoreError::Auth {
            status: status.as_u16(),
        },
        StatusCode::NOT_FOUND => StoreError::NotFound { message },
        StatusCode::TOO_MANY_REQUESTS => StoreError::RateLimited { retry_after_secs },
        _ => StoreError::Rejected {
            status: status.as_u16(),
            message,
        },
    }
}

#[async_trait]
impl DocumentStore for NotionStore {
    async fn list_children(
        &self,
        block_id: &str,
        start_cursor: Option<&str>,
        page_size: usize,
    ) -> Result<ChildrenPage, StoreError> {
        debug!(block_id, cursor = ?start_cursor, "listing children");
        let mut builder = self
            .request(reqwest::Method::GET, &format!("/blocks/{block_id}/children"))
            .query(&[("page_size", page_size.to_string())]);
        if let Some(cursor) = start_cursor {
            builder = builder.query(&[("start_cursor", cursor)]);
        }
        self.send(builder).await
    }

    async fn create_page(
        &self,
        parent: &PageParent,
        title: &str,
        children: &[Block],
    ) -> Result<CreatedPage, StoreError> {
        debug!(parent = parent.id(), title, blocks = children.len(), "creating page");
        let body = CreatePageRequest {
            parent,
            properties: json!({ "title": [RichText::text(title)] }),
            children,
        };
        self.send(self.request(reqwest::Method::POST, "/pages").json(&body))
            .await
    }

    async fn append_children(
        &self,
        block_id: &str,
        children: &[Block],
    ) -> Result<Vec<RemoteBlock>, StoreError> {
        debug!(block_id, blocks = children.len(), "appending children");
        let body = AppendChildrenRequest { children };
        let page: ChildrenPage = self
            .send(
                self.request(reqwest::Method::PATCH, &format!("/blocks/{block_id}/children"))
                    .json(&body),
            )
            .await?;
        Ok(page.results)
    }
}
