use crate::blocks::{Block, CreatedPage, PageParent, RemoteBlock};
use crate::error::StoreError;
use async_trait::async_trait;
use serde::Deserialize;

/// Most items the store accepts or returns in one request.
pub const MAX_ITEMS_PER_REQUEST: usize = 100;

/// Most blocks, at any depth, one write request may carry.
pub const MAX_BLOCKS_PER_REQUEST: usize = 1000;

/// Levels of `children` allowed below a request's top-level blocks.
pub const MAX_INLINE_NESTING: usize = 2;

/// One page of a container's children.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChildrenPage {
    #[serde(default)]
    pub results: Vec<RemoteBlock>,
    #[serde(default)]
    pub next_cursor: Option<String>,
    #[serde(default)]
    pub has_more: bool,
}

/// The remote hierarchical document store.
///
/// Implementations issue exactly one request per call; pagination and
/// batching live in [`super::TreeReader`] and [`super::TreeWriter`].
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// List up to `page_size` direct children of a page or block.
    async fn list_children(
        &self,
        block_id: &str,
        start_cursor: Option<&str>,
        page_size: usize,
    ) -> Result<ChildrenPage, StoreError>;

    /// Create a page titled `title` with `children` as its initial content.
    async fn create_page(
        &self,
        parent: &PageParent,
        title: &str,
        children: &[Block],
    ) -> Result<CreatedPage, StoreError>;

    /// Append `children` after the existing children of `block_id`.
    /// Returns the created top-level blocks in order.
    async fn append_children(
        &self,
        block_id: &str,
        children: &[Block],
    ) -> Result<Vec<RemoteBlock>, StoreError>;
}
