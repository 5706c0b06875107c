use super::traits::{DocumentStore, MAX_ITEMS_PER_REQUEST};
use crate::blocks::RemoteBlock;
use crate::error::StoreError;
use std::future::Future;
use std::pin::Pin;
use tracing::debug;

/// Read-side helpers over a [`DocumentStore`]. Never mutates the store.
pub struct TreeReader<'a> {
    store: &'a dyn DocumentStore,
}

/// First `child_page` in `blocks` titled exactly `title`.
pub fn child_page_id<'b>(blocks: &'b [RemoteBlock], title: &str) -> Option<&'b str> {
    blocks
        .iter()
        .find(|b| b.child_page_title() == Some(title))
        .and_then(|b| b.id.as_deref())
}

/// First toggle in `blocks` labelled `label` on any trimmed text run.
pub fn toggle_id<'b>(blocks: &'b [RemoteBlock], label: &str) -> Option<&'b str> {
    blocks
        .iter()
        .find(|b| b.is_toggle_labelled(label))
        .and_then(|b| b.id.as_deref())
}

impl<'a> TreeReader<'a> {
    pub fn new(store: &'a dyn DocumentStore) -> Self {
        Self { store }
    }

    /// All direct children of `container_id`, following the continuation
    /// cursor until the store reports no further pages.
    pub async fn list_children(&self, container_id: &str) -> Result<Vec<RemoteBlock>, StoreError> {
        let mut results = Vec::new();
        let mut cursor: Option<String> = None;
        loop {
            let page = self
                .store
                .list_children(container_id, cursor.as_deref(), MAX_ITEMS_PER_REQUEST)
                .await?;
            results.extend(page.results);
            if !page.has_more {
                break;
            }
            cursor = match page.next_cursor {
                Some(next) => Some(next),
                None => {
                    return Err(StoreError::Decode(format!(
                        "listing {container_id} reported more results without a cursor"
                    )));
                }
            };
        }
        debug!(container_id, count = results.len(), "listed children");
        Ok(results)
    }

    /// Children of `container_id` with all of their nested content attached
    /// to each block's `children`, however deep it goes.
    pub fn load_tree<'s>(
        &'s self,
        container_id: &'s str,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<RemoteBlock>, StoreError>> + Send + 's>> {
        Box::pin(async move {
            let mut blocks = self.list_children(container_id).await?;
            for block in &mut blocks {
                if !block.has_nested_content() {
                    continue;
                }
                if let Some(id) = block.id.clone() {
                    block.children = self.load_tree(&id).await?;
                }
            }
            Ok(blocks)
        })
    }

    pub async fn find_child_page_by_title(
        &self,
        container_id: &str,
        title: &str,
    ) -> Result<Option<String>, StoreError> {
        let children = self.list_children(container_id).await?;
        Ok(child_page_id(&children, title).map(str::to_string))
    }

    pub async fn find_toggle_by_text(
        &self,
        container_id: &str,
        text: &str,
    ) -> Result<Option<String>, StoreError> {
        let children = self.list_children(container_id).await?;
        Ok(toggle_id(&children, text).map(str::to_string))
    }
}
