use super::batch::{HeldBack, fit_request};
use super::reader::TreeReader;
use super::traits::{DocumentStore, MAX_ITEMS_PER_REQUEST};
use crate::blocks::{Block, CreatedPage, PageParent, RemoteBlock};
use crate::error::StoreError;
use std::collections::VecDeque;
use std::ops::Range;
use tracing::{debug, info};

/// Children still to be appended under an existing block, in order.
type Pending = VecDeque<(String, Vec<Block>)>;

fn block_ids(blocks: &[RemoteBlock]) -> Result<Vec<String>, StoreError> {
    blocks
        .iter()
        .map(|b| {
            b.id.clone()
                .ok_or_else(|| StoreError::Decode("written block has no id".into()))
        })
        .collect()
}

/// The only component that mutates the store.
pub struct TreeWriter<'a> {
    store: &'a dyn DocumentStore,
    reader: TreeReader<'a>,
}

impl<'a> TreeWriter<'a> {
    pub fn new(store: &'a dyn DocumentStore) -> Self {
        Self {
            store,
            reader: TreeReader::new(store),
        }
    }

    /// Create a page with its first batch of content. Nested content that
    /// does not fit in the create request is appended right after.
    pub async fn create_page(
        &self,
        parent: &PageParent,
        title: &str,
        first_batch: &[Block],
    ) -> Result<CreatedPage, StoreError> {
        if first_batch.len() > MAX_ITEMS_PER_REQUEST {
            return Err(StoreError::BatchTooLarge {
                len: first_batch.len(),
                max: MAX_ITEMS_PER_REQUEST,
            });
        }
        let mut batch = first_batch.to_vec();
        let held = fit_request(&mut batch);
        let page = self.store.create_page(parent, title, &batch).await?;
        info!(page_id = %page.id, title, blocks = batch.len(), "created page");

        if !held.is_empty() {
            let roots = block_ids(&self.reader.list_children(&page.id).await?)?;
            let mut pending = Pending::new();
            self.queue_held(&roots, held, &mut pending).await?;
            self.drain(pending).await?;
        }
        Ok(page)
    }

    /// Append `blocks` to `page_id` one chunk at a time, in order.
    /// Returns the 0-based block range covered by each top-level append call.
    pub async fn append_remaining(
        &self,
        page_id: &str,
        blocks: &[Block],
    ) -> Result<Vec<Range<usize>>, StoreError> {
        let mut appended = Vec::new();
        let mut pending = Pending::new();
        let mut start = 0;
        for chunk in blocks.chunks(MAX_ITEMS_PER_REQUEST) {
            self.append_fitted(page_id, chunk, &mut pending).await?;
            let range = start..start + chunk.len();
            info!(page_id, from = range.start + 1, to = range.end, "appended blocks");
            start = range.end;
            appended.push(range);
        }
        self.drain(pending).await?;
        Ok(appended)
    }

    /// One append request with its nested content trimmed to fit. What was
    /// cut is queued under the blocks the request created.
    async fn append_fitted(
        &self,
        parent_id: &str,
        chunk: &[Block],
        pending: &mut Pending,
    ) -> Result<(), StoreError> {
        let mut chunk = chunk.to_vec();
        let held = fit_request(&mut chunk);
        let created = self.store.append_children(parent_id, &chunk).await?;
        if !held.is_empty() {
            let roots = block_ids(&created)?;
            self.queue_held(&roots, held, pending).await?;
        }
        Ok(())
    }

    async fn queue_held(
        &self,
        roots: &[String],
        held: Vec<HeldBack>,
        pending: &mut Pending,
    ) -> Result<(), StoreError> {
        for piece in held {
            let parent_id = self.resolve_path(roots, &piece.path).await?;
            debug!(parent_id = %parent_id, blocks = piece.blocks.len(), "holding back nested blocks");
            pending.push_back((parent_id, piece.blocks));
        }
        Ok(())
    }

    /// Id of the block at `path`, where `roots` are the ids of a request's
    /// top-level blocks in order.
    async fn resolve_path(&self, roots: &[String], path: &[usize]) -> Result<String, StoreError> {
        let missing = || StoreError::Decode(format!("written block at {path:?} not found"));
        let (first, rest) = path.split_first().ok_or_else(missing)?;
        let mut id = roots.get(*first).cloned().ok_or_else(missing)?;
        for &index in rest {
            let children = self.reader.list_children(&id).await?;
            id = children
                .get(index)
                .and_then(|b| b.id.clone())
                .ok_or_else(missing)?;
        }
        Ok(id)
    }

    /// Append every queued piece, queueing anything those appends cut in turn.
    async fn drain(&self, mut pending: Pending) -> Result<(), StoreError> {
        while let Some((parent_id, blocks)) = pending.pop_front() {
            for chunk in blocks.chunks(MAX_ITEMS_PER_REQUEST) {
                self.append_fitted(&parent_id, chunk, &mut pending).await?;
            }
            info!(parent_id = %parent_id, blocks = blocks.len(), "appended nested blocks");
        }
        Ok(())
    }

    /// Id of the toggle labelled `label` under `container_id`, creating an
    /// empty one at the end of the container when none exists.
    pub async fn ensure_toggle(&self, container_id: &str, label: &str) -> Result<String, StoreError> {
        if let Some(id) = self.reader.find_toggle_by_text(container_id, label).await? {
            return Ok(id);
        }
        let created = self
            .store
            .append_children(container_id, &[Block::toggle(label, Vec::new())])
            .await?;
        let id = created
            .into_iter()
            .next()
            .and_then(|b| b.id)
            .ok_or_else(|| StoreError::Decode("append returned no block id".into()))?;
        info!(container_id, toggle_id = %id, label, "created toggle");
        Ok(id)
    }

    /// Id of the month page titled `month_label` under the toggle, creating
    /// it (seeded with an empty `seed_toggle_label` toggle) when missing.
    pub async fn ensure_month_page(
        &self,
        month_toggle_id: &str,
        month_label: &str,
        seed_toggle_label: &str,
    ) -> Result<String, StoreError> {
        if let Some(id) = self
            .reader
            .find_child_page_by_title(month_toggle_id, month_label)
            .await?
        {
            return Ok(id);
        }
        let page = self
            .create_page(
                &PageParent::block(month_toggle_id),
                month_label,
                &[Block::toggle(seed_toggle_label, Vec::new())],
            )
            .await?;
        Ok(page.id)
    }

    pub async fn link_week_into_month(
        &self,
        month_page_id: &str,
        week_page_id: &str,
    ) -> Result<(), StoreError> {
        self.store
            .append_children(month_page_id, &[Block::link_to_page(week_page_id)])
            .await?;
        info!(month_page_id, week_page_id, "linked week into month");
        Ok(())
    }
}
