use super::traits::{MAX_BLOCKS_PER_REQUEST, MAX_INLINE_NESTING, MAX_ITEMS_PER_REQUEST};
use crate::blocks::Block;

/// How a new page's content is split across the create call and the
/// follow-up appends.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchPlan {
    /// Lead block plus as much content as fits in the create request.
    pub first: Vec<Block>,
    /// Content appended afterwards, in order.
    pub rest: Vec<Block>,
}

/// Put `lead` first and fill the rest of the create request with `content`.
pub fn plan_batches(lead: Block, mut content: Vec<Block>) -> BatchPlan {
    let fits = content.len().min(MAX_ITEMS_PER_REQUEST - 1);
    let rest = content.split_off(fits);
    let mut first = Vec::with_capacity(fits + 1);
    first.push(lead);
    first.extend(content);
    BatchPlan { first, rest }
}

impl BatchPlan {
    /// Chunks for the append calls, each at most the per-request limit.
    pub fn append_chunks(&self) -> std::slice::Chunks<'_, Block> {
        self.rest.chunks(MAX_ITEMS_PER_REQUEST)
    }

    pub fn append_chunk_sizes(&self) -> Vec<usize> {
        self.append_chunks().map(<[Block]>::len).collect()
    }

    pub fn total_blocks(&self) -> usize {
        self.first.len() + self.rest.len()
    }
}

/// Children held back from a write request, to be appended once the block
/// at `path` exists.
#[derive(Debug, Clone, PartialEq)]
pub struct HeldBack {
    /// Index of the parent among the request's top-level blocks, then among
    /// each level of its children.
    pub path: Vec<usize>,
    pub blocks: Vec<Block>,
}

/// Trim the nested content of one request's top-level `blocks` so that no
/// `children` array exceeds the item limit, no block below the nesting limit
/// carries children, and the request stays within the total block limit.
/// Whatever is cut is returned in write order.
pub fn fit_request(blocks: &mut [Block]) -> Vec<HeldBack> {
    let mut budget = MAX_BLOCKS_PER_REQUEST.saturating_sub(blocks.len());
    let mut held = Vec::new();
    for (index, block) in blocks.iter_mut().enumerate() {
        trim_nested(block, vec![index], 0, &mut budget, &mut held);
    }
    held
}

fn trim_nested(
    block: &mut Block,
    path: Vec<usize>,
    depth: usize,
    budget: &mut usize,
    held: &mut Vec<HeldBack>,
) {
    let Some(children) = block.payload.children.as_mut() else {
        return;
    };
    if children.is_empty() {
        return;
    }
    if depth >= MAX_INLINE_NESTING {
        let blocks = std::mem::take(children);
        block.payload.children = None;
        held.push(HeldBack { path, blocks });
        return;
    }
    let keep = children.len().min(MAX_ITEMS_PER_REQUEST).min(*budget);
    *budget -= keep;
    let rest = children.split_off(keep);
    if !rest.is_empty() {
        held.push(HeldBack {
            path: path.clone(),
            blocks: rest,
        });
    }
    for (index, child) in children.iter_mut().enumerate() {
        let mut child_path = path.clone();
        child_path.push(index);
        trim_nested(child, child_path, depth + 1, budget, held);
    }
}
