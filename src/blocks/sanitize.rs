use super::kind::BlockKind;
use super::model::{Block, Payload, RemoteBlock};
use super::rich_text::RichText;
use serde_json::{Map, Value};
use tracing::{debug, warn};

/// Turn a block read from the store into one that can be submitted again.
///
/// Identifiers and read-only metadata are left behind by construction; nested
/// children (inline in the payload, or fetched by the reader) are sanitized
/// recursively. Returns `None` for blocks that cannot be recreated: no kind
/// tag, `unsupported`, `child_page`, archived, or an empty payload on a kind that needs one.
pub fn sanitize_for_create(block: &RemoteBlock) -> Option<Block> {
    let id = block.id.as_deref().unwrap_or("<no id>");
    let Some(kind) = block.block_kind() else {
        warn!(block_id = id, "skipping block without a kind tag");
        return None;
    };
    if kind == BlockKind::Unsupported {
        warn!(block_id = id, "skipping block the store reports as unsupported");
        return None;
    }
    if kind == BlockKind::ChildPage {
        warn!(block_id = id, "skipping sub-page; pages cannot be created as children");
        return None;
    }
    if block.meta.archived || block.meta.in_trash {
        debug!(block_id = id, %kind, "skipping archived block");
        return None;
    }
    if let BlockKind::Other(tag) = &kind {
        warn!(block_id = id, kind = %tag, "copying unrecognized block kind verbatim");
    }

    let shape = kind.shape();
    let mut fields = match block.payload.as_ref() {
        Some(Value::Object(map)) => map.clone(),
        None if shape.empty_ok => Map::new(),
        _ => {
            warn!(block_id = id, %kind, "skipping block with missing or malformed payload");
            return None;
        }
    };

    let mut payload = Payload::default();

    if shape.rich_text
        && let Some(raw) = fields.remove("rich_text")
    {
        match serde_json::from_value::<Vec<RichText>>(raw) {
            Ok(mut runs) => {
                runs.iter_mut().for_each(RichText::strip_derived);
                payload.rich_text = Some(runs);
            }
            Err(e) => warn!(block_id = id, %kind, error = %e, "dropping malformed rich_text"),
        }
    }

    let inline = fields.remove("children");
    if shape.children {
        let mut children = match inline {
            Some(Value::Array(items)) => items
                .into_iter()
                .filter_map(|item| match serde_json::from_value::<RemoteBlock>(item) {
                    Ok(child) => Some(child),
                    Err(e) => {
                        warn!(block_id = id, error = %e, "dropping malformed nested block");
                        None
                    }
                })
                .collect(),
            Some(_) => {
                warn!(block_id = id, %kind, "dropping non-array children");
                Vec::new()
            }
            None => Vec::new(),
        };
        children.extend(block.children.iter().cloned());
        if !children.is_empty() {
            payload.children = Some(sanitize_blocks(&children));
        }
    } else if inline.is_some() {
        warn!(block_id = id, %kind, "dropping children on a kind that cannot nest");
    }

    payload.attrs = fields;

    if payload.is_empty() && !shape.empty_ok {
        warn!(block_id = id, %kind, "skipping block with empty payload");
        return None;
    }

    Some(Block::new(kind, payload))
}

/// Sanitize a sequence, dropping the blocks that cannot be recreated.
pub fn sanitize_blocks(blocks: &[RemoteBlock]) -> Vec<Block> {
    blocks.iter().filter_map(sanitize_for_create).collect()
}
