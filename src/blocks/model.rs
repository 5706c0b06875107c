use super::kind::BlockKind;
use super::rich_text::RichText;
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value, json};

// ── Create form ─────────────────────────────────────────────────

/// A block ready to be submitted to the store.
///
/// There is no identifier or metadata field: anything read from the store
/// has to pass through [`super::sanitize_for_create`] to become one.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub kind: BlockKind,
    pub payload: Payload,
}

/// Kind-specific payload. Fields the copier does not interpret stay in `attrs`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Payload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rich_text: Option<Vec<RichText>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<Block>>,
    #[serde(flatten)]
    pub attrs: Map<String, Value>,
}

impl Payload {
    pub fn is_empty(&self) -> bool {
        self.rich_text.is_none() && self.children.is_none() && self.attrs.is_empty()
    }
}

impl Serialize for Block {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(3))?;
        map.serialize_entry("object", "block")?;
        map.serialize_entry("type", self.kind.as_str())?;
        map.serialize_entry(self.kind.as_str(), &self.payload)?;
        map.end()
    }
}

impl Block {
    pub fn new(kind: BlockKind, payload: Payload) -> Self {
        Self { kind, payload }
    }

    pub fn toggle(label: &str, children: Vec<Block>) -> Self {
        Self::new(
            BlockKind::Toggle,
            Payload {
                rich_text: Some(vec![RichText::text(label)]),
                children: Some(children),
                attrs: Map::new(),
            },
        )
    }

    pub fn text_block(kind: BlockKind, runs: Vec<RichText>) -> Self {
        Self::new(
            kind,
            Payload {
                rich_text: Some(runs),
                ..Payload::default()
            },
        )
    }

    pub fn link_to_page(page_id: &str) -> Self {
        let mut attrs = Map::new();
        attrs.insert("type".into(), json!("page_id"));
        attrs.insert("page_id".into(), json!(page_id));
        Self::new(
            BlockKind::LinkToPage,
            Payload {
                attrs,
                ..Payload::default()
            },
        )
    }

    pub fn rich_text(&self) -> &[RichText] {
        self.payload.rich_text.as_deref().unwrap_or_default()
    }

    pub fn children(&self) -> &[Block] {
        self.payload.children.as_deref().unwrap_or_default()
    }

    /// Visit every rich-text run this block's kind declares, then recurse
    /// into declared children.
    pub fn for_each_run_mut(&mut self, f: &mut impl FnMut(&mut RichText)) {
        let shape = self.kind.shape();
        if shape.rich_text
            && let Some(runs) = self.payload.rich_text.as_mut()
        {
            runs.iter_mut().for_each(&mut *f);
        }
        if shape.children
            && let Some(children) = self.payload.children.as_mut()
        {
            for child in children {
                child.for_each_run_mut(f);
            }
        }
    }
}

// ── Read form ───────────────────────────────────────────────────

/// Read-only fields the store attaches to every block it returns.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BlockMeta {
    pub created_time: Option<String>,
    pub last_edited_time: Option<String>,
    pub archived: bool,
    pub in_trash: bool,
    pub has_children: bool,
}

/// A block as listed by the store.
///
/// `kind` and `payload` are kept raw so malformed entries can be inspected
/// and skipped instead of failing the whole listing. `children` is filled by
/// the reader when it descends into blocks that report `has_children`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "WireBlock")]
pub struct RemoteBlock {
    pub id: Option<String>,
    pub kind: Option<String>,
    pub meta: BlockMeta,
    pub payload: Option<Value>,
    pub children: Vec<RemoteBlock>,
}

#[derive(Deserialize)]
struct WireBlock {
    #[serde(default)]
    id: Option<String>,
    #[serde(rename = "type", default)]
    kind: Option<String>,
    #[serde(default)]
    created_time: Option<String>,
    #[serde(default)]
    last_edited_time: Option<String>,
    #[serde(default)]
    archived: Option<bool>,
    #[serde(default)]
    in_trash: Option<bool>,
    #[serde(default)]
    has_children: Option<bool>,
    #[serde(flatten)]
    rest: Map<String, Value>,
}

impl From<WireBlock> for RemoteBlock {
    fn from(mut wire: WireBlock) -> Self {
        let payload = wire.kind.as_ref().and_then(|kind| wire.rest.remove(kind));
        Self {
            id: wire.id,
            kind: wire.kind,
            meta: BlockMeta {
                created_time: wire.created_time,
                last_edited_time: wire.last_edited_time,
                archived: wire.archived.unwrap_or(false),
                in_trash: wire.in_trash.unwrap_or(false),
                has_children: wire.has_children.unwrap_or(false),
            },
            payload,
            children: Vec::new(),
        }
    }
}

impl RemoteBlock {
    pub fn block_kind(&self) -> Option<BlockKind> {
        self.kind.as_deref().map(BlockKind::from_tag)
    }

    /// Title of a `child_page` block.
    pub fn child_page_title(&self) -> Option<&str> {
        if self.kind.as_deref() != Some("child_page") {
            return None;
        }
        self.payload.as_ref()?.get("title")?.as_str()
    }

    /// Contents of the `text` runs in the payload's `rich_text`.
    pub fn text_runs(&self) -> impl Iterator<Item = &str> {
        self.payload
            .as_ref()
            .and_then(|p| p.get("rich_text"))
            .and_then(Value::as_array)
            .into_iter()
            .flatten()
            .filter(|run| run.get("type").and_then(Value::as_str) == Some("text"))
            .filter_map(|run| run.get("text")?.get("content")?.as_str())
    }

    /// A toggle whose label, on any single text run after trimming, is `label`.
    pub fn is_toggle_labelled(&self, label: &str) -> bool {
        self.kind.as_deref() == Some("toggle") && self.text_runs().any(|t| t.trim() == label)
    }

    /// Whether the reader should descend into this block's children.
    pub fn has_nested_content(&self) -> bool {
        // A child page's children are the page body, not nested content.
        self.meta.has_children && self.kind.as_deref() != Some("child_page")
    }
}

// ── Pages ───────────────────────────────────────────────────────

/// Where a new page is filed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PageParent {
    PageId { page_id: String },
    BlockId { block_id: String },
}

impl PageParent {
    pub fn page(id: impl Into<String>) -> Self {
        Self::PageId { page_id: id.into() }
    }

    pub fn block(id: impl Into<String>) -> Self {
        Self::BlockId { block_id: id.into() }
    }

    pub fn id(&self) -> &str {
        match self {
            Self::PageId { page_id } => page_id,
            Self::BlockId { block_id } => block_id,
        }
    }
}

/// A page returned by the store after creation.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreatedPage {
    pub id: String,
    #[serde(default)]
    pub url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn block_serializes_with_kind_tag_and_payload() {
        let block = Block::toggle("Monthly TASK", Vec::new());
        let value = serde_json::to_value(&block).unwrap();
        assert_eq!(
            value,
            json!({
                "object": "block",
                "type": "toggle",
                "toggle": {
                    "rich_text": [{"type": "text", "text": {"content": "Monthly TASK"}}],
                    "children": []
                }
            })
        );
    }

    #[test]
    fn link_to_page_references_the_page() {
        let value = serde_json::to_value(Block::link_to_page("abc")).unwrap();
        assert_eq!(
            value["link_to_page"],
            json!({"type": "page_id", "page_id": "abc"})
        );
    }

    #[test]
    fn remote_block_splits_payload_from_metadata() {
        let block: RemoteBlock = serde_json::from_value(json!({
            "object": "block",
            "id": "b1",
            "type": "to_do",
            "created_time": "2025-07-01T00:00:00.000Z",
            "last_edited_time": "2025-07-02T00:00:00.000Z",
            "archived": false,
            "has_children": true,
            "parent": {"type": "page_id", "page_id": "p"},
            "to_do": {"rich_text": [], "checked": false}
        }))
        .unwrap();
        assert_eq!(block.id.as_deref(), Some("b1"));
        assert_eq!(block.block_kind(), Some(BlockKind::ToDo));
        assert!(block.meta.has_children);
        assert_eq!(block.payload, Some(json!({"rich_text": [], "checked": false})));
    }

    #[test]
    fn remote_block_without_type_has_no_payload() {
        let block: RemoteBlock = serde_json::from_value(json!({"id": "x"})).unwrap();
        assert!(block.kind.is_none());
        assert!(block.payload.is_none());
    }

    #[test]
    fn child_page_title_is_read_from_payload() {
        let block: RemoteBlock = serde_json::from_value(json!({
            "id": "p1", "type": "child_page", "child_page": {"title": "0630-0706"}
        }))
        .unwrap();
        assert_eq!(block.child_page_title(), Some("0630-0706"));
        assert!(!block.is_toggle_labelled("0630-0706"));
    }

    #[test]
    fn toggle_label_matches_any_trimmed_text_run() {
        let block: RemoteBlock = serde_json::from_value(json!({
            "id": "t1", "type": "toggle",
            "toggle": {"rich_text": [
                {"type": "mention", "mention": {}, "plain_text": "Monthly TASK"},
                {"type": "text", "text": {"content": "  Monthly TASK \n"}}
            ]}
        }))
        .unwrap();
        assert!(block.is_toggle_labelled("Monthly TASK"));
        assert!(!block.is_toggle_labelled("monthly task"));
    }

    #[test]
    fn page_parent_is_discriminated_by_type() {
        assert_eq!(
            serde_json::to_value(PageParent::page("p")).unwrap(),
            json!({"type": "page_id", "page_id": "p"})
        );
        assert_eq!(
            serde_json::to_value(PageParent::block("b")).unwrap(),
            json!({"type": "block_id", "block_id": "b"})
        );
    }
}
