#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::{Map, Value, json};

use weekpage::blocks::{Block, CreatedPage, PageParent, RemoteBlock};
use weekpage::error::StoreError;
use weekpage::store::{ChildrenPage, DocumentStore, MAX_ITEMS_PER_REQUEST};

/// Fields the store adds to a block; none may appear in a write.
const READ_ONLY_KEYS: &[&str] = &[
    "id",
    "created_time",
    "last_edited_time",
    "created_by",
    "last_edited_by",
    "archived",
    "in_trash",
    "has_children",
    "parent",
];

/// Levels of `children` one write may carry below its top-level blocks.
const MAX_NESTING: usize = 2;

/// Blocks one write may carry at all depths.
const MAX_BLOCKS: usize = 1000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    List {
        block_id: String,
        cursor: Option<String>,
    },
    CreatePage {
        parent: String,
        title: String,
        children: usize,
    },
    Append {
        block_id: String,
        children: usize,
    },
}

impl Call {
    pub fn is_write(&self) -> bool {
        !matches!(self, Call::List { .. })
    }
}

#[derive(Default)]
struct State {
    /// Stored blocks in the shape the store returns them, keyed by container.
    children: HashMap<String, Vec<Value>>,
    next_id: usize,
    calls: Vec<Call>,
}

impl State {
    fn new_id(&mut self) -> String {
        self.next_id += 1;
        format!("fake-{:04}", self.next_id)
    }

    /// Store `block` (a write-shaped block) under `container`, splitting out
    /// its nested children. Returns the stored, read-shaped block.
    fn insert(&mut self, container: &str, block: &Value) -> Value {
        let id = self.new_id();
        let kind = block["type"].as_str().unwrap_or_default().to_string();
        let mut payload = block.get(&kind).cloned().unwrap_or_else(|| json!({}));
        let nested = payload
            .as_object_mut()
            .and_then(|p| p.remove("children"))
            .and_then(|c| c.as_array().cloned())
            .unwrap_or_default();
        for child in &nested {
            self.insert(&id, child);
        }
        let mut stored = json!({
            "object": "block",
            "id": id.clone(),
            "type": kind.clone(),
            "created_time": "2025-07-01T00:00:00.000Z",
            "last_edited_time": "2025-07-01T00:00:00.000Z",
            "archived": block.get("archived").cloned().unwrap_or(json!(false)),
            "in_trash": false,
            "has_children": !nested.is_empty(),
        });
        stored[kind.as_str()] = payload;
        self.children.entry(container.to_string()).or_default().push(stored.clone());
        self.children.entry(id).or_default();
        stored
    }

    fn mark_has_children(&mut self, id: &str) {
        for list in self.children.values_mut() {
            if let Some(entry) = list.iter_mut().find(|b| b["id"] == json!(id)) {
                entry["has_children"] = json!(true);
            }
        }
    }

    fn insert_page(&mut self, parent: &str, title: &str, children: &[Value]) -> String {
        let page = json!({
            "type": "child_page",
            "child_page": {"title": title},
        });
        let stored = self.insert(parent, &page);
        let id = stored["id"].as_str().unwrap_or_default().to_string();
        for child in children {
            self.insert(&id, child);
        }
        if let Some(entry) = self
            .children
            .get_mut(parent)
            .and_then(|list| list.iter_mut().find(|b| b["id"] == json!(id)))
        {
            entry["has_children"] = json!(!children.is_empty());
        }
        id
    }
}

/// In-memory document store that checks every write against the store's
/// request limits and records each call.
pub struct FakeStore {
    state: Mutex<State>,
    page_limit: usize,
}

impl FakeStore {
    pub fn new() -> Self {
        Self::with_page_limit(MAX_ITEMS_PER_REQUEST)
    }

    /// Listings return at most `page_limit` items per request.
    pub fn with_page_limit(page_limit: usize) -> Self {
        Self {
            state: Mutex::new(State::default()),
            page_limit,
        }
    }

    /// Make `id` an existing, empty container (a workspace page).
    pub fn root(&self, id: &str) {
        self.state.lock().unwrap().children.entry(id.to_string()).or_default();
    }

    /// Add a page titled `title` under `parent` holding `blocks`
    /// (write-shaped JSON, nested `children` allowed). Returns its id.
    pub fn seed_page(&self, parent: &str, title: &str, blocks: &[Value]) -> String {
        self.state.lock().unwrap().insert_page(parent, title, blocks)
    }

    /// Append write-shaped JSON blocks to `container`. Returns their ids.
    pub fn seed_blocks(&self, container: &str, blocks: &[Value]) -> Vec<String> {
        let mut state = self.state.lock().unwrap();
        blocks
            .iter()
            .map(|b| state.insert(container, b)["id"].as_str().unwrap().to_string())
            .collect()
    }

    /// Current children of `container`, as a listing would return them.
    pub fn children_of(&self, container: &str) -> Vec<RemoteBlock> {
        let state = self.state.lock().unwrap();
        state
            .children
            .get(container)
            .map(|list| {
                list.iter()
                    .map(|v| serde_json::from_value(v.clone()).unwrap())
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn page_titled(&self, parent: &str, title: &str) -> Vec<String> {
        self.children_of(parent)
            .into_iter()
            .filter(|b| b.child_page_title() == Some(title))
            .filter_map(|b| b.id)
            .collect()
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn writes(&self) -> Vec<Call> {
        self.calls().into_iter().filter(Call::is_write).collect()
    }

    pub fn clear_calls(&self) {
        self.state.lock().unwrap().calls.clear();
    }
}

fn check_write(children: &[Block]) -> Result<Vec<Value>, StoreError> {
    if children.len() > MAX_ITEMS_PER_REQUEST {
        return Err(StoreError::Rejected {
            status: 400,
            message: format!("body.children.length should be ≤ 100, got {}", children.len()),
        });
    }
    let values: Vec<Value> = children
        .iter()
        .map(|b| serde_json::to_value(b).map_err(|e| StoreError::Decode(e.to_string())))
        .collect::<Result<_, _>>()?;
    let mut total = 0;
    for value in &values {
        total += check_block(value, 0)?;
    }
    if total > MAX_BLOCKS {
        return Err(StoreError::Rejected {
            status: 400,
            message: format!("request carries {total} blocks, more than 1000"),
        });
    }
    Ok(values)
}

/// Validates one block of a write; returns how many blocks it holds.
fn check_block(block: &Value, depth: usize) -> Result<usize, StoreError> {
    let rejected = |message: String| StoreError::Rejected {
        status: 400,
        message,
    };
    let object: &Map<String, Value> = block
        .as_object()
        .ok_or_else(|| rejected("block is not an object".into()))?;
    if let Some(key) = READ_ONLY_KEYS.iter().find(|k| object.contains_key(**k)) {
        return Err(rejected(format!("read-only field {key} in write")));
    }
    let kind = object
        .get("type")
        .and_then(Value::as_str)
        .ok_or_else(|| rejected("block without type".into()))?;
    if kind == "child_page" || kind == "unsupported" {
        return Err(rejected(format!("{kind} blocks cannot be written as children")));
    }
    let children = object
        .get(kind)
        .and_then(|p| p.get("children"))
        .and_then(Value::as_array);
    let mut count = 1;
    if let Some(children) = children {
        if depth >= MAX_NESTING && !children.is_empty() {
            return Err(rejected("too many levels of nested children".into()));
        }
        if children.len() > MAX_ITEMS_PER_REQUEST {
            return Err(rejected(format!(
                "nested children.length should be ≤ 100, got {}",
                children.len()
            )));
        }
        for child in children {
            count += check_block(child, depth + 1)?;
        }
    }
    Ok(count)
}

#[async_trait]
impl DocumentStore for FakeStore {
    async fn list_children(
        &self,
        block_id: &str,
        start_cursor: Option<&str>,
        page_size: usize,
    ) -> Result<ChildrenPage, StoreError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(Call::List {
            block_id: block_id.to_string(),
            cursor: start_cursor.map(str::to_string),
        });
        let Some(list) = state.children.get(block_id) else {
            return Err(StoreError::NotFound {
                message: format!("Could not find block with ID: {block_id}"),
            });
        };
        let start = start_cursor.map_or(0, |c| c.parse().unwrap());
        let end = (start + page_size.min(self.page_limit)).min(list.len());
        let results = list[start..end]
            .iter()
            .map(|v| serde_json::from_value(v.clone()).unwrap())
            .collect();
        let has_more = end < list.len();
        Ok(ChildrenPage {
            results,
            next_cursor: has_more.then(|| end.to_string()),
            has_more,
        })
    }

    async fn create_page(
        &self,
        parent: &PageParent,
        title: &str,
        children: &[Block],
    ) -> Result<CreatedPage, StoreError> {
        let values = check_write(children)?;
        let mut state = self.state.lock().unwrap();
        state.calls.push(Call::CreatePage {
            parent: parent.id().to_string(),
            title: title.to_string(),
            children: children.len(),
        });
        if !state.children.contains_key(parent.id()) {
            return Err(StoreError::NotFound {
                message: format!("Could not find parent {}", parent.id()),
            });
        }
        let id = state.insert_page(parent.id(), title, &values);
        Ok(CreatedPage {
            url: Some(format!("https://www.notion.so/{id}")),
            id,
        })
    }

    async fn append_children(
        &self,
        block_id: &str,
        children: &[Block],
    ) -> Result<Vec<RemoteBlock>, StoreError> {
        let values = check_write(children)?;
        let mut state = self.state.lock().unwrap();
        state.calls.push(Call::Append {
            block_id: block_id.to_string(),
            children: children.len(),
        });
        if !state.children.contains_key(block_id) {
            return Err(StoreError::NotFound {
                message: format!("Could not find block with ID: {block_id}"),
            });
        }
        let created = values
            .iter()
            .map(|v| serde_json::from_value(state.insert(block_id, v)).unwrap())
            .collect();
        if !values.is_empty() {
            state.mark_has_children(block_id);
        }
        Ok(created)
    }
}
