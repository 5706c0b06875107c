use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One styled run of text.
///
/// Only `text` runs are ever rewritten; mentions and equations pass through
/// with whatever fields the store sent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RichText {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<TextContent>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextContent {
    pub content: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl RichText {
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            kind: "text".into(),
            text: Some(TextContent {
                content: content.into(),
                extra: Map::new(),
            }),
            extra: Map::new(),
        }
    }

    /// Attach an `annotations` object (color, bold, ...).
    pub fn with_annotations(mut self, annotations: Value) -> Self {
        self.extra.insert("annotations".into(), annotations);
        self
    }

    /// Content of a `text` run; `None` for every other run kind.
    pub fn text_content(&self) -> Option<&str> {
        if self.kind != "text" {
            return None;
        }
        self.text.as_ref().map(|t| t.content.as_str())
    }

    /// Replace every `token` in a `text` run. Returns whether anything changed.
    pub fn replace_token(&mut self, token: &str, with: &str) -> bool {
        if self.kind != "text" || token.is_empty() {
            return false;
        }
        match self.text.as_mut() {
            Some(text) if text.content.contains(token) => {
                text.content = text.content.replace(token, with);
                true
            }
            _ => false,
        }
    }

    /// Drop fields the store derives on read (`plain_text`, `href`).
    pub(crate) fn strip_derived(&mut self) {
        self.extra.remove("plain_text");
        self.extra.remove("href");
    }
}
