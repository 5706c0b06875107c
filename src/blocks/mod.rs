//! Document-tree data model.
//!
//! Blocks come in two forms: [`RemoteBlock`] is what the store lists (raw
//! payload, identifier, read-only metadata) and [`Block`] is what it accepts
//! on create. [`sanitize_for_create`] is the only path between them.

pub mod kind;
pub mod model;
pub mod rich_text;
pub mod sanitize;

pub use kind::{BlockKind, KindShape};
pub use model::{Block, BlockMeta, CreatedPage, PageParent, Payload, RemoteBlock};
pub use rich_text::{RichText, TextContent};
pub use sanitize::{sanitize_blocks, sanitize_for_create};
