//! Remote document store access.
//!
//! [`DocumentStore`] is the request-level seam; [`TreeReader`] and
//! [`TreeWriter`] add cursor-following reads and limit-respecting writes on
//! top of it. All calls are awaited one after another.

pub mod batch;
pub mod http_client;
pub mod notion;
pub mod reader;
pub mod scrub;
pub mod traits;
pub mod writer;

pub use batch::{BatchPlan, HeldBack, fit_request, plan_batches};
pub use notion::NotionStore;
pub use reader::{TreeReader, child_page_id, toggle_id};
pub use scrub::{sanitize_api_error, scrub_secret_patterns};
pub use traits::{
    ChildrenPage, DocumentStore, MAX_BLOCKS_PER_REQUEST, MAX_INLINE_NESTING, MAX_ITEMS_PER_REQUEST,
};
pub use writer::TreeWriter;
