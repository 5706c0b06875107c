pub mod schema;

pub use schema::{
    Config, MonthIndexConfig, MonthIndexSettings, NotionConfig, OnExisting, RunSettings,
    WorkspaceConfig, parse_page_ref,
};
