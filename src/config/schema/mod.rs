mod core;
mod month_index;
mod notion;
mod workspace;

pub use self::core::{Config, MonthIndexSettings, RunSettings, parse_page_ref};
pub use month_index::MonthIndexConfig;
pub use notion::NotionConfig;
pub use workspace::{OnExisting, WorkspaceConfig};
