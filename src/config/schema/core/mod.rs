mod env_overrides;
mod loader;
mod page_ref;
#[cfg(test)]
mod test_env;
mod types;

pub use page_ref::parse_page_ref;
pub use types::{Config, MonthIndexSettings, RunSettings};
