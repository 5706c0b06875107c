use super::Config;

/// First non-empty value among `keys`, in order.
fn first_set(keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|key| std::env::var(key).ok())
        .map(|value| value.trim().to_string())
        .find(|value| !value.is_empty())
}

impl Config {
    pub fn apply_env_overrides(&mut self) {
        if let Some(token) = first_set(&["WEEKPAGE_NOTION_TOKEN", "NOTION_TOKEN"]) {
            self.notion.api_token = Some(token);
        }

        if let Some(parent) =
            first_set(&["WEEKPAGE_PARENT_PAGE", "PARENT_PAGE_ID", "PARENT_PAGE_URL"])
        {
            self.workspace.parent_page = Some(parent);
        }

        if let Some(template) = first_set(&["WEEKPAGE_TEMPLATE_PAGE", "TEMPLATE_PAGE_ID"]) {
            self.workspace.template_page = Some(template);
        }

        if let Some(container) = first_set(&["WEEKPAGE_MONTH_INDEX_PAGE", "MONTH_INDEX_PAGE_ID"]) {
            self.month_index.container = Some(container);
        }

        if let Some(base_url) = first_set(&["WEEKPAGE_NOTION_BASE_URL"]) {
            self.notion.base_url = base_url;
        }
    }
}
