use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonthIndexConfig {
    /// On unless set to `false`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    /// Page holding the month toggle (id or URL). Defaults to the parent page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub container: Option<String>,
    #[serde(default = "default_toggle_label")]
    pub toggle_label: String,
}

fn default_toggle_label() -> String {
    "月別".into()
}

impl Default for MonthIndexConfig {
    fn default() -> Self {
        Self {
            enabled: None,
            container: None,
            toggle_label: default_toggle_label(),
        }
    }
}

impl MonthIndexConfig {
    pub fn is_active(&self) -> bool {
        self.enabled.unwrap_or(true)
    }
}
