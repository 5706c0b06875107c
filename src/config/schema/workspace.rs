use crate::template::{DEFAULT_CARRY_OVER_LABEL, DEFAULT_PLACEHOLDER};
use serde::{Deserialize, Serialize};

/// What to do when this week's page already exists under the parent.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, strum::Display, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum OnExisting {
    /// Leave the existing page alone and stop.
    #[default]
    Skip,
    /// Fail the run.
    Error,
    /// Create another page with the same title.
    Create,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkspaceConfig {
    /// Page the weekly pages are created under (id or URL).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_page: Option<String>,
    /// Page holding one day's blocks (id or URL). Built-in layout when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template_page: Option<String>,
    #[serde(default = "default_placeholder")]
    pub placeholder: String,
    #[serde(default = "default_carry_over_label")]
    pub carry_over_label: String,
    #[serde(default)]
    pub on_existing: OnExisting,
}

fn default_placeholder() -> String {
    DEFAULT_PLACEHOLDER.into()
}

fn default_carry_over_label() -> String {
    DEFAULT_CARRY_OVER_LABEL.into()
}

impl Default for WorkspaceConfig {
    fn default() -> Self {
        Self {
            parent_page: None,
            template_page: None,
            placeholder: default_placeholder(),
            carry_over_label: default_carry_over_label(),
            on_existing: OnExisting::default(),
        }
    }
}
