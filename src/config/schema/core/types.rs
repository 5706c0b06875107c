use super::super::{MonthIndexConfig, NotionConfig, OnExisting, WorkspaceConfig};
use super::page_ref::parse_page_ref;
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Path to config.toml - resolved at load time, not serialized
    #[serde(skip)]
    pub config_path: PathBuf,

    #[serde(default)]
    pub notion: NotionConfig,

    #[serde(default)]
    pub workspace: WorkspaceConfig,

    #[serde(default)]
    pub month_index: MonthIndexConfig,
}

/// Resolved, validated inputs for one weekly run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSettings {
    pub parent_page_id: String,
    pub template_page_id: Option<String>,
    pub placeholder: String,
    pub carry_over_label: String,
    pub on_existing: OnExisting,
    pub month_index: Option<MonthIndexSettings>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthIndexSettings {
    pub container_id: String,
    pub toggle_label: String,
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

impl Config {
    /// Structural checks that do not depend on which command runs.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.notion.timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "notion.timeout_secs must be greater than 0".into(),
            ));
        }
        if self.workspace.placeholder.is_empty() {
            return Err(ConfigError::Validation(
                "workspace.placeholder must not be empty".into(),
            ));
        }
        if self.workspace.carry_over_label.trim().is_empty() {
            return Err(ConfigError::Validation(
                "workspace.carry_over_label must not be empty".into(),
            ));
        }
        if self.month_index.is_active() && self.month_index.toggle_label.trim().is_empty() {
            return Err(ConfigError::Validation(
                "month_index.toggle_label must not be empty".into(),
            ));
        }
        Ok(())
    }

    /// Everything a weekly run needs, or the first missing/invalid setting.
    pub fn require_run_settings(&self) -> Result<RunSettings, ConfigError> {
        self.validate()?;
        if non_empty(self.notion.api_token.as_deref()).is_none() {
            return Err(ConfigError::Missing {
                key: "notion.api_token",
            });
        }
        let parent = non_empty(self.workspace.parent_page.as_deref()).ok_or(
            ConfigError::Missing {
                key: "workspace.parent_page",
            },
        )?;
        let template_page_id = non_empty(self.workspace.template_page.as_deref())
            .map(parse_page_ref)
            .transpose()?;
        let parent_page_id = parse_page_ref(parent)?;
        let month_index = if self.month_index.is_active() {
            let container_id = match non_empty(self.month_index.container.as_deref()) {
                Some(container) => parse_page_ref(container)?,
                None => parent_page_id.clone(),
            };
            Some(MonthIndexSettings {
                container_id,
                toggle_label: self.month_index.toggle_label.trim().to_string(),
            })
        } else {
            None
        };

        Ok(RunSettings {
            parent_page_id,
            template_page_id,
            placeholder: self.workspace.placeholder.clone(),
            carry_over_label: self.workspace.carry_over_label.trim().to_string(),
            on_existing: self.workspace.on_existing,
            month_index,
        })
    }
}
