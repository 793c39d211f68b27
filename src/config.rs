//! Page Configuration
//!
//! Board bootstrap data embedded by the server as
//! `<script type="application/json" id="board-data">`.

use log::LevelFilter;
use serde::Deserialize;
use std::fmt;

use crate::controller::ProjectContext;
use crate::models::{opaque_id, Assignee, Task};
use crate::task_form::{FormTemplate, DEFAULT_CREATE_TITLE, DEFAULT_EDIT_TITLE};

/// Id of the bootstrap script element
pub const BOOTSTRAP_ELEMENT_ID: &str = "board-data";

#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Bootstrap element not on the page
    Missing(String),
    /// Bootstrap JSON did not parse
    Invalid(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Missing(msg) => write!(f, "Missing board data: {}", msg),
            ConfigError::Invalid(msg) => write!(f, "Invalid board data: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ProjectInfo {
    #[serde(deserialize_with = "opaque_id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub csrf_token: String,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct TaskFormConfig {
    pub create_action: Option<String>,
    pub update_template: Option<String>,
    pub title_create: Option<String>,
    pub title_edit: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct UserInfo {
    pub name: String,
    pub logout_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BoardConfig {
    pub project: ProjectInfo,
    #[serde(default)]
    pub tasks: Vec<Task>,
    #[serde(default)]
    pub assignees: Vec<Assignee>,
    #[serde(default)]
    pub task_form: TaskFormConfig,
    pub user: Option<UserInfo>,
    /// Origin for API calls; the page origin when absent
    pub api_base: Option<String>,
    pub log_level: Option<String>,
}

impl BoardConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|e| ConfigError::Invalid(e.to_string()))
    }

    /// Read the bootstrap element from the current document
    pub fn from_document() -> Result<Self, ConfigError> {
        let text = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(BOOTSTRAP_ELEMENT_ID))
            .and_then(|el| el.text_content())
            .ok_or_else(|| ConfigError::Missing(format!("#{}", BOOTSTRAP_ELEMENT_ID)))?;
        Self::from_json(&text)
    }

    pub fn project_context(&self) -> ProjectContext {
        ProjectContext {
            project_id: self.project.id.clone(),
            csrf_token: self.project.csrf_token.clone(),
        }
    }

    pub fn form_template(&self) -> FormTemplate {
        let labels = &self.task_form;
        FormTemplate {
            create_action: labels.create_action.clone(),
            update_template: labels.update_template.clone(),
            title_create: labels.title_create.clone().unwrap_or_else(|| DEFAULT_CREATE_TITLE.to_string()),
            title_edit: labels.title_edit.clone().unwrap_or_else(|| DEFAULT_EDIT_TITLE.to_string()),
        }
    }

    /// Configured level, `info` when absent or unparseable
    pub fn log_level(&self) -> LevelFilter {
        self.log_level
            .as_deref()
            .and_then(|l| l.parse().ok())
            .unwrap_or(LevelFilter::Info)
    }

    /// API origin without trailing slash
    pub fn api_base(&self) -> String {
        match &self.api_base {
            Some(base) => base.trim_end_matches('/').to_string(),
            None => web_sys::window()
                .and_then(|w| w.location().origin().ok())
                .unwrap_or_default(),
        }
    }
}
