//! Task Commands
//!
//! Status sync for drag-and-drop moves.

use async_trait::async_trait;
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use serde::Serialize;
use std::fmt;

use crate::models::TaskStatus;

/// Header carrying the page's CSRF token
pub const CSRF_HEADER: &str = "X-CSRFToken";

/// Why a status update did not settle successfully.
///
/// Callers roll back the same way for every variant; the distinction
/// only feeds logging.
#[derive(Debug, Clone, PartialEq)]
pub enum SyncError {
    /// Request never produced a response
    Transport(String),
    /// Server answered with a non-success status
    Rejected(u16),
    /// Success status but the body was not JSON
    MalformedResponse(String),
}

impl fmt::Display for SyncError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SyncError::Transport(msg) => write!(f, "Transport error: {}", msg),
            SyncError::Rejected(code) => write!(f, "Server rejected move: HTTP {}", code),
            SyncError::MalformedResponse(msg) => write!(f, "Malformed response: {}", msg),
        }
    }
}

impl std::error::Error for SyncError {}

/// Sends a task's new status to the server.
///
/// One call per drop; implementations must not retry.
#[async_trait(?Send)]
pub trait StatusSync {
    async fn update_status(
        &self,
        project_id: &str,
        task_id: &str,
        status: TaskStatus,
        csrf_token: &str,
    ) -> Result<(), SyncError>;
}

#[derive(Serialize)]
struct MoveTaskBody {
    status: TaskStatus,
}

/// Build `{base}/projects/{project}/tasks/{task}/move`
pub fn move_url(base: &str, project_id: &str, task_id: &str) -> String {
    format!(
        "{}/projects/{}/tasks/{}/move",
        base.trim_end_matches('/'),
        utf8_percent_encode(project_id, NON_ALPHANUMERIC),
        utf8_percent_encode(task_id, NON_ALPHANUMERIC),
    )
}

/// `StatusSync` over HTTP
#[derive(Clone, Debug)]
pub struct HttpStatusSync {
    client: reqwest::Client,
    base_url: String,
}

impl HttpStatusSync {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }
}

#[async_trait(?Send)]
impl StatusSync for HttpStatusSync {
    async fn update_status(
        &self,
        project_id: &str,
        task_id: &str,
        status: TaskStatus,
        csrf_token: &str,
    ) -> Result<(), SyncError> {
        let url = move_url(&self.base_url, project_id, task_id);
        let response = self
            .client
            .post(&url)
            .header(CSRF_HEADER, csrf_token)
            .json(&MoveTaskBody { status })
            .send()
            .await
            .map_err(|e| SyncError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            return Err(SyncError::Rejected(response.status().as_u16()));
        }

        response
            .json::<serde_json::Value>()
            .await
            .map(|_| ())
            .map_err(|e| SyncError::MalformedResponse(e.to_string()))
    }
}
