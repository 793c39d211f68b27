//! Frontend Models
//!
//! Data structures matching the server's task payloads.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Opaque task identifier as it appears in the page
pub type TaskId = String;

/// Assignee value meaning "nobody"
pub const UNASSIGNED: &str = "0";

/// Task workflow status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    #[default]
    Todo,
    InProgress,
    Done,
}

impl TaskStatus {
    /// Column order on the board
    pub const ALL: [TaskStatus; 3] = [TaskStatus::Todo, TaskStatus::InProgress, TaskStatus::Done];

    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Todo => "todo",
            TaskStatus::InProgress => "in_progress",
            TaskStatus::Done => "done",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "todo" => Some(TaskStatus::Todo),
            "in_progress" => Some(TaskStatus::InProgress),
            "done" => Some(TaskStatus::Done),
            _ => None,
        }
    }

    /// Human label for chips and column headings
    pub fn label(&self) -> &'static str {
        match self {
            TaskStatus::Todo => "To do",
            TaskStatus::InProgress => "In progress",
            TaskStatus::Done => "Completed",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Task data structure (matches server payload)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    #[serde(deserialize_with = "opaque_id")]
    pub id: TaskId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub status: TaskStatus,
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "optional_opaque_id")]
    pub assignee_id: Option<String>,
}

impl Task {
    #[cfg(test)]
    pub fn new(id: impl Into<TaskId>, title: impl Into<String>, status: TaskStatus) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: String::new(),
            status,
            due_date: None,
            assignee_id: None,
        }
    }

    /// Assignee value, falling back to the unassigned sentinel
    pub fn assignee(&self) -> &str {
        self.assignee_id.as_deref().unwrap_or(UNASSIGNED)
    }
}

/// Option in the assignee select
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assignee {
    #[serde(deserialize_with = "opaque_id")]
    pub id: String,
    pub name: String,
}

// Server templates emit ids as numbers or strings; keep them as text.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Num(i64),
    Str(String),
}

impl From<RawId> for String {
    fn from(raw: RawId) -> Self {
        match raw {
            RawId::Num(n) => n.to_string(),
            RawId::Str(s) => s,
        }
    }
}

pub(crate) fn opaque_id<'de, D: Deserializer<'de>>(de: D) -> Result<String, D::Error> {
    RawId::deserialize(de).map(String::from)
}

fn optional_opaque_id<'de, D: Deserializer<'de>>(de: D) -> Result<Option<String>, D::Error> {
    Option::<RawId>::deserialize(de).map(|raw| raw.map(String::from))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_round_trip() {
        for status in TaskStatus::ALL {
            assert_eq!(TaskStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(TaskStatus::parse("archived"), None);
        assert_eq!(TaskStatus::Done.label(), "Completed");
    }

    #[test]
    fn test_task_accepts_numeric_ids() {
        let json = r#"{"id": 7, "title": "Write docs", "status": "in_progress", "due_date": "2024-05-01", "assignee_id": 3}"#;
        let task: Task = serde_json::from_str(json).unwrap();
        assert_eq!(task.id, "7");
        assert_eq!(task.status, TaskStatus::InProgress);
        assert_eq!(task.due_date, NaiveDate::from_ymd_opt(2024, 5, 1));
        assert_eq!(task.assignee(), "3");
    }

    #[test]
    fn test_task_defaults() {
        let task: Task = serde_json::from_str(r#"{"id": "t1", "title": "Plan"}"#).unwrap();
        assert_eq!(task.status, TaskStatus::Todo);
        assert_eq!(task.description, "");
        assert_eq!(task.assignee_id, None);
        assert_eq!(task.assignee(), UNASSIGNED);
    }
}
