//! Task Form
//!
//! State behind the create/edit task dialog.

use chrono::NaiveDate;

use crate::models::{Assignee, Task, TaskStatus, UNASSIGNED};

pub const DEFAULT_CREATE_TITLE: &str = "New Task";
pub const DEFAULT_EDIT_TITLE: &str = "Edit Task";

const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormMode {
    #[default]
    Create,
    Edit,
}

impl FormMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            FormMode::Create => "create",
            FormMode::Edit => "edit",
        }
    }
}

/// Page-supplied endpoints and labels
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FormTemplate {
    pub create_action: Option<String>,
    /// Update URL ending in `0`, replaced by the task id
    pub update_template: Option<String>,
    pub title_create: String,
    pub title_edit: String,
}

/// Data carried by the trigger that opened the form
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FormSource {
    pub id: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
    pub due: Option<String>,
    pub assignee: Option<String>,
}

impl FormSource {
    /// Edit-trigger data for a card. `status` is the confirmed one.
    pub fn from_task(task: &Task, status: TaskStatus) -> Self {
        Self {
            id: Some(task.id.clone()),
            title: Some(task.title.clone()),
            description: Some(task.description.clone()),
            status: Some(status.as_str().to_string()),
            due: task.due_date.map(|d| d.format(DATE_FORMAT).to_string()),
            assignee: task.assignee_id.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TaskForm {
    template: FormTemplate,
    options: Vec<Assignee>,
    pub mode: FormMode,
    pub action: String,
    pub heading: String,
    pub title: String,
    pub description: String,
    pub status: TaskStatus,
    pub due_date: String,
    pub assignee: String,
}

/// Replace the trailing `0` placeholder of an update template
pub fn update_action(template: &str, id: &str) -> String {
    match template.strip_suffix('0') {
        Some(prefix) => format!("{}{}", prefix, id),
        None => template.to_string(),
    }
}

fn valid_date(raw: &str) -> Option<String> {
    NaiveDate::parse_from_str(raw, DATE_FORMAT)
        .ok()
        .map(|d| d.format(DATE_FORMAT).to_string())
}

impl TaskForm {
    pub fn new(template: FormTemplate, options: Vec<Assignee>) -> Self {
        let mut form = Self {
            action: template.create_action.clone().unwrap_or_default(),
            heading: template.title_create.clone(),
            template,
            options,
            mode: FormMode::Create,
            title: String::new(),
            description: String::new(),
            status: TaskStatus::default(),
            due_date: String::new(),
            assignee: String::new(),
        };
        form.reset();
        form
    }

    fn first_option(&self) -> String {
        self.options
            .first()
            .map(|o| o.id.clone())
            .unwrap_or_else(|| UNASSIGNED.to_string())
    }

    /// Field values back to their defaults
    pub fn reset(&mut self) {
        self.title.clear();
        self.description.clear();
        self.status = TaskStatus::default();
        self.due_date.clear();
        self.assignee = self.first_option();
    }

    /// Select the matching option, else the first one
    pub fn select_assignee(&mut self, value: &str) {
        if self.options.iter().any(|o| o.id == value) {
            self.assignee = value.to_string();
        } else if let Some(first) = self.options.first() {
            self.assignee = first.id.clone();
        }
    }

    /// Fill the form for create or edit.
    ///
    /// Edit without an id leaves the form untouched and returns false.
    pub fn prepare(&mut self, mode: FormMode, source: &FormSource) -> bool {
        if mode == FormMode::Edit && source.id.is_none() {
            return false;
        }
        self.reset();

        match mode {
            FormMode::Create => {
                if let Some(action) = &self.template.create_action {
                    self.action = action.clone();
                }
                self.heading = self.template.title_create.clone();
                self.mode = FormMode::Create;
                let first = self.first_option();
                self.select_assignee(&first);
            }
            FormMode::Edit => {
                let id = source.id.as_deref().unwrap_or_default();
                self.heading = self.template.title_edit.clone();
                self.mode = FormMode::Edit;
                if let Some(template) = &self.template.update_template {
                    self.action = update_action(template, id);
                }
                self.title = source.title.clone().unwrap_or_default();
                self.description = source.description.clone().unwrap_or_default();
                if let Some(status) = source.status.as_deref().and_then(TaskStatus::parse) {
                    self.status = status;
                }
                self.due_date = source.due.as_deref().and_then(valid_date).unwrap_or_default();
                let assignee = source.assignee.clone().unwrap_or_else(|| self.first_option());
                self.select_assignee(&assignee);
            }
        }
        true
    }
}
