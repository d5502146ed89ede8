use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use crate::task_list::ListId;

pub type TaskId = String;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TaskPriority {
    Low,
    #[default]
    Medium,
    High,
    Critical,
}

impl fmt::Display for TaskPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Critical => "critical",
        };
        f.write_str(name)
    }
}

impl FromStr for TaskPriority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            "critical" => Ok(Self::Critical),
            other => Err(format!(
                "Invalid priority '{}': expected low, medium, high or critical",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    pub name: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub author: String,
    pub body: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    pub description: Option<String>,
    /// Identity of the list that currently holds this task.
    pub status: ListId,
    #[serde(default)]
    pub priority: TaskPriority,
    #[serde(default)]
    pub due_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub assignee: Option<String>,
    #[serde(default)]
    pub labels: BTreeSet<String>,
    #[serde(default)]
    pub attachments: Vec<Attachment>,
    #[serde(default)]
    pub comments: Vec<Comment>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields supplied when creating a task through a store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTask {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub priority: TaskPriority,
    #[serde(default)]
    pub due_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub assignee: Option<String>,
    #[serde(default)]
    pub labels: BTreeSet<String>,
}

impl NewTask {
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }
}

impl Task {
    pub fn new(id: impl Into<TaskId>, list_id: impl Into<ListId>, title: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: id.into(),
            title: title.into(),
            description: None,
            status: list_id.into(),
            priority: TaskPriority::default(),
            due_date: None,
            assignee: None,
            labels: BTreeSet::new(),
            attachments: Vec::new(),
            comments: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Build a task for `list_id` from creation fields, with a fresh id.
    pub fn from_new(list_id: impl Into<ListId>, new: NewTask) -> Self {
        let mut task = Self::new(crate::new_id(), list_id, new.title);
        task.description = new.description;
        task.priority = new.priority;
        task.due_date = new.due_date;
        task.assignee = new.assignee;
        task.labels = new.labels;
        task
    }

    /// Re-parent to `list_id` and stamp the change.
    pub fn update_status(&mut self, list_id: impl Into<ListId>) {
        self.status = list_id.into();
        self.updated_at = Utc::now();
    }

    pub fn add_label(&mut self, label: impl Into<String>) -> bool {
        let inserted = self.labels.insert(label.into());
        if inserted {
            self.updated_at = Utc::now();
        }
        inserted
    }

    pub fn add_comment(&mut self, author: impl Into<String>, body: impl Into<String>) {
        let now = Utc::now();
        self.comments.push(Comment {
            author: author.into(),
            body: body.into(),
            created_at: now,
        });
        self.updated_at = now;
    }
}
