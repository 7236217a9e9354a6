use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::kind::EntityKind;
use super::record::{require_text, Entity, ValidationError};
use super::tabular::{format_date, format_timestamp, RowView, Tabular};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Priority {
    High,
    #[default]
    Medium,
    Low,
}

impl Priority {
    pub const ALL: [Priority; 3] = [Priority::High, Priority::Medium, Priority::Low];

    pub fn as_str(self) -> &'static str {
        match self {
            Priority::High => "High",
            Priority::Medium => "Medium",
            Priority::Low => "Low",
        }
    }

    /// Sort rank, most urgent first.
    pub fn rank(self) -> u8 {
        match self {
            Priority::High => 0,
            Priority::Medium => 1,
            Priority::Low => 2,
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|priority| priority.as_str().eq_ignore_ascii_case(value.trim()))
            .ok_or_else(|| ValidationError::new("priority", format!("unknown priority '{value}'")))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TaskStatus {
    #[default]
    Pending,
    #[serde(rename = "In Progress")]
    InProgress,
    Completed,
}

impl TaskStatus {
    pub const ALL: [TaskStatus; 3] = [
        TaskStatus::Pending,
        TaskStatus::InProgress,
        TaskStatus::Completed,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            TaskStatus::Pending => "Pending",
            TaskStatus::InProgress => "In Progress",
            TaskStatus::Completed => "Completed",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskStatus {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(value.trim()))
            .ok_or_else(|| ValidationError::new("status", format!("unknown task status '{value}'")))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub title: String,
    pub description: String,
    pub priority: Priority,
    pub status: TaskStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    pub assigned_to: String,
    pub related_to: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_created: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Task {
    pub fn new(title: impl Into<String>, priority: Priority, due_date: Option<NaiveDate>) -> Self {
        Self {
            title: title.into(),
            priority,
            due_date,
            ..Self::default()
        }
    }

    pub fn is_completed(&self) -> bool {
        self.status == TaskStatus::Completed
    }

    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        !self.is_completed() && self.due_date.is_some_and(|due| due < today)
    }

    /// Flips between `Completed` and `Pending`.
    pub fn toggle_completion(&mut self) {
        self.status = if self.is_completed() {
            TaskStatus::Pending
        } else {
            TaskStatus::Completed
        };
    }
}

impl Entity for Task {
    const KIND: EntityKind = EntityKind::Tasks;

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }

    fn created_at(&self) -> Option<DateTime<Utc>> {
        self.date_created
    }

    fn set_created_at(&mut self, at: DateTime<Utc>) {
        self.date_created = Some(at);
    }

    fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.updated_at
    }

    fn set_updated_at(&mut self, at: DateTime<Utc>) {
        self.updated_at = Some(at);
    }

    fn validate(&self) -> Result<(), ValidationError> {
        require_text("title", &self.title)
    }
}

impl Tabular for Task {
    const HEADERS: &'static [&'static str] = &[
        "title",
        "description",
        "priority",
        "status",
        "dueDate",
        "assignedTo",
        "relatedTo",
        "dateCreated",
    ];

    fn to_row(&self) -> Vec<String> {
        vec![
            self.title.clone(),
            self.description.clone(),
            self.priority.to_string(),
            self.status.to_string(),
            format_date(self.due_date),
            self.assigned_to.clone(),
            self.related_to.clone(),
            format_timestamp(self.date_created),
        ]
    }

    fn from_row(row: &RowView<'_>) -> Result<Self, ValidationError> {
        Ok(Self {
            id: String::new(),
            title: row.text("title"),
            description: row.text("description"),
            priority: row.parse("priority")?.unwrap_or_default(),
            status: row.parse("status")?.unwrap_or_default(),
            due_date: row.date("dueDate")?,
            assigned_to: row.text("assignedTo"),
            related_to: row.text("relatedTo"),
            date_created: row.timestamp("dateCreated")?,
            updated_at: None,
        })
    }
}
