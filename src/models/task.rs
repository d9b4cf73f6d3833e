use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A unit of work nested inside a project.
///
/// Tasks have no life of their own: they are created, updated and deleted
/// through their owning project, and `project_id` always names that project.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: Uuid,
    pub project_id: Uuid,
    pub title: String,
    pub description: String,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    /// Email address of the assignee.
    pub assigned_to: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The workflow status of a task.
///
/// - `Todo`: Not yet started
/// - `InProgress`: Being worked on
/// - `Review`: Awaiting review
/// - `Done`: Finished
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum TaskStatus {
    Todo,
    InProgress,
    Review,
    Done,
}

impl TaskStatus {
    pub const ALL: [TaskStatus; 4] = [Self::Todo, Self::InProgress, Self::Review, Self::Done];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Todo => "Todo",
            Self::InProgress => "InProgress",
            Self::Review => "Review",
            Self::Done => "Done",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "Todo" => Some(Self::Todo),
            "InProgress" => Some(Self::InProgress),
            "Review" => Some(Self::Review),
            "Done" => Some(Self::Done),
            _ => None,
        }
    }
}

/// How urgent a task is.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum TaskPriority {
    Low,
    Medium,
    High,
    Critical,
}

impl TaskPriority {
    pub const ALL: [TaskPriority; 4] = [Self::Low, Self::Medium, Self::High, Self::Critical];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
            Self::Critical => "Critical",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "Low" => Some(Self::Low),
            "Medium" => Some(Self::Medium),
            "High" => Some(Self::High),
            "Critical" => Some(Self::Critical),
            _ => None,
        }
    }
}

/// Editable fields of a task, as submitted by the task form.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TaskInput {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    pub assigned_to: String,
}

impl Default for TaskInput {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            status: TaskStatus::Todo,
            priority: TaskPriority::Medium,
            assigned_to: String::new(),
        }
    }
}

impl Task {
    /// Create a new task owned by `project_id`.
    pub fn new(project_id: Uuid, input: TaskInput) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            project_id,
            title: input.title,
            description: input.description,
            status: input.status,
            priority: input.priority,
            assigned_to: input.assigned_to,
            created_at: now,
            updated_at: now,
        }
    }

    /// The complete task after applying form edits, with `updated_at` refreshed.
    pub fn with_edits(&self, input: TaskInput) -> Self {
        Self {
            title: input.title,
            description: input.description,
            status: input.status,
            priority: input.priority,
            assigned_to: input.assigned_to,
            updated_at: Utc::now(),
            ..self.clone()
        }
    }
}
