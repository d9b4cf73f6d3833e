use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::task::Task;

/// A project and the tasks it owns.
///
/// `progress` is a caller-supplied percentage; nothing derives it from task
/// completion. Every task in `tasks` carries this project's `id` as its
/// `project_id`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub status: ProjectStatus,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// Percentage complete, 0 to 100.
    pub progress: u8,
    /// Allocated budget in whole currency units. Never negative.
    pub budget: f64,
    pub tasks: Vec<Task>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The lifecycle status of a project.
///
/// - `Planning`: Scoped but not started
/// - `InProgress`: Actively worked on
/// - `OnHold`: Paused
/// - `Completed`: Delivered
/// - `Cancelled`: Abandoned
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum ProjectStatus {
    Planning,
    InProgress,
    OnHold,
    Completed,
    Cancelled,
}

impl ProjectStatus {
    pub const ALL: [ProjectStatus; 5] = [
        Self::Planning,
        Self::InProgress,
        Self::OnHold,
        Self::Completed,
        Self::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Planning => "Planning",
            Self::InProgress => "InProgress",
            Self::OnHold => "OnHold",
            Self::Completed => "Completed",
            Self::Cancelled => "Cancelled",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "Planning" => Some(Self::Planning),
            "InProgress" => Some(Self::InProgress),
            "OnHold" => Some(Self::OnHold),
            "Completed" => Some(Self::Completed),
            "Cancelled" => Some(Self::Cancelled),
            _ => None,
        }
    }

    /// Human-readable label used in tables and charts.
    pub fn label(&self) -> &'static str {
        match self {
            Self::InProgress => "In Progress",
            Self::OnHold => "On Hold",
            other => other.as_str(),
        }
    }
}

/// Editable fields of a project, as submitted by the edit form.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProjectInput {
    pub name: String,
    pub description: String,
    pub status: ProjectStatus,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub progress: u8,
    pub budget: f64,
}

impl Project {
    /// Create a new project with no tasks.
    pub fn new(input: ProjectInput) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: input.name,
            description: input.description,
            status: input.status,
            start_date: input.start_date,
            end_date: input.end_date,
            progress: input.progress,
            budget: input.budget,
            tasks: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// The complete entity after applying form edits.
    ///
    /// Mutations replace whole objects, so this returns the full project with
    /// its tasks and identity preserved and `updated_at` refreshed.
    pub fn with_edits(&self, input: ProjectInput) -> Self {
        Self {
            name: input.name,
            description: input.description,
            status: input.status,
            start_date: input.start_date,
            end_date: input.end_date,
            progress: input.progress,
            budget: input.budget,
            updated_at: Utc::now(),
            ..self.clone()
        }
    }

    /// The current values as form input, for pre-filling an edit form.
    pub fn to_input(&self) -> ProjectInput {
        ProjectInput {
            name: self.name.clone(),
            description: self.description.clone(),
            status: self.status,
            start_date: self.start_date,
            end_date: self.end_date,
            progress: self.progress,
            budget: self.budget,
        }
    }
}
