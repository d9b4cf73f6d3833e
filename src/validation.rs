//! Field-level validation for the login, project and task forms.
//!
//! Every check runs and all failures are reported together, keyed by field.
//! A form with any error must not be saved.

use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

use crate::models::{ProjectInput, TaskInput};

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles")
});

const MIN_PASSWORD_LEN: usize = 6;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", render(.0))]
pub struct ValidationErrors(pub Vec<FieldError>);

fn render(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| format!("{}: {}", e.field, e.message))
        .collect::<Vec<_>>()
        .join("; ")
}

impl ValidationErrors {
    pub fn errors(&self) -> &[FieldError] {
        &self.0
    }

    /// The message for `field`, if it failed.
    pub fn message_for(&self, field: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }

    pub fn has(&self, field: &str) -> bool {
        self.message_for(field).is_some()
    }
}

#[derive(Default)]
struct Collector(Vec<FieldError>);

impl Collector {
    fn check(&mut self, ok: bool, field: &'static str, message: &str) {
        if !ok {
            self.0.push(FieldError {
                field,
                message: message.to_string(),
            });
        }
    }

    fn finish(self) -> Result<(), ValidationErrors> {
        if self.0.is_empty() {
            Ok(())
        } else {
            Err(ValidationErrors(self.0))
        }
    }
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

pub fn validate_login(email: &str, password: &str) -> Result<(), ValidationErrors> {
    let mut c = Collector::default();
    c.check(is_valid_email(email), "email", "Invalid email address");
    c.check(
        password.chars().count() >= MIN_PASSWORD_LEN,
        "password",
        "Password must be at least 6 characters",
    );
    c.finish()
}

pub fn validate_project(input: &ProjectInput) -> Result<(), ValidationErrors> {
    let mut c = Collector::default();
    c.check(!input.name.trim().is_empty(), "name", "Name is required");
    c.check(
        !input.description.trim().is_empty(),
        "description",
        "Description is required",
    );
    c.check(
        input.progress <= 100,
        "progress",
        "Progress must be between 0 and 100",
    );
    c.check(
        input.budget.is_finite() && input.budget >= 0.0,
        "budget",
        "Budget must be zero or more",
    );
    c.check(
        input.end_date >= input.start_date,
        "endDate",
        "End date must not be before the start date",
    );
    c.finish()
}

pub fn validate_task(input: &TaskInput) -> Result<(), ValidationErrors> {
    let mut c = Collector::default();
    c.check(!input.title.trim().is_empty(), "title", "Title is required");
    c.check(is_valid_email(&input.assigned_to), "assignedTo", "Invalid email");
    c.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ProjectStatus;
    use chrono::NaiveDate;

    fn project_input() -> ProjectInput {
        ProjectInput {
            name: "Website".to_string(),
            description: "Redesign".to_string(),
            status: ProjectStatus::Planning,
            start_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            progress: 50,
            budget: 1000.0,
        }
    }

    #[test]
    fn email_shapes() {
        assert!(is_valid_email("dev@example.com"));
        assert!(!is_valid_email("dev@example"));
        assert!(!is_valid_email("dev example.com"));
        assert!(!is_valid_email(""));
    }

    #[test]
    fn login_reports_both_fields() {
        let errors = validate_login("nope", "123").unwrap_err();
        assert!(errors.has("email"));
        assert!(errors.has("password"));
        assert!(validate_login("admin@example.com", "admin123").is_ok());
    }

    #[test]
    fn project_progress_out_of_range() {
        let input = ProjectInput {
            progress: 101,
            ..project_input()
        };
        let errors = validate_project(&input).unwrap_err();
        assert_eq!(errors.errors().len(), 1);
        assert_eq!(
            errors.message_for("progress"),
            Some("Progress must be between 0 and 100")
        );
    }

    #[test]
    fn project_collects_every_failure() {
        let input = ProjectInput {
            name: "  ".to_string(),
            description: String::new(),
            budget: -1.0,
            ..project_input()
        };
        let errors = validate_project(&input).unwrap_err();
        assert!(errors.has("name"));
        assert!(errors.has("description"));
        assert!(errors.has("budget"));
        assert!(!errors.has("progress"));
    }

    #[test]
    fn end_before_start_is_rejected() {
        let input = ProjectInput {
            end_date: NaiveDate::from_ymd_opt(2023, 12, 31).unwrap(),
            ..project_input()
        };
        assert!(validate_project(&input).unwrap_err().has("endDate"));
    }

    #[test]
    fn task_requires_title_and_assignee_email() {
        let errors = validate_task(&TaskInput::default()).unwrap_err();
        assert!(errors.has("title"));
        assert!(errors.has("assignedTo"));

        let ok = TaskInput {
            title: "Write docs".to_string(),
            assigned_to: "dev@example.com".to_string(),
            ..TaskInput::default()
        };
        assert!(validate_task(&ok).is_ok());
    }

    #[test]
    fn display_joins_fields() {
        let errors = validate_login("x", "y").unwrap_err();
        assert_eq!(
            errors.to_string(),
            "email: Invalid email address; password: Password must be at least 6 characters"
        );
    }
}
