//! Aggregates over the unfiltered collection: headline numbers and chart series.

use serde::Serialize;

use crate::models::{Project, ProjectStatus, Task, TaskStatus};

const TOP_PROGRESS: usize = 10;
const TOP_BUDGET: usize = 5;
const PROGRESS_LABEL_WIDTH: usize = 20;
const BUDGET_LABEL_WIDTH: usize = 15;

/// Headline numbers for the dashboard cards.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectStats {
    pub total: usize,
    pub in_progress: usize,
    pub completed: usize,
    pub total_budget: f64,
}

/// Always computed over the full collection, independent of filters and paging.
pub fn compute_stats(projects: &[Project]) -> ProjectStats {
    ProjectStats {
        total: projects.len(),
        in_progress: count_status(projects, ProjectStatus::InProgress),
        completed: count_status(projects, ProjectStatus::Completed),
        total_budget: projects.iter().map(|p| p.budget).sum(),
    }
}

fn count_status(projects: &[Project], status: ProjectStatus) -> usize {
    projects.iter().filter(|p| p.status == status).count()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusSlice {
    pub status: ProjectStatus,
    pub label: &'static str,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPoint {
    pub name: String,
    pub value: f64,
}

/// Series behind the dashboard charts.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartData {
    /// Projects per status, declaration order, empty statuses left out.
    pub status_distribution: Vec<StatusSlice>,
    /// Highest progress first, percentages.
    pub top_progress: Vec<ChartPoint>,
    /// Largest budgets first, in thousands.
    pub top_budget: Vec<ChartPoint>,
}

pub fn compute_chart_data(projects: &[Project]) -> ChartData {
    let status_distribution = ProjectStatus::ALL
        .into_iter()
        .map(|status| StatusSlice {
            status,
            label: status.label(),
            count: count_status(projects, status),
        })
        .filter(|slice| slice.count > 0)
        .collect();

    let mut by_progress: Vec<&Project> = projects.iter().collect();
    by_progress.sort_by(|a, b| b.progress.cmp(&a.progress));
    let top_progress = by_progress
        .into_iter()
        .take(TOP_PROGRESS)
        .map(|p| ChartPoint {
            name: truncate_label(&p.name, PROGRESS_LABEL_WIDTH),
            value: f64::from(p.progress),
        })
        .collect();

    let mut by_budget: Vec<&Project> = projects.iter().collect();
    by_budget.sort_by(|a, b| b.budget.total_cmp(&a.budget));
    let top_budget = by_budget
        .into_iter()
        .take(TOP_BUDGET)
        .map(|p| ChartPoint {
            name: truncate_label(&p.name, BUDGET_LABEL_WIDTH),
            value: p.budget / 1000.0,
        })
        .collect();

    ChartData {
        status_distribution,
        top_progress,
        top_budget,
    }
}

/// Cut `name` to `width` characters, marking the cut with `...`.
pub fn truncate_label(name: &str, width: usize) -> String {
    if name.chars().count() > width {
        let mut label: String = name.chars().take(width).collect();
        label.push_str("...");
        label
    } else {
        name.to_string()
    }
}

/// Task counts shown on the project detail page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskSummary {
    pub total: usize,
    pub done: usize,
    pub in_progress: usize,
}

pub fn summarize_tasks(tasks: &[Task]) -> TaskSummary {
    TaskSummary {
        total: tasks.len(),
        done: tasks.iter().filter(|t| t.status == TaskStatus::Done).count(),
        in_progress: tasks
            .iter()
            .filter(|t| t.status == TaskStatus::InProgress)
            .count(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncation_counts_characters() {
        assert_eq!(truncate_label("Short", 15), "Short");
        assert_eq!(
            truncate_label("Payment Processing Upgrade", 15),
            "Payment Process..."
        );
        assert_eq!(truncate_label("exactly fifteen", 15), "exactly fifteen");
    }

    #[test]
    fn empty_collection_has_zero_stats() {
        assert_eq!(compute_stats(&[]), ProjectStats::default());
        let charts = compute_chart_data(&[]);
        assert!(charts.status_distribution.is_empty());
        assert!(charts.top_progress.is_empty());
        assert!(charts.top_budget.is_empty());
    }
}
