//! The dashboard's derived-state pipeline.
//!
//! [`compute_view`] turns the full project collection plus the query state into
//! the visible page. It is a pure function: the same inputs always produce the
//! same output and nothing is mutated.
//!
//! # Pipeline
//!
//! 1. search (name or description, case-insensitive)
//! 2. status
//! 3. task priority and assignee
//! 4. sort ([`sort::comparator`])
//! 5. paginate
//!
//! Totals are taken after filtering and before paging.

pub mod sort;
mod stats;

use serde::Serialize;

use crate::models::*;

pub use sort::{comparator, locale_cmp, sort_projects};
pub use stats::*;

/// One page of the filtered, sorted collection.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectView {
    pub page: Vec<Project>,
    pub total_items: usize,
    pub total_pages: usize,
}

pub fn compute_view(
    projects: &[Project],
    filters: &Filters,
    sort_by: SortBy,
    pagination: &Pagination,
) -> ProjectView {
    let mut filtered: Vec<Project> = projects
        .iter()
        .filter(|p| matches_search(p, &filters.search))
        .filter(|p| filters.status.matches(&p.status))
        .filter(|p| matches_priority(p, &filters.priority))
        .filter(|p| matches_assignee(p, &filters.assigned_user))
        .cloned()
        .collect();

    sort_projects(&mut filtered, sort_by);

    let total_items = filtered.len();
    let page_size = pagination.page_size.max(1);
    let page = match pagination.offset() {
        Some(start) if start < total_items => filtered
            .into_iter()
            .skip(start)
            .take(page_size)
            .collect(),
        _ => Vec::new(),
    };

    ProjectView {
        page,
        total_items,
        total_pages: total_pages(total_items, page_size),
    }
}

/// [`compute_view`] over a whole [`QueryState`].
pub fn compute_view_for(projects: &[Project], query: &QueryState) -> ProjectView {
    compute_view(projects, &query.filters, query.sort_by, &query.pagination)
}

/// Case-insensitive substring match on name or description. Empty matches all.
pub fn matches_search(project: &Project, search: &str) -> bool {
    if search.is_empty() {
        return true;
    }
    let needle = search.to_lowercase();
    project.name.to_lowercase().contains(&needle)
        || project.description.to_lowercase().contains(&needle)
}

/// Projects with at least one task of the given priority.
fn matches_priority(project: &Project, priority: &FilterValue<TaskPriority>) -> bool {
    priority.is_all() || project.tasks.iter().any(|t| priority.matches(&t.priority))
}

/// Projects with at least one task assigned to `assignee`.
fn matches_assignee(project: &Project, assignee: &str) -> bool {
    assignee.is_empty()
        || project
            .tasks
            .iter()
            .any(|t| t.assigned_to.eq_ignore_ascii_case(assignee))
}

/// Tasks of one project narrowed by priority and assignee, in their stored order.
pub fn filter_tasks<'a>(
    tasks: &'a [Task],
    priority: &FilterValue<TaskPriority>,
    assignee: &str,
) -> Vec<&'a Task> {
    tasks
        .iter()
        .filter(|t| priority.matches(&t.priority))
        .filter(|t| assignee.is_empty() || t.assigned_to.eq_ignore_ascii_case(assignee))
        .collect()
}
