//! Plain-text rendering of dashboard pages.

use crate::models::{Project, QueryState, Session, Task, TaskStatus};
use crate::query::{truncate_label, ChartData, ProjectStats, ProjectView, TaskSummary};

const TODO: char = '○';
const IN_PROGRESS: char = '◐';
const REVIEW: char = '◇';
const DONE: char = '●';

const NAME_WIDTH: usize = 28;
const BAR_WIDTH: usize = 20;

fn status_symbol(status: TaskStatus) -> char {
    match status {
        TaskStatus::Todo => TODO,
        TaskStatus::InProgress => IN_PROGRESS,
        TaskStatus::Review => REVIEW,
        TaskStatus::Done => DONE,
    }
}

/// `$150,000` style amounts.
pub fn format_money(amount: f64) -> String {
    let whole = amount.round() as i64;
    let digits = whole.unsigned_abs().to_string();
    let mut grouped = String::new();
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    let sign = if whole < 0 { "-" } else { "" };
    format!("{}${}", sign, grouped)
}

fn progress_bar(progress: u8, width: usize) -> String {
    let filled = (usize::from(progress.min(100)) * width + 50) / 100;
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// The headline cards: totals over the whole collection.
pub fn render_stats(stats: &ProjectStats) -> String {
    format!(
        "Total Projects: {}  In Progress: {}  Completed: {}  Total Budget: ${:.0}k\n",
        stats.total,
        stats.in_progress,
        stats.completed,
        stats.total_budget / 1000.0
    )
}

/// The project table for one page plus its pager line.
///
/// Example output:
/// ```text
/// NAME                          STATUS       PROGRESS  BUDGET      TASKS
/// Website Redesign              In Progress       65%  $150,000        3
/// Page 1 of 2 (12 projects, sorted by name asc)
/// ```
pub fn render_table(view: &ProjectView, query: &QueryState) -> String {
    let mut output = format!(
        "{:<w$}  {:<11}  {:>8}  {:<10}  {:>5}\n",
        "NAME",
        "STATUS",
        "PROGRESS",
        "BUDGET",
        "TASKS",
        w = NAME_WIDTH
    );

    if view.page.is_empty() {
        output.push_str("No projects found.\n");
    }

    for project in &view.page {
        output.push_str(&format!(
            "{:<w$}  {:<11}  {:>7}%  {:<10}  {:>5}\n",
            truncate_label(&project.name, NAME_WIDTH - 3),
            project.status.label(),
            project.progress,
            format_money(project.budget),
            project.tasks.len(),
            w = NAME_WIDTH
        ));
    }

    output.push_str(&render_pager(view, query));
    output
}

fn render_pager(view: &ProjectView, query: &QueryState) -> String {
    format!(
        "Page {} of {} ({} projects, sorted by {} {})\n",
        query.pagination.current_page,
        view.total_pages,
        view.total_items,
        query.sort_by.field.as_str(),
        query.sort_by.order.as_str()
    )
}

/// Project detail with `tasks` (usually the filtered task list) as a tree.
///
/// Example output:
/// ```text
/// Website Redesign [In Progress]
///   ...
/// ├── ● Design mockups (High, dev@example.com) [<task id>]
/// └── ○ Content migration (Low, pm@example.com) [<task id>]
/// ```
pub fn render_project(project: &Project, summary: &TaskSummary, tasks: &[&Task]) -> String {
    let mut output = format!("{} [{}]\n", project.name, project.status.label());
    output.push_str(&format!("  id:       {}\n", project.id));
    output.push_str(&format!("  {}\n", project.description));
    output.push_str(&format!(
        "  schedule: {} to {}\n",
        project.start_date.format("%b %d, %Y"),
        project.end_date.format("%b %d, %Y")
    ));
    output.push_str(&format!(
        "  progress: {} {}%\n",
        progress_bar(project.progress, BAR_WIDTH),
        project.progress
    ));
    output.push_str(&format!("  budget:   {}\n", format_money(project.budget)));
    output.push_str(&format!(
        "  tasks:    {} total, {} done, {} in progress\n",
        summary.total, summary.done, summary.in_progress
    ));
    output.push_str(&render_tasks(tasks));
    output
}

pub fn render_tasks(tasks: &[&Task]) -> String {
    if tasks.is_empty() {
        return "No tasks yet.\n".to_string();
    }
    let mut output = String::new();
    for (i, task) in tasks.iter().enumerate() {
        let branch = if i == tasks.len() - 1 { "└── " } else { "├── " };
        output.push_str(&format!(
            "{}{} {} ({}, {}) [{}]\n",
            branch,
            status_symbol(task.status),
            task.title,
            task.priority.as_str(),
            task.assigned_to,
            task.id
        ));
    }
    output
}

/// Text versions of the three dashboard charts.
pub fn render_charts(charts: &ChartData) -> String {
    let mut output = String::from("Status distribution\n");
    for slice in &charts.status_distribution {
        output.push_str(&format!("  {:<12} {}\n", slice.label, slice.count));
    }

    output.push_str("Progress (top 10)\n");
    for point in &charts.top_progress {
        output.push_str(&format!(
            "  {:<24} {} {:.0}%\n",
            point.name,
            progress_bar(point.value.clamp(0.0, 100.0) as u8, BAR_WIDTH),
            point.value
        ));
    }

    output.push_str("Budget (top 5)\n");
    for point in &charts.top_budget {
        output.push_str(&format!("  {:<19} {:.0}k\n", point.name, point.value));
    }
    output
}

pub fn render_session(session: &Session) -> String {
    match &session.user {
        Some(user) if session.is_authenticated => format!(
            "{} <{}> ({})\n",
            user.name,
            user.email,
            user.role.as_str()
        ),
        _ => "Not logged in.\n".to_string(),
    }
}
