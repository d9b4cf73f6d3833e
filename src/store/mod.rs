//! In-memory application state and its mutations.
//!
//! [`ProjectStore`] holds the master project list, the denormalized "current
//! project" shown on the detail page, and the dashboard query state. It is an
//! explicit value passed to whoever needs it; there is no global store.
//!
//! Task mutations are applied to both the current project and its entry in the
//! master list, or to neither, so the two never diverge.

use thiserror::Error;
use uuid::Uuid;

use crate::mock_data::ProjectProvider;
use crate::models::*;
use crate::query::{self, ChartData, ProjectStats, ProjectView, TaskSummary};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("Project not found: {0}")]
    ProjectNotFound(Uuid),

    #[error("Task not found: {0}")]
    TaskNotFound(Uuid),
}

#[derive(Debug, Clone, Default)]
pub struct ProjectStore {
    projects: Vec<Project>,
    current_project: Option<Project>,
    query: QueryState,
    loading: bool,
    error: Option<String>,
}

impl ProjectStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page_size(page_size: usize) -> Self {
        Self {
            query: QueryState::with_page_size(page_size),
            ..Self::default()
        }
    }

    // ============================================================
    // Reads
    // ============================================================

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn project(&self, id: Uuid) -> Option<&Project> {
        self.projects.iter().find(|p| p.id == id)
    }

    pub fn current_project(&self) -> Option<&Project> {
        self.current_project.as_ref()
    }

    pub fn query(&self) -> &QueryState {
        &self.query
    }

    pub fn filters(&self) -> &Filters {
        &self.query.filters
    }

    pub fn pagination(&self) -> &Pagination {
        &self.query.pagination
    }

    pub fn sort_by(&self) -> SortBy {
        self.query.sort_by
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// The visible dashboard page for the current query state.
    pub fn view(&self) -> ProjectView {
        query::compute_view_for(&self.projects, &self.query)
    }

    pub fn stats(&self) -> ProjectStats {
        query::compute_stats(&self.projects)
    }

    pub fn chart_data(&self) -> ChartData {
        query::compute_chart_data(&self.projects)
    }

    pub fn current_task_summary(&self) -> Option<TaskSummary> {
        self.current_project
            .as_ref()
            .map(|p| query::summarize_tasks(&p.tasks))
    }

    // ============================================================
    // Loading
    // ============================================================

    /// Fetch the full collection from the provider into the master list.
    pub async fn load_projects(&mut self, provider: &impl ProjectProvider) {
        self.loading = true;
        self.error = None;
        let projects = provider.list_projects().await;
        self.set_projects(projects);
        self.loading = false;
    }

    /// Make `id` the current project.
    ///
    /// The master list is consulted first so edits made in this session are
    /// visible; unknown ids fall back to the provider. A failed lookup is kept
    /// in [`error`](Self::error) until the next successful one.
    pub async fn open_project(
        &mut self,
        provider: &impl ProjectProvider,
        id: Uuid,
    ) -> Result<&Project, StoreError> {
        let cached = self.project(id).cloned();
        let project = match cached {
            Some(project) => Some(project),
            None => {
                self.loading = true;
                let fetched = provider.get_project(id).await;
                self.loading = false;
                fetched
            }
        };

        let Some(project) = project else {
            tracing::warn!("Project {} not found", id);
            let error = StoreError::ProjectNotFound(id);
            self.error = Some(error.to_string());
            return Err(error);
        };
        self.error = None;
        Ok(self.current_project.insert(project))
    }

    // ============================================================
    // Project mutations
    // ============================================================

    pub fn set_projects(&mut self, projects: Vec<Project>) {
        tracing::debug!("Loaded {} projects", projects.len());
        self.projects = projects;
        self.sync_pagination();
    }

    pub fn set_current_project(&mut self, project: Option<Project>) {
        self.current_project = project;
    }

    pub fn add_project(&mut self, project: Project) {
        tracing::info!("Adding project {} ({})", project.name, project.id);
        self.projects.push(project);
        self.sync_pagination();
    }

    /// Replace a project wholesale. Callers pass the complete updated entity.
    pub fn update_project(&mut self, project: Project) -> Result<(), StoreError> {
        let index = self.projects.iter().position(|p| p.id == project.id);
        let is_current = self.is_current(project.id);
        if index.is_none() && !is_current {
            return Err(StoreError::ProjectNotFound(project.id));
        }

        tracing::info!("Updating project {}", project.id);
        if is_current {
            self.current_project = Some(project.clone());
        }
        if let Some(index) = index {
            self.projects[index] = project;
        }
        self.sync_pagination();
        Ok(())
    }

    pub fn delete_project(&mut self, id: Uuid) -> Result<(), StoreError> {
        let before = self.projects.len();
        self.projects.retain(|p| p.id != id);
        if self.projects.len() == before {
            return Err(StoreError::ProjectNotFound(id));
        }

        tracing::info!("Deleted project {}", id);
        if self.is_current(id) {
            self.current_project = None;
        }
        self.sync_pagination();
        Ok(())
    }

    // ============================================================
    // Task mutations
    // ============================================================

    pub fn add_task(&mut self, task: Task) -> Result<(), StoreError> {
        let project_id = task.project_id;
        if self.project(project_id).is_none() && !self.is_current(project_id) {
            return Err(StoreError::ProjectNotFound(project_id));
        }

        tracing::info!("Adding task {} to project {}", task.id, project_id);
        self.for_each_copy(project_id, |project| project.tasks.push(task.clone()));
        self.sync_pagination();
        Ok(())
    }

    /// Replace a task by id inside its owning project.
    pub fn update_task(&mut self, task: Task) -> Result<(), StoreError> {
        let project_id = task.project_id;
        let task_id = task.id;
        self.ensure_task_exists(project_id, task_id)?;

        tracing::info!("Updating task {} in project {}", task_id, project_id);
        self.for_each_copy(project_id, |project| {
            if let Some(slot) = project.tasks.iter_mut().find(|t| t.id == task_id) {
                *slot = task.clone();
            }
        });
        self.sync_pagination();
        Ok(())
    }

    pub fn delete_task(&mut self, project_id: Uuid, task_id: Uuid) -> Result<(), StoreError> {
        self.ensure_task_exists(project_id, task_id)?;

        tracing::info!("Deleting task {} from project {}", task_id, project_id);
        self.for_each_copy(project_id, |project| {
            project.tasks.retain(|t| t.id != task_id);
        });
        self.sync_pagination();
        Ok(())
    }

    // ============================================================
    // Query state
    // ============================================================

    /// Merge a filter change. Always returns to the first page.
    pub fn set_filter(&mut self, patch: FilterPatch) {
        self.query.filters.apply(patch);
        self.query.pagination.current_page = 1;
        self.sync_pagination();
    }

    pub fn set_page(&mut self, page: usize) {
        self.query.pagination.current_page = page;
    }

    /// Change the page size and return to the first page.
    pub fn set_page_size(&mut self, page_size: usize) {
        self.query.pagination.page_size = page_size.max(1);
        self.query.pagination.current_page = 1;
        self.sync_pagination();
    }

    pub fn set_sort_by(&mut self, sort_by: SortBy) {
        self.query.sort_by = sort_by;
    }

    /// Sort by `field`: ascending when it is a new field, flipped when it is
    /// already the active one.
    pub fn toggle_sort(&mut self, field: SortField) {
        let current = self.query.sort_by;
        let order = if current.field == field {
            current.order.toggled()
        } else {
            SortOrder::Asc
        };
        self.query.sort_by = SortBy::new(field, order);
    }

    // ============================================================
    // Internals
    // ============================================================

    fn is_current(&self, id: Uuid) -> bool {
        self.current_project.as_ref().is_some_and(|p| p.id == id)
    }

    fn ensure_task_exists(&self, project_id: Uuid, task_id: Uuid) -> Result<(), StoreError> {
        let in_master = self.project(project_id);
        let in_current = self.current_project.as_ref().filter(|p| p.id == project_id);
        if in_master.is_none() && in_current.is_none() {
            return Err(StoreError::ProjectNotFound(project_id));
        }

        let found = in_master
            .into_iter()
            .chain(in_current)
            .any(|p| p.tasks.iter().any(|t| t.id == task_id));
        if found {
            Ok(())
        } else {
            Err(StoreError::TaskNotFound(task_id))
        }
    }

    /// Apply `f` to the current project and the master entry for `project_id`.
    fn for_each_copy(&mut self, project_id: Uuid, mut f: impl FnMut(&mut Project)) {
        if let Some(current) = self.current_project.as_mut() {
            if current.id == project_id {
                f(current);
            }
        }
        if let Some(project) = self.projects.iter_mut().find(|p| p.id == project_id) {
            f(project);
        }
    }

    /// Recompute `total_items`/`total_pages` from the filtered collection.
    fn sync_pagination(&mut self) {
        let total_items = self.view().total_items;
        self.query.pagination.set_total_items(total_items);
    }
}
