//! Interactive console over the dashboard state.
//!
//! Each input line is one command. Commands that need a session go through
//! [`routing::guard`], so an anonymous user is bounced to `login` and
//! under-privileged users get an "unauthorized" reply, exactly as the pages
//! of the dashboard would redirect.

use chrono::{Duration, NaiveDate, Utc};
use uuid::Uuid;

use crate::auth::{AuthError, SessionManager};
use crate::mock_data::{MockProjectProvider, ProjectProvider};
use crate::models::*;
use crate::query;
use crate::render;
use crate::routing::{self, Route};
use crate::store::ProjectStore;
use crate::validation;

const HELP: &str = "\
Commands:
  login <email> <password>        Sign in
  logout                          Sign out
  whoami                          Show the current user
  list                            Show the current dashboard page
  search [text]                   Filter by name or description
  status <Status|All>             Filter by project status
  priority <Priority|All>         Filter by task priority
  assignee [email]                Filter by task assignee
  sort <field>                    Sort by field (repeat to flip order)
  page <n> | size <n>             Change page or page size
  stats | charts                  Aggregate numbers and chart series
  open <project-id>               Open a project
  edit <field> <value>            Edit the open project (ProjectManager)
  new <name> | <description>      Create a project (ProjectManager)
  delete <project-id>             Delete a project (Admin)
  task add <title> | <assignee> [| <priority>]
  task status <task-id> <Status>
  task delete <task-id>
  quit";

/// What a command produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub output: String,
    pub quit: bool,
}

impl Reply {
    fn text(output: impl Into<String>) -> Self {
        Self {
            output: output.into(),
            quit: false,
        }
    }

    fn quit() -> Self {
        Self {
            output: String::new(),
            quit: true,
        }
    }
}

pub struct Console {
    session: SessionManager,
    store: ProjectStore,
    provider: MockProjectProvider,
}

impl Console {
    pub fn new(session: SessionManager, store: ProjectStore, provider: MockProjectProvider) -> Self {
        Self {
            session,
            store,
            provider,
        }
    }

    pub fn session(&self) -> &SessionManager {
        &self.session
    }

    pub fn store(&self) -> &ProjectStore {
        &self.store
    }

    /// Load the project collection. Call once before accepting commands.
    pub async fn start(&mut self) {
        self.store.load_projects(&self.provider).await;
    }

    pub async fn execute(&mut self, line: &str) -> Reply {
        let line = line.trim();
        let (command, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let rest = rest.trim();

        match command {
            "" => Reply::text(""),
            "help" => Reply::text(HELP),
            "quit" | "exit" => Reply::quit(),
            "login" => self.login(rest).await,
            "logout" => self.logout(),
            "whoami" => Reply::text(render::render_session(self.session.session())),
            _ => self.guarded(command, rest).await,
        }
    }

    async fn login(&mut self, args: &str) -> Reply {
        let mut parts = args.split_whitespace();
        let (Some(email), Some(password)) = (parts.next(), parts.next()) else {
            return Reply::text("usage: login <email> <password>");
        };
        if let Err(errors) = validation::validate_login(email, password) {
            return Reply::text(errors.to_string());
        }

        match self.session.login(email, password).await {
            Ok(session) => {
                let name = session.user.map(|u| u.name).unwrap_or_default();
                Reply::text(format!("Welcome, {}. -> {}", name, Route::Dashboard))
            }
            Err(AuthError::InvalidCredentials) => Reply::text("Invalid email or password"),
            Err(e) => Reply::text(format!("An error occurred: {}", e)),
        }
    }

    fn logout(&mut self) -> Reply {
        match self.session.logout() {
            Ok(()) => {
                self.store.set_current_project(None);
                Reply::text(format!("Signed out. -> {}", Route::Login))
            }
            Err(e) => Reply::text(format!("An error occurred: {}", e)),
        }
    }

    /// Commands that require a session, and possibly a role.
    async fn guarded(&mut self, command: &str, rest: &str) -> Reply {
        let (route, role) = match command {
            "open" => match Uuid::parse_str(rest) {
                Ok(id) => (Route::ProjectDetail(id), None),
                Err(_) => return Reply::text("usage: open <project-id>"),
            },
            "edit" => (self.current_route(), Some(UserRole::ProjectManager)),
            "new" => (Route::Dashboard, Some(UserRole::ProjectManager)),
            "delete" => (Route::Dashboard, Some(UserRole::Admin)),
            "task" => (self.current_route(), Some(UserRole::Developer)),
            _ => (Route::Dashboard, None),
        };

        let resolved = routing::guard(self.session.session(), route, role);
        match resolved {
            Route::Login => return Reply::text(format!("Please log in. -> {}", Route::Login)),
            Route::Unauthorized => {
                return Reply::text(format!(
                    "You do not have permission to {}. -> {}",
                    command,
                    Route::Unauthorized
                ))
            }
            _ => {}
        }

        match command {
            "list" => self.list(),
            "search" => self.filter(FilterPatch {
                search: Some(rest.to_string()),
                ..FilterPatch::default()
            }),
            "status" => match parse_filter(rest, ProjectStatus::from_str) {
                Some(status) => self.filter(FilterPatch {
                    status: Some(status),
                    ..FilterPatch::default()
                }),
                None => Reply::text("usage: status <Planning|InProgress|OnHold|Completed|Cancelled|All>"),
            },
            "priority" => match parse_filter(rest, TaskPriority::from_str) {
                Some(priority) => self.filter(FilterPatch {
                    priority: Some(priority),
                    ..FilterPatch::default()
                }),
                None => Reply::text("usage: priority <Low|Medium|High|Critical|All>"),
            },
            "assignee" => self.filter(FilterPatch {
                assigned_user: Some(rest.to_string()),
                ..FilterPatch::default()
            }),
            "sort" => match SortField::from_str(rest) {
                Some(field) => {
                    self.store.toggle_sort(field);
                    self.list()
                }
                None => Reply::text(format!(
                    "unknown sort field; one of: {}",
                    SortField::ALL.map(|f| f.as_str()).join(", ")
                )),
            },
            "page" => match rest.parse::<usize>() {
                Ok(page) => {
                    self.store.set_page(page);
                    self.list()
                }
                Err(_) => Reply::text("usage: page <n>"),
            },
            "size" => match rest.parse::<usize>() {
                Ok(size) => {
                    self.store.set_page_size(size);
                    self.list()
                }
                Err(_) => Reply::text("usage: size <n>"),
            },
            "stats" => Reply::text(render::render_stats(&self.store.stats())),
            "charts" => Reply::text(render::render_charts(&self.store.chart_data())),
            "open" => self.open(route).await,
            "edit" => self.edit(rest),
            "new" => self.create(rest),
            "delete" => self.delete(rest),
            "task" => self.task(rest),
            other => Reply::text(format!("unknown command: {} (try `help`)", other)),
        }
    }

    fn current_route(&self) -> Route {
        self.store
            .current_project()
            .map_or(Route::Dashboard, |p| Route::ProjectDetail(p.id))
    }

    fn list(&self) -> Reply {
        let view = self.store.view();
        Reply::text(render::render_table(&view, self.store.query()))
    }

    fn filter(&mut self, patch: FilterPatch) -> Reply {
        self.store.set_filter(patch);
        self.list()
    }

    async fn open(&mut self, route: Route) -> Reply {
        let Route::ProjectDetail(id) = route else {
            return Reply::text("usage: open <project-id>");
        };
        Reply::text(open_project_page(&mut self.store, &self.provider, id).await)
    }

    fn show_current(&self) -> Reply {
        Reply::text(project_page(&self.store))
    }

    fn edit(&mut self, args: &str) -> Reply {
        let Some(project) = self.store.current_project().cloned() else {
            return Reply::text("Open a project first.");
        };
        let Some((field, value)) = args.split_once(char::is_whitespace) else {
            return Reply::text("usage: edit <name|description|status|progress|budget|start|end> <value>");
        };

        let mut input = project.to_input();
        let value = value.trim();
        let parsed = match field {
            "name" => {
                input.name = value.to_string();
                true
            }
            "description" => {
                input.description = value.to_string();
                true
            }
            "status" => ProjectStatus::from_str(value)
                .map(|s| input.status = s)
                .is_some(),
            "progress" => value.parse::<u8>().map(|p| input.progress = p).is_ok(),
            "budget" => value.parse::<f64>().map(|b| input.budget = b).is_ok(),
            "start" => parse_date(value).map(|d| input.start_date = d).is_some(),
            "end" => parse_date(value).map(|d| input.end_date = d).is_some(),
            _ => return Reply::text(format!("unknown field: {}", field)),
        };
        if !parsed {
            return Reply::text(format!("invalid value for {}: {}", field, value));
        }

        if let Err(errors) = validation::validate_project(&input) {
            return Reply::text(errors.to_string());
        }
        match self.store.update_project(project.with_edits(input)) {
            Ok(()) => self.show_current(),
            Err(e) => Reply::text(e.to_string()),
        }
    }

    fn create(&mut self, args: &str) -> Reply {
        let parts = split_fields(args);
        let [name, description] = parts.as_slice() else {
            return Reply::text("usage: new <name> | <description>");
        };

        let today = Utc::now().date_naive();
        let input = ProjectInput {
            name: name.to_string(),
            description: description.to_string(),
            status: ProjectStatus::Planning,
            start_date: today,
            end_date: today + Duration::days(90),
            progress: 0,
            budget: 0.0,
        };
        if let Err(errors) = validation::validate_project(&input) {
            return Reply::text(errors.to_string());
        }

        let project = Project::new(input);
        let id = project.id;
        self.store.add_project(project);
        Reply::text(format!("Created project {}", id))
    }

    fn delete(&mut self, args: &str) -> Reply {
        let Ok(id) = Uuid::parse_str(args) else {
            return Reply::text("usage: delete <project-id>");
        };
        match self.store.delete_project(id) {
            Ok(()) => Reply::text(format!("Deleted project {}", id)),
            Err(e) => Reply::text(e.to_string()),
        }
    }

    fn task(&mut self, args: &str) -> Reply {
        let Some(project) = self.store.current_project().cloned() else {
            return Reply::text("Open a project first.");
        };
        let (action, rest) = args
            .split_once(char::is_whitespace)
            .unwrap_or((args, ""));

        let result = match action {
            "add" => {
                let parts = split_fields(rest);
                let (title, assignee, priority) = match parts.as_slice() {
                    [title, assignee] => (*title, *assignee, Some(TaskPriority::Medium)),
                    [title, assignee, priority] => {
                        (*title, *assignee, TaskPriority::from_str(priority))
                    }
                    _ => return Reply::text("usage: task add <title> | <assignee> [| <priority>]"),
                };
                let Some(priority) = priority else {
                    return Reply::text("priority must be Low, Medium, High or Critical");
                };
                let input = TaskInput {
                    title: title.to_string(),
                    assigned_to: assignee.to_string(),
                    priority,
                    ..TaskInput::default()
                };
                if let Err(errors) = validation::validate_task(&input) {
                    return Reply::text(errors.to_string());
                }
                self.store.add_task(Task::new(project.id, input))
            }
            "status" => {
                let mut parts = rest.split_whitespace();
                let task = parts
                    .next()
                    .and_then(|id| Uuid::parse_str(id).ok())
                    .and_then(|id| project.tasks.iter().find(|t| t.id == id));
                let status = parts.next().and_then(TaskStatus::from_str);
                let (Some(task), Some(status)) = (task, status) else {
                    return Reply::text("usage: task status <task-id> <Todo|InProgress|Review|Done>");
                };
                let input = TaskInput {
                    status,
                    title: task.title.clone(),
                    description: task.description.clone(),
                    priority: task.priority,
                    assigned_to: task.assigned_to.clone(),
                };
                self.store.update_task(task.with_edits(input))
            }
            "delete" => match Uuid::parse_str(rest) {
                Ok(task_id) => self.store.delete_task(project.id, task_id),
                Err(_) => return Reply::text("usage: task delete <task-id>"),
            },
            _ => return Reply::text("usage: task <add|status|delete> ..."),
        };

        match result {
            Ok(()) => self.show_current(),
            Err(e) => Reply::text(e.to_string()),
        }
    }
}

/// Open `id` and render its detail page. A missing project is a soft failure
/// that names the fallback route instead.
pub async fn open_project_page(
    store: &mut ProjectStore,
    provider: &impl ProjectProvider,
    id: Uuid,
) -> String {
    let result = store.open_project(provider, id).await.map(|_| ());
    match routing::after_project_lookup(id, &result) {
        Route::ProjectDetail(_) => project_page(store),
        fallback => format!("Project not found. -> {}", fallback),
    }
}

/// The current project with its task list narrowed by the active filters.
pub fn project_page(store: &ProjectStore) -> String {
    match (store.current_project(), store.current_task_summary()) {
        (Some(project), Some(summary)) => {
            let filters = store.filters();
            let tasks =
                query::filter_tasks(&project.tasks, &filters.priority, &filters.assigned_user);
            render::render_project(project, &summary, &tasks)
        }
        _ => format!("No project open. -> {}", Route::Dashboard),
    }
}

/// `All` or a value parsed by `parse`.
fn parse_filter<T>(value: &str, parse: impl Fn(&str) -> Option<T>) -> Option<FilterValue<T>> {
    if value == "All" {
        Some(FilterValue::All)
    } else {
        parse(value).map(FilterValue::Only)
    }
}

fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()
}

fn split_fields(args: &str) -> Vec<&str> {
    args.split('|').map(str::trim).collect()
}

