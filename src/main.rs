use std::io::Write;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use uuid::Uuid;

use project_dashboard::auth::{AuthError, SessionManager};
use project_dashboard::config::DashboardConfig;
use project_dashboard::console::{self, Console};
use project_dashboard::db::LocalStorage;
use project_dashboard::models::*;
use project_dashboard::routing::{self, Route};
use project_dashboard::store::ProjectStore;
use project_dashboard::{render, validation};

#[derive(Parser)]
#[command(name = "pdash")]
#[command(about = "Project and task dashboard with role-based access")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in and remember the session
    Login {
        #[arg(short, long)]
        email: String,

        #[arg(short, long)]
        password: String,
    },
    /// Sign out and forget the stored session
    Logout,
    /// Show the signed-in user
    Whoami,
    /// List one page of projects
    Projects {
        /// Match against name or description
        #[arg(long)]
        search: Option<String>,

        /// Planning, InProgress, OnHold, Completed, Cancelled or All
        #[arg(long)]
        status: Option<String>,

        /// Only projects with a task of this priority
        #[arg(long)]
        priority: Option<String>,

        /// Only projects with a task assigned to this email
        #[arg(long)]
        assignee: Option<String>,

        /// Sort field (name, status, startDate, progress, budget, ...)
        #[arg(long, default_value = "name")]
        sort: String,

        /// asc or desc
        #[arg(long, default_value = "asc")]
        order: String,

        #[arg(long, default_value = "1")]
        page: usize,

        #[arg(long)]
        page_size: Option<usize>,

        /// Print the page as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show one project and its tasks
    Show { id: Uuid },
    /// Dashboard totals
    Stats {
        /// Include the chart series
        #[arg(long)]
        charts: bool,
    },
    /// Interactive console (default)
    Console,
}

/// Initialize tracing on stderr so stdout carries only command output.
fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| "project_dashboard=warn,pdash=info".into()),
    );

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn open_storage(config: &DashboardConfig) -> anyhow::Result<LocalStorage> {
    let storage = match &config.storage_path {
        Some(path) => LocalStorage::open(path.clone())?,
        None => LocalStorage::open_default()?,
    };
    storage.migrate()?;
    Ok(storage)
}

/// A session manager with any stored session already restored.
fn restore_session(config: &DashboardConfig) -> anyhow::Result<SessionManager> {
    let storage = open_storage(config)?;
    let mut session = SessionManager::new(storage, config.authenticator())
        .with_restore_validation(config.validate_on_restore);
    session.restore()?;
    Ok(session)
}

/// Fail unless the session may visit `route`.
fn require(session: &SessionManager, route: Route) -> anyhow::Result<()> {
    match routing::guard(session.session(), route, None) {
        Route::Login => bail!("Not logged in. Run `pdash login --email <email> --password <password>`."),
        Route::Unauthorized => bail!("You do not have permission to view {}", route),
        _ => Ok(()),
    }
}

async fn loaded_store(config: &DashboardConfig) -> ProjectStore {
    let mut store = ProjectStore::with_page_size(config.page_size);
    store.load_projects(&config.provider()).await;
    store
}

fn parse_arg<T>(name: &str, value: &str, parse: impl Fn(&str) -> Option<T>) -> anyhow::Result<T> {
    parse(value).with_context(|| format!("Invalid {}: {}", name, value))
}

fn parse_filter_arg<T>(
    name: &str,
    value: Option<String>,
    parse: impl Fn(&str) -> Option<T>,
) -> anyhow::Result<Option<FilterValue<T>>> {
    match value.as_deref() {
        None => Ok(None),
        Some("All") => Ok(Some(FilterValue::All)),
        Some(v) => parse_arg(name, v, parse).map(|t| Some(FilterValue::Only(t))),
    }
}

async fn run_console(config: &DashboardConfig) -> anyhow::Result<()> {
    let session = restore_session(config)?;
    let store = ProjectStore::with_page_size(config.page_size);
    let mut console = Console::new(session, store, config.provider());
    console.start().await;

    let landing = routing::landing(console.session().session());
    println!("Project dashboard. Type `help` for commands. -> {}", landing);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("pdash> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let reply = console.execute(&line).await;
        if reply.quit {
            break;
        }
        if !reply.output.is_empty() {
            println!("{}", reply.output.trim_end());
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let config = DashboardConfig::load();

    match cli.command {
        Some(Commands::Login { email, password }) => {
            validation::validate_login(&email, &password)?;
            let mut session = restore_session(&config)?;

            eprintln!("Signing in...");
            match session.login(&email, &password).await {
                Ok(session) => print!("{}", render::render_session(&session)),
                Err(AuthError::InvalidCredentials) => bail!("Invalid email or password"),
                Err(e) => return Err(e.into()),
            }
        }
        Some(Commands::Logout) => {
            let mut session = restore_session(&config)?;
            session.logout()?;
            println!("Signed out.");
        }
        Some(Commands::Whoami) => {
            let session = restore_session(&config)?;
            print!("{}", render::render_session(session.session()));
        }
        Some(Commands::Projects {
            search,
            status,
            priority,
            assignee,
            sort,
            order,
            page,
            page_size,
            json,
        }) => {
            let session = restore_session(&config)?;
            require(&session, Route::Dashboard)?;

            let patch = FilterPatch {
                search,
                status: parse_filter_arg("status", status, ProjectStatus::from_str)?,
                priority: parse_filter_arg("priority", priority, TaskPriority::from_str)?,
                assigned_user: assignee,
            };
            let sort_by = SortBy::new(
                parse_arg("sort field", &sort, SortField::from_str)?,
                parse_arg("sort order", &order, SortOrder::from_str)?,
            );

            let mut store = loaded_store(&config).await;
            if let Some(size) = page_size {
                store.set_page_size(size);
            }
            store.set_filter(patch);
            store.set_sort_by(sort_by);
            store.set_page(page);

            let view = store.view();
            if json {
                println!("{}", serde_json::to_string_pretty(&view)?);
            } else {
                print!("{}", render::render_table(&view, store.query()));
            }
        }
        Some(Commands::Show { id }) => {
            let session = restore_session(&config)?;
            require(&session, Route::ProjectDetail(id))?;

            let provider = config.provider();
            let mut store = loaded_store(&config).await;
            let page = console::open_project_page(&mut store, &provider, id).await;
            println!("{}", page.trim_end());
        }
        Some(Commands::Stats { charts }) => {
            let session = restore_session(&config)?;
            require(&session, Route::Dashboard)?;

            let store = loaded_store(&config).await;
            print!("{}", render::render_stats(&store.stats()));
            if charts {
                print!("{}", render::render_charts(&store.chart_data()));
            }
        }
        Some(Commands::Console) | None => run_console(&config).await?,
    }

    Ok(())
}
