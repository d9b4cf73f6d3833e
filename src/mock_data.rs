//! Seeded project data standing in for a backend.
//!
//! The provider hands out clones of a fixed collection. Lookups simulate a
//! short network round-trip so callers exercise their loading states.

use std::future::Future;
use std::time::Duration;

use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

use crate::models::*;

/// Simulated latency of provider calls.
pub const DEFAULT_FETCH_DELAY: Duration = Duration::from_millis(300);

/// Source of the project collection.
pub trait ProjectProvider {
    fn list_projects(&self) -> impl Future<Output = Vec<Project>> + Send;

    /// Look up a single project. `None` when the id is unknown.
    fn get_project(&self, id: Uuid) -> impl Future<Output = Option<Project>> + Send;
}

#[derive(Debug, Clone)]
pub struct MockProjectProvider {
    projects: Vec<Project>,
    delay: Duration,
}

impl MockProjectProvider {
    pub fn new(projects: Vec<Project>, delay: Duration) -> Self {
        Self { projects, delay }
    }

    /// The seeded collection with the default latency.
    pub fn seeded() -> Self {
        Self::new(seed_projects(), DEFAULT_FETCH_DELAY)
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    async fn simulate_latency(&self) {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
    }
}

impl ProjectProvider for MockProjectProvider {
    async fn list_projects(&self) -> Vec<Project> {
        self.simulate_latency().await;
        tracing::debug!("Serving {} projects", self.projects.len());
        self.projects.clone()
    }

    async fn get_project(&self, id: Uuid) -> Option<Project> {
        self.simulate_latency().await;
        self.projects.iter().find(|p| p.id == id).cloned()
    }
}

impl Default for MockProjectProvider {
    fn default() -> Self {
        Self::seeded()
    }
}

struct SeedTask {
    title: &'static str,
    description: &'static str,
    status: TaskStatus,
    priority: TaskPriority,
    assigned_to: &'static str,
}

struct SeedProject {
    name: &'static str,
    description: &'static str,
    status: ProjectStatus,
    start: (i32, u32, u32),
    end: (i32, u32, u32),
    progress: u8,
    budget: f64,
    tasks: &'static [SeedTask],
}

const fn task(
    title: &'static str,
    description: &'static str,
    status: TaskStatus,
    priority: TaskPriority,
    assigned_to: &'static str,
) -> SeedTask {
    SeedTask {
        title,
        description,
        status,
        priority,
        assigned_to,
    }
}

use ProjectStatus as P;
use TaskPriority as Pr;
use TaskStatus as T;

const SEED: &[SeedProject] = &[
    SeedProject {
        name: "Website Redesign",
        description: "Refresh the marketing site with the new brand guidelines",
        status: P::InProgress,
        start: (2024, 1, 15),
        end: (2024, 6, 30),
        progress: 65,
        budget: 150_000.0,
        tasks: &[
            task("Design mockups", "Homepage and landing page mockups", T::Done, Pr::High, "dev@example.com"),
            task("Implement header", "Responsive navigation header", T::InProgress, Pr::Medium, "dev@example.com"),
            task("Content migration", "Move blog posts to the new CMS", T::Todo, Pr::Low, "pm@example.com"),
        ],
    },
    SeedProject {
        name: "Mobile App Development",
        description: "Native iOS and Android apps for customer self-service",
        status: P::Planning,
        start: (2024, 3, 1),
        end: (2024, 12, 31),
        progress: 10,
        budget: 300_000.0,
        tasks: &[
            task("Requirements gathering", "Interview stakeholders", T::InProgress, Pr::High, "pm@example.com"),
            task("Tech stack evaluation", "Compare cross-platform options", T::Todo, Pr::Medium, "dev@example.com"),
        ],
    },
    SeedProject {
        name: "Database Migration",
        description: "Move the legacy database to managed PostgreSQL",
        status: P::Completed,
        start: (2023, 9, 1),
        end: (2024, 1, 31),
        progress: 100,
        budget: 80_000.0,
        tasks: &[
            task("Schema mapping", "Map legacy tables to the new schema", T::Done, Pr::Critical, "dev@example.com"),
            task("Data validation", "Verify row counts and checksums", T::Done, Pr::High, "admin@example.com"),
        ],
    },
    SeedProject {
        name: "Customer Portal",
        description: "Self-service portal for invoices and support tickets",
        status: P::InProgress,
        start: (2024, 2, 1),
        end: (2024, 8, 31),
        progress: 40,
        budget: 120_000.0,
        tasks: &[
            task("Invoice view", "List and download invoices", T::Review, Pr::High, "dev@example.com"),
            task("Ticket submission", "Support ticket form", T::InProgress, Pr::Medium, "dev@example.com"),
            task("SSO integration", "Single sign-on with the identity provider", T::Todo, Pr::Critical, "admin@example.com"),
        ],
    },
    SeedProject {
        name: "Analytics Dashboard",
        description: "Internal reporting on sales and usage metrics",
        status: P::OnHold,
        start: (2024, 1, 10),
        end: (2024, 5, 15),
        progress: 25,
        budget: 60_000.0,
        tasks: &[task("Define KPIs", "Agree on the metric definitions", T::Done, Pr::Medium, "pm@example.com")],
    },
    SeedProject {
        name: "Security Audit",
        description: "Third-party penetration test and remediation",
        status: P::InProgress,
        start: (2024, 4, 1),
        end: (2024, 7, 1),
        progress: 55,
        budget: 45_000.0,
        tasks: &[
            task("Scope engagement", "Agree on systems in scope", T::Done, Pr::High, "admin@example.com"),
            task("Fix findings", "Remediate high severity findings", T::InProgress, Pr::Critical, "dev@example.com"),
        ],
    },
    SeedProject {
        name: "API Gateway",
        description: "Central gateway with rate limiting for public APIs",
        status: P::Planning,
        start: (2024, 6, 1),
        end: (2024, 11, 30),
        progress: 5,
        budget: 95_000.0,
        tasks: &[],
    },
    SeedProject {
        name: "Legacy CRM Sunset",
        description: "Retire the old CRM after the migration to the new vendor",
        status: P::Cancelled,
        start: (2023, 6, 1),
        end: (2023, 12, 31),
        progress: 30,
        budget: 70_000.0,
        tasks: &[task("Export contacts", "Full export of contact records", T::Done, Pr::Low, "pm@example.com")],
    },
    SeedProject {
        name: "Employee Onboarding",
        description: "Automate account provisioning for new hires",
        status: P::Completed,
        start: (2023, 10, 1),
        end: (2024, 2, 28),
        progress: 100,
        budget: 35_000.0,
        tasks: &[task("Provisioning scripts", "Create accounts in all systems", T::Done, Pr::Medium, "dev@example.com")],
    },
    SeedProject {
        name: "Payment Processing Upgrade",
        description: "Adopt the new payment provider API and 3-D Secure",
        status: P::InProgress,
        start: (2024, 3, 15),
        end: (2024, 9, 30),
        progress: 70,
        budget: 110_000.0,
        tasks: &[
            task("Provider sandbox", "Integrate against the sandbox", T::Done, Pr::High, "dev@example.com"),
            task("Refund flow", "Support partial refunds", T::Review, Pr::Medium, "dev@example.com"),
        ],
    },
    SeedProject {
        name: "Documentation Overhaul",
        description: "Rewrite developer documentation and examples",
        status: P::OnHold,
        start: (2024, 2, 15),
        end: (2024, 6, 15),
        progress: 15,
        budget: 25_000.0,
        tasks: &[],
    },
    SeedProject {
        name: "Cloud Cost Optimization",
        description: "Reduce infrastructure spend through rightsizing",
        status: P::InProgress,
        start: (2024, 5, 1),
        end: (2024, 10, 31),
        progress: 35,
        budget: 40_000.0,
        tasks: &[task("Usage report", "Identify idle resources", T::InProgress, Pr::High, "admin@example.com")],
    },
];

fn seed_date((year, month, day): (i32, u32, u32)) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("seed dates are valid")
}

fn seed_timestamp(date: NaiveDate) -> DateTime<Utc> {
    date.and_hms_opt(9, 0, 0).expect("seed times are valid").and_utc()
}

/// The seeded project collection. Ids are stable across calls.
pub fn seed_projects() -> Vec<Project> {
    SEED.iter()
        .enumerate()
        .map(|(i, seed)| {
            let project_id = Uuid::from_u128(i as u128 + 1);
            let start_date = seed_date(seed.start);
            let created_at = seed_timestamp(start_date);

            let tasks = seed
                .tasks
                .iter()
                .enumerate()
                .map(|(j, t)| Task {
                    id: Uuid::from_u128(((i as u128 + 1) << 32) | (j as u128 + 1)),
                    project_id,
                    title: t.title.to_string(),
                    description: t.description.to_string(),
                    status: t.status,
                    priority: t.priority,
                    assigned_to: t.assigned_to.to_string(),
                    created_at,
                    updated_at: created_at,
                })
                .collect();

            Project {
                id: project_id,
                name: seed.name.to_string(),
                description: seed.description.to_string(),
                status: seed.status,
                start_date,
                end_date: seed_date(seed.end),
                progress: seed.progress,
                budget: seed.budget,
                tasks,
                created_at,
                updated_at: created_at,
            }
        })
        .collect()
}
