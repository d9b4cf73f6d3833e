//! Domain models for the project dashboard.
//!
//! # Core Concepts
//!
//! - [`Project`]: Top-level unit of work with a schedule, budget and progress.
//!   Owns an ordered list of [`Task`]s.
//! - [`Task`]: Work item nested inside a project, assigned to a user by email.
//! - [`User`]: An identity issued by the mock login, carrying a [`UserRole`].
//! - [`Session`]: The single logged-in state of the running client.
//! - [`QueryState`]: Filters, pagination and sort order driving the dashboard
//!   list. Derived, never persisted.

mod project;
mod query;
mod session;
mod task;
mod user;

pub use project::*;
pub use query::*;
pub use session::*;
pub use task::*;
pub use user::*;
