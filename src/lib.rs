//! Project dashboard core: session model, query pipeline and mutation layer.
//!
//! The crate is organised leaf-first:
//!
//! - [`models`]: users, projects, tasks and the query state.
//! - [`db`]: durable local key-value storage (the only persistence).
//! - [`auth`]: credential lookup, token codec, role hierarchy, sessions.
//! - [`mock_data`]: the seeded project provider standing in for a backend.
//! - [`query`]: filtering, sorting, paging and aggregate statistics.
//! - [`store`]: in-memory mutations over the master list and current view.
//! - [`validation`], [`routing`]: form checks and route guards.
//! - [`render`], [`console`]: terminal presentation.

pub mod auth;
pub mod config;
pub mod console;
pub mod db;
pub mod mock_data;
pub mod models;
pub mod query;
pub mod render;
pub mod routing;
pub mod store;
pub mod validation;
