//! Client-side session and data-synchronization layer for the ATS API.
//!
//! A [`SessionStore`] owns the bearer token, an [`ApiClient`] speaks JSON to
//! the server, and one [`PagedCollection`] per resource mirrors the page
//! currently on screen. The [`App`] ties them to the per-page views.

pub mod app;
pub mod cli;
pub mod config;
pub mod core;
pub mod render;
pub mod types;
pub mod utils;
pub mod views;

#[cfg(test)]
pub(crate) mod testing;

pub use app::{App, Route};
pub use config::ClientConfig;
pub use crate::core::{ApiClient, OperationRunner, PagedCollection, SessionStore};
pub use types::{ApiError, JobRecord, MatchResult, ResumeRecord};
