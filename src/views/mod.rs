// src/views/mod.rs
//! Per-page controllers: editable form fields kept apart from synchronized state

pub mod auth;
pub mod jobs;
pub mod matching;
pub mod resumes;

pub use auth::AuthView;
pub use jobs::JobsView;
pub use matching::MatchView;
pub use resumes::ResumesView;
