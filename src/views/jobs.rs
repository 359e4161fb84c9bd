use std::sync::Arc;

use crate::core::{ApiClient, PagedCollection, SessionStore};
use crate::types::{ApiError, JobFields, JobRecord};
use crate::utils::parse_skills;

const JOBS_RESOURCE: &str = "/jobs";

/// Job form fields plus the current page of jobs
pub struct JobsView {
    pub title: String,
    pub description: String,
    /// Comma-separated, as typed
    pub skills: String,
    jobs: PagedCollection<JobRecord>,
}

impl JobsView {
    pub fn new(api: ApiClient, session: Arc<SessionStore>, page_size: u32) -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            skills: String::new(),
            jobs: PagedCollection::new(api, session, JOBS_RESOURCE, page_size),
        }
    }

    pub fn items(&self) -> &[JobRecord] {
        self.jobs.items()
    }

    pub fn page(&self) -> u32 {
        self.jobs.page()
    }

    pub fn missing_field(&self) -> Option<&'static str> {
        if self.title.trim().is_empty() {
            Some("Title is required")
        } else {
            None
        }
    }

    pub fn fields(&self) -> JobFields {
        JobFields {
            title: self.title.clone(),
            description: self.description.clone(),
            skills: parse_skills(&self.skills),
        }
    }

    pub async fn create(&mut self) -> Result<JobRecord, ApiError> {
        let created = self.jobs.create(&self.fields()).await?;
        self.reset_fields();
        Ok(created)
    }

    pub async fn update(&mut self, id: i64) -> Result<JobRecord, ApiError> {
        let updated = self.jobs.update(id, &self.fields()).await?;
        self.reset_fields();
        Ok(updated)
    }

    pub async fn delete(&mut self, id: i64) -> Result<(), ApiError> {
        self.jobs.delete(id).await
    }

    pub async fn refresh(&mut self) -> Result<(), ApiError> {
        let page = self.jobs.page();
        self.show_page(page).await
    }

    pub async fn show_page(&mut self, page: u32) -> Result<(), ApiError> {
        self.jobs.list(page).await?;
        Ok(())
    }

    pub async fn next_page(&mut self) -> Result<(), ApiError> {
        let page = self.jobs.page().saturating_add(1);
        self.show_page(page).await
    }

    /// No-op on the first page
    pub async fn prev_page(&mut self) -> Result<(), ApiError> {
        match self.jobs.page() {
            0 => Ok(()),
            page => self.show_page(page - 1).await,
        }
    }

    pub fn clear(&mut self) {
        self.jobs.clear();
    }

    fn reset_fields(&mut self) {
        self.title.clear();
        self.description.clear();
        self.skills.clear();
    }
}
