use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

use crate::core::{ApiClient, FileUpload, PagedCollection, SessionStore};
use crate::types::{ApiError, ResumeRecord};

const RESUMES_RESOURCE: &str = "/resumes";

pub struct ResumesView {
    /// File picked for the next upload
    pub file: Option<PathBuf>,
    resumes: PagedCollection<ResumeRecord>,
}

impl ResumesView {
    pub fn new(api: ApiClient, session: Arc<SessionStore>, page_size: u32) -> Self {
        Self {
            file: None,
            resumes: PagedCollection::new(api, session, RESUMES_RESOURCE, page_size),
        }
    }

    pub fn items(&self) -> &[ResumeRecord] {
        self.resumes.items()
    }

    pub fn page(&self) -> u32 {
        self.resumes.page()
    }

    pub fn missing_field(&self) -> Option<&'static str> {
        if self.file.is_none() {
            Some("Pick a file")
        } else {
            None
        }
    }

    pub async fn upload(&mut self, file: FileUpload) -> Result<ResumeRecord, ApiError> {
        let created = self.resumes.upload(file).await?;
        self.file = None;
        Ok(created)
    }

    pub async fn delete(&mut self, id: i64) -> Result<(), ApiError> {
        self.resumes.delete(id).await
    }

    pub async fn refresh(&mut self) -> Result<(), ApiError> {
        let page = self.resumes.page();
        self.show_page(page).await
    }

    pub async fn show_page(&mut self, page: u32) -> Result<(), ApiError> {
        self.resumes.list(page).await?;
        Ok(())
    }

    pub async fn next_page(&mut self) -> Result<(), ApiError> {
        let page = self.resumes.page().saturating_add(1);
        self.show_page(page).await
    }

    pub async fn prev_page(&mut self) -> Result<(), ApiError> {
        match self.resumes.page() {
            0 => Ok(()),
            page => self.show_page(page - 1).await,
        }
    }

    /// Re-list the current page until resume `id` reports `parsed`.
    /// Parsing runs as a server background job after upload. Returns
    /// whether it finished within `attempts` listings.
    pub async fn wait_until_parsed(
        &mut self,
        id: i64,
        attempts: u32,
        interval: Duration,
    ) -> Result<bool, ApiError> {
        for attempt in 1..=attempts {
            self.refresh().await?;
            if self.resumes.get(id).is_some_and(|r| r.parsed) {
                return Ok(true);
            }
            debug!("Resume #{} not parsed yet (attempt {}/{})", id, attempt, attempts);
            if attempt < attempts {
                tokio::time::sleep(interval).await;
            }
        }
        Ok(false)
    }

    pub fn clear(&mut self) {
        self.resumes.clear();
    }
}
