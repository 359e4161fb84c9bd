use std::sync::Arc;

use crate::core::{ApiClient, SessionStore};
use crate::types::{ApiError, MatchResult};

pub struct MatchView {
    pub resume_id: String,
    pub job_id: String,
    result: String,
    api: ApiClient,
    session: Arc<SessionStore>,
}

impl MatchView {
    pub fn new(api: ApiClient, session: Arc<SessionStore>) -> Self {
        Self {
            resume_id: String::new(),
            job_id: String::new(),
            result: String::new(),
            api,
            session,
        }
    }

    /// `Score: <n>%` after a successful match, empty before
    pub fn result(&self) -> &str {
        &self.result
    }

    pub fn missing_field(&self) -> Option<&'static str> {
        if self.resume_id.trim().is_empty() {
            Some("Resume id is required")
        } else if self.job_id.trim().is_empty() {
            Some("Job id is required")
        } else {
            None
        }
    }

    pub async fn run(&mut self) -> Result<MatchResult, ApiError> {
        let result = self
            .api
            .match_score(
                &self.session.token(),
                self.resume_id.trim(),
                self.job_id.trim(),
            )
            .await?;
        self.result = result.to_string();
        Ok(result)
    }
}
