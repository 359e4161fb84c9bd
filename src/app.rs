// src/app.rs
//! Application shell: owns the session, the operation runner and every view,
//! routes between pages and reacts to login/logout transitions.

use anyhow::Result;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::config::ClientConfig;
use crate::core::{ApiClient, FileTokenSlot, OperationRunner, SessionStore};
use crate::types::{JobRecord, MatchResult, ResumeRecord, User};
use crate::utils::read_upload;
use crate::views::{AuthView, JobsView, MatchView, ResumesView};

const NOT_LOGGED_IN: &str = "Not logged in";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Auth,
    Jobs,
    Resumes,
    Match,
}

pub struct App {
    session: Arc<SessionStore>,
    ops: OperationRunner,
    pub auth: AuthView,
    pub jobs: JobsView,
    pub resumes: ResumesView,
    pub matching: MatchView,
    route: Route,
    /// Token the collections were last loaded for
    synced_token: String,
    session_rx: watch::Receiver<String>,
}

impl App {
    pub fn new(api: ApiClient, session: Arc<SessionStore>, page_size: u32) -> Self {
        let session_rx = session.subscribe();
        Self {
            auth: AuthView::new(api.clone(), session.clone()),
            jobs: JobsView::new(api.clone(), session.clone(), page_size),
            resumes: ResumesView::new(api.clone(), session.clone(), page_size),
            matching: MatchView::new(api, session.clone()),
            ops: OperationRunner::new(),
            route: Route::Auth,
            synced_token: String::new(),
            session_rx,
            session,
        }
    }

    /// App over HTTP with the session restored from the configured file
    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        let api = ApiClient::from_base_url(&config.api_base_url)?;
        let slot = FileTokenSlot::new(config.session_path.clone());
        debug!("Session file: {}", slot.path().display());
        let session = Arc::new(SessionStore::restore(Box::new(slot)));
        Ok(Self::new(api, session, config.page_size))
    }

    /// Pick up a restored session: an authenticated start loads both lists
    pub async fn start(&mut self) {
        self.sync_session().await;
        if !self.synced_token.is_empty() {
            self.route = Route::Jobs;
        }
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    pub fn ops(&self) -> &OperationRunner {
        &self.ops
    }

    pub fn route(&self) -> Route {
        self.route
    }

    /// Unauthenticated visits to any page but `Auth` land on `Auth`
    pub fn navigate(&mut self, route: Route) -> Route {
        self.route = if route != Route::Auth && !self.is_authenticated() {
            Route::Auth
        } else {
            route
        };
        self.route
    }

    /// Apply the latest token seen on the session channel. Any new
    /// non-empty token (login, restore or a switch to another account)
    /// clears both lists and loads page 0; an empty one clears them and
    /// routes to `Auth`.
    pub async fn sync_session(&mut self) {
        let token = self.session_rx.borrow_and_update().clone();
        if token == self.synced_token {
            return;
        }
        let switched = !self.synced_token.is_empty();
        self.synced_token = token;

        self.jobs.clear();
        self.resumes.clear();

        if self.synced_token.is_empty() {
            info!("Session ended, clearing collections");
            self.route = Route::Auth;
            return;
        }

        if switched {
            info!("Session token changed, reloading first pages");
        } else {
            info!("Session authenticated, loading first pages");
        }
        if let Err(e) = self.jobs.show_page(0).await {
            warn!("Initial jobs load failed: {}", e);
        }
        if let Err(e) = self.resumes.show_page(0).await {
            warn!("Initial resumes load failed: {}", e);
        }
    }

    // ===== Auth =====

    pub async fn signup(&mut self) -> Option<User> {
        if let Some(message) = self.auth.missing_field() {
            self.ops.reject(message);
            return None;
        }
        self.ops.run("Sign up", self.auth.signup()).await
    }

    pub async fn login(&mut self) -> bool {
        if let Some(message) = self.auth.missing_field() {
            self.ops.reject(message);
            return false;
        }
        let ok = self.ops.run("Log in", self.auth.login()).await.is_some();
        self.sync_session().await;
        if ok {
            self.route = Route::Jobs;
        }
        ok
    }

    pub async fn whoami(&mut self) -> Option<User> {
        if !self.require_auth() {
            return None;
        }
        self.ops.run("Who am I", self.auth.whoami()).await
    }

    pub async fn logout(&mut self) {
        self.auth.logout();
        self.sync_session().await;
    }

    // ===== Jobs =====

    pub async fn create_job(&mut self) -> Option<JobRecord> {
        if !self.require_auth() {
            return None;
        }
        if let Some(message) = self.jobs.missing_field() {
            self.ops.reject(message);
            return None;
        }
        self.ops.run("Create job", self.jobs.create()).await
    }

    pub async fn update_job(&mut self, id: i64) -> Option<JobRecord> {
        if !self.require_auth() {
            return None;
        }
        if let Some(message) = self.jobs.missing_field() {
            self.ops.reject(message);
            return None;
        }
        self.ops.run("Update job", self.jobs.update(id)).await
    }

    pub async fn delete_job(&mut self, id: i64) -> bool {
        self.require_auth() && self.ops.run("Delete job", self.jobs.delete(id)).await.is_some()
    }

    pub async fn refresh_jobs(&mut self) -> bool {
        self.require_auth() && self.ops.run("Refresh jobs", self.jobs.refresh()).await.is_some()
    }

    pub async fn show_jobs_page(&mut self, page: u32) -> bool {
        self.require_auth()
            && self
                .ops
                .run("Load jobs", self.jobs.show_page(page))
                .await
                .is_some()
    }

    pub async fn next_jobs_page(&mut self) -> bool {
        self.require_auth() && self.ops.run("Next page", self.jobs.next_page()).await.is_some()
    }

    pub async fn prev_jobs_page(&mut self) -> bool {
        self.require_auth() && self.ops.run("Previous page", self.jobs.prev_page()).await.is_some()
    }

    // ===== Resumes =====

    pub async fn upload_resume(&mut self) -> Option<ResumeRecord> {
        if !self.require_auth() {
            return None;
        }
        if let Some(message) = self.resumes.missing_field() {
            self.ops.reject(message);
            return None;
        }
        let path = self.resumes.file.clone()?;

        let upload = match read_upload(&path).await {
            Ok(upload) => upload,
            Err(e) => {
                warn!("Cannot read upload: {:#}", e);
                self.ops.reject(&format!("{:#}", e));
                return None;
            }
        };

        self.ops.run("Upload resume", self.resumes.upload(upload)).await
    }

    pub async fn delete_resume(&mut self, id: i64) -> bool {
        self.require_auth()
            && self
                .ops
                .run("Delete resume", self.resumes.delete(id))
                .await
                .is_some()
    }

    pub async fn refresh_resumes(&mut self) -> bool {
        self.require_auth()
            && self
                .ops
                .run("Refresh resumes", self.resumes.refresh())
                .await
                .is_some()
    }

    pub async fn show_resumes_page(&mut self, page: u32) -> bool {
        self.require_auth()
            && self
                .ops
                .run("Load resumes", self.resumes.show_page(page))
                .await
                .is_some()
    }

    pub async fn next_resumes_page(&mut self) -> bool {
        self.require_auth() && self.ops.run("Next page", self.resumes.next_page()).await.is_some()
    }

    pub async fn prev_resumes_page(&mut self) -> bool {
        self.require_auth()
            && self
                .ops
                .run("Previous page", self.resumes.prev_page())
                .await
                .is_some()
    }

    /// `Some(parsed)` once polling finished, `None` if a listing failed
    pub async fn wait_for_resume(
        &mut self,
        id: i64,
        attempts: u32,
        interval: Duration,
    ) -> Option<bool> {
        if !self.require_auth() {
            return None;
        }
        self.ops
            .run(
                "Wait for parsing",
                self.resumes.wait_until_parsed(id, attempts, interval),
            )
            .await
    }

    // ===== Match =====

    pub async fn run_match(&mut self) -> Option<MatchResult> {
        if !self.require_auth() {
            return None;
        }
        if let Some(message) = self.matching.missing_field() {
            self.ops.reject(message);
            return None;
        }
        self.ops.run("Match", self.matching.run()).await
    }

    fn require_auth(&self) -> bool {
        if self.is_authenticated() {
            true
        } else {
            self.ops.reject(NOT_LOGGED_IN);
            false
        }
    }
}
