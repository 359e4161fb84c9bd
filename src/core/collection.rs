// src/core/collection.rs
//! Local mirror of one page of a server-side collection.
//!
//! Writes go to the server first. Only after the call succeeds is the local
//! page patched: creates are prepended, updates replace by id, deletes drop
//! by id. Patching does not re-derive page boundaries, so between two
//! `list` calls the local page is an approximation of the server window.

use reqwest::Method;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info};

use crate::core::api_client::{json_body, ApiClient};
use crate::core::session::SessionStore;
use crate::core::transport::FileUpload;
use crate::types::{ApiError, Record};

pub struct PagedCollection<T: Record> {
    api: ApiClient,
    session: Arc<SessionStore>,
    resource: String,
    page_size: u32,
    page: u32,
    items: Vec<T>,
}

impl<T: Record> PagedCollection<T> {
    /// `resource` is the collection root, e.g. `/jobs`
    pub fn new(api: ApiClient, session: Arc<SessionStore>, resource: &str, page_size: u32) -> Self {
        Self {
            api,
            session,
            resource: resource.trim_end_matches('/').to_string(),
            page_size,
            page: 0,
            items: Vec::new(),
        }
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: i64) -> Option<&T> {
        self.items.iter().find(|item| item.id() == id)
    }

    /// Fetch one page window and replace the local items with it
    pub async fn list(&mut self, page: u32) -> Result<&[T], ApiError> {
        let skip = u64::from(page) * u64::from(self.page_size);
        let path = format!("{}/?skip={}&limit={}", self.resource, skip, self.page_size);

        let items: Vec<T> = self
            .api
            .request_auth_json(&path, &self.session.token(), Method::GET, None)
            .await?;

        debug!("{}: page {} holds {} items", self.resource, page, items.len());
        self.page = page;
        self.items = items;
        Ok(&self.items)
    }

    pub async fn create<F: Serialize>(&mut self, fields: &F) -> Result<T, ApiError> {
        let path = format!("{}/", self.resource);
        let created: T = self
            .api
            .request_auth_json(&path, &self.session.token(), Method::POST, Some(json_body(fields)?))
            .await?;

        info!("{}: created #{}", self.resource, created.id());
        self.items.insert(0, created.clone());
        Ok(created)
    }

    /// Multipart flavour of `create`; same prepend rule
    pub async fn upload(&mut self, file: FileUpload) -> Result<T, ApiError> {
        let path = format!("{}/", self.resource);
        let created: T = self
            .api
            .upload_auth_json(&path, &self.session.token(), "file", file)
            .await?;

        info!("{}: uploaded #{}", self.resource, created.id());
        self.items.insert(0, created.clone());
        Ok(created)
    }

    /// A record that is not on the current page is left alone
    pub async fn update<F: Serialize>(&mut self, id: i64, fields: &F) -> Result<T, ApiError> {
        let path = format!("{}/{}", self.resource, id);
        let updated: T = self
            .api
            .request_auth_json(&path, &self.session.token(), Method::PUT, Some(json_body(fields)?))
            .await?;

        match self.items.iter_mut().find(|item| item.id() == id) {
            Some(slot) => *slot = updated.clone(),
            None => debug!("{}: #{} not on current page", self.resource, id),
        }
        Ok(updated)
    }

    pub async fn delete(&mut self, id: i64) -> Result<(), ApiError> {
        let path = format!("{}/{}", self.resource, id);
        let _: Value = self
            .api
            .request_auth_json(&path, &self.session.token(), Method::DELETE, None)
            .await?;

        info!("{}: deleted #{}", self.resource, id);
        self.items.retain(|item| item.id() != id);
        Ok(())
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.page = 0;
    }
}
