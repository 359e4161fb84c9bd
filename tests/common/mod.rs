#![allow(dead_code)]

use async_trait::async_trait;
use ats_client::core::transport::{HttpRequest, HttpResponse, Transport};
use ats_client::core::{MemoryTokenSlot, TokenSlot};
use ats_client::{ApiClient, ApiError, App, SessionStore};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

pub const EMPTY_LIST: &str = "[]";

enum Reply {
    Response(u16, String),
    Network(String),
}

/// Transport that answers from a queue and records what was sent.
#[derive(Default)]
pub struct ScriptedTransport {
    replies: Mutex<VecDeque<Reply>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl ScriptedTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn respond(&self, status: u16, body: &str) {
        self.replies
            .lock()
            .unwrap()
            .push_back(Reply::Response(status, body.to_string()));
    }

    pub fn fail_network(&self, message: &str) {
        self.replies
            .lock()
            .unwrap()
            .push_back(Reply::Network(message.to_string()));
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn last_request(&self) -> HttpRequest {
        self.requests
            .lock()
            .unwrap()
            .last()
            .cloned()
            .expect("no request was sent")
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        self.requests.lock().unwrap().push(request);
        match self.replies.lock().unwrap().pop_front() {
            Some(Reply::Response(status, body)) => Ok(HttpResponse { status, body }),
            Some(Reply::Network(message)) => Err(ApiError::Network(message)),
            None => Err(ApiError::Network("no scripted reply".to_string())),
        }
    }
}

pub fn app_with(transport: &Arc<ScriptedTransport>) -> App {
    app_with_slot(transport, MemoryTokenSlot::new())
}

pub fn app_with_slot(transport: &Arc<ScriptedTransport>, slot: impl TokenSlot + 'static) -> App {
    let session = Arc::new(SessionStore::restore(Box::new(slot)));
    App::new(ApiClient::new(transport.clone()), session, 10)
}

/// App that went through a successful login with `tok123`, with the
/// initial list loads answered by `jobs` and `resumes`.
pub async fn logged_in_app(transport: &Arc<ScriptedTransport>, jobs: &str, resumes: &str) -> App {
    transport.respond(200, r#"{"access_token":"tok123","token_type":"bearer","expires_in_minutes":60}"#);
    transport.respond(200, r#"{"id":1,"email":"a@x.com","full_name":null}"#);
    transport.respond(200, jobs);
    transport.respond(200, resumes);

    let mut app = app_with(transport);
    app.auth.email = "a@x.com".to_string();
    app.auth.password = "secret12".to_string();
    assert!(app.login().await);
    app
}

pub fn job_json(id: i64, title: &str) -> String {
    format!(
        r#"{{"id":{},"title":"{}","description":"...","skills":["go","sql"],"created_at":"2024-05-01T10:00:00Z"}}"#,
        id, title
    )
}

pub fn resume_json(id: i64, filename: &str, parsed: bool) -> String {
    format!(
        r#"{{"id":{},"filename":"{}","parsed":{},"skills":null,"created_at":"2024-05-01T10:00:00Z"}}"#,
        id, filename, parsed
    )
}
