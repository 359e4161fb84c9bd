//! Scripted transport for unit tests

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use crate::core::transport::{HttpRequest, HttpResponse, Transport};
use crate::types::ApiError;

enum Reply {
    Response(HttpResponse),
    Network(String),
}

/// Replays queued replies in order and records every request it sees.
pub struct ScriptedTransport {
    replies: Mutex<VecDeque<Reply>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl ScriptedTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(VecDeque::new()),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn respond(&self, status: u16, body: &str) {
        self.replies.lock().unwrap().push_back(Reply::Response(HttpResponse {
            status,
            body: body.to_string(),
        }));
    }

    pub fn fail_network(&self, message: &str) {
        self.replies
            .lock()
            .unwrap()
            .push_back(Reply::Network(message.to_string()));
    }

    pub fn last_request(&self) -> Option<HttpRequest> {
        self.requests.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        self.requests.lock().unwrap().push(request);
        match self.replies.lock().unwrap().pop_front() {
            Some(Reply::Response(response)) => Ok(response),
            Some(Reply::Network(message)) => Err(ApiError::Network(message)),
            None => Err(ApiError::Network("no scripted reply".to_string())),
        }
    }
}
