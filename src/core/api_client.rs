// src/core/api_client.rs
//! Unified ATS API client - JSON in, JSON out, bearer auth on top

use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use tracing::{error, info, trace};

use crate::core::transport::{
    FileUpload, HttpRequest, HttpResponse, RequestBody, ReqwestTransport, Transport,
};
use crate::types::{AccessToken, ApiError, LoginRequest, MatchResult, SignupRequest, User};

const SIGNUP_ENDPOINT: &str = "/auth/signup";
const LOGIN_ENDPOINT: &str = "/auth/login";
const ME_ENDPOINT: &str = "/auth/me";
const MATCHING_ENDPOINT: &str = "/matching";

const JSON_CONTENT_TYPE: &str = "application/json";

#[derive(Clone)]
pub struct ApiClient {
    transport: Arc<dyn Transport>,
}

impl ApiClient {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Client over a real HTTP connection to `base_url`
    pub fn from_base_url(base_url: &str) -> anyhow::Result<Self> {
        let transport = ReqwestTransport::new(base_url)?;
        info!("API client targeting {}", transport.base_url());
        Ok(Self::new(Arc::new(transport)))
    }

    /// Send a JSON request and decode the JSON answer.
    ///
    /// `Content-Type: application/json` is always set unless one of
    /// `extra_headers` carries its own `Content-Type`.
    pub async fn request_json<R>(
        &self,
        path: &str,
        method: Method,
        body: Option<Value>,
        extra_headers: &[(&str, &str)],
    ) -> Result<R, ApiError>
    where
        R: DeserializeOwned,
    {
        let mut headers = vec![("Content-Type".to_string(), JSON_CONTENT_TYPE.to_string())];
        for (name, value) in extra_headers {
            headers.retain(|(existing, _)| !existing.eq_ignore_ascii_case(name));
            headers.push((name.to_string(), value.to_string()));
        }

        let body = match body {
            Some(value) => RequestBody::Json(value.to_string()),
            None => RequestBody::Empty,
        };

        self.execute(HttpRequest {
            method,
            path: path.to_string(),
            headers,
            body,
        })
        .await
    }

    /// `request_json` with `Authorization: Bearer <token>`
    pub async fn request_auth_json<R>(
        &self,
        path: &str,
        token: &str,
        method: Method,
        body: Option<Value>,
    ) -> Result<R, ApiError>
    where
        R: DeserializeOwned,
    {
        let authorization = bearer(token);
        self.request_json(path, method, body, &[("Authorization", authorization.as_str())])
            .await
    }

    /// Multipart upload of a single file under `field`. No JSON content type
    /// is sent; the multipart encoder sets its own boundary header.
    pub async fn upload_auth_json<R>(
        &self,
        path: &str,
        token: &str,
        field: &str,
        file: FileUpload,
    ) -> Result<R, ApiError>
    where
        R: DeserializeOwned,
    {
        info!("Uploading {} ({} bytes) to {}", file.file_name, file.bytes.len(), path);

        self.execute(HttpRequest {
            method: Method::POST,
            path: path.to_string(),
            headers: vec![("Authorization".to_string(), bearer(token))],
            body: RequestBody::Multipart {
                field: field.to_string(),
                file,
            },
        })
        .await
    }

    pub async fn signup(&self, payload: &SignupRequest) -> Result<User, ApiError> {
        self.request_json(SIGNUP_ENDPOINT, Method::POST, Some(json_body(payload)?), &[])
            .await
    }

    pub async fn login(&self, payload: &LoginRequest) -> Result<AccessToken, ApiError> {
        self.request_json(LOGIN_ENDPOINT, Method::POST, Some(json_body(payload)?), &[])
            .await
    }

    pub async fn me(&self, token: &str) -> Result<User, ApiError> {
        self.request_auth_json(ME_ENDPOINT, token, Method::GET, None)
            .await
    }

    /// Ids are passed through as typed by the user
    pub async fn match_score(
        &self,
        token: &str,
        resume_id: &str,
        job_id: &str,
    ) -> Result<MatchResult, ApiError> {
        let path = format!(
            "{}/resume/{}/job/{}",
            MATCHING_ENDPOINT, resume_id, job_id
        );
        self.request_auth_json(&path, token, Method::GET, None)
            .await
    }

    async fn execute<R>(&self, request: HttpRequest) -> Result<R, ApiError>
    where
        R: DeserializeOwned,
    {
        let method = request.method.clone();
        let path = request.path.clone();

        let response = self.transport.send(request).await.map_err(|e| {
            error!("{} {} failed: {}", method, path, e);
            e
        })?;

        trace!("{} {} -> {}", method, path, response.status);
        decode_response(response).map_err(|e| {
            error!("{} {} returned error: {}", method, path, e);
            e
        })
    }
}

/// Serialize a request payload into a JSON body
pub fn json_body<T: Serialize>(payload: &T) -> Result<Value, ApiError> {
    Ok(serde_json::to_value(payload)?)
}

fn bearer(token: &str) -> String {
    format!("Bearer {}", token)
}

// An empty 2xx body decodes as `null`
fn decode_response<R: DeserializeOwned>(response: HttpResponse) -> Result<R, ApiError> {
    if !response.is_success() {
        return Err(ApiError::from_status(response.status, &response.body));
    }

    if response.body.trim().is_empty() {
        return Ok(serde_json::from_value(Value::Null)?);
    }

    Ok(serde_json::from_str(&response.body)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::ScriptedTransport;

    fn client_with(transport: &Arc<ScriptedTransport>) -> ApiClient {
        ApiClient::new(transport.clone())
    }

    #[tokio::test]
    async fn test_request_json_sets_json_content_type() {
        let transport = ScriptedTransport::new();
        transport.respond(200, r#"{"ok":true}"#);

        let client = client_with(&transport);
        let value: Value = client
            .request_json("/anything", Method::POST, Some(serde_json::json!({"a": 1})), &[])
            .await
            .unwrap();

        assert_eq!(value, serde_json::json!({"ok": true}));
        let sent = transport.last_request().unwrap();
        assert_eq!(sent.header("content-type"), Some("application/json"));
        assert_eq!(sent.header("Authorization"), None);
    }

    #[tokio::test]
    async fn test_extra_content_type_overrides_default() {
        let transport = ScriptedTransport::new();
        transport.respond(200, "null");

        let client = client_with(&transport);
        let _: Value = client
            .request_json("/x", Method::GET, None, &[("content-type", "text/plain")])
            .await
            .unwrap();

        let sent = transport.last_request().unwrap();
        let content_types: Vec<_> = sent
            .headers
            .iter()
            .filter(|(name, _)| name.eq_ignore_ascii_case("content-type"))
            .collect();
        assert_eq!(content_types.len(), 1);
        assert_eq!(sent.header("Content-Type"), Some("text/plain"));
    }

    #[tokio::test]
    async fn test_auth_request_carries_bearer_token() {
        let transport = ScriptedTransport::new();
        transport.respond(200, r#"{"email":"a@x.com"}"#);

        let user = client_with(&transport).me("tok123").await.unwrap();
        assert_eq!(user.email, "a@x.com");

        let sent = transport.last_request().unwrap();
        assert_eq!(sent.path, "/auth/me");
        assert_eq!(sent.header("Authorization"), Some("Bearer tok123"));
    }

    #[tokio::test]
    async fn test_non_success_surfaces_body_text() {
        let transport = ScriptedTransport::new();
        transport.respond(500, "boom");

        let err = client_with(&transport)
            .request_json::<Value>("/jobs/", Method::GET, None, &[])
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Request { status: 500, .. }));
        assert_eq!(err.to_string(), "boom");
    }

    #[tokio::test]
    async fn test_malformed_json_is_decode_error() {
        let transport = ScriptedTransport::new();
        transport.respond(200, "{not json");

        let err = client_with(&transport)
            .request_json::<Value>("/jobs/", Method::GET, None, &[])
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }

    #[tokio::test]
    async fn test_network_failure_passes_through() {
        let transport = ScriptedTransport::new();
        transport.fail_network("connection refused");

        let err = client_with(&transport).me("t").await.unwrap_err();
        assert!(matches!(err, ApiError::Network(_)));
    }

    #[tokio::test]
    async fn test_empty_success_body_is_null() {
        let transport = ScriptedTransport::new();
        transport.respond(204, "");

        let value: Value = client_with(&transport)
            .request_auth_json("/jobs/3", "t", Method::DELETE, None)
            .await
            .unwrap();
        assert_eq!(value, Value::Null);
    }

    #[tokio::test]
    async fn test_upload_is_multipart_without_json_header() {
        let transport = ScriptedTransport::new();
        transport.respond(200, r#"{"id":1,"filename":"cv.txt","parsed":false}"#);

        let file = FileUpload {
            file_name: "cv.txt".to_string(),
            content_type: "text/plain".to_string(),
            bytes: b"Python, SQL".to_vec(),
        };
        let _: Value = client_with(&transport)
            .upload_auth_json("/resumes/", "tok", "file", file)
            .await
            .unwrap();

        let sent = transport.last_request().unwrap();
        assert_eq!(sent.header("Content-Type"), None);
        assert_eq!(sent.header("Authorization"), Some("Bearer tok"));
        match sent.body {
            RequestBody::Multipart { field, file } => {
                assert_eq!(field, "file");
                assert_eq!(file.bytes, b"Python, SQL".to_vec());
            }
            other => panic!("expected multipart body, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_match_score_path() {
        let transport = ScriptedTransport::new();
        transport.respond(200, r#"{"score":82}"#);

        let result = client_with(&transport)
            .match_score("tok", "4", "9")
            .await
            .unwrap();
        assert_eq!(result.to_string(), "Score: 82%");
        assert_eq!(
            transport.last_request().unwrap().path,
            "/matching/resume/4/job/9"
        );
    }
}
