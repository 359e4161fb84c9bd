use std::sync::Arc;
use tracing::{info, warn};

use crate::core::{ApiClient, SessionStore};
use crate::types::{ApiError, LoginRequest, SignupRequest, User};

pub struct AuthView {
    pub email: String,
    pub password: String,
    pub full_name: String,
    status: String,
    api: ApiClient,
    session: Arc<SessionStore>,
}

impl AuthView {
    pub fn new(api: ApiClient, session: Arc<SessionStore>) -> Self {
        Self {
            email: String::new(),
            password: String::new(),
            full_name: String::new(),
            status: String::new(),
            api,
            session,
        }
    }

    /// Last auth outcome, e.g. `Signed up: a@x.com`
    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn missing_field(&self) -> Option<&'static str> {
        if self.email.trim().is_empty() {
            Some("Email is required")
        } else if self.password.is_empty() {
            Some("Password is required")
        } else {
            None
        }
    }

    pub async fn signup(&mut self) -> Result<User, ApiError> {
        let full_name = self.full_name.trim();
        let payload = SignupRequest {
            email: self.email.clone(),
            password: self.password.clone(),
            full_name: (!full_name.is_empty()).then(|| full_name.to_string()),
        };

        let user = self.api.signup(&payload).await?;
        info!("Signed up {}", user.email);
        self.status = format!("Signed up: {}", user.email);
        Ok(user)
    }

    /// Store the issued token, then confirm it against `/auth/me`.
    /// A failed confirmation only changes the status line.
    pub async fn login(&mut self) -> Result<(), ApiError> {
        let payload = LoginRequest {
            email: self.email.clone(),
            password: self.password.clone(),
        };

        let issued = self.api.login(&payload).await?;
        self.session.set_token(issued.access_token);
        self.password.clear();

        match self.api.me(&self.session.token()).await {
            Ok(user) => self.status = format!("Logged in as {}", user.email),
            Err(e) => {
                warn!("Token issued but /auth/me failed: {}", e);
                self.status = "Auth error".to_string();
            }
        }
        Ok(())
    }

    pub async fn whoami(&mut self) -> Result<User, ApiError> {
        let user = self.api.me(&self.session.token()).await?;
        self.status = format!("Logged in as {}", user.email);
        Ok(user)
    }

    pub fn logout(&mut self) {
        self.session.logout();
        self.status = "Not logged in".to_string();
    }
}
