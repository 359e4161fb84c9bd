use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

// ===== Auth Payloads =====

#[derive(Debug, Clone, Serialize)]
pub struct SignupRequest {
    pub email: String,
    pub password: String,
    pub full_name: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

// ===== Service Response Types =====

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(default)]
    pub id: Option<i64>,
    pub email: String,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessToken {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
    #[serde(default)]
    pub expires_in_minutes: Option<u64>,
}

/// Transient score shown after a match call.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub score: f64,
}

impl fmt::Display for MatchResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Score: {}%", self.score)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_match_result_display() {
        let result: MatchResult = serde_json::from_str(r#"{"score":82}"#).unwrap();
        assert_eq!(result.to_string(), "Score: 82%");

        let result = MatchResult { score: 67.5 };
        assert_eq!(result.to_string(), "Score: 67.5%");
    }

    #[test]
    fn test_signup_serializes_null_full_name() {
        let payload = SignupRequest {
            email: "a@x.com".to_string(),
            password: "p".to_string(),
            full_name: None,
        };
        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"email": "a@x.com", "password": "p", "full_name": null})
        );
    }
}
