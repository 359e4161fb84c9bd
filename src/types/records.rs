// src/types/records.rs
//! Records mirrored from the server's job and resume collections

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Anything that lives in a server collection and is addressed by id.
pub trait Record: Clone + serde::de::DeserializeOwned + Send {
    fn id(&self) -> i64;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobRecord {
    pub id: i64,
    pub title: String,
    pub description: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub skills: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Record for JobRecord {
    fn id(&self) -> i64 {
        self.id
    }
}

impl fmt::Display for JobRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{} {}", self.id, self.title)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResumeRecord {
    pub id: i64,
    pub filename: String,
    pub parsed: bool,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub skills: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Record for ResumeRecord {
    fn id(&self) -> i64 {
        self.id
    }
}

impl fmt::Display for ResumeRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{} {} - parsed: {}", self.id, self.filename, self.parsed)
    }
}

/// Body of job create and update calls.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JobFields {
    pub title: String,
    pub description: String,
    pub skills: Vec<String>,
}

// The server stores skills as a nullable list
fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}
