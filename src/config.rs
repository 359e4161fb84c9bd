// src/config.rs
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

pub const DEFAULT_CONFIG_FILE: &str = "ats-client.yaml";
const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:8000";
const DEFAULT_PAGE_SIZE: u32 = 10;
const DEFAULT_SESSION_FILE: &str = ".ats-session.json";
const DEFAULT_LOG_FILE: &str = "ats-client.log";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub api_base_url: String,
    pub page_size: u32,
    pub session_path: PathBuf,
    pub log_path: PathBuf,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            session_path: PathBuf::from(DEFAULT_SESSION_FILE),
            log_path: std::env::temp_dir().join(DEFAULT_LOG_FILE),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    local: Option<ClientConfig>,
    #[serde(default)]
    production: Option<ClientConfig>,
}

impl ClientConfig {
    /// Load configuration for the current environment.
    ///
    /// An explicit `path` must exist. Without one, `ats-client.yaml` in the
    /// current directory is used when present, defaults otherwise.
    /// `ATS_API_URL` overrides the base url either way.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let environment = Self::get_environment();
        info!("Loading configuration for environment: {}", environment);

        let config = match path {
            Some(path) => Self::load_from_file(path, &environment)?,
            None => {
                let default = PathBuf::from(DEFAULT_CONFIG_FILE);
                if default.exists() {
                    Self::load_from_file(&default, &environment)?
                } else {
                    Self::default()
                }
            }
        };

        config
            .with_api_url_override(std::env::var("ATS_API_URL").ok())
            .finalize()
    }

    fn get_environment() -> String {
        std::env::var("ATS_ENV")
            .or_else(|_| std::env::var("ENVIRONMENT"))
            .unwrap_or_else(|_| "local".to_string())
    }

    fn load_from_file(path: &Path, environment: &str) -> Result<Self> {
        if !path.exists() {
            anyhow::bail!("Config file not found: {}", path.display());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;

        Self::from_yaml(&content, environment)
            .with_context(|| format!("Failed to parse {}", path.display()))
    }

    /// Pick the section for `environment`; a missing section means defaults
    pub fn from_yaml(content: &str, environment: &str) -> Result<Self> {
        let config_file: ConfigFile = serde_yaml::from_str(content)?;

        let section = match environment {
            "production" => config_file.production,
            _ => config_file.local,
        };

        Ok(section.unwrap_or_default())
    }

    pub fn with_api_url_override(mut self, api_url: Option<String>) -> Self {
        if let Some(url) = api_url.filter(|u| !u.trim().is_empty()) {
            self.api_base_url = url;
        }
        self
    }

    /// Validate and make paths absolute
    pub fn finalize(self) -> Result<Self> {
        if self.page_size == 0 {
            anyhow::bail!("page_size must be at least 1");
        }
        if self.api_base_url.trim().is_empty() {
            anyhow::bail!("api_base_url must not be empty");
        }

        Ok(Self {
            api_base_url: self.api_base_url.trim_end_matches('/').to_string(),
            page_size: self.page_size,
            session_path: Self::resolve_path(&self.session_path)?,
            log_path: Self::resolve_path(&self.log_path)?,
        })
    }

    fn resolve_path(path: &Path) -> Result<PathBuf> {
        if path.is_absolute() {
            Ok(path.to_path_buf())
        } else {
            let current_dir = std::env::current_dir().context("Failed to get current directory")?;
            Ok(current_dir.join(path))
        }
    }
}
