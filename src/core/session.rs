// src/core/session.rs
//! Session store - owns the bearer token and its persisted slot

use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tokio::sync::watch;
use tracing::{debug, info, warn};

/// Key of the persisted token entry
pub const TOKEN_KEY: &str = "ats_token";

/// Durable key-value slot holding serialized values.
pub trait TokenSlot: Send + Sync {
    fn load(&self, key: &str) -> Result<Option<String>>;
    fn store(&self, key: &str, value: &str) -> Result<()>;
    fn remove(&self, key: &str) -> Result<()>;
}

/// JSON object on disk, one entry per key.
pub struct FileTokenSlot {
    path: PathBuf,
}

impl FileTokenSlot {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_entries(&self) -> Result<BTreeMap<String, String>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let content = std::fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read session file: {}", self.path.display()))?;
        if content.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse session file: {}", self.path.display()))
    }

    // An unreadable file is replaced rather than blocking new writes
    fn entries_or_empty(&self) -> BTreeMap<String, String> {
        self.read_entries().unwrap_or_else(|e| {
            warn!("Overwriting unreadable session file: {:#}", e);
            BTreeMap::new()
        })
    }

    fn write_entries(&self, entries: &BTreeMap<String, String>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create directory: {}", parent.display())
                })?;
            }
        }
        let content =
            serde_json::to_string_pretty(entries).context("Failed to serialize session")?;
        std::fs::write(&self.path, content)
            .with_context(|| format!("Failed to write session file: {}", self.path.display()))
    }
}

impl TokenSlot for FileTokenSlot {
    fn load(&self, key: &str) -> Result<Option<String>> {
        Ok(self.read_entries()?.remove(key))
    }

    fn store(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = self.entries_or_empty();
        entries.insert(key.to_string(), value.to_string());
        self.write_entries(&entries)
    }

    fn remove(&self, key: &str) -> Result<()> {
        let mut entries = self.entries_or_empty();
        if entries.remove(key).is_some() {
            self.write_entries(&entries)?;
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct MemoryTokenSlot {
    entries: Mutex<BTreeMap<String, String>>,
}

impl MemoryTokenSlot {
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> std::sync::MutexGuard<'_, BTreeMap<String, String>> {
        self.entries
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl TokenSlot for MemoryTokenSlot {
    fn load(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries().get(key).cloned())
    }

    fn store(&self, key: &str, value: &str) -> Result<()> {
        self.entries().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.entries().remove(key);
        Ok(())
    }
}

/// Process-wide session. Shared by `Arc`; watchers learn about token
/// changes through `subscribe`.
pub struct SessionStore {
    token: watch::Sender<String>,
    slot: Box<dyn TokenSlot>,
}

impl SessionStore {
    /// Empty session backed by `slot`, ignoring anything persisted there
    pub fn new(slot: Box<dyn TokenSlot>) -> Self {
        let (token, _) = watch::channel(String::new());
        Self { token, slot }
    }

    /// Session restored from `slot`. An unreadable entry starts empty.
    pub fn restore(slot: Box<dyn TokenSlot>) -> Self {
        let restored = match slot.load(TOKEN_KEY) {
            Ok(Some(raw)) => serde_json::from_str::<String>(&raw).unwrap_or_else(|e| {
                warn!("Ignoring corrupt persisted token: {}", e);
                String::new()
            }),
            Ok(None) => String::new(),
            Err(e) => {
                warn!("Failed to load persisted token: {:#}", e);
                String::new()
            }
        };

        if !restored.is_empty() {
            info!("Restored persisted session");
        }

        let (token, _) = watch::channel(restored);
        Self { token, slot }
    }

    pub fn token(&self) -> String {
        self.token.borrow().clone()
    }

    pub fn is_authenticated(&self) -> bool {
        !self.token.borrow().is_empty()
    }

    /// Set the in-memory token and try to persist it. Persistence failures
    /// are logged and otherwise ignored.
    pub fn set_token(&self, token: impl Into<String>) {
        let token = token.into();

        if let Err(e) = self.persist(&token) {
            warn!("Failed to persist session token: {:#}", e);
        }

        debug!("Session token {}", if token.is_empty() { "cleared" } else { "set" });
        self.token.send_replace(token);
    }

    pub fn logout(&self) {
        info!("Logging out");
        self.set_token("");
    }

    /// Receiver that observes every token change
    pub fn subscribe(&self) -> watch::Receiver<String> {
        self.token.subscribe()
    }

    fn persist(&self, token: &str) -> Result<()> {
        if token.is_empty() {
            self.slot.remove(TOKEN_KEY)
        } else {
            let serialized = serde_json::to_string(token).context("Failed to serialize token")?;
            self.slot.store(TOKEN_KEY, &serialized)
        }
    }
}
