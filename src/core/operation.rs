// src/core/operation.rs
//! Operation wrapper - loading flag plus one transient error or notice

use std::future::Future;
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::{debug, warn};

use crate::types::ApiError;

const FALLBACK_ERROR: &str = "Something went wrong";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Running,
}

#[derive(Debug, Default)]
struct OperationState {
    in_flight: usize,
    error: Option<String>,
    notice: Option<String>,
}

/// Runs UI-triggered operations and keeps the visual state for them.
///
/// Nothing here stops two operations from running at once. Trigger controls
/// are expected to check `is_running` and stay disabled meanwhile.
#[derive(Debug, Default)]
pub struct OperationRunner {
    state: Mutex<OperationState>,
}

impl OperationRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `operation` to completion. Returns its value on success; on
    /// failure the error message is kept for display and `None` comes back.
    pub async fn run<T, F>(&self, label: &str, operation: F) -> Option<T>
    where
        F: Future<Output = Result<T, ApiError>>,
    {
        {
            let mut state = self.state();
            state.error = None;
            state.notice = None;
            state.in_flight += 1;
        }
        debug!("{}: running", label);

        let outcome = operation.await;

        let mut state = self.state();
        state.in_flight = state.in_flight.saturating_sub(1);
        match outcome {
            Ok(value) => {
                debug!("{}: done", label);
                state.notice = Some(format!("{} succeeded", label));
                Some(value)
            }
            Err(e) => {
                warn!("{}: {}", label, e);
                state.error = Some(user_message(&e));
                None
            }
        }
    }

    /// Surface a failed required-field check without running anything
    pub fn reject(&self, message: &str) {
        let mut state = self.state();
        state.notice = None;
        state.error = Some(message.to_string());
    }

    pub fn phase(&self) -> Phase {
        if self.state().in_flight > 0 {
            Phase::Running
        } else {
            Phase::Idle
        }
    }

    pub fn is_running(&self) -> bool {
        self.phase() == Phase::Running
    }

    pub fn error(&self) -> Option<String> {
        self.state().error.clone()
    }

    /// Success notice, handed out once
    pub fn take_notice(&self) -> Option<String> {
        self.state().notice.take()
    }

    fn state(&self) -> MutexGuard<'_, OperationState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// The single message string shown for any API failure
pub fn user_message(err: &ApiError) -> String {
    let message = err.to_string();
    if message.trim().is_empty() {
        FALLBACK_ERROR.to_string()
    } else {
        message
    }
}
