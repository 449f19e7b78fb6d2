//! Grading session state.
//!
//! One `GradingSession` exists per grading page. It owns progress and results,
//! and reports every transition as a [`SessionEvent`] on a bounded channel.
//! Dropping the session publishes [`SessionEvent::Closed`].

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use serde_json::Value;
use tokio::sync::mpsc;
use uuid::Uuid;

use crate::api::AnswerKeyBackend;
use crate::error::{ApiError, SessionError};

/// Events buffered per session before new ones are dropped.
pub const EVENT_QUEUE_CAPACITY: usize = 64;

#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    Started { total: usize },
    Progress { processed: usize, total: usize },
    Completed { results: usize },
    Failed { message: String },
    Closed,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum GradingState {
    #[default]
    Idle,
    Running { processed: usize, total: usize },
    Completed,
    Failed(String),
}

pub struct GradingSession {
    id: Uuid,
    state: GradingState,
    results: Vec<Value>,
    tx: mpsc::Sender<SessionEvent>,
}

impl GradingSession {
    /// New session and the receiving end of its event channel.
    #[must_use]
    pub fn new() -> (Self, mpsc::Receiver<SessionEvent>) {
        let (tx, rx) = mpsc::channel(EVENT_QUEUE_CAPACITY);
        let session = Self { id: Uuid::new_v4(), state: GradingState::Idle, results: Vec::new(), tx };
        tracing::debug!(session = %session.id, "grading session opened");
        (session, rx)
    }

    #[must_use]
    pub fn id(&self) -> Uuid {
        self.id
    }

    #[must_use]
    pub fn state(&self) -> &GradingState {
        &self.state
    }

    #[must_use]
    pub fn results(&self) -> &[Value] {
        &self.results
    }

    /// Begin grading `total` sheets. Results of a previous run are discarded.
    ///
    /// # Errors
    ///
    /// [`SessionError::AlreadyRunning`] while a run is in progress.
    pub fn start(&mut self, total: usize) -> Result<(), SessionError> {
        if matches!(self.state, GradingState::Running { .. }) {
            return Err(SessionError::AlreadyRunning);
        }
        self.state = GradingState::Running { processed: 0, total };
        self.results.clear();
        self.publish(SessionEvent::Started { total });
        Ok(())
    }

    /// Record how many sheets are done; clamped to the run's total.
    ///
    /// # Errors
    ///
    /// [`SessionError::NotRunning`] outside a run.
    pub fn progress(&mut self, processed: usize) -> Result<(), SessionError> {
        let GradingState::Running { total, .. } = self.state else {
            return Err(SessionError::NotRunning);
        };
        let processed = processed.min(total);
        self.state = GradingState::Running { processed, total };
        self.publish(SessionEvent::Progress { processed, total });
        Ok(())
    }

    /// Finish the run with the backend's per-sheet results.
    ///
    /// # Errors
    ///
    /// [`SessionError::NotRunning`] outside a run.
    pub fn complete(&mut self, results: Vec<Value>) -> Result<(), SessionError> {
        if !matches!(self.state, GradingState::Running { .. }) {
            return Err(SessionError::NotRunning);
        }
        let count = results.len();
        self.results = results;
        self.state = GradingState::Completed;
        tracing::info!(session = %self.id, results = count, "grading completed");
        self.publish(SessionEvent::Completed { results: count });
        Ok(())
    }

    /// Abort the run with a message for the operator.
    ///
    /// # Errors
    ///
    /// [`SessionError::NotRunning`] outside a run.
    pub fn fail(&mut self, message: impl Into<String>) -> Result<(), SessionError> {
        if !matches!(self.state, GradingState::Running { .. }) {
            return Err(SessionError::NotRunning);
        }
        let message = message.into();
        tracing::warn!(session = %self.id, %message, "grading failed");
        self.state = GradingState::Failed(message.clone());
        self.publish(SessionEvent::Failed { message });
        Ok(())
    }

    /// Upload a legacy answer spreadsheet bound to this session.
    ///
    /// # Errors
    ///
    /// Backend errors from the upload.
    pub async fn upload_answer_sheet(
        &self,
        backend: &dyn AnswerKeyBackend,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Result<Value, ApiError> {
        let session_id = self.id.to_string();
        tracing::info!(session = %session_id, file = file_name, size = bytes.len(), "uploading answer sheet");
        backend.upload_answer_sheet(&session_id, file_name, bytes).await
    }

    fn publish(&self, event: SessionEvent) {
        match self.tx.try_send(event) {
            Ok(()) => {}
            Err(mpsc::error::TrySendError::Full(event)) => {
                tracing::warn!(session = %self.id, ?event, "session event queue full; dropping event");
            }
            Err(mpsc::error::TrySendError::Closed(event)) => {
                tracing::debug!(session = %self.id, ?event, "session event receiver gone");
            }
        }
    }
}

impl Drop for GradingSession {
    fn drop(&mut self) {
        self.publish(SessionEvent::Closed);
        tracing::debug!(session = %self.id, "grading session closed");
    }
}
