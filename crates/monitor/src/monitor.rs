//! Form submission and status polling against a [`MonitorBackend`].
//!
//! [`Monitor`] owns the single [`MonitorState`]. Every completed call
//! updates it, re-renders the whole view and hands the result to a
//! [`ViewSink`]. The state lock is taken only once a response is in hand
//! and is held while the view is applied, so the order views reach the
//! sink is the order state was recorded: a submit and a poll racing each
//! other resolve last-write-wins.

use std::sync::Arc;

use fallwatch_core::contact::{ContactDetails, EmailRegistration, SavedContact};
use fallwatch_core::error::CoreError;
use fallwatch_core::status::StatusSnapshot;
use fallwatch_core::view::{render, MonitorState, ViewState};
use tokio::sync::Mutex;

use crate::api::{ApiError, MonitorBackend};

/// The effectful side of rendering: shows views and user alerts.
pub trait ViewSink: Send + Sync {
    /// Apply a fully rendered view, replacing whatever was shown before.
    ///
    /// Called with the monitor's state lock held; must not block on the
    /// monitor itself.
    fn apply(&self, view: &ViewState);

    /// Show a blocking, user-facing message.
    fn alert(&self, message: &str);
}

#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    #[error(transparent)]
    Validation(#[from] CoreError),

    #[error(transparent)]
    Api(#[from] ApiError),
}

pub struct Monitor {
    backend: Arc<dyn MonitorBackend>,
    sink: Arc<dyn ViewSink>,
    state: Mutex<MonitorState>,
}

impl Monitor {
    pub fn new(backend: Arc<dyn MonitorBackend>, sink: Arc<dyn ViewSink>) -> Self {
        Self {
            backend,
            sink,
            state: Mutex::new(MonitorState::new()),
        }
    }

    /// Validate and submit contact details.
    ///
    /// An empty field raises the validation alert and sends nothing. On
    /// success the server message is shown and the live feed activated. On
    /// failure `Error: <message>` is shown and the view is left alone.
    /// Returns the server message on success.
    pub async fn submit_details(
        &self,
        email: &str,
        phone: &str,
        confidence: &str,
    ) -> Result<String, SubmitError> {
        let details = match ContactDetails::from_form(email, phone, confidence) {
            Ok(details) => details,
            Err(e) => {
                tracing::warn!("Rejected incomplete contact details");
                self.sink.alert(&e.to_string());
                return Err(e.into());
            }
        };

        tracing::info!(email = %details.email, confidence = %details.confidence, "Submitting contact details");

        match self.backend.send_details(&details).await {
            Ok(reply) => {
                self.activate(SavedContact::from(&details), &reply.message).await;
                Ok(reply.message)
            }
            Err(e) => Err(self.report_submit_failure(e).into()),
        }
    }

    /// Validate and submit an e-mail-only registration.
    pub async fn register_email(&self, email: &str) -> Result<String, SubmitError> {
        let registration = match EmailRegistration::from_form(email) {
            Ok(registration) => registration,
            Err(e) => {
                tracing::warn!("Rejected empty e-mail registration");
                self.sink.alert(&e.to_string());
                return Err(e.into());
            }
        };

        tracing::info!(email = %registration.email, "Registering alert e-mail");

        match self.backend.send_email(&registration).await {
            Ok(reply) => {
                self.activate(SavedContact::from(&registration), &reply.message)
                    .await;
                Ok(reply.message)
            }
            Err(e) => Err(self.report_submit_failure(e).into()),
        }
    }

    /// Fetch the current status once and render it.
    ///
    /// Failures are logged and leave both state and view untouched.
    pub async fn poll_status(&self) -> Result<StatusSnapshot, ApiError> {
        match self.backend.fall_status().await {
            Ok(snapshot) => {
                tracing::debug!(status = ?snapshot.status, "Fall status updated");
                let mut state = self.state.lock().await;
                state.record_snapshot(snapshot);
                self.sink.apply(&render(&state));
                Ok(snapshot)
            }
            Err(e) => {
                tracing::error!(error = %e, "Error updating fall status");
                Err(e)
            }
        }
    }

    /// Render the view for the current state without side effects.
    pub async fn current_view(&self) -> ViewState {
        render(&*self.state.lock().await)
    }

    async fn activate(&self, saved: SavedContact, message: &str) {
        tracing::info!(reply = message, "Submission accepted, live feed activated");
        self.sink.alert(message);
        let mut state = self.state.lock().await;
        state.record_activation(saved);
        self.sink.apply(&render(&state));
    }

    fn report_submit_failure(&self, e: ApiError) -> ApiError {
        tracing::error!(error = %e, "Submission failed");
        self.sink.alert(&format!("Error: {}", e.user_message()));
        e
    }
}
