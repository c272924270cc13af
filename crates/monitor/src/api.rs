//! HTTP client for the fall-detection backend.
//!
//! [`MonitorBackend`] is the seam the monitor talks through;
//! [`FallwatchApi`] implements it over [`reqwest`] against the three
//! backend endpoints (`/send_details`, `/send_email`, `/fall_status`).

use async_trait::async_trait;
use fallwatch_core::contact::{ContactDetails, EmailRegistration, ServerMessage};
use fallwatch_core::error::CoreError;
use fallwatch_core::messages::DEFAULT_REJECTION_MESSAGE;
use fallwatch_core::status::{StatusResponse, StatusSnapshot};

/// Errors from the backend API layer.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The HTTP request itself failed (network, DNS, TLS, body decoding).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The backend returned a non-2xx status code.
    #[error("Backend rejected request ({status}): {message}")]
    Rejected {
        status: u16,
        /// Server-provided message, or a fallback when the body had none.
        message: String,
    },

    /// The status payload parsed but its value is not a known status.
    #[error("Invalid status payload: {0}")]
    InvalidStatus(#[from] CoreError),
}

impl ApiError {
    /// The text shown to the user for this failure.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Request(e) => e.to_string(),
            ApiError::Rejected { message, .. } => message.clone(),
            ApiError::InvalidStatus(e) => e.to_string(),
        }
    }
}

/// Operations the monitor needs from the backend.
#[async_trait]
pub trait MonitorBackend: Send + Sync {
    /// `POST /send_details`.
    async fn send_details(&self, details: &ContactDetails) -> Result<ServerMessage, ApiError>;

    /// `POST /send_email`.
    async fn send_email(&self, registration: &EmailRegistration)
        -> Result<ServerMessage, ApiError>;

    /// `GET /fall_status`, normalized.
    async fn fall_status(&self) -> Result<StatusSnapshot, ApiError>;
}

/// HTTP client for a single backend instance.
pub struct FallwatchApi {
    client: reqwest::Client,
    api_url: String,
}

impl FallwatchApi {
    /// Create a new API client.
    ///
    /// * `api_url` - Base HTTP URL without a trailing slash, e.g.
    ///   `http://host:5000`.
    pub fn new(api_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_url,
        }
    }

    /// Create an API client reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, api_url: String) -> Self {
        Self { client, api_url }
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    // ---- private helpers ----

    /// Ensure the response has a success status code.
    ///
    /// On failure the body is searched for a JSON `message`; failing that
    /// the raw text is used, and an empty body falls back to
    /// [`DEFAULT_REJECTION_MESSAGE`].
    async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        Err(ApiError::Rejected {
            status: status.as_u16(),
            message: rejection_message(&body),
        })
    }

    /// Parse a successful JSON response body into the expected type.
    async fn parse_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, ApiError> {
        let response = Self::ensure_success(response).await?;
        Ok(response.json::<T>().await?)
    }
}

/// Extract the user-facing message from a rejected response body.
fn rejection_message(body: &str) -> String {
    if let Ok(ServerMessage { message }) = serde_json::from_str::<ServerMessage>(body) {
        return message;
    }
    let trimmed = body.trim();
    if trimmed.is_empty() {
        DEFAULT_REJECTION_MESSAGE.to_string()
    } else {
        trimmed.to_string()
    }
}

#[async_trait]
impl MonitorBackend for FallwatchApi {
    async fn send_details(&self, details: &ContactDetails) -> Result<ServerMessage, ApiError> {
        let response = self
            .client
            .post(format!("{}/send_details", self.api_url))
            .json(details)
            .send()
            .await?;

        Self::parse_response(response).await
    }

    async fn send_email(
        &self,
        registration: &EmailRegistration,
    ) -> Result<ServerMessage, ApiError> {
        let response = self
            .client
            .post(format!("{}/send_email", self.api_url))
            .json(registration)
            .send()
            .await?;

        Self::parse_response(response).await
    }

    async fn fall_status(&self) -> Result<StatusSnapshot, ApiError> {
        let response = self
            .client
            .get(format!("{}/fall_status", self.api_url))
            .send()
            .await?;

        let body: StatusResponse = Self::parse_response(response).await?;
        Ok(StatusSnapshot::try_from(body)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejection_message_prefers_json_message() {
        assert_eq!(
            rejection_message(r#"{"message": "Invalid email address"}"#),
            "Invalid email address"
        );
    }

    #[test]
    fn rejection_message_falls_back_to_text_then_default() {
        assert_eq!(rejection_message("  upstream down \n"), "upstream down");
        assert_eq!(rejection_message(""), DEFAULT_REJECTION_MESSAGE);
        assert_eq!(rejection_message(r#"{"error": "x"}"#), r#"{"error": "x"}"#);
    }

    #[test]
    fn user_message_of_rejection_is_verbatim() {
        let err = ApiError::Rejected {
            status: 400,
            message: "Invalid phone".into(),
        };
        assert_eq!(err.user_message(), "Invalid phone");
    }
}
