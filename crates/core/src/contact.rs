//! Contact submissions and the values saved from them.
//!
//! Form input arrives as raw strings. [`ContactDetails::from_form`] and
//! [`EmailRegistration::from_form`] trim and validate it; only a validated
//! value can be sent to the backend.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::messages::{DETAILS_VALIDATION_MESSAGE, EMAIL_VALIDATION_MESSAGE};

/// Payload of `POST /send_details`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactDetails {
    pub email: String,
    pub phone: String,
    /// Confidence threshold, kept as the user typed it.
    #[serde(rename = "conf")]
    pub confidence: String,
}

impl ContactDetails {
    /// Build a submission from raw form fields.
    ///
    /// Every field is trimmed; if any ends up empty the whole submission is
    /// rejected with [`DETAILS_VALIDATION_MESSAGE`].
    pub fn from_form(email: &str, phone: &str, confidence: &str) -> Result<Self, CoreError> {
        let (email, phone, confidence) = (email.trim(), phone.trim(), confidence.trim());

        if email.is_empty() || phone.is_empty() || confidence.is_empty() {
            return Err(CoreError::Validation(DETAILS_VALIDATION_MESSAGE.to_string()));
        }

        Ok(Self {
            email: email.to_string(),
            phone: phone.to_string(),
            confidence: confidence.to_string(),
        })
    }
}

/// Payload of `POST /send_email`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailRegistration {
    pub email: String,
}

impl EmailRegistration {
    pub fn from_form(email: &str) -> Result<Self, CoreError> {
        let email = email.trim();
        if email.is_empty() {
            return Err(CoreError::Validation(EMAIL_VALIDATION_MESSAGE.to_string()));
        }
        Ok(Self {
            email: email.to_string(),
        })
    }
}

/// JSON body returned by both submission endpoints, on success and failure.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ServerMessage {
    pub message: String,
}

/// Values of the last successful submission, shown in the saved-value
/// elements while a fall is detected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedContact {
    pub email: String,
    /// `None` when the submission was an e-mail registration.
    pub phone: Option<String>,
    pub confidence: Option<String>,
}

impl From<&ContactDetails> for SavedContact {
    fn from(details: &ContactDetails) -> Self {
        Self {
            email: details.email.clone(),
            phone: Some(details.phone.clone()),
            confidence: Some(details.confidence.clone()),
        }
    }
}

impl From<&EmailRegistration> for SavedContact {
    fn from(registration: &EmailRegistration) -> Self {
        Self {
            email: registration.email.clone(),
            phone: None,
            confidence: None,
        }
    }
}
