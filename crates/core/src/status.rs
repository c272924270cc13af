//! Fall status wire format and its normalized form.
//!
//! `GET /fall_status` answers `{"status": <bool | string>}`. Backends
//! disagree on which shape they send, so both are accepted and folded into
//! a two-state [`FallStatus`]. A string label that is not recognised is an
//! error rather than a guess.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Labels (lowercased, trimmed) meaning a fall is currently detected.
const DETECTED_LABELS: &[&str] = &["fall detected", "fall", "detected", "true", "yes", "1"];

/// Labels (lowercased, trimmed) meaning no fall is detected.
const CLEAR_LABELS: &[&str] = &[
    "no fall detected",
    "no fall",
    "clear",
    "false",
    "no",
    "0",
    "none",
    "",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FallStatus {
    Detected,
    Clear,
}

impl FallStatus {
    pub fn is_detected(self) -> bool {
        matches!(self, FallStatus::Detected)
    }
}

impl From<bool> for FallStatus {
    fn from(detected: bool) -> Self {
        if detected {
            FallStatus::Detected
        } else {
            FallStatus::Clear
        }
    }
}

/// Raw `status` value as sent by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum RawStatus {
    Flag(bool),
    Label(String),
}

impl RawStatus {
    pub fn normalize(&self) -> Result<FallStatus, CoreError> {
        match self {
            RawStatus::Flag(flag) => Ok(FallStatus::from(*flag)),
            RawStatus::Label(label) => {
                let key = label.trim().to_ascii_lowercase();
                if DETECTED_LABELS.contains(&key.as_str()) {
                    Ok(FallStatus::Detected)
                } else if CLEAR_LABELS.contains(&key.as_str()) {
                    Ok(FallStatus::Clear)
                } else {
                    Err(CoreError::UnrecognizedStatus(label.clone()))
                }
            }
        }
    }
}

/// JSON body of `GET /fall_status`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StatusResponse {
    pub status: RawStatus,
}

/// The most recently fetched status. Each poll replaces it wholesale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusSnapshot {
    pub status: FallStatus,
}

impl StatusSnapshot {
    pub fn new(status: FallStatus) -> Self {
        Self { status }
    }
}

impl TryFrom<StatusResponse> for StatusSnapshot {
    type Error = CoreError;

    fn try_from(response: StatusResponse) -> Result<Self, Self::Error> {
        Ok(Self::new(response.status.normalize()?))
    }
}
