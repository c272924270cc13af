//! Domain error type shared by the core and monitor crates.

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CoreError {
    /// User input failed validation. The message is shown to the user
    /// verbatim.
    #[error("{0}")]
    Validation(String),

    /// The backend sent a status label that maps to neither detected nor
    /// clear.
    #[error("Unrecognized fall status label: {0:?}")]
    UnrecognizedStatus(String),
}
