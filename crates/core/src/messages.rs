//! User-facing texts shown by the monitor.
//!
//! These are the canonical strings rendered into the view and raised as
//! alerts. Tests assert against these constants rather than literals.

/// Alert raised when any of the detail fields is empty.
pub const DETAILS_VALIDATION_MESSAGE: &str =
    "Please enter a valid Email address, Phone Number, and Confidence threshold";

/// Alert raised when the e-mail registration field is empty.
pub const EMAIL_VALIDATION_MESSAGE: &str = "Please enter a valid Email address";

/// Status label text after a successful submission.
pub const LIVE_FEED_ACTIVATED: &str = "Live feed activated.";

pub const FALL_DETECTED: &str = "Fall Detected";

pub const NO_FALL_DETECTED: &str = "No Fall Detected";

/// Placeholder for saved-value elements when there is nothing to show.
pub const NO_DATA: &str = "Could not get Data";

/// Fallback error text when a rejected submission carries no usable body.
pub const DEFAULT_REJECTION_MESSAGE: &str = "Invalid Details";
