//! Monitor state and the pure state-to-view mapping.
//!
//! [`MonitorState`] is the only state the monitor owns: the latest
//! snapshot, the last successfully submitted contact, and whether the live
//! feed has been activated. [`render`] turns it into a [`ViewState`]
//! describing every element of the page. Applying that view is someone
//! else's job.

use crate::contact::SavedContact;
use crate::messages::{FALL_DETECTED, LIVE_FEED_ACTIVATED, NO_DATA, NO_FALL_DETECTED};
use crate::status::{FallStatus, StatusSnapshot};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Shown,
    Hidden,
}

impl Visibility {
    pub fn from_flag(shown: bool) -> Self {
        if shown {
            Visibility::Shown
        } else {
            Visibility::Hidden
        }
    }

    pub fn is_shown(self) -> bool {
        matches!(self, Visibility::Shown)
    }
}

/// An element that carries text as well as a visibility.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextElement {
    pub visibility: Visibility,
    pub text: String,
}

impl TextElement {
    fn new(visibility: Visibility, text: impl Into<String>) -> Self {
        Self {
            visibility,
            text: text.into(),
        }
    }
}

/// Rendered state of every element on the monitoring page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
    pub live_feed: Visibility,
    pub status_label: TextElement,
    pub alert: Visibility,
    pub saved_email: TextElement,
    pub saved_phone: TextElement,
    pub saved_confidence: TextElement,
    /// The contact form itself. Hidden while a fall is detected.
    pub input_groups: Visibility,
}

/// Which event last wrote the status label text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Headline {
    Idle,
    LiveFeedActivated,
    Status(FallStatus),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonitorState {
    snapshot: Option<StatusSnapshot>,
    saved: Option<SavedContact>,
    live_feed: bool,
    headline: Headline,
}

impl Default for MonitorState {
    fn default() -> Self {
        Self::new()
    }
}

impl MonitorState {
    pub fn new() -> Self {
        Self {
            snapshot: None,
            saved: None,
            live_feed: false,
            headline: Headline::Idle,
        }
    }

    pub fn snapshot(&self) -> Option<StatusSnapshot> {
        self.snapshot
    }

    pub fn saved(&self) -> Option<&SavedContact> {
        self.saved.as_ref()
    }

    pub fn live_feed_active(&self) -> bool {
        self.live_feed
    }

    /// Replace the current snapshot. No history is kept.
    pub fn record_snapshot(&mut self, snapshot: StatusSnapshot) {
        self.snapshot = Some(snapshot);
        self.headline = Headline::Status(snapshot.status);
    }

    /// Record a successful submission: remember its values and activate the
    /// live feed.
    pub fn record_activation(&mut self, saved: SavedContact) {
        self.saved = Some(saved);
        self.live_feed = true;
        self.headline = Headline::LiveFeedActivated;
    }
}

/// Render the page for the given state.
pub fn render(state: &MonitorState) -> ViewState {
    let detected = state
        .snapshot
        .map(|snapshot| snapshot.status.is_detected())
        .unwrap_or(false);

    let headline = match state.headline {
        Headline::Idle => "",
        Headline::LiveFeedActivated => LIVE_FEED_ACTIVATED,
        Headline::Status(FallStatus::Detected) => FALL_DETECTED,
        Headline::Status(FallStatus::Clear) => NO_FALL_DETECTED,
    };

    let saved = state.saved.as_ref();
    let saved_field = |value: Option<&str>| {
        if detected {
            TextElement::new(Visibility::Shown, value.unwrap_or(NO_DATA))
        } else {
            TextElement::new(Visibility::Hidden, NO_DATA)
        }
    };

    ViewState {
        live_feed: Visibility::from_flag(state.live_feed),
        status_label: TextElement::new(Visibility::from_flag(state.live_feed), headline),
        alert: Visibility::from_flag(detected),
        saved_email: saved_field(saved.map(|s| s.email.as_str())),
        saved_phone: saved_field(saved.and_then(|s| s.phone.as_deref())),
        saved_confidence: saved_field(saved.and_then(|s| s.confidence.as_deref())),
        input_groups: Visibility::from_flag(!detected),
    }
}
