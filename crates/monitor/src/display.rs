//! Terminal rendering of the monitoring page.
//!
//! [`TerminalView`] is the [`ViewSink`] used by the binary. It prints a
//! view only when it differs from the last one printed, so identical poll
//! results stay quiet.

use std::io::Write;
use std::sync::Mutex;

use chrono::Local;
use fallwatch_core::view::{TextElement, ViewState, Visibility};

use crate::monitor::ViewSink;

pub struct TerminalView {
    out: Mutex<Box<dyn Write + Send>>,
    last: Mutex<Option<ViewState>>,
}

impl TerminalView {
    pub fn stdout() -> Self {
        Self::new(Box::new(std::io::stdout()))
    }

    pub fn new(out: Box<dyn Write + Send>) -> Self {
        Self {
            out: Mutex::new(out),
            last: Mutex::new(None),
        }
    }

    /// Print a view unconditionally (used by the `view` command).
    pub fn print(&self, view: &ViewState) {
        self.write_block(&format_view(view));
    }

    fn write_block(&self, block: &str) {
        let stamp = Local::now().format("%H:%M:%S");
        let mut out = self.out.lock().unwrap_or_else(|p| p.into_inner());
        let _ = writeln!(out, "[{stamp}] {block}");
        let _ = out.flush();
    }
}

impl ViewSink for TerminalView {
    fn apply(&self, view: &ViewState) {
        // Held across the write so concurrent applies print in order.
        let mut last = self.last.lock().unwrap_or_else(|p| p.into_inner());
        if last.as_ref() == Some(view) {
            return;
        }
        self.write_block(&format_view(view));
        *last = Some(view.clone());
    }

    fn alert(&self, message: &str) {
        self.write_block(&format!("! {message}"));
    }
}

fn shown(visibility: Visibility) -> &'static str {
    match visibility {
        Visibility::Shown => "shown",
        Visibility::Hidden => "hidden",
    }
}

fn field(element: &TextElement) -> &str {
    if element.visibility.is_shown() {
        &element.text
    } else {
        "-"
    }
}

/// Format a view as a short multi-line block.
pub fn format_view(view: &ViewState) -> String {
    let headline = if view.status_label.visibility.is_shown() {
        view.status_label.text.as_str()
    } else {
        "Waiting for contact details"
    };

    let mut block = format!(
        "{headline}\n  live feed: {} | alert: {} | form: {}",
        shown(view.live_feed),
        shown(view.alert),
        shown(view.input_groups),
    );

    if view.alert.is_shown() {
        block.push_str(&format!(
            "\n  saved: email={} phone={} confidence={}",
            field(&view.saved_email),
            field(&view.saved_phone),
            field(&view.saved_confidence),
        ));
    }

    block
}
