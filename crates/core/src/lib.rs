//! `fallwatch-core` -- pure domain types for the fall-status monitor.
//!
//! Nothing in this crate performs I/O. The monitor crate feeds it
//! responses and form input; it hands back validated payloads and a
//! rendered [`view::ViewState`].

pub mod contact;
pub mod error;
pub mod messages;
pub mod status;
pub mod view;
