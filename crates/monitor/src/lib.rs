//! `fallwatch-monitor` library crate.
//!
//! Re-exports internal modules for integration testing. The binary
//! entrypoint lives in `main.rs`.

pub mod api;
pub mod config;
pub mod display;
pub mod input;
pub mod monitor;
pub mod poller;
