//! `fallwatch-monitor` -- fall-status monitor client.
//!
//! Polls the fall-detection backend for the current status, renders it to
//! the terminal, and submits contact details typed on stdin.
//!
//! # Environment variables
//!
//! | Variable                     | Required | Default                 | Description                      |
//! |------------------------------|----------|-------------------------|----------------------------------|
//! | `FALLWATCH_BACKEND_URL`      | no       | `http://127.0.0.1:5000` | Backend base URL                 |
//! | `FALLWATCH_POLL_INTERVAL_MS` | no       | `1000`                  | Milliseconds between polls       |
//! | `FALLWATCH_EMAIL`            | no       | --                      | Submit at startup                |
//! | `FALLWATCH_PHONE`            | no       | --                      | With e-mail and confidence       |
//! | `FALLWATCH_CONFIDENCE`       | no       | --                      | Confidence threshold             |

use std::sync::Arc;
use std::time::Duration;

use fallwatch_monitor::api::FallwatchApi;
use fallwatch_monitor::config::{MonitorConfig, StartupSubmission};
use fallwatch_monitor::display::TerminalView;
use fallwatch_monitor::input;
use fallwatch_monitor::monitor::Monitor;
use fallwatch_monitor::poller;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// How long to wait for the poll loop to wind down on shutdown.
const SHUTDOWN_GRACE: Duration = Duration::from_secs(5);

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "fallwatch_monitor=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = MonitorConfig::from_env().unwrap_or_else(|e| {
        tracing::error!(error = %e, "Invalid configuration");
        std::process::exit(1);
    });

    tracing::info!(
        backend_url = %config.backend_url,
        poll_interval = ?config.poll_interval,
        "Starting fallwatch-monitor",
    );

    let view = Arc::new(TerminalView::stdout());
    let backend = Arc::new(FallwatchApi::new(config.backend_url.clone()));
    let monitor = Arc::new(Monitor::new(backend, view.clone()));
    let cancel = CancellationToken::new();

    let poll_handle = tokio::spawn(poller::run(
        Arc::clone(&monitor),
        config.poll_interval,
        cancel.clone(),
    ));

    match &config.startup {
        Some(StartupSubmission::Details {
            email,
            phone,
            confidence,
        }) => {
            let _ = monitor.submit_details(email, phone, confidence).await;
        }
        Some(StartupSubmission::Email(email)) => {
            let _ = monitor.register_email(email).await;
        }
        None => {}
    }

    println!("{}", input::USAGE);
    let input_handle = tokio::spawn(input::run(
        tokio::io::BufReader::new(tokio::io::stdin()),
        Arc::clone(&monitor),
        view,
        cancel.clone(),
    ));

    tokio::select! {
        () = shutdown_signal() => cancel.cancel(),
        () = cancel.cancelled() => {}
    }

    match tokio::time::timeout(SHUTDOWN_GRACE, poll_handle).await {
        Ok(Ok(polls)) => tracing::info!(polls, "Poll loop stopped"),
        Ok(Err(e)) => tracing::error!(error = %e, "Poll loop task failed"),
        Err(_) => tracing::warn!("Poll loop did not stop in time"),
    }
    // Stdin reads cannot be interrupted; don't wait on them.
    input_handle.abort();

    tracing::info!("Shutdown complete");
}

/// Wait for SIGINT (Ctrl-C) or, on Unix, SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), shutting down");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, shutting down");
        }
    }
}
