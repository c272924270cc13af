#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};

use fallwatch_core::contact::{ContactDetails, EmailRegistration, ServerMessage};
use fallwatch_core::status::{FallStatus, StatusSnapshot};
use fallwatch_core::view::ViewState;
use fallwatch_monitor::api::{ApiError, FallwatchApi, MonitorBackend};
use fallwatch_monitor::monitor::{Monitor, ViewSink};

/// Canned reply for one endpoint: status code plus JSON body.
#[derive(Clone)]
pub struct Reply {
    pub status: StatusCode,
    pub body: Value,
}

impl Reply {
    pub fn ok(body: Value) -> Self {
        Self {
            status: StatusCode::OK,
            body,
        }
    }

    pub fn error(status: StatusCode, message: &str) -> Self {
        Self {
            status,
            body: json!({ "message": message }),
        }
    }
}

/// Programmable in-process backend exposing the three monitor endpoints.
#[derive(Clone)]
pub struct MockBackend {
    details_reply: Arc<Mutex<Reply>>,
    email_reply: Arc<Mutex<Reply>>,
    status_reply: Arc<Mutex<Reply>>,
    details_calls: Arc<AtomicUsize>,
    email_calls: Arc<AtomicUsize>,
    status_calls: Arc<AtomicUsize>,
    last_details: Arc<Mutex<Option<Value>>>,
}

impl Default for MockBackend {
    fn default() -> Self {
        Self {
            details_reply: Arc::new(Mutex::new(Reply::ok(
                json!({ "message": "Details saved successfully!" }),
            ))),
            email_reply: Arc::new(Mutex::new(Reply::ok(
                json!({ "message": "Email saved successfully!" }),
            ))),
            status_reply: Arc::new(Mutex::new(Reply::ok(json!({ "status": false })))),
            details_calls: Arc::default(),
            email_calls: Arc::default(),
            status_calls: Arc::default(),
            last_details: Arc::default(),
        }
    }
}

impl MockBackend {
    pub fn set_details_reply(&self, reply: Reply) {
        *self.details_reply.lock().unwrap() = reply;
    }

    pub fn set_email_reply(&self, reply: Reply) {
        *self.email_reply.lock().unwrap() = reply;
    }

    pub fn set_status_reply(&self, reply: Reply) {
        *self.status_reply.lock().unwrap() = reply;
    }

    pub fn set_status(&self, status: Value) {
        self.set_status_reply(Reply::ok(json!({ "status": status })));
    }

    pub fn details_calls(&self) -> usize {
        self.details_calls.load(Ordering::SeqCst)
    }

    pub fn email_calls(&self) -> usize {
        self.email_calls.load(Ordering::SeqCst)
    }

    pub fn status_calls(&self) -> usize {
        self.status_calls.load(Ordering::SeqCst)
    }

    pub fn last_details(&self) -> Option<Value> {
        self.last_details.lock().unwrap().clone()
    }

    /// Serve the mock on an ephemeral port and return its base URL.
    pub async fn spawn(&self) -> String {
        let app = Router::new()
            .route("/send_details", post(send_details))
            .route("/send_email", post(send_email))
            .route("/fall_status", get(fall_status))
            .with_state(self.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        format!("http://{addr}")
    }
}

fn respond(reply: &Mutex<Reply>) -> (StatusCode, Json<Value>) {
    let reply = reply.lock().unwrap().clone();
    (reply.status, Json(reply.body))
}

async fn send_details(
    State(mock): State<MockBackend>,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    mock.details_calls.fetch_add(1, Ordering::SeqCst);
    *mock.last_details.lock().unwrap() = Some(body);
    respond(&mock.details_reply)
}

async fn send_email(State(mock): State<MockBackend>) -> (StatusCode, Json<Value>) {
    mock.email_calls.fetch_add(1, Ordering::SeqCst);
    respond(&mock.email_reply)
}

async fn fall_status(State(mock): State<MockBackend>) -> (StatusCode, Json<Value>) {
    mock.status_calls.fetch_add(1, Ordering::SeqCst);
    respond(&mock.status_reply)
}

/// Sink that records every applied view and alert.
#[derive(Default)]
pub struct RecordingSink {
    views: Mutex<Vec<ViewState>>,
    alerts: Mutex<Vec<String>>,
}

impl RecordingSink {
    pub fn views(&self) -> Vec<ViewState> {
        self.views.lock().unwrap().clone()
    }

    pub fn last_view(&self) -> Option<ViewState> {
        self.views.lock().unwrap().last().cloned()
    }

    pub fn alerts(&self) -> Vec<String> {
        self.alerts.lock().unwrap().clone()
    }
}

impl ViewSink for RecordingSink {
    fn apply(&self, view: &ViewState) {
        self.views.lock().unwrap().push(view.clone());
    }

    fn alert(&self, message: &str) {
        self.alerts.lock().unwrap().push(message.to_string());
    }
}

/// Build a monitor wired to `base_url` with a fresh recording sink.
pub fn monitor_for(base_url: &str) -> (Arc<Monitor>, Arc<RecordingSink>) {
    let sink = Arc::new(RecordingSink::default());
    let api = Arc::new(FallwatchApi::new(base_url.to_string()));
    let monitor = Arc::new(Monitor::new(api, sink.clone()));
    (monitor, sink)
}

/// In-memory backend that answers status polls from a script, for tests
/// that run on paused time and must not touch the network.
#[derive(Default)]
pub struct ScriptedBackend {
    statuses: Mutex<std::collections::VecDeque<Result<FallStatus, u16>>>,
    polls: AtomicUsize,
}

impl ScriptedBackend {
    pub fn new(statuses: impl IntoIterator<Item = Result<FallStatus, u16>>) -> Self {
        Self {
            statuses: Mutex::new(statuses.into_iter().collect()),
            polls: AtomicUsize::new(0),
        }
    }

    pub fn polls(&self) -> usize {
        self.polls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl MonitorBackend for ScriptedBackend {
    async fn send_details(&self, _details: &ContactDetails) -> Result<ServerMessage, ApiError> {
        Ok(ServerMessage {
            message: "Details saved successfully!".into(),
        })
    }

    async fn send_email(
        &self,
        _registration: &EmailRegistration,
    ) -> Result<ServerMessage, ApiError> {
        Ok(ServerMessage {
            message: "Email saved successfully!".into(),
        })
    }

    async fn fall_status(&self) -> Result<StatusSnapshot, ApiError> {
        self.polls.fetch_add(1, Ordering::SeqCst);
        // Once the script runs out the last answer is "clear".
        let next = self
            .statuses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Ok(FallStatus::Clear));
        match next {
            Ok(status) => Ok(StatusSnapshot::new(status)),
            Err(status) => Err(ApiError::Rejected {
                status,
                message: "scripted failure".into(),
            }),
        }
    }
}
