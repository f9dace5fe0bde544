//! A fake Syncthing REST API on 127.0.0.1 for exercising the real HTTP client.
#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::extract::{Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, post};
use axum::Router;
use serde_json::{json, Value};
use tokio::net::TcpListener;

pub fn converged_json() -> Value {
    json!({
        "globalBytes": 2048, "localBytes": 2048,
        "globalDeleted": 1, "localDeleted": 1,
        "globalFiles": 8, "localFiles": 8,
        "inSyncBytes": 2048, "inSyncFiles": 8,
        "needBytes": 0, "needFiles": 0,
        "state": "idle"
    })
}

pub fn pending_json(need_bytes: u64) -> Value {
    json!({
        "globalBytes": 2048, "localBytes": 2048,
        "globalDeleted": 1, "localDeleted": 1,
        "globalFiles": 8, "localFiles": 8,
        "inSyncBytes": 2048 - need_bytes, "inSyncFiles": 7,
        "needBytes": need_bytes, "needFiles": 1,
        "state": "syncing"
    })
}

#[derive(Default)]
struct DaemonState {
    api_key: String,
    config_body: String,
    scan_status: Option<StatusCode>,
    statuses: HashMap<String, VecDeque<Value>>,
    scans: Vec<String>,
    status_reads: Vec<String>,
}

pub struct FakeDaemonBuilder {
    state: DaemonState,
    folders: Vec<Value>,
}

impl FakeDaemonBuilder {
    pub fn folder(mut self, id: &str, label: &str) -> Self {
        self.folders.push(json!({ "id": id, "label": label, "path": format!("/data/{id}") }));
        self
    }

    /// Status bodies returned one per read; the last one repeats.
    pub fn statuses(mut self, folder_id: &str, script: Vec<Value>) -> Self {
        self.state
            .statuses
            .insert(folder_id.to_string(), script.into());
        self
    }

    pub fn raw_config(mut self, body: &str) -> Self {
        self.state.config_body = body.to_string();
        self
    }

    pub fn scan_fails_with(mut self, status: StatusCode) -> Self {
        self.state.scan_status = Some(status);
        self
    }

    pub async fn start(mut self) -> FakeDaemon {
        if self.state.config_body.is_empty() {
            self.state.config_body =
                json!({ "version": 37, "folders": self.folders, "devices": [] }).to_string();
        }
        let state = Arc::new(Mutex::new(self.state));
        let app = Router::new()
            .route("/rest/system/config", get(system_config))
            .route("/rest/db/scan", post(db_scan))
            .route("/rest/db/status", get(db_status))
            .with_state(state.clone());

        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind fake daemon");
        let addr = listener.local_addr().expect("local addr");
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        FakeDaemon {
            base_url: format!("http://{addr}/rest"),
            state,
        }
    }
}

pub struct FakeDaemon {
    pub base_url: String,
    state: Arc<Mutex<DaemonState>>,
}

impl FakeDaemon {
    pub fn builder(api_key: &str) -> FakeDaemonBuilder {
        FakeDaemonBuilder {
            state: DaemonState {
                api_key: api_key.to_string(),
                ..Default::default()
            },
            folders: Vec::new(),
        }
    }

    pub fn scans(&self) -> Vec<String> {
        self.state.lock().unwrap().scans.clone()
    }

    pub fn status_reads(&self) -> Vec<String> {
        self.state.lock().unwrap().status_reads.clone()
    }
}

/// A base URL nothing listens on.
pub async fn dead_base_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr: SocketAddr = listener.local_addr().expect("local addr");
    drop(listener);
    format!("http://{addr}/rest")
}

type Shared = Arc<Mutex<DaemonState>>;

fn authorized(state: &DaemonState, headers: &HeaderMap) -> bool {
    headers
        .get("X-API-Key")
        .and_then(|value| value.to_str().ok())
        .is_some_and(|key| key == state.api_key)
}

async fn system_config(State(state): State<Shared>, headers: HeaderMap) -> (StatusCode, String) {
    let state = state.lock().unwrap();
    if !authorized(&state, &headers) {
        return (StatusCode::FORBIDDEN, "CSRF Error\n".to_string());
    }
    (StatusCode::OK, state.config_body.clone())
}

async fn db_scan(
    State(state): State<Shared>,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
) -> (StatusCode, String) {
    let mut state = state.lock().unwrap();
    if !authorized(&state, &headers) {
        return (StatusCode::FORBIDDEN, "CSRF Error\n".to_string());
    }
    let folder = query.get("folder").cloned().unwrap_or_default();
    state.scans.push(folder);
    match state.scan_status {
        Some(status) => (status, "scan failed\n".to_string()),
        None => (StatusCode::OK, String::new()),
    }
}

async fn db_status(
    State(state): State<Shared>,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
) -> (StatusCode, String) {
    let mut state = state.lock().unwrap();
    if !authorized(&state, &headers) {
        return (StatusCode::FORBIDDEN, "CSRF Error\n".to_string());
    }
    let folder = query.get("folder").cloned().unwrap_or_default();
    state.status_reads.push(folder.clone());
    let Some(script) = state.statuses.get_mut(&folder) else {
        return (StatusCode::NOT_FOUND, "no such folder\n".to_string());
    };
    let body = if script.len() > 1 {
        script.pop_front()
    } else {
        script.front().cloned()
    };
    match body {
        Some(body) => (StatusCode::OK, body.to_string()),
        None => (StatusCode::NOT_FOUND, "no such folder\n".to_string()),
    }
}
