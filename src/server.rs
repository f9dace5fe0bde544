//! HTTP front end: `GET /sync/{folder}` runs one sync and answers 200 or 500.

use std::collections::HashMap;
use std::future::IntoFuture;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::extract::rejection::{PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::Router;
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::orchestration::{self, Timing};
use crate::syncthing_client::{DaemonApi, Endpoint, FolderDesignator};

/// Read-only state shared by every request. Each request is an independent run.
pub struct AppState {
    pub api: Arc<dyn DaemonApi>,
    pub endpoints: Vec<Endpoint>,
    pub timing: Timing,
    pub run_timeout: Option<Duration>,
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/sync/:folder", get(sync_folder))
        .with_state(state)
}

/// Serve until Ctrl-C. Runs still waiting for convergence are abandoned; their
/// scans continue on the daemons.
pub async fn serve(listen: SocketAddr, state: Arc<AppState>) -> std::io::Result<()> {
    let listener = TcpListener::bind(listen).await?;
    info!(listen = %listener.local_addr()?, devices = state.endpoints.len(), "Listening");

    tokio::select! {
        result = axum::serve(listener, router(state)).into_future() => result,
        () = shutdown_signal() => Ok(()),
    }
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(error = ?err, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

async fn sync_folder(
    State(state): State<Arc<AppState>>,
    folder: Result<Path<String>, PathRejection>,
    params: Result<Query<HashMap<String, String>>, QueryRejection>,
) -> (StatusCode, String) {
    // Malformed requests are reported like any other failed run, never as 4xx.
    let (Path(folder), Query(params)) = match (folder, params) {
        (Ok(folder), Ok(params)) => (folder, params),
        (Err(rejection), _) => return malformed_request(rejection.body_text()),
        (_, Err(rejection)) => return malformed_request(rejection.body_text()),
    };

    let designator = match params.get("by").map(String::as_str) {
        None | Some("id") => FolderDesignator::Id(folder),
        Some("label") => FolderDesignator::Label(folder),
        Some(other) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("unknown folder designator kind '{other}'; use id or label\n"),
            )
        }
    };

    info!(folder = %designator, by = designator.kind(), "Sync requested");
    let result = orchestration::sync_with_deadline(
        state.api.as_ref(),
        &designator,
        &state.endpoints,
        &state.timing,
        state.run_timeout,
    )
    .await;

    match result {
        Ok(_) => (StatusCode::OK, format!("{designator} in sync\n")),
        Err(err) => {
            warn!(
                folder = %designator,
                stage = %err.stage(),
                endpoint = err.endpoint().unwrap_or("-"),
                error = %err,
                "Sync failed"
            );
            let line = err.to_string().replace('\n', " ");
            (StatusCode::INTERNAL_SERVER_ERROR, format!("{line}\n"))
        }
    }
}

fn malformed_request(reason: String) -> (StatusCode, String) {
    warn!(reason = %reason, "Rejected malformed sync request");
    let line = reason.replace('\n', " ");
    (StatusCode::INTERNAL_SERVER_ERROR, format!("invalid request: {line}\n"))
}
