use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use tracing::{debug, trace};

use crate::types::{ClientError, ConfigError};

use super::api::{FolderConfig, FolderQuery, SyncthingConfig};
use super::daemon_api::DaemonApi;
use super::models::{Endpoint, SyncStatus};

const CONFIG_PATH: &str = "/system/config";
const SCAN_PATH: &str = "/db/scan";
const STATUS_PATH: &str = "/db/status";

/// HTTP settings shared by every endpoint.
#[derive(Debug, Clone)]
pub struct HttpSettings {
    pub request_timeout: Duration,
    pub accept_invalid_certs: bool,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            request_timeout: Duration::from_secs(30),
            accept_invalid_certs: false,
        }
    }
}

/// Talks to any number of Syncthing control APIs. Cheap to clone; the
/// connection pool is shared.
#[derive(Clone)]
pub struct SyncthingClient {
    http: Client,
}

impl SyncthingClient {
    pub fn new(settings: &HttpSettings) -> Result<Self, ConfigError> {
        let http = Client::builder()
            .timeout(settings.request_timeout)
            .danger_accept_invalid_certs(settings.accept_invalid_certs)
            .build()?;

        Ok(Self { http })
    }

    async fn get_json<T>(&self, endpoint: &Endpoint, path: &str) -> Result<T, ClientError>
    where
        T: DeserializeOwned,
    {
        self.get_json_with_query(endpoint, path, &()).await
    }

    async fn get_json_with_query<T, Q>(
        &self,
        endpoint: &Endpoint,
        path: &str,
        query: &Q,
    ) -> Result<T, ClientError>
    where
        T: DeserializeOwned,
        Q: serde::Serialize + ?Sized,
    {
        let url = endpoint.url(path);
        let request = self.http.get(&url).query(query);
        let response = send(request, endpoint, &url).await?;
        decode_json(response, &url).await
    }

    async fn post_with_query<Q>(
        &self,
        endpoint: &Endpoint,
        path: &str,
        query: &Q,
    ) -> Result<(), ClientError>
    where
        Q: serde::Serialize + ?Sized,
    {
        let url = endpoint.url(path);
        let request = self.http.post(&url).query(query);
        send(request, endpoint, &url).await?;
        Ok(())
    }
}

#[async_trait]
impl DaemonApi for SyncthingClient {
    async fn get_config(&self, endpoint: &Endpoint) -> Result<Vec<FolderConfig>, ClientError> {
        let config: SyncthingConfig = self.get_json(endpoint, CONFIG_PATH).await?;
        trace!(endpoint = %endpoint.name, folders = config.folders.len(), "Fetched folder config");
        Ok(config.folders)
    }

    async fn trigger_rescan(&self, endpoint: &Endpoint, folder_id: &str) -> Result<(), ClientError> {
        let query = FolderQuery { folder: folder_id };
        self.post_with_query(endpoint, SCAN_PATH, &query).await
    }

    async fn get_status(
        &self,
        endpoint: &Endpoint,
        folder_id: &str,
    ) -> Result<SyncStatus, ClientError> {
        let query = FolderQuery { folder: folder_id };
        self.get_json_with_query(endpoint, STATUS_PATH, &query)
            .await
    }
}

/// Attach the API key, send, and reject non-2xx answers.
async fn send(
    request: RequestBuilder,
    endpoint: &Endpoint,
    url: &str,
) -> Result<Response, ClientError> {
    let response = request
        .header("X-API-Key", &endpoint.api_key)
        .send()
        .await
        .map_err(|err| ClientError::unreachable(url, err))?;

    let status = response.status();
    debug!(url, %status, "Daemon responded");
    if !status.is_success() {
        return Err(ClientError::bad_response(url, format!("HTTP {status}")));
    }

    Ok(response)
}

async fn decode_json<T>(response: Response, url: &str) -> Result<T, ClientError>
where
    T: DeserializeOwned,
{
    // Read first so a dropped connection is reported as transport failure, not a parse error.
    let body = response
        .bytes()
        .await
        .map_err(|err| ClientError::unreachable(url, err))?;

    serde_json::from_slice(&body)
        .map_err(|err| ClientError::bad_response(url, format!("invalid JSON body: {err}")))
}
