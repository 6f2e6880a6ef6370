use std::path::{Path, PathBuf};
use std::time::Duration;

use futures_util::StreamExt;
use linkdrop_logging::{linkdrop_debug, linkdrop_info};
use reqwest::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use serde::Deserialize;

use crate::filename::download_filename;
use crate::persist::AtomicFileWriter;
use crate::{BackendError, FailureKind, ReplyBody, SubmissionBody};

#[derive(Debug, Clone)]
pub struct BackendSettings {
    pub connect_timeout: Duration,
    /// Kept short: a hung `/health` must still raise the alert promptly.
    pub health_timeout: Duration,
    /// Upper bound for submissions. Media processing on the backend is slow.
    pub request_timeout: Duration,
    pub download_timeout: Duration,
    pub download_dir: PathBuf,
}

impl Default for BackendSettings {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(10),
            health_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(600),
            download_timeout: Duration::from_secs(3600),
            download_dir: PathBuf::from("downloads"),
        }
    }
}

#[async_trait::async_trait]
pub trait Backend: Send + Sync {
    /// GET the liveness endpoint; returns the parsed JSON body.
    async fn health(&self, url: &str) -> Result<serde_json::Value, BackendError>;

    /// POST a submission and parse the reply envelope.
    async fn submit(&self, endpoint: &str, body: &SubmissionBody)
        -> Result<ReplyBody, BackendError>;

    /// GET `url` and save the body into `dir`; returns the saved path.
    async fn download(&self, url: &str, dir: &Path) -> Result<PathBuf, BackendError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestBackend {
    settings: BackendSettings,
    client: reqwest::Client,
}

impl ReqwestBackend {
    pub fn new(settings: BackendSettings) -> Result<Self, BackendError> {
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .build()
            .map_err(|err| BackendError::new(FailureKind::Network, err.to_string()))?;
        Ok(Self { settings, client })
    }
}

#[async_trait::async_trait]
impl Backend for ReqwestBackend {
    async fn health(&self, url: &str) -> Result<serde_json::Value, BackendError> {
        let parsed = parse_url(url)?;
        let response = self
            .client
            .get(parsed)
            .timeout(self.settings.health_timeout)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        linkdrop_debug!("Health check response status: {}", status.as_u16());
        let body = response.text().await.map_err(map_reqwest_error)?;
        if !status.is_success() {
            let detail = if body.is_empty() {
                "No additional error info"
            } else {
                body.as_str()
            };
            return Err(BackendError::new(
                FailureKind::HttpStatus(status.as_u16()),
                format!("Server responded with status {}: {}", status.as_u16(), detail),
            ));
        }

        serde_json::from_str(&body)
            .map_err(|err| BackendError::new(FailureKind::Decode, err.to_string()))
    }

    async fn submit(
        &self,
        endpoint: &str,
        body: &SubmissionBody,
    ) -> Result<ReplyBody, BackendError> {
        let parsed = parse_url(endpoint)?;
        let payload = serde_json::to_vec(body)
            .map_err(|err| BackendError::new(FailureKind::Decode, err.to_string()))?;
        linkdrop_info!("POST {} url={}", endpoint, body.url);

        let response = self
            .client
            .post(parsed)
            .timeout(self.settings.request_timeout)
            .header(CONTENT_TYPE, "application/json")
            .body(payload)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        linkdrop_debug!("Response status: {}", status.as_u16());
        let bytes = response.bytes().await.map_err(map_reqwest_error)?;
        if !status.is_success() {
            return Err(status_error(status.as_u16(), &bytes));
        }

        serde_json::from_slice(&bytes)
            .map_err(|err| BackendError::new(FailureKind::Decode, err.to_string()))
    }

    async fn download(&self, url: &str, dir: &Path) -> Result<PathBuf, BackendError> {
        let parsed = parse_url(url)?;
        let response = self
            .client
            .get(parsed.clone())
            .timeout(self.settings.download_timeout)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            let bytes = response.bytes().await.map_err(map_reqwest_error)?;
            return Err(status_error(status.as_u16(), &bytes));
        }

        let disposition = response
            .headers()
            .get(CONTENT_DISPOSITION)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
        let filename = download_filename(disposition.as_deref(), &parsed);

        let writer = AtomicFileWriter::new(dir.to_path_buf());
        let mut pending = writer.begin(&filename).map_err(persist_error)?;
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            pending.write_chunk(&chunk).map_err(persist_error)?;
        }
        let written = pending.len();
        let saved = pending.commit().map_err(persist_error)?;
        linkdrop_info!("Saved {} ({} bytes)", saved.display(), written);
        Ok(saved)
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
}

/// Non-2xx: prefer the server's `message`, else a generic status line.
fn status_error(code: u16, body: &[u8]) -> BackendError {
    let message = serde_json::from_slice::<ErrorBody>(body)
        .ok()
        .and_then(|err| err.message)
        .filter(|message| !message.is_empty())
        .unwrap_or_else(|| format!("HTTP error! status: {code}"));
    BackendError::new(FailureKind::HttpStatus(code), message)
}

fn parse_url(url: &str) -> Result<reqwest::Url, BackendError> {
    reqwest::Url::parse(url).map_err(|err| BackendError::new(FailureKind::InvalidUrl, err.to_string()))
}

fn persist_error(err: crate::PersistError) -> BackendError {
    BackendError::new(FailureKind::Persist, err.to_string())
}

fn map_reqwest_error(err: reqwest::Error) -> BackendError {
    if err.is_timeout() {
        return BackendError::new(FailureKind::Timeout, err.to_string());
    }
    BackendError::new(FailureKind::Network, err.to_string())
}
