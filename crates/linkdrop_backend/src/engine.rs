use std::io;
use std::path::{Path, PathBuf};
use std::sync::{mpsc, Arc};
use std::thread;

use linkdrop_logging::{linkdrop_error, linkdrop_warn};

use crate::client::{Backend, BackendSettings, ReqwestBackend};
use crate::{BackendEvent, RequestId, SubmissionBody};

enum BackendCommand {
    ProbeHealth {
        url: String,
    },
    Submit {
        request_id: RequestId,
        endpoint: String,
        body: SubmissionBody,
    },
    Download {
        url: String,
    },
}

/// Runs backend requests on a tokio runtime owned by a background thread.
///
/// Every command runs to completion as its own task and reports exactly one
/// event. Events arrive in completion order, not submission order.
pub struct BackendHandle {
    cmd_tx: mpsc::Sender<BackendCommand>,
    event_rx: mpsc::Receiver<BackendEvent>,
}

impl BackendHandle {
    pub fn new(settings: BackendSettings) -> io::Result<Self> {
        let download_dir = settings.download_dir.clone();
        let backend = ReqwestBackend::new(settings)
            .map_err(io::Error::other)?;
        Self::with_backend(Arc::new(backend), download_dir)
    }

    /// Same as `new`, but with any `Backend` implementation.
    pub fn with_backend(backend: Arc<dyn Backend>, download_dir: PathBuf) -> io::Result<Self> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let runtime = tokio::runtime::Runtime::new()?;
        let download_dir = Arc::new(download_dir);

        thread::Builder::new()
            .name("linkdrop-backend".to_string())
            .spawn(move || {
                while let Ok(command) = cmd_rx.recv() {
                    let backend = backend.clone();
                    let event_tx = event_tx.clone();
                    let download_dir = download_dir.clone();
                    runtime.spawn(async move {
                        handle_command(backend.as_ref(), &download_dir, command, event_tx).await;
                    });
                }
            })?;

        Ok(Self { cmd_tx, event_rx })
    }

    pub fn probe_health(&self, url: impl Into<String>) {
        self.send(BackendCommand::ProbeHealth { url: url.into() });
    }

    pub fn submit(&self, request_id: RequestId, endpoint: impl Into<String>, body: SubmissionBody) {
        self.send(BackendCommand::Submit {
            request_id,
            endpoint: endpoint.into(),
            body,
        });
    }

    pub fn download(&self, url: impl Into<String>) {
        self.send(BackendCommand::Download { url: url.into() });
    }

    pub fn try_recv(&self) -> Option<BackendEvent> {
        self.event_rx.try_recv().ok()
    }

    fn send(&self, command: BackendCommand) {
        if self.cmd_tx.send(command).is_err() {
            linkdrop_error!("Backend worker is gone; command dropped");
        }
    }
}

async fn handle_command(
    backend: &dyn Backend,
    download_dir: &Path,
    command: BackendCommand,
    event_tx: mpsc::Sender<BackendEvent>,
) {
    let event = match command {
        BackendCommand::ProbeHealth { url } => {
            let result = backend.health(&url).await.map(|body| body.to_string());
            BackendEvent::HealthChecked(result)
        }
        BackendCommand::Submit {
            request_id,
            endpoint,
            body,
        } => {
            let result = backend.submit(&endpoint, &body).await;
            BackendEvent::SubmissionCompleted { request_id, result }
        }
        BackendCommand::Download { url } => {
            let result = backend.download(&url, download_dir).await;
            BackendEvent::DownloadCompleted { url, result }
        }
    };
    if event_tx.send(event).is_err() {
        linkdrop_warn!("Backend event dropped; receiver closed");
    }
}
