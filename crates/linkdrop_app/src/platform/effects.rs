use std::collections::HashMap;
use std::io;

use linkdrop_backend::{
    BackendEvent, BackendHandle, BackendSettings, ReplyBody, RequestId, SubmissionBody,
};
use linkdrop_core::{BackendReply, Effect, Msg, Source, Submission};
use linkdrop_logging::{linkdrop_info, linkdrop_warn};

/// Executes core effects on the backend and turns backend events back into
/// messages. Lives on the UI thread.
pub struct EffectRunner {
    backend: BackendHandle,
    next_request_id: RequestId,
    pending: HashMap<RequestId, Source>,
}

impl EffectRunner {
    pub fn new(settings: BackendSettings) -> io::Result<Self> {
        linkdrop_info!("Downloads go to {:?}", settings.download_dir);
        Ok(Self {
            backend: BackendHandle::new(settings)?,
            next_request_id: 1,
            pending: HashMap::new(),
        })
    }

    pub fn enqueue(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::ProbeHealth { url } => {
                    self.backend.probe_health(url);
                }
                Effect::Submit {
                    source,
                    endpoint,
                    submission,
                } => {
                    let request_id = self.next_request_id;
                    self.next_request_id += 1;
                    linkdrop_info!(
                        "Submit request_id={} source={} endpoint={}",
                        request_id,
                        source.display_name(),
                        endpoint
                    );
                    self.pending.insert(request_id, source);
                    self.backend
                        .submit(request_id, endpoint, to_body(submission));
                }
                Effect::Navigate { url } => {
                    linkdrop_info!("Navigate {}", url);
                    self.backend.download(url);
                }
            }
        }
    }

    /// Drains every backend event that has arrived so far.
    pub fn poll(&mut self) -> Vec<Msg> {
        let mut inbox = Vec::new();
        while let Some(event) = self.backend.try_recv() {
            if let Some(msg) = self.map_event(event) {
                inbox.push(msg);
            }
        }
        inbox
    }

    fn map_event(&mut self, event: BackendEvent) -> Option<Msg> {
        match event {
            BackendEvent::HealthChecked(result) => {
                Some(Msg::HealthChecked(result.map_err(|err| err.to_string())))
            }
            BackendEvent::SubmissionCompleted { request_id, result } => {
                let Some(source) = self.pending.remove(&request_id) else {
                    linkdrop_warn!("Completion for unknown request_id={}", request_id);
                    return None;
                };
                Some(Msg::SubmissionCompleted {
                    source,
                    outcome: result.map(map_reply).map_err(|err| {
                        linkdrop_warn!("Request {} failed ({}): {}", request_id, err.kind, err);
                        err.to_string()
                    }),
                })
            }
            BackendEvent::DownloadCompleted { url, result } => Some(Msg::DownloadFinished {
                url,
                outcome: result
                    .map(|path| path.display().to_string())
                    .map_err(|err| err.to_string()),
            }),
        }
    }
}

fn to_body(submission: Submission) -> SubmissionBody {
    SubmissionBody {
        url: submission.url,
        quality: submission.quality,
        format: submission.format,
    }
}

fn map_reply(body: ReplyBody) -> BackendReply {
    BackendReply {
        status: body.status,
        path: body.path,
        download_url: body.download_url,
        message: body.message,
    }
}
