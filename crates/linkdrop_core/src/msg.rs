use crate::Source;

/// Parsed body of a 2xx backend reply. Every field is optional; presence
/// drives which log lines are written.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BackendReply {
    pub status: Option<String>,
    pub path: Option<String>,
    pub download_url: Option<String>,
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// The window is up; run the one-shot health probe.
    Started,
    /// User clicked a tab button.
    TabClicked(String),
    /// User edited a source's link input.
    InputChanged { source: Source, text: String },
    /// User clicked a source's Confirm button.
    ConfirmClicked(Source),
    /// Health probe finished. `Ok` carries the body for tracing, `Err` the
    /// failure detail.
    HealthChecked(Result<String, String>),
    /// A submission request finished. `Err` carries the rejection message.
    SubmissionCompleted {
        source: Source,
        outcome: Result<BackendReply, String>,
    },
    /// A navigation download finished. `Ok` carries the saved file path.
    DownloadFinished {
        url: String,
        outcome: Result<String, String>,
    },
    /// User closed the blocking notification.
    AlertDismissed,
    /// UI/render tick.
    Tick,
    /// Fallback for placeholder wiring.
    NoOp,
}
