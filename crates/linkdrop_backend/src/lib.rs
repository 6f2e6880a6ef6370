//! Linkdrop backend: HTTP client for the local media service and effect execution.
mod client;
mod engine;
mod filename;
mod persist;
mod types;

pub use client::{Backend, BackendSettings, ReqwestBackend};
pub use engine::BackendHandle;
pub use filename::download_filename;
pub use persist::{ensure_output_dir, AtomicFileWriter, PendingFile, PersistError};
pub use types::{BackendError, BackendEvent, FailureKind, ReplyBody, RequestId, SubmissionBody};
