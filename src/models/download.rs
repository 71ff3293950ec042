use std::path::PathBuf;

use serde::Serialize;

use crate::core::url_parser::VideoId;
use crate::models::media::OutputKind;

/// One unit of caller intent. Immutable once submitted; the job it becomes
/// owns all further state.
#[derive(Debug, Clone, Serialize)]
pub struct DownloadRequest {
    pub video: VideoId,
    pub output_dir: PathBuf,
    pub kind: OutputKind,
}

/// Lifecycle of a job. Only the owning worker moves a job forward;
/// observers see the transitions as events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum JobStage {
    Queued,
    Resolving,
    Downloading,
    Completed,
    Failed,
    Cancelled,
}

impl JobStage {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Failed | Self::Cancelled)
    }
}

/// Terminal result of a job, exactly one per submission. Failures carry
/// the caller-visible message; the typed error was already logged by the
/// worker.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "data")]
pub enum JobOutcome {
    Completed {
        title: String,
        source_url: String,
        file_path: PathBuf,
        file_size_bytes: u64,
    },
    Failed {
        message: String,
    },
    Cancelled,
}
