use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::core::events::JobEvents;
use crate::core::history::HistoryStore;
use crate::core::progress::ProgressTracker;
use crate::core::selector;
use crate::core::transfer::{self, TransferEnd};
use crate::error::JobError;
use crate::models::download::{DownloadRequest, JobOutcome, JobStage};
use crate::resolver::MediaResolver;

/// Drives one request to a terminal state. Emits every stage change,
/// status line and progress snapshot through the engine's event channel,
/// then exactly one `Finished` event. Never retries; a retry is a fresh
/// submission.
pub(crate) async fn run_job(
    resolver: Arc<dyn MediaResolver>,
    history: Arc<HistoryStore>,
    request: DownloadRequest,
    cancel: CancellationToken,
    events: JobEvents,
) {
    let outcome = drive(resolver, history, &request, &cancel, &events).await;
    let stage = match &outcome {
        JobOutcome::Completed { .. } => JobStage::Completed,
        JobOutcome::Failed { .. } => JobStage::Failed,
        JobOutcome::Cancelled => JobStage::Cancelled,
    };
    events.stage(stage);
    events.finished(outcome);
}

async fn drive(
    resolver: Arc<dyn MediaResolver>,
    history: Arc<HistoryStore>,
    request: &DownloadRequest,
    cancel: &CancellationToken,
    events: &JobEvents,
) -> JobOutcome {
    if cancel.is_cancelled() {
        return JobOutcome::Cancelled;
    }

    events.stage(JobStage::Resolving);
    let info = match resolver.resolve(&request.video).await {
        Ok(info) => info,
        Err(e) => return failed(e.into()),
    };
    events.status(format!("Selected: {}", info.title));

    if cancel.is_cancelled() {
        return JobOutcome::Cancelled;
    }

    events.stage(JobStage::Downloading);
    let Some(rendition) = selector::select(&info.renditions, request.kind) else {
        return failed(JobError::NoSuitableRendition(request.kind));
    };
    events.status(format!("Downloading {}...", info.title));

    let file_name = format!(
        "{}.{}",
        sanitize_filename::sanitize(&info.title),
        request.kind.container_ext()
    );
    let dest = request.output_dir.join(file_name);

    let tracker = ProgressTracker::new(rendition.size_bytes);
    let stream = match resolver.open(rendition).await {
        Ok(stream) => stream,
        Err(e) => return failed(e.into()),
    };

    match transfer::stream_to_file(stream, &dest, &tracker, cancel, events).await {
        Ok(TransferEnd::Completed(file_size_bytes)) => {
            events.status("Download Complete");
            let source_url = request.video.watch_url();
            // non-fatal: the download already succeeded
            if let Err(e) = history.append(&info.title, &source_url).await {
                tracing::warn!("History append failed for '{}': {}", info.title, e);
            }
            JobOutcome::Completed {
                title: info.title,
                source_url,
                file_path: dest,
                file_size_bytes,
            }
        }
        Ok(TransferEnd::Cancelled) => JobOutcome::Cancelled,
        Err(e) => failed(e.into()),
    }
}

fn failed(err: JobError) -> JobOutcome {
    tracing::error!("Download job failed: {}", err);
    JobOutcome::Failed {
        message: err.to_string(),
    }
}
