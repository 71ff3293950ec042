use std::path::Path;

use futures::StreamExt;
use tokio::io::AsyncWriteExt;
use tokio_util::sync::CancellationToken;

use crate::core::events::JobEvents;
use crate::core::progress::ProgressTracker;
use crate::error::TransferError;
use crate::resolver::MediaByteStream;

#[derive(Debug)]
pub(crate) enum TransferEnd {
    Completed(u64),
    Cancelled,
}

/// Drains the stream into `dest` one chunk at a time: each chunk is
/// written and accounted before the next is requested. Cancellation is
/// honored at chunk boundaries; once observed, no further byte is written
/// and the partial file is left in place for the caller to deal with.
pub(crate) async fn stream_to_file(
    mut stream: MediaByteStream,
    dest: &Path,
    tracker: &ProgressTracker,
    cancel: &CancellationToken,
    events: &JobEvents,
) -> Result<TransferEnd, TransferError> {
    let mut file = tokio::fs::File::create(dest).await?;

    loop {
        if cancel.is_cancelled() {
            return Ok(TransferEnd::Cancelled);
        }

        match stream.next().await {
            Some(Ok(chunk)) => {
                // a cancel that landed while we awaited this chunk wins
                if cancel.is_cancelled() {
                    return Ok(TransferEnd::Cancelled);
                }
                file.write_all(&chunk).await?;
                tracker.on_chunk(chunk.len() as u64);
                events.progress(tracker.snapshot());
            }
            Some(Err(e)) => return Err(e),
            None => break,
        }
    }

    file.flush().await?;
    Ok(TransferEnd::Completed(tracker.bytes_done()))
}
