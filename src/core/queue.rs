use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::core::events::{JobEvent, JobEvents};
use crate::core::history::HistoryStore;
use crate::core::job;
use crate::core::url_parser::{PlaylistId, VideoId};
use crate::error::BatchExpansionError;
use crate::models::download::{DownloadRequest, JobStage};
use crate::models::media::OutputKind;
use crate::resolver::MediaResolver;

#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Backing file of the append-only download log.
    pub history_path: PathBuf,
    /// Where requests land when the caller has not picked a directory.
    pub default_output_dir: PathBuf,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            history_path: PathBuf::from("download_history.txt"),
            default_output_dir: dirs::download_dir().unwrap_or_else(|| PathBuf::from(".")),
        }
    }
}

/// Caller's grip on one running job: cancel it or wait it out. Dropping
/// the handle detaches the job, it keeps running.
#[derive(Debug)]
pub struct JobHandle {
    id: u64,
    cancel: CancellationToken,
    task: JoinHandle<()>,
}

impl JobHandle {
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Cooperative: the worker stops at the next chunk boundary and
    /// leaves any partial file in place.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub async fn wait(self) {
        let _ = self.task.await;
    }
}

/// Accepts requests, runs each job on its own worker task and funnels all
/// job events through a single channel, so per-job ordering is the
/// channel's FIFO guarantee. No concurrency cap and no ordering between
/// distinct jobs.
pub struct Engine {
    resolver: Arc<dyn MediaResolver>,
    history: Arc<HistoryStore>,
    events_tx: mpsc::UnboundedSender<JobEvent>,
    next_id: AtomicU64,
    default_output_dir: PathBuf,
}

impl Engine {
    pub fn new(
        resolver: Arc<dyn MediaResolver>,
        config: EngineConfig,
    ) -> (Self, mpsc::UnboundedReceiver<JobEvent>) {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let engine = Self {
            resolver,
            history: Arc::new(HistoryStore::new(config.history_path)),
            events_tx,
            next_id: AtomicU64::new(1),
            default_output_dir: config.default_output_dir,
        };
        (engine, events_rx)
    }

    pub fn history(&self) -> &HistoryStore {
        &self.history
    }

    pub fn default_output_dir(&self) -> &Path {
        &self.default_output_dir
    }

    /// Convenience constructor for a request landing in the default
    /// output directory.
    pub fn request(&self, video: VideoId, kind: OutputKind) -> DownloadRequest {
        DownloadRequest {
            video,
            output_dir: self.default_output_dir.clone(),
            kind,
        }
    }

    /// Starts one independent worker for the request and returns
    /// immediately; progress arrives on the event channel.
    pub fn submit(&self, request: DownloadRequest) -> JobHandle {
        self.submit_with_token(request, CancellationToken::new())
    }

    /// Like [`Engine::submit`] with a caller-owned cancellation token,
    /// for callers that hang jobs off their own cancellation tree.
    pub fn submit_with_token(&self, request: DownloadRequest, cancel: CancellationToken) -> JobHandle {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let events = JobEvents::new(id, self.events_tx.clone());
        events.stage(JobStage::Queued);

        let task = tokio::spawn(job::run_job(
            self.resolver.clone(),
            self.history.clone(),
            request,
            cancel.clone(),
            events,
        ));

        JobHandle { id, cancel, task }
    }

    /// Expands the playlist through the resolver, then submits one
    /// independent job per item in listing order. Expansion failure fails
    /// the whole batch; zero jobs are submitted. An empty playlist is an
    /// empty batch, not an error.
    pub async fn submit_playlist(
        &self,
        playlist: &PlaylistId,
        kind: OutputKind,
        output_dir: PathBuf,
    ) -> Result<Vec<JobHandle>, BatchExpansionError> {
        let videos = self
            .resolver
            .expand_playlist(playlist)
            .await
            .map_err(BatchExpansionError)?;

        Ok(videos
            .into_iter()
            .map(|video| {
                self.submit(DownloadRequest {
                    video,
                    output_dir: output_dir.clone(),
                    kind,
                })
            })
            .collect())
    }
}
