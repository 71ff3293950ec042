use tokio::sync::mpsc;

use serde::Serialize;

use crate::core::progress::ProgressSnapshot;
use crate::models::download::{JobOutcome, JobStage};

/// Everything the presentation layer consumes: stage transitions, status
/// text, progress snapshots and exactly one terminal outcome per job.
/// Events for a single job arrive in the order they occurred; nothing is
/// promised across distinct jobs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JobEvent {
    pub job_id: u64,
    pub kind: JobEventKind,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "data")]
pub enum JobEventKind {
    Stage(JobStage),
    Status(String),
    Progress(ProgressSnapshot),
    Finished(JobOutcome),
}

/// Per-job emitter handed to the worker. Send failures mean the caller
/// dropped the receiver, which is not the job's problem.
#[derive(Debug, Clone)]
pub(crate) struct JobEvents {
    job_id: u64,
    tx: mpsc::UnboundedSender<JobEvent>,
}

impl JobEvents {
    pub(crate) fn new(job_id: u64, tx: mpsc::UnboundedSender<JobEvent>) -> Self {
        Self { job_id, tx }
    }

    fn send(&self, kind: JobEventKind) {
        let _ = self.tx.send(JobEvent {
            job_id: self.job_id,
            kind,
        });
    }

    pub(crate) fn stage(&self, stage: JobStage) {
        self.send(JobEventKind::Stage(stage));
    }

    pub(crate) fn status(&self, message: impl Into<String>) {
        self.send(JobEventKind::Status(message.into()));
    }

    pub(crate) fn progress(&self, snapshot: ProgressSnapshot) {
        self.send(JobEventKind::Progress(snapshot));
    }

    pub(crate) fn finished(&self, outcome: JobOutcome) {
        self.send(JobEventKind::Finished(outcome));
    }
}
