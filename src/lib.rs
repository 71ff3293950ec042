//! Download orchestration engine: classify a reference, resolve it
//! through a pluggable provider, pick one rendition, stream it to disk on
//! an independent worker, and record completions to an append-only
//! history log. The presentation layer consumes the event channel; this
//! crate never blocks it.

pub mod core;
pub mod error;
pub mod models;
pub mod resolver;

pub use crate::core::events::{JobEvent, JobEventKind};
pub use crate::core::history::{HistoryEntry, HistoryStore};
pub use crate::core::progress::{ProgressSnapshot, ProgressTracker};
pub use crate::core::queue::{Engine, EngineConfig, JobHandle};
pub use crate::core::selector::select;
pub use crate::core::url_parser::{classify, Classified, PlaylistId, VideoId};
pub use crate::error::{
    BatchExpansionError, HistoryError, InvalidReference, JobError, ResolveError, TransferError,
};
pub use crate::models::download::{DownloadRequest, JobOutcome, JobStage};
pub use crate::models::media::{MediaInfo, OutputKind, Rendition};
pub use crate::resolver::{MediaByteStream, MediaResolver};
