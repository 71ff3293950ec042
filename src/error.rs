use thiserror::Error;

use crate::models::media::OutputKind;

/// Rejected input string. Raised at submission time only; no job is ever
/// created for an invalid reference.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid YouTube URL: {0}")]
pub struct InvalidReference(pub String);

/// Normalized provider errors. Each variant carries the caller-visible
/// message regardless of which provider library backs the resolver.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    #[error("Invalid media reference: {0}")]
    MalformedReference(String),

    #[error("The video is unavailable.")]
    Unavailable,

    #[error("Metadata extraction failed: {0}")]
    ExtractionFailed(String),

    #[error("Network error while resolving: {0}")]
    Network(String),
}

/// Errors while streaming rendition bytes into the destination sink.
#[derive(Debug, Error)]
pub enum TransferError {
    #[error("HTTP {0} while fetching media stream")]
    Http(u16),

    #[error("Server returned {0} instead of media")]
    UnexpectedContent(String),

    #[error("Network error during transfer: {0}")]
    Network(String),

    #[error("Write error: {0}")]
    Io(#[from] std::io::Error),
}

/// Terminal failure of a single job. Never propagates to sibling jobs.
#[derive(Debug, Error)]
pub enum JobError {
    #[error("{0}")]
    Resolve(#[from] ResolveError),

    #[error("No {0} rendition available for this video.")]
    NoSuitableRendition(OutputKind),

    #[error("Download failed. Check your internet connection or format. ({0})")]
    Transfer(#[from] TransferError),
}

/// A playlist submission either fully expands or fails as a whole; on
/// failure zero jobs are submitted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Error downloading playlist: {0}")]
pub struct BatchExpansionError(#[from] pub ResolveError);

/// Non-fatal: an append failure never rolls back a completed download.
#[derive(Debug, Error)]
#[error("Could not update download history: {0}")]
pub struct HistoryError(#[from] pub std::io::Error);
