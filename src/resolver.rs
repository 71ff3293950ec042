use async_trait::async_trait;
use bytes::Bytes;
use futures::stream::BoxStream;

use crate::core::fetch;
use crate::core::url_parser::{PlaylistId, VideoId};
use crate::error::{ResolveError, TransferError};
use crate::models::media::{MediaInfo, Rendition};

/// Chunked bytes for one rendition. Chunk size is whatever the transport
/// yields; the engine checks cancellation between chunks.
pub type MediaByteStream = BoxStream<'static, Result<Bytes, TransferError>>;

/// Seam to the external metadata/stream provider. Implementations wrap
/// whatever backs the lookup (an extraction library, a sidecar process, a
/// test double) behind the engine's stable error surface.
#[async_trait]
pub trait MediaResolver: Send + Sync {
    /// Title, duration and available renditions for one video. Read-only
    /// and safe to call repeatedly.
    async fn resolve(&self, video: &VideoId) -> Result<MediaInfo, ResolveError>;

    /// The playlist's items in provider listing order. Duplicates are
    /// kept; an empty playlist is an empty list, not an error.
    async fn expand_playlist(&self, playlist: &PlaylistId) -> Result<Vec<VideoId>, ResolveError>;

    /// Opens the byte stream behind a rendition. The default fetches the
    /// rendition URL over HTTP; providers with their own transport
    /// override this.
    async fn open(&self, rendition: &Rendition) -> Result<MediaByteStream, TransferError> {
        fetch::open_url_stream(&rendition.url).await
    }
}
