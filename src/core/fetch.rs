use std::sync::LazyLock;

use futures::StreamExt;

use crate::error::TransferError;
use crate::resolver::MediaByteStream;

static CLIENT: LazyLock<reqwest::Client> = LazyLock::new(reqwest::Client::new);

/// Opens the byte stream behind a provider-issued media URL. This is the
/// default transport for [`crate::resolver::MediaResolver::open`]; no
/// timeout is imposed here, a stalled connection stalls the owning worker.
pub async fn open_url_stream(url: &str) -> Result<MediaByteStream, TransferError> {
    let response = CLIENT
        .get(url)
        .send()
        .await
        .map_err(|e| TransferError::Network(e.to_string()))?;

    let status = response.status();
    if !status.is_success() {
        return Err(TransferError::Http(status.as_u16()));
    }

    // An HTML body means an expired or redirected media handle, not media.
    if let Some(content_type) = response.headers().get("content-type") {
        if let Ok(content_type) = content_type.to_str() {
            if content_type.contains("text/html") {
                return Err(TransferError::UnexpectedContent(content_type.to_string()));
            }
        }
    }

    let stream = response
        .bytes_stream()
        .map(|chunk| chunk.map_err(|e| TransferError::Network(e.to_string())));
    Ok(stream.boxed())
}
