use futures::StreamExt;
use thiserror::Error;

/// Default cap on a feed body.
pub const MAX_FEED_SIZE: usize = 10 * 1024 * 1024; // 10MB

/// Errors that can occur while downloading a feed body.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Network-level error (DNS, connection, TLS, client timeout, etc.)
    #[error("Request failed: {0}")]
    Network(#[from] reqwest::Error),
    /// HTTP response with non-2xx status code
    #[error("HTTP error: status {0}")]
    HttpStatus(u16),
    /// Response body exceeded the configured size limit
    #[error("Response too large")]
    ResponseTooLarge,
}

/// Performs a single GET against `uri` and returns the full response body.
///
/// No retries are attempted. A non-2xx status fails before the body is read,
/// and the body is capped at `max_size` bytes. The response is consumed by
/// the body reader, so the connection is released on every return path.
///
/// # Errors
///
/// - [`FetchError::Network`] - Connection, DNS, TLS or transport timeout
/// - [`FetchError::HttpStatus`] - Non-2xx HTTP response
/// - [`FetchError::ResponseTooLarge`] - Body exceeded `max_size`
pub async fn fetch_feed(
    client: &reqwest::Client,
    uri: &str,
    max_size: usize,
) -> Result<Vec<u8>, FetchError> {
    let response = client.get(uri).send().await?;

    let status = response.status();
    if !status.is_success() {
        tracing::debug!(uri = %uri, status = %status, "Feed request returned non-success status");
        return Err(FetchError::HttpStatus(status.as_u16()));
    }

    read_limited_bytes(response, max_size).await
}

async fn read_limited_bytes(
    response: reqwest::Response,
    limit: usize,
) -> Result<Vec<u8>, FetchError> {
    // Fast path: check Content-Length header
    if let Some(len) = response.content_length() {
        if len > limit as u64 {
            return Err(FetchError::ResponseTooLarge);
        }
    }

    let mut bytes = Vec::new();
    let mut stream = response.bytes_stream();

    while let Some(chunk) = stream.next().await {
        let chunk = chunk?;
        if bytes.len().saturating_add(chunk.len()) > limit {
            return Err(FetchError::ResponseTooLarge);
        }
        bytes.extend_from_slice(&chunk);
    }

    Ok(bytes)
}
