//! Errors returned by `TodoClient`.
//!
//! `InvalidIndex` covers both ways the server can reject an index: `200 OK`
//! with an `{"error": "Invalid index"}` body, or `404` with the same body.
//! Any other unexpected status lands in `HttpError` with the raw body.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// The index was outside the list when the server handled the request.
    #[error("invalid index")]
    InvalidIndex,

    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    /// The server acknowledged with a message this client does not know.
    #[error("unexpected acknowledgment: {0}")]
    UnexpectedMessage(String),

    #[error("deserialization failed: {0}")]
    DeserializationError(String),

    #[error("serialization failed: {0}")]
    SerializationError(String),
}
