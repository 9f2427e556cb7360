//! Handler errors and their JSON rendering.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use crate::store::StoreError;

pub const INVALID_INDEX: &str = "Invalid index";

/// Body sent for every rejected index: `{"error": "Invalid index"}`.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: &'static str,
}

#[derive(Debug, Error)]
pub enum ApiError {
    /// The path index is outside the list. `status` comes from
    /// [`crate::config::IndexErrorStatus`].
    #[error("{source}")]
    InvalidIndex {
        #[source]
        source: StoreError,
        status: StatusCode,
    },

    /// The path segment is not an integer.
    #[error("Invalid URL: Cannot parse `{raw}` as a todo index")]
    MalformedIndex { raw: String },
}

impl ApiError {
    pub fn invalid_index(source: StoreError, status: StatusCode) -> Self {
        Self::InvalidIndex { source, status }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidIndex { status, .. } => *status,
            Self::MalformedIndex { .. } => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        match self {
            Self::InvalidIndex { .. } => (
                status,
                Json(ErrorBody {
                    error: INVALID_INDEX,
                }),
            )
                .into_response(),
            Self::MalformedIndex { .. } => (status, self.to_string()).into_response(),
        }
    }
}
