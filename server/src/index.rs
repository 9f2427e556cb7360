//! The `{index}` path segment.

use std::num::IntErrorKind;

use axum::extract::{FromRequestParts, Path};
use axum::http::request::Parts;
use axum::response::{IntoResponse, Response};

use crate::error::ApiError;

/// Signed todo index taken from the path.
///
/// Integers beyond `i64` saturate to `i64::MIN`/`i64::MAX`, so they fail the
/// store's range check like any other out-of-range index. Only segments that
/// are not integers at all are rejected here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TodoIndex(pub i64);

impl TodoIndex {
    pub fn parse(raw: &str) -> Result<Self, ApiError> {
        match raw.parse::<i64>() {
            Ok(index) => Ok(Self(index)),
            Err(err) => match err.kind() {
                IntErrorKind::PosOverflow => Ok(Self(i64::MAX)),
                IntErrorKind::NegOverflow => Ok(Self(i64::MIN)),
                _ => Err(ApiError::MalformedIndex {
                    raw: raw.to_string(),
                }),
            },
        }
    }
}

impl<S> FromRequestParts<S> for TodoIndex
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(IntoResponse::into_response)?;
        Self::parse(&raw).map_err(IntoResponse::into_response)
    }
}
