//! Synchronous API client core for the todo service.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values without
//! touching the network. The caller executes the HTTP round-trip, which keeps
//! this crate deterministic and free of any async runtime.
//!
//! # Design
//! - `TodoClient` is stateless and holds only `base_url`.
//! - Each operation is split into `build_*` and `parse_*`, one pair per route.
//! - Todos are addressed by position, so an index is only meaningful against
//!   the list as it was when it was read. Re-list after a delete.

pub mod client;
pub mod error;
pub mod http;
pub mod types;

pub use client::TodoClient;
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use types::{Completion, NewTodo, Todo};
