//! Wire DTOs for the todo API.
//!
//! # Design
//! Defined independently of the server crate so the client carries no axum
//! or tokio dependency. The integration test runs both crates against each
//! other and catches schema drift.

use serde::{Deserialize, Serialize};

/// A todo item as returned by `GET /todos` and `GET /todos/{index}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Todo {
    pub title: String,
    #[serde(default)]
    pub completed: bool,
}

/// Request payload for `POST /todos`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewTodo {
    pub title: String,
    #[serde(default)]
    pub completed: bool,
}

impl NewTodo {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            completed: false,
        }
    }
}

/// Acknowledgment body: `{"message": "..."}`.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Message {
    pub message: String,
}

/// Failure body: `{"error": "..."}`.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct ErrorBody {
    pub error: String,
}

/// What `PATCH /todos/{index}` reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    Marked,
    AlreadyComplete,
}
