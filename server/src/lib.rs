//! In-memory todo list HTTP API.
//!
//! # Overview
//! Five routes over a single ordered list addressed by position:
//!
//! | Method | Path             | Success body                              |
//! |--------|------------------|-------------------------------------------|
//! | GET    | `/todos`         | array of todos                            |
//! | GET    | `/todos/{index}` | one todo                                  |
//! | POST   | `/todos`         | `{"message": "Todo added"}`               |
//! | DELETE | `/todos/{index}` | `{"message": "Todo deleted"}`             |
//! | PATCH  | `/todos/{index}` | `{"message": "Todo marked as complete"}`  |
//!
//! An index outside the list answers `{"error": "Invalid index"}` with the
//! status chosen by [`IndexErrorStatus`].
//!
//! # Design
//! The list lives in a [`TodoStore`] owned by the router state and handed to
//! each handler through axum's `State` extractor. A `RwLock` makes every operation
//! atomic; it does not stop an index from going stale between two requests.

pub mod config;
pub mod error;
pub mod index;
pub mod store;

use std::future::Future;
use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Serialize;
use tokio::{net::TcpListener, sync::RwLock};
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::trace::TraceLayer;

pub use config::{ConfigError, IndexErrorStatus, ServerConfig};
pub use error::ApiError;
pub use index::TodoIndex;
pub use store::{Completion, StoreError, Todo, TodoStore};

pub const TODO_ADDED: &str = "Todo added";
pub const TODO_DELETED: &str = "Todo deleted";
pub const TODO_MARKED_COMPLETE: &str = "Todo marked as complete";
pub const TODO_ALREADY_COMPLETE: &str = "Todo already marked as complete";

pub type SharedStore = Arc<RwLock<TodoStore>>;

/// Acknowledgment body: `{"message": "..."}`.
#[derive(Debug, Serialize)]
pub struct Message {
    pub message: &'static str,
}

impl Message {
    fn new(message: &'static str) -> Json<Self> {
        Json(Self { message })
    }
}

#[derive(Clone)]
struct AppState {
    store: SharedStore,
    index_error_status: StatusCode,
}

impl AppState {
    fn new(store: TodoStore, index_error_status: IndexErrorStatus) -> Self {
        Self {
            store: Arc::new(RwLock::new(store)),
            index_error_status: index_error_status.status_code(),
        }
    }

    fn reject(&self, err: StoreError) -> ApiError {
        tracing::warn!(%err, "rejected todo index");
        ApiError::invalid_index(err, self.index_error_status)
    }
}

/// Router over a fresh, empty store.
pub fn app(config: &ServerConfig) -> Router {
    router(TodoStore::new(), config)
}

/// Router over `store`. CORS and the index error status both come from `config`.
pub fn router(store: TodoStore, config: &ServerConfig) -> Router {
    let state = AppState::new(store, config.index_error_status);
    Router::new()
        .route("/todos", get(list_todos).post(add_todo))
        .route(
            "/todos/{index}",
            get(get_todo).delete(delete_todo).patch(complete_todo),
        )
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(config))
        .with_state(state)
}

/// Serve until the process is killed.
pub async fn run(listener: TcpListener, config: ServerConfig) -> Result<(), std::io::Error> {
    run_until(listener, config, std::future::pending()).await
}

/// Serve until `shutdown` resolves, then drain in-flight requests.
pub async fn run_until<F>(
    listener: TcpListener,
    config: ServerConfig,
    shutdown: F,
) -> Result<(), std::io::Error>
where
    F: Future<Output = ()> + Send + 'static,
{
    if let Ok(addr) = listener.local_addr() {
        tracing::info!(%addr, origin = ?config.allowed_origin, "serving todo API");
    }
    axum::serve(listener, app(&config))
        .with_graceful_shutdown(shutdown)
        .await
}

/// One browser origin, with credentials. Methods and headers are mirrored
/// from the preflight request since `*` cannot be combined with credentials.
fn cors_layer(config: &ServerConfig) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(config.allowed_origin.clone())
        .allow_credentials(true)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
}

async fn list_todos(State(state): State<AppState>) -> Json<Vec<Todo>> {
    let store = state.store.read().await;
    tracing::debug!(len = store.len(), "listing todos");
    Json(store.list().cloned().collect())
}

async fn get_todo(
    State(state): State<AppState>,
    TodoIndex(index): TodoIndex,
) -> Result<Json<Todo>, ApiError> {
    let store = state.store.read().await;
    let todo = store.get(index).map_err(|err| state.reject(err))?;
    Ok(Json(todo.clone()))
}

async fn add_todo(State(state): State<AppState>, Json(todo): Json<Todo>) -> Json<Message> {
    state.store.write().await.add(todo);
    Message::new(TODO_ADDED)
}

async fn delete_todo(
    State(state): State<AppState>,
    TodoIndex(index): TodoIndex,
) -> Result<Json<Message>, ApiError> {
    let mut store = state.store.write().await;
    store.delete(index).map_err(|err| state.reject(err))?;
    Ok(Message::new(TODO_DELETED))
}

async fn complete_todo(
    State(state): State<AppState>,
    TodoIndex(index): TodoIndex,
) -> Result<Json<Message>, ApiError> {
    let mut store = state.store.write().await;
    let message = match store.complete(index).map_err(|err| state.reject(err))? {
        Completion::Marked => TODO_MARKED_COMPLETE,
        Completion::AlreadyComplete => TODO_ALREADY_COMPLETE,
    };
    Ok(Message::new(message))
}
