//! Stateless HTTP request builder and response parser for the todo API.
//!
//! # Design
//! `TodoClient` holds only a `base_url`. Each route has a `build_*` method
//! producing an `HttpRequest` and a `parse_*` method consuming the matching
//! `HttpResponse`. The server may report a bad index either as `200` with an
//! error body or as `404`; every parser accepts both.

use serde::de::DeserializeOwned;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{Completion, ErrorBody, Message, NewTodo, Todo};

const INVALID_INDEX: &str = "Invalid index";
const TODO_ADDED: &str = "Todo added";
const TODO_DELETED: &str = "Todo deleted";
const TODO_MARKED_COMPLETE: &str = "Todo marked as complete";
const TODO_ALREADY_COMPLETE: &str = "Todo already marked as complete";

/// Synchronous, stateless client for the todo API.
#[derive(Debug, Clone)]
pub struct TodoClient {
    base_url: String,
}

impl TodoClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn build_list_todos(&self) -> HttpRequest {
        self.request(HttpMethod::Get, "/todos".to_string())
    }

    pub fn build_get_todo(&self, index: i64) -> HttpRequest {
        self.request(HttpMethod::Get, format!("/todos/{index}"))
    }

    pub fn build_add_todo(&self, input: &NewTodo) -> Result<HttpRequest, ApiError> {
        let body =
            serde_json::to_string(input).map_err(|e| ApiError::SerializationError(e.to_string()))?;
        let mut req = self.request(HttpMethod::Post, "/todos".to_string());
        req.headers
            .push(("content-type".to_string(), "application/json".to_string()));
        req.body = Some(body);
        Ok(req)
    }

    pub fn build_delete_todo(&self, index: i64) -> HttpRequest {
        self.request(HttpMethod::Delete, format!("/todos/{index}"))
    }

    pub fn build_complete_todo(&self, index: i64) -> HttpRequest {
        self.request(HttpMethod::Patch, format!("/todos/{index}"))
    }

    pub fn parse_list_todos(&self, response: HttpResponse) -> Result<Vec<Todo>, ApiError> {
        check_status(&response)?;
        decode(&response.body)
    }

    pub fn parse_get_todo(&self, response: HttpResponse) -> Result<Todo, ApiError> {
        check_status(&response)?;
        decode(&response.body)
    }

    pub fn parse_add_todo(&self, response: HttpResponse) -> Result<(), ApiError> {
        match acknowledgment(&response)?.as_str() {
            TODO_ADDED => Ok(()),
            other => Err(ApiError::UnexpectedMessage(other.to_string())),
        }
    }

    pub fn parse_delete_todo(&self, response: HttpResponse) -> Result<(), ApiError> {
        match acknowledgment(&response)?.as_str() {
            TODO_DELETED => Ok(()),
            other => Err(ApiError::UnexpectedMessage(other.to_string())),
        }
    }

    pub fn parse_complete_todo(&self, response: HttpResponse) -> Result<Completion, ApiError> {
        match acknowledgment(&response)?.as_str() {
            TODO_MARKED_COMPLETE => Ok(Completion::Marked),
            TODO_ALREADY_COMPLETE => Ok(Completion::AlreadyComplete),
            other => Err(ApiError::UnexpectedMessage(other.to_string())),
        }
    }

    fn request(&self, method: HttpMethod, route: String) -> HttpRequest {
        HttpRequest {
            method,
            path: format!("{}{route}", self.base_url),
            headers: Vec::new(),
            body: None,
        }
    }
}

/// Reject error bodies (whatever the status) and any non-200 status.
fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    if let Ok(ErrorBody { error }) = serde_json::from_str::<ErrorBody>(&response.body) {
        if error == INVALID_INDEX && matches!(response.status, 200 | 404) {
            return Err(ApiError::InvalidIndex);
        }
        return Err(ApiError::HttpError {
            status: response.status,
            body: response.body.clone(),
        });
    }
    if response.status == 200 {
        return Ok(());
    }
    Err(ApiError::HttpError {
        status: response.status,
        body: response.body.clone(),
    })
}

fn acknowledgment(response: &HttpResponse) -> Result<String, ApiError> {
    check_status(response)?;
    let Message { message } = decode(&response.body)?;
    Ok(message)
}

fn decode<T: DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    serde_json::from_str(body).map_err(|e| ApiError::DeserializationError(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> TodoClient {
        TodoClient::new("http://localhost:8000")
    }

    #[test]
    fn build_list_todos_produces_correct_request() {
        let req = client().build_list_todos();
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.path, "http://localhost:8000/todos");
        assert!(req.body.is_none());
        assert!(req.headers.is_empty());
    }

    #[test]
    fn build_get_todo_uses_index_in_path() {
        let req = client().build_get_todo(3);
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.path, "http://localhost:8000/todos/3");
        assert!(req.body.is_none());
    }

    #[test]
    fn build_add_todo_produces_correct_request() {
        let req = client().build_add_todo(&NewTodo::new("Buy milk")).unwrap();
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.path, "http://localhost:8000/todos");
        assert_eq!(
            req.headers,
            vec![("content-type".to_string(), "application/json".to_string())]
        );
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body["title"], "Buy milk");
        assert_eq!(body["completed"], false);
    }

    #[test]
    fn build_delete_and_complete_have_no_body() {
        let delete = client().build_delete_todo(0);
        assert_eq!(delete.method, HttpMethod::Delete);
        assert_eq!(delete.path, "http://localhost:8000/todos/0");
        assert!(delete.body.is_none());

        let complete = client().build_complete_todo(0);
        assert_eq!(complete.method, HttpMethod::Patch);
        assert_eq!(complete.path, "http://localhost:8000/todos/0");
        assert!(complete.body.is_none());
    }

    #[test]
    fn trailing_slash_is_stripped() {
        let client = TodoClient::new("http://localhost:8000/");
        assert_eq!(client.build_list_todos().path, "http://localhost:8000/todos");
    }

    #[test]
    fn parse_list_todos_success() {
        let response = HttpResponse::new(200, r#"[{"title":"Test","completed":false}]"#);
        let todos = client().parse_list_todos(response).unwrap();
        assert_eq!(
            todos,
            vec![Todo {
                title: "Test".to_string(),
                completed: false
            }]
        );
    }

    #[test]
    fn parse_list_todos_bad_json() {
        let response = HttpResponse::new(200, "not json");
        let err = client().parse_list_todos(response).unwrap_err();
        assert!(matches!(err, ApiError::DeserializationError(_)));
    }

    #[test]
    fn parse_get_todo_invalid_index_as_200() {
        let response = HttpResponse::new(200, r#"{"error":"Invalid index"}"#);
        let err = client().parse_get_todo(response).unwrap_err();
        assert!(matches!(err, ApiError::InvalidIndex));
    }

    #[test]
    fn parse_get_todo_invalid_index_as_404() {
        let response = HttpResponse::new(404, r#"{"error":"Invalid index"}"#);
        let err = client().parse_get_todo(response).unwrap_err();
        assert!(matches!(err, ApiError::InvalidIndex));
    }

    #[test]
    fn parse_get_todo_plain_404_is_http_error() {
        let response = HttpResponse::new(404, "");
        let err = client().parse_get_todo(response).unwrap_err();
        assert!(matches!(err, ApiError::HttpError { status: 404, .. }));
    }

    #[test]
    fn parse_add_todo_success() {
        let response = HttpResponse::new(200, r#"{"message":"Todo added"}"#);
        assert!(client().parse_add_todo(response).is_ok());
    }

    #[test]
    fn parse_add_todo_validation_failure() {
        let response = HttpResponse::new(422, "Failed to deserialize the JSON body");
        let err = client().parse_add_todo(response).unwrap_err();
        assert!(matches!(err, ApiError::HttpError { status: 422, .. }));
    }

    #[test]
    fn parse_delete_todo_success_and_invalid() {
        let ok = HttpResponse::new(200, r#"{"message":"Todo deleted"}"#);
        assert!(client().parse_delete_todo(ok).is_ok());

        let bad = HttpResponse::new(200, r#"{"error":"Invalid index"}"#);
        let err = client().parse_delete_todo(bad).unwrap_err();
        assert!(matches!(err, ApiError::InvalidIndex));
    }

    #[test]
    fn parse_complete_todo_distinguishes_messages() {
        let c = client();
        let marked = HttpResponse::new(200, r#"{"message":"Todo marked as complete"}"#);
        assert_eq!(c.parse_complete_todo(marked).unwrap(), Completion::Marked);

        let already = HttpResponse::new(200, r#"{"message":"Todo already marked as complete"}"#);
        assert_eq!(
            c.parse_complete_todo(already).unwrap(),
            Completion::AlreadyComplete
        );
    }

    #[test]
    fn parse_complete_todo_unknown_message() {
        let response = HttpResponse::new(200, r#"{"message":"Todo deleted"}"#);
        let err = client().parse_complete_todo(response).unwrap_err();
        assert!(matches!(err, ApiError::UnexpectedMessage(m) if m == "Todo deleted"));
    }

    #[test]
    fn parse_server_error() {
        let response = HttpResponse::new(500, "internal error");
        let err = client().parse_list_todos(response).unwrap_err();
        assert!(matches!(err, ApiError::HttpError { status: 500, .. }));
    }
}
