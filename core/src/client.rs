//! Stateless request builder and response parser for the dashboard API.
//!
//! # Design
//! `DashboardClient` holds only a `base_url`. Every endpoint is split into a
//! `build_*` method producing an `HttpRequest` and a `parse_*` method
//! consuming the matching `HttpResponse`, so the client never performs I/O.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{ApiError, ValidationBody};
use crate::http::{HttpRequest, HttpResponse};
use crate::types::{ActionResponse, ReorderRequest, SaveTodo, TodoId, TodoItem};

#[derive(Debug, Clone)]
pub struct DashboardClient {
    base_url: String,
}

impl DashboardClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn build_list_items(&self) -> HttpRequest {
        HttpRequest::get(format!("{}/todos", self.base_url))
    }

    pub fn build_get_item(&self, id: TodoId) -> HttpRequest {
        HttpRequest::get(format!("{}/todos/{id}", self.base_url))
    }

    pub fn build_save_item(&self, input: &SaveTodo) -> Result<HttpRequest, ApiError> {
        let body = to_json(input)?;
        Ok(HttpRequest::post_json(format!("{}/todos", self.base_url), body))
    }

    pub fn build_complete_item(&self, id: TodoId) -> HttpRequest {
        HttpRequest::post_empty(format!("{}/todos/{id}/done", self.base_url))
    }

    pub fn build_reorder(&self, ordered_ids: &[TodoId]) -> Result<HttpRequest, ApiError> {
        let body = to_json(&ReorderRequest::from_ids(ordered_ids))?;
        Ok(HttpRequest::post_json(
            format!("{}/todos/reorder", self.base_url),
            body,
        ))
    }

    pub fn parse_list_items(&self, response: HttpResponse) -> Result<Vec<TodoItem>, ApiError> {
        check_status(&response, 200)?;
        from_json(&response.body)
    }

    pub fn parse_get_item(&self, response: HttpResponse) -> Result<TodoItem, ApiError> {
        check_status(&response, 200)?;
        from_json(&response.body)
    }

    /// Returns the stored item; the toast text is dropped.
    pub fn parse_save_item(&self, response: HttpResponse) -> Result<TodoItem, ApiError> {
        check_status(&response, 200)?;
        let action: ActionResponse = from_json(&response.body)?;
        action
            .item
            .ok_or_else(|| ApiError::DeserializationError("save response has no item".to_string()))
    }

    pub fn parse_complete_item(&self, response: HttpResponse) -> Result<ActionResponse, ApiError> {
        check_status(&response, 200)?;
        from_json(&response.body)
    }

    pub fn parse_reorder(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response, 200)
    }
}

fn to_json<T: Serialize>(value: &T) -> Result<String, ApiError> {
    serde_json::to_string(value).map_err(|e| ApiError::SerializationError(e.to_string()))
}

fn from_json<T: DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    serde_json::from_str(body).map_err(|e| ApiError::DeserializationError(e.to_string()))
}

/// Map non-success status codes to the matching `ApiError` variant.
fn check_status(response: &HttpResponse, expected: u16) -> Result<(), ApiError> {
    match response.status {
        status if status == expected => Ok(()),
        404 => Err(ApiError::NotFound),
        422 => match serde_json::from_str::<ValidationBody>(&response.body) {
            Ok(body) => Err(ApiError::Validation(body)),
            Err(_) => Err(ApiError::HttpError {
                status: 422,
                body: response.body.clone(),
            }),
        },
        status => Err(ApiError::HttpError {
            status,
            body: response.body.clone(),
        }),
    }
}
