//! Error types for the dashboard service and its client.
//!
//! # Design
//! Missing items are never an error on the service side: `complete` and
//! `reorder` treat unknown ids as no-ops. The service therefore only fails
//! with a field-level `ValidationError` or an opaque `StoreError`.
//!
//! `ApiError` is the client's view of the same failures after they crossed
//! the wire, plus the (de)serialization failures of the client itself.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A rejected input field. Nothing is written when this is returned.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{field}: {message}")]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn required(field: &str) -> Self {
        Self::new(field, format!("The {field} field is required."))
    }

    pub fn to_body(&self) -> ValidationBody {
        let mut errors = BTreeMap::new();
        errors.insert(self.field.clone(), vec![self.message.clone()]);
        ValidationBody {
            message: self.message.clone(),
            errors,
        }
    }
}

/// JSON body of a 422 response: a summary plus messages keyed by field.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ValidationBody {
    pub message: String,
    #[serde(default)]
    pub errors: BTreeMap<String, Vec<String>>,
}

/// Any failure of the persistence layer.
#[derive(Debug, Error)]
#[error("storage failure: {0}")]
pub struct StoreError(#[source] Box<dyn std::error::Error + Send + Sync>);

impl StoreError {
    pub fn new(cause: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self(cause.into())
    }
}

/// Errors returned by `TodoListService`.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Storage(#[from] StoreError),
}

/// Errors returned by `DashboardClient` parse methods.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server returned 404; the requested item does not exist.
    #[error("resource not found")]
    NotFound,

    /// The server rejected the input (422).
    #[error("validation failed: {}", .0.message)]
    Validation(ValidationBody),

    /// The server returned a non-2xx status other than 404 and 422.
    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    DeserializationError(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    SerializationError(String),
}
