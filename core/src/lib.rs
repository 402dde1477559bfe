//! Core of the dashboard to-do list.
//!
//! # Overview
//! Holds the list rules (`TodoListService`), the storage seam
//! (`TodoRepository`, with an in-memory implementation), the wire DTOs, and
//! a host-does-IO client for the HTTP API. Nothing here touches the
//! network or the filesystem.
//!
//! # Design
//! - The service is generic over its repository so the server can plug in
//!   SQLite while tests run against `InMemoryTodoRepo`.
//! - Missing ids are no-ops for `complete` and `reorder`.
//! - `DashboardClient` mirrors the server routes 1:1 through `build_*` /
//!   `parse_*` pairs; integration tests catch drift between the two.

pub mod client;
pub mod error;
pub mod http;
pub mod memory;
pub mod repository;
pub mod service;
pub mod types;

pub use client::DashboardClient;
pub use error::{ApiError, ServiceError, StoreError, ValidationBody, ValidationError};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use memory::InMemoryTodoRepo;
pub use repository::{NewTodoItem, TodoRepository};
pub use service::TodoListService;
pub use types::{
    ActionResponse, DateRange, DateRangeInput, ReorderRequest, SaveTodo, ToastType, TodoDraft,
    TodoId, TodoItem, TodoRow,
};
