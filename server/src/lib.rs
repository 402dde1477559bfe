//! HTTP surface of the dashboard to-do list.
//!
//! # Design
//! Handlers only translate wire payloads into `TodoListService` calls. The
//! service sits behind one `tokio::sync::Mutex`, and each handler holds the
//! lock for exactly one service call, so operations are serialized per
//! process.

pub mod config;
pub mod logging;
pub mod seed;
pub mod store;

use std::future::Future;
use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use tokio::{net::TcpListener, sync::Mutex};
use tracing::{error, info};

use dashboard_core::{
    ActionResponse, InMemoryTodoRepo, ReorderRequest, SaveTodo, ServiceError, ToastType, TodoId,
    TodoItem, TodoListService, TodoRepository, TodoRow, ValidationError,
};

pub type DynTodoRepository = Box<dyn TodoRepository + Send>;

/// Shared handler state: the single service instance of this process.
#[derive(Clone)]
pub struct AppState {
    service: Arc<Mutex<TodoListService<DynTodoRepository>>>,
}

impl AppState {
    pub fn new(repo: impl TodoRepository + Send + 'static) -> Self {
        let repo: DynTodoRepository = Box::new(repo);
        Self::from_service(TodoListService::new(repo))
    }

    pub fn from_service(service: TodoListService<DynTodoRepository>) -> Self {
        Self {
            service: Arc::new(Mutex::new(service)),
        }
    }

    pub fn in_memory() -> Self {
        Self::new(InMemoryTodoRepo::default())
    }
}

pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/todos", get(list_items).post(save_item))
        .route("/todos/reorder", post(reorder_items))
        .route("/todos/{id}", get(get_item))
        .route("/todos/{id}/done", post(complete_item))
        .with_state(state)
}

pub async fn run(listener: TcpListener, state: AppState) -> Result<(), std::io::Error> {
    axum::serve(listener, app(state)).await
}

/// Serve until `shutdown` resolves, then drain in-flight requests.
pub async fn run_with_shutdown<F>(
    listener: TcpListener,
    state: AppState,
    shutdown: F,
) -> Result<(), std::io::Error>
where
    F: Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown)
        .await
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

async fn list_items(State(state): State<AppState>) -> Result<Json<Vec<TodoRow>>, AppError> {
    let service = state.service.lock().await;
    let rows: Vec<TodoRow> = service
        .list_ordered()?
        .into_iter()
        .map(TodoRow::from)
        .collect();
    Ok(Json(rows))
}

async fn get_item(
    State(state): State<AppState>,
    Path(id): Path<TodoId>,
) -> Result<Json<TodoItem>, AppError> {
    let service = state.service.lock().await;
    service.find(id)?.map(Json).ok_or(AppError::NotFound)
}

async fn save_item(
    State(state): State<AppState>,
    Json(input): Json<SaveTodo>,
) -> Result<Json<ActionResponse>, AppError> {
    let draft = input.into_draft()?;
    let item = state.service.lock().await.upsert(draft)?;
    info!(id = item.id, "todo item saved");
    Ok(Json(
        ActionResponse::toast("Added", ToastType::Success).with_item(item),
    ))
}

async fn complete_item(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<ActionResponse>, AppError> {
    // A segment that is not an id names no item, same as an unknown id.
    match raw_id.trim().parse::<TodoId>() {
        Ok(id) => {
            let removed = state.service.lock().await.complete(id)?;
            info!(id, removed, "todo item done");
        }
        Err(_) => info!(raw_id = %raw_id, "done ignored non-numeric item id"),
    }
    Ok(Json(ActionResponse::toast(
        "Congratulation",
        ToastType::Success,
    )))
}

async fn reorder_items(
    State(state): State<AppState>,
    Json(input): Json<ReorderRequest>,
) -> Result<Json<ActionResponse>, AppError> {
    let positions = input.positions();
    let updated = state.service.lock().await.apply_positions(&positions)?;
    info!(requested = positions.len(), updated, "todo list reordered");
    Ok(Json(ActionResponse::empty()))
}

/// Handler failure mapped onto a status code and JSON body.
#[derive(Debug)]
pub enum AppError {
    NotFound,
    Service(ServiceError),
}

impl From<ServiceError> for AppError {
    fn from(err: ServiceError) -> Self {
        AppError::Service(err)
    }
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        AppError::Service(ServiceError::Validation(err))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::NotFound => {
                (StatusCode::NOT_FOUND, Json(json!({ "message": "Not Found" }))).into_response()
            }
            AppError::Service(ServiceError::Validation(err)) => {
                (StatusCode::UNPROCESSABLE_ENTITY, Json(err.to_body())).into_response()
            }
            AppError::Service(ServiceError::Storage(err)) => {
                error!(error = %err, "storage failure while handling request");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "message": "Server Error" })),
                )
                    .into_response()
            }
        }
    }
}
