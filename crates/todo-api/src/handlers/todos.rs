// ============================================================================
// Todo API - JSON Handlers
// File: crates/todo-api/src/handlers/todos.rs
// ============================================================================
//! JSON CRUD handlers mounted under `/api/v1/todos`

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use todo_core::domain::{Todo, TodoDraft, TodoFilter, TodoId, TodoPage, TodoPatch};
use todo_shared::Pagination;

use crate::error::ApiError;
use crate::response::ApiResponse;
use crate::state::AppState;

/// Query string accepted by the list endpoints
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
    pub done: Option<bool>,
}

impl ListQuery {
    pub fn filter(&self) -> TodoFilter {
        TodoFilter { done: self.done }
    }

    pub fn pagination(&self) -> Pagination {
        Pagination::new(self.page, self.per_page)
    }
}

/// List handler - GET /api/v1/todos
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<ApiResponse<TodoPage>>, ApiError> {
    let page = state.todos.list(&query.filter(), &query.pagination()).await?;
    Ok(Json(ApiResponse::success(page)))
}

/// Create handler - POST /api/v1/todos
pub async fn create(
    State(state): State<AppState>,
    Json(draft): Json<TodoDraft>,
) -> Result<(StatusCode, Json<ApiResponse<Todo>>), ApiError> {
    let todo = state.todos.create(&draft).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(todo))))
}

/// Show handler - GET /api/v1/todos/{id}
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<TodoId>,
) -> Result<Json<ApiResponse<Todo>>, ApiError> {
    let todo = state.todos.get(id).await?;
    Ok(Json(ApiResponse::success(todo)))
}

/// Full update - PUT /api/v1/todos/{id}
pub async fn replace(
    State(state): State<AppState>,
    Path(id): Path<TodoId>,
    Json(draft): Json<TodoDraft>,
) -> Result<Json<ApiResponse<Todo>>, ApiError> {
    let todo = state.todos.replace(id, &draft).await?;
    Ok(Json(ApiResponse::success(todo)))
}

/// Partial update - PATCH /api/v1/todos/{id}
pub async fn patch(
    State(state): State<AppState>,
    Path(id): Path<TodoId>,
    Json(patch): Json<TodoPatch>,
) -> Result<Json<ApiResponse<Todo>>, ApiError> {
    let todo = state.todos.patch(id, &patch).await?;
    Ok(Json(ApiResponse::success(todo)))
}

/// Delete handler - DELETE /api/v1/todos/{id}
pub async fn destroy(
    State(state): State<AppState>,
    Path(id): Path<TodoId>,
) -> Result<StatusCode, ApiError> {
    state.todos.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
