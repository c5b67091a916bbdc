// ============================================================================
// Todo API - HTML Page Handlers
// File: crates/todo-api/src/handlers/pages.rs
// ============================================================================
//! Server-rendered todo pages. These host the context menu's DOM contract.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use serde::Deserialize;
use tracing::warn;

use todo_core::domain::{Todo, TodoDraft, TodoId};
use todo_core::DomainError;
use todo_shared::constants::TODOS_PATH;

use crate::error::{ApiError, PageError};
use crate::handlers::todos::ListQuery;
use crate::state::AppState;
use crate::views::FormPage;

/// Submitted new/edit form. Browsers omit unchecked checkboxes.
#[derive(Debug, Default, Deserialize)]
pub struct TodoForm {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub done: Option<String>,
    /// Method override carried by a hidden field
    #[serde(default, rename = "_method")]
    pub method: Option<String>,
}

impl TodoForm {
    pub fn into_draft(self) -> TodoDraft {
        TodoDraft {
            title: non_blank(self.title),
            description: non_blank(self.description),
            done: Some(is_checked(self.done.as_deref())),
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn is_checked(value: Option<&str>) -> bool {
    matches!(value.map(str::trim), Some("1" | "true" | "on"))
}

fn rejected(state: &AppState, form: FormPage) -> Result<Response, PageError> {
    let html = state.views.form(&state.config.app.name, &form)?;
    Ok((StatusCode::UNPROCESSABLE_ENTITY, Html(html)).into_response())
}

fn redirect_to_show(todo: &Todo) -> Response {
    Redirect::to(&todo.path()).into_response()
}

/// GET /
pub async fn root() -> Redirect {
    Redirect::to(TODOS_PATH)
}

/// GET /todos
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Html<String>, PageError> {
    let page = state.todos.list(&query.filter(), &query.pagination()).await?;
    Ok(Html(state.views.index(&state.config.app.name, &page)?))
}

/// GET /todos/new
pub async fn new_form(State(state): State<AppState>) -> Result<Html<String>, PageError> {
    Ok(Html(state.views.form(&state.config.app.name, &FormPage::new_todo())?))
}

/// POST /todos
pub async fn create(
    State(state): State<AppState>,
    Form(form): Form<TodoForm>,
) -> Result<Response, PageError> {
    let draft = form.into_draft();
    match state.todos.create(&draft).await {
        Ok(todo) => Ok(redirect_to_show(&todo)),
        Err(DomainError::ValidationError(msg)) => {
            rejected(&state, FormPage::new_todo().with_submission(&draft, msg))
        }
        Err(e) => Err(e.into()),
    }
}

/// GET /todos/{id}
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<TodoId>,
) -> Result<Html<String>, PageError> {
    let todo = state.todos.get(id).await?;
    Ok(Html(state.views.show(&state.config.app.name, &todo)?))
}

/// GET /todos/{id}/edit
pub async fn edit_form(
    State(state): State<AppState>,
    Path(id): Path<TodoId>,
) -> Result<Html<String>, PageError> {
    let todo = state.todos.get(id).await?;
    Ok(Html(state.views.form(&state.config.app.name, &FormPage::edit_todo(&todo))?))
}

/// POST /todos/{id}: form update, or destroy when `_method=delete`
pub async fn update_or_destroy(
    State(state): State<AppState>,
    Path(id): Path<TodoId>,
    Form(form): Form<TodoForm>,
) -> Result<Response, PageError> {
    let method = form.method.as_deref().map(|m| m.trim().to_ascii_lowercase());
    match method.as_deref() {
        Some("delete") => destroy(State(state), Path(id)).await,
        None | Some("put") | Some("patch") => update(&state, id, form.into_draft()).await,
        Some(other) => {
            warn!("Unsupported form method override: {}", other);
            Err(ApiError::BadRequest(format!("Unsupported method: {}", other)).into())
        }
    }
}

async fn update(state: &AppState, id: TodoId, draft: TodoDraft) -> Result<Response, PageError> {
    match state.todos.replace(id, &draft).await {
        Ok(todo) => Ok(redirect_to_show(&todo)),
        Err(DomainError::ValidationError(msg)) => {
            let current = state.todos.get(id).await?;
            rejected(state, FormPage::edit_todo(&current).with_submission(&draft, msg))
        }
        Err(e) => Err(e.into()),
    }
}

/// DELETE /todos/{id}
pub async fn destroy(
    State(state): State<AppState>,
    Path(id): Path<TodoId>,
) -> Result<Response, PageError> {
    state.todos.delete(id).await?;
    Ok(Redirect::to(TODOS_PATH).into_response())
}
