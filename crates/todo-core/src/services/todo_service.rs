// ============================================================================
// Todo Core - Todo Service
// File: crates/todo-core/src/services/todo_service.rs
// ============================================================================
//! CRUD service over the todo repository port

use std::sync::Arc;
use tracing::{info, warn};
use validator::Validate;

use todo_shared::Pagination;

use crate::domain::{Todo, TodoDraft, TodoFilter, TodoId, TodoPage, TodoPatch};
use crate::error::DomainError;
use crate::repositories::TodoRepository;

/// Todo use cases shared by the HTML pages and the JSON API
#[derive(Clone)]
pub struct TodoService {
    repo: Arc<dyn TodoRepository>,
}

impl TodoService {
    pub fn new(repo: Arc<dyn TodoRepository>) -> Self {
        Self { repo }
    }

    pub async fn list(&self, filter: &TodoFilter, pagination: &Pagination) -> Result<TodoPage, DomainError> {
        let (items, total) = self.repo.list(filter, pagination).await?;
        Ok(TodoPage::new(items, total, pagination))
    }

    pub async fn get(&self, id: TodoId) -> Result<Todo, DomainError> {
        self.repo.find_by_id(id).await?.ok_or_else(|| {
            warn!("Todo not found: {}", id);
            DomainError::TodoNotFound(id)
        })
    }

    pub async fn create(&self, draft: &TodoDraft) -> Result<Todo, DomainError> {
        draft.validate()?;

        let todo = self.repo.create(draft).await?;
        info!("Todo created: {}", todo.id);
        Ok(todo)
    }

    /// Full update; every editable column takes the draft's value
    pub async fn replace(&self, id: TodoId, draft: &TodoDraft) -> Result<Todo, DomainError> {
        draft.validate()?;

        let todo = self.repo.update(id, draft).await?.ok_or_else(|| {
            warn!("Update failed: todo not found: {}", id);
            DomainError::TodoNotFound(id)
        })?;
        info!("Todo updated: {}", id);
        Ok(todo)
    }

    pub async fn patch(&self, id: TodoId, patch: &TodoPatch) -> Result<Todo, DomainError> {
        let current = self.get(id).await?;
        if patch.is_empty() {
            return Ok(current);
        }
        self.replace(id, &patch.merge(&current)).await
    }

    pub async fn delete(&self, id: TodoId) -> Result<(), DomainError> {
        if !self.repo.delete(id).await? {
            warn!("Delete failed: todo not found: {}", id);
            return Err(DomainError::TodoNotFound(id));
        }
        info!("Todo deleted: {}", id);
        Ok(())
    }

    pub async fn ping(&self) -> Result<(), DomainError> {
        self.repo.ping().await
    }
}
