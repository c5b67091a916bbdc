//! Todo repository trait (port)

use async_trait::async_trait;
use todo_shared::Pagination;

use crate::domain::{Todo, TodoDraft, TodoFilter, TodoId};
use crate::error::DomainError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TodoRepository: Send + Sync {
    /// Matching rows ordered by id, plus the total match count
    async fn list(&self, filter: &TodoFilter, pagination: &Pagination) -> Result<(Vec<Todo>, u64), DomainError>;
    async fn find_by_id(&self, id: TodoId) -> Result<Option<Todo>, DomainError>;
    async fn create(&self, draft: &TodoDraft) -> Result<Todo, DomainError>;
    /// Overwrite the editable columns; `None` when the row does not exist
    async fn update(&self, id: TodoId, draft: &TodoDraft) -> Result<Option<Todo>, DomainError>;
    /// `false` when the row does not exist
    async fn delete(&self, id: TodoId) -> Result<bool, DomainError>;
    async fn ping(&self) -> Result<(), DomainError>;
}
