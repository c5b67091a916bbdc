//! In-memory todo repository, used for `database.backend = "memory"` and router tests

use async_trait::async_trait;
use chrono::Utc;
use std::collections::BTreeMap;
use tokio::sync::RwLock;
use tracing::debug;

use todo_core::domain::{Todo, TodoDraft, TodoFilter, TodoId};
use todo_core::error::DomainError;
use todo_core::repositories::TodoRepository;
use todo_shared::Pagination;

#[derive(Default)]
struct Table {
    rows: BTreeMap<TodoId, Todo>,
    last_id: TodoId,
}

/// Mirrors the `todos` table: ids start at 1 and are never reused.
#[derive(Default)]
pub struct InMemoryTodoRepository {
    table: RwLock<Table>,
}

impl InMemoryTodoRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TodoRepository for InMemoryTodoRepository {
    async fn list(&self, filter: &TodoFilter, pagination: &Pagination) -> Result<(Vec<Todo>, u64), DomainError> {
        let table = self.table.read().await;
        let matching: Vec<&Todo> = table.rows.values().filter(|t| filter.matches(t)).collect();
        let total = matching.len() as u64;

        let offset = usize::try_from(pagination.offset()).unwrap_or(usize::MAX);
        let limit = usize::try_from(pagination.limit()).unwrap_or(usize::MAX);
        let items = matching
            .into_iter()
            .skip(offset)
            .take(limit)
            .cloned()
            .collect();

        Ok((items, total))
    }

    async fn find_by_id(&self, id: TodoId) -> Result<Option<Todo>, DomainError> {
        Ok(self.table.read().await.rows.get(&id).cloned())
    }

    async fn create(&self, draft: &TodoDraft) -> Result<Todo, DomainError> {
        let mut table = self.table.write().await;
        table.last_id += 1;

        let now = Utc::now();
        let todo = Todo {
            id: table.last_id,
            title: draft.title.clone(),
            description: draft.description.clone(),
            done: draft.done,
            created_at: now,
            updated_at: now,
        };
        table.rows.insert(todo.id, todo.clone());

        debug!("In-memory todo inserted: {}", todo.id);
        Ok(todo)
    }

    async fn update(&self, id: TodoId, draft: &TodoDraft) -> Result<Option<Todo>, DomainError> {
        let mut table = self.table.write().await;
        Ok(table.rows.get_mut(&id).map(|todo| {
            todo.apply(draft);
            todo.updated_at = Utc::now();
            todo.clone()
        }))
    }

    async fn delete(&self, id: TodoId) -> Result<bool, DomainError> {
        Ok(self.table.write().await.rows.remove(&id).is_some())
    }

    async fn ping(&self) -> Result<(), DomainError> {
        Ok(())
    }
}
