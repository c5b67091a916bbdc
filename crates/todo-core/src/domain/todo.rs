// ============================================================================
// Todo Core - Todo Entity
// File: crates/todo-core/src/domain/todo.rs
// Description: Todo entity, write payloads and list results
// ============================================================================

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use todo_shared::constants::TODOS_PATH;
use todo_shared::Pagination;

/// Surrogate key generated by the store
pub type TodoId = i64;

/// Persisted todo record. Every column except the timestamps is nullable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Todo {
    pub id: TodoId,
    pub title: Option<String>,
    pub description: Option<String>,
    pub done: Option<bool>,

    // Store-managed timestamps
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Todo {
    pub fn is_done(&self) -> bool {
        self.done.unwrap_or(false)
    }

    /// Resource path, also used as the delete target
    pub fn path(&self) -> String {
        format!("{}/{}", TODOS_PATH, self.id)
    }

    pub fn edit_path(&self) -> String {
        format!("{}/edit", self.path())
    }

    /// Overwrite the editable columns with a draft
    pub fn apply(&mut self, draft: &TodoDraft) {
        self.title = draft.title.clone();
        self.description = draft.description.clone();
        self.done = draft.done;
    }
}

/// Full set of editable columns, used by create and full update
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct TodoDraft {
    #[validate(length(max = 255, message = "Title must be at most 255 characters"))]
    pub title: Option<String>,

    pub description: Option<String>,

    pub done: Option<bool>,
}

/// Partial update; an absent field keeps the stored value
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TodoPatch {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub done: Option<bool>,
}

impl TodoPatch {
    /// Merge onto the stored record, producing the draft to persist
    pub fn merge(&self, todo: &Todo) -> TodoDraft {
        TodoDraft {
            title: self.title.clone().or_else(|| todo.title.clone()),
            description: self.description.clone().or_else(|| todo.description.clone()),
            done: self.done.or(todo.done),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none() && self.done.is_none()
    }
}

/// List filter. `done = Some(v)` matches rows whose column equals `v`; NULL never matches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoFilter {
    pub done: Option<bool>,
}

impl TodoFilter {
    pub fn matches(&self, todo: &Todo) -> bool {
        match self.done {
            Some(wanted) => todo.done == Some(wanted),
            None => true,
        }
    }
}

/// One page of todos ordered by id
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TodoPage {
    pub items: Vec<Todo>,
    pub total: u64,
    pub page: u32,
    pub per_page: u32,
}

impl TodoPage {
    pub fn new(items: Vec<Todo>, total: u64, pagination: &Pagination) -> Self {
        Self {
            items,
            total,
            page: pagination.page,
            per_page: pagination.per_page,
        }
    }

    /// Zero for an empty page size; the fields are public, so `per_page` may bypass clamping.
    pub fn total_pages(&self) -> u64 {
        if self.per_page == 0 {
            return 0;
        }
        self.total.div_ceil(u64::from(self.per_page))
    }
}
