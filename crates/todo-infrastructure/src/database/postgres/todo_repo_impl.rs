// ============================================================================
// Todo Infrastructure - PostgreSQL Todo Repository
// File: crates/todo-infrastructure/src/database/postgres/todo_repo_impl.rs
// ============================================================================

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use tracing::{error, info};

use todo_core::domain::{Todo, TodoDraft, TodoFilter, TodoId};
use todo_core::error::DomainError;
use todo_core::repositories::TodoRepository;
use todo_shared::Pagination;

pub struct PgTodoRepository {
    pool: PgPool,
}

impl PgTodoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// Internal row type for SQLx mapping
#[derive(Debug, FromRow)]
struct TodoRow {
    pub id: i64,
    pub title: Option<String>,
    pub description: Option<String>,
    pub done: Option<bool>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<TodoRow> for Todo {
    fn from(row: TodoRow) -> Self {
        Todo {
            id: row.id,
            title: row.title,
            description: row.description,
            done: row.done,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

fn to_i64(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

#[async_trait]
impl TodoRepository for PgTodoRepository {
    async fn list(&self, filter: &TodoFilter, pagination: &Pagination) -> Result<(Vec<Todo>, u64), DomainError> {
        let rows: Vec<TodoRow> = sqlx::query_as(
            r#"
            SELECT id, title, description, done, created_at, updated_at
            FROM todos
            WHERE ($1::BOOLEAN IS NULL OR done = $1)
            ORDER BY id ASC
            LIMIT $2 OFFSET $3
            "#
        )
        .bind(filter.done)
        .bind(to_i64(pagination.limit()))
        .bind(to_i64(pagination.offset()))
        .fetch_all(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error listing todos: {}", e);
            DomainError::DatabaseError(e.to_string())
        })?;

        let total: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*)
            FROM todos
            WHERE ($1::BOOLEAN IS NULL OR done = $1)
            "#
        )
        .bind(filter.done)
        .fetch_one(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error counting todos: {}", e);
            DomainError::DatabaseError(e.to_string())
        })?;

        Ok((
            rows.into_iter().map(Todo::from).collect(),
            u64::try_from(total).unwrap_or_default(),
        ))
    }

    async fn find_by_id(&self, id: TodoId) -> Result<Option<Todo>, DomainError> {
        let row: Option<TodoRow> = sqlx::query_as(
            r#"
            SELECT id, title, description, done, created_at, updated_at
            FROM todos
            WHERE id = $1
            "#
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error finding todo by id: {}", e);
            DomainError::DatabaseError(e.to_string())
        })?;

        Ok(row.map(|r| r.into()))
    }

    async fn create(&self, draft: &TodoDraft) -> Result<Todo, DomainError> {
        let row: TodoRow = sqlx::query_as(
            r#"
            INSERT INTO todos (title, description, done)
            VALUES ($1, $2, $3)
            RETURNING id, title, description, done, created_at, updated_at
            "#
        )
        .bind(&draft.title)
        .bind(&draft.description)
        .bind(draft.done)
        .fetch_one(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error creating todo: {}", e);
            DomainError::DatabaseError(e.to_string())
        })?;

        info!("Todo row inserted: {}", row.id);
        Ok(row.into())
    }

    async fn update(&self, id: TodoId, draft: &TodoDraft) -> Result<Option<Todo>, DomainError> {
        let row: Option<TodoRow> = sqlx::query_as(
            r#"
            UPDATE todos
            SET
                title = $2,
                description = $3,
                done = $4,
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, title, description, done, created_at, updated_at
            "#
        )
        .bind(id)
        .bind(&draft.title)
        .bind(&draft.description)
        .bind(draft.done)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error updating todo: {}", e);
            DomainError::DatabaseError(e.to_string())
        })?;

        Ok(row.map(|r| r.into()))
    }

    async fn delete(&self, id: TodoId) -> Result<bool, DomainError> {
        let result = sqlx::query(
            r#"
            DELETE FROM todos
            WHERE id = $1
            "#
        )
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error deleting todo: {}", e);
            DomainError::DatabaseError(e.to_string())
        })?;

        Ok(result.rows_affected() > 0)
    }

    async fn ping(&self) -> Result<(), DomainError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e: sqlx::Error| {
                error!("Database ping failed: {}", e);
                DomainError::DatabaseError(e.to_string())
            })?;
        Ok(())
    }
}
