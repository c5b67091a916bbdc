//! # Todo Infrastructure
//! 
//! Database and in-memory implementations of the todo repository (adapters).

pub mod database;
pub mod memory;

use std::sync::Arc;
use tracing::info;

use todo_core::error::DomainError;
use todo_core::repositories::TodoRepository;
use todo_shared::config::{DatabaseSettings, StorageBackend};

pub use database::{create_pool, run_migrations, PgTodoRepository};
pub use memory::InMemoryTodoRepository;

/// Build the repository selected by `database.backend`, migrating PostgreSQL when asked to.
pub async fn connect(settings: &DatabaseSettings) -> Result<Arc<dyn TodoRepository>, DomainError> {
    match settings.backend {
        StorageBackend::Memory => {
            info!("Using in-memory todo storage");
            Ok(Arc::new(InMemoryTodoRepository::new()))
        }
        StorageBackend::Postgres => {
            let pool = create_pool(settings)
                .await
                .map_err(|e| DomainError::DatabaseError(e.to_string()))?;
            info!("Database connection established.");

            if settings.run_migrations {
                run_migrations(&pool).await?;
            }
            Ok(Arc::new(PgTodoRepository::new(pool)))
        }
    }
}
