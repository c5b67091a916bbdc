//! PostgreSQL repository implementations

pub mod todo_repo_impl;

pub use todo_repo_impl::PgTodoRepository;
