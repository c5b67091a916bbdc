//! Repository traits (ports)

pub mod todo_repository;

pub use todo_repository::TodoRepository;

#[cfg(test)]
pub use todo_repository::MockTodoRepository;
