//! # Todo Core - Domain Module
//! 
//! Domain entities for the todo application.

pub mod todo;

pub use todo::{Todo, TodoDraft, TodoFilter, TodoId, TodoPage, TodoPatch};
