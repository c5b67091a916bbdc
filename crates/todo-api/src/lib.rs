//! # Todo API
//! 
//! HTTP handlers, views, and routing for the todo application.

pub mod error;
pub mod handlers;
pub mod response;
pub mod router;
pub mod state;
pub mod views;

pub use error::ApiError;
pub use router::build_router;
pub use state::AppState;
