//! # Todo Shared
//! 
//! Shared configuration, telemetry, and common types for the todo application.

pub mod constants;
pub mod types;
pub mod telemetry;
pub mod config;
pub mod error;

pub use types::*;
pub use error::AppError;
